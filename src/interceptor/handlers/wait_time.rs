// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use serde_json::Value;

use crate::error::Result;
use crate::events::StreamEvent;
use crate::interceptor::http::{HttpRequest, HttpResponse};
use crate::interceptor::XcloudInterceptor;
use crate::prefs::GlobalPref;

impl XcloudInterceptor {
    /// Queue estimate: forward, then announce the wait if one is expected.
    pub(crate) async fn handle_wait_time(&self, request: HttpRequest) -> Result<HttpResponse> {
        let response = self.transport.send(request).await?;

        if !self
            .prefs
            .get_bool(GlobalPref::LoadingScreenShowWaitTime.into())
        {
            return Ok(response);
        }

        match response.json() {
            Ok(json) => {
                let allocation = json
                    .get("estimatedAllocationTimeInSeconds")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0);
                if allocation > 0.0 {
                    let total = json
                        .get("estimatedTotalWaitTimeInSeconds")
                        .and_then(Value::as_f64)
                        .unwrap_or(0.0);
                    self.events.emit_stream(StreamEvent::WaitTime {
                        seconds: total.max(0.0).round() as u64,
                    });
                }
            }
            Err(e) => tracing::debug!("Ignoring unreadable wait-time response: {}", e),
        }

        Ok(response)
    }
}
