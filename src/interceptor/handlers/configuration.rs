// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use reqwest::Method;
use serde_json::{json, Value};

use crate::error::{ApiError, Result};
use crate::events::StreamEvent;
use crate::interceptor::http::{ensure_object, HttpRequest, HttpResponse};
use crate::interceptor::XcloudInterceptor;
use crate::prefs::{GlobalPref, NativeMkbMode, TouchControllerMode};

const OVERRIDES_KEY: &str = "clientStreamingConfigOverrides";
const MAX_TOUCH_POINTS: u64 = 10;

impl XcloudInterceptor {
    /// Stream configuration: rewrite the client override document.
    pub(crate) async fn handle_configuration(&self, request: HttpRequest) -> Result<HttpResponse> {
        if request.method != Method::GET {
            return self.transport.send(request).await;
        }

        self.update_touch_controller();

        let response = self.transport.send(request).await?;
        if response.body.is_empty() {
            return Ok(response);
        }

        self.events.emit_stream(StreamEvent::Starting);

        let mut body = response.json()?;
        let document = body.as_object_mut().ok_or_else(|| {
            ApiError::InvalidResponse("configuration response is not a JSON object".to_string())
        })?;

        let mut overrides = match document.get(OVERRIDES_KEY).and_then(Value::as_str) {
            Some(raw) if !raw.is_empty() => serde_json::from_str(raw)?,
            _ => json!({}),
        };
        if !overrides.is_object() {
            overrides = json!({});
        }

        let (touch_enabled, forced_mkb) = {
            let session = self.session.read();
            let forced = session.title_info.as_ref().is_some_and(|title| {
                self.config
                    .force_native_mkb_titles
                    .iter()
                    .any(|id| *id == title.product_id)
            });
            (session.touch_enabled, forced)
        };

        {
            let input = ensure_object(&mut overrides, "inputConfiguration")?;
            input.insert("enableVibration".to_string(), Value::Bool(true));

            let mkb_mode = self.prefs.get_text(GlobalPref::NativeMkbMode.into());
            let mut mkb = None;
            if mkb_mode == NativeMkbMode::On.as_str() || forced_mkb {
                mkb = Some(true);
            }
            if mkb_mode == NativeMkbMode::Off.as_str() {
                mkb = Some(false);
            }
            if let Some(enabled) = mkb {
                input.insert("enableMouseInput".to_string(), Value::Bool(enabled));
                input.insert("enableKeyboardInput".to_string(), Value::Bool(enabled));
            }

            if touch_enabled {
                input.insert("enableTouchInput".to_string(), Value::Bool(true));
                input.insert("maxTouchPoints".to_string(), Value::from(MAX_TOUCH_POINTS));
            }
        }

        if self.prefs.get_bool(GlobalPref::AudioMicOnPlaying.into()) {
            ensure_object(&mut overrides, "audioConfiguration")?
                .insert("enableMicrophone".to_string(), Value::Bool(true));
        }

        document.insert(
            OVERRIDES_KEY.to_string(),
            Value::String(serde_json::to_string(&overrides)?),
        );

        response.with_json_body(&body)
    }

    /// In `all` mode the touch controller covers titles without native touch
    /// support; `off` disables it outright. `default` leaves the host's choice.
    fn update_touch_controller(&self) {
        let mode = self.prefs.get_text(GlobalPref::TouchControllerMode.into());
        let mut session = self.session.write();
        if mode == TouchControllerMode::All.as_str() {
            let native_touch = session
                .title_info
                .as_ref()
                .is_some_and(|title| title.has_touch_support);
            session.touch_enabled = !native_touch;
            tracing::debug!(enabled = session.touch_enabled, "touch controller updated");
        } else if mode == TouchControllerMode::Off.as_str() {
            session.touch_enabled = false;
        }
    }
}
