// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use async_trait::async_trait;

use crate::error::Result;
use crate::interceptor::http::{HttpRequest, HttpResponse};
use crate::interceptor::transport::Transport;

/// Rewrites the ICE candidate exchange for a session
#[async_trait]
pub trait IceCandidatePatcher: Send + Sync {
    async fn patch(&self, transport: &dyn Transport, request: HttpRequest) -> Result<HttpResponse>;
}

/// Forwards the exchange unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct ForwardIceCandidates;

#[async_trait]
impl IceCandidatePatcher for ForwardIceCandidates {
    async fn patch(&self, transport: &dyn Transport, request: HttpRequest) -> Result<HttpResponse> {
        transport.send(request).await
    }
}
