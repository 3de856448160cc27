// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Interception of session-negotiation traffic
//!
//! [`route`] picks a handler from the URL shape alone. Each handler wraps the
//! injected [`Transport`]: it may rewrite the outgoing request, publish
//! events, update the shared [`SessionContext`] and rewrite the response.
//! Anything that matches no route is forwarded untouched.

use std::sync::Arc;

use reqwest::Method;

use crate::config::InterceptorConfig;
use crate::error::Result;
use crate::events::EventBus;
use crate::prefs::PrefStore;

pub mod handlers;
pub mod http;
pub mod mock_transport;
pub mod network;
pub mod regions;
pub mod session;
pub mod transport;

pub use handlers::{ForwardIceCandidates, IceCandidatePatcher};
pub use http::{HttpRequest, HttpResponse};
pub use mock_transport::{MockReply, MockTransport};
pub use regions::{normalize_regions, Continent, NormalizedRegions, RegionTable, ServerRegion};
pub use session::{SessionContext, SharedSession, TitleInfo};
pub use transport::{ReqwestTransport, Transport};

/// Which handler a request is dispatched to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Play,
    WaitTime,
    Configuration,
    IceCandidates,
    PassThrough,
}

/// Classify a request by URL shape. First match wins.
pub fn route(request: &HttpRequest, token_hosts: &[String]) -> Route {
    let url = request.url_str();

    if url.ends_with("/v2/login/user") {
        Route::Login
    } else if url.ends_with("/sessions/cloud/play") {
        Route::Play
    } else if token_hosts.iter().any(|host| url.contains(host.as_str())) && url.contains("/waittime/")
    {
        Route::WaitTime
    } else if url.ends_with("/configuration") {
        Route::Configuration
    } else if url.ends_with("/ice") && url.contains("/sessions/") && request.method == Method::GET {
        Route::IceCandidates
    } else {
        Route::PassThrough
    }
}

/// Request/response rewriter for the negotiation service
pub struct XcloudInterceptor {
    transport: Arc<dyn Transport>,
    prefs: Arc<dyn PrefStore>,
    events: EventBus,
    session: SharedSession,
    config: InterceptorConfig,
    ice: Arc<dyn IceCandidatePatcher>,
}

impl XcloudInterceptor {
    pub fn new(
        transport: Arc<dyn Transport>,
        prefs: Arc<dyn PrefStore>,
        events: EventBus,
        session: SharedSession,
        config: InterceptorConfig,
    ) -> Self {
        Self {
            transport,
            prefs,
            events,
            session,
            config,
            ice: Arc::new(ForwardIceCandidates),
        }
    }

    /// Replace the ICE candidate patcher
    pub fn with_ice_patcher(mut self, patcher: Arc<dyn IceCandidatePatcher>) -> Self {
        self.ice = patcher;
        self
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn config(&self) -> &InterceptorConfig {
        &self.config
    }

    /// Dispatch `request` to its handler and return the (possibly rewritten)
    /// response
    pub async fn handle(&self, request: HttpRequest) -> Result<HttpResponse> {
        let route = route(&request, &self.config.token_hosts);
        tracing::debug!(?route, method = %request.method, url = %request.url, "intercepted request");

        match route {
            Route::Login => self.handle_login(request).await,
            Route::Play => self.handle_play(request).await,
            Route::WaitTime => self.handle_wait_time(request).await,
            Route::Configuration => self.handle_configuration(request).await,
            Route::IceCandidates => self.ice.patch(self.transport.as_ref(), request).await,
            Route::PassThrough => self.transport.send(request).await,
        }
    }
}
