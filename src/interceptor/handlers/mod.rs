// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Endpoint handlers, one `impl XcloudInterceptor` block per endpoint

mod configuration;
mod ice;
mod login;
mod play;
mod wait_time;

pub use ice::{ForwardIceCandidates, IceCandidatePatcher};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::config::InterceptorConfig;
    use crate::events::EventBus;
    use crate::interceptor::{MockTransport, SharedSession, XcloudInterceptor};
    use crate::prefs::MemoryPrefStore;

    pub struct Fixture {
        pub interceptor: XcloudInterceptor,
        pub transport: MockTransport,
        pub prefs: Arc<MemoryPrefStore>,
        pub events: EventBus,
    }

    pub fn fixture(transport: MockTransport) -> Fixture {
        fixture_with_config(transport, InterceptorConfig::default())
    }

    pub fn fixture_with_config(transport: MockTransport, config: InterceptorConfig) -> Fixture {
        let events = EventBus::new();
        let prefs = Arc::new(MemoryPrefStore::new());
        let interceptor = XcloudInterceptor::new(
            Arc::new(transport.clone()),
            prefs.clone(),
            events.clone(),
            SharedSession::new(),
            config,
        );
        Fixture {
            interceptor,
            transport,
            prefs,
            events,
        }
    }
}
