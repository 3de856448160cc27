// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Event bus shared by the interceptor, the preference store and the
//! profile controller
//!
//! Two topic sets exist: the script scope (server status, setting changes)
//! and the stream scope (stream lifecycle and on-screen stream hints). Both
//! are tokio broadcast channels; a [`Subscription`] is the handle, and dropping
//! it unsubscribes.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::prefs::{ChangeOrigin, PrefKey};

const DEFAULT_CAPACITY: usize = 64;

/// Result of a login negotiation, as announced to the rest of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Ready,
    Error,
    Unavailable,
}

/// Script-scope events
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ScriptEvent {
    /// `xcloud.server`
    #[serde(rename = "xcloud.server")]
    XcloudServer { status: ServerStatus },
    /// `setting.changed`
    #[serde(rename = "setting.changed", rename_all = "camelCase")]
    SettingChanged {
        setting_key: PrefKey,
        origin: ChangeOrigin,
    },
}

impl ScriptEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ScriptEvent::XcloudServer { .. } => "xcloud.server",
            ScriptEvent::SettingChanged { .. } => "setting.changed",
        }
    }
}

/// Stream-scope events
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event")]
pub enum StreamEvent {
    #[serde(rename = "state.loading")]
    Loading,
    #[serde(rename = "state.starting")]
    Starting,
    #[serde(rename = "state.playing")]
    Playing,
    #[serde(rename = "state.stopped")]
    Stopped,
    /// Region label for the stream badge
    #[serde(rename = "ui.regionBadge")]
    RegionBadge { region: String },
    /// Estimated queue time to show on the loading screen
    #[serde(rename = "loadingScreen.waitTime")]
    WaitTime { seconds: u64 },
}

impl StreamEvent {
    pub fn name(&self) -> &'static str {
        match self {
            StreamEvent::Loading => "state.loading",
            StreamEvent::Starting => "state.starting",
            StreamEvent::Playing => "state.playing",
            StreamEvent::Stopped => "state.stopped",
            StreamEvent::RegionBadge { .. } => "ui.regionBadge",
            StreamEvent::WaitTime { .. } => "loadingScreen.waitTime",
        }
    }
}

/// Cloneable handle to both topic sets
#[derive(Clone)]
pub struct EventBus {
    script: broadcast::Sender<ScriptEvent>,
    stream: broadcast::Sender<StreamEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a bus where slow subscribers may lag by up to `capacity` events
    pub fn with_capacity(capacity: usize) -> Self {
        let (script, _) = broadcast::channel(capacity);
        let (stream, _) = broadcast::channel(capacity);
        Self { script, stream }
    }

    pub fn subscribe_script(&self) -> Subscription<ScriptEvent> {
        Subscription::new(self.script.subscribe())
    }

    pub fn subscribe_stream(&self) -> Subscription<StreamEvent> {
        Subscription::new(self.stream.subscribe())
    }

    /// Publish on the script scope; events with no subscribers are dropped.
    pub fn emit_script(&self, event: ScriptEvent) {
        tracing::debug!(event = event.name(), "script event");
        let _ = self.script.send(event);
    }

    /// Publish on the stream scope; events with no subscribers are dropped.
    pub fn emit_stream(&self, event: StreamEvent) {
        tracing::debug!(event = event.name(), "stream event");
        let _ = self.stream.send(event);
    }
}

/// Subscription handle for one topic set
pub struct Subscription<T> {
    rx: broadcast::Receiver<T>,
}

impl<T: Clone> Subscription<T> {
    fn new(rx: broadcast::Receiver<T>) -> Self {
        Self { rx }
    }

    /// Wait for the next event. Returns `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<T> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event subscriber lagged, skipping events");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next already-published event, without waiting
    pub fn try_recv(&mut self) -> Option<T> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event subscriber lagged, skipping events");
                }
                Err(_) => return None,
            }
        }
    }

    /// All already-published events
    pub fn drain(&mut self) -> Vec<T> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::GlobalPref;

    #[test]
    fn test_events_reach_subscribers_of_their_scope_only() {
        let bus = EventBus::new();
        let mut script = bus.subscribe_script();
        let mut stream = bus.subscribe_stream();

        bus.emit_stream(StreamEvent::Loading);
        bus.emit_script(ScriptEvent::XcloudServer {
            status: ServerStatus::Ready,
        });

        assert_eq!(stream.drain(), vec![StreamEvent::Loading]);
        assert_eq!(
            script.drain(),
            vec![ScriptEvent::XcloudServer {
                status: ServerStatus::Ready
            }]
        );
    }

    #[test]
    fn test_emit_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.emit_stream(StreamEvent::Stopped);
        let mut late = bus.subscribe_stream();
        assert!(late.try_recv().is_none());
    }

    #[test]
    fn test_lagged_subscriber_keeps_newest_events() {
        let bus = EventBus::with_capacity(2);
        let mut sub = bus.subscribe_stream();
        bus.emit_stream(StreamEvent::Loading);
        bus.emit_stream(StreamEvent::Starting);
        bus.emit_stream(StreamEvent::Playing);

        assert_eq!(sub.drain(), vec![StreamEvent::Starting, StreamEvent::Playing]);
    }

    #[test]
    fn test_payload_shapes() {
        let server = serde_json::to_value(ScriptEvent::XcloudServer {
            status: ServerStatus::Unavailable,
        })
        .unwrap();
        assert_eq!(
            server,
            serde_json::json!({"event": "xcloud.server", "status": "unavailable"})
        );

        let changed = serde_json::to_value(ScriptEvent::SettingChanged {
            setting_key: GlobalPref::PerformanceProfile.into(),
            origin: ChangeOrigin::Ui,
        })
        .unwrap();
        assert_eq!(changed["settingKey"], "performance.profile");

        let wait = serde_json::to_value(StreamEvent::WaitTime { seconds: 42 }).unwrap();
        assert_eq!(wait["event"], "loadingScreen.waitTime");
        assert_eq!(wait["seconds"], 42);
    }

    #[tokio::test]
    async fn test_recv_returns_none_when_bus_dropped() {
        let bus = EventBus::new();
        let mut sub = bus.subscribe_stream();
        bus.emit_stream(StreamEvent::Playing);
        drop(bus);

        assert_eq!(sub.recv().await, Some(StreamEvent::Playing));
        assert_eq!(sub.recv().await, None);
    }
}
