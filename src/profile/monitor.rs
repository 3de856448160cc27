// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Event-driven task that owns the [`ProfileController`]

use tokio::sync::oneshot;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use super::controller::{Evaluation, ProfileController};
use crate::events::{EventBus, ScriptEvent, StreamEvent};
use crate::prefs::{GlobalPref, PrefKey};

/// Drives the controller from bus events and a periodic tick.
///
/// The tick only exists while the controller is monitoring; dropping the
/// `Interval` cancels it.
pub struct ProfileMonitor {
    controller: ProfileController,
    events: EventBus,
}

impl ProfileMonitor {
    pub fn new(controller: ProfileController, events: EventBus) -> Self {
        Self { controller, events }
    }

    /// Run until `shutdown` fires or the bus goes away. Returns the
    /// controller so its final state can be inspected.
    pub async fn run(mut self, mut shutdown: oneshot::Receiver<()>) -> ProfileController {
        let mut script = self.events.subscribe_script();
        let mut stream = self.events.subscribe_stream();
        let mut ticker: Option<Interval> = None;

        self.controller.start();
        self.sync_ticker(&mut ticker);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::debug!("profile monitor shutting down");
                    break;
                }
                event = script.recv() => {
                    let Some(event) = event else { break };
                    if let ScriptEvent::SettingChanged { setting_key, .. } = event {
                        if setting_key == PrefKey::Global(GlobalPref::PerformanceProfile) {
                            self.controller.on_profile_changed();
                        }
                    }
                }
                event = stream.recv() => {
                    match event {
                        Some(StreamEvent::Playing) => self.controller.on_stream_playing(),
                        Some(StreamEvent::Stopped) => self.controller.on_stream_stopped(),
                        Some(_) => {}
                        None => break,
                    }
                }
                _ = next_tick(&mut ticker) => {
                    if let Evaluation::Switched(tier) = self.controller.evaluate().await {
                        tracing::debug!(tier = %tier, "monitor applied new tier");
                    }
                }
            }

            self.sync_ticker(&mut ticker);
        }

        self.controller.stop_monitoring();
        self.controller
    }

    fn sync_ticker(&self, ticker: &mut Option<Interval>) {
        match (self.controller.is_monitoring(), ticker.is_some()) {
            (true, false) => {
                let period = self.controller.config().interval();
                let mut interval = interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                *ticker = Some(interval);
            }
            (false, true) => *ticker = None,
            _ => {}
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
