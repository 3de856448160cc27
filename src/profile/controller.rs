// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Adaptive profile controller
//!
//! While the stream plays in `auto` mode the controller samples telemetry on
//! every tick, clamps the classifier's vote to the device baseline and only
//! switches tier once the same target has been seen on enough consecutive
//! ticks and the cooldown since the previous switch has elapsed.
//!
//! The controller owns all of its state and never spawns anything; the
//! [`ProfileMonitor`](super::monitor::ProfileMonitor) decides when to call
//! [`ProfileController::evaluate`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::apply::apply_tier;
use super::classifier::classify;
use super::clock::Clock;
use super::device::DeviceDescriptor;
use super::tier::{clamp, PerformanceProfile, Tier};
use crate::config::ProfileConfig;
use crate::prefs::{ChangeOrigin, GlobalPref, PrefStore};
use crate::telemetry::TelemetrySource;

/// Debounce bookkeeping for the controller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HysteresisState {
    /// Target seen on the most recent ticks
    pub candidate_tier: Option<Tier>,
    /// Consecutive ticks that agreed on `candidate_tier`
    pub candidate_streak: u32,
    /// Tier most recently written to the preference store
    pub last_applied_tier: Option<Tier>,
    /// When the controller last switched tier on its own
    pub last_switch_at: Option<Instant>,
}

impl HysteresisState {
    fn clear_candidate(&mut self) {
        self.candidate_tier = None;
        self.candidate_streak = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorPhase {
    Idle,
    Monitoring,
}

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Not monitoring (or monitoring just ended)
    Stopped,
    /// The classifier had nothing to say
    NoVote,
    /// Target matches the applied tier
    Settled(Tier),
    /// Target differs but has not been stable long enough
    Pending { candidate: Tier, streak: u32 },
    /// Target is stable but the previous switch was too recent
    CoolingDown { candidate: Tier, remaining: Duration },
    /// The controller applied a new tier
    Switched(Tier),
}

pub struct ProfileController {
    config: ProfileConfig,
    device: DeviceDescriptor,
    prefs: Arc<dyn PrefStore>,
    telemetry: Arc<dyn TelemetrySource>,
    clock: Arc<dyn Clock>,
    state: HysteresisState,
    phase: MonitorPhase,
    playing: bool,
}

impl ProfileController {
    pub fn new(
        config: ProfileConfig,
        device: DeviceDescriptor,
        prefs: Arc<dyn PrefStore>,
        telemetry: Arc<dyn TelemetrySource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            device,
            prefs,
            telemetry,
            clock,
            state: HysteresisState::default(),
            phase: MonitorPhase::Idle,
            playing: false,
        }
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    pub fn state(&self) -> &HysteresisState {
        &self.state
    }

    pub fn phase(&self) -> MonitorPhase {
        self.phase
    }

    pub fn is_monitoring(&self) -> bool {
        self.phase == MonitorPhase::Monitoring
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Profile mode currently stored in preferences.
    ///
    /// Unrecognized values fall back to `auto`, the preference's default.
    pub fn mode(&self) -> PerformanceProfile {
        let raw = self.prefs.get_text(GlobalPref::PerformanceProfile.into());
        match raw.parse() {
            Ok(mode) => mode,
            Err(_) => {
                tracing::debug!(value = %raw, "unrecognized performance profile, using auto");
                PerformanceProfile::Auto
            }
        }
    }

    /// Bring the controller up from the stored mode.
    ///
    /// A fixed mode only stops monitoring: its bundle was written when the
    /// user picked it and may since have been edited key by key. `auto`
    /// applies the device baseline. Returns the tier written, if any.
    pub fn start(&mut self) -> Option<Tier> {
        match self.mode().fixed_tier() {
            Some(tier) => {
                tracing::debug!(tier = %tier, "fixed profile stored, not monitoring");
                self.stop_monitoring();
                None
            }
            None => Some(self.apply_auto_baseline()),
        }
    }

    /// React to the user picking a profile mode. Returns the tier written.
    pub fn on_profile_changed(&mut self) -> Tier {
        match self.mode().fixed_tier() {
            Some(tier) => {
                apply_tier(self.prefs.as_ref(), tier, ChangeOrigin::Direct);
                self.state.last_applied_tier = Some(tier);
                self.stop_monitoring();
                tier
            }
            None => self.apply_auto_baseline(),
        }
    }

    fn apply_auto_baseline(&mut self) -> Tier {
        let tier = self.device.baseline();
        apply_tier(self.prefs.as_ref(), tier, ChangeOrigin::Ui);
        self.state.last_applied_tier = Some(tier);
        if self.playing {
            self.start_monitoring();
        }
        tier
    }

    pub fn on_stream_playing(&mut self) {
        self.playing = true;
        if self.mode() == PerformanceProfile::Auto {
            self.start_monitoring();
        }
    }

    pub fn on_stream_stopped(&mut self) {
        self.playing = false;
        self.stop_monitoring();
    }

    pub fn start_monitoring(&mut self) {
        if self.phase == MonitorPhase::Idle {
            tracing::debug!("profile monitoring started");
            self.phase = MonitorPhase::Monitoring;
        }
    }

    /// Leave the monitoring phase. The pending candidate is forgotten; the
    /// applied tier and switch time are kept.
    pub fn stop_monitoring(&mut self) {
        if self.phase == MonitorPhase::Monitoring {
            tracing::debug!("profile monitoring stopped");
        }
        self.phase = MonitorPhase::Idle;
        self.state.clear_candidate();
    }

    /// Run one controller tick
    pub async fn evaluate(&mut self) -> Evaluation {
        if self.phase != MonitorPhase::Monitoring {
            return Evaluation::Stopped;
        }

        if !self.playing || self.mode() != PerformanceProfile::Auto {
            self.stop_monitoring();
            return Evaluation::Stopped;
        }

        let sample = match self.telemetry.sample().await {
            Ok(sample) => sample,
            Err(e) => {
                tracing::warn!("Failed to read telemetry: {}", e);
                return Evaluation::NoVote;
            }
        };

        let Some(stat_tier) = classify(&sample) else {
            tracing::debug!(playtime = sample.playtime_seconds, "classifier abstained");
            return Evaluation::NoVote;
        };

        let target = clamp(self.device.baseline(), stat_tier);
        tracing::debug!(stat_tier = %stat_tier, target = %target, "profile tick");

        if self.state.last_applied_tier == Some(target) {
            self.state.clear_candidate();
            return Evaluation::Settled(target);
        }

        if self.state.candidate_tier == Some(target) {
            self.state.candidate_streak += 1;
        } else {
            self.state.candidate_tier = Some(target);
            self.state.candidate_streak = 1;
        }

        let streak = self.state.candidate_streak;
        if streak < self.config.stable_ticks {
            return Evaluation::Pending {
                candidate: target,
                streak,
            };
        }

        let now = self.clock.now();
        let cooldown = self.config.cooldown();
        if let Some(last_switch) = self.state.last_switch_at {
            let elapsed = now.saturating_duration_since(last_switch);
            if elapsed < cooldown {
                return Evaluation::CoolingDown {
                    candidate: target,
                    remaining: cooldown - elapsed,
                };
            }
        }

        let previous = self.state.last_applied_tier;
        apply_tier(self.prefs.as_ref(), target, ChangeOrigin::Auto);
        self.state.last_applied_tier = Some(target);
        self.state.last_switch_at = Some(now);
        self.state.clear_candidate();

        tracing::info!(
            from = previous.map(|t| t.as_str()).unwrap_or("none"),
            to = %target,
            fps = sample.fps,
            decode_ms = sample.decode_time_ms,
            jitter_ms = sample.jitter_ms,
            bitrate_mbps = sample.bitrate_mbps,
            "performance profile switched"
        );

        Evaluation::Switched(target)
    }
}
