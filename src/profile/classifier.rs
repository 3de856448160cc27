// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Telemetry classifier
//!
//! Degrade-first: any single distressed metric is enough to vote for a lower
//! tier, regardless of how healthy the others look.

use super::tier::Tier;
use crate::telemetry::TelemetrySample;

/// Seconds of playtime before the classifier starts voting
pub const WARMUP_SECONDS: f64 = 45.0;

/// Limits past which a stream is considered distressed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistressThresholds {
    pub min_fps: f64,
    pub max_decode_ms: f64,
    pub max_packet_loss: f64,
    pub max_jitter_ms: f64,
    pub min_bitrate_mbps: f64,
}

/// Below these the stream is in `tv` territory
pub const TV_THRESHOLDS: DistressThresholds = DistressThresholds {
    min_fps: 26.0,
    max_decode_ms: 28.0,
    max_packet_loss: 0.02,
    max_jitter_ms: 25.0,
    min_bitrate_mbps: 2.0,
};

/// Below these the stream is in `android` territory
pub const ANDROID_THRESHOLDS: DistressThresholds = DistressThresholds {
    min_fps: 45.0,
    max_decode_ms: 20.0,
    max_packet_loss: 0.01,
    max_jitter_ms: 18.0,
    min_bitrate_mbps: 4.0,
};

impl DistressThresholds {
    /// Whether any metric in `sample` crosses these limits
    pub fn is_breached_by(&self, sample: &TelemetrySample, packet_loss: f64) -> bool {
        sample.fps < self.min_fps
            || sample.decode_time_ms > self.max_decode_ms
            || packet_loss > self.max_packet_loss
            || sample.jitter_ms > self.max_jitter_ms
            || sample.bitrate_mbps < self.min_bitrate_mbps
    }
}

/// Suggest a tier for `sample`, or `None` when there is not enough signal.
pub fn classify(sample: &TelemetrySample) -> Option<Tier> {
    if sample.playtime_seconds < WARMUP_SECONDS {
        return None;
    }

    if sample.fps <= 0.0 && sample.bitrate_mbps <= 0.0 {
        return None;
    }

    let packet_loss = sample.packet_loss_ratio();

    if TV_THRESHOLDS.is_breached_by(sample, packet_loss) {
        return Some(Tier::Tv);
    }

    if ANDROID_THRESHOLDS.is_breached_by(sample, packet_loss) {
        return Some(Tier::Android);
    }

    Some(Tier::Pc)
}
