// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Stream telemetry samples and the source trait the controller polls

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

use crate::error::Result;

/// Point-in-time statistics for the active stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySample {
    /// Seconds since the stream started playing
    pub playtime_seconds: f64,
    /// Current frames per second
    pub fps: f64,
    /// Current decode time in milliseconds
    pub decode_time_ms: f64,
    /// Current jitter in milliseconds
    pub jitter_ms: f64,
    /// Current bitrate in Mbps
    pub bitrate_mbps: f64,
    #[serde(default)]
    pub packets_received: u64,
    #[serde(default)]
    pub packets_dropped: u64,
}

impl TelemetrySample {
    /// Dropped packets over received packets (0 when nothing was received)
    pub fn packet_loss_ratio(&self) -> f64 {
        if self.packets_received == 0 {
            0.0
        } else {
            self.packets_dropped as f64 / self.packets_received as f64
        }
    }
}

/// Provider of fresh telemetry for each evaluation tick
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Collect and return a fresh sample
    async fn sample(&self) -> Result<TelemetrySample>;
}

/// Source backed by the most recent sample pushed by the host's stats
/// collector
#[derive(Default)]
pub struct LatestSample {
    latest: RwLock<TelemetrySample>,
}

impl LatestSample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&self, sample: TelemetrySample) {
        match self.latest.write() {
            Ok(mut guard) => *guard = sample,
            Err(poisoned) => {
                tracing::warn!("Telemetry lock was poisoned, recovering");
                *poisoned.into_inner() = sample;
            }
        }
    }
}

#[async_trait]
impl TelemetrySource for LatestSample {
    async fn sample(&self) -> Result<TelemetrySample> {
        let sample = match self.latest.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        };
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_loss_ratio() {
        let sample = TelemetrySample {
            packets_received: 1000,
            packets_dropped: 15,
            ..Default::default()
        };
        assert!((sample.packet_loss_ratio() - 0.015).abs() < f64::EPSILON);
    }

    #[test]
    fn test_packet_loss_ratio_without_packets() {
        let sample = TelemetrySample {
            packets_dropped: 10,
            ..Default::default()
        };
        assert_eq!(sample.packet_loss_ratio(), 0.0);
    }

    #[test]
    fn test_sample_deserializes_camel_case() {
        let sample: TelemetrySample = serde_json::from_value(serde_json::json!({
            "playtimeSeconds": 60.0,
            "fps": 59.9,
            "decodeTimeMs": 4.2,
            "jitterMs": 3.0,
            "bitrateMbps": 18.5
        }))
        .unwrap();
        assert_eq!(sample.fps, 59.9);
        assert_eq!(sample.packets_received, 0);
    }

    #[tokio::test]
    async fn test_latest_sample_returns_most_recent_update() {
        let source = LatestSample::new();
        source.update(TelemetrySample {
            fps: 30.0,
            ..Default::default()
        });
        source.update(TelemetrySample {
            fps: 60.0,
            ..Default::default()
        });
        assert_eq!(source.sample().await.unwrap().fps, 60.0);
    }
}
