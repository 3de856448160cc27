// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! One-shot preset bundles the user can apply from the settings UI
//!
//! Unlike tier bundles these only touch a few related keys and are never
//! reapplied by the controller.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BoltError;
use crate::prefs::{
    ChangeOrigin, GlobalPref, PrefStore, PrefValue, StreamPref, StreamResolution,
    VideoProcessing, VideoProcessingMode,
};
use crate::profile::PrefWrite;

/// Resolution and bitrate ceiling for the network the user is on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkProfile {
    #[default]
    Auto,
    Low,
    Balanced,
    High,
}

/// Upscaler sharpness trade-off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoProfile {
    Soft,
    #[default]
    Balanced,
    Sharp,
}

/// Controller polling trade-off between smoothness and latency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerResponse {
    Stable,
    #[default]
    Balanced,
    Fast,
}

impl NetworkProfile {
    pub const ALL: [NetworkProfile; 4] = [
        NetworkProfile::Auto,
        NetworkProfile::Low,
        NetworkProfile::Balanced,
        NetworkProfile::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkProfile::Auto => "auto",
            NetworkProfile::Low => "low",
            NetworkProfile::Balanced => "balanced",
            NetworkProfile::High => "high",
        }
    }

    pub fn bundle(&self) -> Vec<PrefWrite> {
        let (resolution, bitrate, prevent_drops) = match self {
            NetworkProfile::Low => (StreamResolution::Dim720p, 3 * 1024 * 1000, true),
            NetworkProfile::Balanced => (StreamResolution::Dim720p, 6 * 1024 * 1000, true),
            NetworkProfile::High => (StreamResolution::Auto, 12 * 1024 * 1000, false),
            NetworkProfile::Auto => (StreamResolution::Auto, 0, false),
        };
        vec![
            PrefWrite::new(GlobalPref::StreamResolution, resolution),
            PrefWrite::new(GlobalPref::StreamMaxVideoBitrate, PrefValue::Int(bitrate)),
            PrefWrite::new(GlobalPref::StreamPreventResolutionDrops, prevent_drops),
        ]
    }
}

impl VideoProfile {
    pub const ALL: [VideoProfile; 3] = [VideoProfile::Soft, VideoProfile::Balanced, VideoProfile::Sharp];

    pub fn as_str(&self) -> &'static str {
        match self {
            VideoProfile::Soft => "soft",
            VideoProfile::Balanced => "balanced",
            VideoProfile::Sharp => "sharp",
        }
    }

    pub fn bundle(&self) -> Vec<PrefWrite> {
        let (mode, sharpness) = match self {
            VideoProfile::Soft => (VideoProcessingMode::Performance, 0),
            VideoProfile::Sharp => (VideoProcessingMode::Quality, 2),
            VideoProfile::Balanced => (VideoProcessingMode::Performance, 1),
        };
        vec![
            PrefWrite::new(StreamPref::VideoProcessing, VideoProcessing::Usm),
            PrefWrite::new(StreamPref::VideoProcessingMode, mode),
            PrefWrite::new(StreamPref::VideoSharpness, PrefValue::Int(sharpness)),
        ]
    }
}

impl ControllerResponse {
    pub const ALL: [ControllerResponse; 3] = [
        ControllerResponse::Stable,
        ControllerResponse::Balanced,
        ControllerResponse::Fast,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerResponse::Stable => "stable",
            ControllerResponse::Balanced => "balanced",
            ControllerResponse::Fast => "fast",
        }
    }

    /// Polling interval in milliseconds
    pub fn polling_rate(&self) -> i64 {
        match self {
            ControllerResponse::Stable => 16,
            ControllerResponse::Balanced => 8,
            ControllerResponse::Fast => 4,
        }
    }

    pub fn bundle(&self) -> Vec<PrefWrite> {
        vec![PrefWrite::new(
            StreamPref::ControllerPollingRate,
            PrefValue::Int(self.polling_rate()),
        )]
    }
}

macro_rules! preset_text {
    ($name:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = BoltError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                $name::ALL
                    .into_iter()
                    .find(|preset| preset.as_str() == wanted)
                    .ok_or_else(|| {
                        BoltError::InvalidInput(format!(
                            "unknown {} preset: {}",
                            stringify!($name),
                            s
                        ))
                    })
            }
        }
    };
}

preset_text!(NetworkProfile);
preset_text!(VideoProfile);
preset_text!(ControllerResponse);

fn apply_bundle(store: &dyn PrefStore, bundle: Vec<PrefWrite>) {
    for write in bundle {
        store.set(write.key, write.value, ChangeOrigin::Ui);
    }
}

pub fn apply_network_profile(store: &dyn PrefStore, profile: NetworkProfile) {
    tracing::debug!(preset = %profile, "applying network preset");
    apply_bundle(store, profile.bundle());
}

pub fn apply_video_profile(store: &dyn PrefStore, profile: VideoProfile) {
    tracing::debug!(preset = %profile, "applying video preset");
    apply_bundle(store, profile.bundle());
}

pub fn apply_controller_response(store: &dyn PrefStore, profile: ControllerResponse) {
    tracing::debug!(preset = %profile, "applying controller preset");
    apply_bundle(store, profile.bundle());
}
