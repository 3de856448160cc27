// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Tier application
//!
//! A tier maps to a fixed, ordered batch of preference writes. Global keys
//! are written first, then stream keys. The origin is attached to every write
//! but never changes the values.

use serde::Serialize;

use super::device::DeviceDescriptor;
use super::tier::{PerformanceProfile, Tier};
use crate::prefs::{
    ChangeOrigin, GlobalPref, PrefKey, PrefStore, PrefValue, StreamPref, StreamResolution,
    UiLayout, VideoPowerPreference, VideoProcessing, VideoProcessingMode,
};

/// A single preference write in a bundle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefWrite {
    pub key: PrefKey,
    pub value: PrefValue,
}

impl PrefWrite {
    pub fn new(key: impl Into<PrefKey>, value: impl Into<PrefValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The complete, ordered bundle for `tier`
pub fn profile_bundle(tier: Tier) -> Vec<PrefWrite> {
    let (layout, reduce, quality, resolution, bitrate, combine, skip_splash) = match tier {
        Tier::Tv => (UiLayout::Tv, true, 50, StreamResolution::Dim720p, 3_072_000, true, true),
        Tier::Android => (
            UiLayout::Default,
            true,
            70,
            StreamResolution::Dim720p,
            5_120_000,
            true,
            true,
        ),
        Tier::Pc => (UiLayout::Default, false, 90, StreamResolution::Auto, 0, false, false),
    };

    let (max_fps, power, mode, sharpness) = match tier {
        Tier::Tv => (30, VideoPowerPreference::LowPower, VideoProcessingMode::Performance, 0),
        Tier::Android => (50, VideoPowerPreference::LowPower, VideoProcessingMode::Performance, 0),
        Tier::Pc => (
            60,
            VideoPowerPreference::HighPerformance,
            VideoProcessingMode::Quality,
            2,
        ),
    };

    vec![
        PrefWrite::new(GlobalPref::UiLayout, layout),
        PrefWrite::new(GlobalPref::UiReduceAnimations, reduce),
        PrefWrite::new(GlobalPref::UiImageQuality, PrefValue::Int(quality)),
        PrefWrite::new(GlobalPref::StreamResolution, resolution),
        PrefWrite::new(GlobalPref::StreamMaxVideoBitrate, PrefValue::Int(bitrate)),
        PrefWrite::new(GlobalPref::StreamCombineSources, combine),
        PrefWrite::new(GlobalPref::UiSkipSplashVideo, skip_splash),
        PrefWrite::new(StreamPref::VideoMaxFps, PrefValue::Int(max_fps)),
        PrefWrite::new(StreamPref::VideoPowerPreference, power),
        PrefWrite::new(StreamPref::VideoProcessing, VideoProcessing::Usm),
        PrefWrite::new(StreamPref::VideoProcessingMode, mode),
        PrefWrite::new(StreamPref::VideoSharpness, PrefValue::Int(sharpness)),
    ]
}

/// Write the full bundle for `tier`
pub fn apply_tier(store: &dyn PrefStore, tier: Tier, origin: ChangeOrigin) {
    tracing::debug!(tier = %tier, ?origin, "applying tier bundle");
    for write in profile_bundle(tier) {
        store.set(write.key, write.value, origin);
    }
}

/// Resolve `profile` against the device and apply it. Returns the tier
/// actually written.
pub fn apply_profile(
    store: &dyn PrefStore,
    profile: PerformanceProfile,
    device: &DeviceDescriptor,
    origin: ChangeOrigin,
) -> Tier {
    let tier = profile.fixed_tier().unwrap_or_else(|| device.baseline());
    apply_tier(store, tier, origin);
    tier
}
