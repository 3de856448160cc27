// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Preference key namespace
//!
//! Keys are split into a global scope (persist across sessions) and a stream
//! scope (apply to the current negotiation only). The string names are the
//! storage format shared with existing user configurations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BoltError;

/// Preferences that persist across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GlobalPref {
    #[serde(rename = "performance.profile")]
    PerformanceProfile,
    #[serde(rename = "ui.layout")]
    UiLayout,
    #[serde(rename = "ui.reduceAnimations")]
    UiReduceAnimations,
    #[serde(rename = "ui.imageQuality")]
    UiImageQuality,
    #[serde(rename = "ui.splashVideo.skip")]
    UiSkipSplashVideo,
    #[serde(rename = "stream.video.resolution")]
    StreamResolution,
    #[serde(rename = "stream.video.maxBitrate")]
    StreamMaxVideoBitrate,
    #[serde(rename = "stream.video.combineAudioVideo")]
    StreamCombineSources,
    #[serde(rename = "stream.video.preventResolutionDrops")]
    StreamPreventResolutionDrops,
    #[serde(rename = "stream.locale")]
    StreamPreferredLocale,
    #[serde(rename = "server.region")]
    ServerRegion,
    #[serde(rename = "server.bypassRestriction")]
    ServerBypassRestriction,
    #[serde(rename = "loadingScreen.waitTime.show")]
    LoadingScreenShowWaitTime,
    #[serde(rename = "touchController.mode")]
    TouchControllerMode,
    #[serde(rename = "nativeMkb.mode")]
    NativeMkbMode,
    #[serde(rename = "audio.mic.onPlaying")]
    AudioMicOnPlaying,
}

/// Preferences scoped to the active stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StreamPref {
    #[serde(rename = "video.maxFps")]
    VideoMaxFps,
    #[serde(rename = "video.player.powerPreference")]
    VideoPowerPreference,
    #[serde(rename = "video.processing")]
    VideoProcessing,
    #[serde(rename = "video.processing.mode")]
    VideoProcessingMode,
    #[serde(rename = "video.processing.sharpness")]
    VideoSharpness,
    #[serde(rename = "controller.pollingRate")]
    ControllerPollingRate,
}

impl GlobalPref {
    pub const ALL: [GlobalPref; 16] = [
        GlobalPref::PerformanceProfile,
        GlobalPref::UiLayout,
        GlobalPref::UiReduceAnimations,
        GlobalPref::UiImageQuality,
        GlobalPref::UiSkipSplashVideo,
        GlobalPref::StreamResolution,
        GlobalPref::StreamMaxVideoBitrate,
        GlobalPref::StreamCombineSources,
        GlobalPref::StreamPreventResolutionDrops,
        GlobalPref::StreamPreferredLocale,
        GlobalPref::ServerRegion,
        GlobalPref::ServerBypassRestriction,
        GlobalPref::LoadingScreenShowWaitTime,
        GlobalPref::TouchControllerMode,
        GlobalPref::NativeMkbMode,
        GlobalPref::AudioMicOnPlaying,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GlobalPref::PerformanceProfile => "performance.profile",
            GlobalPref::UiLayout => "ui.layout",
            GlobalPref::UiReduceAnimations => "ui.reduceAnimations",
            GlobalPref::UiImageQuality => "ui.imageQuality",
            GlobalPref::UiSkipSplashVideo => "ui.splashVideo.skip",
            GlobalPref::StreamResolution => "stream.video.resolution",
            GlobalPref::StreamMaxVideoBitrate => "stream.video.maxBitrate",
            GlobalPref::StreamCombineSources => "stream.video.combineAudioVideo",
            GlobalPref::StreamPreventResolutionDrops => "stream.video.preventResolutionDrops",
            GlobalPref::StreamPreferredLocale => "stream.locale",
            GlobalPref::ServerRegion => "server.region",
            GlobalPref::ServerBypassRestriction => "server.bypassRestriction",
            GlobalPref::LoadingScreenShowWaitTime => "loadingScreen.waitTime.show",
            GlobalPref::TouchControllerMode => "touchController.mode",
            GlobalPref::NativeMkbMode => "nativeMkb.mode",
            GlobalPref::AudioMicOnPlaying => "audio.mic.onPlaying",
        }
    }
}

impl StreamPref {
    pub const ALL: [StreamPref; 6] = [
        StreamPref::VideoMaxFps,
        StreamPref::VideoPowerPreference,
        StreamPref::VideoProcessing,
        StreamPref::VideoProcessingMode,
        StreamPref::VideoSharpness,
        StreamPref::ControllerPollingRate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StreamPref::VideoMaxFps => "video.maxFps",
            StreamPref::VideoPowerPreference => "video.player.powerPreference",
            StreamPref::VideoProcessing => "video.processing",
            StreamPref::VideoProcessingMode => "video.processing.mode",
            StreamPref::VideoSharpness => "video.processing.sharpness",
            StreamPref::ControllerPollingRate => "controller.pollingRate",
        }
    }
}

/// A key in either preference scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefKey {
    Global(GlobalPref),
    Stream(StreamPref),
}

impl PrefKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefKey::Global(key) => key.as_str(),
            PrefKey::Stream(key) => key.as_str(),
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, PrefKey::Global(_))
    }

    /// Every key in the namespace, globals first.
    pub fn all() -> impl Iterator<Item = PrefKey> {
        GlobalPref::ALL
            .into_iter()
            .map(PrefKey::Global)
            .chain(StreamPref::ALL.into_iter().map(PrefKey::Stream))
    }
}

impl From<GlobalPref> for PrefKey {
    fn from(key: GlobalPref) -> Self {
        PrefKey::Global(key)
    }
}

impl From<StreamPref> for PrefKey {
    fn from(key: StreamPref) -> Self {
        PrefKey::Stream(key)
    }
}

impl fmt::Display for PrefKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrefKey {
    type Err = BoltError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrefKey::all()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| BoltError::Preference(format!("unknown preference key: {}", s)))
    }
}
