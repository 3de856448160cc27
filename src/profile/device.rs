// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Device baseline resolution
//!
//! The baseline is the best tier a device can sustain. Telemetry may push a
//! stream below it but never above it.

use serde::{Deserialize, Serialize};

use super::tier::Tier;

/// Host device class as reported by the client shell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceType {
    AndroidTv,
    Webos,
    Android,
    AndroidHandheld,
    #[default]
    Unknown,
}

/// Static description of the hosting device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// Device class
    #[serde(default)]
    pub device_type: DeviceType,
    /// Whether the user agent identifies a TV
    #[serde(default)]
    pub is_tv: bool,
}

impl DeviceDescriptor {
    pub fn new(device_type: DeviceType) -> Self {
        Self {
            device_type,
            is_tv: false,
        }
    }

    /// Build a descriptor from a browser user agent string
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();

        let device_type = if ua.contains("web0s") || ua.contains("webos") {
            DeviceType::Webos
        } else if ua.contains("android") && (ua.contains(" tv") || ua.contains("aft")) {
            DeviceType::AndroidTv
        } else if ua.contains("android") && ua.contains("mobile") {
            DeviceType::AndroidHandheld
        } else if ua.contains("android") {
            DeviceType::Android
        } else {
            DeviceType::Unknown
        };

        let is_tv = ["smart-tv", "smarttv", "tizen", "hbbtv", "crkey"]
            .iter()
            .any(|marker| ua.contains(marker));

        Self { device_type, is_tv }
    }

    /// Best tier this device can sustain
    pub fn baseline(&self) -> Tier {
        match self.device_type {
            DeviceType::AndroidTv | DeviceType::Webos => Tier::Tv,
            _ if self.is_tv => Tier::Tv,
            DeviceType::Android | DeviceType::AndroidHandheld => Tier::Android,
            DeviceType::Unknown => Tier::Pc,
        }
    }
}
