// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for bolt-xcloud
//!
//! Handles loading and saving settings from ~/.bolt/settings.json

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::profile::DeviceDescriptor;

mod io;
mod migration;
mod validation;

/// Main settings structure, stored in ~/.bolt/settings.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Adaptive profile controller tuning
    #[serde(default)]
    pub profile: ProfileConfig,

    /// Description of the hosting device
    #[serde(default)]
    pub device: DeviceDescriptor,

    /// Request interception settings
    #[serde(default)]
    pub interceptor: InterceptorConfig,

    /// Initial preference values, keyed by storage name
    /// (e.g. `"server.region": "WESTUS2"`)
    #[serde(default)]
    pub preferences: BTreeMap<String, Value>,
}

/// Timing of the adaptive profile controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Seconds between controller ticks
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Consecutive agreeing ticks required before switching
    #[serde(default = "default_stable_ticks")]
    pub stable_ticks: u32,

    /// Minimum seconds between two automatic switches
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            stable_ticks: default_stable_ticks(),
            cooldown_secs: default_cooldown_secs(),
        }
    }
}

impl ProfileConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

fn default_interval_secs() -> u64 {
    15
}

fn default_stable_ticks() -> u32 {
    3
}

fn default_cooldown_secs() -> u64 {
    90
}

/// Request interception configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptorConfig {
    /// Warn about regions missing from the known-region table
    #[serde(default)]
    pub debug: bool,

    /// Hosts whose `/waittime/` endpoints report queue estimates
    #[serde(default = "default_token_hosts")]
    pub token_hosts: Vec<String>,

    /// Product IDs that always get native mouse and keyboard
    #[serde(default)]
    pub force_native_mkb_titles: Vec<String>,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            debug: false,
            token_hosts: default_token_hosts(),
            force_native_mkb_titles: Vec::new(),
        }
    }
}

fn default_token_hosts() -> Vec<String> {
    vec!["xboxlive.com".to_string()]
}
