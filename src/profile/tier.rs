// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Performance tiers and the clamp rule between device and telemetry

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::BoltError;

/// Concrete quality tier, ordered from most conservative to least
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// TV-class devices and badly degraded streams
    Tv,
    /// Handhelds and moderately degraded streams
    Android,
    /// Desktops on healthy streams
    Pc,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Tv, Tier::Android, Tier::Pc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Tv => "tv",
            Tier::Android => "android",
            Tier::Pc => "pc",
        }
    }

    /// Get a human-readable description of this tier
    pub fn description(&self) -> &'static str {
        match self {
            Tier::Tv => "TV (720p, 30 fps, low power)",
            Tier::Android => "Handheld (720p, 50 fps, low power)",
            Tier::Pc => "Desktop (auto resolution, 60 fps, high performance)",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing profile mode; `Auto` hands the choice to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceProfile {
    Auto,
    Tv,
    Pc,
    Android,
}

impl PerformanceProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceProfile::Auto => "auto",
            PerformanceProfile::Tv => "tv",
            PerformanceProfile::Pc => "pc",
            PerformanceProfile::Android => "android",
        }
    }

    /// The concrete tier this mode pins, or `None` for `Auto`
    pub fn fixed_tier(&self) -> Option<Tier> {
        match self {
            PerformanceProfile::Auto => None,
            PerformanceProfile::Tv => Some(Tier::Tv),
            PerformanceProfile::Pc => Some(Tier::Pc),
            PerformanceProfile::Android => Some(Tier::Android),
        }
    }
}

impl From<Tier> for PerformanceProfile {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Tv => PerformanceProfile::Tv,
            Tier::Android => PerformanceProfile::Android,
            Tier::Pc => PerformanceProfile::Pc,
        }
    }
}

impl std::fmt::Display for PerformanceProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PerformanceProfile {
    type Err = BoltError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(PerformanceProfile::Auto),
            "tv" => Ok(PerformanceProfile::Tv),
            "pc" | "default" => Ok(PerformanceProfile::Pc),
            "android" => Ok(PerformanceProfile::Android),
            other => Err(BoltError::InvalidInput(format!(
                "unknown performance profile: {}",
                other
            ))),
        }
    }
}

/// Combine the device baseline with a telemetry suggestion.
///
/// Telemetry can demote a device but never promote it past its baseline.
pub fn clamp(baseline: Tier, target: Tier) -> Tier {
    match (baseline, target) {
        (Tier::Tv, _) => Tier::Tv,
        (Tier::Android, Tier::Pc) => Tier::Android,
        _ => target,
    }
}
