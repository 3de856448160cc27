// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Typed preference values

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BoltError;

/// A stored preference value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl PrefValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PrefValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PrefValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Convert a raw JSON value from a settings file.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(PrefValue::Bool(*b)),
            serde_json::Value::Number(n) => n.as_i64().map(PrefValue::Int),
            serde_json::Value::String(s) => Some(PrefValue::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefValue::Bool(value) => write!(f, "{}", value),
            PrefValue::Int(value) => write!(f, "{}", value),
            PrefValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<bool> for PrefValue {
    fn from(value: bool) -> Self {
        PrefValue::Bool(value)
    }
}

impl From<i64> for PrefValue {
    fn from(value: i64) -> Self {
        PrefValue::Int(value)
    }
}

impl From<&str> for PrefValue {
    fn from(value: &str) -> Self {
        PrefValue::Text(value.to_string())
    }
}

impl From<String> for PrefValue {
    fn from(value: String) -> Self {
        PrefValue::Text(value)
    }
}

/// Implements `as_str`, `Display`, `FromStr` and `Into<PrefValue>` for a
/// string-valued preference enum.
macro_rules! text_pref {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = BoltError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(BoltError::Preference(format!(
                        "invalid {} value: {}",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }

        impl From<$name> for PrefValue {
            fn from(value: $name) -> Self {
                PrefValue::Text(value.as_str().to_string())
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiLayout {
    Default,
    Normal,
    Tv,
}

text_pref!(UiLayout {
    Default => "default",
    Normal => "normal",
    Tv => "tv",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamResolution {
    Auto,
    Dim720p,
    Dim1080p,
    Dim1080pHq,
}

text_pref!(StreamResolution {
    Auto => "auto",
    Dim720p => "720p",
    Dim1080p => "1080p",
    Dim1080pHq => "1080p-hq",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoPowerPreference {
    Default,
    LowPower,
    HighPerformance,
}

text_pref!(VideoPowerPreference {
    Default => "default",
    LowPower => "low-power",
    HighPerformance => "high-performance",
});

/// Sharpening filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoProcessing {
    Usm,
    Cas,
}

text_pref!(VideoProcessing {
    Usm => "usm",
    Cas => "cas",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoProcessingMode {
    Quality,
    Performance,
}

text_pref!(VideoProcessingMode {
    Quality => "quality",
    Performance => "performance",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeMkbMode {
    Default,
    On,
    Off,
}

text_pref!(NativeMkbMode {
    Default => "default",
    On => "on",
    Off => "off",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchControllerMode {
    Default,
    All,
    Off,
}

text_pref!(TouchControllerMode {
    Default => "default",
    All => "all",
    Off => "off",
});
