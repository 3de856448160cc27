// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Preference store abstraction and the default in-memory implementation

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use super::keys::{GlobalPref, PrefKey, StreamPref};
use super::values::PrefValue;
use crate::events::{EventBus, ScriptEvent};

/// Who caused a preference write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOrigin {
    /// Edited directly by the user
    Direct,
    /// Applied from a UI action such as choosing a profile
    Ui,
    /// Written by the adaptive profile controller
    Auto,
}

/// Process-wide preference storage
pub trait PrefStore: Send + Sync {
    /// Current value for a key (falls back to the key's default)
    fn get(&self, key: PrefKey) -> PrefValue;

    /// Write a value, attributing it to `origin`
    fn set(&self, key: PrefKey, value: PrefValue, origin: ChangeOrigin);

    fn get_bool(&self, key: PrefKey) -> bool {
        self.get(key).as_bool().unwrap_or(false)
    }

    fn get_int(&self, key: PrefKey) -> i64 {
        self.get(key).as_int().unwrap_or(0)
    }

    fn get_text(&self, key: PrefKey) -> String {
        match self.get(key) {
            PrefValue::Text(value) => value,
            other => other.to_string(),
        }
    }
}

/// Default value for every key in the namespace
pub fn default_value(key: PrefKey) -> PrefValue {
    match key {
        PrefKey::Global(key) => match key {
            GlobalPref::PerformanceProfile => "auto".into(),
            GlobalPref::UiLayout => "default".into(),
            GlobalPref::UiReduceAnimations => false.into(),
            GlobalPref::UiImageQuality => PrefValue::Int(90),
            GlobalPref::UiSkipSplashVideo => false.into(),
            GlobalPref::StreamResolution => "auto".into(),
            GlobalPref::StreamMaxVideoBitrate => PrefValue::Int(0),
            GlobalPref::StreamCombineSources => false.into(),
            GlobalPref::StreamPreventResolutionDrops => false.into(),
            GlobalPref::StreamPreferredLocale => "default".into(),
            GlobalPref::ServerRegion => "default".into(),
            GlobalPref::ServerBypassRestriction => "off".into(),
            GlobalPref::LoadingScreenShowWaitTime => true.into(),
            GlobalPref::TouchControllerMode => "default".into(),
            GlobalPref::NativeMkbMode => "default".into(),
            GlobalPref::AudioMicOnPlaying => false.into(),
        },
        PrefKey::Stream(key) => match key {
            StreamPref::VideoMaxFps => PrefValue::Int(60),
            StreamPref::VideoPowerPreference => "default".into(),
            StreamPref::VideoProcessing => "usm".into(),
            StreamPref::VideoProcessingMode => "performance".into(),
            StreamPref::VideoSharpness => PrefValue::Int(0),
            StreamPref::ControllerPollingRate => PrefValue::Int(4),
        },
    }
}

#[derive(Debug, Clone)]
struct PrefEntry {
    value: PrefValue,
    origin: Option<ChangeOrigin>,
}

/// In-memory store that announces every write on the script bus
#[derive(Default)]
pub struct MemoryPrefStore {
    entries: RwLock<HashMap<PrefKey, PrefEntry>>,
    events: Option<EventBus>,
}

impl MemoryPrefStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that publishes `setting.changed` on `events`
    pub fn with_events(events: EventBus) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            events: Some(events),
        }
    }

    /// Load initial values without announcing them.
    pub fn seed(&self, values: impl IntoIterator<Item = (PrefKey, PrefValue)>) {
        let mut entries = self.write_entries();
        for (key, value) in values {
            entries.insert(key, PrefEntry { value, origin: None });
        }
    }

    /// Origin of the most recent write to `key`, if any.
    pub fn last_origin(&self, key: PrefKey) -> Option<ChangeOrigin> {
        let entries = match self.entries.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("Preference lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        entries.get(&key).and_then(|entry| entry.origin)
    }

    /// Every key with its effective value, keyed by storage name
    pub fn snapshot(&self) -> BTreeMap<String, PrefValue> {
        PrefKey::all()
            .map(|key| (key.as_str().to_string(), self.get(key)))
            .collect()
    }

    fn write_entries(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<PrefKey, PrefEntry>> {
        match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("Preference lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}

impl PrefStore for MemoryPrefStore {
    fn get(&self, key: PrefKey) -> PrefValue {
        let entries = match self.entries.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("Preference lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        entries
            .get(&key)
            .map(|entry| entry.value.clone())
            .unwrap_or_else(|| default_value(key))
    }

    fn set(&self, key: PrefKey, value: PrefValue, origin: ChangeOrigin) {
        tracing::debug!(key = %key, value = %value, ?origin, "preference updated");
        self.write_entries().insert(
            key,
            PrefEntry {
                value,
                origin: Some(origin),
            },
        );

        if let Some(events) = &self.events {
            events.emit_script(ScriptEvent::SettingChanged {
                setting_key: key,
                origin,
            });
        }
    }
}
