// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use crate::error::{BoltError, Result};
use crate::prefs::{PrefKey, PrefValue};

use super::Settings;

impl Settings {
    /// Reject settings the controller cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.profile.interval_secs == 0 {
            return Err(BoltError::Config(
                "profile.interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.profile.stable_ticks == 0 {
            return Err(BoltError::Config(
                "profile.stable_ticks must be greater than zero".to_string(),
            ));
        }
        if self.interceptor.token_hosts.iter().any(|host| host.trim().is_empty()) {
            return Err(BoltError::Config(
                "interceptor.token_hosts must not contain empty hosts".to_string(),
            ));
        }
        self.preference_overrides().map(|_| ())
    }

    /// Typed initial values for the preference store.
    pub fn preference_overrides(&self) -> Result<Vec<(PrefKey, PrefValue)>> {
        self.preferences
            .iter()
            .map(|(name, raw)| {
                let key: PrefKey = name.parse()?;
                let value = PrefValue::from_json(raw).ok_or_else(|| {
                    BoltError::Config(format!("preference {} has unsupported value {}", name, raw))
                })?;
                Ok((key, value))
            })
            .collect()
    }
}
