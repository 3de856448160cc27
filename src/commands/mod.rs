// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Subcommand implementations
//!
//! Each command builds a serializable report from pure helpers and prints it
//! as text or JSON.

pub mod apply;
pub mod classify;
pub mod presets;
pub mod regions;
pub mod settings;

use crate::config::Settings;
use crate::error::Result;
use crate::prefs::{MemoryPrefStore, PrefStore};
use crate::profile::PrefWrite;

/// A store holding the preference overrides from `settings`
pub(crate) fn seeded_store(settings: &Settings) -> Result<MemoryPrefStore> {
    let store = MemoryPrefStore::new();
    store.seed(settings.preference_overrides()?);
    Ok(store)
}

/// Read each key of `bundle` back out of `store`
pub(crate) fn read_back(store: &dyn PrefStore, bundle: &[PrefWrite]) -> Vec<PrefWrite> {
    bundle
        .iter()
        .map(|write| PrefWrite {
            key: write.key,
            value: store.get(write.key),
        })
        .collect()
}

/// Render `writes` as aligned `key = value` lines
pub(crate) fn format_writes(writes: &[PrefWrite]) -> String {
    let width = writes
        .iter()
        .map(|write| write.key.as_str().len())
        .max()
        .unwrap_or(0);
    writes
        .iter()
        .map(|write| format!("  {:<width$} = {}", write.key.as_str(), write.value))
        .collect::<Vec<_>>()
        .join("\n")
}
