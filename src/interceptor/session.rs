// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Stream session context shared between handlers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::regions::{RegionTable, ServerRegion};

/// Title being launched, as reported by the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleInfo {
    pub product_id: String,
    #[serde(default)]
    pub has_touch_support: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub title_info: Option<TitleInfo>,
    pub selected_region: Option<ServerRegion>,
    /// Streaming token from the last login, reused for remote play
    pub gs_token: Option<String>,
    pub server_regions: RegionTable,
    pub badge_region: Option<String>,
    pub touch_enabled: bool,
    pub logged_in_at: Option<DateTime<Utc>>,
}

/// Cloneable handle to the process-wide session context
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<RwLock<SessionContext>>,
}

impl SharedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, SessionContext> {
        match self.inner.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("Session lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, SessionContext> {
        match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("Session lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    pub fn snapshot(&self) -> SessionContext {
        self.read().clone()
    }

    /// Record the title the next stream will launch
    pub fn set_title(&self, title: Option<TitleInfo>) {
        self.write().title_info = title;
    }
}
