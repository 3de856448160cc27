// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! bolt-xcloud - adaptive stream profiles and request rewriting for xCloud.
//!
//! This crate exposes the runtime used by:
//! - the `bolt-xcloud` CLI (`src/main.rs`)
//! - hosts that embed the profile controller and the interception layer
//!
//! Architecture highlights:
//! - `profile`: telemetry classification, device baselines, the hysteresis
//!   controller and its monitor loop
//! - `prefs`: typed preference keys and the store the bundles are written to
//! - `interceptor`: routing and rewriting of login, play, wait-time,
//!   configuration and ICE exchanges over a pluggable `Transport`
//! - `events`: script and stream event buses shared by both halves
//! - `presets`: one-shot network, video and controller presets
//! - `config`: settings file loading, migration and validation

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod interceptor;
pub mod prefs;
pub mod presets;
pub mod profile;
pub mod telemetry;

pub use error::{BoltError, Result};
