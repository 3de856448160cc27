// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Adaptive performance profiles
//!
//! Telemetry is classified into a tier, clamped to what the device can
//! sustain and debounced by the controller before the tier's preference
//! bundle is written.

pub mod apply;
pub mod classifier;
pub mod clock;
pub mod controller;
pub mod device;
pub mod monitor;
pub mod tier;

pub use apply::*;
pub use classifier::*;
pub use clock::*;
pub use controller::*;
pub use device::*;
pub use monitor::*;
pub use tier::*;
