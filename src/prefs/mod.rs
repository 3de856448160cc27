// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Preference keys, typed values and the store they live in.

pub mod keys;
pub mod store;
pub mod values;

pub use keys::*;
pub use store::*;
pub use values::*;
