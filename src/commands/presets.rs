// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Show what a smart preset writes

use serde::Serialize;

use crate::cli::args::{OutputFormat, PresetsArgs, PresetsCommands};
use crate::config::Settings;
use crate::error::Result;
use crate::presets::{apply_controller_response, apply_network_profile, apply_video_profile};
use crate::profile::PrefWrite;

use super::{format_writes, read_back, seeded_store};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PresetReport {
    family: &'static str,
    preset: String,
    writes: Vec<PrefWrite>,
}

/// Execute the presets command
pub fn execute(args: &PresetsArgs, format: &OutputFormat, settings: &Settings) -> Result<()> {
    let report = build_report(&args.command, settings)?;

    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} preset {}:", report.family, report.preset);
    println!("{}", format_writes(&report.writes));
    Ok(())
}

fn build_report(command: &PresetsCommands, settings: &Settings) -> Result<PresetReport> {
    let store = seeded_store(settings)?;

    let (family, preset, bundle) = match *command {
        PresetsCommands::Network { profile } => {
            apply_network_profile(&store, profile);
            ("network", profile.to_string(), profile.bundle())
        }
        PresetsCommands::Video { profile } => {
            apply_video_profile(&store, profile);
            ("video", profile.to_string(), profile.bundle())
        }
        PresetsCommands::Controller { response } => {
            apply_controller_response(&store, response);
            ("controller", response.to_string(), response.bundle())
        }
    };

    Ok(PresetReport {
        family,
        preset,
        writes: read_back(&store, &bundle),
    })
}
