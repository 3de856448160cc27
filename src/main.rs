// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! bolt-xcloud - adaptive stream profiles and request rewriting for xCloud
//!
//! Entry point for the bolt-xcloud CLI.

use anyhow::{Context, Result};
use clap::Parser;

use bolt_xcloud::cli::{Cli, Commands};
use bolt_xcloud::commands;
use bolt_xcloud::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` turns on crate diagnostics; `RUST_LOG` still takes precedence.
    if cli.verbose > 0 {
        let directive = if cli.verbose > 1 {
            "bolt_xcloud=trace"
        } else {
            "bolt_xcloud=debug"
        };
        if let Ok(parsed) = directive.parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Load settings
    let settings_path = cli.config.clone().unwrap_or_else(Settings::default_path);
    let settings = Settings::load_from(&settings_path)
        .with_context(|| format!("failed to load settings from {}", settings_path.display()))?;

    // Dispatch to appropriate command
    match &cli.command {
        Commands::Classify(args) => {
            commands::classify::execute(args, &cli.format)?;
        }
        Commands::Apply(args) => {
            settings.validate().context("invalid settings")?;
            commands::apply::execute(args, &cli.format, &settings)?;
        }
        Commands::Regions(args) => {
            settings.validate().context("invalid settings")?;
            commands::regions::execute(args, &cli.format, &settings)
                .with_context(|| format!("failed to read regions from {}", args.file.display()))?;
        }
        Commands::Presets(args) => {
            settings.validate().context("invalid settings")?;
            commands::presets::execute(args, &cli.format, &settings)?;
        }
        Commands::Settings(args) => {
            commands::settings::execute(args, &cli.format, &settings, &settings_path)?;
        }
    }

    Ok(())
}
