// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings inspection and reset

use serde::Serialize;
use std::path::Path;

use crate::cli::args::{OutputFormat, SettingsArgs, SettingsCommands};
use crate::config::Settings;
use crate::error::Result;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PathInfo<'a> {
    path: &'a Path,
    exists: bool,
}

/// Execute the settings command against the file at `path`
pub fn execute(
    args: &SettingsArgs,
    format: &OutputFormat,
    settings: &Settings,
    path: &Path,
) -> Result<()> {
    match args.command {
        None | Some(SettingsCommands::Show) => {
            println!("{}", serde_json::to_string_pretty(settings)?);
        }
        Some(SettingsCommands::Path) => {
            if matches!(format, OutputFormat::Json) {
                let info = PathInfo {
                    path,
                    exists: path.exists(),
                };
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{}", path.display());
            }
        }
        Some(SettingsCommands::Validate) => {
            settings.validate()?;
            println!("Settings are valid.");
        }
        Some(SettingsCommands::Reset) => {
            reset(path)?;
            println!("Settings reset to defaults.");
        }
    }
    Ok(())
}

/// Overwrite `path` with default settings
fn reset(path: &Path) -> Result<()> {
    tracing::debug!(path = %path.display(), "resetting settings");
    Settings::default().save_to_clean(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoltError;
    use tempfile::TempDir;

    #[test]
    fn test_reset_discards_custom_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"profile": {"interval_secs": 5}, "custom": {"keep": false}}"#,
        )
        .unwrap();

        reset(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.get("custom").is_none());
        assert_eq!(Settings::load_from(&path).unwrap().profile.interval_secs, 15);
    }

    #[test]
    fn test_validate_reports_errors() {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.profile.stable_ticks = 0;
        let args = SettingsArgs {
            command: Some(SettingsCommands::Validate),
        };

        let result = execute(
            &args,
            &OutputFormat::Text,
            &settings,
            &dir.path().join("settings.json"),
        );
        assert!(matches!(result, Err(BoltError::Config(_))));
    }

    #[test]
    fn test_path_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let args = SettingsArgs {
            command: Some(SettingsCommands::Path),
        };

        execute(&args, &OutputFormat::Json, &Settings::default(), &path).unwrap();
        assert!(!path.exists());
    }
}
