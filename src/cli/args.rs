// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines the offline tooling around the profile controller and the
//! interception layer.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::presets::{ControllerResponse, NetworkProfile, VideoProfile};
use crate::profile::{DeviceType, PerformanceProfile};

/// bolt-xcloud - adaptive stream profiles and request rewriting for xCloud
#[derive(Parser, Debug)]
#[command(name = "bolt-xcloud")]
#[command(version, about = "Adaptive stream profiles and request rewriting for xCloud")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a telemetry sample into a tier
    Classify(ClassifyArgs),

    /// Show the preference bundle a profile applies
    Apply(ApplyArgs),

    /// Normalize the regions advertised in a login response
    Regions(RegionsArgs),

    /// Show a smart preset bundle
    Presets(PresetsArgs),

    /// Inspect or manage configuration
    #[command(alias = "config")]
    Settings(SettingsArgs),
}

/// Arguments for the classify command
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Read the sample from a JSON file instead of flags
    #[arg(short, long, conflicts_with_all = ["playtime", "fps", "decode_ms", "jitter_ms", "bitrate_mbps"])]
    pub file: Option<PathBuf>,

    /// Seconds since the stream started playing
    #[arg(long, default_value_t = 0.0)]
    pub playtime: f64,

    /// Frames per second
    #[arg(long, default_value_t = 0.0)]
    pub fps: f64,

    /// Decode time in milliseconds
    #[arg(long, default_value_t = 0.0)]
    pub decode_ms: f64,

    /// Jitter in milliseconds
    #[arg(long, default_value_t = 0.0)]
    pub jitter_ms: f64,

    /// Bitrate in Mbps
    #[arg(long, default_value_t = 0.0)]
    pub bitrate_mbps: f64,

    /// Packets received
    #[arg(long, default_value_t = 0)]
    pub received: u64,

    /// Packets dropped
    #[arg(long, default_value_t = 0)]
    pub dropped: u64,

    /// Clamp the suggestion against this device's baseline
    #[arg(long, value_enum)]
    pub device: Option<DeviceArg>,
}

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Profile to resolve (auto, tv, pc, android)
    pub profile: PerformanceProfile,

    /// Device used to resolve `auto` (defaults to the configured device)
    #[arg(long, value_enum)]
    pub device: Option<DeviceArg>,
}

/// Arguments for the regions command
#[derive(Args, Debug)]
pub struct RegionsArgs {
    /// Login response JSON file
    pub file: PathBuf,

    /// Preferred region to pin, as stored in `server.region`
    #[arg(short, long)]
    pub region: Option<String>,
}

/// Arguments for the presets command
#[derive(Args, Debug)]
pub struct PresetsArgs {
    #[command(subcommand)]
    pub command: PresetsCommands,
}

/// Preset families
#[derive(Subcommand, Debug)]
pub enum PresetsCommands {
    /// Resolution and bitrate limits for a network quality
    Network {
        /// auto, low, balanced, high
        #[arg(default_value = "auto")]
        profile: NetworkProfile,
    },

    /// Image processing strength
    Video {
        /// soft, balanced, sharp
        #[arg(default_value = "balanced")]
        profile: VideoProfile,
    },

    /// Controller polling rate
    Controller {
        /// stable, balanced, fast
        #[arg(default_value = "balanced")]
        response: ControllerResponse,
    },
}

/// Arguments for the settings command
#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: Option<SettingsCommands>,
}

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show current configuration
    Show,

    /// Print the settings file path
    Path,

    /// Check the configuration for errors
    Validate,

    /// Reset configuration to defaults
    Reset,
}

/// Device classes selectable on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceArg {
    AndroidTv,
    Webos,
    Android,
    AndroidHandheld,
    Unknown,
}

impl From<DeviceArg> for DeviceType {
    fn from(arg: DeviceArg) -> Self {
        match arg {
            DeviceArg::AndroidTv => DeviceType::AndroidTv,
            DeviceArg::Webos => DeviceType::Webos,
            DeviceArg::Android => DeviceType::Android,
            DeviceArg::AndroidHandheld => DeviceType::AndroidHandheld,
            DeviceArg::Unknown => DeviceType::Unknown,
        }
    }
}

/// Output format for responses
#[derive(ValueEnum, Clone, Debug, Default, PartialEq)]
pub enum OutputFormat {
    /// Plain text
    #[default]
    Text,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    // ==================== CLI Global Arguments ====================

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["bolt-xcloud", "settings"]);
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_cli_verbose_multiple() {
        let cli = Cli::parse_from(["bolt-xcloud", "-vvv", "settings"]);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_global_args_after_subcommand() {
        let cli = Cli::parse_from([
            "bolt-xcloud",
            "settings",
            "show",
            "--format",
            "json",
            "--config",
            "/tmp/bolt.json",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/bolt.json")));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["bolt-xcloud"]).is_err());
    }

    // ==================== Classify ====================

    #[test]
    fn test_classify_flags() {
        let cli = Cli::parse_from([
            "bolt-xcloud",
            "classify",
            "--playtime",
            "60",
            "--fps",
            "40",
            "--bitrate-mbps",
            "12.5",
            "--received",
            "1000",
            "--dropped",
            "3",
            "--device",
            "android-handheld",
        ]);
        if let Commands::Classify(args) = cli.command {
            assert_eq!(args.playtime, 60.0);
            assert_eq!(args.fps, 40.0);
            assert_eq!(args.bitrate_mbps, 12.5);
            assert_eq!(args.received, 1000);
            assert_eq!(args.dropped, 3);
            assert_eq!(args.device, Some(DeviceArg::AndroidHandheld));
            assert!(args.file.is_none());
        } else {
            panic!("Expected Classify command");
        }
    }

    #[test]
    fn test_classify_file_conflicts_with_metrics() {
        let result = Cli::try_parse_from([
            "bolt-xcloud",
            "classify",
            "--file",
            "sample.json",
            "--fps",
            "30",
        ]);
        assert!(result.is_err());
    }

    // ==================== Apply ====================

    #[test]
    fn test_apply_profile() {
        let cli = Cli::parse_from(["bolt-xcloud", "apply", "tv"]);
        if let Commands::Apply(args) = cli.command {
            assert_eq!(args.profile, PerformanceProfile::Tv);
            assert!(args.device.is_none());
        } else {
            panic!("Expected Apply command");
        }
    }

    #[test]
    fn test_apply_legacy_name() {
        let cli = Cli::parse_from(["bolt-xcloud", "apply", "default"]);
        if let Commands::Apply(args) = cli.command {
            assert_eq!(args.profile, PerformanceProfile::Pc);
        } else {
            panic!("Expected Apply command");
        }
    }

    #[test]
    fn test_apply_rejects_unknown_profile() {
        assert!(Cli::try_parse_from(["bolt-xcloud", "apply", "console"]).is_err());
    }

    // ==================== Regions ====================

    #[test]
    fn test_regions_with_preferred() {
        let cli = Cli::parse_from(["bolt-xcloud", "regions", "login.json", "-r", "WESTUS2"]);
        if let Commands::Regions(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("login.json"));
            assert_eq!(args.region.as_deref(), Some("WESTUS2"));
        } else {
            panic!("Expected Regions command");
        }
    }

    // ==================== Presets ====================

    #[test]
    fn test_presets_network() {
        let cli = Cli::parse_from(["bolt-xcloud", "presets", "network", "low"]);
        if let Commands::Presets(args) = cli.command {
            assert!(matches!(
                args.command,
                PresetsCommands::Network {
                    profile: NetworkProfile::Low
                }
            ));
        } else {
            panic!("Expected Presets command");
        }
    }

    #[test]
    fn test_presets_defaults() {
        let cli = Cli::parse_from(["bolt-xcloud", "presets", "controller"]);
        if let Commands::Presets(args) = cli.command {
            assert!(matches!(
                args.command,
                PresetsCommands::Controller {
                    response: ControllerResponse::Balanced
                }
            ));
        } else {
            panic!("Expected Presets command");
        }
    }

    // ==================== Settings ====================

    #[test]
    fn test_settings_alias() {
        let cli = Cli::parse_from(["bolt-xcloud", "config", "path"]);
        if let Commands::Settings(args) = cli.command {
            assert!(matches!(args.command, Some(SettingsCommands::Path)));
        } else {
            panic!("Expected Settings command");
        }
    }

    #[test]
    fn test_settings_no_subcommand() {
        let cli = Cli::parse_from(["bolt-xcloud", "settings"]);
        if let Commands::Settings(args) = cli.command {
            assert!(args.command.is_none());
        } else {
            panic!("Expected Settings command");
        }
    }
}
