// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Resolve a performance profile and show the preferences it writes

use serde::Serialize;

use crate::cli::args::{ApplyArgs, OutputFormat};
use crate::config::Settings;
use crate::error::Result;
use crate::prefs::ChangeOrigin;
use crate::profile::{
    apply_profile, profile_bundle, DeviceDescriptor, DeviceType, PerformanceProfile, PrefWrite,
    Tier,
};

use super::{format_writes, read_back, seeded_store};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplyReport {
    profile: PerformanceProfile,
    device: DeviceType,
    tier: Tier,
    description: &'static str,
    writes: Vec<PrefWrite>,
}

/// Execute the apply command
pub fn execute(args: &ApplyArgs, format: &OutputFormat, settings: &Settings) -> Result<()> {
    let device = match args.device {
        Some(device) => DeviceDescriptor::new(device.into()),
        None => settings.device.clone(),
    };

    let report = build_report(args.profile, &device, settings)?;

    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Profile {} resolves to {} - {}",
        report.profile, report.tier, report.description
    );
    println!("{}", format_writes(&report.writes));
    Ok(())
}

fn build_report(
    profile: PerformanceProfile,
    device: &DeviceDescriptor,
    settings: &Settings,
) -> Result<ApplyReport> {
    let store = seeded_store(settings)?;
    let origin = if profile.fixed_tier().is_some() {
        ChangeOrigin::Direct
    } else {
        ChangeOrigin::Ui
    };
    let tier = apply_profile(&store, profile, device, origin);

    Ok(ApplyReport {
        profile,
        device: device.device_type,
        tier,
        description: tier.description(),
        writes: read_back(&store, &profile_bundle(tier)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::{GlobalPref, PrefKey, PrefValue, StreamPref};
    use serde_json::json;

    fn value_of(report: &ApplyReport, key: impl Into<PrefKey>) -> PrefValue {
        let key = key.into();
        report
            .writes
            .iter()
            .find(|write| write.key == key)
            .map(|write| write.value.clone())
            .unwrap()
    }

    #[test]
    fn test_fixed_profile_ignores_device() {
        let device = DeviceDescriptor::new(DeviceType::AndroidTv);
        let report = build_report(PerformanceProfile::Pc, &device, &Settings::default()).unwrap();
        assert_eq!(report.tier, Tier::Pc);
        assert_eq!(value_of(&report, StreamPref::VideoMaxFps), PrefValue::Int(60));
        assert_eq!(report.writes.len(), 12);
    }

    #[test]
    fn test_auto_resolves_to_device_baseline() {
        let device = DeviceDescriptor::new(DeviceType::AndroidHandheld);
        let report =
            build_report(PerformanceProfile::Auto, &device, &Settings::default()).unwrap();
        assert_eq!(report.tier, Tier::Android);
        assert_eq!(value_of(&report, StreamPref::VideoMaxFps), PrefValue::Int(50));
        assert_eq!(
            value_of(&report, GlobalPref::StreamResolution),
            PrefValue::Text("720p".into())
        );
    }

    #[test]
    fn test_bundle_overrides_seeded_preferences() {
        let mut settings = Settings::default();
        settings
            .preferences
            .insert("video.maxFps".to_string(), json!(144));

        let device = DeviceDescriptor::default();
        let report = build_report(PerformanceProfile::Tv, &device, &settings).unwrap();
        assert_eq!(value_of(&report, StreamPref::VideoMaxFps), PrefValue::Int(30));
    }

    #[test]
    fn test_report_serializes_storage_names() {
        let report = build_report(
            PerformanceProfile::Tv,
            &DeviceDescriptor::default(),
            &Settings::default(),
        )
        .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["tier"], "tv");
        assert_eq!(json["writes"][0]["key"], "ui.layout");
    }
}
