// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Normalize the region list of a saved login response

use serde::Serialize;
use serde_json::Value;

use crate::cli::args::{OutputFormat, RegionsArgs};
use crate::config::Settings;
use crate::error::{ApiError, Result};
use crate::interceptor::{normalize_regions, ServerRegion};
use crate::prefs::{GlobalPref, PrefStore};

use super::seeded_store;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegionsReport {
    regions: Vec<ServerRegion>,
    selected: Option<String>,
    /// Set when the preferred region was found and would be pinned
    pinned: Option<String>,
}

/// Execute the regions command
pub fn execute(args: &RegionsArgs, format: &OutputFormat, settings: &Settings) -> Result<()> {
    let content = std::fs::read_to_string(&args.file)?;
    let login: Value = serde_json::from_str(&content)?;

    let preferred = match &args.region {
        Some(region) => region.clone(),
        None => seeded_store(settings)?.get_text(GlobalPref::ServerRegion.into()),
    };

    let report = build_report(&login, &preferred, settings.interceptor.debug)?;

    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", render_text(&report));
    Ok(())
}

fn build_report(login: &Value, preferred: &str, debug: bool) -> Result<RegionsReport> {
    let advertised: Vec<ServerRegion> = match login.pointer("/offeringSettings/regions") {
        Some(regions) => serde_json::from_value(regions.clone())?,
        None => {
            return Err(ApiError::InvalidResponse(
                "login response has no offeringSettings.regions".to_string(),
            )
            .into())
        }
    };

    let normalized = normalize_regions(&advertised, debug);
    let pinned = if preferred == "default" {
        None
    } else {
        normalized.table.get(preferred).map(ServerRegion::key)
    };
    let selected = pinned
        .clone()
        .or_else(|| normalized.selected.as_ref().map(ServerRegion::key));

    Ok(RegionsReport {
        regions: normalized.table.into_vec(),
        selected,
        pinned,
    })
}

fn render_text(report: &RegionsReport) -> String {
    if report.regions.is_empty() {
        return "No regions advertised.".to_string();
    }

    let width = report
        .regions
        .iter()
        .map(|region| region.key().len())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(report.regions.len() + 1);
    for region in &report.regions {
        let key = region.key();
        let marker = if report.selected.as_deref() == Some(key.as_str()) {
            '*'
        } else {
            ' '
        };
        lines.push(format!(
            "{} {:<width$}  {:<10}  {:<14}  {}",
            marker,
            key,
            region
                .continent
                .map(|continent| continent.as_str())
                .unwrap_or("other"),
            region.short_name.as_deref().unwrap_or(""),
            region.base_uri,
        ));
    }
    if let Some(pinned) = &report.pinned {
        lines.push(format!("Pinned preferred region {}", pinned));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoltError;
    use serde_json::json;

    fn login() -> Value {
        json!({
            "offeringSettings": {
                "regions": [
                    {"name": "WestUS2", "baseUri": "https://wus2.core.gssv-play-prod.xboxlive.com", "isDefault": false},
                    {"name": "UnknownRegion", "baseUri": "https://unk.core.gssv-play-prod.xboxlive.com", "isDefault": false},
                    {"name": "EastUS", "baseUri": "https://eus.core.gssv-play-prod.xboxlive.com", "isDefault": true}
                ]
            }
        })
    }

    #[test]
    fn test_report_orders_and_selects() {
        let report = build_report(&login(), "default", false).unwrap();
        let keys: Vec<String> = report.regions.iter().map(ServerRegion::key).collect();
        assert_eq!(keys, vec!["EASTUS", "WESTUS2", "UNKNOWNREGION"]);
        assert_eq!(report.selected.as_deref(), Some("EASTUS"));
        assert!(report.pinned.is_none());
    }

    #[test]
    fn test_preferred_region_is_selected() {
        let report = build_report(&login(), "westus2", false).unwrap();
        assert_eq!(report.pinned.as_deref(), Some("WESTUS2"));
        assert_eq!(report.selected.as_deref(), Some("WESTUS2"));
    }

    #[test]
    fn test_unknown_preferred_region_falls_back() {
        let report = build_report(&login(), "JAPANEAST", false).unwrap();
        assert!(report.pinned.is_none());
        assert_eq!(report.selected.as_deref(), Some("EASTUS"));
    }

    #[test]
    fn test_missing_regions_is_an_error() {
        let result = build_report(&json!({"gsToken": "abc"}), "default", false);
        assert!(matches!(
            result,
            Err(BoltError::Api(ApiError::InvalidResponse(_)))
        ));
    }

    #[test]
    fn test_text_marks_selected_region() {
        let report = build_report(&login(), "default", false).unwrap();
        let text = render_text(&report);
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("* EASTUS"));
        assert!(text.contains("UNKNOWNREGION"));
    }
}
