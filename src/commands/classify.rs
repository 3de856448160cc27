// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Classify a single telemetry sample

use serde::Serialize;
use std::path::Path;

use crate::cli::args::{ClassifyArgs, OutputFormat};
use crate::error::Result;
use crate::profile::{classify, clamp, DeviceDescriptor, Tier, WARMUP_SECONDS};
use crate::telemetry::TelemetrySample;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassifyReport {
    sample: TelemetrySample,
    packet_loss: f64,
    warming_up: bool,
    suggestion: Option<Tier>,
    baseline: Option<Tier>,
    tier: Option<Tier>,
}

/// Execute the classify command
pub fn execute(args: &ClassifyArgs, format: &OutputFormat) -> Result<()> {
    let sample = match &args.file {
        Some(path) => read_sample(path)?,
        None => sample_from_args(args),
    };
    let device = args
        .device
        .map(|device| DeviceDescriptor::new(device.into()));

    let report = build_report(sample, device.as_ref());

    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", render_text(&report));
    Ok(())
}

fn read_sample(path: &Path) -> Result<TelemetrySample> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn sample_from_args(args: &ClassifyArgs) -> TelemetrySample {
    TelemetrySample {
        playtime_seconds: args.playtime,
        fps: args.fps,
        decode_time_ms: args.decode_ms,
        jitter_ms: args.jitter_ms,
        bitrate_mbps: args.bitrate_mbps,
        packets_received: args.received,
        packets_dropped: args.dropped,
    }
}

fn build_report(sample: TelemetrySample, device: Option<&DeviceDescriptor>) -> ClassifyReport {
    let suggestion = classify(&sample);
    let baseline = device.map(DeviceDescriptor::baseline);
    let tier = match (baseline, suggestion) {
        (Some(baseline), Some(target)) => Some(clamp(baseline, target)),
        (None, target) => target,
        (Some(_), None) => None,
    };

    ClassifyReport {
        sample,
        packet_loss: sample.packet_loss_ratio(),
        warming_up: sample.playtime_seconds < WARMUP_SECONDS,
        suggestion,
        baseline,
        tier,
    }
}

fn render_text(report: &ClassifyReport) -> String {
    let mut lines = Vec::new();
    match report.suggestion {
        Some(tier) => lines.push(format!("Suggested tier: {} - {}", tier, tier.description())),
        None if report.warming_up => lines.push(format!(
            "No suggestion: stream is warming up ({:.0}s of {:.0}s)",
            report.sample.playtime_seconds, WARMUP_SECONDS
        )),
        None => lines.push("No suggestion: sample carries no signal".to_string()),
    }
    if let Some(baseline) = report.baseline {
        lines.push(format!("Device baseline: {}", baseline));
        if let Some(tier) = report.tier {
            lines.push(format!("Effective tier:  {}", tier));
        }
    }
    lines.push(format!("Packet loss: {:.2}%", report.packet_loss * 100.0));
    lines.join("\n")
}
