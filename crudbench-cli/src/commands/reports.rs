// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `crudbench reports` command - Summarize saved JSON reports.

use std::path::Path;

use crudbench_core::JsonReporter;

pub async fn execute(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !dir.is_dir() {
        println!("No reports in {}", dir.display());
        return Ok(());
    }

    let reporter = JsonReporter::new(dir)?;
    let paths = reporter.list_reports()?;

    if paths.is_empty() {
        println!("No reports in {}", dir.display());
        return Ok(());
    }

    for path in &paths {
        let report = match JsonReporter::load(path) {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(path = %path.display(), "Skipping unreadable report: {}", e);
                continue;
            }
        };

        println!(
            "{} ({}, {} requests per phase)",
            report.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            report.run_id,
            report.requests
        );
        for result in &report.results {
            println!(
                "  {:<16} {:>6}/{:<6} RPS {:>9.2}  failed: {}",
                result.endpoint.as_str(),
                result.success_count,
                result.total_requests,
                result.requests_per_second,
                result.failure_breakdown()
            );
        }
        println!();
    }

    println!("Total: {} report(s)", paths.len());
    Ok(())
}
