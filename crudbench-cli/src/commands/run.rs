// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `crudbench run` command - Benchmark every configured endpoint.

use std::path::Path;

use crudbench_cli::{BenchmarkDriver, LogHandle};
use crudbench_core::{BenchmarkReport, Config, JsonReporter};

pub async fn execute(
    config: &Config,
    report_dir: Option<&Path>,
    log: &LogHandle,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = log.path() {
        tracing::info!("Logging to: {}", path.display());
    }

    tracing::info!("Starting API Benchmark...");
    tracing::info!("{}", "=".repeat(50));
    tracing::debug!(
        endpoints = config.endpoints.len(),
        requests = config.benchmark.requests,
        "Configuration loaded"
    );

    let driver = BenchmarkDriver::new(config)?;
    let results = driver.run(&config.endpoints).await;

    if let Some(dir) = report_dir {
        let reporter = JsonReporter::new(dir)?;
        let mut report = BenchmarkReport::new(driver.requests());
        for result in results {
            report.add_result(result);
        }
        let path = reporter.save(&report)?;
        tracing::info!("Report saved to: {}", path.display());
    }

    tracing::info!("Benchmark completed!");
    if let Some(path) = log.path() {
        tracing::info!("Full log saved to: {}", path.display());
    }

    Ok(())
}
