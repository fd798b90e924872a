// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `crudbench check` command - Verify endpoints are up before a run.

use crudbench_cli::check::probe_all;
use crudbench_cli::HttpTransport;
use crudbench_core::Config;

pub async fn execute(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(endpoints = config.endpoints.len(), "Checking endpoints");

    let transport = HttpTransport::new(&config.transport)?;
    let outcomes = probe_all(&transport, &config.endpoints).await;

    let mut unreachable = 0;
    for (endpoint, (name, outcome)) in config.endpoints.iter().zip(&outcomes) {
        let marker = if outcome.is_reachable() { "✓" } else { "✗" };
        println!(
            "{} {} at {}: {}",
            marker,
            name.banner(),
            endpoint.collection_url(),
            outcome
        );
        if !outcome.is_reachable() {
            unreachable += 1;
        }
    }

    println!();
    if unreachable > 0 {
        eprintln!("{} endpoint(s) not ready. Start the backends and retry.", unreachable);
        std::process::exit(1);
    }

    println!("All {} endpoint(s) ready", outcomes.len());
    Ok(())
}
