// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `crudbench validate` command - Validate configuration file.

use std::path::Path;

use crudbench_core::ConfigLoader;

pub async fn execute(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(file = %file.display(), "Validating configuration");

    match ConfigLoader::load_file(file) {
        Ok(config) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Benchmark Settings:");
            println!("  Requests per phase: {}", config.benchmark.requests);
            println!(
                "  Phase delay:        {}ms",
                config.benchmark.phase_delay.as_millis()
            );
            println!(
                "  Endpoint delay:     {}ms",
                config.benchmark.endpoint_delay.as_millis()
            );
            println!();
            println!("Transport Settings:");
            println!("  Timeout:            {}ms", config.transport.timeout.as_millis());
            println!(
                "  Connect timeout:    {}ms",
                config.transport.connect_timeout.as_millis()
            );
            println!("  Max connections:    {}", config.transport.max_connections);
            println!("  Max keep-alive:     {}", config.transport.max_keepalive);
            println!();
            println!("Endpoints ({}):", config.endpoints.len());
            for endpoint in &config.endpoints {
                println!(
                    "  - {} ({}, trailing slash: {})",
                    endpoint.name,
                    endpoint.collection_url(),
                    endpoint.trailing_slash
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed:");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
