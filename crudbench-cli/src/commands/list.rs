// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `crudbench list` command - List endpoints from configuration.

use crudbench_core::Config;

pub async fn execute(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("╔══════════════════════════════════════════════════════════════════════════════╗");
    println!("║                           CONFIGURED ENDPOINTS                               ║");
    println!("╠═══════════════════╦═══════════════════════════════╦══════════════════════════╣");
    println!("║ Name              ║ Collection                    ║ Item route               ║");
    println!("╠═══════════════════╬═══════════════════════════════╬══════════════════════════╣");

    for endpoint in &config.endpoints {
        let slash = if endpoint.trailing_slash { "/" } else { "" };
        let item_route = format!("/{}/{{id}}{}", endpoint.items_path, slash);

        println!(
            "║ {:<17} ║ {:<29} ║ {:<24} ║",
            endpoint.name.as_str(),
            endpoint.collection_url(),
            item_route
        );
    }

    println!("╚═══════════════════╩═══════════════════════════════╩══════════════════════════╝");
    println!();
    println!("Total: {} endpoint(s)", config.endpoints.len());

    Ok(())
}
