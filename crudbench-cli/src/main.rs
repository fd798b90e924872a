// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! crudbench CLI
//!
//! Benchmarks create/read/update/delete throughput of equivalent REST backends.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crudbench_cli::logging;
use crudbench_core::{BenchResult, Config, ConfigLoader};

mod commands;

/// crudbench - concurrent CRUD benchmark for REST backends
#[derive(Parser)]
#[command(name = "crudbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (built-in FastAPI/Flask/DRF endpoints if omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory for the benchmark log file
    #[arg(long, default_value = ".")]
    pub log_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the CRUD benchmark against every configured endpoint
    Run {
        /// Requests per phase (overrides the configuration)
        #[arg(short = 'n', long)]
        requests: Option<usize>,

        /// Only benchmark these endpoints (repeatable)
        #[arg(short, long = "endpoint")]
        endpoints: Vec<String>,

        /// Write a JSON report into this directory
        #[arg(long)]
        report_dir: Option<PathBuf>,
    },

    /// Check that every endpoint answers its collection listing
    Check {
        /// Only check these endpoints (repeatable)
        #[arg(short, long = "endpoint")]
        endpoints: Vec<String>,
    },

    /// List configured endpoints
    List,

    /// Summarize JSON reports saved by earlier runs
    Reports {
        /// Directory holding the reports
        #[arg(long, default_value = "reports")]
        dir: PathBuf,
    },

    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        file: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            requests,
            endpoints,
            report_dir,
        } => {
            let log = logging::init(&cli.log_dir, cli.verbose)?;
            log.scope(async {
                let mut config = load_config(cli.config.as_deref())?.select_endpoints(&endpoints)?;
                if let Some(requests) = requests {
                    config = config.with_requests(requests)?;
                }
                commands::run::execute(&config, report_dir.as_deref(), &log).await
            })
            .await
        }
        Commands::Check { endpoints } => {
            let log = logging::console(cli.verbose);
            log.scope(async {
                let config = load_config(cli.config.as_deref())?.select_endpoints(&endpoints)?;
                commands::check::execute(&config).await
            })
            .await
        }
        Commands::List => {
            let log = logging::console(cli.verbose);
            log.scope(async {
                let config = load_config(cli.config.as_deref())?;
                commands::list::execute(&config).await
            })
            .await
        }
        Commands::Reports { dir } => {
            let log = logging::console(cli.verbose);
            log.scope(commands::reports::execute(&dir)).await
        }
        Commands::Validate { file } => {
            let log = logging::console(cli.verbose);
            log.scope(commands::validate::execute(&file)).await
        }
    }
}

fn load_config(path: Option<&Path>) -> BenchResult<Config> {
    match path {
        Some(path) => {
            tracing::debug!(config = %path.display(), "Loading configuration");
            ConfigLoader::load_file(path)
        }
        None => Ok(Config::default()),
    }
}
