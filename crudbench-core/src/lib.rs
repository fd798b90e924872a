// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! crudbench Core Library
//!
//! Building blocks for benchmarking equivalent REST CRUD backends: validated
//! endpoint configuration, item payloads and identifier extraction, pass
//! metrics, and JSON reports.

pub mod config;
pub mod error;
pub mod metrics;
pub mod payload;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use config::{BenchmarkConfig, Config, ConfigLoader, TransportConfig};
pub use error::{BenchError, BenchResult, HardValidationError, ReporterError, RequestError};
pub use metrics::{PassResult, Phase, PhaseStats};
pub use payload::{extract_item_id, ItemPayload};
pub use report::{BenchmarkReport, JsonReporter, SystemInfo};
pub use types::{BaseUrl, Endpoint, EndpointName, ItemId};
