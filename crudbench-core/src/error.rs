// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Custom error types for crudbench.
//!
//! Explicit enum error types only. No `Box<dyn Error>` and no `anyhow::Result`
//! inside the library - every failure has a named variant.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for configuration and reporting.
#[derive(Debug, Error)]
pub enum BenchError {
    // =========================================================================
    // Configuration Errors - Fail-Fast on Invalid Config
    // =========================================================================
    #[error("Hard validation error: {0}")]
    HardValidation(#[from] HardValidationError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("Unknown endpoint: {name}")]
    UnknownEndpoint { name: String },

    // =========================================================================
    // Reporting Errors
    // =========================================================================
    #[error("Report error: {0}")]
    Report(#[from] ReporterError),

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Hard validation errors abort the run before any request is sent.
#[derive(Debug, Error)]
pub enum HardValidationError {
    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid base URL: {url} - {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Duplicate endpoint name: {name}")]
    DuplicateEndpoint { name: String },

    #[error("Schema validation failed: {message}")]
    SchemaValidation { message: String },
}

/// Why a single benchmark request was counted as a failure.
///
/// These never propagate out of a phase; they are logged and tallied.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response body: {0}")]
    Body(String),

    #[error("no identifier in create response: {body}")]
    MissingIdentifier { body: String },
}

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("Failed to access report directory: {0}")]
    DirectoryCreation(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using BenchError.
pub type BenchResult<T> = Result<T, BenchError>;
