// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! crudbench CLI internals.
//!
//! HTTP transport, the phase-by-phase benchmark driver, the reachability
//! probe and logging setup used by the `crudbench` binary.

pub mod check;
pub mod driver;
pub mod logging;
pub mod transport;

pub use check::Reachability;
pub use driver::BenchmarkDriver;
pub use logging::LogHandle;
pub use transport::{HttpReply, HttpTransport};
