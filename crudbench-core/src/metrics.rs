// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Counters and derived throughput for one benchmark pass.
//!
//! A pass always accounts for `4 × N` requests. Read, update and delete calls
//! that were never issued because their create failed count as failures.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::EndpointName;

/// CRUD phases in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Create,
    Read,
    Update,
    Delete,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Create, Phase::Read, Phase::Update, Phase::Delete];

    /// HTTP method used by the phase.
    pub fn method(&self) -> &'static str {
        match self {
            Phase::Create => "POST",
            Phase::Read => "GET",
            Phase::Update => "PUT",
            Phase::Delete => "DELETE",
        }
    }

    /// Whether `status` counts as success for this phase.
    pub fn accepts(&self, status: u16) -> bool {
        match self {
            Phase::Create => status == 200 || status == 201,
            Phase::Read | Phase::Update => status == 200,
            Phase::Delete => status == 200 || status == 204,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Create => write!(f, "create"),
            Phase::Read => write!(f, "read"),
            Phase::Update => write!(f, "update"),
            Phase::Delete => write!(f, "delete"),
        }
    }
}

/// Outcome counts of one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseStats {
    pub phase: Phase,
    /// Requests actually sent.
    pub attempted: usize,
    pub succeeded: usize,
}

impl PhaseStats {
    pub fn new(phase: Phase, attempted: usize, succeeded: usize) -> Self {
        Self {
            phase,
            attempted,
            succeeded: succeeded.min(attempted),
        }
    }

    /// Tally a batch of per-request outcomes.
    pub fn from_outcomes(phase: Phase, outcomes: &[bool]) -> Self {
        let succeeded = outcomes.iter().filter(|ok| **ok).count();
        Self::new(phase, outcomes.len(), succeeded)
    }

    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }
}

/// Aggregated result of one create → read → update → delete pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassResult {
    pub endpoint: EndpointName,
    /// Wall-clock seconds across all four phases, pacing included.
    pub duration_secs: f64,
    pub total_requests: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub requests_per_second: f64,
    pub phases: Vec<PhaseStats>,
}

impl PassResult {
    /// Build the pass result for `requests` requests per phase.
    pub fn new(
        endpoint: EndpointName,
        requests: usize,
        phases: Vec<PhaseStats>,
        duration: Duration,
    ) -> Self {
        let total_requests = requests * Phase::ALL.len();
        let success_count = phases
            .iter()
            .map(|p| p.succeeded)
            .sum::<usize>()
            .min(total_requests);
        let duration_secs = duration.as_secs_f64();

        Self {
            endpoint,
            duration_secs,
            total_requests,
            success_count,
            failure_count: total_requests - success_count,
            requests_per_second: requests_per_second(success_count, duration_secs),
            phases,
        }
    }

    /// Stats for a given phase, if it ran.
    pub fn phase(&self, phase: Phase) -> Option<&PhaseStats> {
        self.phases.iter().find(|p| p.phase == phase)
    }

    /// Failed requests per phase, e.g. `create 1, read 0, update 0, delete 0`.
    pub fn failure_breakdown(&self) -> String {
        self.phases
            .iter()
            .map(|p| format!("{} {}", p.phase, p.failed()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Console/log block for this pass.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("{} =>", self.endpoint.banner()),
            format!("  Duration: {:.2}s", self.duration_secs),
            format!("  Success: {}/{}", self.success_count, self.total_requests),
            format!("  Failures: {}", self.failure_count),
            format!("  RPS: {:.2}", self.requests_per_second),
        ]
    }
}

/// Successes per second; zero for a zero-length pass.
pub fn requests_per_second(success_count: usize, duration_secs: f64) -> f64 {
    if duration_secs > 0.0 {
        success_count as f64 / duration_secs
    } else {
        0.0
    }
}
