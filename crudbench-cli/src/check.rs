// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Reachability probe: list each endpoint's collection without mutating it.

use std::fmt;

use futures::future::join_all;

use crudbench_core::{Endpoint, EndpointName};

use crate::transport::HttpTransport;

/// Result of probing one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reachability {
    /// Collection listing answered with a 2xx status.
    Reachable(u16),
    /// Server answered, but not with 2xx.
    Degraded(u16),
    /// No HTTP exchange happened.
    Unreachable(String),
}

impl Reachability {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Reachability::Reachable(_))
    }
}

impl fmt::Display for Reachability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reachability::Reachable(status) => write!(f, "reachable ({})", status),
            Reachability::Degraded(status) => write!(f, "responded with status {}", status),
            Reachability::Unreachable(reason) => write!(f, "not accessible: {}", reason),
        }
    }
}

/// Probe `GET {base}/{items}/` on one endpoint.
pub async fn probe(transport: &HttpTransport, endpoint: &Endpoint) -> Reachability {
    let url = endpoint.collection_url();
    match transport.get(&url).await {
        Ok(reply) if (200..300).contains(&reply.status) => Reachability::Reachable(reply.status),
        Ok(reply) => {
            tracing::warn!(endpoint = %endpoint.name, status = reply.status, "Unexpected status from {}", url);
            Reachability::Degraded(reply.status)
        }
        Err(e) => {
            tracing::warn!(endpoint = %endpoint.name, "{} is not accessible: {}", url, e);
            Reachability::Unreachable(e.to_string())
        }
    }
}

/// Probe every endpoint concurrently; results keep endpoint order.
pub async fn probe_all(
    transport: &HttpTransport,
    endpoints: &[Endpoint],
) -> Vec<(EndpointName, Reachability)> {
    let outcomes = join_all(endpoints.iter().map(|e| probe(transport, e))).await;
    endpoints
        .iter()
        .map(|e| e.name.clone())
        .zip(outcomes)
        .collect()
}
