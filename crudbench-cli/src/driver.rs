// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark driver.
//!
//! For each endpoint, runs one pass of four strictly ordered phases:
//! create, read, update, delete. Every phase issues its requests
//! concurrently and waits for all of them before the next phase starts.
//! Each request future resolves to an outcome value, so one failing request
//! never cancels its siblings or the rest of the pass.

use std::time::{Duration, Instant};

use futures::future::join_all;

use crudbench_core::{
    extract_item_id, BenchmarkConfig, Config, Endpoint, ItemId, ItemPayload, PassResult, Phase,
    PhaseStats, RequestError,
};

use crate::transport::HttpTransport;

/// Drives benchmark passes against configured endpoints.
pub struct BenchmarkDriver {
    transport: HttpTransport,
    settings: BenchmarkConfig,
    payload: ItemPayload,
    update_payload: ItemPayload,
}

impl BenchmarkDriver {
    /// Create a driver with a fresh transport built from `config`.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let transport = HttpTransport::new(&config.transport)?;
        Ok(Self::with_transport(
            transport,
            config.benchmark.clone(),
            config.payload.clone(),
        ))
    }

    /// Create a driver around an existing transport.
    pub fn with_transport(
        transport: HttpTransport,
        settings: BenchmarkConfig,
        payload: ItemPayload,
    ) -> Self {
        let update_payload = payload.updated();
        Self {
            transport,
            settings,
            payload,
            update_payload,
        }
    }

    /// Requests issued per phase.
    pub fn requests(&self) -> usize {
        self.settings.requests
    }

    /// Run one pass per endpoint, one endpoint at a time.
    pub async fn run(&self, endpoints: &[Endpoint]) -> Vec<PassResult> {
        let mut results = Vec::with_capacity(endpoints.len());

        for (index, endpoint) in endpoints.iter().enumerate() {
            if index > 0 {
                pace(self.settings.endpoint_delay).await;
            }

            tracing::info!(
                "Testing {} at {}",
                endpoint.name.banner(),
                endpoint.collection_url()
            );
            let result = self.run_pass(endpoint).await;
            for line in result.summary_lines() {
                tracing::info!("{}", line);
            }
            tracing::info!("");
            results.push(result);
        }

        results
    }

    /// One create → read → update → delete pass against `endpoint`.
    ///
    /// Duration spans all four phases and the pacing between them.
    pub async fn run_pass(&self, endpoint: &Endpoint) -> PassResult {
        let banner = endpoint.name.banner();
        let requests = self.settings.requests;
        tracing::info!("Starting benchmark for {}...", banner);

        let start = Instant::now();

        let created = join_all((0..requests).map(|_| self.create_item(endpoint))).await;
        let ids: Vec<ItemId> = created.into_iter().flatten().collect();
        let create_stats = PhaseStats::new(Phase::Create, requests, ids.len());
        tracing::info!("{} - Created {} items", banner, ids.len());

        let mut phases = vec![create_stats];
        for phase in [Phase::Read, Phase::Update, Phase::Delete] {
            pace(self.settings.phase_delay).await;
            let outcomes =
                join_all(ids.iter().map(|id| self.item_request(phase, endpoint, id))).await;
            let stats = PhaseStats::from_outcomes(phase, &outcomes);
            tracing::debug!(
                endpoint = %endpoint.name,
                phase = %phase,
                attempted = stats.attempted,
                succeeded = stats.succeeded,
                "Phase complete"
            );
            phases.push(stats);
        }

        let duration = start.elapsed();
        tracing::info!("{} - Benchmark completed", banner);

        PassResult::new(endpoint.name.clone(), requests, phases, duration)
    }

    /// POST one item; `None` when the create failed for any reason.
    async fn create_item(&self, endpoint: &Endpoint) -> Option<ItemId> {
        let url = endpoint.collection_url();
        match self.try_create(&url).await {
            Ok(id) => Some(id),
            Err(e) => {
                log_failure(Phase::Create, &url, &e);
                None
            }
        }
    }

    async fn try_create(&self, url: &str) -> Result<ItemId, RequestError> {
        let reply = self
            .transport
            .send(Phase::Create, url, Some(&self.payload))
            .await?;

        if !Phase::Create.accepts(reply.status) {
            return Err(RequestError::Status {
                status: reply.status,
                body: reply.body,
            });
        }

        let body: serde_json::Value =
            serde_json::from_str(&reply.body).map_err(|e| RequestError::Body(e.to_string()))?;

        extract_item_id(&body).ok_or(RequestError::MissingIdentifier { body: reply.body })
    }

    /// GET, PUT or DELETE one item; `true` on a success status.
    async fn item_request(&self, phase: Phase, endpoint: &Endpoint, id: &ItemId) -> bool {
        let url = endpoint.item_url(id);
        let body = match phase {
            Phase::Update => Some(&self.update_payload),
            _ => None,
        };

        let outcome = match self.transport.send(phase, &url, body).await {
            Ok(reply) if phase.accepts(reply.status) => Ok(()),
            Ok(reply) => Err(RequestError::Status {
                status: reply.status,
                body: reply.body,
            }),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => true,
            Err(e) => {
                log_failure(phase, &url, &e);
                false
            }
        }
    }
}

fn log_failure(phase: Phase, url: &str, error: &RequestError) {
    tracing::error!("{} {} - {}", phase.method(), url, error);
}

async fn pace(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
