// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Shared HTTP transport for all benchmark phases.
//!
//! One `reqwest::Client` is reused across every request of a run so that
//! keep-alive connections are pooled. The in-flight limit caps how many
//! requests hold a connection at once; extra requests wait for a slot.

use std::sync::Arc;

use reqwest::{Client, Method};
use serde::Serialize;
use tokio::sync::Semaphore;

use crudbench_core::{Phase, RequestError, TransportConfig};

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Pooled HTTP client with timeouts and a connection cap.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    in_flight: Arc<Semaphore>,
}

impl HttpTransport {
    /// Build the client from validated transport settings.
    pub fn new(config: &TransportConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.max_keepalive)
            // Measurements must hit the backend directly, never a system proxy.
            .no_proxy()
            .build()?;

        Ok(Self {
            client,
            in_flight: Arc::new(Semaphore::new(config.max_connections)),
        })
    }

    /// Send one request for `phase` and read the whole response body.
    ///
    /// Any status is returned as a reply; only transport and body-read
    /// failures are errors.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        phase: Phase,
        url: &str,
        body: Option<&B>,
    ) -> Result<HttpReply, RequestError> {
        self.request(method_for(phase), url, body).await
    }

    /// Plain GET, used outside the benchmark phases.
    pub async fn get(&self, url: &str) -> Result<HttpReply, RequestError> {
        self.request::<()>(Method::GET, url, None).await
    }

    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<HttpReply, RequestError> {
        let _permit = self
            .in_flight
            .acquire()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RequestError::Body(e.to_string()))?;

        Ok(HttpReply { status, body })
    }
}

fn method_for(phase: Phase) -> Method {
    match phase {
        Phase::Create => Method::POST,
        Phase::Read => Method::GET,
        Phase::Update => Method::PUT,
        Phase::Delete => Method::DELETE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_matches_phase_label() {
        for phase in Phase::ALL {
            assert_eq!(method_for(phase).as_str(), phase.method());
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let transport = HttpTransport::new(&TransportConfig::default()).unwrap();
        let result = transport
            .get(&format!("http://127.0.0.1:{}/items/", port))
            .await;
        assert!(matches!(result, Err(RequestError::Transport(_))));
    }
}
