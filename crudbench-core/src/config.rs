// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML configuration parser with strict schema validation.
//!
//! Validates the benchmark configuration before any request is sent.
//! Any invalid field results in a HardValidationError that prevents the run.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{BenchError, BenchResult, HardValidationError};
use crate::payload::ItemPayload;
use crate::types::{BaseUrl, Endpoint, EndpointName};

/// Upper bound on requests per phase.
const MAX_REQUESTS: usize = 100_000;

/// Upper bound on concurrently in-flight requests.
const MAX_CONNECTIONS: usize = 10_000;

/// Raw endpoint as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
struct RawEndpoint {
    name: String,
    base_url: String,
    #[serde(default)]
    trailing_slash: bool,
    #[serde(default = "default_items_path")]
    items_path: String,
}

fn default_items_path() -> String {
    "items".to_string()
}

/// Raw benchmark settings.
#[derive(Debug, Deserialize)]
struct RawBenchmarkConfig {
    #[serde(default = "default_requests")]
    requests: usize,
    #[serde(default)]
    phase_delay_ms: u64,
    #[serde(default)]
    endpoint_delay_ms: u64,
}

fn default_requests() -> usize {
    5
}

impl Default for RawBenchmarkConfig {
    fn default() -> Self {
        Self {
            requests: default_requests(),
            phase_delay_ms: 0,
            endpoint_delay_ms: 0,
        }
    }
}

/// Raw HTTP transport settings.
#[derive(Debug, Deserialize)]
struct RawTransportConfig {
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    connect_timeout_ms: u64,
    #[serde(default = "default_max_connections")]
    max_connections: usize,
    #[serde(default = "default_max_keepalive")]
    max_keepalive: usize,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

fn default_max_connections() -> usize {
    100
}

fn default_max_keepalive() -> usize {
    20
}

impl Default for RawTransportConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            max_connections: default_max_connections(),
            max_keepalive: default_max_keepalive(),
        }
    }
}

/// Raw root configuration file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    benchmark: RawBenchmarkConfig,
    #[serde(default)]
    transport: RawTransportConfig,
    #[serde(default)]
    payload: Option<ItemPayload>,
    endpoints: Vec<RawEndpoint>,
}

/// Validated benchmark settings.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Requests per phase (N).
    pub requests: usize,
    /// Pause between phases, counted in the pass duration.
    pub phase_delay: Duration,
    /// Pause between endpoints, outside any pass.
    pub endpoint_delay: Duration,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            requests: default_requests(),
            phase_delay: Duration::ZERO,
            endpoint_delay: Duration::ZERO,
        }
    }
}

/// Validated HTTP transport settings.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Total per-request timeout.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// In-flight request cap shared by every phase.
    pub max_connections: usize,
    /// Idle keep-alive connections kept per host.
    pub max_keepalive: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(default_timeout_ms()),
            connect_timeout: Duration::from_millis(default_connect_timeout_ms()),
            max_connections: default_max_connections(),
            max_keepalive: default_max_keepalive(),
        }
    }
}

/// Complete validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub benchmark: BenchmarkConfig,
    pub transport: TransportConfig,
    pub payload: ItemPayload,
    pub endpoints: Vec<Endpoint>,
}

impl Default for Config {
    /// The reference FastAPI / Flask / DRF setup on localhost.
    fn default() -> Self {
        let builtin = [
            ("fastapi", "http://localhost:8000", false),
            ("flask", "http://localhost:5000", false),
            ("drf", "http://localhost:8001", true),
        ];

        let endpoints = builtin
            .iter()
            .filter_map(|(name, url, trailing_slash)| {
                let name = EndpointName::new(*name).ok()?;
                let base_url = BaseUrl::new(*url).ok()?;
                Some(Endpoint::new(name, base_url).with_trailing_slash(*trailing_slash))
            })
            .collect();

        Self {
            benchmark: BenchmarkConfig::default(),
            transport: TransportConfig::default(),
            payload: ItemPayload::default(),
            endpoints,
        }
    }
}

impl Config {
    /// Override the per-phase request count.
    pub fn with_requests(mut self, requests: usize) -> BenchResult<Self> {
        ConfigLoader::validate_requests(requests)?;
        self.benchmark.requests = requests;
        Ok(self)
    }

    /// Keep only the named endpoints, in configuration order.
    ///
    /// An empty selection keeps everything.
    pub fn select_endpoints(mut self, names: &[String]) -> BenchResult<Self> {
        if names.is_empty() {
            return Ok(self);
        }

        for name in names {
            if !self.endpoints.iter().any(|e| e.name.as_str() == name) {
                return Err(BenchError::UnknownEndpoint { name: name.clone() });
            }
        }

        self.endpoints
            .retain(|e| names.iter().any(|n| n == e.name.as_str()));
        Ok(self)
    }
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> BenchResult<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(BenchError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| BenchError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_string(content: &str) -> BenchResult<Config> {
        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| BenchError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?;

        Self::validate(raw)
    }

    /// Validate raw configuration and convert to validated types.
    fn validate(raw: RawConfig) -> BenchResult<Config> {
        let benchmark = Self::validate_benchmark(raw.benchmark)?;
        let transport = Self::validate_transport(raw.transport)?;
        let payload = raw.payload.unwrap_or_default();

        if !payload.price.is_finite() {
            return Err(HardValidationError::InvalidFieldValue {
                field: "payload.price",
                value: payload.price.to_string(),
                reason: "Price must be a finite number".to_string(),
            }
            .into());
        }

        let mut endpoints = Vec::with_capacity(raw.endpoints.len());
        let mut seen_names = HashSet::new();

        for raw_endpoint in raw.endpoints {
            let endpoint = Self::validate_endpoint(raw_endpoint)?;

            if !seen_names.insert(endpoint.name.as_str().to_string()) {
                return Err(HardValidationError::DuplicateEndpoint {
                    name: endpoint.name.to_string(),
                }
                .into());
            }

            endpoints.push(endpoint);
        }

        if endpoints.is_empty() {
            return Err(HardValidationError::SchemaValidation {
                message: "At least one endpoint must be defined".to_string(),
            }
            .into());
        }

        Ok(Config {
            benchmark,
            transport,
            payload,
            endpoints,
        })
    }

    fn validate_requests(requests: usize) -> Result<(), HardValidationError> {
        if requests > MAX_REQUESTS {
            return Err(HardValidationError::InvalidFieldValue {
                field: "requests",
                value: requests.to_string(),
                reason: format!("Must not exceed {}", MAX_REQUESTS),
            });
        }
        Ok(())
    }

    fn validate_benchmark(raw: RawBenchmarkConfig) -> BenchResult<BenchmarkConfig> {
        Self::validate_requests(raw.requests)?;

        Ok(BenchmarkConfig {
            requests: raw.requests,
            phase_delay: Duration::from_millis(raw.phase_delay_ms),
            endpoint_delay: Duration::from_millis(raw.endpoint_delay_ms),
        })
    }

    fn validate_transport(raw: RawTransportConfig) -> BenchResult<TransportConfig> {
        if raw.timeout_ms == 0 {
            return Err(HardValidationError::InvalidFieldValue {
                field: "timeout_ms",
                value: "0".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            }
            .into());
        }

        if raw.connect_timeout_ms == 0 || raw.connect_timeout_ms > raw.timeout_ms {
            return Err(HardValidationError::InvalidFieldValue {
                field: "connect_timeout_ms",
                value: raw.connect_timeout_ms.to_string(),
                reason: format!("Must be between 1 and timeout_ms ({})", raw.timeout_ms),
            }
            .into());
        }

        if raw.max_connections == 0 || raw.max_connections > MAX_CONNECTIONS {
            return Err(HardValidationError::InvalidFieldValue {
                field: "max_connections",
                value: raw.max_connections.to_string(),
                reason: format!("Must be between 1 and {}", MAX_CONNECTIONS),
            }
            .into());
        }

        if raw.max_keepalive > raw.max_connections {
            return Err(HardValidationError::InvalidFieldValue {
                field: "max_keepalive",
                value: raw.max_keepalive.to_string(),
                reason: format!(
                    "Must not exceed max_connections ({})",
                    raw.max_connections
                ),
            }
            .into());
        }

        Ok(TransportConfig {
            timeout: Duration::from_millis(raw.timeout_ms),
            connect_timeout: Duration::from_millis(raw.connect_timeout_ms),
            max_connections: raw.max_connections,
            max_keepalive: raw.max_keepalive,
        })
    }

    fn validate_endpoint(raw: RawEndpoint) -> BenchResult<Endpoint> {
        let name = EndpointName::new(raw.name)?;
        let base_url = BaseUrl::new(raw.base_url)?;

        let items_path = raw.items_path.trim_matches('/');
        if items_path.is_empty() || items_path.chars().any(char::is_whitespace) {
            return Err(HardValidationError::InvalidFieldValue {
                field: "items_path",
                value: raw.items_path.clone(),
                reason: format!("Invalid collection path for endpoint '{}'", name),
            }
            .into());
        }

        Ok(Endpoint::new(name, base_url)
            .with_items_path(items_path)
            .with_trailing_slash(raw.trailing_slash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CONFIG: &str = r#"
benchmark:
  requests: 50
  phase_delay_ms: 1000
transport:
  timeout_ms: 10000
  connect_timeout_ms: 2000
  max_connections: 64
  max_keepalive: 16
payload:
  name: Widget
  description: bench
  price: 12.5
  in_stock: false
endpoints:
  - name: fastapi
    base_url: http://localhost:8000/
  - name: drf
    base_url: http://localhost:8001
    trailing_slash: true
"#;

    #[test]
    fn test_valid_config() {
        let config = ConfigLoader::load_string(VALID_CONFIG).unwrap();
        assert_eq!(config.endpoints.len(), 2);
        assert_eq!(config.endpoints[0].name.as_str(), "fastapi");
        assert_eq!(config.endpoints[0].base_url.as_str(), "http://localhost:8000");
        assert!(!config.endpoints[0].trailing_slash);
        assert!(config.endpoints[1].trailing_slash);
        assert_eq!(config.benchmark.requests, 50);
        assert_eq!(config.benchmark.phase_delay, Duration::from_secs(1));
        assert_eq!(config.transport.max_connections, 64);
        assert_eq!(config.payload.name, "Widget");
    }

    #[test]
    fn test_defaults_applied() {
        let yaml = r#"
endpoints:
  - name: flask
    base_url: http://localhost:5000
"#;
        let config = ConfigLoader::load_string(yaml).unwrap();
        assert_eq!(config.benchmark.requests, 5);
        assert_eq!(config.benchmark.phase_delay, Duration::ZERO);
        assert_eq!(config.transport.timeout, Duration::from_secs(10));
        assert_eq!(config.transport.max_keepalive, 20);
        assert_eq!(config.payload, ItemPayload::default());
        assert_eq!(config.endpoints[0].items_path, "items");
    }

    #[test]
    fn test_missing_endpoints() {
        let yaml = r#"
benchmark:
  requests: 5
endpoints: []
"#;
        assert!(ConfigLoader::load_string(yaml).is_err());
    }

    #[test]
    fn test_duplicate_endpoint_names() {
        let yaml = r#"
endpoints:
  - name: flask
    base_url: http://localhost:5000
  - name: flask
    base_url: http://localhost:5001
"#;
        let result = ConfigLoader::load_string(yaml);
        assert!(matches!(
            result,
            Err(BenchError::HardValidation(
                HardValidationError::DuplicateEndpoint { .. }
            ))
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        let yaml = r#"
endpoints:
  - name: flask
    base_url: localhost:5000
"#;
        assert!(ConfigLoader::load_string(yaml).is_err());
    }

    #[test]
    fn test_connect_timeout_exceeds_timeout() {
        let yaml = r#"
transport:
  timeout_ms: 1000
  connect_timeout_ms: 2000
endpoints:
  - name: flask
    base_url: http://localhost:5000
"#;
        assert!(ConfigLoader::load_string(yaml).is_err());
    }

    #[test]
    fn test_keepalive_exceeds_connections() {
        let yaml = r#"
transport:
  max_connections: 4
  max_keepalive: 8
endpoints:
  - name: flask
    base_url: http://localhost:5000
"#;
        assert!(ConfigLoader::load_string(yaml).is_err());
    }

    #[test]
    fn test_max_connections_bounds() {
        let oversized = r#"
transport:
  max_connections: 18446744073709551615
endpoints:
  - name: flask
    base_url: http://localhost:5000
"#;
        assert!(matches!(
            ConfigLoader::load_string(oversized),
            Err(BenchError::HardValidation(
                HardValidationError::InvalidFieldValue {
                    field: "max_connections",
                    ..
                }
            ))
        ));

        let zero = r#"
transport:
  max_connections: 0
  max_keepalive: 0
endpoints:
  - name: flask
    base_url: http://localhost:5000
"#;
        assert!(ConfigLoader::load_string(zero).is_err());

        let at_cap = format!(
            "transport:\n  max_connections: {}\nendpoints:\n  - name: flask\n    base_url: http://localhost:5000\n",
            MAX_CONNECTIONS
        );
        let config = ConfigLoader::load_string(&at_cap).unwrap();
        assert_eq!(config.transport.max_connections, MAX_CONNECTIONS);
    }

    #[test]
    fn test_zero_requests_allowed() {
        let yaml = r#"
benchmark:
  requests: 0
endpoints:
  - name: flask
    base_url: http://localhost:5000
"#;
        let config = ConfigLoader::load_string(yaml).unwrap();
        assert_eq!(config.benchmark.requests, 0);
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::load_file("/nonexistent/crudbench.yaml");
        assert!(matches!(result, Err(BenchError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_builtin_endpoints() {
        let config = Config::default();
        let names: Vec<_> = config.endpoints.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["fastapi", "flask", "drf"]);
        assert!(config.endpoints[2].trailing_slash);
    }

    #[test]
    fn test_select_endpoints_keeps_config_order() {
        let config = Config::default()
            .select_endpoints(&["drf".to_string(), "fastapi".to_string()])
            .unwrap();
        let names: Vec<_> = config.endpoints.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["fastapi", "drf"]);
    }

    #[test]
    fn test_select_unknown_endpoint() {
        let result = Config::default().select_endpoints(&["rails".to_string()]);
        assert!(matches!(result, Err(BenchError::UnknownEndpoint { .. })));
    }

    #[test]
    fn test_with_requests_bounds() {
        assert_eq!(
            Config::default().with_requests(10).unwrap().benchmark.requests,
            10
        );
        assert!(Config::default().with_requests(MAX_REQUESTS + 1).is_err());
    }
}
