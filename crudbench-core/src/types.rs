// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Newtype wrappers for validated inputs.
//!
//! Following the "Newtype" pattern in Rust to ensure valid state by construction.
//! All types validate their invariants at creation time.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HardValidationError;

/// Maximum length of an endpoint name.
const MAX_ENDPOINT_NAME_LEN: usize = 64;

/// Validated endpoint name.
/// Must be non-empty, alphanumeric with hyphens/underscores, max 64 chars.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EndpointName(String);

impl EndpointName {
    /// Create a new EndpointName with validation.
    pub fn new(name: impl Into<String>) -> Result<Self, HardValidationError> {
        let name = name.into();

        if name.is_empty() {
            return Err(HardValidationError::InvalidFieldValue {
                field: "name",
                value: name,
                reason: "Endpoint name cannot be empty".to_string(),
            });
        }

        if name.len() > MAX_ENDPOINT_NAME_LEN {
            return Err(HardValidationError::InvalidFieldValue {
                field: "name",
                value: name.clone(),
                reason: format!(
                    "Endpoint name too long: {} chars (max {})",
                    name.len(),
                    MAX_ENDPOINT_NAME_LEN
                ),
            });
        }

        if !name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return Err(HardValidationError::InvalidFieldValue {
                field: "name",
                value: name,
                reason: "Endpoint name must contain only alphanumeric characters, hyphens, and underscores".to_string(),
            });
        }

        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-cased form used in console banners.
    pub fn banner(&self) -> String {
        self.0.to_uppercase()
    }
}

impl fmt::Display for EndpointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EndpointName {
    type Error = HardValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EndpointName> for String {
    fn from(name: EndpointName) -> Self {
        name.0
    }
}

/// Validated base URL of a backend, e.g. `http://localhost:8000`.
/// Scheme must be http or https. Trailing slashes are stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Create a new BaseUrl with validation.
    pub fn new(url: impl Into<String>) -> Result<Self, HardValidationError> {
        let url = url.into();
        let trimmed = url.trim_end_matches('/');

        let rest = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .ok_or_else(|| HardValidationError::InvalidBaseUrl {
                url: url.clone(),
                reason: "Scheme must be http or https".to_string(),
            })?;

        if rest.is_empty() || rest.starts_with('/') {
            return Err(HardValidationError::InvalidBaseUrl {
                url,
                reason: "Missing host".to_string(),
            });
        }

        if rest.chars().any(char::is_whitespace) {
            return Err(HardValidationError::InvalidBaseUrl {
                url,
                reason: "URL must not contain whitespace".to_string(),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the URL without trailing slash.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for BaseUrl {
    type Error = HardValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BaseUrl> for String {
    fn from(url: BaseUrl) -> Self {
        url.0
    }
}

/// Identifier of an item created on a backend.
///
/// Backends are not consistent about identifier types, so both integer and
/// string identifiers are carried. Only usable identifiers are constructed:
/// integers are positive, strings are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Numeric(u64),
    Text(String),
}

impl ItemId {
    /// Build an identifier from a JSON value, rejecting falsy values.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_u64().filter(|v| *v > 0).map(ItemId::Numeric),
            serde_json::Value::String(s) if !s.is_empty() => Some(ItemId::Text(s.clone())),
            _ => None,
        }
    }

    /// Percent-encoded form for use as a single URL path segment.
    pub fn path_segment(&self) -> Cow<'_, str> {
        match self {
            ItemId::Numeric(n) => Cow::Owned(n.to_string()),
            ItemId::Text(s) => urlencoding::encode(s),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Numeric(n) => write!(f, "{}", n),
            ItemId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One backend under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: EndpointName,
    pub base_url: BaseUrl,
    /// Collection segment, without surrounding slashes.
    pub items_path: String,
    /// Item routes end in `/` (Django REST Framework style).
    pub trailing_slash: bool,
}

impl Endpoint {
    /// Create an endpoint using the default `items` collection.
    pub fn new(name: EndpointName, base_url: BaseUrl) -> Self {
        Self {
            name,
            base_url,
            items_path: "items".to_string(),
            trailing_slash: false,
        }
    }

    /// Set the trailing-slash routing quirk.
    pub fn with_trailing_slash(mut self, trailing_slash: bool) -> Self {
        self.trailing_slash = trailing_slash;
        self
    }

    /// Set the collection segment.
    pub fn with_items_path(mut self, items_path: impl Into<String>) -> Self {
        self.items_path = items_path.into().trim_matches('/').to_string();
        self
    }

    /// `{base}/{items}/` - target of create and list calls.
    pub fn collection_url(&self) -> String {
        format!("{}/{}/", self.base_url, self.items_path)
    }

    /// `{base}/{items}/{id}` or `{base}/{items}/{id}/` depending on the quirk.
    pub fn item_url(&self, id: &ItemId) -> String {
        let segment = id.path_segment();
        if self.trailing_slash {
            format!("{}/{}/{}/", self.base_url, self.items_path, segment)
        } else {
            format!("{}/{}/{}", self.base_url, self.items_path, segment)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(trailing_slash: bool) -> Endpoint {
        Endpoint::new(
            EndpointName::new("drf").unwrap(),
            BaseUrl::new("http://localhost:8001").unwrap(),
        )
        .with_trailing_slash(trailing_slash)
    }

    #[test]
    fn test_endpoint_name_valid() {
        assert!(EndpointName::new("fastapi").is_ok());
        assert!(EndpointName::new("flask_2").is_ok());
        assert!(EndpointName::new("drf-v3").is_ok());
    }

    #[test]
    fn test_endpoint_name_invalid() {
        assert!(EndpointName::new("").is_err());
        assert!(EndpointName::new("a".repeat(65)).is_err());
        assert!(EndpointName::new("my api").is_err());
        assert!(EndpointName::new("api/v1").is_err());
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let url = BaseUrl::new("http://localhost:8000///").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000");
    }

    #[test]
    fn test_base_url_invalid() {
        assert!(BaseUrl::new("localhost:8000").is_err());
        assert!(BaseUrl::new("ftp://localhost").is_err());
        assert!(BaseUrl::new("http://").is_err());
        assert!(BaseUrl::new("http://local host").is_err());
    }

    #[test]
    fn test_item_url_with_trailing_slash() {
        let id = ItemId::Numeric(42);
        assert_eq!(
            endpoint(true).item_url(&id),
            "http://localhost:8001/items/42/"
        );
    }

    #[test]
    fn test_item_url_without_trailing_slash() {
        let id = ItemId::Numeric(42);
        assert_eq!(
            endpoint(false).item_url(&id),
            "http://localhost:8001/items/42"
        );
    }

    #[test]
    fn test_item_url_encodes_text_id() {
        let id = ItemId::Text("a/b?c d".to_string());
        assert_eq!(
            endpoint(false).item_url(&id),
            "http://localhost:8001/items/a%2Fb%3Fc%20d"
        );

        let uuid = ItemId::Text("3f2c9a1e-77b0-4d5e-9c1a-0b6f2e8d4a11".to_string());
        assert_eq!(
            endpoint(true).item_url(&uuid),
            "http://localhost:8001/items/3f2c9a1e-77b0-4d5e-9c1a-0b6f2e8d4a11/"
        );
    }

    #[test]
    fn test_collection_url() {
        assert_eq!(
            endpoint(false).collection_url(),
            "http://localhost:8001/items/"
        );
        let products = endpoint(false).with_items_path("/products/");
        assert_eq!(products.collection_url(), "http://localhost:8001/products/");
    }

    #[test]
    fn test_item_id_from_json() {
        assert_eq!(
            ItemId::from_json(&serde_json::json!(7)),
            Some(ItemId::Numeric(7))
        );
        assert_eq!(
            ItemId::from_json(&serde_json::json!("abc")),
            Some(ItemId::Text("abc".to_string()))
        );
        assert_eq!(ItemId::from_json(&serde_json::json!(0)), None);
        assert_eq!(ItemId::from_json(&serde_json::json!(-3)), None);
        assert_eq!(ItemId::from_json(&serde_json::json!("")), None);
        assert_eq!(ItemId::from_json(&serde_json::json!(null)), None);
        assert_eq!(ItemId::from_json(&serde_json::json!(true)), None);
    }
}
