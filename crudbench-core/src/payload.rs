// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Item request bodies and identifier extraction from create responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::ItemId;

/// Name written by the update phase.
pub const UPDATED_NAME: &str = "Updated";

/// JSON body sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub in_stock: bool,
}

impl Default for ItemPayload {
    fn default() -> Self {
        Self {
            name: "Test Item".to_string(),
            description: "A performance benchmark item".to_string(),
            price: 99.99,
            in_stock: true,
        }
    }
}

impl ItemPayload {
    /// The body used by the update phase: same fields, renamed.
    pub fn updated(&self) -> Self {
        Self {
            name: UPDATED_NAME.to_string(),
            ..self.clone()
        }
    }
}

/// Pull the item identifier out of a create response.
///
/// An `id` field wins (exact name first, then any casing). Without one, the
/// first positive-integer field in document order is taken. Objects with
/// neither, and non-object bodies, yield `None`.
pub fn extract_item_id(body: &Value) -> Option<ItemId> {
    let object = body.as_object()?;

    if let Some(id) = object.get("id").and_then(ItemId::from_json) {
        return Some(id);
    }

    if let Some(id) = object
        .iter()
        .filter(|(key, _)| key.eq_ignore_ascii_case("id"))
        .find_map(|(_, value)| ItemId::from_json(value))
    {
        return Some(id);
    }

    // Heuristic: may pick an unrelated counter if the backend returns one.
    object.values().find_map(|value| match value {
        Value::Number(n) => n.as_u64().filter(|v| *v > 0).map(ItemId::Numeric),
        _ => None,
    })
}
