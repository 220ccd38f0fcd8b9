//! Services and items catalog

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::ids::{ItemId, ServiceId};

/// A sellable service, optionally consuming catalog items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub associated_item_ids: BTreeSet<ItemId>,
}

impl Service {
    pub fn new(id: impl Into<ServiceId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
            duration_minutes: None,
            associated_item_ids: BTreeSet::new(),
        }
    }

    pub fn uses_item(&self, item_id: &ItemId) -> bool {
        self.associated_item_ids.contains(item_id)
    }

    /// Returns true when the item was linked
    pub fn unlink_item(&mut self, item_id: &ItemId) -> bool {
        self.associated_item_ids.remove(item_id)
    }
}

/// Consumable or rentable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sale price or internal cost
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
            stock: None,
        }
    }
}
