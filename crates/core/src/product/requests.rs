//! API request types for product operations.
//!
//! A payload carries the client-controlled fields only. Server-assigned fields
//! (`id`, `created_at`, `updated_at`) are not part of the type, so serde
//! ignores them when a client sends them anyway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::Product;
use crate::serde::deserialize_optional_timestamp;

/// Request body for creating or replacing a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub total_price: i64,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub collection_created_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub listing_time: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub tx_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub asset_name: String,
    #[serde(default)]
    pub collection_image_url: String,
    #[serde(default)]
    pub collection_name: String,
    #[serde(default)]
    pub collection_slug: String,
    #[serde(default)]
    pub contract_address: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub seller_address: String,
    #[serde(default)]
    pub transaction_hash: String,
    #[serde(default)]
    pub winner_address: String,
}

impl ProductPayload {
    /// Create a payload with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the total price.
    pub fn with_total_price(mut self, total_price: i64) -> Self {
        self.total_price = total_price;
        self
    }

    /// Set the event type.
    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    /// Builds the full record from the payload and the server-assigned fields.
    ///
    /// Unset timestamps become the Unix epoch, matching how the store decodes
    /// an absent optional timestamp.
    pub fn into_product(
        self,
        id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Product {
        Product {
            id,
            created_at,
            updated_at,
            name: self.name,
            total_price: self.total_price,
            collection_created_date: self.collection_created_date.unwrap_or_default(),
            listing_time: self.listing_time.unwrap_or_default(),
            tx_timestamp: self.tx_timestamp.unwrap_or_default(),
            asset_name: self.asset_name,
            collection_image_url: self.collection_image_url,
            collection_name: self.collection_name,
            collection_slug: self.collection_slug,
            contract_address: self.contract_address,
            event_type: self.event_type,
            seller_address: self.seller_address,
            transaction_hash: self.transaction_hash,
            winner_address: self.winner_address,
        }
    }
}
