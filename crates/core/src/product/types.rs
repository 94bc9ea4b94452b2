use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::{KeyAttribute, TableDescriptor, Throughput};

/// Name of the table products are stored in.
pub const PRODUCT_TABLE_NAME: &str = "activities";

/// Attribute holding the product identity (the partition key).
pub const PRODUCT_PARTITION_KEY: &str = "_id";

/// A marketplace activity record.
///
/// `id`, `created_at` and `updated_at` are assigned by the server; every other
/// field comes from the client payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    #[serde(with = "crate::serde::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::serde::timestamp")]
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub total_price: i64,
    #[serde(with = "crate::serde::timestamp")]
    pub collection_created_date: DateTime<Utc>,
    #[serde(with = "crate::serde::timestamp")]
    pub listing_time: DateTime<Utc>,
    #[serde(with = "crate::serde::timestamp")]
    pub tx_timestamp: DateTime<Utc>,
    pub asset_name: String,
    pub collection_image_url: String,
    pub collection_name: String,
    pub collection_slug: String,
    pub contract_address: String,
    pub event_type: String,
    pub seller_address: String,
    pub transaction_hash: String,
    pub winner_address: String,
}

impl Product {
    /// Table schema for products. Compiled in; only the name may be overridden
    /// at deploy time.
    pub fn table_descriptor() -> TableDescriptor {
        TableDescriptor {
            table_name: PRODUCT_TABLE_NAME.to_string(),
            partition_key: KeyAttribute::string(PRODUCT_PARTITION_KEY),
            throughput: Throughput::Provisioned {
                read_capacity_units: 1,
                write_capacity_units: 1,
            },
        }
    }
}
