//! DynamoDB attribute codec for products.
//!
//! Pure functions for converting between DynamoDB `AttributeValue` maps and
//! [`Product`]. Every field is described once in [`FIELDS`]: its attribute
//! name, whether decoding requires it, and how to encode and decode it. Encode
//! and decode both walk that table, so adding a field is a one-line change.
//!
//! Identity and audit attributes (`_id`, `createdAt`, `updatedAt`) are
//! required on decode. Domain attributes are optional and fall back to their
//! zero value when absent. A present attribute with the wrong tag or an
//! unparsable value is always an error. A nil `_id` reads as a missing item.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use productstore_core::product::{
    format_timestamp, parse_timestamp, Product, PRODUCT_PARTITION_KEY,
};
use productstore_core::storage::RepositoryError;
use thiserror::Error;
use uuid::Uuid;

/// The store's native item representation.
pub type AttributeMap = HashMap<String, AttributeValue>;

pub const ENTITY_TYPE_PRODUCT: &str = "Product";

/// Errors produced while decoding an item.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("item not found")]
    NotFound,
    #[error("missing required attribute `{0}`")]
    MissingAttribute(&'static str),
    #[error("attribute `{name}` is not of type {expected}")]
    WrongType {
        name: &'static str,
        expected: &'static str,
    },
    #[error("invalid value for `{name}`: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

impl CodecError {
    /// Classifies the error for callers of the repository.
    pub fn into_repository_error(self, id: impl Into<String>) -> RepositoryError {
        match self {
            CodecError::NotFound => RepositoryError::NotFound {
                entity_type: ENTITY_TYPE_PRODUCT,
                id: id.into(),
            },
            other => other.into_decode_error(id),
        }
    }

    /// Classifies the error for an item that was read from a scan.
    ///
    /// A scanned item always exists, so every failure is corruption.
    pub fn into_decode_error(self, id: impl Into<String>) -> RepositoryError {
        RepositoryError::Decode {
            entity_type: ENTITY_TYPE_PRODUCT,
            id: id.into(),
            reason: self.to_string(),
        }
    }
}

type Encode = fn(&Product) -> AttributeValue;
type Decode = fn(&mut Product, &'static str, &AttributeValue) -> Result<(), CodecError>;

struct FieldCodec {
    name: &'static str,
    required: bool,
    encode: Encode,
    decode: Decode,
}

macro_rules! string_field {
    ($name:literal, $field:ident) => {
        FieldCodec {
            name: $name,
            required: false,
            encode: |p| AttributeValue::S(p.$field.clone()),
            decode: |p, name, value| {
                p.$field = get_s(name, value)?.to_string();
                Ok(())
            },
        }
    };
}

macro_rules! timestamp_field {
    ($name:literal, $field:ident, $required:literal) => {
        FieldCodec {
            name: $name,
            required: $required,
            encode: |p| AttributeValue::S(format_timestamp(&p.$field)),
            decode: |p, name, value| {
                p.$field = get_timestamp(name, value)?;
                Ok(())
            },
        }
    };
}

static FIELDS: &[FieldCodec] = &[
    FieldCodec {
        name: PRODUCT_PARTITION_KEY,
        required: true,
        encode: |p| partition_key(p.id),
        decode: |p, name, value| {
            p.id = get_uuid(name, value)?;
            Ok(())
        },
    },
    timestamp_field!("createdAt", created_at, true),
    timestamp_field!("updatedAt", updated_at, true),
    string_field!("name", name),
    FieldCodec {
        name: "total_price",
        required: false,
        encode: |p| AttributeValue::N(p.total_price.to_string()),
        decode: |p, name, value| {
            p.total_price = get_i64(name, value)?;
            Ok(())
        },
    },
    timestamp_field!("collection_created_date", collection_created_date, false),
    timestamp_field!("listing_time", listing_time, false),
    timestamp_field!("tx_timestamp", tx_timestamp, false),
    string_field!("asset_name", asset_name),
    string_field!("collection_image_url", collection_image_url),
    string_field!("collection_name", collection_name),
    string_field!("collection_slug", collection_slug),
    string_field!("contract_address", contract_address),
    string_field!("event_type", event_type),
    string_field!("seller_address", seller_address),
    string_field!("transaction_hash", transaction_hash),
    string_field!("winner_address", winner_address),
];

/// Attribute names that decoding refuses to default.
pub fn required_attributes() -> impl Iterator<Item = &'static str> {
    FIELDS.iter().filter(|f| f.required).map(|f| f.name)
}

/// Key attribute value for a product id.
pub fn partition_key(id: Uuid) -> AttributeValue {
    AttributeValue::S(id.to_string())
}

/// Convert a Product to a DynamoDB item.
pub fn product_to_item(product: &Product) -> AttributeMap {
    FIELDS
        .iter()
        .map(|field| (field.name.to_string(), (field.encode)(product)))
        .collect()
}

/// Convert a DynamoDB item to a Product.
///
/// `None` and empty maps are [`CodecError::NotFound`]. Decoding stops at the
/// first bad attribute.
pub fn item_to_product(item: Option<&AttributeMap>) -> Result<Product, CodecError> {
    let item = match item {
        Some(item) if !item.is_empty() => item,
        _ => return Err(CodecError::NotFound),
    };

    let mut product = Product::default();
    for field in FIELDS {
        match item.get(field.name) {
            Some(value) => (field.decode)(&mut product, field.name, value)?,
            None if field.required => return Err(CodecError::MissingAttribute(field.name)),
            None => {}
        }
    }
    Ok(product)
}

/// Best-effort id of an item, for error messages about items that failed to decode.
pub fn item_id_hint(item: &AttributeMap) -> String {
    item.get(PRODUCT_PARTITION_KEY)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .unwrap_or_else(|| "<unknown>".to_string())
}

// ============================================================================
// Helper functions
// ============================================================================

fn get_s<'a>(name: &'static str, value: &'a AttributeValue) -> Result<&'a str, CodecError> {
    value
        .as_s()
        .map(|s| s.as_str())
        .map_err(|_| CodecError::WrongType {
            name,
            expected: "S",
        })
}

fn get_i64(name: &'static str, value: &AttributeValue) -> Result<i64, CodecError> {
    let n = value.as_n().map_err(|_| CodecError::WrongType {
        name,
        expected: "N",
    })?;
    n.parse().map_err(|e| CodecError::InvalidValue {
        name,
        reason: format!("{n:?}: {e}"),
    })
}

fn get_uuid(name: &'static str, value: &AttributeValue) -> Result<Uuid, CodecError> {
    let s = get_s(name, value)?;
    let id = Uuid::parse_str(s).map_err(|e| CodecError::InvalidValue {
        name,
        reason: format!("{s:?}: {e}"),
    })?;
    // A zero identity means the item does not really exist.
    if id.is_nil() {
        return Err(CodecError::NotFound);
    }
    Ok(id)
}

fn get_timestamp(name: &'static str, value: &AttributeValue) -> Result<DateTime<Utc>, CodecError> {
    let s = get_s(name, value)?;
    parse_timestamp(s).map_err(|e| CodecError::InvalidValue {
        name,
        reason: format!("{s:?}: {e}"),
    })
}
