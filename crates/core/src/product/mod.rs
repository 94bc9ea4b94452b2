mod error;
mod operations;
mod requests;
mod timestamp;
mod types;

pub use error::ValidationError;
pub use operations::{validate_payload, NAME_MAX_LEN, NAME_MIN_LEN};
pub use requests::ProductPayload;
pub use timestamp::{
    format_timestamp, now, parse_timestamp, truncate_timestamp, TIMESTAMP_FORMAT,
};
pub use types::{Product, PRODUCT_PARTITION_KEY, PRODUCT_TABLE_NAME};
