//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository trait
//! defined in `productstore_core::storage`, plus table provisioning.
//!
//! - `dynamodb`: AWS DynamoDB backend using `aws-sdk-dynamodb` (production)
//! - `inmemory`: attribute maps held in memory (tests and local runs)

pub mod dynamodb;
pub mod inmemory;
pub mod provisioning;

pub use dynamodb::{DynamoDbRepository, DynamoDbTableAdmin};
pub use inmemory::{InMemoryRepository, InMemoryTableAdmin};
pub use provisioning::{check_tables, ensure_table, TableAdmin};
