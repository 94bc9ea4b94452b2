//! In-memory storage backend for testing.
//!
//! This module provides in-memory implementations of the repository and table
//! administration traits. Items are stored as encoded attribute maps, so the
//! codec is exercised exactly as it is against DynamoDB. Useful for testing and
//! for running the service locally without a store.
//!
//! # Example
//!
//! ```rust,ignore
//! use productstore::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod admin;
mod repository;

pub use admin::InMemoryTableAdmin;
pub use repository::InMemoryRepository;
