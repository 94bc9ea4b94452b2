//! DynamoDB storage backend implementation.
//!
//! This module provides the DynamoDB-based implementation of the repository
//! trait and of table provisioning, using `aws-sdk-dynamodb`.

mod admin;
pub mod codec;
mod error;
mod repository;

pub use admin::DynamoDbTableAdmin;
pub use codec::AttributeMap;
pub use repository::DynamoDbRepository;

use aws_sdk_dynamodb::Client;

use crate::config::Config;

/// Creates a DynamoDB client from the store configuration.
///
/// Credentials come from the default AWS provider chain; an endpoint override
/// points the client at DynamoDB Local.
pub async fn create_client(config: &Config) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.aws_region.clone()));

    if let Some(endpoint) = &config.aws_endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    Client::new(&sdk_config)
}
