//! DynamoDB repository implementation.
//!
//! Implements `ProductRepository` from `productstore_core::storage` using DynamoDB.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use uuid::Uuid;

use productstore_core::product::{Product, PRODUCT_PARTITION_KEY};
use productstore_core::storage::{ProductRepository, Result};

use super::codec::{item_id_hint, item_to_product, partition_key, product_to_item};
use super::error::{map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error};

/// DynamoDB-based product repository.
///
/// The SDK client is cheap to clone and safe to share between tasks, so one
/// repository serves every request.
#[derive(Debug, Clone)]
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
    health_timeout: Duration,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            health_timeout: Duration::from_secs(2),
        }
    }

    /// Sets how long the health probe may take before it counts as a failure.
    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    async fn put(&self, product: &Product) -> Result<()> {
        let item = product_to_item(product);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }
}

#[async_trait]
impl ProductRepository for DynamoDbRepository {
    async fn create_product(&self, product: &Product) -> Result<()> {
        self.put(product).await?;
        tracing::debug!(product_id = %product.id, table = %self.table_name, "PutItem (create)");
        Ok(())
    }

    async fn get_product(&self, id: Uuid) -> Result<Product> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PRODUCT_PARTITION_KEY, partition_key(id))
            .send()
            .await
            .map_err(map_get_item_error)?;

        item_to_product(result.item.as_ref()).map_err(|e| e.into_repository_error(id.to_string()))
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let mut products = Vec::new();
        let mut start_key = None;

        loop {
            let page = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_scan_error)?;

            for item in page.items() {
                // A corrupt item aborts the whole scan.
                let product = item_to_product(Some(item))
                    .map_err(|e| e.into_decode_error(item_id_hint(item)))?;
                products.push(product);
            }

            match page.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        tracing::debug!(count = products.len(), table = %self.table_name, "Scan complete");
        Ok(products)
    }

    async fn update_product(&self, id: Uuid, product: &Product) -> Result<()> {
        let mut product = product.clone();
        product.id = id;
        self.put(&product).await?;
        tracing::debug!(product_id = %id, table = %self.table_name, "PutItem (update)");
        Ok(())
    }

    async fn delete_product(&self, id: Uuid) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(PRODUCT_PARTITION_KEY, partition_key(id))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }

    async fn health(&self) -> bool {
        let probe = self.client.list_tables().limit(1).send();
        match tokio::time::timeout(self.health_timeout, probe).await {
            Ok(Ok(_)) => true,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "DynamoDB health probe failed");
                false
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.health_timeout, "DynamoDB health probe timed out");
                false
            }
        }
    }
}
