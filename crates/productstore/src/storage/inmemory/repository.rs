//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use productstore_core::product::Product;
use productstore_core::storage::{ProductRepository, Result};

use crate::storage::dynamodb::codec::{item_id_hint, item_to_product, product_to_item};
use crate::storage::dynamodb::AttributeMap;

/// In-memory storage backend for testing and local runs.
///
/// Items are kept in their encoded attribute-map form and go through the same
/// codec as the DynamoDB backend, so a product read back from here has made
/// the same round trip it would make through the real store.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    items: Arc<RwLock<HashMap<String, AttributeMap>>>,
    healthy: bool,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
            healthy: true,
        }
    }

    /// Makes the health probe report an unreachable store.
    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    /// Stores a raw item, bypassing the codec.
    pub async fn insert_raw(&self, key: impl Into<String>, item: AttributeMap) {
        self.items.write().await.insert(key.into(), item);
    }
}

#[async_trait]
impl ProductRepository for InMemoryRepository {
    async fn create_product(&self, product: &Product) -> Result<()> {
        let mut items = self.items.write().await;
        items.insert(product.id.to_string(), product_to_item(product));
        Ok(())
    }

    async fn get_product(&self, id: Uuid) -> Result<Product> {
        let items = self.items.read().await;
        item_to_product(items.get(&id.to_string())).map_err(|e| e.into_repository_error(id.to_string()))
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let items = self.items.read().await;
        items
            .values()
            .map(|item| {
                item_to_product(Some(item)).map_err(|e| e.into_decode_error(item_id_hint(item)))
            })
            .collect()
    }

    async fn update_product(&self, id: Uuid, product: &Product) -> Result<()> {
        let mut product = product.clone();
        product.id = id;
        let mut items = self.items.write().await;
        items.insert(id.to_string(), product_to_item(&product));
        Ok(())
    }

    async fn delete_product(&self, id: Uuid) -> Result<()> {
        let mut items = self.items.write().await;
        items.remove(&id.to_string());
        Ok(())
    }

    async fn health(&self) -> bool {
        self.healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::AttributeValue;
    use productstore_core::product::{now, ProductPayload};
    use productstore_core::storage::RepositoryError;

    fn sample(name: &str) -> Product {
        let ts = now();
        ProductPayload::new(name)
            .with_total_price(500)
            .into_product(Uuid::new_v4(), ts, ts)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryRepository::new();
        let product = sample("widget");

        repo.create_product(&product).await.unwrap();

        assert_eq!(repo.get_product(product.id).await.unwrap(), product);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = InMemoryRepository::new();
        let id = Uuid::new_v4();

        assert_eq!(
            repo.get_product(id).await.unwrap_err(),
            RepositoryError::NotFound {
                entity_type: "Product",
                id: id.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_create_overwrites_existing_id() {
        let repo = InMemoryRepository::new();
        let product = sample("widget");
        repo.create_product(&product).await.unwrap();

        let mut replacement = product.clone();
        replacement.name = "gadget".to_string();
        repo.create_product(&replacement).await.unwrap();

        assert_eq!(repo.get_product(product.id).await.unwrap().name, "gadget");
        assert_eq!(repo.list_products().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_writes_under_given_id() {
        let repo = InMemoryRepository::new();
        let product = sample("widget");
        repo.create_product(&product).await.unwrap();

        let mut changed = sample("widget-v2");
        changed.created_at = product.created_at;
        repo.update_product(product.id, &changed).await.unwrap();

        let stored = repo.get_product(product.id).await.unwrap();
        assert_eq!(stored.id, product.id);
        assert_eq!(stored.name, "widget-v2");
        assert!(repo.get_product(changed.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryRepository::new();
        let product = sample("widget");
        repo.create_product(&product).await.unwrap();

        repo.delete_product(product.id).await.unwrap();
        repo.delete_product(product.id).await.unwrap();

        assert!(repo.get_product(product.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_aborts_on_corrupt_item() {
        let repo = InMemoryRepository::new();
        repo.create_product(&sample("widget")).await.unwrap();

        let mut corrupt = product_to_item(&sample("gadget"));
        corrupt.insert(
            "updatedAt".to_string(),
            AttributeValue::S("yesterday".to_string()),
        );
        repo.insert_raw("corrupt", corrupt).await;

        assert!(matches!(
            repo.list_products().await,
            Err(RepositoryError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_corrupt_item_is_decode_error() {
        let repo = InMemoryRepository::new();
        let product = sample("widget");
        let mut item = product_to_item(&product);
        item.remove("createdAt");
        repo.insert_raw(product.id.to_string(), item).await;

        assert!(matches!(
            repo.get_product(product.id).await,
            Err(RepositoryError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_nil_identity_item_is_not_found_on_get() {
        let repo = InMemoryRepository::new();
        let id = Uuid::new_v4();
        let mut item = product_to_item(&sample("widget"));
        item.insert("_id".to_string(), AttributeValue::S(Uuid::nil().to_string()));
        repo.insert_raw(id.to_string(), item).await;

        assert_eq!(
            repo.get_product(id).await.unwrap_err(),
            RepositoryError::NotFound {
                entity_type: "Product",
                id: id.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_nil_identity_item_is_corrupt_during_list() {
        let repo = InMemoryRepository::new();
        let mut item = product_to_item(&sample("widget"));
        item.insert("_id".to_string(), AttributeValue::S(Uuid::nil().to_string()));
        repo.insert_raw("zero", item).await;

        assert!(matches!(
            repo.list_products().await,
            Err(RepositoryError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_health() {
        assert!(InMemoryRepository::new().health().await);
        assert!(!InMemoryRepository::new().unhealthy().health().await);
    }
}
