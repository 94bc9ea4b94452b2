use async_trait::async_trait;
use uuid::Uuid;

use crate::product::Product;

use super::Result;

/// Repository for product operations.
///
/// Writes are full overwrites: there is no conditional check on create and no
/// version check on update, so the last write for a given id wins.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Writes a new product.
    async fn create_product(&self, product: &Product) -> Result<()>;

    /// Gets a product by its ID. Missing items are `RepositoryError::NotFound`.
    async fn get_product(&self, id: Uuid) -> Result<Product>;

    /// Reads every product in the table.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Replaces the product stored under `id`.
    async fn update_product(&self, id: Uuid, product: &Product) -> Result<()>;

    /// Deletes a product by its ID. Deleting a missing product succeeds.
    async fn delete_product(&self, id: Uuid) -> Result<()>;

    /// Cheap liveness probe against the store.
    async fn health(&self) -> bool;
}
