//! Request orchestration for products.
//!
//! The controller owns identity and audit fields: it assigns the id and both
//! timestamps on create, and on update it carries the stored creation time
//! forward and stamps a new update time. Everything else is pass-through to
//! the repository.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use uuid::Uuid;

use productstore_core::product::{now, validate_payload, Product, ProductPayload, ValidationError};
use productstore_core::storage::{ProductRepository, RepositoryError};

/// Errors surfaced by [`ProductController`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControllerError {
    #[error("Product id is required")]
    MissingId,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type Result<T> = std::result::Result<T, ControllerError>;

#[derive(Clone)]
pub struct ProductController {
    repo: Arc<dyn ProductRepository>,
}

impl ProductController {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    /// Validates the payload and stores it as a new product.
    pub async fn create(&self, payload: ProductPayload) -> Result<Product> {
        validate_payload(&payload)?;

        let ts = now();
        let product = payload.into_product(Uuid::new_v4(), ts, ts);
        self.repo.create_product(&product).await?;

        tracing::info!(product_id = %product.id, name = %product.name, "Created product");
        Ok(product)
    }

    pub async fn get(&self, id: Uuid) -> Result<Product> {
        Ok(self.repo.get_product(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.repo.list_products().await?)
    }

    /// Replaces the domain fields of an existing product.
    ///
    /// The stored `created_at` is kept and `updated_at` moves forward.
    pub async fn update(&self, id: Uuid, payload: ProductPayload) -> Result<Product> {
        if id.is_nil() {
            return Err(ControllerError::MissingId);
        }
        validate_payload(&payload)?;

        let existing = self.repo.get_product(id).await?;
        let product = payload.into_product(
            id,
            existing.created_at,
            next_update_time(existing.updated_at),
        );
        self.repo.update_product(id, &product).await?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(product)
    }

    /// Deletes a product. Deleting a missing product succeeds.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.repo.delete_product(id).await?;
        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }

    pub async fn health(&self) -> bool {
        self.repo.health().await
    }
}

/// Current time, bumped past `previous` when the clock has not advanced
/// beyond the stored precision.
fn next_update_time(previous: DateTime<Utc>) -> DateTime<Utc> {
    let ts = now();
    if ts > previous {
        ts
    } else {
        previous + Duration::milliseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryRepository;

    fn controller() -> ProductController {
        ProductController::new(Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn test_create_assigns_identity_and_timestamps() {
        let controller = controller();

        let product = controller
            .create(ProductPayload::new("widget").with_total_price(500))
            .await
            .unwrap();

        assert!(!product.id.is_nil());
        assert_eq!(product.created_at, product.updated_at);
        assert_ne!(product.created_at, DateTime::<Utc>::default());
        assert_eq!(controller.get(product.id).await.unwrap(), product);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payload() {
        let controller = controller();

        let err = controller.create(ProductPayload::new("ab")).await.unwrap_err();

        assert_eq!(err, ControllerError::Validation(ValidationError::NameLength));
        assert!(controller.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_preserves_creation_time() {
        let controller = controller();
        let created = controller
            .create(ProductPayload::new("widget").with_total_price(500))
            .await
            .unwrap();

        controller
            .update(
                created.id,
                ProductPayload::new("widget-v2").with_total_price(700),
            )
            .await
            .unwrap();

        let stored = controller.get(created.id).await.unwrap();
        assert_eq!(stored.id, created.id);
        assert_eq!(stored.created_at, created.created_at);
        assert!(stored.updated_at > created.updated_at);
        assert_eq!(stored.name, "widget-v2");
        assert_eq!(stored.total_price, 700);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let controller = controller();

        let err = controller
            .update(Uuid::new_v4(), ProductPayload::new("widget"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ControllerError::Repository(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let err = controller()
            .update(Uuid::nil(), ProductPayload::new("widget"))
            .await
            .unwrap_err();

        assert_eq!(err, ControllerError::MissingId);
    }

    #[tokio::test]
    async fn test_delete_twice_succeeds() {
        let controller = controller();
        let created = controller.create(ProductPayload::new("widget")).await.unwrap();

        controller.delete(created.id).await.unwrap();
        controller.delete(created.id).await.unwrap();

        assert!(matches!(
            controller.get(created.id).await,
            Err(ControllerError::Repository(RepositoryError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_create_get_update_delete_scenario() {
        let controller = controller();

        let created = controller
            .create(ProductPayload::new("widget").with_total_price(500))
            .await
            .unwrap();
        let id = created.id;

        let fetched = controller.get(id).await.unwrap();
        assert_eq!(fetched.name, "widget");
        assert_eq!(fetched.total_price, 500);
        assert_ne!(fetched.created_at, DateTime::<Utc>::default());
        assert_ne!(fetched.updated_at, DateTime::<Utc>::default());

        controller
            .update(id, ProductPayload::new("widget-v2").with_total_price(700))
            .await
            .unwrap();

        let fetched = controller.get(id).await.unwrap();
        assert_eq!(fetched.name, "widget-v2");
        assert_eq!(fetched.total_price, 700);
        assert_eq!(fetched.created_at, created.created_at);
        assert!(fetched.updated_at > created.updated_at);

        controller.delete(id).await.unwrap();
        assert!(matches!(
            controller.get(id).await,
            Err(ControllerError::Repository(RepositoryError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_next_update_time_always_advances() {
        let future = now() + Duration::hours(1);
        assert_eq!(next_update_time(future), future + Duration::milliseconds(1));

        let past = now() - Duration::hours(1);
        assert!(next_update_time(past) > past);
    }
}
