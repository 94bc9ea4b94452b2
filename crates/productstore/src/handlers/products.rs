use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;

use productstore_core::product::{Product, ProductPayload};

use crate::{
    handlers::{AppError, AppJson, AppPath},
    state::AppState,
};

/// List all products (GET /products).
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    let products = state.products.list().await?;
    Ok(Json(products))
}

/// Create a new product (POST /products).
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let product = state.products.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": product.id })),
    ))
}

/// Get a single product by ID (GET /products/{id}).
pub async fn get_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Product>, AppError> {
    let product = state.products.get(id).await?;
    Ok(Json(product))
}

/// Replace a product by ID (PUT /products/{id}).
pub async fn update_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<ProductPayload>,
) -> Result<StatusCode, AppError> {
    state.products.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a product by ID (DELETE /products/{id}).
pub async fn delete_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
