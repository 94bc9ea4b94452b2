use thiserror::Error;

/// Errors that can occur when validating a product payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Product name is required")]
    EmptyName,
    #[error("Product name must be between 3 and 50 characters")]
    NameLength,
    #[error("Total price cannot be negative: {0}")]
    NegativePrice(i64),
}
