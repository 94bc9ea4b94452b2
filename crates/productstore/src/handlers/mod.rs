pub mod error;
pub mod extract;
pub mod health;
pub mod products;

pub use error::AppError;
pub use extract::{AppJson, AppPath};
