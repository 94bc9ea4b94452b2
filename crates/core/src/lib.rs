pub mod product;
pub mod serde;
pub mod storage;
