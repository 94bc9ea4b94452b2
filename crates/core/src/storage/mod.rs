mod error;
mod http_mapping;
mod table;
mod traits;

pub use error::{ProvisioningError, RepositoryError, Result};
pub use http_mapping::repository_error_to_status_code;
pub use table::{
    AttributeType, CreateTableOutcome, KeyAttribute, PollPolicy, TableDescriptor, TableStatus,
    Throughput,
};
pub use traits::ProductRepository;
