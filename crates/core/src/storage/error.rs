use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The store holds no item under the requested key.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    /// An item exists but one of its attributes could not be decoded.
    #[error("Corrupt {entity_type} {id}: {reason}")]
    Decode {
        entity_type: &'static str,
        id: String,
        reason: String,
    },
    /// The store could not be reached.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// The store was reached but rejected the operation.
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl RepositoryError {
    /// Returns true for the not-found classification.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Errors that can occur while provisioning a table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProvisioningError {
    #[error("Store error: {0}")]
    Store(String),
    #[error("Invalid table descriptor: {0}")]
    InvalidDescriptor(String),
    #[error("Table '{table_name}' is being deleted")]
    TableDeleting { table_name: String },
    #[error("Timeout waiting for table '{table_name}' to become active after {attempts} checks")]
    Timeout { table_name: String, attempts: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "Product",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Product not found: abc-123");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_repository_error_decode_display() {
        let error = RepositoryError::Decode {
            entity_type: "Product",
            id: "abc-123".to_string(),
            reason: "invalid value for `createdAt`".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Corrupt Product abc-123: invalid value for `createdAt`"
        );
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("timeout after 30s".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout after 30s");
    }

    #[test]
    fn test_repository_error_query_failed_display() {
        let error = RepositoryError::QueryFailed("invalid partition key".to_string());
        assert_eq!(error.to_string(), "Query failed: invalid partition key");
    }

    #[test]
    fn test_provisioning_error_timeout_display() {
        let error = ProvisioningError::Timeout {
            table_name: "activities".to_string(),
            attempts: 20,
        };
        assert_eq!(
            error.to_string(),
            "Timeout waiting for table 'activities' to become active after 20 checks"
        );
    }
}
