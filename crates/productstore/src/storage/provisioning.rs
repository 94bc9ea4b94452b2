//! Schema provisioning: make sure the table exists and is active before the
//! service accepts traffic.
//!
//! Runs once at startup. A create request that the store answers with
//! "already exists" is success, so provisioning is safe to repeat and safe to
//! race against another instance doing the same. Waiting for the table is
//! bounded by [`PollPolicy`].

use async_trait::async_trait;

use productstore_core::storage::{
    CreateTableOutcome, PollPolicy, ProvisioningError, TableDescriptor, TableStatus,
};

/// Control-plane operations needed for provisioning.
#[async_trait]
pub trait TableAdmin: Send + Sync {
    /// Requests creation of the table described by `descriptor`.
    async fn create_table(
        &self,
        descriptor: &TableDescriptor,
    ) -> Result<CreateTableOutcome, ProvisioningError>;

    /// Current status of the table, or `None` if the store does not know it.
    async fn table_status(&self, table_name: &str) -> Result<Option<TableStatus>, ProvisioningError>;

    /// Names of all tables visible to the client.
    async fn list_tables(&self) -> Result<Vec<String>, ProvisioningError>;
}

/// Creates the table if needed and waits until it is active.
pub async fn ensure_table<A>(
    admin: &A,
    descriptor: &TableDescriptor,
    policy: &PollPolicy,
) -> Result<(), ProvisioningError>
where
    A: TableAdmin + ?Sized,
{
    let table_name = descriptor.table_name.as_str();

    let sleep_first = match admin.create_table(descriptor).await? {
        CreateTableOutcome::Created(TableStatus::Active) => {
            tracing::info!(table = %table_name, "Table created");
            return Ok(());
        }
        CreateTableOutcome::Created(status) => {
            tracing::info!(
                table = %table_name,
                ?status,
                max_wait = ?policy.total_budget(),
                "Table creation accepted, waiting for it to become active"
            );
            true
        }
        CreateTableOutcome::AlreadyExists => {
            tracing::debug!(table = %table_name, "Table already exists");
            false
        }
    };

    wait_for_table_active(admin, table_name, policy, sleep_first).await?;
    tracing::info!(table = %table_name, "Table is active");
    Ok(())
}

async fn wait_for_table_active<A>(
    admin: &A,
    table_name: &str,
    policy: &PollPolicy,
    sleep_first: bool,
) -> Result<(), ProvisioningError>
where
    A: TableAdmin + ?Sized,
{
    for attempt in 0..policy.max_attempts {
        let delay_index = attempt + u32::from(sleep_first);
        if delay_index > 0 {
            tokio::time::sleep(policy.delay_for_attempt(delay_index - 1)).await;
        }

        match admin.table_status(table_name).await? {
            Some(TableStatus::Active) => return Ok(()),
            Some(TableStatus::Deleting) => {
                return Err(ProvisioningError::TableDeleting {
                    table_name: table_name.to_string(),
                })
            }
            // Creating, Updating, or not visible yet after a create.
            status => {
                tracing::debug!(table = %table_name, attempt, ?status, "Table not active yet");
            }
        }
    }

    Err(ProvisioningError::Timeout {
        table_name: table_name.to_string(),
        attempts: policy.max_attempts,
    })
}

/// Lists the tables the store reports and logs them.
///
/// Only a sanity check: callers log a failure and carry on.
pub async fn check_tables<A>(admin: &A) -> Result<Vec<String>, ProvisioningError>
where
    A: TableAdmin + ?Sized,
{
    let tables = admin.list_tables().await?;

    if tables.is_empty() {
        tracing::warn!("No tables found");
    }
    for table in &tables {
        tracing::info!(table = %table, "Table found");
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::storage::inmemory::InMemoryTableAdmin;
    use productstore_core::product::Product;

    fn fast_policy() -> PollPolicy {
        PollPolicy {
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            max_attempts: 3,
        }
    }

    #[tokio::test]
    async fn test_creates_missing_table() {
        let admin = InMemoryTableAdmin::new();
        let descriptor = Product::table_descriptor();

        ensure_table(&admin, &descriptor, &fast_policy())
            .await
            .unwrap();

        assert_eq!(admin.create_calls(), 1);
        assert_eq!(admin.status_calls(), 0);
        assert_eq!(
            admin.table_status("activities").await.unwrap(),
            Some(TableStatus::Active)
        );
    }

    #[tokio::test]
    async fn test_waits_until_creating_table_is_active() {
        let admin = InMemoryTableAdmin::new().with_creation_transitions([TableStatus::Creating]);

        ensure_table(&admin, &Product::table_descriptor(), &fast_policy())
            .await
            .unwrap();

        assert_eq!(admin.status_calls(), 1);
    }

    #[tokio::test]
    async fn test_keeps_polling_while_creating() {
        let admin = InMemoryTableAdmin::new().with_creation_transitions([
            TableStatus::Creating,
            TableStatus::Creating,
            TableStatus::Updating,
        ]);

        ensure_table(&admin, &Product::table_descriptor(), &fast_policy())
            .await
            .unwrap();

        assert_eq!(admin.status_calls(), 3);
    }

    #[tokio::test]
    async fn test_second_call_is_idempotent() {
        let admin = InMemoryTableAdmin::new().with_creation_transitions([TableStatus::Creating]);
        let descriptor = Product::table_descriptor();

        ensure_table(&admin, &descriptor, &fast_policy())
            .await
            .unwrap();
        ensure_table(&admin, &descriptor, &fast_policy())
            .await
            .unwrap();

        assert_eq!(admin.create_calls(), 2);
        assert_eq!(admin.list_tables().await.unwrap(), vec!["activities"]);
    }

    #[tokio::test]
    async fn test_times_out_when_table_never_becomes_active() {
        let admin = InMemoryTableAdmin::new().with_creation_transitions([TableStatus::Creating; 10]);

        let err = ensure_table(&admin, &Product::table_descriptor(), &fast_policy())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ProvisioningError::Timeout {
                table_name: "activities".to_string(),
                attempts: 3
            }
        );
        assert_eq!(admin.status_calls(), 3);
    }

    #[tokio::test]
    async fn test_existing_table_being_deleted_fails() {
        let admin = InMemoryTableAdmin::new().with_table("activities", TableStatus::Deleting);

        let err = ensure_table(&admin, &Product::table_descriptor(), &fast_policy())
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisioningError::TableDeleting { .. }));
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let admin = InMemoryTableAdmin::new()
            .with_create_error(ProvisioningError::Store("AccessDeniedException".to_string()));

        let err = ensure_table(&admin, &Product::table_descriptor(), &fast_policy())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ProvisioningError::Store("AccessDeniedException".to_string())
        );
        assert_eq!(admin.status_calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_descriptor_is_rejected() {
        let admin = InMemoryTableAdmin::new();
        let descriptor = Product::table_descriptor().with_table_name("");

        let err = ensure_table(&admin, &descriptor, &fast_policy())
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisioningError::InvalidDescriptor(_)));
    }

    #[tokio::test]
    async fn test_check_tables() {
        let admin = InMemoryTableAdmin::new();
        assert!(check_tables(&admin).await.unwrap().is_empty());

        ensure_table(&admin, &Product::table_descriptor(), &fast_policy())
            .await
            .unwrap();

        assert_eq!(check_tables(&admin).await.unwrap(), vec!["activities"]);
    }
}
