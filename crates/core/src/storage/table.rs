//! Table schema and provisioning types (Functional Core - pure data).

use std::time::Duration;

use super::ProvisioningError;

/// Static schema for one entity type's table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub throughput: Throughput,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

impl KeyAttribute {
    /// A string-typed key attribute.
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute_type: AttributeType::String,
        }
    }
}

/// Scalar types a key attribute may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Number,
}

/// Capacity settings for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Throughput {
    Provisioned {
        read_capacity_units: i64,
        write_capacity_units: i64,
    },
    PayPerRequest,
}

impl TableDescriptor {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    /// Checks the descriptor before it is sent to the store.
    pub fn validate(&self) -> Result<(), ProvisioningError> {
        if self.table_name.trim().is_empty() {
            return Err(ProvisioningError::InvalidDescriptor(
                "table name is empty".to_string(),
            ));
        }
        if self.partition_key.name.trim().is_empty() {
            return Err(ProvisioningError::InvalidDescriptor(
                "partition key name is empty".to_string(),
            ));
        }
        if let Throughput::Provisioned {
            read_capacity_units,
            write_capacity_units,
        } = self.throughput
        {
            if read_capacity_units < 1 || write_capacity_units < 1 {
                return Err(ProvisioningError::InvalidDescriptor(format!(
                    "capacity units must be positive (read={read_capacity_units}, write={write_capacity_units})"
                )));
            }
        }
        Ok(())
    }
}

/// Table status as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// What the store said in response to a create-table request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateTableOutcome {
    /// The request was accepted; the table is in the given state.
    Created(TableStatus),
    /// A table with that name already exists.
    AlreadyExists,
}

/// Backoff schedule for waiting on a table to become active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(3),
            max_delay: Duration::from_secs(30),
            max_attempts: 20,
        }
    }
}

impl PollPolicy {
    /// Delay before status check number `attempt` (zero-based).
    ///
    /// Doubles from `initial_delay` and saturates at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }

    /// Upper bound on total time spent sleeping.
    pub fn total_budget(&self) -> Duration {
        (0..self.max_attempts)
            .map(|n| self.delay_for_attempt(n))
            .sum()
    }
}
