//! In-memory table administration.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use productstore_core::storage::{
    CreateTableOutcome, ProvisioningError, TableDescriptor, TableStatus,
};

use crate::storage::provisioning::TableAdmin;

#[derive(Debug)]
struct TableEntry {
    status: TableStatus,
    pending: VecDeque<TableStatus>,
}

#[derive(Debug, Default)]
struct AdminState {
    tables: BTreeMap<String, TableEntry>,
    creation_transitions: Vec<TableStatus>,
    create_error: Option<ProvisioningError>,
    create_calls: u32,
    status_calls: u32,
}

/// [`TableAdmin`] that keeps tables in memory.
///
/// By default a created table is active at once. With
/// [`with_creation_transitions`](Self::with_creation_transitions) the create
/// call reports the first scripted status and every later status check moves
/// one step along the script, ending at `Active`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTableAdmin {
    state: Arc<Mutex<AdminState>>,
}

impl InMemoryTableAdmin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statuses a newly created table passes through before turning active.
    pub fn with_creation_transitions(self, statuses: impl IntoIterator<Item = TableStatus>) -> Self {
        self.lock().creation_transitions = statuses.into_iter().collect();
        self
    }

    /// Pre-registers a table in a fixed status.
    pub fn with_table(self, name: impl Into<String>, status: TableStatus) -> Self {
        self.lock().tables.insert(
            name.into(),
            TableEntry {
                status,
                pending: VecDeque::new(),
            },
        );
        self
    }

    /// Makes every create request fail with `error`.
    pub fn with_create_error(self, error: ProvisioningError) -> Self {
        self.lock().create_error = Some(error);
        self
    }

    /// Number of create requests received.
    pub fn create_calls(&self) -> u32 {
        self.lock().create_calls
    }

    /// Number of status checks received.
    pub fn status_calls(&self) -> u32 {
        self.lock().status_calls
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AdminState> {
        self.state.lock().expect("Failed to acquire admin state lock")
    }
}

#[async_trait]
impl TableAdmin for InMemoryTableAdmin {
    async fn create_table(
        &self,
        descriptor: &TableDescriptor,
    ) -> Result<CreateTableOutcome, ProvisioningError> {
        descriptor.validate()?;

        let mut state = self.lock();
        state.create_calls += 1;

        if let Some(error) = &state.create_error {
            return Err(error.clone());
        }
        if state.tables.contains_key(&descriptor.table_name) {
            return Ok(CreateTableOutcome::AlreadyExists);
        }

        let mut pending: VecDeque<TableStatus> =
            state.creation_transitions.iter().copied().collect();
        let status = pending.pop_front().unwrap_or(TableStatus::Active);
        if status != TableStatus::Active {
            pending.push_back(TableStatus::Active);
        }
        state
            .tables
            .insert(descriptor.table_name.clone(), TableEntry { status, pending });

        Ok(CreateTableOutcome::Created(status))
    }

    async fn table_status(&self, table_name: &str) -> Result<Option<TableStatus>, ProvisioningError> {
        let mut state = self.lock();
        state.status_calls += 1;

        Ok(state.tables.get_mut(table_name).map(|entry| {
            if let Some(next) = entry.pending.pop_front() {
                entry.status = next;
            }
            entry.status
        }))
    }

    async fn list_tables(&self) -> Result<Vec<String>, ProvisioningError> {
        Ok(self.lock().tables.keys().cloned().collect())
    }
}
