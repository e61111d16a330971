// crates/spanner-admin/src/memory.rs
// ============================================================================
// Module: In-Memory Admin Backend
// Description: Process-local SpannerAdmin implementation with a call log.
// Purpose: Exercise fixtures and cleanup logic without a live service.
// Dependencies: async-trait, tracing
// ============================================================================

//! ## Overview
//! [`InMemoryAdmin`] keeps instances, databases, and backups in ordered maps
//! behind a mutex and records every admin call it receives. Failures can be
//! injected per operation kind to drive error-propagation paths.
//! Invariants:
//! - The backend serves exactly one project; other projects are denied.
//! - Deleting an instance removes every database and backup under it.
//! - Every call is logged before any injected failure is returned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use async_trait::async_trait;
use tracing::debug;

use crate::admin::AdminConnector;
use crate::admin::AdminError;
use crate::admin::Backup;
use crate::admin::Database;
use crate::admin::Instance;
use crate::admin::SpannerAdmin;
use crate::paths::BackupPath;
use crate::paths::DatabasePath;
use crate::paths::InstancePath;
use crate::paths::ProjectPath;

// ============================================================================
// SECTION: Call Log
// ============================================================================

/// Admin operation kinds recorded by the in-memory backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AdminOperation {
    /// Instance lookup.
    GetInstance,
    /// Instance deletion.
    DeleteInstance,
    /// Database lookup.
    GetDatabase,
    /// Database drop.
    DropDatabase,
    /// Backup lookup.
    GetBackup,
    /// Backup deletion.
    DeleteBackup,
}

impl AdminOperation {
    /// Returns a stable label for the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetInstance => "get_instance",
            Self::DeleteInstance => "delete_instance",
            Self::GetDatabase => "get_database",
            Self::DropDatabase => "drop_database",
            Self::GetBackup => "get_backup",
            Self::DeleteBackup => "delete_backup",
        }
    }

    /// Returns true for operations that remove a resource.
    #[must_use]
    pub const fn is_deletion(self) -> bool {
        matches!(self, Self::DeleteInstance | Self::DropDatabase | Self::DeleteBackup)
    }
}

/// A single recorded admin call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCall {
    /// Operation kind.
    pub operation: AdminOperation,
    /// Resource name the call targeted.
    pub name: String,
}

// ============================================================================
// SECTION: Backend
// ============================================================================

/// Mutable backend state guarded by the admin mutex.
#[derive(Debug, Default)]
struct AdminState {
    /// Instances keyed by path.
    instances: BTreeMap<InstancePath, Instance>,
    /// Databases keyed by path.
    databases: BTreeMap<DatabasePath, Database>,
    /// Backups keyed by path.
    backups: BTreeMap<BackupPath, Backup>,
    /// Calls in arrival order.
    calls: Vec<AdminCall>,
    /// Injected failures keyed by operation.
    failures: BTreeMap<AdminOperation, String>,
}

/// In-memory admin backend scoped to one project.
#[derive(Debug)]
pub struct InMemoryAdmin {
    /// Project served by this backend.
    project: ProjectPath,
    /// Resource maps and call log.
    state: Mutex<AdminState>,
}

impl InMemoryAdmin {
    /// Creates an empty backend for `project`.
    #[must_use]
    pub fn new(project: ProjectPath) -> Self {
        Self {
            project,
            state: Mutex::new(AdminState::default()),
        }
    }

    /// Stores instance metadata, replacing any previous entry.
    pub fn insert_instance(&self, instance: Instance) {
        self.lock().instances.insert(instance.name.clone(), instance);
    }

    /// Stores database metadata, replacing any previous entry.
    pub fn insert_database(&self, database: Database) {
        self.lock().databases.insert(database.name.clone(), database);
    }

    /// Stores backup metadata, replacing any previous entry.
    pub fn insert_backup(&self, backup: Backup) {
        self.lock().backups.insert(backup.name.clone(), backup);
    }

    /// Returns true when a resource with the rendered `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        let state = self.lock();
        state.instances.keys().any(|path| path.as_str() == name)
            || state.databases.keys().any(|path| path.as_str() == name)
            || state.backups.keys().any(|path| path.as_str() == name)
    }

    /// Returns every recorded call in arrival order.
    #[must_use]
    pub fn calls(&self) -> Vec<AdminCall> {
        self.lock().calls.clone()
    }

    /// Returns the recorded calls that removed (or tried to remove) a resource.
    #[must_use]
    pub fn deletions(&self) -> Vec<AdminCall> {
        self.lock().calls.iter().filter(|call| call.operation.is_deletion()).cloned().collect()
    }

    /// Fails every subsequent `operation` with [`AdminError::Backend`].
    pub fn fail_on(&self, operation: AdminOperation, message: impl Into<String>) {
        self.lock().failures.insert(operation, message.into());
    }

    /// Removes all injected failures.
    pub fn clear_failures(&self) {
        self.lock().failures.clear();
    }

    /// Locks backend state, recovering from poisoning.
    fn lock(&self) -> MutexGuard<'_, AdminState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a call, then enforces project scope and injected failures.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::PermissionDenied`] for a foreign project and
    /// [`AdminError::Backend`] when a failure is injected for `operation`.
    fn begin(
        &self,
        operation: AdminOperation,
        project_id: &str,
        name: &str,
    ) -> Result<MutexGuard<'_, AdminState>, AdminError> {
        let mut state = self.lock();
        state.calls.push(AdminCall {
            operation,
            name: name.to_string(),
        });
        if project_id != self.project.project_id() {
            return Err(AdminError::PermissionDenied(format!(
                "{name} is outside {}",
                self.project
            )));
        }
        if let Some(message) = state.failures.get(&operation) {
            debug!(operation = operation.as_str(), resource = name, "injected admin failure");
            return Err(AdminError::Backend(message.clone()));
        }
        Ok(state)
    }
}

#[async_trait]
impl SpannerAdmin for InMemoryAdmin {
    fn project(&self) -> &ProjectPath {
        &self.project
    }

    async fn get_instance(&self, name: &InstancePath) -> Result<Instance, AdminError> {
        let state = self.begin(AdminOperation::GetInstance, name.project_id(), name.as_str())?;
        state.instances.get(name).cloned().ok_or_else(|| AdminError::NotFound(name.to_string()))
    }

    async fn delete_instance(&self, name: &InstancePath) -> Result<(), AdminError> {
        let mut state =
            self.begin(AdminOperation::DeleteInstance, name.project_id(), name.as_str())?;
        if state.instances.remove(name).is_none() {
            return Err(AdminError::NotFound(name.to_string()));
        }
        state.databases.retain(|path, _| path.instance() != name);
        state.backups.retain(|path, _| path.instance() != name);
        Ok(())
    }

    async fn get_database(&self, name: &DatabasePath) -> Result<Database, AdminError> {
        let state =
            self.begin(AdminOperation::GetDatabase, name.instance().project_id(), name.as_str())?;
        state.databases.get(name).cloned().ok_or_else(|| AdminError::NotFound(name.to_string()))
    }

    async fn drop_database(&self, name: &DatabasePath) -> Result<(), AdminError> {
        let mut state =
            self.begin(AdminOperation::DropDatabase, name.instance().project_id(), name.as_str())?;
        state
            .databases
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| AdminError::NotFound(name.to_string()))
    }

    async fn get_backup(&self, name: &BackupPath) -> Result<Backup, AdminError> {
        let state =
            self.begin(AdminOperation::GetBackup, name.instance().project_id(), name.as_str())?;
        state.backups.get(name).cloned().ok_or_else(|| AdminError::NotFound(name.to_string()))
    }

    async fn delete_backup(&self, name: &BackupPath) -> Result<(), AdminError> {
        let mut state =
            self.begin(AdminOperation::DeleteBackup, name.instance().project_id(), name.as_str())?;
        state.backups.remove(name).map(|_| ()).ok_or_else(|| AdminError::NotFound(name.to_string()))
    }
}

#[async_trait]
impl AdminConnector for Arc<InMemoryAdmin> {
    async fn connect(&self, project: &ProjectPath) -> Result<Arc<dyn SpannerAdmin>, AdminError> {
        if project != &self.project {
            return Err(AdminError::PermissionDenied(format!(
                "in-memory admin serves {}, not {project}",
                self.project
            )));
        }
        Ok(Arc::clone(self) as Arc<dyn SpannerAdmin>)
    }
}
