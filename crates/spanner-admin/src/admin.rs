// crates/spanner-admin/src/admin.rs
// ============================================================================
// Module: Spanner Admin Interface
// Description: Project-scoped admin client seam for instances, databases, backups.
// Purpose: Let fixtures resolve and delete resources without binding to an SDK.
// Dependencies: async-trait, thiserror
// ============================================================================

//! ## Overview
//! The admin seam mirrors the handful of admin RPCs a test harness needs:
//! resolve an instance, database, or backup by path and delete it. Wire
//! protocol, authentication, and retries belong to whichever SDK implements
//! [`SpannerAdmin`]; this crate only fixes the shape of the calls and the
//! error classification.
//! Invariants:
//! - A client handle is scoped to exactly one project.
//! - "Not found" is reported as [`AdminError::NotFound`] and nothing else.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::paths::BackupPath;
use crate::paths::DatabasePath;
use crate::paths::InstanceConfigPath;
use crate::paths::InstancePath;
use crate::paths::PathError;
use crate::paths::ProjectPath;

// ============================================================================
// SECTION: Resource Metadata
// ============================================================================

/// Instance metadata returned by the admin service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    /// Instance resource name.
    pub name: InstancePath,
    /// Instance configuration, when reported.
    pub config: Option<InstanceConfigPath>,
    /// Human-readable display name.
    pub display_name: String,
    /// Provisioned node count.
    pub node_count: u32,
}

impl Instance {
    /// Builds instance metadata with the display name set to the instance id.
    #[must_use]
    pub fn new(name: InstancePath) -> Self {
        let display_name = name.instance_id().to_string();
        Self {
            name,
            config: None,
            display_name,
            node_count: 1,
        }
    }
}

/// Database metadata returned by the admin service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    /// Database resource name.
    pub name: DatabasePath,
}

/// Backup metadata returned by the admin service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    /// Backup resource name.
    pub name: BackupPath,
    /// Source database, when reported.
    pub database: Option<DatabasePath>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Admin client failures.
///
/// # Invariants
/// - Variants are stable for error classification.
/// - Only [`AdminError::NotFound`] may be converted to an absent result.
#[derive(Debug, Error)]
pub enum AdminError {
    /// The named resource does not exist.
    #[error("resource not found: {0}")]
    NotFound(String),
    /// The caller is not permitted to access the resource.
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// The admin service could not be reached.
    #[error("admin service unavailable: {0}")]
    Unavailable(String),
    /// A resource path could not be built.
    #[error("invalid resource path: {0}")]
    InvalidPath(#[from] PathError),
    /// The admin service rejected or failed the request.
    #[error("admin request failed: {0}")]
    Backend(String),
}

impl AdminError {
    /// Returns true when the error is the typed not-found condition.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Converts admin lookups into optional results.
pub trait Lookup<T> {
    /// Maps [`AdminError::NotFound`] to `Ok(None)` and keeps every other error.
    ///
    /// # Errors
    ///
    /// Returns the original [`AdminError`] unless it is a not-found error.
    fn found(self) -> Result<Option<T>, AdminError>;
}

impl<T> Lookup<T> for Result<T, AdminError> {
    fn found(self) -> Result<Option<T>, AdminError> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}

// ============================================================================
// SECTION: Admin Traits
// ============================================================================

/// Project-scoped admin client.
#[async_trait]
pub trait SpannerAdmin: Send + Sync {
    /// Returns the project this client is scoped to.
    fn project(&self) -> &ProjectPath;

    /// Fetches instance metadata.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] when the instance does not exist, or
    /// another [`AdminError`] when the request fails.
    async fn get_instance(&self, name: &InstancePath) -> Result<Instance, AdminError>;

    /// Deletes an instance together with its databases and backups.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError`] when the instance is missing or the request fails.
    async fn delete_instance(&self, name: &InstancePath) -> Result<(), AdminError>;

    /// Fetches database metadata.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] when the database does not exist, or
    /// another [`AdminError`] when the request fails.
    async fn get_database(&self, name: &DatabasePath) -> Result<Database, AdminError>;

    /// Drops a database.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError`] when the database is missing or the request fails.
    async fn drop_database(&self, name: &DatabasePath) -> Result<(), AdminError>;

    /// Fetches backup metadata.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] when the backup does not exist, or
    /// another [`AdminError`] when the request fails.
    async fn get_backup(&self, name: &BackupPath) -> Result<Backup, AdminError>;

    /// Deletes a backup.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError`] when the backup is missing or the request fails.
    async fn delete_backup(&self, name: &BackupPath) -> Result<(), AdminError>;
}

/// Opens project-scoped admin clients.
#[async_trait]
pub trait AdminConnector: Send + Sync {
    /// Connects a client scoped to `project`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError`] when the client cannot be created for the project.
    async fn connect(&self, project: &ProjectPath) -> Result<Arc<dyn SpannerAdmin>, AdminError>;
}
