// crates/spanner-admin/src/paths.rs
// ============================================================================
// Module: Admin Resource Paths
// Description: Typed resource names for projects, instances, and children.
// Purpose: Render `projects/{project}/...` names from key-value segments.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Resource paths are rendered from ordered `(collection, id)` segments, the
//! same way the vendor admin clients format names. Leading ids may not
//! contain `/` and no id may be empty; everything else is passed through
//! verbatim.
//! Invariants:
//! - A constructed path always renders to a well-formed resource name.
//! - Child paths inherit the parent's project and instance ids unchanged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Resource path construction failures.
///
/// # Invariants
/// - Variants are stable for error classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A path segment was empty or whitespace.
    #[error("{key} must not be empty")]
    EmptySegment {
        /// Template key of the offending segment.
        key: &'static str,
    },
    /// A non-final path segment contained a `/`.
    #[error("{key} cannot contain /")]
    SlashInSegment {
        /// Template key of the offending segment.
        key: &'static str,
    },
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders `(collection, key, id)` segments into a resource name.
///
/// # Errors
///
/// Returns [`PathError`] when a segment is empty or a leading segment contains `/`.
fn render(segments: &[(&str, &'static str, &str)]) -> Result<String, PathError> {
    let last = segments.len().saturating_sub(1);
    let mut name = String::new();
    for (index, &(collection, key, id)) in segments.iter().enumerate() {
        if id.trim().is_empty() {
            return Err(PathError::EmptySegment {
                key,
            });
        }
        if index < last && id.contains('/') {
            return Err(PathError::SlashInSegment {
                key,
            });
        }
        if index > 0 {
            name.push('/');
        }
        name.push_str(collection);
        name.push('/');
        name.push_str(id);
    }
    Ok(name)
}

// ============================================================================
// SECTION: Project
// ============================================================================

/// Project resource name: `projects/{project}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectPath {
    /// Project identifier.
    project: String,
    /// Rendered resource name.
    name: String,
}

impl ProjectPath {
    /// Builds a project path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when the project id is empty.
    pub fn new(project: impl Into<String>) -> Result<Self, PathError> {
        let project = project.into();
        let name = render(&[("projects", "project", &project)])?;
        Ok(Self {
            project,
            name,
        })
    }

    /// Returns the project identifier.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project
    }

    /// Returns the rendered resource name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Builds the path of an instance in this project.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when the instance id is empty or the project id
    /// contains `/`.
    pub fn instance(&self, instance: impl Into<String>) -> Result<InstancePath, PathError> {
        InstancePath::new(self.project.clone(), instance)
    }

    /// Builds the path of an instance configuration in this project.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when the configuration id is empty or the project
    /// id contains `/`.
    pub fn instance_config(
        &self,
        instance_config: impl Into<String>,
    ) -> Result<InstanceConfigPath, PathError> {
        InstanceConfigPath::new(self.project.clone(), instance_config)
    }
}

impl fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

// ============================================================================
// SECTION: Instance Config
// ============================================================================

/// Instance configuration name: `projects/{project}/instanceConfigs/{instance_config}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceConfigPath {
    /// Project identifier.
    project: String,
    /// Instance configuration identifier.
    instance_config: String,
    /// Rendered resource name.
    name: String,
}

impl InstanceConfigPath {
    /// Builds an instance configuration path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when a segment is empty or the project id contains `/`.
    pub fn new(
        project: impl Into<String>,
        instance_config: impl Into<String>,
    ) -> Result<Self, PathError> {
        let project = project.into();
        let instance_config = instance_config.into();
        let name = render(&[
            ("projects", "project", &project),
            ("instanceConfigs", "instance_config", &instance_config),
        ])?;
        Ok(Self {
            project,
            instance_config,
            name,
        })
    }

    /// Returns the project identifier.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project
    }

    /// Returns the instance configuration identifier.
    #[must_use]
    pub fn instance_config_id(&self) -> &str {
        &self.instance_config
    }

    /// Returns the rendered resource name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for InstanceConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

// ============================================================================
// SECTION: Instance
// ============================================================================

/// Instance resource name: `projects/{project}/instances/{instance}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstancePath {
    /// Project identifier.
    project: String,
    /// Instance identifier.
    instance: String,
    /// Rendered resource name.
    name: String,
}

impl InstancePath {
    /// Builds an instance path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when a segment is empty or the project id contains `/`.
    pub fn new(project: impl Into<String>, instance: impl Into<String>) -> Result<Self, PathError> {
        let project = project.into();
        let instance = instance.into();
        let name =
            render(&[("projects", "project", &project), ("instances", "instance", &instance)])?;
        Ok(Self {
            project,
            instance,
            name,
        })
    }

    /// Returns the project identifier.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project
    }

    /// Returns the instance identifier.
    #[must_use]
    pub fn instance_id(&self) -> &str {
        &self.instance
    }

    /// Returns the rendered resource name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Builds the path of a database in this instance.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when the database id is empty or a parent id contains `/`.
    pub fn database(&self, database: impl Into<String>) -> Result<DatabasePath, PathError> {
        DatabasePath::new(self.clone(), database)
    }

    /// Builds the path of a backup in this instance.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when the backup id is empty or a parent id contains `/`.
    pub fn backup(&self, backup: impl Into<String>) -> Result<BackupPath, PathError> {
        BackupPath::new(self.clone(), backup)
    }
}

impl fmt::Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

// ============================================================================
// SECTION: Instance Children
// ============================================================================

/// Database resource name: `projects/{project}/instances/{instance}/databases/{database}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatabasePath {
    /// Parent instance path.
    instance: InstancePath,
    /// Database identifier.
    database: String,
    /// Rendered resource name.
    name: String,
}

impl DatabasePath {
    /// Builds a database path under the given instance.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when a segment is empty or a parent id contains `/`.
    pub fn new(instance: InstancePath, database: impl Into<String>) -> Result<Self, PathError> {
        let database = database.into();
        let name = render(&[
            ("projects", "project", instance.project_id()),
            ("instances", "instance", instance.instance_id()),
            ("databases", "database", &database),
        ])?;
        Ok(Self {
            instance,
            database,
            name,
        })
    }

    /// Returns the parent instance path.
    #[must_use]
    pub const fn instance(&self) -> &InstancePath {
        &self.instance
    }

    /// Returns the database identifier.
    #[must_use]
    pub fn database_id(&self) -> &str {
        &self.database
    }

    /// Returns the rendered resource name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for DatabasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

/// Backup resource name: `projects/{project}/instances/{instance}/backups/{backup}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BackupPath {
    /// Parent instance path.
    instance: InstancePath,
    /// Backup identifier.
    backup: String,
    /// Rendered resource name.
    name: String,
}

impl BackupPath {
    /// Builds a backup path under the given instance.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when a segment is empty or a parent id contains `/`.
    pub fn new(instance: InstancePath, backup: impl Into<String>) -> Result<Self, PathError> {
        let backup = backup.into();
        let name = render(&[
            ("projects", "project", instance.project_id()),
            ("instances", "instance", instance.instance_id()),
            ("backups", "backup", &backup),
        ])?;
        Ok(Self {
            instance,
            backup,
            name,
        })
    }

    /// Returns the parent instance path.
    #[must_use]
    pub const fn instance(&self) -> &InstancePath {
        &self.instance
    }

    /// Returns the backup identifier.
    #[must_use]
    pub fn backup_id(&self) -> &str {
        &self.backup
    }

    /// Returns the rendered resource name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for BackupPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}
