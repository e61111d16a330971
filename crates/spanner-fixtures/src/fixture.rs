// crates/spanner-fixtures/src/fixture.rs
// ============================================================================
// Module: Spanner Fixture
// Description: Suite-level fixture that names, tracks, and tears down resources.
// Purpose: Gate suites on configuration and clean up what they create.
// Dependencies: spanner-admin, tracing
// ============================================================================

//! ## Overview
//! [`SpannerFixture`] is created once per suite. Setup checks the environment
//! gate, draws one seed, derives resource names, opens a project-scoped admin
//! client, and resolves the test instance. Teardown removes the suite's
//! backup and every instance the tests registered.
//! Invariants:
//! - The seed is drawn exactly once per fixture.
//! - Not-found lookups are treated as absence; all other errors propagate.
//! - Cleanup that fails midway leaves the tracked instance list intact.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use spanner_admin::AdminConnector;
use spanner_admin::BackupPath;
use spanner_admin::DatabasePath;
use spanner_admin::Instance;
use spanner_admin::InstanceConfigPath;
use spanner_admin::InstancePath;
use spanner_admin::Lookup;
use spanner_admin::PathError;
use spanner_admin::ProjectPath;
use spanner_admin::SpannerAdmin;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::capture::Console;
use crate::capture::capture_into;
use crate::config::FixtureConfig;
use crate::config::Readiness;
use crate::config::SkipReason;
use crate::error::FixtureError;
use crate::names::ResourceNames;
use crate::seed::Seed;
use crate::seed::SeedProvider;

// ============================================================================
// SECTION: Setup Outcome
// ============================================================================

/// Result of suite setup.
#[derive(Debug)]
pub enum Setup {
    /// The environment is configured and the fixture is connected.
    Ready(Box<SpannerFixture>),
    /// The environment is not configured; the suite should not run.
    Skipped(SkipReason),
}

impl Setup {
    /// Returns the fixture, or logs the skip reason and returns `None`.
    #[must_use]
    pub fn into_ready(self) -> Option<SpannerFixture> {
        match self {
            Self::Ready(fixture) => Some(*fixture),
            Self::Skipped(reason) => {
                warn!(reason = %reason, "spanner suite skipped");
                None
            }
        }
    }

    /// Returns the skip reason when the suite is skipped.
    #[must_use]
    pub const fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            Self::Ready(_) => None,
            Self::Skipped(reason) => Some(reason),
        }
    }
}

// ============================================================================
// SECTION: Fixture
// ============================================================================

/// Suite fixture for Spanner integration tests.
pub struct SpannerFixture {
    /// Environment-derived configuration.
    config: FixtureConfig,
    /// Seed-derived resource identifiers.
    names: ResourceNames,
    /// Project-scoped admin client.
    client: Arc<dyn SpannerAdmin>,
    /// Test instance, when it exists.
    instance: Option<Instance>,
    /// Instances created by tests, deleted at teardown.
    created_instance_ids: Vec<String>,
    /// Console that sample code prints through.
    console: Console,
    /// Text recorded by the last capture.
    captured_output: Option<String>,
}

impl SpannerFixture {
    /// Runs suite setup against the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the environment is unreadable or the
    /// admin client fails. A missing environment is not an error.
    pub async fn setup(
        connector: &dyn AdminConnector,
        seeds: &dyn SeedProvider,
    ) -> Result<Setup, FixtureError> {
        Self::setup_with(FixtureConfig::load()?, connector, seeds).await
    }

    /// Runs suite setup for an already-evaluated environment gate.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the admin client fails.
    pub async fn setup_with(
        readiness: Readiness,
        connector: &dyn AdminConnector,
        seeds: &dyn SeedProvider,
    ) -> Result<Setup, FixtureError> {
        match readiness {
            Readiness::Ready(config) => {
                let fixture = Self::connect(config, connector, seeds).await?;
                Ok(Setup::Ready(Box::new(fixture)))
            }
            Readiness::Skip(reason) => {
                debug!(reason = %reason, "spanner fixture not configured");
                Ok(Setup::Skipped(reason))
            }
        }
    }

    /// Connects a fixture for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when a path is invalid, the connector fails,
    /// or the instance lookup fails for a reason other than not-found.
    pub async fn connect(
        config: FixtureConfig,
        connector: &dyn AdminConnector,
        seeds: &dyn SeedProvider,
    ) -> Result<Self, FixtureError> {
        let names = ResourceNames::from_seed(seeds.seed());
        let project = ProjectPath::new(config.project_id.as_str())?;
        let client = connector.connect(&project).await?;
        let instance_path = project.instance(config.instance_id.as_str())?;
        let instance = client.get_instance(&instance_path).await.found()?;
        if instance.is_none() {
            warn!(instance = %instance_path, "test instance not found");
        }
        info!(
            project = %project,
            instance = %instance_path,
            seed = %names.seed(),
            "spanner fixture ready"
        );
        Ok(Self {
            config,
            names,
            client,
            instance,
            created_instance_ids: Vec::new(),
            console: Console::default(),
            captured_output: None,
        })
    }

    /// Replaces the console sample code prints through.
    #[must_use]
    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Returns the run seed.
    #[must_use]
    pub const fn seed(&self) -> &Seed {
        self.names.seed()
    }

    /// Returns the seed-derived resource identifiers.
    #[must_use]
    pub const fn names(&self) -> &ResourceNames {
        &self.names
    }

    /// Returns the configured project id.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.config.project_id
    }

    /// Returns the configured test instance id.
    #[must_use]
    pub fn instance_id(&self) -> &str {
        &self.config.instance_id
    }

    /// Returns the test instance resolved at setup, if it exists.
    #[must_use]
    pub const fn instance(&self) -> Option<&Instance> {
        self.instance.as_ref()
    }

    /// Returns the project-scoped admin client.
    #[must_use]
    pub fn client(&self) -> &dyn SpannerAdmin {
        self.client.as_ref()
    }

    /// Returns the console sample code should print through.
    #[must_use]
    pub const fn console(&self) -> &Console {
        &self.console
    }

    /// Returns the instances registered for teardown.
    #[must_use]
    pub fn created_instance_ids(&self) -> &[String] {
        &self.created_instance_ids
    }

    /// Registers an instance created by a test for deletion at teardown.
    pub fn track_instance(&mut self, instance_id: impl Into<String>) {
        self.created_instance_ids.push(instance_id.into());
    }

    // ------------------------------------------------------------------------
    // Paths
    // ------------------------------------------------------------------------

    /// Returns the project path.
    #[must_use]
    pub fn project_path(&self) -> ProjectPath {
        self.client.project().clone()
    }

    /// Builds an instance path in the fixture's project.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when `instance_id` is empty.
    pub fn instance_path(&self, instance_id: &str) -> Result<InstancePath, PathError> {
        self.client.project().instance(instance_id)
    }

    /// Builds an instance configuration path in the fixture's project.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when `instance_config_id` is empty.
    pub fn instance_config_path(
        &self,
        instance_config_id: &str,
    ) -> Result<InstanceConfigPath, PathError> {
        self.client.project().instance_config(instance_config_id)
    }

    /// Builds a database path under the test instance.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when `database_id` is empty.
    pub fn database_path(&self, database_id: &str) -> Result<DatabasePath, PathError> {
        self.instance_path(&self.config.instance_id)?.database(database_id)
    }

    /// Builds a backup path under the test instance.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when `backup_id` is empty.
    pub fn backup_path(&self, backup_id: &str) -> Result<BackupPath, PathError> {
        self.instance_path(&self.config.instance_id)?.backup(backup_id)
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    /// Fetches instance metadata, returning `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the id is invalid or the lookup fails for
    /// a reason other than not-found.
    pub async fn find_instance(&self, instance_id: &str) -> Result<Option<Instance>, FixtureError> {
        let path = self.instance_path(instance_id)?;
        Ok(self.client.get_instance(&path).await.found()?)
    }

    // ------------------------------------------------------------------------
    // Cleanup
    // ------------------------------------------------------------------------

    /// Deletes every tracked instance that still exists, then clears the list.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] on the first lookup or deletion failure; the
    /// tracked list is left unchanged in that case.
    pub async fn cleanup_instance_resources(&mut self) -> Result<(), FixtureError> {
        for instance_id in &self.created_instance_ids {
            let path = self.instance_path(instance_id)?;
            match self.client.get_instance(&path).await.found()? {
                Some(instance) => {
                    self.client.delete_instance(&instance.name).await?;
                    info!(instance = %instance.name, "deleted tracked instance");
                }
                None => debug!(instance = %path, "tracked instance already gone"),
            }
        }
        self.created_instance_ids.clear();
        Ok(())
    }

    /// Drops the test database and the restored database when they exist.
    ///
    /// Does nothing when the test instance was not found at setup.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when a lookup fails for a reason other than
    /// not-found or a drop fails.
    pub async fn cleanup_database_resources(&self) -> Result<(), FixtureError> {
        let Some(instance) = &self.instance else {
            return Ok(());
        };
        for database_id in [self.names.database_id(), self.names.restored_database_id()] {
            let path = instance.name.database(database_id)?;
            match self.client.get_database(&path).await.found()? {
                Some(database) => {
                    self.client.drop_database(&database.name).await?;
                    info!(database = %database.name, "dropped test database");
                }
                None => debug!(database = %path, "test database not present"),
            }
        }
        Ok(())
    }

    /// Deletes the test backup when it exists.
    ///
    /// Does nothing when the test instance was not found at setup.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the lookup fails for a reason other than
    /// not-found or the deletion fails.
    pub async fn cleanup_backup_resources(&self) -> Result<(), FixtureError> {
        let Some(instance) = &self.instance else {
            return Ok(());
        };
        let path = instance.name.backup(self.names.backup_id())?;
        match self.client.get_backup(&path).await.found()? {
            Some(backup) => {
                self.client.delete_backup(&backup.name).await?;
                info!(backup = %backup.name, "deleted test backup");
            }
            None => debug!(backup = %path, "test backup not present"),
        }
        Ok(())
    }

    /// Suite teardown: removes the test backup, then every tracked instance.
    ///
    /// # Errors
    ///
    /// Returns the first [`FixtureError`] raised by either cleanup step.
    pub async fn teardown(&mut self) -> Result<(), FixtureError> {
        self.cleanup_backup_resources().await?;
        self.cleanup_instance_resources().await
    }

    // ------------------------------------------------------------------------
    // Output Capture
    // ------------------------------------------------------------------------

    /// Runs `work` with the fixture console captured into memory.
    ///
    /// The original console writer is restored even if `work` panics, and
    /// whatever was written before the panic is kept in
    /// [`Self::captured_output`].
    pub fn capture<T, F>(&mut self, work: F) -> T
    where
        F: FnOnce(&Console) -> T,
    {
        capture_into(&self.console, &mut self.captured_output, work)
    }

    /// Returns the text recorded by the last capture.
    #[must_use]
    pub fn captured_output(&self) -> Option<&str> {
        self.captured_output.as_deref()
    }
}

impl fmt::Debug for SpannerFixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpannerFixture")
            .field("config", &self.config)
            .field("names", &self.names)
            .field("instance", &self.instance)
            .field("created_instance_ids", &self.created_instance_ids)
            .finish_non_exhaustive()
    }
}
