// crates/spanner-fixtures/src/config/env.rs
// ============================================================================
// Module: Fixture Environment
// Description: Environment-backed configuration for Spanner fixtures.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Both variables must be present for a suite to run. A missing or blank
//! variable is not an error: it produces [`Readiness::Skip`] so suites can
//! bail out without failing. Invalid UTF-8 fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::fmt;

use thiserror::Error;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for fixture configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureEnv {
    /// Project that owns the test instance.
    Project,
    /// Pre-provisioned instance the suite runs against.
    TestInstance,
}

impl FixtureEnv {
    /// Every fixture variable, in reporting order.
    pub const ALL: [Self; 2] = [Self::Project, Self::TestInstance];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "GOOGLE_CLOUD_SPANNER_PROJECT",
            Self::TestInstance => "GOOGLE_CLOUD_SPANNER_TEST_INSTANCE",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed fixture configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureConfig {
    /// Project identifier.
    pub project_id: String,
    /// Test instance identifier.
    pub instance_id: String,
}

/// Why a suite is skipped.
///
/// # Invariants
/// - `missing` is non-empty and ordered as [`FixtureEnv::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipReason {
    /// Variables that were unset or blank.
    missing: Vec<FixtureEnv>,
}

impl SkipReason {
    /// Returns the variables that were unset or blank.
    #[must_use]
    pub fn missing(&self) -> &[FixtureEnv] {
        &self.missing
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, name) in self.missing.iter().enumerate() {
            if index > 0 {
                f.write_str(" and ")?;
            }
            f.write_str(name.as_str())?;
        }
        f.write_str(" not defined")
    }
}

/// Outcome of the environment gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// Both variables are present.
    Ready(FixtureConfig),
    /// At least one variable is missing; the suite should be skipped.
    Skip(SkipReason),
}

/// Configuration errors.
///
/// # Invariants
/// - Variants are stable for error classification.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment value is not valid UTF-8.
    #[error("{name} must be valid UTF-8")]
    InvalidUtf8 {
        /// Variable name.
        name: &'static str,
    },
}

impl FixtureConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but not valid UTF-8.
    pub fn load() -> Result<Readiness, ConfigError> {
        Self::load_with(|name| std::env::var_os(name))
    }

    /// Loads configuration through `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but not valid UTF-8.
    pub fn load_with<F>(lookup: F) -> Result<Readiness, ConfigError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let project_id = read_nonempty(&lookup, FixtureEnv::Project)?;
        let instance_id = read_nonempty(&lookup, FixtureEnv::TestInstance)?;
        match (project_id, instance_id) {
            (Some(project_id), Some(instance_id)) => Ok(Readiness::Ready(Self {
                project_id,
                instance_id,
            })),
            (project_id, instance_id) => {
                let mut missing = Vec::with_capacity(FixtureEnv::ALL.len());
                if project_id.is_none() {
                    missing.push(FixtureEnv::Project);
                }
                if instance_id.is_none() {
                    missing.push(FixtureEnv::TestInstance);
                }
                Ok(Readiness::Skip(SkipReason {
                    missing,
                }))
            }
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a fixture variable through `lookup`, treating blank values as unset.
///
/// # Errors
///
/// Returns [`ConfigError`] when the value is not valid UTF-8.
fn read_nonempty<F>(lookup: &F, key: FixtureEnv) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<OsString>,
{
    let name = key.as_str();
    Ok(decode(name, lookup(name))?.filter(|value| !value.trim().is_empty()))
}

/// Converts a raw environment value into UTF-8.
///
/// # Errors
///
/// Returns [`ConfigError`] when the value is not valid UTF-8.
fn decode(name: &'static str, raw: Option<OsString>) -> Result<Option<String>, ConfigError> {
    raw.map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| ConfigError::InvalidUtf8 {
            name,
        })
    })
}
