// crates/spanner-fixtures/src/error.rs
// ============================================================================
// Module: Fixture Errors
// Description: Error type surfaced by fixture setup, lookup, and cleanup.
// Purpose: Classify failures that must reach the test framework.
// Dependencies: spanner-admin, thiserror
// ============================================================================

//! Error type surfaced by fixture setup, lookup, and cleanup.

use spanner_admin::AdminError;
use spanner_admin::PathError;
use thiserror::Error;

use crate::config::ConfigError;

/// Fixture failures.
///
/// Not-found lookups never appear here; they are reported as absent values.
///
/// # Invariants
/// - Variants are stable for error classification.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Environment configuration is unreadable.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A resource path could not be built.
    #[error(transparent)]
    Path(#[from] PathError),
    /// The admin client failed.
    #[error(transparent)]
    Admin(#[from] AdminError),
}
