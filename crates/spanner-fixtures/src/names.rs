// crates/spanner-fixtures/src/names.rs
// ============================================================================
// Module: Resource Names
// Description: Seed-derived identifiers for per-run test resources.
// Purpose: Keep concurrent runs from colliding on database and backup ids.
// Dependencies: none
// ============================================================================

//! ## Overview
//! All identifiers share the run seed as a suffix, so every resource a run
//! creates can be traced back to it.

use crate::seed::Seed;

/// Prefix of the primary test database id.
pub const DATABASE_PREFIX: &str = "test_db_";
/// Prefix of the test backup id.
pub const BACKUP_PREFIX: &str = "test_bu_";
/// Prefix of the restored database id.
pub const RESTORED_DATABASE_PREFIX: &str = "restored_db_";

/// Identifiers derived from one run seed.
///
/// # Invariants
/// - The three ids are pairwise distinct and end with the same seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    /// Seed every id is derived from.
    seed: Seed,
    /// `test_db_<seed>`.
    database_id: String,
    /// `test_bu_<seed>`.
    backup_id: String,
    /// `restored_db_<seed>`.
    restored_database_id: String,
}

impl ResourceNames {
    /// Derives every identifier from `seed`.
    #[must_use]
    pub fn from_seed(seed: Seed) -> Self {
        Self {
            database_id: format!("{DATABASE_PREFIX}{seed}"),
            backup_id: format!("{BACKUP_PREFIX}{seed}"),
            restored_database_id: format!("{RESTORED_DATABASE_PREFIX}{seed}"),
            seed,
        }
    }

    /// Returns the run seed.
    #[must_use]
    pub const fn seed(&self) -> &Seed {
        &self.seed
    }

    /// Returns the test database id.
    #[must_use]
    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    /// Returns the test backup id.
    #[must_use]
    pub fn backup_id(&self) -> &str {
        &self.backup_id
    }

    /// Returns the restored database id.
    #[must_use]
    pub fn restored_database_id(&self) -> &str {
        &self.restored_database_id
    }
}
