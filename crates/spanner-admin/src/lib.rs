// crates/spanner-admin/src/lib.rs
// ============================================================================
// Module: Spanner Admin Library
// Description: Admin client seam, resource paths, and an in-memory backend.
// Purpose: Give test fixtures a typed, SDK-agnostic view of Spanner admin calls.
// Dependencies: async-trait, thiserror, tracing
// ============================================================================

//! ## Overview
//! `spanner-admin` defines the [`SpannerAdmin`] and [`AdminConnector`] traits
//! that vendor SDK adapters implement, the typed resource paths those calls
//! take, and [`InMemoryAdmin`] for offline use.
//! Invariants:
//! - Resource paths are validated at construction.
//! - Not-found is the only admin error that may be treated as absence; see
//!   [`Lookup::found`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod admin;
pub mod memory;
pub mod paths;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use admin::AdminConnector;
pub use admin::AdminError;
pub use admin::Backup;
pub use admin::Database;
pub use admin::Instance;
pub use admin::Lookup;
pub use admin::SpannerAdmin;
pub use memory::AdminCall;
pub use memory::AdminOperation;
pub use memory::InMemoryAdmin;
pub use paths::BackupPath;
pub use paths::DatabasePath;
pub use paths::InstanceConfigPath;
pub use paths::InstancePath;
pub use paths::PathError;
pub use paths::ProjectPath;

#[cfg(test)]
mod tests;
