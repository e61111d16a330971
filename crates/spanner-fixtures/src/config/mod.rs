// crates/spanner-fixtures/src/config/mod.rs
// ============================================================================
// Module: Fixture Configuration
// Description: Environment gate for Spanner integration suites.
// Purpose: Decide whether a suite runs and with which project and instance.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Fixture configuration is read from two environment variables and mapped
//! into either a ready [`FixtureConfig`] or an explicit [`SkipReason`].

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::ConfigError;
pub use env::FixtureConfig;
pub use env::FixtureEnv;
pub use env::Readiness;
pub use env::SkipReason;
