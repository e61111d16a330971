// crates/spanner-fixtures/src/lib.rs
// ============================================================================
// Module: Spanner Fixtures Library
// Description: Suite fixtures for Spanner integration tests.
// Purpose: Gate suites on environment, name resources, and clean them up.
// Dependencies: spanner-admin, rand, thiserror, tracing
// ============================================================================

//! ## Overview
//! This crate hosts the shared fixture used by Spanner integration suites.
//! A suite calls [`SpannerFixture::setup`] once. It gets back either a
//! connected fixture or a [`SkipReason`]. When the suite is done, it calls
//! [`SpannerFixture::teardown`].
//! Invariants:
//! - Missing environment configuration skips a suite; it never fails it.
//! - Resource names derive from one seed drawn once per fixture.
//! - Cleanup ignores resources that are already gone and propagates every
//!   other admin error.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod capture;
pub mod config;
pub mod error;
pub mod fixture;
pub mod names;
pub mod seed;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use capture::Console;
pub use capture::OutputCapture;
pub use config::ConfigError;
pub use config::FixtureConfig;
pub use config::FixtureEnv;
pub use config::Readiness;
pub use config::SkipReason;
pub use error::FixtureError;
pub use fixture::Setup;
pub use fixture::SpannerFixture;
pub use names::ResourceNames;
pub use seed::FixedSeed;
pub use seed::ProcessSeed;
pub use seed::RandomSeed;
pub use seed::Seed;
pub use seed::SeedProvider;
