// crates/spanner-fixtures/src/seed.rs
// ============================================================================
// Module: Run Seeds
// Description: Seed providers for collision-resistant resource names.
// Purpose: Inject the seed source instead of hiding it in global state.
// Dependencies: rand
// ============================================================================

//! ## Overview
//! A [`Seed`] is 8 OS-random bytes rendered as 16 lowercase hex characters.
//! Fixtures take a [`SeedProvider`] and ask it exactly once at setup, so the
//! seed a suite names resources with is the seed it reports.
//! Invariants:
//! - [`ProcessSeed`] yields one value per process, generated on first use.
//! - [`RandomSeed`] yields a fresh value on every call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fmt::Write as _;
use std::sync::OnceLock;

use rand::RngCore;
use rand::rngs::OsRng;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Random bytes per seed.
pub const SEED_BYTES: usize = 8;

// ============================================================================
// SECTION: Seed
// ============================================================================

/// Run seed used to derive resource names.
///
/// # Invariants
/// - Opaque string; generated seeds are lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Seed(String);

impl Seed {
    /// Creates a seed from an explicit value.
    #[must_use]
    pub fn new(seed: impl Into<String>) -> Self {
        Self(seed.into())
    }

    /// Generates a fresh seed from the OS random source.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; SEED_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let mut hex = String::with_capacity(SEED_BYTES * 2);
        for byte in bytes {
            let _ = write!(hex, "{byte:02x}");
        }
        Self(hex)
    }

    /// Returns the seed as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Providers
// ============================================================================

/// Source of run seeds.
pub trait SeedProvider: Send + Sync {
    /// Returns a seed.
    fn seed(&self) -> Seed;
}

/// Fresh random seed on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSeed;

impl SeedProvider for RandomSeed {
    fn seed(&self) -> Seed {
        Seed::generate()
    }
}

/// One seed per process, generated lazily and cached.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessSeed;

impl ProcessSeed {
    /// Returns the process-wide seed, generating it on first use.
    #[must_use]
    pub fn get() -> &'static Seed {
        static SEED: OnceLock<Seed> = OnceLock::new();
        SEED.get_or_init(Seed::generate)
    }
}

impl SeedProvider for ProcessSeed {
    fn seed(&self) -> Seed {
        Self::get().clone()
    }
}

/// Always returns the same seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSeed(Seed);

impl FixedSeed {
    /// Creates a provider that always yields `seed`.
    #[must_use]
    pub fn new(seed: impl Into<String>) -> Self {
        Self(Seed::new(seed))
    }
}

impl SeedProvider for FixedSeed {
    fn seed(&self) -> Seed {
        self.0.clone()
    }
}
