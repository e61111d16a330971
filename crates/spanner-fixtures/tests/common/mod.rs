// crates/spanner-fixtures/tests/common/mod.rs
// ============================================================================
// Module: Fixture Test Helpers
// Description: Shared backends, fixtures, and buffers for fixture tests.
// Purpose: Build connected fixtures against the in-memory admin backend.
// Dependencies: spanner-admin, spanner-fixtures, tracing, tracing-subscriber
// ============================================================================

//! ## Overview
//! Shared helpers for the fixture integration tests.

#![allow(
    dead_code,
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Shared helpers are reused across multiple test suites."
)]

use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use spanner_admin::InMemoryAdmin;
use spanner_admin::Instance;
use spanner_admin::ProjectPath;
use spanner_fixtures::FixedSeed;
use spanner_fixtures::FixtureConfig;
use spanner_fixtures::Readiness;
use spanner_fixtures::SpannerFixture;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Project the in-memory backend serves.
pub const PROJECT: &str = "test-project";
/// Pre-provisioned test instance.
pub const INSTANCE: &str = "test-instance";
/// Seed used by fixtures built with [`fixture`].
pub const SEED: &str = "c0ffee00deadbeef";

// ============================================================================
// SECTION: Setup Helpers
// ============================================================================

/// Installs a test-writer tracing subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Runs `work` under a scoped subscriber and returns its formatted log lines.
pub fn capture_logs<T>(work: impl FnOnce() -> T) -> (T, String) {
    let logs = SharedBuffer::new();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    let value = tracing::subscriber::with_default(subscriber, work);
    (value, logs.to_string_lossy())
}

/// Returns a ready environment gate for the test project and instance.
pub fn ready() -> Readiness {
    Readiness::Ready(FixtureConfig {
        project_id: PROJECT.to_string(),
        instance_id: INSTANCE.to_string(),
    })
}

/// Returns a backend that already holds the test instance.
pub fn backend() -> Arc<InMemoryAdmin> {
    let admin = empty_backend();
    let instance = ProjectPath::new(PROJECT).unwrap().instance(INSTANCE).unwrap();
    admin.insert_instance(Instance::new(instance));
    admin
}

/// Returns a backend with no resources.
pub fn empty_backend() -> Arc<InMemoryAdmin> {
    Arc::new(InMemoryAdmin::new(ProjectPath::new(PROJECT).unwrap()))
}

/// Connects a fixture against `admin` with the fixed [`SEED`].
pub async fn fixture(admin: &Arc<InMemoryAdmin>) -> SpannerFixture {
    init_tracing();
    SpannerFixture::setup_with(ready(), admin, &FixedSeed::new(SEED))
        .await
        .expect("setup")
        .into_ready()
        .expect("fixture should be ready")
}

// ============================================================================
// SECTION: Shared Buffer
// ============================================================================

/// Thread-safe buffer used as a console's original writer.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates a new empty shared buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the contents as a string.
    pub fn to_string_lossy(&self) -> String {
        let guard = self.inner.lock().expect("buffer lock");
        String::from_utf8_lossy(&guard).to_string()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.lock().expect("buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
