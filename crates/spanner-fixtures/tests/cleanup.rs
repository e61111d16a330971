// crates/spanner-fixtures/tests/cleanup.rs
// ============================================================================
// Module: Fixture Cleanup Tests
// Description: Tests for instance, database, and backup teardown.
// Purpose: Validate best-effort cleanup and error propagation.
// Dependencies: spanner-admin, spanner-fixtures, tokio
// ============================================================================
//! ## Overview
//! Cleanup must skip resources that are already gone, delete the rest, and
//! surface every failure that is not a not-found.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

mod common;

use spanner_admin::AdminCall;
use spanner_admin::AdminError;
use spanner_admin::AdminOperation;
use spanner_admin::Backup;
use spanner_admin::Database;
use spanner_admin::Instance;
use spanner_fixtures::FixtureError;
use spanner_fixtures::SpannerFixture;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn deletion(operation: AdminOperation, name: &str) -> AdminCall {
    AdminCall {
        operation,
        name: name.to_string(),
    }
}

fn seed_databases(admin: &spanner_admin::InMemoryAdmin, fixture: &SpannerFixture) {
    for id in [fixture.names().database_id(), fixture.names().restored_database_id()] {
        admin.insert_database(Database {
            name: fixture.database_path(id).unwrap(),
        });
    }
}

fn seed_backup(admin: &spanner_admin::InMemoryAdmin, fixture: &SpannerFixture) {
    admin.insert_backup(Backup {
        name: fixture.backup_path(fixture.names().backup_id()).unwrap(),
        database: Some(fixture.database_path(fixture.names().database_id()).unwrap()),
    });
}

// ============================================================================
// SECTION: Instances
// ============================================================================

#[tokio::test]
async fn empty_instance_list_makes_no_calls() {
    let admin = common::backend();
    let mut fixture = common::fixture(&admin).await;
    let before = admin.calls().len();

    fixture.cleanup_instance_resources().await.expect("cleanup");

    assert_eq!(admin.calls().len(), before);
    assert!(fixture.created_instance_ids().is_empty());
}

#[tokio::test]
async fn tracked_instances_are_deleted_and_list_cleared() {
    let admin = common::backend();
    let mut fixture = common::fixture(&admin).await;
    let created = fixture.instance_path("created-1").unwrap();
    admin.insert_instance(Instance::new(created.clone()));
    fixture.track_instance("created-1");
    fixture.track_instance("never-created");

    fixture.cleanup_instance_resources().await.expect("cleanup");

    assert_eq!(admin.deletions(), vec![deletion(AdminOperation::DeleteInstance, created.as_str())]);
    assert!(!admin.contains(created.as_str()));
    assert!(fixture.created_instance_ids().is_empty());
}

#[tokio::test]
async fn failed_instance_deletion_keeps_the_list() {
    let admin = common::backend();
    let mut fixture = common::fixture(&admin).await;
    admin.insert_instance(Instance::new(fixture.instance_path("created-1").unwrap()));
    fixture.track_instance("created-1");
    fixture.track_instance("created-2");
    admin.fail_on(AdminOperation::DeleteInstance, "instance is locked");

    let err = fixture.cleanup_instance_resources().await.unwrap_err();
    assert!(matches!(err, FixtureError::Admin(AdminError::Backend(_))));
    assert_eq!(fixture.created_instance_ids(), ["created-1", "created-2"]);

    admin.clear_failures();
    fixture.cleanup_instance_resources().await.expect("retry succeeds");
    assert!(fixture.created_instance_ids().is_empty());
}

// ============================================================================
// SECTION: Databases
// ============================================================================

#[tokio::test]
async fn database_cleanup_drops_both_databases() {
    let admin = common::backend();
    let fixture = common::fixture(&admin).await;
    seed_databases(&admin, &fixture);

    fixture.cleanup_database_resources().await.expect("cleanup");

    let database = fixture.database_path(fixture.names().database_id()).unwrap();
    let restored = fixture.database_path(fixture.names().restored_database_id()).unwrap();
    assert_eq!(
        admin.deletions(),
        vec![
            deletion(AdminOperation::DropDatabase, database.as_str()),
            deletion(AdminOperation::DropDatabase, restored.as_str()),
        ]
    );
    assert!(!admin.contains(database.as_str()));
    assert!(!admin.contains(restored.as_str()));
}

#[tokio::test]
async fn database_cleanup_skips_absent_databases() {
    let admin = common::backend();
    let fixture = common::fixture(&admin).await;

    fixture.cleanup_database_resources().await.expect("absent databases are not an error");

    assert!(admin.deletions().is_empty());
}

#[tokio::test]
async fn database_cleanup_propagates_drop_failures() {
    let admin = common::backend();
    let fixture = common::fixture(&admin).await;
    seed_databases(&admin, &fixture);
    admin.fail_on(AdminOperation::DropDatabase, "database in use");

    let err = fixture.cleanup_database_resources().await.unwrap_err();
    assert!(matches!(err, FixtureError::Admin(AdminError::Backend(_))));
}

// ============================================================================
// SECTION: Backups
// ============================================================================

#[tokio::test]
async fn backup_cleanup_deletes_the_test_backup() {
    let admin = common::backend();
    let fixture = common::fixture(&admin).await;
    seed_backup(&admin, &fixture);

    fixture.cleanup_backup_resources().await.expect("cleanup");

    let backup = fixture.backup_path(fixture.names().backup_id()).unwrap();
    assert_eq!(admin.deletions(), vec![deletion(AdminOperation::DeleteBackup, backup.as_str())]);
}

#[tokio::test]
async fn backup_cleanup_skips_absent_backup() {
    let admin = common::backend();
    let fixture = common::fixture(&admin).await;

    fixture.cleanup_backup_resources().await.expect("absent backup is not an error");

    assert!(admin.deletions().is_empty());
}

#[tokio::test]
async fn backup_lookup_failures_propagate() {
    let admin = common::backend();
    let fixture = common::fixture(&admin).await;
    admin.fail_on(AdminOperation::GetBackup, "deadline exceeded");

    let err = fixture.cleanup_backup_resources().await.unwrap_err();
    assert!(matches!(err, FixtureError::Admin(AdminError::Backend(_))));
}

// ============================================================================
// SECTION: Missing Test Instance
// ============================================================================

#[tokio::test]
async fn cleanup_without_test_instance_is_a_no_op() {
    let admin = common::empty_backend();
    let fixture = common::fixture(&admin).await;
    let before = admin.calls().len();

    fixture.cleanup_database_resources().await.expect("database cleanup");
    fixture.cleanup_backup_resources().await.expect("backup cleanup");

    assert_eq!(admin.calls().len(), before);
}

// ============================================================================
// SECTION: Teardown
// ============================================================================

#[tokio::test]
async fn teardown_removes_backup_before_instances() {
    let admin = common::backend();
    let mut fixture = common::fixture(&admin).await;
    seed_backup(&admin, &fixture);
    let created = fixture.instance_path("created-1").unwrap();
    admin.insert_instance(Instance::new(created.clone()));
    fixture.track_instance("created-1");

    fixture.teardown().await.expect("teardown");

    let backup = fixture.backup_path(fixture.names().backup_id()).unwrap();
    assert_eq!(
        admin.deletions(),
        vec![
            deletion(AdminOperation::DeleteBackup, backup.as_str()),
            deletion(AdminOperation::DeleteInstance, created.as_str()),
        ]
    );
    assert!(fixture.created_instance_ids().is_empty());
}

#[tokio::test]
async fn teardown_leaves_databases_to_explicit_cleanup() {
    let admin = common::backend();
    let mut fixture = common::fixture(&admin).await;
    seed_databases(&admin, &fixture);

    fixture.teardown().await.expect("teardown");

    let database = fixture.database_path(fixture.names().database_id()).unwrap();
    assert!(admin.contains(database.as_str()));
}
