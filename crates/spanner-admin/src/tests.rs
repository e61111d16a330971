// crates/spanner-admin/src/tests.rs
// ============================================================================
// Module: Spanner Admin Unit Tests
// Description: Unit coverage for path rendering and not-found conversion.
// Purpose: Pin the private rendering rules that public paths rely on.
// Dependencies: spanner-admin, proptest
// ============================================================================

//! ## Overview
//! Unit tests for crate-private helpers and the [`crate::Lookup`] adapter.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

use proptest::prelude::*;

use crate::AdminError;
use crate::Lookup;
use crate::PathError;
use crate::ProjectPath;

#[test]
fn found_maps_not_found_to_none() {
    let result: Result<u8, AdminError> = Err(AdminError::NotFound("x".to_string()));
    assert_eq!(result.found().unwrap(), None);

    let result: Result<u8, AdminError> = Ok(7);
    assert_eq!(result.found().unwrap(), Some(7));
}

#[test]
fn found_keeps_other_errors() {
    let result: Result<u8, AdminError> = Err(AdminError::Unavailable("down".to_string()));
    let err = result.found().unwrap_err();
    assert!(matches!(err, AdminError::Unavailable(_)));
    assert!(!err.is_not_found());
}

#[test]
fn path_errors_convert_into_admin_errors() {
    let err: AdminError = PathError::EmptySegment {
        key: "project",
    }
    .into();
    assert_eq!(err.to_string(), "invalid resource path: project must not be empty");
}

proptest! {
    #[test]
    fn instance_paths_nest_under_project(
        project in "[a-z][a-z0-9-]{0,20}",
        instance in "[a-z][a-z0-9-]{0,20}",
    ) {
        let project_path = ProjectPath::new(project.clone()).unwrap();
        let instance_path = project_path.instance(instance.clone()).unwrap();
        prop_assert!(instance_path.as_str().starts_with(project_path.as_str()));
        prop_assert_eq!(instance_path.project_id(), project.as_str());
        prop_assert_eq!(instance_path.instance_id(), instance.as_str());
    }
}
