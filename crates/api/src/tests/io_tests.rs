// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Gate semantics: status reporting, background tasks, and clearing.

use super::helpers::{create_test_employee, create_test_leave_type};
use crate::{Database, IoOperation, PersistenceError};
use std::path::Path;

#[test]
fn test_fresh_database_reports_idle_status() {
    let db = Database::new();

    let status = db.io_status();
    assert_eq!(status.operation, IoOperation::None);
    assert!(status.progress.abs() < f32::EPSILON);
    assert_eq!(db.current_file_name(), Path::new("leavebank.json"));
}

#[test]
fn test_operation_codes_match_the_status_contract() {
    assert_eq!(IoOperation::None.code(), 0);
    assert_eq!(IoOperation::Load.code(), 1);
    assert_eq!(IoOperation::Save.code(), 2);
}

#[test]
fn test_save_and_load_round_trip_through_the_facade() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("bank.json");

    let mut db = Database::new();
    let employee = create_test_employee(&mut db);
    let leave = create_test_leave_type(&mut db);
    db.add_taken_day(employee, leave, 2016, 11, 1, "1").unwrap();
    db.save(&path).unwrap();

    let status = db.io_status();
    assert_eq!(status.operation, IoOperation::Save);
    assert!((status.progress - 1.0).abs() < f32::EPSILON);
    assert_eq!(db.current_file_name(), path);

    let mut restored = Database::new();
    restored.load(&path).unwrap();

    assert_eq!(restored.io_status().operation, IoOperation::Load);
    assert_eq!(restored.current_file_name(), path);
    assert_eq!(restored.list_employee_names(), vec!["Bob"]);
    assert_eq!(restored.list_leave_type_names(), vec!["Vacation"]);
    assert_eq!(restored.list_taken_days(employee, leave).unwrap().len(), 1);
    assert_eq!(
        restored
            .query_available_days(employee, leave, 2016, 10, 31)
            .unwrap(),
        "41/4"
    );
}

#[test]
fn test_next_operation_parks_until_the_async_load_lands() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("bank.json");

    let mut db = Database::new();
    create_test_employee(&mut db);
    db.save(&path).unwrap();

    let mut late = Database::new();
    late.load_async(&path);

    // The count operation blocks until the background load finished, so
    // it always observes the loaded store.
    assert_eq!(late.get_employee_count(), 1);
    assert_eq!(late.io_status().operation, IoOperation::Load);
}

#[test]
fn test_failed_sync_load_surfaces_the_error_and_keeps_the_store() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("absent.json");

    let mut db = Database::new();
    create_test_employee(&mut db);

    assert!(matches!(db.load(&path), Err(PersistenceError::Io { .. })));
    assert_eq!(db.get_employee_count(), 1);
}

#[test]
fn test_failed_async_load_is_absorbed_and_keeps_the_store() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("absent.json");

    let mut db = Database::new();
    create_test_employee(&mut db);
    db.load_async(&path);

    assert_eq!(db.get_employee_count(), 1);
}

#[test]
fn test_clear_resets_store_file_name_and_status() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("bank.json");

    let mut db = Database::new();
    create_test_employee(&mut db);
    create_test_leave_type(&mut db);
    db.save(&path).unwrap();

    db.clear();

    assert_eq!(db.get_employee_count(), 0);
    assert_eq!(db.get_leave_type_count(), 0);
    assert_eq!(db.current_file_name(), Path::new("leavebank.json"));
    let status = db.io_status();
    assert_eq!(status.operation, IoOperation::None);
    assert!(status.progress.abs() < f32::EPSILON);
}

#[test]
fn test_clear_waits_out_an_async_save() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("bank.json");

    let mut db = Database::new();
    create_test_employee(&mut db);
    db.save_async(&path);
    db.clear();

    // The save ran to completion before the clear finished, so the file
    // holds the pre-clear store.
    let mut restored = Database::new();
    restored.load(&path).unwrap();
    assert_eq!(restored.get_employee_count(), 1);
}
