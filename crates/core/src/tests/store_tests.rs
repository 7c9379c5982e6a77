// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_employee, create_test_leave_type, day, rational};
use crate::EntityStore;
use leave_bank_domain::{
    AccrualRule, DomainError, EmployeeId, ExtraTime, ExtraTimeId, LeaveTypeId, RuleId, TakenDay,
};

#[test]
fn test_add_and_delete_employee_updates_count() {
    let mut store = EntityStore::new();
    let id = create_test_employee(&mut store);
    assert_eq!(store.employee_count(), 1);

    store.delete_employee(id).unwrap();
    assert_eq!(store.employee_count(), 0);
}

#[test]
fn test_employee_fields_survive_round_trip() {
    let mut store = EntityStore::new();
    let id = store.add_employee(
        String::from("Employee Name"),
        day(2015, 2, 23),
        rational("2"),
    );

    let employee = store.employee(id).unwrap();
    assert_eq!(employee.name, "Employee Name");
    assert_eq!(employee.start_date, day(2015, 2, 23));
    assert_eq!(employee.work_time, rational("2"));
    assert!(employee.extra_time.is_empty());
}

#[test]
fn test_employee_edits_apply_in_place() {
    let mut store = EntityStore::new();
    let id = store.add_employee(String::new(), day(1400, 1, 1), rational("1/2"));

    store.rename_employee(id, String::from("blah")).unwrap();
    store.set_employee_start_date(id, day(1401, 2, 2)).unwrap();
    store.set_employee_work_time(id, rational("2/1")).unwrap();

    let employee = store.employee(id).unwrap();
    assert_eq!(employee.name, "blah");
    assert_eq!(employee.start_date, day(1401, 2, 2));
    assert_eq!(employee.work_time, rational("2"));
}

#[test]
fn test_extra_time_add_and_remove() {
    let mut store = EntityStore::new();
    let id = store.add_employee(String::new(), day(1400, 1, 1), rational("1"));

    let extra = store
        .add_extra_time(
            id,
            ExtraTime::new(day(2000, 1, 1), day(2001, 2, 2), rational("2")),
        )
        .unwrap();

    let employee = store.employee(id).unwrap();
    assert_eq!(employee.extra_time.len(), 1);
    assert!(employee.extra_time[extra.index()].valid);

    store.remove_extra_time(id, extra).unwrap();
    let employee = store.employee(id).unwrap();
    assert!(!employee.extra_time[extra.index()].valid);

    // A tombstoned interval cannot be removed twice.
    assert!(matches!(
        store.remove_extra_time(id, extra),
        Err(DomainError::InvalidIndex {
            entity: "extra time",
            ..
        })
    ));
}

#[test]
fn test_find_employee_returns_first_exact_match() {
    let mut store = EntityStore::new();
    store.add_employee(String::from("George Costanz"), day(1400, 1, 1), rational("1"));
    store.add_employee(String::from("George Costanzb"), day(1400, 1, 1), rational("1"));
    store.add_employee(String::from("George Costanzas"), day(1400, 1, 1), rational("1"));
    let wanted = store.add_employee(String::from("George Costanza"), day(1400, 1, 1), rational("1"));

    assert_eq!(store.find_employee("George Costanza").unwrap(), wanted);
}

#[test]
fn test_find_employee_skips_tombstones_and_returns_new_id() {
    let mut store = EntityStore::new();
    store.add_employee(String::from("George Costanz"), day(1400, 1, 1), rational("1"));
    let doomed = store.add_employee(String::from("George Costanza"), day(1400, 1, 1), rational("1"));
    store.add_employee(String::from("George Costanzas"), day(1400, 1, 1), rational("1"));
    let replacement =
        store.add_employee(String::from("George Costanza"), day(1400, 1, 1), rational("1"));
    store.delete_employee(doomed).unwrap();

    assert_eq!(store.find_employee("George Costanza").unwrap(), replacement);
}

#[test]
fn test_find_deleted_employee_reports_not_found() {
    let mut store = EntityStore::new();
    let id = store.add_employee(String::from("George Costanza"), day(1400, 1, 1), rational("1"));
    store.delete_employee(id).unwrap();

    assert!(matches!(
        store.find_employee("George Costanza"),
        Err(DomainError::EmployeeNotFound { .. })
    ));
}

#[test]
fn test_listing_skips_tombstones_and_keeps_original_ids() {
    let mut store = EntityStore::new();
    let first = store.add_employee(String::from("Name1"), day(1400, 1, 1), rational("1"));
    let second = store.add_employee(String::from("Name2"), day(1401, 2, 2), rational("2"));
    let third = store.add_employee(String::from("Name3"), day(1402, 3, 3), rational("3"));
    store.delete_employee(second).unwrap();

    let listed: Vec<_> = store.valid_employees().collect();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].0, first);
    assert_eq!(listed[0].1.name, "Name1");
    assert_eq!(listed[1].0, third);
    assert_eq!(listed[1].1.name, "Name3");
    assert_eq!(store.employee_count(), listed.len());
}

#[test]
fn test_employee_ids_are_stable_across_unrelated_mutations() {
    let mut store = EntityStore::new();
    let first = store.add_employee(String::from("Name1"), day(1400, 1, 1), rational("1"));
    let doomed = store.add_employee(String::from("Name2"), day(1401, 2, 2), rational("1"));
    store.delete_employee(doomed).unwrap();
    let third = store.add_employee(String::from("Name3"), day(1402, 3, 3), rational("1"));
    create_test_leave_type(&mut store);

    assert_eq!(store.employee(first).unwrap().name, "Name1");
    assert_eq!(store.employee(third).unwrap().name, "Name3");
    assert_eq!(third.index(), 2);
}

#[test]
fn test_adding_leave_type_extends_every_employee() {
    let mut store = EntityStore::new();
    let live = create_test_employee(&mut store);
    let dead = store.add_employee(String::from("Gone"), day(2016, 1, 1), rational("1"));
    store.delete_employee(dead).unwrap();

    assert!(store.employees()[live.index()].days_taken.is_empty());

    let leave = create_test_leave_type(&mut store);

    assert_eq!(store.employees()[live.index()].days_taken.len(), 1);
    assert_eq!(store.employees()[dead.index()].days_taken.len(), 1);
    assert!(store.employees()[live.index()].days_taken[leave.index()].is_empty());
}

#[test]
fn test_deleting_leave_type_clears_slot_but_keeps_indices() {
    let mut store = EntityStore::new();
    let employee = create_test_employee(&mut store);
    let vacation = store.add_leave_type(String::from("Vacation"), rational("0"), rational("5"));
    let sick = store.add_leave_type(String::from("Sick"), rational("0"), rational("5"));

    store
        .add_taken_day(
            employee,
            vacation,
            TakenDay::new(day(2016, 11, 1), rational("1")),
        )
        .unwrap();
    store
        .add_taken_day(employee, sick, TakenDay::new(day(2016, 11, 2), rational("1")))
        .unwrap();

    store.delete_leave_type(vacation).unwrap();

    let person = store.employee(employee).unwrap();
    assert_eq!(person.days_taken.len(), 2);
    assert!(person.days_taken[vacation.index()].is_empty());
    assert_eq!(person.days_taken[sick.index()].len(), 1);

    // The surviving leave type keeps its original identifier.
    assert_eq!(store.find_leave_type("Sick").unwrap(), sick);
    assert_eq!(sick.index(), 1);
}

#[test]
fn test_leave_type_catalog_mirrors_employee_catalog() {
    let mut store = EntityStore::new();
    store.add_leave_type(String::from("Vacation"), rational("0"), rational("5"));
    let doomed = store.add_leave_type(String::from("Blh"), rational("2"), rational("212"));
    store.add_leave_type(String::from("Sick"), rational("1"), rational("6"));
    store.delete_leave_type(doomed).unwrap();

    let listed: Vec<_> = store.valid_leave_types().collect();
    assert_eq!(store.leave_type_count(), 2);
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].1.name, "Vacation");
    assert_eq!(listed[1].1.name, "Sick");
    assert!(matches!(
        store.find_leave_type("Blh"),
        Err(DomainError::LeaveTypeNotFound { .. })
    ));
}

#[test]
fn test_rule_add_and_remove() {
    let mut store = EntityStore::new();
    let leave = store.add_leave_type(String::from("Sick"), rational("0"), rational("5"));

    let rule = store
        .add_rule(leave, AccrualRule::new(5, rational("10")))
        .unwrap();

    let policy = store.leave_type(leave).unwrap();
    assert_eq!(policy.rules.len(), 1);
    assert_eq!(policy.rules[rule.index()].start_month, 5);
    assert_eq!(policy.rules[rule.index()].days_per_year, rational("10"));

    store.remove_rule(leave, rule).unwrap();
    assert!(!store.leave_type(leave).unwrap().rules[rule.index()].valid);

    assert!(matches!(
        store.remove_rule(leave, rule),
        Err(DomainError::InvalidIndex {
            entity: "accrual rule",
            ..
        })
    ));
}

#[test]
fn test_taken_day_removal_matches_date_only() {
    let mut store = EntityStore::new();
    let employee = create_test_employee(&mut store);
    let leave = create_test_leave_type(&mut store);

    store
        .add_taken_day(employee, leave, TakenDay::new(day(2016, 11, 1), rational("1")))
        .unwrap();
    store
        .add_taken_day(
            employee,
            leave,
            TakenDay::new(day(2016, 11, 1), rational("1/2")),
        )
        .unwrap();

    store.remove_taken_day(employee, leave, day(2016, 11, 1)).unwrap();
    let taken = store.taken_days(employee, leave).unwrap();
    assert_eq!(taken.len(), 1);
    assert_eq!(taken[0].amount, rational("1/2"));

    // Removing a date with no record is a silent no-op.
    store.remove_taken_day(employee, leave, day(2016, 12, 25)).unwrap();
    assert_eq!(store.taken_days(employee, leave).unwrap().len(), 1);
}

#[test]
fn test_operations_on_tombstoned_records_report_invalid_index() {
    let mut store = EntityStore::new();
    let employee = create_test_employee(&mut store);
    let leave = create_test_leave_type(&mut store);
    store.delete_employee(employee).unwrap();
    store.delete_leave_type(leave).unwrap();

    assert!(matches!(
        store.employee(employee),
        Err(DomainError::InvalidIndex { entity: "employee", .. })
    ));
    assert!(matches!(
        store.rename_employee(employee, String::from("x")),
        Err(DomainError::InvalidIndex { .. })
    ));
    assert!(matches!(
        store.leave_type(leave),
        Err(DomainError::InvalidIndex { entity: "leave type", .. })
    ));
    assert!(matches!(
        store.add_rule(leave, AccrualRule::new(1, rational("1"))),
        Err(DomainError::InvalidIndex { .. })
    ));
}

#[test]
fn test_out_of_range_ids_on_fresh_store_report_invalid_index() {
    let store = EntityStore::new();

    assert!(matches!(
        store.employee(EmployeeId::new(1)),
        Err(DomainError::InvalidIndex { entity: "employee", index: 1 })
    ));
    assert!(matches!(
        store.leave_type(LeaveTypeId::new(0)),
        Err(DomainError::InvalidIndex { entity: "leave type", index: 0 })
    ));
}

#[test]
fn test_nested_ids_are_validated_against_their_parent() {
    let mut store = EntityStore::new();
    let employee = create_test_employee(&mut store);
    let leave = create_test_leave_type(&mut store);

    assert!(matches!(
        store.remove_extra_time(employee, ExtraTimeId::new(0)),
        Err(DomainError::InvalidIndex { entity: "extra time", .. })
    ));
    assert!(matches!(
        store.remove_rule(leave, RuleId::new(3)),
        Err(DomainError::InvalidIndex { entity: "accrual rule", .. })
    ));
}

#[test]
fn test_clear_resets_everything() {
    let mut store = EntityStore::new();
    let employee = create_test_employee(&mut store);
    create_test_leave_type(&mut store);

    store.clear();

    assert_eq!(store.employee_count(), 0);
    assert_eq!(store.leave_type_count(), 0);
    assert!(matches!(
        store.employee(employee),
        Err(DomainError::InvalidIndex { .. })
    ));
}

#[test]
fn test_from_parts_pads_missing_taken_day_slots() {
    let mut seeded = EntityStore::new();
    create_test_employee(&mut seeded);
    let mut employees = seeded.employees().to_vec();
    employees[0].days_taken.clear();

    let mut with_types = EntityStore::new();
    create_test_leave_type(&mut with_types);
    let rebuilt = EntityStore::from_parts(employees, with_types.leave_types().to_vec());

    assert_eq!(rebuilt.employees()[0].days_taken.len(), 1);
}
