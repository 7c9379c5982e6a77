// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Balance queries over the entity store.

use crate::store::EntityStore;
use leave_bank_domain::{Date, DomainError, EmployeeId, LeaveTypeId, Rational, available_balance};

/// Returns the balance of one leave type available to an employee on the
/// given date.
///
/// # Errors
///
/// Returns `DomainError::InvalidIndex` if either identifier is out of
/// range or refers to a tombstoned record.
pub fn query_balance(
    store: &EntityStore,
    employee: EmployeeId,
    leave_type: LeaveTypeId,
    on: Date,
) -> Result<Rational, DomainError> {
    let person = store.employee(employee)?;
    let policy = store.leave_type(leave_type)?;
    Ok(available_balance(person, policy, leave_type.index(), on))
}

/// Returns the balance of every live leave type available to an employee
/// on the given date, paired with the leave type's name, in insertion
/// order.
///
/// # Errors
///
/// Returns `DomainError::InvalidIndex` if the employee identifier is out
/// of range or refers to a tombstoned record.
pub fn query_all_balances(
    store: &EntityStore,
    employee: EmployeeId,
    on: Date,
) -> Result<Vec<(String, Rational)>, DomainError> {
    let person = store.employee(employee)?;

    Ok(store
        .valid_leave_types()
        .map(|(id, policy)| {
            (
                policy.name.clone(),
                available_balance(person, policy, id.index(), on),
            )
        })
        .collect())
}
