// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::EntityStore;
use leave_bank_domain::{Date, EmployeeId, LeaveTypeId, Rational, make_date};

pub fn rational(text: &str) -> Rational {
    Rational::parse(text).unwrap_or_else(|_| panic!("'{text}' should parse"))
}

pub fn day(year: u16, month: u16, day: u16) -> Date {
    make_date(year, month, day).unwrap_or_else(|_| panic!("{year}-{month}-{day} should be valid"))
}

/// Returns `true` when `value` is within `epsilon` of `expected`.
pub fn within(value: &Rational, expected: &str, epsilon: &str) -> bool {
    (value.clone() - rational(expected)).abs() <= rational(epsilon)
}

pub fn create_test_employee(store: &mut EntityStore) -> EmployeeId {
    store.add_employee(String::from("Bob"), day(2016, 10, 31), rational("1"))
}

pub fn create_test_leave_type(store: &mut EntityStore) -> LeaveTypeId {
    store.add_leave_type(String::from("Vacation"), rational("0"), rational("10.25"))
}
