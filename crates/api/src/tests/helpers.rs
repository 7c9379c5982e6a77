// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Database;
use leave_bank_domain::{EmployeeId, LeaveTypeId, Rational};

/// Returns `true` when the canonical string `value` is within `epsilon`
/// of `expected`.
pub fn within(value: &str, expected: &str, epsilon: &str) -> bool {
    let value = Rational::parse(value).unwrap();
    let expected = Rational::parse(expected).unwrap();
    let epsilon = Rational::parse(epsilon).unwrap();
    (value - expected).abs() <= epsilon
}

pub fn create_test_employee(db: &mut Database) -> EmployeeId {
    db.add_employee("Bob", 2016, 10, 31, "1").unwrap()
}

pub fn create_test_leave_type(db: &mut Database) -> LeaveTypeId {
    db.add_leave_type("Vacation", "0", "10.25").unwrap()
}
