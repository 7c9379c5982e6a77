// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entity types for the leave database.
//!
//! Records live in append-only vectors and are identified by their slot
//! index. Deleting a record flips its `valid` bit but never moves or
//! reuses the slot, so identifiers handed out earlier stay meaningful.

use crate::date::Date;
use crate::rational::Rational;

/// Identifies an employee by its slot in the employee vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmployeeId {
    index: usize,
}

impl EmployeeId {
    /// Creates an identifier from a raw slot index.
    ///
    /// The index is not checked here; the next store operation validates
    /// it and rejects dangling or out-of-range identifiers.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    /// Returns the raw slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

/// Identifies a leave type by its slot in the leave-type vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeaveTypeId {
    index: usize,
}

impl LeaveTypeId {
    /// Creates an identifier from a raw slot index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    /// Returns the raw slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

/// Identifies an accrual rule within one leave type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId {
    index: usize,
}

impl RuleId {
    /// Creates an identifier from a raw slot index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    /// Returns the raw slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

/// Identifies an extra-work-time interval within one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtraTimeId {
    index: usize,
}

impl ExtraTimeId {
    /// Creates an identifier from a raw slot index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    /// Returns the raw slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

/// A bounded interval during which an employee's effective work-time
/// fraction is overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraTime {
    /// First day the override applies.
    pub begin: Date,
    /// Day the override ends and the base work time resumes.
    pub end: Date,
    /// The overriding work-time fraction.
    pub percent: Rational,
    /// Cleared when the interval is removed.
    pub valid: bool,
}

impl ExtraTime {
    /// Creates a live extra-work-time interval.
    #[must_use]
    pub const fn new(begin: Date, end: Date, percent: Rational) -> Self {
        Self {
            begin,
            end,
            percent,
            valid: true,
        }
    }
}

/// A single leave withdrawal (or, with a negative amount, a grant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakenDay {
    /// The day the leave was taken.
    pub date: Date,
    /// How many days were consumed.
    pub amount: Rational,
}

impl TakenDay {
    /// Creates a taken-day record.
    #[must_use]
    pub const fn new(date: Date, amount: Rational) -> Self {
        Self { date, amount }
    }
}

/// A tenure-dependent accrual rate step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccrualRule {
    /// The 1-based month of employment in which this rate takes effect:
    /// a rule with `start_month` 1 applies from the hire date, one with
    /// `start_month` 13 applies from the first anniversary.
    pub start_month: u32,
    /// The accrual rate while this rule is current, in days per year.
    pub days_per_year: Rational,
    /// Cleared when the rule is removed.
    pub valid: bool,
}

impl AccrualRule {
    /// Creates a live accrual rule.
    #[must_use]
    pub const fn new(start_month: u32, days_per_year: Rational) -> Self {
        Self {
            start_month,
            days_per_year,
            valid: true,
        }
    }
}

/// A category of leave (vacation, sick, personal, ...) with its accrual
/// policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveType {
    /// Display name, also used for find-by-name lookups.
    pub name: String,
    /// Year-boundary carry-over cap; a negative value means the whole
    /// balance carries over.
    pub rollover: Rational,
    /// Flat grant added at every year boundary.
    pub yearly_bonus: Rational,
    /// Tenure-dependent rate steps.
    pub rules: Vec<AccrualRule>,
    /// Cleared when the leave type is deleted.
    pub valid: bool,
}

impl LeaveType {
    /// Creates a live leave type with no rules.
    #[must_use]
    pub const fn new(name: String, rollover: Rational, yearly_bonus: Rational) -> Self {
        Self {
            name,
            rollover,
            yearly_bonus,
            rules: Vec::new(),
            valid: true,
        }
    }
}

/// An employee and everything recorded against them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Display name, also used for find-by-name lookups.
    pub name: String,
    /// Hire date; accrual starts here.
    pub start_date: Date,
    /// Base work-time fraction, typically in `[0, 1]`.
    pub work_time: Rational,
    /// Intervals overriding the base work time.
    pub extra_time: Vec<ExtraTime>,
    /// Taken-day records, one vector per leave-type slot. The outer
    /// vector is indexed by the dense leave-type slot number and keeps
    /// entries for tombstoned slots so indices never shift.
    pub days_taken: Vec<Vec<TakenDay>>,
    /// Cleared when the employee is deleted.
    pub valid: bool,
}

impl Employee {
    /// Creates a live employee with one empty taken-day vector per
    /// existing leave-type slot.
    #[must_use]
    pub fn new(name: String, start_date: Date, work_time: Rational, leave_slots: usize) -> Self {
        Self {
            name,
            start_date,
            work_time,
            extra_time: Vec::new(),
            days_taken: vec![Vec::new(); leave_slots],
            valid: true,
        }
    }
}
