// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The on-disk document model.
//!
//! The document is a self-describing JSON tree: dates are year/month/day
//! triples, quantities are canonical rational strings, and tombstoned
//! records are written out with their `valid` flag so slot indices (and
//! therefore identifiers) survive a round trip. Quantities are stored as
//! plain strings and re-parsed when the store is rebuilt, so a malformed
//! quantity is reported as its own error rather than as a generic decode
//! failure.

use crate::error::PersistenceError;
use leave_bank::EntityStore;
use leave_bank_domain::{
    AccrualRule, Date, Employee, ExtraTime, LeaveType, Rational, TakenDay,
};
use serde::{Deserialize, Serialize};
use time::Month;

/// The document format version this build reads and writes.
pub const FORMAT_VERSION: u32 = 1;

/// A calendar date as stored in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRecord {
    /// The calendar year.
    pub year: i32,
    /// The calendar month, 1 through 12.
    pub month: u8,
    /// The day of the month.
    pub day: u8,
}

impl DateRecord {
    fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: u8::from(date.month()),
            day: date.day(),
        }
    }

    fn into_date(self) -> Result<Date, PersistenceError> {
        let invalid = || PersistenceError::InvalidDate {
            year: self.year,
            month: self.month,
            day: self.day,
        };
        let month = Month::try_from(self.month).map_err(|_| invalid())?;
        Date::from_calendar_date(self.year, month, self.day).map_err(|_| invalid())
    }
}

/// An extra-work-time interval as stored in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraTimeRecord {
    /// First day the override applies.
    pub begin: DateRecord,
    /// Day the override ends.
    pub end: DateRecord,
    /// The overriding work-time fraction, canonical.
    pub percent: String,
    /// Whether the interval is live.
    pub valid: bool,
}

/// A taken-day record as stored in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakenDayRecord {
    /// The day the leave was taken.
    pub date: DateRecord,
    /// How many days were consumed, canonical.
    pub amount: String,
}

/// An employee as stored in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Display name.
    pub name: String,
    /// Hire date.
    pub start_date: DateRecord,
    /// Base work-time fraction, canonical.
    pub work_time: String,
    /// Work-time override intervals, tombstones included.
    pub extra_time: Vec<ExtraTimeRecord>,
    /// Taken days, one vector per leave-type slot.
    pub days_taken: Vec<Vec<TakenDayRecord>>,
    /// Whether the employee is live.
    pub valid: bool,
}

/// An accrual rule as stored in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    /// 1-based month of employment in which the rate takes effect.
    pub start_month: u32,
    /// The accrual rate in days per year, canonical.
    pub days_per_year: String,
    /// Whether the rule is live.
    pub valid: bool,
}

/// A leave type as stored in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveTypeRecord {
    /// Display name.
    pub name: String,
    /// Year-boundary carry-over cap, canonical.
    pub rollover: String,
    /// Flat grant added at every year boundary, canonical.
    pub yearly_bonus: String,
    /// Rate steps, tombstones included.
    pub rules: Vec<RuleRecord>,
    /// Whether the leave type is live.
    pub valid: bool,
}

/// The document root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseDocument {
    /// Format version, checked on load.
    pub version: u32,
    /// All employee slots in slot order.
    pub employees: Vec<EmployeeRecord>,
    /// All leave-type slots in slot order.
    pub leave_types: Vec<LeaveTypeRecord>,
}

impl DatabaseDocument {
    /// Captures a store into its document form.
    #[must_use]
    pub fn from_store(store: &EntityStore) -> Self {
        Self {
            version: FORMAT_VERSION,
            employees: store.employees().iter().map(employee_record).collect(),
            leave_types: store.leave_types().iter().map(leave_type_record).collect(),
        }
    }

    /// Rebuilds the store the document describes.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UnsupportedVersion` for a document from
    /// a different format version, `PersistenceError::InvalidDate` if a
    /// stored date does not name a real calendar day, or
    /// `PersistenceError::InvalidNumber` if a stored quantity fails
    /// rational parsing.
    pub fn into_store(self) -> Result<EntityStore, PersistenceError> {
        if self.version != FORMAT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: self.version,
                expected: FORMAT_VERSION,
            });
        }

        let employees = self
            .employees
            .into_iter()
            .map(restore_employee)
            .collect::<Result<Vec<_>, _>>()?;
        let leave_types = self
            .leave_types
            .into_iter()
            .map(restore_leave_type)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EntityStore::from_parts(employees, leave_types))
    }
}

fn parse_quantity(value: &str) -> Result<Rational, PersistenceError> {
    Rational::parse(value).map_err(|_| PersistenceError::InvalidNumber {
        value: value.to_string(),
    })
}

fn employee_record(employee: &Employee) -> EmployeeRecord {
    EmployeeRecord {
        name: employee.name.clone(),
        start_date: DateRecord::from_date(employee.start_date),
        work_time: employee.work_time.to_string(),
        extra_time: employee
            .extra_time
            .iter()
            .map(|extra| ExtraTimeRecord {
                begin: DateRecord::from_date(extra.begin),
                end: DateRecord::from_date(extra.end),
                percent: extra.percent.to_string(),
                valid: extra.valid,
            })
            .collect(),
        days_taken: employee
            .days_taken
            .iter()
            .map(|slot| {
                slot.iter()
                    .map(|taken| TakenDayRecord {
                        date: DateRecord::from_date(taken.date),
                        amount: taken.amount.to_string(),
                    })
                    .collect()
            })
            .collect(),
        valid: employee.valid,
    }
}

fn leave_type_record(leave_type: &LeaveType) -> LeaveTypeRecord {
    LeaveTypeRecord {
        name: leave_type.name.clone(),
        rollover: leave_type.rollover.to_string(),
        yearly_bonus: leave_type.yearly_bonus.to_string(),
        rules: leave_type
            .rules
            .iter()
            .map(|rule| RuleRecord {
                start_month: rule.start_month,
                days_per_year: rule.days_per_year.to_string(),
                valid: rule.valid,
            })
            .collect(),
        valid: leave_type.valid,
    }
}

fn restore_employee(record: EmployeeRecord) -> Result<Employee, PersistenceError> {
    let extra_time = record
        .extra_time
        .into_iter()
        .map(|extra| {
            Ok(ExtraTime {
                begin: extra.begin.into_date()?,
                end: extra.end.into_date()?,
                percent: parse_quantity(&extra.percent)?,
                valid: extra.valid,
            })
        })
        .collect::<Result<Vec<_>, PersistenceError>>()?;

    let days_taken = record
        .days_taken
        .into_iter()
        .map(|slot| {
            slot.into_iter()
                .map(|taken| {
                    Ok(TakenDay::new(
                        taken.date.into_date()?,
                        parse_quantity(&taken.amount)?,
                    ))
                })
                .collect::<Result<Vec<_>, PersistenceError>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Employee {
        name: record.name,
        start_date: record.start_date.into_date()?,
        work_time: parse_quantity(&record.work_time)?,
        extra_time,
        days_taken,
        valid: record.valid,
    })
}

fn restore_leave_type(record: LeaveTypeRecord) -> Result<LeaveType, PersistenceError> {
    let rules = record
        .rules
        .into_iter()
        .map(|rule| {
            Ok(AccrualRule {
                start_month: rule.start_month,
                days_per_year: parse_quantity(&rule.days_per_year)?,
                valid: rule.valid,
            })
        })
        .collect::<Result<Vec<_>, PersistenceError>>()?;

    Ok(LeaveType {
        name: record.name,
        rollover: parse_quantity(&record.rollover)?,
        yearly_bonus: parse_quantity(&record.yearly_bonus)?,
        rules,
        valid: record.valid,
    })
}
