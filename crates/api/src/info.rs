// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-model structures returned by the database surface.
//!
//! These carry the same textual and triple forms the mutators accept:
//! quantities are canonical rational strings and dates are year/month/day
//! triples. Tombstoned nested records are filtered out, while the
//! embedded identifiers keep their original slot indices.

use leave_bank_domain::{
    Date, Employee, EmployeeId, ExtraTimeId, LeaveType, LeaveTypeId, RuleId, TakenDay,
};

/// One extra-work-time interval of an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraTimeInfo {
    /// The interval's identifier.
    pub id: ExtraTimeId,
    /// Year the override begins.
    pub start_year: u16,
    /// Month the override begins.
    pub start_month: u16,
    /// Day the override begins.
    pub start_day: u16,
    /// Year the override ends.
    pub end_year: u16,
    /// Month the override ends.
    pub end_month: u16,
    /// Day the override ends.
    pub end_day: u16,
    /// The overriding work-time fraction, canonical.
    pub percent: String,
}

/// An employee as reported by `get_employee_info` and
/// `list_employee_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeInfo {
    /// The employee's identifier.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Hire year.
    pub start_year: u16,
    /// Hire month.
    pub start_month: u16,
    /// Hire day.
    pub start_day: u16,
    /// Base work-time fraction, canonical.
    pub work_time: String,
    /// Live extra-work-time intervals.
    pub extra_work_time: Vec<ExtraTimeInfo>,
}

impl EmployeeInfo {
    pub(crate) fn from_record(id: EmployeeId, employee: &Employee) -> Self {
        let (start_year, start_month, start_day) = date_triple(employee.start_date);
        let extra_work_time = employee
            .extra_time
            .iter()
            .enumerate()
            .filter(|(_, interval)| interval.valid)
            .map(|(index, interval)| {
                let (start_year, start_month, start_day) = date_triple(interval.begin);
                let (end_year, end_month, end_day) = date_triple(interval.end);
                ExtraTimeInfo {
                    id: ExtraTimeId::new(index),
                    start_year,
                    start_month,
                    start_day,
                    end_year,
                    end_month,
                    end_day,
                    percent: interval.percent.to_string(),
                }
            })
            .collect();

        Self {
            id,
            name: employee.name.clone(),
            start_year,
            start_month,
            start_day,
            work_time: employee.work_time.to_string(),
            extra_work_time,
        }
    }
}

/// One accrual rule of a leave type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo {
    /// The rule's identifier.
    pub id: RuleId,
    /// 1-based month of employment in which the rate takes effect.
    pub start_month: u32,
    /// The accrual rate in days per year, canonical.
    pub days_per_year: String,
}

/// A leave type as reported by `get_leave_type_info` and
/// `list_leave_type_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveTypeInfo {
    /// The leave type's identifier.
    pub id: LeaveTypeId,
    /// Display name.
    pub name: String,
    /// Year-boundary carry-over cap, canonical.
    pub rollover: String,
    /// Flat grant added at every year boundary, canonical.
    pub yearly_bonus: String,
    /// Live accrual rules.
    pub rules: Vec<RuleInfo>,
}

impl LeaveTypeInfo {
    pub(crate) fn from_record(id: LeaveTypeId, leave_type: &LeaveType) -> Self {
        let rules = leave_type
            .rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.valid)
            .map(|(index, rule)| RuleInfo {
                id: RuleId::new(index),
                start_month: rule.start_month,
                days_per_year: rule.days_per_year.to_string(),
            })
            .collect();

        Self {
            id,
            name: leave_type.name.clone(),
            rollover: leave_type.rollover.to_string(),
            yearly_bonus: leave_type.yearly_bonus.to_string(),
            rules,
        }
    }
}

/// One taken-day record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakenDayInfo {
    /// Year of the taken day.
    pub year: u16,
    /// Month of the taken day.
    pub month: u16,
    /// Day of the month of the taken day.
    pub day: u16,
    /// The amount consumed, canonical.
    pub amount: String,
}

impl TakenDayInfo {
    pub(crate) fn from_record(taken: &TakenDay) -> Self {
        let (year, month, day) = date_triple(taken.date);
        Self {
            year,
            month,
            day,
            amount: taken.amount.to_string(),
        }
    }
}

/// One leave type's available balance, as returned by the all-types
/// query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveBalance {
    /// The leave type's display name.
    pub leave_type: String,
    /// The available balance, canonical.
    pub balance: String,
}

fn date_triple(date: Date) -> (u16, u16, u16) {
    (
        u16::try_from(date.year()).unwrap_or(0),
        u16::from(u8::from(date.month())),
        u16::from(date.day()),
    )
}
