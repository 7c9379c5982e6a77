// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Accrual evaluation for a single employee and leave type.
//!
//! This module provides pure, deterministic balance calculations. The
//! employee's history is flattened into a chronologically sorted event
//! timeline (work-time overrides, tenure rate steps, year boundaries) and
//! the accrual rate is integrated exactly across the segments between
//! events, with rollover and bonus applied at every year boundary.

use crate::date::{Date, add_months, days_between};
use crate::rational::Rational;
use crate::types::{Employee, LeaveType};
use time::Month;

/// A point on the accrual timeline.
///
/// The variant order is load-bearing: events sharing a date are applied
/// in declaration order, so a work-time change lands before a rate step,
/// a rate step before that day's year boundary, and the terminator last.
/// A rule taking effect on January 1 therefore changes the rate before
/// the same day's rollover runs.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TimelineEvent {
    /// The effective work-time fraction changes.
    WorkTimeChange {
        /// The fraction in force after this event.
        percent: Rational,
    },
    /// A tenure rule makes a new accrual rate current.
    RateChange {
        /// The rate in force after this event, in days per year.
        days_per_year: Rational,
    },
    /// Year-end rollover followed by the yearly bonus.
    YearBoundary,
    /// The query date; integration stops here.
    QueryEnd,
}

impl TimelineEvent {
    /// Tie-break ordinal for events sharing a date.
    const fn precedence(&self) -> u8 {
        match self {
            Self::WorkTimeChange { .. } => 0,
            Self::RateChange { .. } => 1,
            Self::YearBoundary => 2,
            Self::QueryEnd => 3,
        }
    }
}

/// The smoothed year length used for integration: exactly 365.24 days.
fn average_year_days() -> Rational {
    Rational::from_integer(36524) / Rational::from_integer(100)
}

/// Flattens an employee's history against one leave type into a sorted
/// event timeline ending at `query_date`.
fn build_timeline(
    employee: &Employee,
    leave_type: &LeaveType,
    query_date: Date,
) -> Vec<(Date, TimelineEvent)> {
    let mut events: Vec<(Date, TimelineEvent)> = Vec::new();

    for extra in employee.extra_time.iter().filter(|extra| extra.valid) {
        events.push((
            extra.begin,
            TimelineEvent::WorkTimeChange {
                percent: extra.percent.clone(),
            },
        ));
        events.push((
            extra.end,
            TimelineEvent::WorkTimeChange {
                percent: employee.work_time.clone(),
            },
        ));
    }

    for rule in leave_type.rules.iter().filter(|rule| rule.valid) {
        // start_month is 1-based: the rate holds from start_month - 1
        // whole months after the hire date. A rule whose effective date
        // is past the representable calendar cannot matter before any
        // query date, so it emits no event.
        if let Some(effective) = add_months(employee.start_date, rule.start_month.saturating_sub(1))
        {
            events.push((
                effective,
                TimelineEvent::RateChange {
                    days_per_year: rule.days_per_year.clone(),
                },
            ));
        }
    }

    events.push((employee.start_date, TimelineEvent::YearBoundary));
    let mut year = employee.start_date.year() + 1;
    while let Ok(boundary) = Date::from_calendar_date(year, Month::January, 1) {
        if boundary > query_date {
            break;
        }
        events.push((boundary, TimelineEvent::YearBoundary));
        year += 1;
    }

    events.push((query_date, TimelineEvent::QueryEnd));

    // Stable sort: same-date, same-precedence events keep generation
    // order, which decides between an interval ending and another one
    // starting on the same day.
    events.sort_by_key(|(date, event)| (*date, event.precedence()));
    events
}

/// Integrates the accrual timeline and returns the balance accrued up to
/// `query_date`, before any taken days are charged against it.
///
/// This is a pure, deterministic calculation. Between events the balance
/// grows by `days / 365.24` years at the current days-per-year rate
/// scaled by the current work-time fraction. Each year boundary first
/// caps the balance at the leave type's rollover (unless the rollover is
/// negative, which carries everything over) and then adds the yearly
/// bonus.
///
/// # Arguments
///
/// * `employee` - The employee to evaluate
/// * `leave_type` - The leave type whose policy applies
/// * `query_date` - The date the balance is accrued up to
#[must_use]
pub fn accrued_balance(employee: &Employee, leave_type: &LeaveType, query_date: Date) -> Rational {
    let mut accrued = Rational::zero();
    let mut rate = Rational::zero();
    let mut percent = employee.work_time.clone();
    let mut cursor = employee.start_date;

    for (date, event) in build_timeline(employee, leave_type, query_date) {
        let elapsed = Rational::from_integer(days_between(cursor, date));
        accrued += elapsed / average_year_days() * rate.clone() * percent.clone();
        cursor = date;

        match event {
            TimelineEvent::WorkTimeChange {
                percent: new_percent,
            } => percent = new_percent,
            TimelineEvent::RateChange { days_per_year } => rate = days_per_year,
            TimelineEvent::YearBoundary => {
                if !leave_type.rollover.is_negative() && accrued > leave_type.rollover {
                    accrued = leave_type.rollover.clone();
                }
                accrued += leave_type.yearly_bonus.clone();
            }
            TimelineEvent::QueryEnd => break,
        }
    }

    accrued
}

/// Returns the balance available on `query_date`: the accrued total minus
/// every taken day recorded on or before that date.
///
/// # Arguments
///
/// * `employee` - The employee to evaluate
/// * `leave_type` - The leave type whose policy applies
/// * `leave_slot` - The leave type's dense slot index, selecting the
///   matching taken-day vector on the employee
/// * `query_date` - The date the balance is evaluated on
#[must_use]
pub fn available_balance(
    employee: &Employee,
    leave_type: &LeaveType,
    leave_slot: usize,
    query_date: Date,
) -> Rational {
    let mut balance = accrued_balance(employee, leave_type, query_date);

    if let Some(taken) = employee.days_taken.get(leave_slot) {
        for day in taken.iter().filter(|day| day.date <= query_date) {
            balance -= day.amount.clone();
        }
    }

    balance
}
