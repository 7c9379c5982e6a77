// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod accrual;
mod date;
mod error;
mod rational;
mod types;

pub use accrual::{accrued_balance, available_balance};
pub use date::{Date, add_months, days_between, make_date};
pub use error::DomainError;
pub use rational::Rational;
pub use types::{
    AccrualRule, Employee, EmployeeId, ExtraTime, ExtraTimeId, LeaveType, LeaveTypeId, RuleId,
    TakenDay,
};
