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

//! The public surface of the Leave Bank database.
//!
//! [`Database`] is an embedded, in-memory store that tracks how much of
//! each user-defined leave type every employee has available on a given
//! date. All quantities cross this boundary as canonical rational
//! strings, all dates as year/month/day triples, and all balances are
//! exact: the arithmetic underneath is arbitrary-precision rational.
//!
//! Operations on one handle are totally ordered by program order, and
//! every operation first waits for any background load or save to finish.
//! Sharing one handle between threads is not a supported configuration;
//! wrap the handle in a lock of your own if you need that.

#[cfg(test)]
mod tests;

mod gate;
mod info;

use gate::{IoGate, IoOutcome};
use leave_bank::{EntityStore, query_all_balances, query_balance};
use leave_bank_domain::{AccrualRule, ExtraTime, Rational, TakenDay, make_date};
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{info, warn};

pub use gate::{IoOperation, IoStatus};
pub use info::{
    EmployeeInfo, ExtraTimeInfo, LeaveBalance, LeaveTypeInfo, RuleInfo, TakenDayInfo,
};
pub use leave_bank_domain::{DomainError, EmployeeId, ExtraTimeId, LeaveTypeId, RuleId};
pub use leave_bank_persistence::PersistenceError;

/// The file name used until a load or save names another one.
const DEFAULT_FILE_NAME: &str = "leavebank.json";

/// An embedded leave-accrual database.
///
/// Employees accrue leave against user-defined leave types: each leave
/// type carries tenure-dependent accrual rates, a year-boundary rollover
/// policy, and a yearly bonus, while each employee carries a hire date, a
/// work-time fraction with dated overrides, and the days already taken.
/// The balance query integrates all of that exactly.
pub struct Database {
    store: EntityStore,
    file_name: PathBuf,
    gate: IoGate,
}

impl Database {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: EntityStore::new(),
            file_name: PathBuf::from(DEFAULT_FILE_NAME),
            gate: IoGate::new(),
        }
    }

    /// Parks until any background load or save has finished, folding a
    /// completed load into the store. A failed background task is logged
    /// and the store is left unchanged.
    fn block_if_locked(&mut self) {
        if let Some(result) = self.gate.wait() {
            match result {
                Ok(outcome) => self.absorb(outcome),
                Err(failure) => warn!(%failure, "background I/O task failed"),
            }
        }
    }

    fn wait_for_result(&mut self) -> Result<(), PersistenceError> {
        match self.gate.wait() {
            Some(Ok(outcome)) => {
                self.absorb(outcome);
                Ok(())
            }
            Some(Err(failure)) => Err(failure),
            None => Ok(()),
        }
    }

    fn absorb(&mut self, outcome: IoOutcome) {
        if let IoOutcome::Loaded(store) = outcome {
            self.store = store;
        }
    }

    //
    // Employees
    //

    /// Adds an employee and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDate` or `DomainError::InvalidNumber`
    /// if an argument fails to parse; the database is unchanged then.
    pub fn add_employee(
        &mut self,
        name: &str,
        start_year: u16,
        start_month: u16,
        start_day: u16,
        work_time: &str,
    ) -> Result<EmployeeId, DomainError> {
        self.block_if_locked();
        let start_date = make_date(start_year, start_month, start_day)?;
        let work_time = Rational::parse(work_time)?;
        Ok(self
            .store
            .add_employee(name.to_string(), start_date, work_time))
    }

    /// Replaces an employee's display name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn edit_employee_name(
        &mut self,
        employee: EmployeeId,
        name: &str,
    ) -> Result<(), DomainError> {
        self.block_if_locked();
        self.store.rename_employee(employee, name.to_string())
    }

    /// Replaces an employee's hire date.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDate` if the triple is not a real
    /// date, or `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn edit_employee_start_date(
        &mut self,
        employee: EmployeeId,
        start_year: u16,
        start_month: u16,
        start_day: u16,
    ) -> Result<(), DomainError> {
        self.block_if_locked();
        let start_date = make_date(start_year, start_month, start_day)?;
        self.store.set_employee_start_date(employee, start_date)
    }

    /// Replaces an employee's base work-time fraction.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidNumber` if the text fails to parse,
    /// or `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn edit_employee_work_time(
        &mut self,
        employee: EmployeeId,
        work_time: &str,
    ) -> Result<(), DomainError> {
        self.block_if_locked();
        let work_time = Rational::parse(work_time)?;
        self.store.set_employee_work_time(employee, work_time)
    }

    /// Adds an extra-work-time interval to an employee and returns the
    /// interval's identifier. While the interval is in effect the
    /// employee accrues at `percent` instead of the base work time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDate` or `DomainError::InvalidNumber`
    /// if an argument fails to parse, or `DomainError::InvalidIndex` if
    /// the identifier is invalid.
    #[allow(clippy::too_many_arguments)]
    pub fn add_extra_work_time(
        &mut self,
        employee: EmployeeId,
        start_year: u16,
        start_month: u16,
        start_day: u16,
        end_year: u16,
        end_month: u16,
        end_day: u16,
        percent: &str,
    ) -> Result<ExtraTimeId, DomainError> {
        self.block_if_locked();
        let begin = make_date(start_year, start_month, start_day)?;
        let end = make_date(end_year, end_month, end_day)?;
        let percent = Rational::parse(percent)?;
        self.store
            .add_extra_time(employee, ExtraTime::new(begin, end, percent))
    }

    /// Removes an extra-work-time interval.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if either identifier is
    /// invalid.
    pub fn remove_extra_work_time(
        &mut self,
        employee: EmployeeId,
        extra_time: ExtraTimeId,
    ) -> Result<(), DomainError> {
        self.block_if_locked();
        self.store.remove_extra_time(employee, extra_time)
    }

    /// Finds the first live employee with exactly this name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmployeeNotFound` if no live employee
    /// matches.
    pub fn find_employee(&mut self, name: &str) -> Result<EmployeeId, DomainError> {
        self.block_if_locked();
        self.store.find_employee(name)
    }

    /// Deletes an employee. The identifier is never reused.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn delete_employee(&mut self, employee: EmployeeId) -> Result<(), DomainError> {
        self.block_if_locked();
        self.store.delete_employee(employee)
    }

    /// Returns an employee's display name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn get_employee_name(&mut self, employee: EmployeeId) -> Result<String, DomainError> {
        self.block_if_locked();
        Ok(self.store.employee(employee)?.name.clone())
    }

    /// Returns an employee's full read model.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn get_employee_info(&mut self, employee: EmployeeId) -> Result<EmployeeInfo, DomainError> {
        self.block_if_locked();
        let record = self.store.employee(employee)?;
        Ok(EmployeeInfo::from_record(employee, record))
    }

    /// Number of live employees.
    pub fn get_employee_count(&mut self) -> usize {
        self.block_if_locked();
        self.store.employee_count()
    }

    /// Names of live employees, in insertion order.
    pub fn list_employee_names(&mut self) -> Vec<String> {
        self.block_if_locked();
        self.store
            .valid_employees()
            .map(|(_, employee)| employee.name.clone())
            .collect()
    }

    /// Read models of live employees, in insertion order. The embedded
    /// identifiers keep their original slots, so the sequence may be
    /// non-contiguous in id-space.
    pub fn list_employee_info(&mut self) -> Vec<EmployeeInfo> {
        self.block_if_locked();
        self.store
            .valid_employees()
            .map(|(id, employee)| EmployeeInfo::from_record(id, employee))
            .collect()
    }

    //
    // Leave types
    //

    /// Adds a leave type and returns its identifier. Every employee
    /// gains an empty taken-day slot for it.
    ///
    /// `rollover` is the balance cap applied at each year boundary; a
    /// negative value carries the whole balance over. `yearly_bonus` is
    /// granted at the hire date and at every subsequent January 1.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidNumber` if a quantity fails to
    /// parse; the database is unchanged then.
    pub fn add_leave_type(
        &mut self,
        name: &str,
        rollover: &str,
        yearly_bonus: &str,
    ) -> Result<LeaveTypeId, DomainError> {
        self.block_if_locked();
        let rollover = Rational::parse(rollover)?;
        let yearly_bonus = Rational::parse(yearly_bonus)?;
        Ok(self
            .store
            .add_leave_type(name.to_string(), rollover, yearly_bonus))
    }

    /// Replaces a leave type's display name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn edit_leave_type_name(
        &mut self,
        leave_type: LeaveTypeId,
        name: &str,
    ) -> Result<(), DomainError> {
        self.block_if_locked();
        self.store.rename_leave_type(leave_type, name.to_string())
    }

    /// Replaces a leave type's rollover cap.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidNumber` if the text fails to parse,
    /// or `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn edit_leave_type_rollover(
        &mut self,
        leave_type: LeaveTypeId,
        rollover: &str,
    ) -> Result<(), DomainError> {
        self.block_if_locked();
        let rollover = Rational::parse(rollover)?;
        self.store.set_leave_type_rollover(leave_type, rollover)
    }

    /// Replaces a leave type's yearly bonus.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidNumber` if the text fails to parse,
    /// or `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn edit_leave_type_yearly_bonus(
        &mut self,
        leave_type: LeaveTypeId,
        yearly_bonus: &str,
    ) -> Result<(), DomainError> {
        self.block_if_locked();
        let yearly_bonus = Rational::parse(yearly_bonus)?;
        self.store
            .set_leave_type_yearly_bonus(leave_type, yearly_bonus)
    }

    /// Adds an accrual rule to a leave type and returns the rule's
    /// identifier. The rate takes effect in the given 1-based month of
    /// employment and stays current until a later rule supersedes it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidNumber` if the rate fails to parse,
    /// or `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn add_accrual_rule(
        &mut self,
        leave_type: LeaveTypeId,
        start_month: u32,
        days_per_year: &str,
    ) -> Result<RuleId, DomainError> {
        self.block_if_locked();
        let days_per_year = Rational::parse(days_per_year)?;
        self.store
            .add_rule(leave_type, AccrualRule::new(start_month, days_per_year))
    }

    /// Removes an accrual rule.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if either identifier is
    /// invalid.
    pub fn remove_accrual_rule(
        &mut self,
        leave_type: LeaveTypeId,
        rule: RuleId,
    ) -> Result<(), DomainError> {
        self.block_if_locked();
        self.store.remove_rule(leave_type, rule)
    }

    /// Finds the first live leave type with exactly this name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::LeaveTypeNotFound` if no live leave type
    /// matches.
    pub fn find_leave_type(&mut self, name: &str) -> Result<LeaveTypeId, DomainError> {
        self.block_if_locked();
        self.store.find_leave_type(name)
    }

    /// Deletes a leave type and every employee's taken days against it.
    /// The identifier (and every other leave type's identifier) is
    /// unaffected.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn delete_leave_type(&mut self, leave_type: LeaveTypeId) -> Result<(), DomainError> {
        self.block_if_locked();
        self.store.delete_leave_type(leave_type)
    }

    /// Returns a leave type's display name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn get_leave_type_name(&mut self, leave_type: LeaveTypeId) -> Result<String, DomainError> {
        self.block_if_locked();
        Ok(self.store.leave_type(leave_type)?.name.clone())
    }

    /// Returns a leave type's full read model.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn get_leave_type_info(
        &mut self,
        leave_type: LeaveTypeId,
    ) -> Result<LeaveTypeInfo, DomainError> {
        self.block_if_locked();
        let record = self.store.leave_type(leave_type)?;
        Ok(LeaveTypeInfo::from_record(leave_type, record))
    }

    /// Number of live leave types.
    pub fn get_leave_type_count(&mut self) -> usize {
        self.block_if_locked();
        self.store.leave_type_count()
    }

    /// Names of live leave types, in insertion order.
    pub fn list_leave_type_names(&mut self) -> Vec<String> {
        self.block_if_locked();
        self.store
            .valid_leave_types()
            .map(|(_, leave_type)| leave_type.name.clone())
            .collect()
    }

    /// Read models of live leave types, in insertion order.
    pub fn list_leave_type_info(&mut self) -> Vec<LeaveTypeInfo> {
        self.block_if_locked();
        self.store
            .valid_leave_types()
            .map(|(id, leave_type)| LeaveTypeInfo::from_record(id, leave_type))
            .collect()
    }

    //
    // Taken days
    //

    /// Records leave taken by an employee. A negative amount is a grant
    /// that raises the balance instead.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDate` or `DomainError::InvalidNumber`
    /// if an argument fails to parse, or `DomainError::InvalidIndex` if
    /// either identifier is invalid.
    pub fn add_taken_day(
        &mut self,
        employee: EmployeeId,
        leave_type: LeaveTypeId,
        year: u16,
        month: u16,
        day: u16,
        amount: &str,
    ) -> Result<(), DomainError> {
        self.block_if_locked();
        let date = make_date(year, month, day)?;
        let amount = Rational::parse(amount)?;
        self.store
            .add_taken_day(employee, leave_type, TakenDay::new(date, amount))
    }

    /// Removes the first taken-day record on the given date. Records on
    /// the same date are not disambiguated by amount, and a date with no
    /// record is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDate` if the triple is not a real
    /// date, or `DomainError::InvalidIndex` if either identifier is
    /// invalid.
    pub fn remove_taken_day(
        &mut self,
        employee: EmployeeId,
        leave_type: LeaveTypeId,
        year: u16,
        month: u16,
        day: u16,
    ) -> Result<(), DomainError> {
        self.block_if_locked();
        let date = make_date(year, month, day)?;
        self.store.remove_taken_day(employee, leave_type, date)
    }

    /// Lists an employee's taken-day records for one leave type, in
    /// insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if either identifier is
    /// invalid.
    pub fn list_taken_days(
        &mut self,
        employee: EmployeeId,
        leave_type: LeaveTypeId,
    ) -> Result<Vec<TakenDayInfo>, DomainError> {
        self.block_if_locked();
        Ok(self
            .store
            .taken_days(employee, leave_type)?
            .iter()
            .map(TakenDayInfo::from_record)
            .collect())
    }

    //
    // Queries
    //

    /// Returns the balance of one leave type available to an employee on
    /// the given date, as a canonical rational string. Days taken on or
    /// before that date are already subtracted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDate` if the triple is not a real
    /// date, or `DomainError::InvalidIndex` if either identifier is
    /// invalid.
    pub fn query_available_days(
        &mut self,
        employee: EmployeeId,
        leave_type: LeaveTypeId,
        year: u16,
        month: u16,
        day: u16,
    ) -> Result<String, DomainError> {
        self.block_if_locked();
        let on = make_date(year, month, day)?;
        Ok(query_balance(&self.store, employee, leave_type, on)?.to_string())
    }

    /// Returns the balance of every live leave type available to an
    /// employee on the given date, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDate` if the triple is not a real
    /// date, or `DomainError::InvalidIndex` if the employee identifier is
    /// invalid.
    pub fn query_available_days_by_type(
        &mut self,
        employee: EmployeeId,
        year: u16,
        month: u16,
        day: u16,
    ) -> Result<Vec<LeaveBalance>, DomainError> {
        self.block_if_locked();
        let on = make_date(year, month, day)?;
        Ok(query_all_balances(&self.store, employee, on)?
            .into_iter()
            .map(|(leave_type, balance)| LeaveBalance {
                leave_type,
                balance: balance.to_string(),
            })
            .collect())
    }

    //
    // Loading and saving
    //

    /// Loads the database from a document file, replacing the in-memory
    /// store, and remembers the file name.
    ///
    /// # Errors
    ///
    /// Returns a `PersistenceError` if the file cannot be read or does
    /// not describe a valid database; the store is unchanged then.
    pub fn load(&mut self, path: impl Into<PathBuf>) -> Result<(), PersistenceError> {
        self.block_if_locked();
        self.begin_load(path.into());
        self.wait_for_result()
    }

    /// Starts loading the database on a background thread and returns
    /// immediately. The next operation on this handle parks until the
    /// load has finished; a failure is logged there and leaves the store
    /// unchanged.
    pub fn load_async(&mut self, path: impl Into<PathBuf>) {
        self.block_if_locked();
        self.begin_load(path.into());
    }

    /// Saves the database to a document file and remembers the file
    /// name.
    ///
    /// # Errors
    ///
    /// Returns a `PersistenceError` if the document cannot be written.
    pub fn save(&mut self, path: impl Into<PathBuf>) -> Result<(), PersistenceError> {
        self.block_if_locked();
        self.begin_save(path.into());
        self.wait_for_result()
    }

    /// Starts saving the database on a background thread and returns
    /// immediately. The next operation on this handle parks until the
    /// save has finished; a failure is logged there.
    pub fn save_async(&mut self, path: impl Into<PathBuf>) {
        self.block_if_locked();
        self.begin_save(path.into());
    }

    fn begin_load(&mut self, path: PathBuf) {
        info!(path = %path.display(), "starting background load");
        self.file_name.clone_from(&path);
        let progress = self.gate.progress_sink();
        let task = thread::spawn(move || {
            leave_bank_persistence::load_from_path(&path, progress).map(IoOutcome::Loaded)
        });
        self.gate.begin(IoOperation::Load, task);
    }

    fn begin_save(&mut self, path: PathBuf) {
        info!(path = %path.display(), "starting background save");
        self.file_name.clone_from(&path);
        let snapshot = self.store.clone();
        let progress = self.gate.progress_sink();
        let task = thread::spawn(move || {
            leave_bank_persistence::save_to_path(&path, &snapshot, progress).map(|()| IoOutcome::Saved)
        });
        self.gate.begin(IoOperation::Save, task);
    }

    /// Empties the database: every record, the remembered file name, and
    /// the I/O status are reset. Any in-flight background task is waited
    /// out first.
    pub fn clear(&mut self) {
        self.gate.reset();
        self.store.clear();
        self.file_name = PathBuf::from(DEFAULT_FILE_NAME);
        info!("database cleared");
    }

    /// The file the database was last loaded from or saved to.
    #[must_use]
    pub fn current_file_name(&self) -> &Path {
        &self.file_name
    }

    /// The current background I/O status. Never waits, so it can be
    /// polled while a load or save is in flight.
    #[must_use]
    pub fn io_status(&self) -> IoStatus {
        self.gate.status()
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}
