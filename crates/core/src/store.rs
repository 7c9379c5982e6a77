// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The append-only entity store.
//!
//! Employees and leave types live in vectors whose slot indices double as
//! their public identifiers. Deletion tombstones a slot instead of
//! removing it, so identifiers stay stable across unrelated mutations.
//! Every employee carries one taken-day vector per leave-type slot
//! (tombstoned slots included); the store keeps that alignment whenever a
//! leave type is added or deleted.

use leave_bank_domain::{
    AccrualRule, Date, DomainError, Employee, EmployeeId, ExtraTime, ExtraTimeId, LeaveType,
    LeaveTypeId, Rational, RuleId, TakenDay,
};

/// In-memory store of all database entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityStore {
    employees: Vec<Employee>,
    leave_types: Vec<LeaveType>,
}

impl EntityStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            employees: Vec::new(),
            leave_types: Vec::new(),
        }
    }

    /// Rebuilds a store from raw entity vectors, as read back from a
    /// saved document. Taken-day vectors are padded so every employee
    /// covers every leave-type slot.
    #[must_use]
    pub fn from_parts(employees: Vec<Employee>, leave_types: Vec<LeaveType>) -> Self {
        let mut store = Self {
            employees,
            leave_types,
        };
        let slots = store.leave_types.len();
        for employee in &mut store.employees {
            if employee.days_taken.len() < slots {
                employee.days_taken.resize(slots, Vec::new());
            }
        }
        store
    }

    /// Removes every record and forgets every identifier.
    pub fn clear(&mut self) {
        self.employees.clear();
        self.leave_types.clear();
    }

    /// All employee slots in slot order, tombstoned ones included.
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// All leave-type slots in slot order, tombstoned ones included.
    #[must_use]
    pub fn leave_types(&self) -> &[LeaveType] {
        &self.leave_types
    }

    /// Appends a new employee and returns its identifier.
    pub fn add_employee(
        &mut self,
        name: String,
        start_date: Date,
        work_time: Rational,
    ) -> EmployeeId {
        self.employees.push(Employee::new(
            name,
            start_date,
            work_time,
            self.leave_types.len(),
        ));
        EmployeeId::new(self.employees.len() - 1)
    }

    /// Looks up a live employee.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the identifier is out of
    /// range or the slot is tombstoned.
    pub fn employee(&self, id: EmployeeId) -> Result<&Employee, DomainError> {
        self.employees
            .get(id.index())
            .filter(|employee| employee.valid)
            .ok_or(DomainError::InvalidIndex {
                entity: "employee",
                index: id.index(),
            })
    }

    fn employee_mut(&mut self, id: EmployeeId) -> Result<&mut Employee, DomainError> {
        self.employees
            .get_mut(id.index())
            .filter(|employee| employee.valid)
            .ok_or(DomainError::InvalidIndex {
                entity: "employee",
                index: id.index(),
            })
    }

    /// Replaces an employee's display name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn rename_employee(&mut self, id: EmployeeId, name: String) -> Result<(), DomainError> {
        self.employee_mut(id)?.name = name;
        Ok(())
    }

    /// Replaces an employee's hire date.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn set_employee_start_date(
        &mut self,
        id: EmployeeId,
        start_date: Date,
    ) -> Result<(), DomainError> {
        self.employee_mut(id)?.start_date = start_date;
        Ok(())
    }

    /// Replaces an employee's base work-time fraction.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn set_employee_work_time(
        &mut self,
        id: EmployeeId,
        work_time: Rational,
    ) -> Result<(), DomainError> {
        self.employee_mut(id)?.work_time = work_time;
        Ok(())
    }

    /// Appends an extra-work-time interval to an employee and returns the
    /// interval's identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the employee identifier is
    /// invalid.
    pub fn add_extra_time(
        &mut self,
        id: EmployeeId,
        extra_time: ExtraTime,
    ) -> Result<ExtraTimeId, DomainError> {
        let employee = self.employee_mut(id)?;
        employee.extra_time.push(extra_time);
        Ok(ExtraTimeId::new(employee.extra_time.len() - 1))
    }

    /// Tombstones an extra-work-time interval.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if either identifier is out of
    /// range or refers to a tombstoned record.
    pub fn remove_extra_time(
        &mut self,
        id: EmployeeId,
        extra: ExtraTimeId,
    ) -> Result<(), DomainError> {
        let interval = self
            .employee_mut(id)?
            .extra_time
            .get_mut(extra.index())
            .filter(|interval| interval.valid)
            .ok_or(DomainError::InvalidIndex {
                entity: "extra time",
                index: extra.index(),
            })?;
        interval.valid = false;
        Ok(())
    }

    /// Tombstones an employee. The slot and its identifier are never
    /// reused.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn delete_employee(&mut self, id: EmployeeId) -> Result<(), DomainError> {
        self.employee_mut(id)?.valid = false;
        Ok(())
    }

    /// Finds the first live employee with exactly this name, in insertion
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmployeeNotFound` if no live employee
    /// matches.
    pub fn find_employee(&self, name: &str) -> Result<EmployeeId, DomainError> {
        self.employees
            .iter()
            .position(|employee| employee.valid && employee.name == name)
            .map(EmployeeId::new)
            .ok_or_else(|| DomainError::EmployeeNotFound {
                name: name.to_string(),
            })
    }

    /// Number of live employees.
    #[must_use]
    pub fn employee_count(&self) -> usize {
        self.employees.iter().filter(|employee| employee.valid).count()
    }

    /// Live employees with their identifiers, in insertion order. The
    /// identifier sequence may be non-contiguous.
    #[must_use]
    pub fn valid_employees(&self) -> impl Iterator<Item = (EmployeeId, &Employee)> {
        self.employees
            .iter()
            .enumerate()
            .filter(|(_, employee)| employee.valid)
            .map(|(index, employee)| (EmployeeId::new(index), employee))
    }

    /// Appends a new leave type, extending every employee (live or not)
    /// with one empty taken-day vector for the new slot.
    pub fn add_leave_type(
        &mut self,
        name: String,
        rollover: Rational,
        yearly_bonus: Rational,
    ) -> LeaveTypeId {
        self.leave_types
            .push(LeaveType::new(name, rollover, yearly_bonus));
        for employee in &mut self.employees {
            employee.days_taken.push(Vec::new());
        }
        LeaveTypeId::new(self.leave_types.len() - 1)
    }

    /// Looks up a live leave type.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the identifier is out of
    /// range or the slot is tombstoned.
    pub fn leave_type(&self, id: LeaveTypeId) -> Result<&LeaveType, DomainError> {
        self.leave_types
            .get(id.index())
            .filter(|leave_type| leave_type.valid)
            .ok_or(DomainError::InvalidIndex {
                entity: "leave type",
                index: id.index(),
            })
    }

    fn leave_type_mut(&mut self, id: LeaveTypeId) -> Result<&mut LeaveType, DomainError> {
        self.leave_types
            .get_mut(id.index())
            .filter(|leave_type| leave_type.valid)
            .ok_or(DomainError::InvalidIndex {
                entity: "leave type",
                index: id.index(),
            })
    }

    /// Replaces a leave type's display name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn rename_leave_type(&mut self, id: LeaveTypeId, name: String) -> Result<(), DomainError> {
        self.leave_type_mut(id)?.name = name;
        Ok(())
    }

    /// Replaces a leave type's rollover cap.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn set_leave_type_rollover(
        &mut self,
        id: LeaveTypeId,
        rollover: Rational,
    ) -> Result<(), DomainError> {
        self.leave_type_mut(id)?.rollover = rollover;
        Ok(())
    }

    /// Replaces a leave type's yearly bonus.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn set_leave_type_yearly_bonus(
        &mut self,
        id: LeaveTypeId,
        yearly_bonus: Rational,
    ) -> Result<(), DomainError> {
        self.leave_type_mut(id)?.yearly_bonus = yearly_bonus;
        Ok(())
    }

    /// Appends an accrual rule to a leave type and returns the rule's
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the leave-type identifier
    /// is invalid.
    pub fn add_rule(&mut self, id: LeaveTypeId, rule: AccrualRule) -> Result<RuleId, DomainError> {
        let leave_type = self.leave_type_mut(id)?;
        leave_type.rules.push(rule);
        Ok(RuleId::new(leave_type.rules.len() - 1))
    }

    /// Tombstones an accrual rule.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if either identifier is out of
    /// range or refers to a tombstoned record.
    pub fn remove_rule(&mut self, id: LeaveTypeId, rule: RuleId) -> Result<(), DomainError> {
        let record = self
            .leave_type_mut(id)?
            .rules
            .get_mut(rule.index())
            .filter(|record| record.valid)
            .ok_or(DomainError::InvalidIndex {
                entity: "accrual rule",
                index: rule.index(),
            })?;
        record.valid = false;
        Ok(())
    }

    /// Tombstones a leave type and clears (but keeps) its taken-day slot
    /// on every employee, so later slot indices do not shift.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if the identifier is invalid.
    pub fn delete_leave_type(&mut self, id: LeaveTypeId) -> Result<(), DomainError> {
        self.leave_type_mut(id)?.valid = false;
        for employee in &mut self.employees {
            if let Some(taken) = employee.days_taken.get_mut(id.index()) {
                taken.clear();
            }
        }
        Ok(())
    }

    /// Finds the first live leave type with exactly this name, in
    /// insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::LeaveTypeNotFound` if no live leave type
    /// matches.
    pub fn find_leave_type(&self, name: &str) -> Result<LeaveTypeId, DomainError> {
        self.leave_types
            .iter()
            .position(|leave_type| leave_type.valid && leave_type.name == name)
            .map(LeaveTypeId::new)
            .ok_or_else(|| DomainError::LeaveTypeNotFound {
                name: name.to_string(),
            })
    }

    /// Number of live leave types.
    #[must_use]
    pub fn leave_type_count(&self) -> usize {
        self.leave_types
            .iter()
            .filter(|leave_type| leave_type.valid)
            .count()
    }

    /// Live leave types with their identifiers, in insertion order. The
    /// identifier sequence may be non-contiguous.
    #[must_use]
    pub fn valid_leave_types(&self) -> impl Iterator<Item = (LeaveTypeId, &LeaveType)> {
        self.leave_types
            .iter()
            .enumerate()
            .filter(|(_, leave_type)| leave_type.valid)
            .map(|(index, leave_type)| (LeaveTypeId::new(index), leave_type))
    }

    /// Records a taken day against an employee and leave type.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if either identifier is
    /// invalid.
    pub fn add_taken_day(
        &mut self,
        employee: EmployeeId,
        leave_type: LeaveTypeId,
        taken: TakenDay,
    ) -> Result<(), DomainError> {
        self.leave_type(leave_type)?;
        self.employee_mut(employee)?.days_taken[leave_type.index()].push(taken);
        Ok(())
    }

    /// Removes the first taken-day record matching the date. Records with
    /// the same date but different amounts are not disambiguated, and a
    /// date with no record is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if either identifier is
    /// invalid.
    pub fn remove_taken_day(
        &mut self,
        employee: EmployeeId,
        leave_type: LeaveTypeId,
        date: Date,
    ) -> Result<(), DomainError> {
        self.leave_type(leave_type)?;
        let taken = &mut self.employee_mut(employee)?.days_taken[leave_type.index()];
        if let Some(position) = taken.iter().position(|day| day.date == date) {
            taken.remove(position);
        }
        Ok(())
    }

    /// The taken-day records for an employee and leave type, in insertion
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIndex` if either identifier is
    /// invalid.
    pub fn taken_days(
        &self,
        employee: EmployeeId,
        leave_type: LeaveTypeId,
    ) -> Result<&[TakenDay], DomainError> {
        self.leave_type(leave_type)?;
        Ok(&self.employee(employee)?.days_taken[leave_type.index()])
    }
}
