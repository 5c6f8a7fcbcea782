//! HR types: employees and timesheets.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeId, TimesheetId};

/// Employee record. `role` here is a free-form job title, not a workspace
/// [`Role`](super::Role).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub role: String,
    /// Hourly pay rate in the workspace currency.
    pub pay_rate: Decimal,
    pub contact: String,
}

/// One day's recorded hours for an employee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timesheet {
    pub id: TimesheetId,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub hours_worked: f64,
}
