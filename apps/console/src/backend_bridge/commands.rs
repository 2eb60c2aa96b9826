//! Backend commands queued from UI to backend worker.

use shared::protocol::{AttendanceDraft, Employee, EmployeeDraft};

#[derive(Debug, Clone)]
pub enum BackendCommand {
    LoadEmployees,
    AddEmployee(EmployeeDraft),
    DeleteEmployee(Employee),
    /// Empty id deselects.
    FetchAttendance {
        employee_id: String,
    },
    AddAttendance(AttendanceDraft),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadEmployees => "load_employees",
            Self::AddEmployee(_) => "add_employee",
            Self::DeleteEmployee(_) => "delete_employee",
            Self::FetchAttendance { .. } => "fetch_attendance",
            Self::AddAttendance(_) => "add_attendance",
        }
    }
}
