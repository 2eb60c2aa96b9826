use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{AttendanceStatus, RecordId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

/// Creation form for an employee; also the `POST /api/employees` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

impl EmployeeDraft {
    pub fn is_complete(&self) -> bool {
        [
            &self.employee_id,
            &self.full_name,
            &self.email,
            &self.department,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Attendance form state. The date stays optional until the user picks one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceDraft {
    pub employee_id: String,
    pub date: Option<NaiveDate>,
    pub status: AttendanceStatus,
}

impl AttendanceDraft {
    pub fn into_request(self) -> Option<MarkAttendanceRequest> {
        if self.employee_id.trim().is_empty() {
            return None;
        }
        let date = self.date?;
        Some(MarkAttendanceRequest {
            employee_id: self.employee_id,
            date,
            status: self.status,
        })
    }
}

/// `POST /api/attendance` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkAttendanceRequest {
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}
