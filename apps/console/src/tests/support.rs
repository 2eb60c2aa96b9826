//! In-memory gateway shared by the console tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use chrono::NaiveDate;
use client_core::{Gateway, GatewayError, ViewStore};
use shared::{
    domain::{AttendanceStatus, RecordId},
    protocol::{AttendanceRecord, Employee, EmployeeDraft, MarkAttendanceRequest},
};

#[derive(Default)]
pub struct StaticGateway {
    employees: Mutex<Vec<Employee>>,
    attendance: Mutex<HashMap<String, Vec<AttendanceRecord>>>,
}

impl StaticGateway {
    pub fn seeded() -> Self {
        let gateway = Self::default();
        *gateway.employees.lock().unwrap() = vec![
            employee("1", "E1", "Ada Lovelace", "Research"),
            employee("2", "E2", "Alan Turing", "Cryptography"),
        ];
        gateway.attendance.lock().unwrap().insert(
            "E1".to_string(),
            vec![AttendanceRecord {
                id: Some(RecordId::new("a1")),
                employee_id: "E1".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
                status: AttendanceStatus::Present,
            }],
        );
        gateway
    }
}

pub fn employee(id: &str, employee_id: &str, full_name: &str, department: &str) -> Employee {
    Employee {
        id: Some(RecordId::new(id)),
        employee_id: employee_id.to_string(),
        full_name: full_name.to_string(),
        email: format!("{}@example.com", employee_id.to_lowercase()),
        department: department.to_string(),
    }
}

pub fn seeded_store() -> Arc<ViewStore> {
    ViewStore::new(Arc::new(StaticGateway::seeded()), Duration::from_secs(4))
}

#[async_trait]
impl Gateway for StaticGateway {
    async fn list_employees(&self) -> Result<Vec<Employee>, GatewayError> {
        Ok(self.employees.lock().unwrap().clone())
    }

    async fn create_employee(&self, draft: &EmployeeDraft) -> Result<Employee, GatewayError> {
        let mut employees = self.employees.lock().unwrap();
        let created = Employee {
            id: Some(RecordId::new((employees.len() + 1).to_string())),
            employee_id: draft.employee_id.clone(),
            full_name: draft.full_name.clone(),
            email: draft.email.clone(),
            department: draft.department.clone(),
        };
        employees.push(created.clone());
        Ok(created)
    }

    async fn delete_employee(&self, id: &RecordId) -> Result<(), GatewayError> {
        self.employees
            .lock()
            .unwrap()
            .retain(|employee| employee.id.as_ref() != Some(id));
        Ok(())
    }

    async fn list_attendance(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AttendanceRecord>, GatewayError> {
        Ok(self
            .attendance
            .lock()
            .unwrap()
            .get(employee_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn mark_attendance(
        &self,
        request: &MarkAttendanceRequest,
    ) -> Result<AttendanceRecord, GatewayError> {
        Ok(AttendanceRecord {
            id: None,
            employee_id: request.employee_id.clone(),
            date: request.date,
            status: request.status,
        })
    }
}
