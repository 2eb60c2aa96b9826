//! View state store: sole owner of server-derived data and sole caller of the
//! gateway. Screens read snapshots and request mutations through the named
//! operations below; every failure ends up on the notification surface.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use shared::protocol::{AttendanceDraft, AttendanceRecord, Employee, EmployeeDraft};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{
    error::{GatewayError, ValidationError},
    gateway::Gateway,
    notification::Notifier,
};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    EmployeesChanged,
    AttendanceChanged,
    LoadingChanged,
}

/// Read-only copy of the store state handed to screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub employees: Vec<Employee>,
    pub attendance: Vec<AttendanceRecord>,
    pub selection: Option<String>,
    pub attendance_loading: bool,
}

impl ViewSnapshot {
    /// Attendance records belonging to the active selection; empty without one.
    pub fn displayed_attendance(&self) -> Vec<&AttendanceRecord> {
        let Some(selection) = self.selection.as_deref() else {
            return Vec::new();
        };
        self.attendance
            .iter()
            .filter(|record| record.employee_id == selection)
            .collect()
    }

    pub fn selected_employee(&self) -> Option<&Employee> {
        let selection = self.selection.as_deref()?;
        self.employee(selection)
    }

    pub fn employee(&self, employee_id: &str) -> Option<&Employee> {
        self.employees
            .iter()
            .find(|employee| employee.employee_id == employee_id)
    }
}

#[derive(Default)]
struct ViewState {
    employees: Vec<Employee>,
    attendance: Vec<AttendanceRecord>,
    selection: Option<String>,
    attendance_loading: bool,
    /// Tag of the most recent attendance request; older responses are dropped.
    attendance_seq: u64,
    /// Employee targeted by the in-flight attendance request, if any.
    attendance_requested: Option<String>,
}

impl ViewState {
    fn invalidate_attendance_request(&mut self) {
        self.attendance_seq += 1;
        self.attendance_requested = None;
        self.attendance_loading = false;
    }
}

pub struct ViewStore {
    gateway: Arc<dyn Gateway>,
    inner: Mutex<ViewState>,
    notifier: Notifier,
    events: broadcast::Sender<StoreEvent>,
}

/// Clears the loading flag when an attendance request ends, including when the
/// request future is dropped before completing.
struct AttendanceTicket<'a> {
    store: &'a ViewStore,
    seq: u64,
}

impl Drop for AttendanceTicket<'_> {
    fn drop(&mut self) {
        let cleared = {
            let mut state = self.store.state();
            if state.attendance_seq == self.seq && state.attendance_loading {
                state.attendance_loading = false;
                state.attendance_requested = None;
                true
            } else {
                false
            }
        };
        if cleared {
            self.store.emit(StoreEvent::LoadingChanged);
        }
    }
}

impl ViewStore {
    pub fn new(gateway: Arc<dyn Gateway>, notification_ttl: Duration) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Arc::new(Self {
            gateway,
            inner: Mutex::new(ViewState::default()),
            notifier: Notifier::new(notification_ttl),
            events,
        })
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let state = self.state();
        ViewSnapshot {
            employees: state.employees.clone(),
            attendance: state.attendance.clone(),
            selection: state.selection.clone(),
            attendance_loading: state.attendance_loading,
        }
    }

    pub async fn load_employees(&self) {
        match self.gateway.list_employees().await {
            Ok(employees) => {
                info!(count = employees.len(), "employee list loaded");
                self.state().employees = employees;
                self.emit(StoreEvent::EmployeesChanged);
            }
            Err(err) => self.report_failure("load_employees", &err),
        }
    }

    /// Returns the created employee so the caller can reset its form.
    pub async fn add_employee(&self, draft: EmployeeDraft) -> Option<Employee> {
        if !draft.is_complete() {
            self.reject(ValidationError::IncompleteEmployee);
            return None;
        }

        match self.gateway.create_employee(&draft).await {
            Ok(employee) => {
                info!(employee_id = %employee.employee_id, "employee created");
                self.state().employees.push(employee.clone());
                self.emit(StoreEvent::EmployeesChanged);
                self.notifier.success("Employee added successfully!");
                Some(employee)
            }
            Err(err) => {
                self.report_failure("add_employee", &err);
                None
            }
        }
    }

    pub async fn delete_employee(&self, employee: &Employee) -> bool {
        let Some(id) = employee.id.clone() else {
            debug!(employee_id = %employee.employee_id, "delete skipped: no server id");
            return false;
        };

        if let Err(err) = self.gateway.delete_employee(&id).await {
            self.report_failure("delete_employee", &err);
            return false;
        }

        let (selection_cleared, loading_cleared) = {
            let mut state = self.state();
            state
                .employees
                .retain(|existing| existing.id.as_ref() != Some(&id));

            let selection_cleared =
                state.selection.as_deref() == Some(employee.employee_id.as_str());
            if selection_cleared {
                state.selection = None;
                state.attendance.clear();
            }

            let loading_cleared =
                state.attendance_requested.as_deref() == Some(employee.employee_id.as_str());
            if loading_cleared {
                state.invalidate_attendance_request();
            }
            (selection_cleared, loading_cleared)
        };

        info!(employee_id = %employee.employee_id, selection_cleared, "employee deleted");
        self.emit(StoreEvent::EmployeesChanged);
        if selection_cleared {
            self.emit(StoreEvent::AttendanceChanged);
        }
        if loading_cleared {
            self.emit(StoreEvent::LoadingChanged);
        }
        self.notifier.success(format!(
            "Employee {} deleted successfully!",
            employee.full_name
        ));
        true
    }

    /// Drops the active selection and its attendance list without touching the
    /// network. Any attendance request still in flight is invalidated.
    pub fn clear_selection(&self) {
        {
            let mut state = self.state();
            state.attendance.clear();
            state.selection = None;
            state.invalidate_attendance_request();
        }
        debug!("attendance selection cleared");
        self.emit(StoreEvent::AttendanceChanged);
    }

    /// Selects `employee_id` and replaces the attendance list with its records.
    /// A blank id deselects. When requests overlap, the most recently issued
    /// one wins regardless of the order responses arrive in.
    pub async fn fetch_attendance(&self, employee_id: &str) {
        let employee_id = employee_id.trim();
        if employee_id.is_empty() {
            self.clear_selection();
            return;
        }

        let seq = {
            let mut state = self.state();
            state.attendance_seq += 1;
            state.attendance_loading = true;
            state.attendance_requested = Some(employee_id.to_string());
            state.attendance_seq
        };
        self.emit(StoreEvent::LoadingChanged);
        let ticket = AttendanceTicket { store: self, seq };

        let result = self.gateway.list_attendance(employee_id).await;

        let outcome = {
            let mut state = self.state();
            if state.attendance_seq != seq {
                None
            } else {
                Some(result.map(|records| {
                    let count = records.len();
                    state.attendance = records;
                    state.selection = Some(employee_id.to_string());
                    count
                }))
            }
        };
        drop(ticket);

        match outcome {
            None => debug!(employee_id, seq, "discarding stale attendance response"),
            Some(Ok(count)) => {
                info!(employee_id, count, "attendance loaded");
                self.emit(StoreEvent::AttendanceChanged);
            }
            Some(Err(err)) => self.report_failure("fetch_attendance", &err),
        }
    }

    /// Returns the created record so the caller can reset its form.
    pub async fn add_attendance(&self, draft: AttendanceDraft) -> Option<AttendanceRecord> {
        let Some(request) = draft.into_request() else {
            self.reject(ValidationError::IncompleteAttendance);
            return None;
        };

        let record = match self.gateway.mark_attendance(&request).await {
            Ok(record) => record,
            Err(err) => {
                self.report_failure("add_attendance", &err);
                return None;
            }
        };

        let (prepended, full_name) = {
            let mut state = self.state();
            let prepended = state.selection.as_deref() == Some(request.employee_id.as_str());
            if prepended {
                state.attendance.insert(0, record.clone());
            }
            let full_name = state
                .employees
                .iter()
                .find(|employee| employee.employee_id == request.employee_id)
                .map(|employee| employee.full_name.clone());
            (prepended, full_name)
        };

        info!(
            employee_id = %request.employee_id,
            date = %request.date,
            prepended,
            "attendance marked"
        );
        if prepended {
            self.emit(StoreEvent::AttendanceChanged);
        }
        self.notifier.success(format!(
            "Attendance marked for {}!",
            full_name.as_deref().unwrap_or("employee")
        ));
        Some(record)
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: StoreEvent) {
        let _ = self.events.send(event);
    }

    fn reject(&self, err: ValidationError) {
        debug!(%err, "form rejected locally");
        self.notifier.error(err.to_string());
    }

    fn report_failure(&self, operation: &'static str, err: &GatewayError) {
        warn!(operation, error = %err, "gateway call failed");
        self.notifier.error(err.user_message());
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
