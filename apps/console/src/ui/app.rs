use std::sync::Arc;

use client_core::ViewStore;
use crossbeam_channel::Sender;
use shared::protocol::{AttendanceDraft, EmployeeDraft};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::{FormKind, UiEvent},
        orchestration::dispatch_backend_command,
    },
    ui::{
        input::{parse_line, ReplCommand},
        screens,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Employees,
    Attendance,
}

impl Route {
    /// Unknown paths, including the root, land on the employee screen.
    pub fn from_path(path: &str) -> Self {
        match path.trim().trim_end_matches('/') {
            "/attendance" | "attendance" => Self::Attendance,
            _ => Self::Employees,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Employees => "/employees",
            Self::Attendance => "/attendance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct ConsoleApp {
    store: Arc<ViewStore>,
    cmd_tx: Sender<BackendCommand>,
    route: Route,
    status: String,
    employee_form: EmployeeDraft,
    attendance_form: AttendanceDraft,
}

impl ConsoleApp {
    pub fn new(store: Arc<ViewStore>, cmd_tx: Sender<BackendCommand>, route: Route) -> Self {
        Self {
            store,
            cmd_tx,
            route,
            status: String::new(),
            employee_form: EmployeeDraft::default(),
            attendance_form: AttendanceDraft::default(),
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Issues the one-time employee load.
    pub fn start(&mut self) {
        self.dispatch(BackendCommand::LoadEmployees);
    }

    pub fn handle_line(&mut self, line: &str) -> Flow {
        self.status.clear();
        match parse_line(line) {
            Ok(Some(command)) => self.apply(command),
            Ok(None) => Flow::Continue,
            Err(message) => {
                self.status = message;
                Flow::Continue
            }
        }
    }

    fn apply(&mut self, command: ReplCommand) -> Flow {
        match command {
            ReplCommand::Employees => self.route = Route::Employees,
            ReplCommand::Attendance => self.route = Route::Attendance,
            ReplCommand::Add {
                employee_id,
                full_name,
                email,
                department,
            } => {
                let draft = EmployeeDraft {
                    employee_id: employee_id.unwrap_or_default(),
                    full_name: full_name.unwrap_or_default(),
                    email: email.unwrap_or_default(),
                    department: department.unwrap_or_default(),
                };
                self.employee_form = draft.clone();
                self.dispatch(BackendCommand::AddEmployee(draft));
            }
            ReplCommand::Delete { employee_id } => {
                let snapshot = self.store.snapshot();
                match snapshot.employee(&employee_id) {
                    Some(employee) => {
                        self.dispatch(BackendCommand::DeleteEmployee(employee.clone()))
                    }
                    None => self.status = format!("No employee with ID {employee_id}"),
                }
            }
            ReplCommand::View { employee_id } => {
                self.dispatch(BackendCommand::FetchAttendance { employee_id });
                self.route = Route::Attendance;
            }
            ReplCommand::Select { employee_id } => {
                self.dispatch(BackendCommand::FetchAttendance {
                    employee_id: employee_id.unwrap_or_default(),
                });
            }
            ReplCommand::Mark {
                employee_id,
                date,
                status,
            } => {
                let draft = AttendanceDraft {
                    employee_id: employee_id.unwrap_or_default(),
                    date,
                    status: status.into(),
                };
                self.attendance_form = draft.clone();
                self.dispatch(BackendCommand::AddAttendance(draft));
            }
            ReplCommand::Reload => self.dispatch(BackendCommand::LoadEmployees),
            ReplCommand::Dismiss => self.store.notifier().dismiss(),
            ReplCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) | UiEvent::BackendFailed(message) => self.status = message,
            UiEvent::FormAccepted(FormKind::Employee) => {
                self.employee_form = EmployeeDraft::default();
            }
            UiEvent::FormAccepted(FormKind::Attendance) => {
                self.attendance_form = AttendanceDraft::default();
            }
            UiEvent::Store(_) | UiEvent::NotificationChanged => {}
        }
    }

    pub fn render(&self) -> String {
        let snapshot = self.store.snapshot();
        let screen = match self.route {
            Route::Employees => screens::render_employee_screen(&snapshot, &self.employee_form),
            Route::Attendance => {
                screens::render_attendance_screen(&snapshot, &self.attendance_form)
            }
        };

        let mut sections = vec![screens::render_navigation(self.route), screen];
        if let Some(notification) = self.store.notifier().current() {
            sections.push(screens::render_notification(&notification));
        }
        if !self.status.is_empty() {
            sections.push(self.status.clone());
        }
        sections.join("\n\n")
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
