//! Text renderings of the navigation bar, both screens and the notification slot.

use chrono::NaiveDate;
use client_core::{Notification, Severity, ViewSnapshot};
use shared::protocol::{AttendanceDraft, EmployeeDraft};

use crate::ui::app::Route;

pub fn render_navigation(route: Route) -> String {
    let tab = |target: Route, label: &str| {
        if target == route {
            format!("[{label}]")
        } else {
            format!(" {label} ")
        }
    };
    format!(
        "HRMS Lite   {}   {}",
        tab(Route::Employees, "Employee Management"),
        tab(Route::Attendance, "Attendance Management")
    )
}

pub fn render_employee_screen(snapshot: &ViewSnapshot, form: &EmployeeDraft) -> String {
    let mut lines = vec![
        "== Add New Employee ==".to_string(),
        format!("  Employee ID : {}", form.employee_id),
        format!("  Full Name   : {}", form.full_name),
        format!("  Email       : {}", form.email),
        format!("  Department  : {}", form.department),
        "  > add <employee_id> <full_name> <email> <department>".to_string(),
        String::new(),
        "== Employee List ==".to_string(),
    ];

    if snapshot.employees.is_empty() {
        lines.push("  No employees found. Add some employees to get started.".to_string());
    }
    for employee in &snapshot.employees {
        lines.push(format!("  - {}", employee.full_name));
        lines.push(format!("      ID: {}", employee.employee_id));
        lines.push(format!("      {}", employee.department));
    }
    lines.push("  > view <employee_id> | delete <employee_id>".to_string());

    lines.join("\n")
}

pub fn render_attendance_screen(snapshot: &ViewSnapshot, form: &AttendanceDraft) -> String {
    let picked = if form.employee_id.is_empty() {
        "-".to_string()
    } else {
        match snapshot.employee(&form.employee_id) {
            Some(employee) => format!("{} ({})", employee.full_name, employee.employee_id),
            None => form.employee_id.clone(),
        }
    };
    let mut lines = vec![
        "== Mark Attendance ==".to_string(),
        format!("  Employee : {picked}"),
        format!(
            "  Date     : {}",
            form.date.map(|date| date.to_string()).unwrap_or_else(|| "-".into())
        ),
        format!("  Status   : {}", form.status.label()),
        "  > mark <employee_id> <YYYY-MM-DD> [present|absent]".to_string(),
    ];
    if !snapshot.employees.is_empty() {
        let options = snapshot
            .employees
            .iter()
            .map(|employee| format!("{} ({})", employee.full_name, employee.employee_id))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("  Employees: {options}"));
    }
    lines.push(String::new());
    lines.push("== Attendance Records ==".to_string());

    if snapshot.attendance_loading {
        lines.push("  Loading attendance...".to_string());
    }

    let Some(selection) = snapshot.selection.as_deref() else {
        lines.push("  Select an employee to view attendance records.".to_string());
        return lines.join("\n");
    };

    match snapshot.selected_employee() {
        Some(employee) => {
            lines.push(format!(
                "  {} ({})",
                employee.full_name, employee.employee_id
            ));
            lines.push(format!("  {}", employee.department));
        }
        None => lines.push(format!("  ({selection})")),
    }

    let records = snapshot.displayed_attendance();
    if records.is_empty() {
        lines.push("  No attendance records found for this employee.".to_string());
    }
    for record in records {
        lines.push(format!(
            "  - {:<14}{}",
            display_date(record.date),
            record.status.label()
        ));
    }

    lines.join("\n")
}

pub fn render_notification(notification: &Notification) -> String {
    let tag = match notification.severity {
        Severity::Success => "success",
        Severity::Error => "error",
    };
    format!("[{tag}] {}   (dismiss to close)", notification.message)
}

fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
#[path = "tests/screens_tests.rs"]
mod tests;
