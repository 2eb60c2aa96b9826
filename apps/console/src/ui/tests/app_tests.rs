use super::*;
use chrono::NaiveDate;
use crossbeam_channel::{bounded, Receiver};
use shared::domain::AttendanceStatus;

use crate::test_support::seeded_store;

fn console(route: Route) -> (ConsoleApp, Receiver<BackendCommand>) {
    let (cmd_tx, cmd_rx) = bounded(8);
    (ConsoleApp::new(seeded_store(), cmd_tx, route), cmd_rx)
}

#[test]
fn route_from_path_falls_back_to_employees() {
    assert_eq!(Route::from_path("/"), Route::Employees);
    assert_eq!(Route::from_path(""), Route::Employees);
    assert_eq!(Route::from_path("/payroll"), Route::Employees);
    assert_eq!(Route::from_path("/attendance"), Route::Attendance);
    assert_eq!(Route::from_path("/attendance/"), Route::Attendance);
    assert_eq!(Route::Attendance.path(), "/attendance");
}

#[test]
fn start_requests_employee_load() {
    let (mut app, cmd_rx) = console(Route::Employees);
    app.start();
    assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::LoadEmployees)));
}

#[test]
fn navigation_commands_switch_screens() {
    let (mut app, _cmd_rx) = console(Route::Employees);
    assert_eq!(app.handle_line("attendance"), Flow::Continue);
    assert_eq!(app.route(), Route::Attendance);
    assert!(app.render().contains("== Mark Attendance =="));

    app.handle_line("employees");
    assert_eq!(app.route(), Route::Employees);
    assert!(app.render().contains("== Employee List =="));
}

#[test]
fn add_fills_form_and_queues_draft() {
    let (mut app, cmd_rx) = console(Route::Employees);
    app.handle_line(r#"add E9 "Grace Hopper" grace@example.com Navy"#);

    let Ok(BackendCommand::AddEmployee(draft)) = cmd_rx.try_recv() else {
        panic!("expected add command");
    };
    assert_eq!(draft.full_name, "Grace Hopper");
    assert_eq!(app.employee_form, draft);
    assert!(app.render().contains("Full Name   : Grace Hopper"));
}

#[test]
fn accepted_forms_are_cleared() {
    let (mut app, _cmd_rx) = console(Route::Attendance);
    app.handle_line("add E9 Grace grace@example.com Navy");
    app.handle_line("mark E1 2024-02-03 absent");
    assert_eq!(
        app.attendance_form,
        AttendanceDraft {
            employee_id: "E1".into(),
            date: NaiveDate::from_ymd_opt(2024, 2, 3),
            status: AttendanceStatus::Absent,
        }
    );

    app.handle_event(UiEvent::FormAccepted(FormKind::Attendance));
    assert_eq!(app.attendance_form, AttendanceDraft::default());
    assert_eq!(app.employee_form.employee_id, "E9");

    app.handle_event(UiEvent::FormAccepted(FormKind::Employee));
    assert_eq!(app.employee_form, EmployeeDraft::default());
}

#[test]
fn view_fetches_and_opens_attendance() {
    let (mut app, cmd_rx) = console(Route::Employees);
    app.handle_line("view E2");
    assert_eq!(app.route(), Route::Attendance);
    assert!(matches!(
        cmd_rx.try_recv(),
        Ok(BackendCommand::FetchAttendance { employee_id }) if employee_id == "E2"
    ));
}

#[test]
fn bare_select_requests_deselect() {
    let (mut app, cmd_rx) = console(Route::Attendance);
    app.handle_line("select");
    assert!(matches!(
        cmd_rx.try_recv(),
        Ok(BackendCommand::FetchAttendance { employee_id }) if employee_id.is_empty()
    ));
    assert_eq!(app.route(), Route::Attendance);
}

#[test]
fn deleting_unknown_employee_sets_status() {
    let (mut app, cmd_rx) = console(Route::Employees);
    app.handle_line("delete E404");
    assert!(cmd_rx.try_recv().is_err());
    assert_eq!(app.status, "No employee with ID E404");
    assert!(app.render().ends_with("No employee with ID E404"));
}

#[tokio::test]
async fn deleting_listed_employee_queues_full_record() {
    let (mut app, cmd_rx) = console(Route::Employees);
    app.store.load_employees().await;

    app.handle_line("delete E2");
    let Ok(BackendCommand::DeleteEmployee(employee)) = cmd_rx.try_recv() else {
        panic!("expected delete command");
    };
    assert_eq!(employee.full_name, "Alan Turing");
    assert!(employee.id.is_some());
}

#[test]
fn parse_errors_surface_as_status_until_next_line() {
    let (mut app, _cmd_rx) = console(Route::Employees);
    app.handle_line("fire everyone");
    assert!(!app.status.is_empty());

    app.handle_line("employees");
    assert!(app.status.is_empty());
}

#[test]
fn dismiss_clears_notification() {
    let (mut app, _cmd_rx) = console(Route::Employees);
    app.store.notifier().success("Employee added successfully!");
    assert!(app.render().contains("[success] Employee added successfully!"));

    app.handle_line("dismiss");
    assert!(app.store.notifier().current().is_none());
    assert!(!app.render().contains("[success]"));
}

#[test]
fn quit_and_exit_stop_the_loop() {
    let (mut app, _cmd_rx) = console(Route::Employees);
    assert_eq!(app.handle_line("quit"), Flow::Quit);
    assert_eq!(app.handle_line("exit"), Flow::Quit);
}

#[test]
fn backend_failure_is_shown() {
    let (mut app, _cmd_rx) = console(Route::Employees);
    app.handle_event(UiEvent::BackendFailed("backend worker startup failure".into()));
    assert!(app.render().contains("backend worker startup failure"));
}
