//! Events flowing from the backend worker to the UI thread.

use client_core::StoreEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Employee,
    Attendance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Info(String),
    Store(StoreEvent),
    NotificationChanged,
    /// The submitted form was saved and should be cleared.
    FormAccepted(FormKind),
    BackendFailed(String),
}
