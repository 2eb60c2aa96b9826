//! Runtime bridge between UI command queue and backend event intake.
//!
//! Every command runs as its own task so a slow request never holds up the
//! queue; ordering between overlapping attendance fetches is settled by the
//! store itself.

use std::{sync::Arc, thread};

use client_core::{Notification, StoreEvent, ViewStore};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tokio::sync::{broadcast, watch};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{FormKind, UiEvent};

pub fn launch(
    store: Arc<ViewStore>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tokio::spawn(forward_store_events(
                store.subscribe_events(),
                ui_tx.clone(),
            ));
            tokio::spawn(forward_notifications(
                store.notifier().subscribe(),
                ui_tx.clone(),
            ));
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                tokio::spawn(execute(store.clone(), cmd, ui_tx.clone()));
            }
            tracing::debug!("ui command queue closed; backend worker stopping");
        });
    })
}

pub(crate) async fn execute(store: Arc<ViewStore>, cmd: BackendCommand, ui_tx: Sender<UiEvent>) {
    tracing::debug!(command = cmd.name(), "executing backend command");
    match cmd {
        BackendCommand::LoadEmployees => store.load_employees().await,
        BackendCommand::AddEmployee(draft) => {
            if store.add_employee(draft).await.is_some() {
                let _ = ui_tx.try_send(UiEvent::FormAccepted(FormKind::Employee));
            }
        }
        BackendCommand::DeleteEmployee(employee) => {
            store.delete_employee(&employee).await;
        }
        BackendCommand::FetchAttendance { employee_id } => {
            store.fetch_attendance(&employee_id).await
        }
        BackendCommand::AddAttendance(draft) => {
            if store.add_attendance(draft).await.is_some() {
                let _ = ui_tx.try_send(UiEvent::FormAccepted(FormKind::Attendance));
            }
        }
    }
}

async fn forward_store_events(mut events: broadcast::Receiver<StoreEvent>, ui_tx: Sender<UiEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => {
                if let Err(TrySendError::Disconnected(_)) = ui_tx.try_send(UiEvent::Store(event)) {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "ui fell behind on store events");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn forward_notifications(
    mut slot: watch::Receiver<Option<Notification>>,
    ui_tx: Sender<UiEvent>,
) {
    while slot.changed().await.is_ok() {
        if let Err(TrySendError::Disconnected(_)) = ui_tx.try_send(UiEvent::NotificationChanged) {
            break;
        }
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
