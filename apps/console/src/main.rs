use std::{
    io::{self, BufRead, IsTerminal, Write},
    path::PathBuf,
    sync::Arc,
    thread,
    time::Instant,
};

mod backend_bridge;
mod config;
mod controller;
mod ui;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{HttpGateway, ViewStore};
use crossbeam_channel::{at, bounded, never, select, Receiver};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    backend_bridge::{commands::BackendCommand, runtime},
    config::{load_settings, DEFAULT_CONFIG_PATH},
    controller::events::UiEvent,
    ui::{ConsoleApp, Flow, Route},
};

#[derive(Parser, Debug)]
#[command(name = "hrms-lite", about = "Employee and attendance console for HRMS Lite")]
struct Args {
    /// Backend base url; overrides the config file and environment
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Screen to open first
    #[arg(long, default_value = "/")]
    route: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    let gateway = HttpGateway::new(settings.api_base_url()?, settings.request_timeout())
        .context("failed to initialise api client")?;
    info!(api_url = %gateway.base_url(), "starting HRMS Lite console");
    let store = ViewStore::new(Arc::new(gateway), settings.notification_ttl());

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let worker = runtime::launch(store.clone(), cmd_rx, ui_tx);
    let lines = spawn_stdin_reader();

    let mut app = ConsoleApp::new(store.clone(), cmd_tx, Route::from_path(&args.route));
    info!(route = app.route().path(), "console ready");
    app.start();
    redraw(&app)?;

    let mut expiry: Receiver<Instant> = never();
    loop {
        select! {
            recv(lines) -> line => match line {
                Ok(line) => {
                    if app.handle_line(&line) == Flow::Quit {
                        break;
                    }
                }
                Err(_) => break,
            },
            recv(ui_rx) -> event => match event {
                Ok(event) => app.handle_event(event),
                Err(_) => {
                    tracing::error!("backend worker exited");
                    redraw(&app)?;
                    break;
                }
            },
            recv(expiry) -> _ => {}
        }

        expiry = match store.notifier().current() {
            Some(notification) => at(notification.expires_at),
            None => never(),
        };
        redraw(&app)?;
    }

    drop(app);
    if worker.join().is_err() {
        tracing::error!("backend worker panicked");
    }
    Ok(())
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = bounded(16);
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    tracing::warn!("failed to read stdin: {err}");
                    break;
                }
            }
        }
    });
    rx
}

fn redraw(app: &ConsoleApp) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if stdout.is_terminal() {
        write!(stdout, "\x1b[2J\x1b[H")?;
    }
    writeln!(stdout, "{}", app.render())?;
    write!(stdout, "\n> ")?;
    stdout.flush()?;
    Ok(())
}
