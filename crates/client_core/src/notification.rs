//! Single-slot ephemeral notification surface.
//!
//! Only the latest message is kept; raising a new one replaces whatever is
//! currently shown. Messages expire after a fixed interval or on dismissal.

use std::time::{Duration, Instant};

use tokio::sync::watch;

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub raised_at: Instant,
    pub expires_at: Instant,
}

impl Notification {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

pub struct Notifier {
    slot: watch::Sender<Option<Notification>>,
    ttl: Duration,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        let (slot, _) = watch::channel(None);
        Self { slot, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn success(&self, message: impl Into<String>) {
        self.raise(Severity::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.raise(Severity::Error, message);
    }

    pub fn raise(&self, severity: Severity, message: impl Into<String>) {
        let raised_at = Instant::now();
        let notification = Notification {
            message: message.into(),
            severity,
            raised_at,
            expires_at: raised_at + self.ttl,
        };
        tracing::debug!(?severity, message = %notification.message, "notification raised");
        self.slot.send_replace(Some(notification));
    }

    pub fn dismiss(&self) {
        self.slot.send_replace(None);
    }

    pub fn current(&self) -> Option<Notification> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<Notification> {
        self.slot
            .borrow()
            .as_ref()
            .filter(|notification| notification.is_visible_at(now))
            .cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.slot.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}
