//! Client core for HRMS Lite: the REST gateway client, the view state store
//! shared by the employee and attendance screens, and the notification slot.

pub mod error;
pub mod gateway;
pub mod notification;
pub mod store;

pub use error::{GatewayError, ValidationError, GENERIC_ERROR_MESSAGE};
pub use gateway::{Gateway, HttpGateway};
pub use notification::{Notification, Notifier, Severity, DEFAULT_NOTIFICATION_TTL};
pub use store::{StoreEvent, ViewSnapshot, ViewStore};
