//! UI layer for the console front-end: app shell, screens and input parsing.

pub mod app;
pub mod input;
pub mod screens;

pub use app::{ConsoleApp, Flow, Route};
