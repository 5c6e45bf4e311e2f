//! Core of roleplan: the role/goal/task store, the calendar deriver, and the
//! command layer shared by the CLI and the TUI.

pub mod calendar;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod seed;
pub mod store;
pub mod tui;

pub use error::{Error, Result};
pub use store::Store;
