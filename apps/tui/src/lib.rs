// Library surface shared by the binary and the integration tests
pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod logging;
pub mod ui;

pub use error::{DashboardError, Result};
