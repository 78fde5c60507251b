//! Camarai: a terminal dashboard for restaurant and ticketing venues

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod modules;
pub mod store;
pub mod ui;

pub use app::{App, AppSettings, Tab};
pub use error::{DashboardError, Result};
