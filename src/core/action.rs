//! Actions that modules can return to communicate with the app

use crate::modules::date_range::DateRange;
use crate::modules::export::{ExportFormat, ExportTarget};

/// Actions returned by modules to communicate state changes
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action needed
    None,

    /// Switch to a specific view
    Navigate(NavigateTarget),

    /// Show a transient notification
    Notify(String, NotifyLevel),

    /// Flip between light and dark theme
    ToggleTheme,

    /// Write an export file
    Export(ExportTarget, ExportFormat),

    /// A new date range was applied to the dashboard
    ApplyRange(DateRange),

    /// Request quit
    Quit,
}

/// Navigation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateTarget {
    Dashboard,
    Kpis,
    Orders,
    Locations,
    Modules,
}

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotifyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyLevel::Info => "info",
            NotifyLevel::Success => "success",
            NotifyLevel::Warning => "warning",
            NotifyLevel::Error => "error",
        }
    }
}

impl Action {
    pub fn notify(message: impl Into<String>, level: NotifyLevel) -> Self {
        Action::Notify(message.into(), level)
    }
}
