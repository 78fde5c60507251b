//! Shared context passed to modules

use crate::modules::theme::{Palette, Theme};

/// Shared context available to all modules
#[derive(Debug, Clone)]
pub struct Context {
    /// Active theme, kept in sync by the app after every toggle
    pub theme: Theme,

    /// Name used in the header greeting
    pub user_name: String,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            user_name: "Fénix".to_string(),
        }
    }
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }
}
