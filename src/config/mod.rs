use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::modules::locations::DEFAULT_PAGE_SIZE;
use crate::modules::theme::Theme;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `light` or `dark`; a stored preference wins over this
    pub theme: Option<String>,

    pub page_size: usize,

    pub export_dir: Option<PathBuf>,

    pub notification_secs: u64,

    pub user_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: None,
            page_size: DEFAULT_PAGE_SIZE,
            export_dir: None,
            notification_secs: 5,
            user_name: "Fénix".to_string(),
        }
    }
}

impl Config {
    pub fn theme(&self) -> Option<Theme> {
        self.theme.as_deref().and_then(|t| t.parse().ok())
    }

    pub fn notification_lifetime(&self) -> Duration {
        Duration::from_secs(self.notification_secs.max(1))
    }
}

pub fn load() -> Config {
    match config_path() {
        Some(path) => load_from(&path),
        None => Config::default(),
    }
}

pub fn load_from(path: &Path) -> Config {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    parse(&content)
}

/// Malformed files fall back to the defaults
pub fn parse(content: &str) -> Config {
    toml::from_str::<Config>(content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("CAMARAI_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("camarai").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("camarai").join("config.toml"));
    }

    directories::ProjectDirs::from("app", "camarai", "camarai")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("camarai"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("camarai"));
    }
    directories::ProjectDirs::from("app", "camarai", "camarai")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn prefs_db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("prefs.sqlite3"))
}

pub fn default_log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("camarai.log"))
}
