//! UI Modules
//!
//! Panels implement the Module trait and handle their own key input and
//! rendering; the rest hold state the app drives directly.
//!
//! Modules:
//! - dashboard: KPI stats, earnings/income charts, occupancy
//! - locations: searchable, paginated venue list
//! - toggles: product modules switched on and off
//! - charts: chart datasets restyled on theme changes
//! - date_range: header date presets
//! - export: CSV/XLSX files for the report and chart series
//! - notify: single-slot notification center
//! - shell: sidebar and header menus
//! - theme: light/dark palettes and the theme bus

pub mod charts;
pub mod dashboard;
pub mod date_range;
pub mod export;
pub mod locations;
pub mod notify;
pub mod shell;
pub mod theme;
pub mod toggles;
