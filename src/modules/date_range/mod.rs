//! Dashboard date range presets

use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};

use crate::error::DashboardError;

/// Message shown when a custom range is applied without both dates
pub const MISSING_DATES_MESSAGE: &str = "Por favor, selecciona fechas de inicio y fin.";
pub const MISSING_PRESET_MESSAGE: &str =
    "Indica un rango: today, yesterday, last7, last30, thisMonth, lastMonth o custom.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePreset {
    Today,
    Yesterday,
    Last7,
    Last30,
    ThisMonth,
    LastMonth,
    Custom,
}

impl RangePreset {
    pub const ALL: [RangePreset; 7] = [
        RangePreset::Today,
        RangePreset::Yesterday,
        RangePreset::Last7,
        RangePreset::Last30,
        RangePreset::ThisMonth,
        RangePreset::LastMonth,
        RangePreset::Custom,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RangePreset::Today => "today",
            RangePreset::Yesterday => "yesterday",
            RangePreset::Last7 => "last7",
            RangePreset::Last30 => "last30",
            RangePreset::ThisMonth => "thisMonth",
            RangePreset::LastMonth => "lastMonth",
            RangePreset::Custom => "custom",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RangePreset::Today => "Hoy",
            RangePreset::Yesterday => "Ayer",
            RangePreset::Last7 => "Últimos 7 días",
            RangePreset::Last30 => "Últimos 30 días",
            RangePreset::ThisMonth => "Este mes",
            RangePreset::LastMonth => "Mes anterior",
            RangePreset::Custom => "Personalizado",
        }
    }
}

impl FromStr for RangePreset {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RangePreset::ALL
            .iter()
            .find(|preset| preset.key().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| {
                DashboardError::InvalidRange(format!("Rango desconocido: {}", s.trim()))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub preset: RangePreset,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Header greeting for this range
    pub fn title(&self, user_name: &str) -> String {
        let start = format_date(self.start);
        let end = format_date(self.end);
        if start == end {
            format!("Buenos días, {user_name} ({start})")
        } else {
            format!("Buenos días, {user_name} ({start} - {end})")
        }
    }
}

/// `dd/mm/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn parse_date(input: &str) -> Result<NaiveDate, DashboardError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| {
            DashboardError::InvalidRange(format!(
                "Fecha no válida: {} (formato AAAA-MM-DD)",
                input.trim()
            ))
        })
}

/// Range a non-custom preset covers relative to `today`.
///
/// Returns `None` for `Custom`; use [`custom_range`] for that.
pub fn preset_range(preset: RangePreset, today: NaiveDate) -> Option<DateRange> {
    let (start, end) = match preset {
        RangePreset::Today => (today, today),
        RangePreset::Yesterday => {
            let day = days_before(today, 1);
            (day, day)
        }
        RangePreset::Last7 => (days_before(today, 7), today),
        RangePreset::Last30 => (days_before(today, 30), today),
        RangePreset::ThisMonth => (first_of_month(today), today),
        RangePreset::LastMonth => {
            let first_this = first_of_month(today);
            let last_prev = days_before(first_this, 1);
            (first_of_month(last_prev), last_prev)
        }
        RangePreset::Custom => return None,
    };
    Some(DateRange { preset, start, end })
}

/// Dates pre-filled when switching to the custom preset
pub fn custom_defaults(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (days_before(today, 7), today)
}

/// Both bounds are required; ordering is not checked.
pub fn custom_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<DateRange, DashboardError> {
    match (start, end) {
        (Some(start), Some(end)) => Ok(DateRange {
            preset: RangePreset::Custom,
            start,
            end,
        }),
        _ => Err(DashboardError::InvalidRange(MISSING_DATES_MESSAGE.to_string())),
    }
}

/// Resolves `range <preset> [start end]` command arguments
pub fn range_from_args(args: &[String], today: NaiveDate) -> Result<DateRange, DashboardError> {
    let preset = match args.first() {
        Some(key) => key.parse::<RangePreset>()?,
        None => {
            return Err(DashboardError::InvalidRange(
                MISSING_PRESET_MESSAGE.to_string(),
            ))
        }
    };
    if preset != RangePreset::Custom {
        return preset_range(preset, today)
            .ok_or_else(|| DashboardError::InvalidRange(preset.key().to_string()));
    }
    let start = args.get(1).map(|s| parse_date(s)).transpose()?;
    let end = args.get(2).map(|s| parse_date(s)).transpose()?;
    custom_range(start, end)
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(date)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
