//! Chart datasets and their theme-dependent styling

pub mod format;
pub mod occupancy;

use tracing::debug;

use crate::modules::theme::{Palette, Theme, ThemeSubscription};

pub use format::{format_eur, format_percent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChartKind {
    Earnings,
    Income,
    MonthlyKpis,
    AnnualKpis,
    HourlyOccupancy,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Earnings,
        ChartKind::Income,
        ChartKind::MonthlyKpis,
        ChartKind::AnnualKpis,
        ChartKind::HourlyOccupancy,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Earnings => "Dinero ganado",
            ChartKind::Income => "Ingresos",
            ChartKind::MonthlyKpis => "KPIs mensuales",
            ChartKind::AnnualKpis => "KPIs anuales",
            ChartKind::HourlyOccupancy => "Ocupación horaria",
        }
    }

    pub fn style(&self) -> ChartStyle {
        match self {
            ChartKind::HourlyOccupancy => ChartStyle::Bar,
            _ => ChartStyle::Line,
        }
    }

    /// How y values are labelled on the axis
    pub fn value_unit(&self) -> ValueUnit {
        match self {
            ChartKind::Earnings | ChartKind::Income => ValueUnit::Euro,
            ChartKind::HourlyOccupancy => ValueUnit::Percent,
            ChartKind::MonthlyKpis | ChartKind::AnnualKpis => ValueUnit::Plain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStyle {
    Line,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueUnit {
    Euro,
    Percent,
    Plain,
}

impl ValueUnit {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueUnit::Euro => format_eur(value),
            ValueUnit::Percent => format_percent(value),
            ValueUnit::Plain => format!("{value}"),
        }
    }
}

/// One labelled series
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: &'static str,
    pub labels: Vec<&'static str>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    fn new(label: &'static str, labels: &[&'static str], values: &[f64]) -> Self {
        Self {
            label,
            labels: labels.to_vec(),
            values: values.to_vec(),
        }
    }

    /// `(index, value)` pairs for a line chart
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(idx, value)| (idx as f64, *value))
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.labels.iter().copied().zip(self.values.iter().copied())
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    pub fn min_value(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

pub fn series(kind: ChartKind) -> ChartSeries {
    match kind {
        ChartKind::Earnings => ChartSeries::new(
            "Dinero ganado",
            &[
                "06/03/2023", "10/03/2023", "13/03/2023", "16/03/2023", "21/03/2023",
                "23/03/2023", "27/03/2023", "31/03/2023",
            ],
            &[0.0, 200.0, 150.0, 500.0, 50.0, 100.0, 200.0, 0.0],
        ),
        ChartKind::Income => ChartSeries::new(
            "Ingresos mensuales",
            &[
                "Ene 2024", "Feb 2024", "Mar 2024", "Abr 2024", "May 2024", "Jun 2024",
                "Jul 2024", "Ago 2024",
            ],
            &[
                25000.0, 32000.0, 28000.0, 35000.0, 42000.0, 38000.0, 45000.0, 50000.0,
            ],
        ),
        ChartKind::MonthlyKpis => ChartSeries::new(
            "MRR",
            &[
                "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov",
                "Dic",
            ],
            &[
                42.5, 43.2, 44.1, 43.8, 44.5, 45.2, 45.8, 46.3, 46.9, 47.5, 48.1, 48.8,
            ],
        ),
        ChartKind::AnnualKpis => ChartSeries::new(
            "Ingresos Anuales (K€)",
            &["2020", "2021", "2022", "2023"],
            &[468.2, 512.4, 542.4, 625.8],
        ),
        ChartKind::HourlyOccupancy => ChartSeries::new(
            "Mesas ocupadas",
            &[
                "12:00", "13:00", "14:00", "15:00", "16:00", "17:00", "18:00", "19:00", "20:00",
                "21:00", "22:00", "23:00",
            ],
            &[
                45.0, 65.0, 85.0, 75.0, 55.0, 35.0, 45.0, 65.0, 75.0, 85.0, 65.0, 45.0,
            ],
        ),
    }
}

/// Holds every chart plus the palette they are currently styled with.
///
/// `generation` increases each time the board restyles, which is what the UI
/// and tests use to tell that a theme change reached the charts.
#[derive(Debug)]
pub struct ChartBoard {
    charts: Vec<(ChartKind, ChartSeries)>,
    theme: Theme,
    palette: Palette,
    generation: u64,
    subscription: Option<ThemeSubscription>,
}

impl ChartBoard {
    pub fn new(theme: Theme) -> Self {
        Self {
            charts: ChartKind::ALL.iter().map(|kind| (*kind, series(*kind))).collect(),
            theme,
            palette: theme.palette(),
            generation: 1,
            subscription: None,
        }
    }

    pub fn with_subscription(mut self, subscription: ThemeSubscription) -> Self {
        self.subscription = Some(subscription);
        self
    }

    /// Drains pending theme events; returns true when the board restyled
    pub fn sync_theme(&mut self) -> bool {
        let latest = self.subscription.as_ref().and_then(|sub| sub.latest());
        match latest {
            Some(theme) => {
                self.restyle(theme);
                true
            }
            None => false,
        }
    }

    pub fn restyle(&mut self, theme: Theme) {
        self.theme = theme;
        self.palette = theme.palette();
        self.generation += 1;
        debug!(theme = theme.as_str(), generation = self.generation, "charts restyled");
    }

    pub fn series(&self, kind: ChartKind) -> Option<&ChartSeries> {
        self.charts
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, series)| series)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::theme::ThemeBus;

    #[test]
    fn test_series_lengths_match() {
        for kind in ChartKind::ALL {
            let s = series(kind);
            assert_eq!(s.labels.len(), s.values.len(), "{:?}", kind);
        }
    }

    #[test]
    fn test_occupancy_is_bar_chart() {
        assert_eq!(ChartKind::HourlyOccupancy.style(), ChartStyle::Bar);
        assert_eq!(ChartKind::Income.style(), ChartStyle::Line);
        assert_eq!(series(ChartKind::HourlyOccupancy).max_value(), 85.0);
    }

    #[test]
    fn test_board_restyles_on_published_theme() {
        let mut bus = ThemeBus::new();
        let mut board = ChartBoard::new(Theme::Light).with_subscription(bus.subscribe());
        assert!(!board.sync_theme());
        let before = board.generation();

        bus.publish(Theme::Dark);
        assert!(board.sync_theme());
        assert_eq!(board.theme(), Theme::Dark);
        assert_eq!(board.palette(), Theme::Dark.palette());
        assert_eq!(board.generation(), before + 1);
    }

    #[test]
    fn test_board_without_subscription_never_restyles() {
        let mut board = ChartBoard::new(Theme::Dark);
        assert!(!board.sync_theme());
        assert_eq!(board.generation(), 1);
    }
}
