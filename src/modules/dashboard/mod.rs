//! Dashboard module - KPI stats, earnings/income charts and occupancy panels

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, BarChart, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph,
};
use ratatui::Frame;

use crate::core::{Action, Context, Module};
use crate::modules::charts::occupancy::{seat_lines, table_lines, SEATS, TABLES, TURNOVER};
use crate::modules::charts::{ChartBoard, ChartKind, ChartSeries};
use crate::modules::export::{ExportFormat, ExportTarget};
use crate::modules::theme::{Palette, Theme};
use crate::ui::widgets::MiniSparkline;

/// Headline metrics: name, value, change against the previous period
pub const REPORT_METRICS: [(&str, &str, &str); 4] = [
    ("Ingresos totales", "€2.6M", "+4.5%"),
    ("Valor medio de pedido", "€455", "-0.5%"),
    ("Entradas vendidas", "5,888", "+4.5%"),
    ("Visitas a la página", "823,067", "+21.2%"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardPanel {
    Stats,
    Earnings,
    Income,
    Occupancy,
}

impl DashboardPanel {
    /// What `x` exports while this panel is focused
    pub fn export_target(&self) -> ExportTarget {
        match self {
            DashboardPanel::Stats => ExportTarget::Report,
            DashboardPanel::Earnings => ExportTarget::Earnings,
            DashboardPanel::Income => ExportTarget::Income,
            DashboardPanel::Occupancy => ExportTarget::Occupancy,
        }
    }
}

pub struct Dashboard {
    active_panel: DashboardPanel,
    charts: ChartBoard,
    loading: bool,
}

impl Dashboard {
    pub fn new(charts: ChartBoard) -> Self {
        Self {
            active_panel: DashboardPanel::Stats,
            charts,
            loading: false,
        }
    }

    pub fn active_panel(&self) -> DashboardPanel {
        self.active_panel
    }

    pub fn charts(&self) -> &ChartBoard {
        &self.charts
    }

    pub fn charts_mut(&mut self) -> &mut ChartBoard {
        &mut self.charts
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn next_panel(&mut self) {
        self.active_panel = match self.active_panel {
            DashboardPanel::Stats => DashboardPanel::Earnings,
            DashboardPanel::Earnings => DashboardPanel::Income,
            DashboardPanel::Income => DashboardPanel::Occupancy,
            DashboardPanel::Occupancy => DashboardPanel::Stats,
        };
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = match self.active_panel {
            DashboardPanel::Stats => DashboardPanel::Occupancy,
            DashboardPanel::Earnings => DashboardPanel::Stats,
            DashboardPanel::Income => DashboardPanel::Earnings,
            DashboardPanel::Occupancy => DashboardPanel::Income,
        };
    }

    /// KPIs tab: monthly and annual trends over the hourly occupancy bars
    pub fn render_kpis(&self, frame: &mut Frame, area: Rect) {
        let palette = self.charts.palette();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[0]);

        self.render_line_chart(frame, top[0], ChartKind::MonthlyKpis, false);
        self.render_line_chart(frame, top[1], ChartKind::AnnualKpis, false);

        let Some(hourly) = self.charts.series(ChartKind::HourlyOccupancy) else {
            return;
        };
        let bars: Vec<(&str, u64)> = hourly
            .rows()
            .map(|(label, value)| (label, value.round() as u64))
            .collect();
        let chart = BarChart::default()
            .block(panel_block(ChartKind::HourlyOccupancy.title(), false, &palette))
            .data(bars.as_slice())
            .max(100)
            .bar_width(5)
            .bar_gap(1)
            .bar_style(Style::default().fg(palette.accent))
            .value_style(Style::default().fg(palette.background).bg(palette.accent))
            .label_style(Style::default().fg(palette.muted));
        frame.render_widget(chart, rows[1]);
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let palette = self.charts.palette();
        let active = self.active_panel == DashboardPanel::Stats;
        let title = if self.loading {
            "Resumen (cargando…)"
        } else {
            "Resumen"
        };
        let block = panel_block(title, active, &palette);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(inner);

        let trend: Vec<u64> = self
            .charts
            .series(ChartKind::Income)
            .map(|series| series.values.iter().map(|v| *v as u64).collect())
            .unwrap_or_default();

        for (column, (name, value, change)) in columns.iter().zip(REPORT_METRICS.iter()) {
            let change_style = if change.starts_with('-') {
                Style::default().fg(palette.muted)
            } else {
                Style::default().fg(palette.accent)
            };
            let lines = vec![
                Line::from(Span::styled(*name, Style::default().fg(palette.muted))),
                Line::from(Span::styled(
                    *value,
                    Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(*change, change_style)),
            ];
            let text_area = Rect {
                height: column.height.min(3),
                ..*column
            };
            frame.render_widget(Paragraph::new(lines), text_area);

            if column.height > 3 {
                let spark_area = Rect {
                    y: column.y + 3,
                    height: 1,
                    width: column.width.saturating_sub(1),
                    ..*column
                };
                frame.render_widget(
                    MiniSparkline::new(&trend).style(Style::default().fg(palette.accent_soft)),
                    spark_area,
                );
            }
        }
    }

    fn render_line_chart(&self, frame: &mut Frame, area: Rect, kind: ChartKind, active: bool) {
        let palette = self.charts.palette();
        let Some(series) = self.charts.series(kind) else {
            return;
        };
        let points = series.points();
        let (y_min, y_max) = y_bounds(series);
        let unit = kind.value_unit();

        let dataset = Dataset::default()
            .name(series.label)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(palette.accent))
            .data(&points);

        let x_labels = edge_labels(series)
            .into_iter()
            .map(|label| Span::styled(label, Style::default().fg(palette.muted)))
            .collect();
        let y_labels = vec![
            Span::styled(unit.format(y_min), Style::default().fg(palette.muted)),
            Span::styled(unit.format(y_max), Style::default().fg(palette.muted)),
        ];

        let chart = Chart::new(vec![dataset])
            .block(panel_block(kind.title(), active, &palette))
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(palette.grid))
                    .bounds([0.0, series.values.len().saturating_sub(1).max(1) as f64])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(palette.grid))
                    .bounds([y_min, y_max])
                    .labels(y_labels),
            );
        frame.render_widget(chart, area);
    }

    fn render_occupancy(&self, frame: &mut Frame, area: Rect) {
        let palette = self.charts.palette();
        let active = self.active_panel == DashboardPanel::Occupancy;
        let block = panel_block("Ocupación", active, &palette);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);

        let mut table_text: Vec<String> = table_lines(&TABLES).to_vec();
        table_text.extend(TURNOVER.zone_lines());
        table_text.push(TURNOVER.time_line());
        table_text.push(TURNOVER.efficiency_line());
        render_occupancy_column(frame, columns[0], "Mesas", TABLES.ratio(), &table_text, &palette);

        let seat_text = seat_lines(&SEATS).to_vec();
        render_occupancy_column(frame, columns[1], "Asientos", SEATS.ratio(), &seat_text, &palette);
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(ChartBoard::new(Theme::default()))
    }
}

impl Module for Dashboard {
    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context) -> Action {
        match key.code {
            KeyCode::Tab => {
                self.next_panel();
                Action::None
            }
            KeyCode::BackTab => {
                self.prev_panel();
                Action::None
            }
            KeyCode::Char('x') => {
                Action::Export(self.active_panel.export_target(), ExportFormat::Csv)
            }
            KeyCode::Char('X') => {
                Action::Export(self.active_panel.export_target(), ExportFormat::Xlsx)
            }
            KeyCode::Char('P') => {
                Action::Export(self.active_panel.export_target(), ExportFormat::Pdf)
            }
            _ => Action::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, _ctx: &Context) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Min(8),
                Constraint::Length(9),
            ])
            .split(area);

        let chart_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        self.render_stats(frame, chunks[0]);
        self.render_line_chart(
            frame,
            chart_chunks[0],
            ChartKind::Earnings,
            self.active_panel == DashboardPanel::Earnings,
        );
        self.render_line_chart(
            frame,
            chart_chunks[1],
            ChartKind::Income,
            self.active_panel == DashboardPanel::Income,
        );
        self.render_occupancy(frame, chunks[2]);
    }
}

fn panel_block<'a>(title: &'a str, active: bool, palette: &Palette) -> Block<'a> {
    let border_style = if active {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.grid)
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style)
}

fn render_occupancy_column(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    ratio: f64,
    text: &[String],
    palette: &Palette,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(palette.accent).bg(palette.grid))
        .ratio(ratio)
        .label(format!("{title}: {:.0}%", ratio * 100.0));
    frame.render_widget(gauge, rows[0]);

    let lines: Vec<Line> = text
        .iter()
        .map(|line| Line::from(Span::styled(line.clone(), Style::default().fg(palette.text))))
        .collect();
    frame.render_widget(Paragraph::new(lines), rows[1]);
}

/// Axis bounds with the lower edge pinned at zero unless data goes negative
fn y_bounds(series: &ChartSeries) -> (f64, f64) {
    let min = series.min_value().min(0.0);
    let max = series.max_value();
    if max <= min {
        (min, min + 1.0)
    } else {
        (min, max)
    }
}

/// First, middle and last x labels
fn edge_labels(series: &ChartSeries) -> Vec<String> {
    match series.labels.len() {
        0 => Vec::new(),
        1 => vec![series.labels[0].to_string()],
        n => vec![
            series.labels[0].to_string(),
            series.labels[n / 2].to_string(),
            series.labels[n - 1].to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::charts::series;

    #[test]
    fn test_panel_cycle() {
        let mut dashboard = Dashboard::default();
        dashboard.next_panel();
        assert_eq!(dashboard.active_panel(), DashboardPanel::Earnings);
        dashboard.prev_panel();
        dashboard.prev_panel();
        assert_eq!(dashboard.active_panel(), DashboardPanel::Occupancy);
    }

    #[test]
    fn test_export_keys_follow_focus() {
        let mut dashboard = Dashboard::default();
        let mut ctx = Context::new();
        dashboard.handle_key(KeyEvent::from(KeyCode::Tab), &mut ctx);
        assert_eq!(
            dashboard.handle_key(KeyEvent::from(KeyCode::Char('X')), &mut ctx),
            Action::Export(ExportTarget::Earnings, ExportFormat::Xlsx)
        );
    }

    #[test]
    fn test_y_bounds_start_at_zero() {
        assert_eq!(y_bounds(&series(ChartKind::Income)), (0.0, 50000.0));
        assert_eq!(y_bounds(&series(ChartKind::Earnings)), (0.0, 500.0));
    }

    #[test]
    fn test_edge_labels() {
        let labels = edge_labels(&series(ChartKind::AnnualKpis));
        assert_eq!(labels, vec!["2020", "2022", "2023"]);
    }
}
