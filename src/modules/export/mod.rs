//! Export Module
//!
//! Provides CSV and XLSX export for the dashboard report and chart series.
//!
//! - `:export <target> <format>` triggers an export
//! - targets: report, earnings, income, occupancy
//! - formats: csv, xlsx (pdf is acknowledged but not available)
//! - Files saved to the configured export dir, else the data dir `exports/`

mod csv_export;
mod xlsx_export;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use directories::ProjectDirs;
use tracing::{info, warn};

use crate::core::{Action, NotifyLevel};
use crate::error::{DashboardError, Result};
use crate::modules::charts::{series, ChartKind};
use crate::modules::dashboard::REPORT_METRICS;

pub const PDF_UNAVAILABLE_MESSAGE: &str = "Función de exportación a PDF en desarrollo";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    Report,
    Earnings,
    Income,
    Occupancy,
}

impl FromStr for ExportTarget {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "report" | "dashboard" | "informe" => Ok(ExportTarget::Report),
            "earnings" | "dinero" => Ok(ExportTarget::Earnings),
            "income" | "ingresos" => Ok(ExportTarget::Income),
            "occupancy" | "horaria" | "ocupacion" => Ok(ExportTarget::Occupancy),
            other => Err(DashboardError::UnsupportedExport(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "xls" | "excel" => Ok(ExportFormat::Xlsx),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(DashboardError::UnsupportedExport(other.to_string())),
        }
    }
}

/// Parses `export <target> <format>` arguments; the format defaults to csv
pub fn parse_export_args(args: &[String]) -> Result<(ExportTarget, ExportFormat)> {
    let target = args
        .first()
        .ok_or_else(|| DashboardError::UnsupportedExport("falta el informe".to_string()))?
        .parse()?;
    let format = match args.get(1) {
        Some(format) => format.parse()?,
        None => ExportFormat::Csv,
    };
    Ok((target, format))
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) => f.write_str(text),
            Cell::Number(value) => write!(f, "{value}"),
        }
    }
}

/// Header plus rows, shared by both writers
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub sheet: &'static str,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

fn text(value: &str) -> Cell {
    Cell::Text(value.to_string())
}

pub fn report_table() -> ExportTable {
    ExportTable {
        sheet: "Dashboard",
        header: vec!["Métrica".into(), "Valor".into(), "Cambio".into()],
        rows: REPORT_METRICS
            .iter()
            .map(|(name, value, change)| vec![text(name), text(value), text(change)])
            .collect(),
    }
}

pub fn chart_table(kind: ChartKind) -> ExportTable {
    let (sheet, first_column, value_column) = match kind {
        ChartKind::HourlyOccupancy => ("OcupacionHoraria", "Hora", "Ocupación (%)"),
        ChartKind::Earnings => ("DineroGanado", "Fecha", "Dinero ganado"),
        ChartKind::Income => ("Ingresos", "Mes", "Ingresos mensuales"),
        ChartKind::MonthlyKpis => ("KpisMensuales", "Mes", "MRR"),
        ChartKind::AnnualKpis => ("KpisAnuales", "Año", "Ingresos Anuales (K€)"),
    };
    let data = series(kind);
    ExportTable {
        sheet,
        header: vec![first_column.to_string(), value_column.to_string()],
        rows: data
            .rows()
            .map(|(label, value)| vec![text(label), Cell::Number(value)])
            .collect(),
    }
}

impl ExportTarget {
    pub fn table(&self) -> ExportTable {
        match self {
            ExportTarget::Report => report_table(),
            ExportTarget::Earnings => chart_table(ChartKind::Earnings),
            ExportTarget::Income => chart_table(ChartKind::Income),
            ExportTarget::Occupancy => chart_table(ChartKind::HourlyOccupancy),
        }
    }

    pub fn filename(&self, format: ExportFormat, today: NaiveDate) -> String {
        let stem = match self {
            ExportTarget::Report => format!("dashboard-report-{}", today.format("%Y-%m-%d")),
            ExportTarget::Earnings => "dinero-ganado".to_string(),
            ExportTarget::Income => "ingresos".to_string(),
            ExportTarget::Occupancy => "ocupacion-horaria".to_string(),
        };
        format!("{}.{}", stem, format.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub rows: usize,
}

/// Default export directory, creating it if needed
pub fn default_export_dir() -> std::io::Result<PathBuf> {
    let export_dir = ProjectDirs::from("app", "camarai", "camarai")
        .map(|dirs| dirs.data_dir().join("exports"))
        .unwrap_or_else(|| PathBuf::from(".camarai").join("exports"));
    fs::create_dir_all(&export_dir)?;
    Ok(export_dir)
}

/// Write `target` in `format` under `dir`
pub fn export_to(
    target: ExportTarget,
    format: ExportFormat,
    dir: &Path,
    today: NaiveDate,
) -> Result<ExportOutcome> {
    let path = dir.join(target.filename(format, today));
    let table = target.table();
    let rows = match format {
        ExportFormat::Csv => {
            fs::create_dir_all(dir)?;
            csv_export::write_table(&path, &table)?
        }
        ExportFormat::Xlsx => {
            fs::create_dir_all(dir)?;
            xlsx_export::write_table(&path, &table)?
        }
        ExportFormat::Pdf => return Err(DashboardError::UnsupportedExport("pdf".to_string())),
    };
    info!(path = %path.display(), rows, "export written");
    Ok(ExportOutcome { path, rows })
}

/// Export and describe the result as a notification
pub fn export_action(
    target: ExportTarget,
    format: ExportFormat,
    dir: Option<&Path>,
    today: NaiveDate,
) -> Action {
    if format == ExportFormat::Pdf {
        return Action::notify(PDF_UNAVAILABLE_MESSAGE, NotifyLevel::Info);
    }

    let export_dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => match default_export_dir() {
            Ok(dir) => dir,
            Err(e) => {
                return Action::notify(
                    format!("No se pudo crear el directorio de exportación: {}", e),
                    NotifyLevel::Error,
                )
            }
        },
    };

    match export_to(target, format, &export_dir, today) {
        Ok(outcome) => Action::notify(
            format!(
                "Exportadas {} filas a {}",
                outcome.rows,
                outcome.path.display()
            ),
            NotifyLevel::Success,
        ),
        Err(e) => {
            warn!(error = %e, "export failed");
            Action::notify(format!("Error al exportar: {}", e), NotifyLevel::Error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 9).unwrap()
    }

    #[test]
    fn test_filenames() {
        assert_eq!(
            ExportTarget::Report.filename(ExportFormat::Csv, today()),
            "dashboard-report-2024-05-09.csv"
        );
        assert_eq!(
            ExportTarget::Occupancy.filename(ExportFormat::Xlsx, today()),
            "ocupacion-horaria.xlsx"
        );
    }

    #[test]
    fn test_occupancy_table() {
        let table = chart_table(ChartKind::HourlyOccupancy);
        assert_eq!(table.header, vec!["Hora", "Ocupación (%)"]);
        assert_eq!(table.rows.len(), 12);
        assert_eq!(
            table.rows[0],
            vec![Cell::Text("12:00".to_string()), Cell::Number(45.0)]
        );
    }

    #[test]
    fn test_parse_export_args() {
        let args = vec!["ocupacion".to_string(), "xls".to_string()];
        assert_eq!(
            parse_export_args(&args).unwrap(),
            (ExportTarget::Occupancy, ExportFormat::Xlsx)
        );
        let args = vec!["report".to_string()];
        assert_eq!(
            parse_export_args(&args).unwrap(),
            (ExportTarget::Report, ExportFormat::Csv)
        );
        assert!(parse_export_args(&["orders".to_string()]).is_err());
        assert!(parse_export_args(&[]).is_err());
    }

    #[test]
    fn test_pdf_is_acknowledged_only() {
        let action = export_action(ExportTarget::Report, ExportFormat::Pdf, None, today());
        assert_eq!(
            action,
            Action::Notify(PDF_UNAVAILABLE_MESSAGE.to_string(), NotifyLevel::Info)
        );
    }
}
