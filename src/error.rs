use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error al generar el CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Error al empaquetar la hoja de cálculo: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("{0}")]
    InvalidRange(String),

    #[error("Exportación no soportada: {0}")]
    UnsupportedExport(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
