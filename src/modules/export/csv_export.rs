//! CSV Export
//!
//! Writes export tables to CSV files.

use std::path::Path;

use super::ExportTable;
use crate::error::Result;

/// Write a table to a CSV file, returning the number of data rows
pub fn write_table(path: &Path, table: &ExportTable) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;

    // Write header
    wtr.write_record(&table.header)?;

    // Write data rows
    for row in &table.rows {
        wtr.write_record(row.iter().map(|cell| cell.to_string()))?;
    }

    wtr.flush()?;
    Ok(table.rows.len())
}
