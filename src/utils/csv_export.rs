//! CSV export shared by the admin bulk toolbars
//!
//! RFC 4180 quoting: fields containing a comma, quote or newline are
//! wrapped in double quotes with embedded quotes doubled.

use chrono::Utc;
use csv::WriterBuilder;

use crate::errors::{Result, RotatorError};

/// Serialize a header row plus data rows to CSV text
pub fn to_csv_string(headers: &[&str], rows: &[Vec<String>]) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer
        .write_record(headers)
        .map_err(|e| RotatorError::serialization(format!("Failed to write CSV header: {}", e)))?;

    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| RotatorError::serialization(format!("Failed to write CSV row: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RotatorError::serialization(format!("Failed to flush CSV: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| RotatorError::serialization(format!("CSV output not UTF-8: {}", e)))
}

/// Timestamped download filename, e.g. `web_results_export_20260824_120000.csv`
pub fn export_filename(prefix: &str) -> String {
    format!("{}_export_{}.csv", prefix, Utc::now().format("%Y%m%d_%H%M%S"))
}
