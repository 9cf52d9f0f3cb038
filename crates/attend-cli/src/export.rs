//! CSV export of all attendance records.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use attend_store::{RecordStore, list_attendance};

/// Fixed export file name; re-running export overwrites it.
pub const EXPORT_FILE: &str = "attendance_export.csv";

const HEADER: [&str; 6] = ["Name", "Date", "Enter Time", "Exit Time", "Status", "Reason"];

/// Writes every attendance record to `path` as CSV, store order.
///
/// With zero records this reports `No data to export.` and writes
/// nothing. Missing optional fields become empty CSV fields.
pub fn run<S: RecordStore, W: Write>(store: &S, path: &Path, output: &mut W) -> Result<()> {
    let records = match list_attendance(store) {
        Ok(records) => records,
        Err(err) => {
            writeln!(output, "Store unavailable: {err}")?;
            return Ok(());
        }
    };
    if records.is_empty() {
        writeln!(output, "No data to export.")?;
        return Ok(());
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writer.write_record(HEADER)?;
    for record in &records {
        writer.write_record([
            record.name.clone(),
            record.date.format("%Y-%m-%d").to_string(),
            format_time(record.enter_time()),
            format_time(record.exit_time()),
            record.status_label().to_string(),
            record.reason().unwrap_or_default().to_string(),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::debug!(rows = records.len(), path = %path.display(), "export written");
    writeln!(output, "Data exported to {}", path.display())?;
    Ok(())
}

fn format_time(time: Option<chrono::NaiveTime>) -> String {
    time.map_or_else(String::new, |time| time.format("%H:%M:%S").to_string())
}
