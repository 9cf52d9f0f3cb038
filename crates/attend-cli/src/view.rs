//! Attendance record table for the View choice.

use std::io::Write;

use anyhow::Result;

use attend_store::{RecordStore, list_attendance};

/// Prints all attendance records as an aligned table, store order.
pub fn run<S: RecordStore, W: Write>(store: &S, output: &mut W) -> Result<()> {
    let records = match list_attendance(store) {
        Ok(records) => records,
        Err(err) => {
            writeln!(output, "Store unavailable: {err}")?;
            return Ok(());
        }
    };
    if records.is_empty() {
        writeln!(output, "No records found.")?;
        return Ok(());
    }

    writeln!(output)?;
    writeln!(output, "Attendance Records:")?;
    writeln!(
        output,
        "{:<16}{:<12}{:<10}{:<10}{:<9}Reason",
        "Name", "Date", "Enter", "Exit", "Status"
    )?;
    writeln!(output, "{}", "-".repeat(70))?;
    for record in records {
        writeln!(
            output,
            "{:<16}{:<12}{:<10}{:<10}{:<9}{}",
            record.name,
            record.date.format("%Y-%m-%d"),
            format_time(record.enter_time()),
            format_time(record.exit_time()),
            record.status_label(),
            record.reason().unwrap_or("-"),
        )?;
    }
    Ok(())
}

fn format_time(time: Option<chrono::NaiveTime>) -> String {
    time.map_or_else(|| "-".to_string(), |time| time.format("%H:%M:%S").to_string())
}
