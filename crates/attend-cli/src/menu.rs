//! The interactive session loop.
//!
//! Reads from an injected `BufRead` and writes to an injected `Write`
//! so tests can drive a full session with a scripted input buffer.
//! Every rejection is a one-line notice; the loop only ends on the
//! explicit Exit choice or end of input.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use chrono::Local;

use attend_core::Action;
use attend_store::{
    AttendanceError, DirectoryError, MarkOutcome, RecordStore, add_employee, list_employees,
    mark_attendance,
};

use crate::{export, view};

/// Runs the menu loop until Exit or end of input.
pub fn run<S, R, W>(store: &mut S, input: &mut R, output: &mut W) -> Result<()>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    loop {
        writeln!(output)?;
        writeln!(output, "Employee Attendance System")?;
        writeln!(output, "1. Add Employee")?;
        writeln!(output, "2. Mark Attendance (Enter / Exit / Leave)")?;
        writeln!(output, "3. View Attendance")?;
        writeln!(output, "4. Export to CSV")?;
        writeln!(output, "5. Exit")?;

        let Some(choice) = prompt(input, output, "Enter your choice (1-5): ")? else {
            break;
        };
        match choice.as_str() {
            "1" => add(store, input, output)?,
            "2" => mark(store, input, output)?,
            "3" => view::run(store, output)?,
            "4" => export::run(store, Path::new(export::EXPORT_FILE), output)?,
            "5" => {
                writeln!(output, "Goodbye!")?;
                break;
            }
            _ => writeln!(output, "Invalid choice. Please enter 1 to 5.")?,
        }
    }
    Ok(())
}

/// Writes a prompt and reads one trimmed line. `None` on end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn add<S, R, W>(store: &mut S, input: &mut R, output: &mut W) -> Result<()>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    let Some(name) = prompt(input, output, "Enter employee name: ")? else {
        return Ok(());
    };
    if name.is_empty() {
        writeln!(output, "Employee name cannot be empty.")?;
        return Ok(());
    }

    match add_employee(store, &name) {
        Ok(()) => writeln!(output, "{name} added successfully.")?,
        Err(DirectoryError::Duplicate(_)) => writeln!(output, "Employee already exists.")?,
        Err(DirectoryError::Store(err)) => writeln!(output, "Store unavailable: {err}")?,
    }
    Ok(())
}

fn mark<S, R, W>(store: &mut S, input: &mut R, output: &mut W) -> Result<()>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    let employees = match list_employees(store) {
        Ok(employees) => employees,
        Err(err) => {
            writeln!(output, "Store unavailable: {err}")?;
            return Ok(());
        }
    };
    if employees.is_empty() {
        writeln!(output, "No employees found.")?;
        return Ok(());
    }

    writeln!(output)?;
    writeln!(output, "Employees:")?;
    for (index, employee) in employees.iter().enumerate() {
        writeln!(output, "{}. {}", index + 1, employee.name)?;
    }

    let Some(selection) = prompt(input, output, "Enter employee number: ")? else {
        return Ok(());
    };
    // 1-based index into the listed sequence; anything else is
    // rejected with no side effects.
    let Some(employee) = selection
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|index| employees.get(index))
    else {
        writeln!(output, "Invalid selection.")?;
        return Ok(());
    };

    writeln!(output)?;
    writeln!(output, "Mark for: {}", employee.name)?;
    writeln!(output, "1. Enter")?;
    writeln!(output, "2. Exit")?;
    writeln!(output, "3. Leave")?;
    let Some(choice) = prompt(input, output, "Enter choice (1/2/3): ")? else {
        return Ok(());
    };
    let action = match choice.as_str() {
        "1" => Action::Enter,
        "2" => Action::Exit,
        "3" => {
            let Some(reason) = prompt(input, output, "Enter leave reason: ")? else {
                return Ok(());
            };
            Action::Leave { reason }
        }
        _ => {
            writeln!(output, "Invalid selection.")?;
            return Ok(());
        }
    };

    let now = Local::now().naive_local();
    match mark_attendance(store, &employee.name, now.date(), &action, now.time()) {
        Ok(MarkOutcome::Entered(time)) => {
            writeln!(output, "Enter marked at {}", time.format("%H:%M:%S"))?;
        }
        Ok(MarkOutcome::Exited(time)) => {
            writeln!(output, "Exit marked at {}", time.format("%H:%M:%S"))?;
        }
        Ok(MarkOutcome::LeaveRecorded { reason }) => {
            writeln!(output, "Leave marked with reason: {reason}")?;
        }
        Err(AttendanceError::Rejected(err)) => writeln!(output, "Cannot mark: {err}")?,
        Err(AttendanceError::Store(err)) => writeln!(output, "Store unavailable: {err}")?,
    }
    Ok(())
}
