//! Typed directory and attendance operations over the store contract.
//!
//! These functions own the document shapes for the two collections and
//! apply the core state machine's transitions: look up the existing
//! record, let `attend_core::transition` decide the mutation, apply it
//! in one place.

use chrono::{NaiveDate, NaiveTime};
use serde_json::{Value, json};
use thiserror::Error;

use attend_core::{Action, AttendanceRecord, DayStatus, Employee, MarkError, Transition, transition};

use crate::{Document, Filter, RecordStore, StoreError};

/// The employee directory collection.
pub const EMPLOYEES: &str = "employees";
/// The attendance events collection.
pub const ATTENDANCE: &str = "attendance";

/// Directory failures.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// An employee with exactly this name already exists.
    #[error("employee {0:?} already exists")]
    Duplicate(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Attendance marking failures: a state-machine rejection or a store
/// failure. Rejections are expected outcomes; store failures abort the
/// operation.
#[derive(Debug, Error)]
pub enum AttendanceError {
    #[error(transparent)]
    Rejected(#[from] MarkError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a successful mark recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkOutcome {
    Entered(NaiveTime),
    Exited(NaiveTime),
    LeaveRecorded { reason: String },
}

/// Adds an employee to the directory, enforcing name uniqueness.
pub fn add_employee<S: RecordStore>(store: &mut S, name: &str) -> Result<(), DirectoryError> {
    let filter = Filter::new().eq("name", name);
    if store.find_one(EMPLOYEES, &filter)?.is_some() {
        return Err(DirectoryError::Duplicate(name.to_string()));
    }
    store.insert_one(EMPLOYEES, json!({ "name": name }))?;
    tracing::debug!(name, "employee added");
    Ok(())
}

/// Lists all employees in store order. Empty is not an error.
pub fn list_employees<S: RecordStore>(store: &S) -> Result<Vec<Employee>, StoreError> {
    store
        .find_all(EMPLOYEES, None)?
        .into_iter()
        .map(decode)
        .collect()
}

/// Lists all attendance records in store order.
pub fn list_attendance<S: RecordStore>(store: &S) -> Result<Vec<AttendanceRecord>, StoreError> {
    store
        .find_all(ATTENDANCE, None)?
        .into_iter()
        .map(decode)
        .collect()
}

/// Marks an attendance event for (`name`, `date`).
///
/// Looks up the day's record, runs the state machine, and applies the
/// resulting mutation. Check-then-act; see the crate documentation for
/// the single-session assumption this relies on.
pub fn mark_attendance<S: RecordStore>(
    store: &mut S,
    name: &str,
    date: NaiveDate,
    action: &Action,
    now: NaiveTime,
) -> Result<MarkOutcome, AttendanceError> {
    let filter = Filter::new()
        .eq("name", name)
        .eq("date", format_date(date));
    let existing = match store.find_one(ATTENDANCE, &filter)? {
        None => None,
        Some(doc) => {
            let id = doc.id.clone();
            let record: AttendanceRecord = decode(doc)?;
            Some((id, record))
        }
    };

    let next = transition(existing.as_ref().map(|(_, record)| record), action, now)?;
    tracing::debug!(name, %date, ?next, "applying attendance transition");

    let outcome = match next {
        Transition::CreatePresent { enter_time } => {
            let record = AttendanceRecord::present(name, date, enter_time);
            store.insert_one(ATTENDANCE, record_document(&record))?;
            MarkOutcome::Entered(enter_time)
        }
        Transition::CreateLeave { reason } => {
            let record = AttendanceRecord::leave(name, date, reason.clone());
            store.insert_one(ATTENDANCE, record_document(&record))?;
            MarkOutcome::LeaveRecorded { reason }
        }
        Transition::SetEnter { enter_time } => {
            let (id, _) = existing.as_ref().ok_or(MarkError::MissingEntry)?;
            store.update_one(
                ATTENDANCE,
                id,
                json!({
                    "enter_time": format_time(enter_time),
                    "status": "Present",
                }),
            )?;
            MarkOutcome::Entered(enter_time)
        }
        Transition::SetExit { exit_time } => {
            let (id, _) = existing.as_ref().ok_or(MarkError::MissingEntry)?;
            store.update_one(
                ATTENDANCE,
                id,
                json!({ "exit_time": format_time(exit_time) }),
            )?;
            MarkOutcome::Exited(exit_time)
        }
    };
    Ok(outcome)
}

fn decode<T: serde::de::DeserializeOwned>(doc: Document) -> Result<T, StoreError> {
    serde_json::from_value(doc.body).map_err(|source| StoreError::InvalidDocument {
        id: doc.id.as_str().to_string(),
        source,
    })
}

/// Builds the flat document for a record, optional keys absent rather
/// than null.
fn record_document(record: &AttendanceRecord) -> Value {
    let mut body = serde_json::Map::new();
    body.insert("name".into(), json!(record.name));
    body.insert("date".into(), json!(format_date(record.date)));
    match &record.status {
        DayStatus::Present {
            enter_time,
            exit_time,
        } => {
            if let Some(time) = enter_time {
                body.insert("enter_time".into(), json!(format_time(*time)));
            }
            if let Some(time) = exit_time {
                body.insert("exit_time".into(), json!(format_time(*time)));
            }
            body.insert("status".into(), json!("Present"));
        }
        DayStatus::Leave { reason } => {
            body.insert("status".into(), json!("Leave"));
            body.insert("reason".into(), json!(reason));
        }
    }
    Value::Object(body)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}
