//! Directory entries and attendance records.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// An entry in the employee directory.
///
/// Names are unique across the directory (case-sensitive exact match)
/// and never change once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub name: String,
}

/// The attendance record for one employee on one calendar day.
///
/// (`name`, `date`) is the natural key: at most one record exists per
/// pair. The record is created by the first event of the day and
/// mutated in place by later events; it is never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttendanceRecord {
    /// Soft reference to an [`Employee`] by name.
    pub name: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub status: DayStatus,
}

/// What kind of day this record describes.
///
/// A day is either a presence day (carrying enter/exit times) or a
/// leave day (carrying a reason), never both. The tag maps to the
/// `status` field of the stored document; optional times are omitted
/// from the document entirely when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status")]
pub enum DayStatus {
    /// Physical attendance.
    ///
    /// `enter_time` is optional only to tolerate records written by an
    /// external tool; the state machine never creates a `Present`
    /// record without one.
    Present {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        enter_time: Option<NaiveTime>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exit_time: Option<NaiveTime>,
    },
    /// An absence with a free-text reason.
    Leave { reason: String },
}

impl AttendanceRecord {
    /// Creates a presence record for an enter event.
    pub fn present(name: impl Into<String>, date: NaiveDate, enter_time: NaiveTime) -> Self {
        Self {
            name: name.into(),
            date,
            status: DayStatus::Present {
                enter_time: Some(enter_time),
                exit_time: None,
            },
        }
    }

    /// Creates a leave record with the given reason.
    pub fn leave(name: impl Into<String>, date: NaiveDate, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date,
            status: DayStatus::Leave {
                reason: reason.into(),
            },
        }
    }

    pub fn enter_time(&self) -> Option<NaiveTime> {
        match self.status {
            DayStatus::Present { enter_time, .. } => enter_time,
            DayStatus::Leave { .. } => None,
        }
    }

    pub fn exit_time(&self) -> Option<NaiveTime> {
        match self.status {
            DayStatus::Present { exit_time, .. } => exit_time,
            DayStatus::Leave { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match &self.status {
            DayStatus::Present { .. } => None,
            DayStatus::Leave { reason } => Some(reason),
        }
    }

    /// The `status` field as stored in the document.
    pub const fn status_label(&self) -> &'static str {
        match self.status {
            DayStatus::Present { .. } => "Present",
            DayStatus::Leave { .. } => "Leave",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn presence_record_document_shape() {
        let record = AttendanceRecord::present(
            "Asha",
            date(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Asha",
                "date": "2024-01-01",
                "enter_time": "09:00:00",
                "status": "Present",
            })
        );
    }

    #[test]
    fn leave_record_carries_no_time_keys() {
        let record = AttendanceRecord::leave("Asha", date(), "Sick");

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Asha",
                "date": "2024-01-01",
                "status": "Leave",
                "reason": "Sick",
            })
        );
    }

    #[test]
    fn record_roundtrips_through_document() {
        let mut record = AttendanceRecord::present(
            "Asha",
            date(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        );
        if let DayStatus::Present { exit_time, .. } = &mut record.status {
            *exit_time = Some(NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        }

        let value = serde_json::to_value(&record).unwrap();
        let parsed: AttendanceRecord = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn tolerates_present_document_without_enter_time() {
        let value = json!({
            "name": "Asha",
            "date": "2024-01-01",
            "status": "Present",
        });

        let parsed: AttendanceRecord = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.enter_time(), None);
        assert_eq!(parsed.exit_time(), None);
        assert_eq!(parsed.status_label(), "Present");
    }
}
