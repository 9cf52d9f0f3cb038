//! The attendance state machine.
//!
//! [`transition`] is a pure function from the existing record for a
//! (`name`, `date`) pair and a requested action to the mutation to
//! apply, or the rejection to report. Applying the mutation to the
//! store is the caller's job, which keeps the whole transition table
//! testable without any storage.

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

use crate::record::{AttendanceRecord, DayStatus};

/// A presence event requested for today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Enter,
    Exit,
    Leave { reason: String },
}

/// Which mark a rejected re-request collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    Enter,
    Exit,
}

impl std::fmt::Display for MarkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enter => f.write_str("enter"),
            Self::Exit => f.write_str("exit"),
        }
    }
}

/// Rejections from the state machine. All are non-fatal: the caller
/// reports them and returns to the menu.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkError {
    /// Exit requested with no prior enter and no existing record.
    #[error("entry not found; mark an enter first")]
    MissingEntry,
    /// Re-requesting an enter or exit already recorded today.
    #[error("{0} already marked for today")]
    AlreadyMarked(MarkKind),
    /// Leave requested when any record already exists for the day.
    #[error("an attendance record already exists for today")]
    RecordExists,
}

/// The mutation a successful transition produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// No record exists for the day: insert this one.
    CreatePresent { enter_time: NaiveTime },
    /// No record exists for the day: insert a leave record.
    CreateLeave { reason: String },
    /// Merge `enter_time` (and status Present) into the existing record.
    SetEnter { enter_time: NaiveTime },
    /// Merge `exit_time` into the existing record.
    SetExit { exit_time: NaiveTime },
}

/// Decides the allowed transition for `action` against the existing
/// record for the day, if any.
///
/// `now` is truncated to whole seconds before it is recorded.
pub fn transition(
    existing: Option<&AttendanceRecord>,
    action: &Action,
    now: NaiveTime,
) -> Result<Transition, MarkError> {
    let now = truncate_to_seconds(now);
    match action {
        Action::Enter => match existing.map(|record| &record.status) {
            None => Ok(Transition::CreatePresent { enter_time: now }),
            // Anomalous but reachable: a Present record written by an
            // external tool may lack an enter time.
            Some(DayStatus::Present {
                enter_time: None, ..
            }) => Ok(Transition::SetEnter { enter_time: now }),
            Some(DayStatus::Present { .. } | DayStatus::Leave { .. }) => {
                Err(MarkError::AlreadyMarked(MarkKind::Enter))
            }
        },
        Action::Exit => match existing.map(|record| &record.status) {
            None
            | Some(
                DayStatus::Present {
                    enter_time: None, ..
                }
                | DayStatus::Leave { .. },
            ) => Err(MarkError::MissingEntry),
            Some(DayStatus::Present {
                exit_time: Some(_), ..
            }) => Err(MarkError::AlreadyMarked(MarkKind::Exit)),
            Some(DayStatus::Present {
                exit_time: None, ..
            }) => Ok(Transition::SetExit { exit_time: now }),
        },
        Action::Leave { reason } => match existing {
            None => Ok(Transition::CreateLeave {
                reason: reason.clone(),
            }),
            Some(_) => Err(MarkError::RecordExists),
        },
    }
}

fn truncate_to_seconds(time: NaiveTime) -> NaiveTime {
    time.with_nanosecond(0).unwrap_or(time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn present_no_enter() -> AttendanceRecord {
        AttendanceRecord {
            name: "Asha".into(),
            date: date(),
            status: DayStatus::Present {
                enter_time: None,
                exit_time: None,
            },
        }
    }

    fn present_entered() -> AttendanceRecord {
        AttendanceRecord::present("Asha", date(), time(9, 0, 0))
    }

    fn present_exited() -> AttendanceRecord {
        AttendanceRecord {
            name: "Asha".into(),
            date: date(),
            status: DayStatus::Present {
                enter_time: Some(time(9, 0, 0)),
                exit_time: Some(time(17, 0, 0)),
            },
        }
    }

    fn on_leave() -> AttendanceRecord {
        AttendanceRecord::leave("Asha", date(), "Sick")
    }

    #[test]
    fn enter_with_no_record_creates_presence() {
        let result = transition(None, &Action::Enter, time(9, 0, 0));
        assert_eq!(
            result,
            Ok(Transition::CreatePresent {
                enter_time: time(9, 0, 0)
            })
        );
    }

    #[test]
    fn enter_fills_anomalous_present_without_enter_time() {
        let existing = present_no_enter();
        let result = transition(Some(&existing), &Action::Enter, time(9, 30, 0));
        assert_eq!(
            result,
            Ok(Transition::SetEnter {
                enter_time: time(9, 30, 0)
            })
        );
    }

    #[test]
    fn enter_is_rejected_once_marked() {
        for existing in [present_entered(), present_exited(), on_leave()] {
            let result = transition(Some(&existing), &Action::Enter, time(10, 0, 0));
            assert_eq!(result, Err(MarkError::AlreadyMarked(MarkKind::Enter)));
        }
    }

    #[test]
    fn exit_requires_a_prior_enter() {
        assert_eq!(
            transition(None, &Action::Exit, time(17, 0, 0)),
            Err(MarkError::MissingEntry)
        );
        for existing in [present_no_enter(), on_leave()] {
            let result = transition(Some(&existing), &Action::Exit, time(17, 0, 0));
            assert_eq!(result, Err(MarkError::MissingEntry));
        }
    }

    #[test]
    fn exit_after_enter_sets_exit_time() {
        let existing = present_entered();
        let result = transition(Some(&existing), &Action::Exit, time(17, 0, 0));
        assert_eq!(
            result,
            Ok(Transition::SetExit {
                exit_time: time(17, 0, 0)
            })
        );
    }

    #[test]
    fn exit_is_rejected_once_marked() {
        let existing = present_exited();
        let result = transition(Some(&existing), &Action::Exit, time(18, 0, 0));
        assert_eq!(result, Err(MarkError::AlreadyMarked(MarkKind::Exit)));
    }

    #[test]
    fn leave_with_no_record_creates_leave() {
        let action = Action::Leave {
            reason: "Sick".into(),
        };
        let result = transition(None, &action, time(9, 0, 0));
        assert_eq!(
            result,
            Ok(Transition::CreateLeave {
                reason: "Sick".into()
            })
        );
    }

    #[test]
    fn leave_is_rejected_when_any_record_exists() {
        let action = Action::Leave {
            reason: "Sick".into(),
        };
        for existing in [
            present_no_enter(),
            present_entered(),
            present_exited(),
            on_leave(),
        ] {
            let result = transition(Some(&existing), &action, time(9, 0, 0));
            assert_eq!(result, Err(MarkError::RecordExists));
        }
    }

    #[test]
    fn recorded_times_are_truncated_to_whole_seconds() {
        let now = NaiveTime::from_hms_milli_opt(9, 0, 0, 250).unwrap();
        let result = transition(None, &Action::Enter, now);
        assert_eq!(
            result,
            Ok(Transition::CreatePresent {
                enter_time: time(9, 0, 0)
            })
        );
    }

    #[test]
    fn rejection_messages_name_the_mark() {
        assert_eq!(
            MarkError::AlreadyMarked(MarkKind::Enter).to_string(),
            "enter already marked for today"
        );
        assert_eq!(
            MarkError::AlreadyMarked(MarkKind::Exit).to_string(),
            "exit already marked for today"
        );
    }
}
