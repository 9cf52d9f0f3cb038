//! Core domain logic for the attendance tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - The employee directory entry and attendance record types
//! - The per-employee per-day attendance state machine

mod mark;
mod record;

pub use mark::{Action, MarkError, MarkKind, Transition, transition};
pub use record::{AttendanceRecord, DayStatus, Employee};
