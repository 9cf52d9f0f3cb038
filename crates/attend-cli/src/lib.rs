//! Attendance tracker CLI library.
//!
//! This crate provides the interactive menu, the view table, and the
//! CSV exporter on top of the store contract.

mod cli;
mod config;
pub mod export;
pub mod menu;
pub mod view;

pub use cli::Cli;
pub use config::Config;
