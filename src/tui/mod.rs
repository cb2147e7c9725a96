//! TUI module: Terminal User Interface using Ratatui.
//!
//! A single entry form with a live results panel:
//! - Ten count fields, digits only
//! - Component scores and SACI percentages, recomputed on every edit
//! - Reference screen with terms and weights

mod app;
mod styles;
mod ui;

pub use app::{App, Screen};
pub use styles::ClinicalTheme;
