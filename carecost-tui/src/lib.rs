//! CareCost TUI - terminal front-end for the symptom-to-cost lookup
//!
//! Walks the user through four sections:
//! - Symptom entry and ICD-10 search
//! - Diagnosis selection
//! - ZIP code entry with a live validity indicator
//! - Cost results by category with an overall summary

pub mod app;
pub mod input;
pub mod persistence;
pub mod theme;
pub mod ui;
pub mod view;
pub mod worker;

pub use app::AppState;
pub use input::handle_key;
pub use theme::Theme;
pub use view::TuiView;

#[cfg(test)]
mod test_helpers;
