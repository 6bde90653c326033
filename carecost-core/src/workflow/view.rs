//! The presentation seam: what the controller tells a front-end to show.

use serde::{Deserialize, Serialize};

use crate::report::{CostReport, DiagnosisList};

/// Which workflow section is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Symptom,
    Diagnosis,
    ZipEntry,
    Results,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Symptom,
        Section::Diagnosis,
        Section::ZipEntry,
        Section::Results,
    ];

    pub fn index(self) -> usize {
        match self {
            Section::Symptom => 0,
            Section::Diagnosis => 1,
            Section::ZipEntry => 2,
            Section::Results => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Symptom => "Symptom",
            Section::Diagnosis => "Diagnosis",
            Section::ZipEntry => "ZIP Code",
            Section::Results => "Results",
        }
    }

    /// The step before this one, if any.
    pub fn prev(self) -> Option<Section> {
        match self {
            Section::Symptom => None,
            Section::Diagnosis => Some(Section::Symptom),
            Section::ZipEntry => Some(Section::Diagnosis),
            Section::Results => Some(Section::ZipEntry),
        }
    }
}

/// Result of a ZIP check as shown by the validity indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZipStatus {
    /// No feedback: input is not five characters, or no check has completed.
    #[default]
    Unknown,
    Valid,
    Invalid,
}

impl ZipStatus {
    pub fn label(self) -> &'static str {
        match self {
            ZipStatus::Unknown => "",
            ZipStatus::Valid => "Valid ZIP code",
            ZipStatus::Invalid => "Invalid ZIP code",
        }
    }
}

/// Rendering target of a [`WorkflowController`](super::WorkflowController).
///
/// Implementations only present; they never call back into the controller.
pub trait WorkflowView {
    /// Global busy indicator around search and analysis requests.
    fn set_busy(&mut self, busy: bool);

    fn show_section(&mut self, section: Section);

    /// Replace the diagnosis list (also used to highlight a new selection).
    fn show_diagnoses(&mut self, list: &DiagnosisList);

    fn show_zip_status(&mut self, status: ZipStatus);

    fn show_report(&mut self, report: &CostReport);

    /// Blocking, user-visible error notification.
    fn notify_error(&mut self, message: &str);
}
