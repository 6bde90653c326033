//! TuiView - the controller's rendering target inside the terminal app.
//!
//! Holds exactly what the controller pushed; the ui module reads it every frame.

use std::time::{Duration, Instant};

use carecost_core::report::{CostReport, DiagnosisList};
use carecost_core::workflow::{Section, WorkflowView, ZipStatus};

/// Pause between picking a diagnosis and revealing ZIP entry, so the
/// highlighted card is seen before the section changes.
pub const SELECT_REVEAL_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub struct TuiView {
    pub section: Section,
    /// Furthest section reached; earlier ones stay reachable with Esc.
    pub reached: Section,
    pub diagnoses: DiagnosisList,
    pub zip_status: ZipStatus,
    pub report: Option<CostReport>,
    pub busy: bool,
    deferred: Option<(Section, Instant)>,
    alerts: Vec<String>,
}

impl Default for TuiView {
    fn default() -> Self {
        Self {
            section: Section::Symptom,
            reached: Section::Symptom,
            diagnoses: DiagnosisList::default(),
            zip_status: ZipStatus::Unknown,
            report: None,
            busy: false,
            deferred: None,
            alerts: Vec::new(),
        }
    }
}

impl TuiView {
    /// Promote a deferred section switch once its time has come.
    pub fn tick(&mut self, now: Instant) {
        if let Some((section, due)) = self.deferred {
            if now >= due {
                self.deferred = None;
                self.enter(section);
            }
        }
    }

    pub fn has_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    /// Move to an earlier section without involving the controller.
    pub fn go_back(&mut self) -> bool {
        self.deferred = None;
        match self.section.prev() {
            Some(prev) => {
                self.section = prev;
                true
            }
            None => false,
        }
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    fn enter(&mut self, section: Section) {
        self.section = section;
        if section.index() > self.reached.index() {
            self.reached = section;
        }
    }
}

impl WorkflowView for TuiView {
    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    fn show_section(&mut self, section: Section) {
        if section == Section::ZipEntry && self.section == Section::Diagnosis {
            self.deferred = Some((section, Instant::now() + SELECT_REVEAL_DELAY));
        } else {
            self.deferred = None;
            self.enter(section);
        }
    }

    fn show_diagnoses(&mut self, list: &DiagnosisList) {
        self.diagnoses = list.clone();
    }

    fn show_zip_status(&mut self, status: ZipStatus) {
        self.zip_status = status;
    }

    fn show_report(&mut self, report: &CostReport) {
        self.report = Some(report.clone());
    }

    fn notify_error(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
