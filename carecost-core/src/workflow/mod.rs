//! Workflow controller: symptom search, diagnosis selection, ZIP checks, cost analysis.
//!
//! The controller owns the [`Session`], calls the backend through [`CareCostApi`]
//! and pushes everything it wants shown into a [`WorkflowView`]. Front-ends decide
//! how to draw; the controller decides what is true.

pub mod error;
pub mod view;

pub use error::{
    WorkflowError, ANALYSIS_FALLBACK_MESSAGE, BAD_ZIP_MESSAGE, CHAT_FALLBACK_MESSAGE,
    EMPTY_QUERY_MESSAGE, EMPTY_SYMPTOM_MESSAGE, NO_SELECTION_MESSAGE, SEARCH_FALLBACK_MESSAGE,
};
pub use view::{Section, WorkflowView, ZipStatus};

use tracing::{debug, info, warn};

use crate::api::{AnalysisRequest, ApiError, CareCostApi};
use crate::domain::{CostAnalysisResult, DiagnosisCode};
use crate::report::{render_diagnoses, render_report};
use crate::session::Session;

/// ZIP codes are exactly five characters; anything else gets no feedback.
pub const ZIP_LENGTH: usize = 5;

/// Handle for one in-flight ZIP validation.
///
/// Only the most recently issued ticket may update the indicator; answers
/// carrying an older ticket are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipTicket {
    seq: u64,
    zip_code: String,
}

impl ZipTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }
}

/// Holds the view busy for as long as it lives.
struct BusyGuard<'a, V: WorkflowView> {
    view: &'a mut V,
}

impl<'a, V: WorkflowView> BusyGuard<'a, V> {
    fn acquire(view: &'a mut V) -> Self {
        view.set_busy(true);
        Self { view }
    }
}

impl<V: WorkflowView> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_busy(false);
    }
}

pub struct WorkflowController<A, V> {
    api: A,
    view: V,
    session: Session,
    zip_seq: u64,
    zip_status: ZipStatus,
}

impl<A: CareCostApi, V: WorkflowView> WorkflowController<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            session: Session::new(),
            zip_seq: 0,
            zip_status: ZipStatus::Unknown,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// What the ZIP indicator currently shows.
    pub fn zip_status(&self) -> ZipStatus {
        self.zip_status
    }

    /// Search diagnosis codes for a symptom.
    ///
    /// Blank input is rejected without a request. On success the previous
    /// candidates and selection are replaced, even by an empty list; on failure
    /// the session is left exactly as it was.
    pub fn search_diagnoses(&mut self, symptom_text: &str) -> Result<&[DiagnosisCode], WorkflowError> {
        let symptom = symptom_text.trim();
        if symptom.is_empty() {
            return Err(self.fail(WorkflowError::validation(EMPTY_SYMPTOM_MESSAGE)));
        }

        let outcome = {
            let _busy = BusyGuard::acquire(&mut self.view);
            self.api.search_icd(symptom)
        };

        let candidates = match outcome {
            Ok(candidates) => candidates,
            Err(e) => return Err(self.fail(WorkflowError::search(e))),
        };

        info!(symptom, matches = candidates.len(), "diagnosis search complete");
        self.session.replace_candidates(symptom.to_string(), candidates);
        self.view
            .show_diagnoses(&render_diagnoses(self.session.candidates(), None));
        self.view.show_section(Section::Diagnosis);
        Ok(self.session.candidates())
    }

    /// Choose one of the current candidates and move on to ZIP entry.
    pub fn select_diagnosis(&mut self, index: usize) -> Result<(), WorkflowError> {
        if !self.session.select(index) {
            let len = self.session.candidates().len();
            warn!(index, len, "diagnosis selection out of range");
            return Err(WorkflowError::SelectionOutOfRange { index, len });
        }

        debug!(index, "diagnosis selected");
        self.view.show_diagnoses(&render_diagnoses(
            self.session.candidates(),
            self.session.selected_index(),
        ));
        self.view.show_section(Section::ZipEntry);
        Ok(())
    }

    /// React to a change of the ZIP input.
    ///
    /// Input that is not exactly five characters clears the indicator and returns
    /// `None`. Otherwise returns a ticket for the caller to check, now or on a
    /// worker, and hand back to [`complete_zip_validation`](Self::complete_zip_validation).
    /// Either way every earlier ticket becomes stale.
    pub fn begin_zip_validation(&mut self, zip_text: &str) -> Option<ZipTicket> {
        self.zip_seq += 1;
        if zip_text.chars().count() != ZIP_LENGTH {
            self.set_zip_status(ZipStatus::Unknown);
            return None;
        }
        Some(ZipTicket {
            seq: self.zip_seq,
            zip_code: zip_text.to_string(),
        })
    }

    /// Apply the answer for a ticket. Returns the status shown, or `None` when the
    /// answer was stale or the backend could not be reached.
    pub fn complete_zip_validation(
        &mut self,
        ticket: ZipTicket,
        outcome: Result<bool, ApiError>,
    ) -> Option<ZipStatus> {
        if ticket.seq != self.zip_seq {
            debug!(
                zip = %ticket.zip_code,
                seq = ticket.seq,
                latest = self.zip_seq,
                "dropping stale zip validation"
            );
            return None;
        }

        let status = match outcome {
            Ok(true) => ZipStatus::Valid,
            Ok(false) => ZipStatus::Invalid,
            Err(e) if e.is_transport() => {
                debug!(zip = %ticket.zip_code, error = %e, "zip validation unavailable");
                return None;
            }
            Err(e) => {
                debug!(zip = %ticket.zip_code, error = %e, "zip rejected by backend");
                ZipStatus::Invalid
            }
        };
        self.set_zip_status(status);
        Some(status)
    }

    /// Check a ZIP synchronously and classify this input.
    ///
    /// `Unknown` means the input was not five characters or the backend could not
    /// be reached. In the second case the indicator keeps its previous state.
    pub fn validate_zip(&mut self, zip_text: &str) -> ZipStatus {
        let Some(ticket) = self.begin_zip_validation(zip_text) else {
            return ZipStatus::Unknown;
        };
        let outcome = self.api.validate_zip(ticket.zip_code());
        self.complete_zip_validation(ticket, outcome)
            .unwrap_or(ZipStatus::Unknown)
    }

    /// Run the cost analysis for the selected diagnosis in a ZIP area.
    ///
    /// The ZIP is checked before the selection; the indicator state plays no part.
    pub fn analyze_costs(&mut self, zip_text: &str) -> Result<CostAnalysisResult, WorkflowError> {
        let zip_code = zip_text.trim();
        if zip_code.chars().count() != ZIP_LENGTH {
            return Err(self.fail(WorkflowError::validation(BAD_ZIP_MESSAGE)));
        }
        let Some(index) = self.session.selected_index() else {
            return Err(self.fail(WorkflowError::validation(NO_SELECTION_MESSAGE)));
        };

        let request = AnalysisRequest {
            symptom: self.session.symptom_text().to_string(),
            icd_selection_index: index,
            zip_code: zip_code.to_string(),
        };

        let outcome = {
            let _busy = BusyGuard::acquire(&mut self.view);
            self.api.analyze_costs(&request)
        };

        let result = match outcome {
            Ok(result) => result,
            Err(e) => return Err(self.fail(WorkflowError::analysis(e))),
        };

        info!(
            code = %result.selected_diagnosis.code,
            zip = zip_code,
            categories = result.categories.len(),
            "cost analysis complete"
        );
        self.view.show_report(&render_report(&result));
        self.view.show_section(Section::Results);
        Ok(result)
    }

    /// Ask the backend assistant a free-form question. Leaves the session untouched.
    pub fn ask(&mut self, query: &str) -> Result<String, WorkflowError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(self.fail(WorkflowError::validation(EMPTY_QUERY_MESSAGE)));
        }

        let outcome = {
            let _busy = BusyGuard::acquire(&mut self.view);
            self.api.ask(query)
        };
        outcome.map_err(|e| self.fail(WorkflowError::chat(e)))
    }

    fn set_zip_status(&mut self, status: ZipStatus) {
        self.zip_status = status;
        self.view.show_zip_status(status);
    }

    fn fail(&mut self, err: WorkflowError) -> WorkflowError {
        match err.api_error() {
            Some(source) => warn!(error = %source, "{err}"),
            None => debug!("{err}"),
        }
        self.view.notify_error(&err.to_string());
        err
    }
}
