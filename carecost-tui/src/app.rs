//! Application state - single-owner, main-thread only.
//!
//! All TUI state lives here. The controller runs search and analysis on the
//! main thread between frames; ZIP checks go to the worker thread via channels.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDateTime;
use tracing::warn;

use carecost_core::api::CareCostApi;
use carecost_core::workflow::{Section, WorkflowController, WorkflowError};

use crate::view::TuiView;
use crate::worker::{WorkerCommand, WorkerResponse};

pub const ERROR_HISTORY_CAP: usize = 50;

/// Controller as the TUI wires it.
pub type Controller = WorkflowController<Arc<dyn CareCostApi>, TuiView>;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Backend,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Input => "INPUT",
            ErrorCategory::Network => "NET",
            ErrorCategory::Backend => "API",
            ErrorCategory::Other => "ERR",
        }
    }

    pub fn of(err: &WorkflowError) -> Self {
        match err {
            WorkflowError::Validation(_) => ErrorCategory::Input,
            WorkflowError::SelectionOutOfRange { .. } => ErrorCategory::Other,
            _ => match err.api_error() {
                Some(api) if api.is_transport() => ErrorCategory::Network,
                _ => ErrorCategory::Backend,
            },
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    Help,
    ErrorHistory,
    /// Modal error notice; any key dismisses it.
    Alert(String),
    /// Free-form question to the backend assistant.
    Ask { input: String, answer: Option<String> },
}

/// Blocking backend work queued by input, run after the next frame is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Search,
    Analyze,
    Ask,
}

impl PendingAction {
    pub fn label(self) -> &'static str {
        match self {
            PendingAction::Search => "Searching ICD codes...",
            PendingAction::Analyze => "Analyzing costs...",
            PendingAction::Ask => "Asking the assistant...",
        }
    }
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub controller: Controller,

    // Inputs
    pub symptom_input: String,
    pub zip_input: String,
    pub diagnosis_cursor: usize,
    pub results_scroll: usize,

    pub pending: Option<PendingAction>,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(
        api: Arc<dyn CareCostApi>,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
    ) -> Self {
        Self {
            running: true,
            controller: WorkflowController::new(api, TuiView::default()),
            symptom_input: String::new(),
            zip_input: String::new(),
            diagnosis_cursor: 0,
            results_scroll: 0,
            pending: None,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
        }
    }

    pub fn view(&self) -> &TuiView {
        self.controller.view()
    }

    pub fn section(&self) -> Section {
        self.view().section
    }

    /// True while a request is queued or in flight.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some() || self.view().busy
    }

    /// Advance timers (the deferred ZIP-entry reveal).
    pub fn tick(&mut self, now: Instant) {
        self.controller.view_mut().tick(now);
    }

    /// Queue a blocking request. Ignored while another one is outstanding.
    pub fn queue(&mut self, action: PendingAction) {
        if self.pending.is_none() {
            self.pending = Some(action);
        }
    }

    /// Run the queued request, if any.
    pub fn run_pending(&mut self) {
        let Some(action) = self.pending.take() else {
            return;
        };

        match action {
            PendingAction::Search => {
                let symptom = self.symptom_input.clone();
                match self.controller.search_diagnoses(&symptom) {
                    Ok(codes) => {
                        let n = codes.len();
                        self.diagnosis_cursor = 0;
                        self.set_status(format!("{n} matching codes"));
                    }
                    Err(e) => self.record(&e, "symptom search"),
                }
            }
            PendingAction::Analyze => {
                let zip = self.zip_input.clone();
                match self.controller.analyze_costs(&zip) {
                    Ok(result) => {
                        self.results_scroll = 0;
                        self.set_status(format!(
                            "Cost analysis ready for {}",
                            result.selected_diagnosis.code
                        ));
                    }
                    Err(e) => self.record(&e, "cost analysis"),
                }
            }
            PendingAction::Ask => {
                let query = match &self.overlay {
                    Overlay::Ask { input, .. } => input.clone(),
                    _ => String::new(),
                };
                let outcome = self.controller.ask(&query);
                match outcome {
                    Ok(answer) => {
                        if let Overlay::Ask { answer: slot, .. } = &mut self.overlay {
                            *slot = Some(answer);
                        }
                    }
                    Err(e) => self.record(&e, "assistant"),
                }
            }
        }
        self.raise_alerts();
    }

    /// Choose the diagnosis under the cursor.
    pub fn select_current(&mut self) {
        let index = self.diagnosis_cursor;
        if let Err(e) = self.controller.select_diagnosis(index) {
            self.record(&e, "diagnosis selection");
        }
        self.raise_alerts();
    }

    /// The ZIP input changed: clear or re-check the indicator.
    pub fn zip_changed(&mut self) {
        let zip = self.zip_input.clone();
        if let Some(ticket) = self.controller.begin_zip_validation(&zip) {
            if self.worker_tx.send(WorkerCommand::ValidateZip { ticket }).is_err() {
                warn!("worker channel closed; zip check skipped");
            }
        }
    }

    pub fn handle_worker_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::ZipChecked { ticket, outcome } => {
                self.controller.complete_zip_validation(ticket, outcome);
            }
        }
    }

    /// Drain and apply all worker responses that have arrived.
    pub fn drain_worker(&mut self) {
        while let Ok(resp) = self.worker_rx.try_recv() {
            self.handle_worker_response(resp);
        }
    }

    /// Start over from the symptom step, keeping the last search results.
    pub fn restart(&mut self) {
        self.symptom_input.clear();
        self.zip_input.clear();
        self.zip_changed();
        while self.controller.view_mut().go_back() {}
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    fn record(&mut self, err: &WorkflowError, context: &str) {
        self.push_error(ErrorCategory::of(err), err.to_string(), context.to_string());
    }

    /// Controller notifications become a modal alert. An open assistant box keeps
    /// the typed question and shows the error in its answer slot instead.
    fn raise_alerts(&mut self) {
        let Some(last) = self.controller.view_mut().take_alerts().pop() else {
            return;
        };
        match &mut self.overlay {
            Overlay::Ask { answer, .. } => *answer = Some(format!("Error: {last}")),
            _ => self.overlay = Overlay::Alert(last),
        }
    }
}
