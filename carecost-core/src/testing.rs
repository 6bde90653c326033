//! Test doubles for the workflow: a scripted backend and a recording view.
//!
//! Shared by this crate's tests and the front-end crates, which drive the real
//! controller against these instead of a live backend.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::api::{AnalysisRequest, ApiError, CareCostApi};
use crate::domain::{CostAnalysisResult, CostCategory, DiagnosisCode, OverallRange, ProcedurePrice, Range};
use crate::report::{CostReport, DiagnosisList};
use crate::workflow::{Section, WorkflowView, ZipStatus};

/// One call received by [`FakeApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    SearchIcd(String),
    ValidateZip(String),
    AnalyzeCosts(AnalysisRequest),
    Ask(String),
}

#[derive(Debug, Default)]
struct Script {
    searches: VecDeque<Result<Vec<DiagnosisCode>, ApiError>>,
    zips: VecDeque<Result<bool, ApiError>>,
    analyses: VecDeque<Result<CostAnalysisResult, ApiError>>,
    answers: VecDeque<Result<String, ApiError>>,
    calls: Vec<ApiCall>,
}

/// Backend that replays queued responses in order and records every call.
///
/// An operation with nothing queued fails with a network error.
#[derive(Debug, Default)]
pub struct FakeApi {
    script: Mutex<Script>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(self, response: Result<Vec<DiagnosisCode>, ApiError>) -> Self {
        self.push_search(response);
        self
    }

    pub fn with_zip(self, response: Result<bool, ApiError>) -> Self {
        self.push_zip(response);
        self
    }

    pub fn with_analysis(self, response: Result<CostAnalysisResult, ApiError>) -> Self {
        self.push_analysis(response);
        self
    }

    pub fn with_answer(self, response: Result<String, ApiError>) -> Self {
        self.push_answer(response);
        self
    }

    pub fn push_search(&self, response: Result<Vec<DiagnosisCode>, ApiError>) {
        self.lock().searches.push_back(response);
    }

    pub fn push_zip(&self, response: Result<bool, ApiError>) {
        self.lock().zips.push_back(response);
    }

    pub fn push_analysis(&self, response: Result<CostAnalysisResult, ApiError>) {
        self.lock().analyses.push_back(response);
    }

    pub fn push_answer(&self, response: Result<String, ApiError>) {
        self.lock().answers.push_back(response);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn unscripted<T>(op: &str) -> Result<T, ApiError> {
    Err(ApiError::Network(format!("no scripted response for {op}")))
}

impl CareCostApi for FakeApi {
    fn search_icd(&self, symptom: &str) -> Result<Vec<DiagnosisCode>, ApiError> {
        let mut script = self.lock();
        script.calls.push(ApiCall::SearchIcd(symptom.to_string()));
        script
            .searches
            .pop_front()
            .unwrap_or_else(|| unscripted("search_icd"))
    }

    fn validate_zip(&self, zip_code: &str) -> Result<bool, ApiError> {
        let mut script = self.lock();
        script.calls.push(ApiCall::ValidateZip(zip_code.to_string()));
        script
            .zips
            .pop_front()
            .unwrap_or_else(|| unscripted("validate_zip"))
    }

    fn analyze_costs(&self, request: &AnalysisRequest) -> Result<CostAnalysisResult, ApiError> {
        let mut script = self.lock();
        script.calls.push(ApiCall::AnalyzeCosts(request.clone()));
        script
            .analyses
            .pop_front()
            .unwrap_or_else(|| unscripted("analyze_costs"))
    }

    fn ask(&self, query: &str) -> Result<String, ApiError> {
        let mut script = self.lock();
        script.calls.push(ApiCall::Ask(query.to_string()));
        script.answers.pop_front().unwrap_or_else(|| unscripted("ask"))
    }
}

/// Everything a controller pushed into a [`RecordingView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Busy(bool),
    Section(Section),
    Diagnoses(DiagnosisList),
    ZipStatus(ZipStatus),
    Report(CostReport),
    Error(String),
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub events: Vec<ViewEvent>,
}

impl RecordingView {
    pub fn errors(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Error(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn busy_transitions(&self) -> Vec<bool> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Busy(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    pub fn is_busy(&self) -> bool {
        self.busy_transitions().last().copied().unwrap_or(false)
    }

    pub fn last_section(&self) -> Option<Section> {
        self.events.iter().rev().find_map(|e| match e {
            ViewEvent::Section(s) => Some(*s),
            _ => None,
        })
    }

    pub fn last_diagnoses(&self) -> Option<&DiagnosisList> {
        self.events.iter().rev().find_map(|e| match e {
            ViewEvent::Diagnoses(list) => Some(list),
            _ => None,
        })
    }

    pub fn last_report(&self) -> Option<&CostReport> {
        self.events.iter().rev().find_map(|e| match e {
            ViewEvent::Report(report) => Some(report),
            _ => None,
        })
    }
}

impl WorkflowView for RecordingView {
    fn set_busy(&mut self, busy: bool) {
        self.events.push(ViewEvent::Busy(busy));
    }

    fn show_section(&mut self, section: Section) {
        self.events.push(ViewEvent::Section(section));
    }

    fn show_diagnoses(&mut self, list: &DiagnosisList) {
        self.events.push(ViewEvent::Diagnoses(list.clone()));
    }

    fn show_zip_status(&mut self, status: ZipStatus) {
        self.events.push(ViewEvent::ZipStatus(status));
    }

    fn show_report(&mut self, report: &CostReport) {
        self.events.push(ViewEvent::Report(report.clone()));
    }

    fn notify_error(&mut self, message: &str) {
        self.events.push(ViewEvent::Error(message.to_string()));
    }
}

/// Two chest-pain candidates.
pub fn sample_codes() -> Vec<DiagnosisCode> {
    vec![
        DiagnosisCode {
            code: "R07.9".into(),
            name: "Chest pain, unspecified".into(),
            description: "Pain in the chest without a known cause.".into(),
        },
        DiagnosisCode {
            code: "R07.89".into(),
            name: "Other chest pain".into(),
            description: String::new(),
        },
    ]
}

/// Analysis for the first of [`sample_codes`] in ZIP 10001: one priced category
/// and an in-network overall range only.
pub fn sample_analysis() -> CostAnalysisResult {
    let selected_diagnosis = sample_codes().swap_remove(0);
    CostAnalysisResult {
        selected_diagnosis,
        categories: vec![CostCategory {
            category_name: "Diagnostic Tests".into(),
            in_network_range: Range::new(1200.0, 3400.0).ok(),
            out_network_range: None,
            procedures: vec![ProcedurePrice {
                code: "93000".into(),
                in_network_price: Some(150.25),
                out_network_price: None,
            }],
        }],
        overall_in_network_range: Range::new(1200.0, 3400.0).ok().map(|range| OverallRange {
            range,
            category_count: Some(1),
        }),
        overall_out_network_range: None,
        zip_code: Some("10001".into()),
    }
}
