//! Backend API trait and structured error types.
//!
//! The CareCostApi trait abstracts over the backend transport so the workflow
//! controller can run against the HTTP client in production and a scripted
//! fake in tests.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::domain::{CostAnalysisResult, DiagnosisCode};

/// Structured error types for backend calls.
///
/// These are designed to be displayable in both CLI and TUI contexts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network unreachable: {0}")]
    Network(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("backend returned HTTP {status}{}", message_suffix(.message))]
    Backend { status: u16, message: Option<String> },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
pub const TIMEOUT_ERROR_MESSAGE: &str = "Request timed out. Please try again.";

impl ApiError {
    /// The message to show the user.
    ///
    /// A backend-supplied message wins; otherwise backend and decode failures use
    /// `fallback` and transport failures get their own generic wording.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Backend {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ApiError::Backend { .. } | ApiError::Decode(_) => fallback.to_string(),
            ApiError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ApiError::Timeout(_) => TIMEOUT_ERROR_MESSAGE.to_string(),
        }
    }

    /// True for failures that never reached a backend verdict.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Timeout(_))
    }
}

/// Body of a cost analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub symptom: String,
    pub icd_selection_index: usize,
    pub zip_code: String,
}

/// The four backend operations.
pub trait CareCostApi: Send + Sync {
    /// Match a symptom to candidate diagnosis codes, in backend order.
    fn search_icd(&self, symptom: &str) -> Result<Vec<DiagnosisCode>, ApiError>;

    /// Ask whether a ZIP code exists. A non-success response means "invalid".
    fn validate_zip(&self, zip_code: &str) -> Result<bool, ApiError>;

    /// Run the cost analysis for a previously searched symptom and chosen code.
    fn analyze_costs(&self, request: &AnalysisRequest) -> Result<CostAnalysisResult, ApiError>;

    /// Free-form medical question to the backend assistant.
    fn ask(&self, query: &str) -> Result<String, ApiError>;
}

impl<T: CareCostApi + ?Sized> CareCostApi for Arc<T> {
    fn search_icd(&self, symptom: &str) -> Result<Vec<DiagnosisCode>, ApiError> {
        (**self).search_icd(symptom)
    }

    fn validate_zip(&self, zip_code: &str) -> Result<bool, ApiError> {
        (**self).validate_zip(zip_code)
    }

    fn analyze_costs(&self, request: &AnalysisRequest) -> Result<CostAnalysisResult, ApiError> {
        (**self).analyze_costs(request)
    }

    fn ask(&self, query: &str) -> Result<String, ApiError> {
        (**self).ask(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_wins_over_fallback() {
        let err = ApiError::Backend {
            status: 404,
            message: Some("No matching ICD-10 codes found for this symptom".into()),
        };
        assert_eq!(
            err.user_message("Failed to search ICD codes"),
            "No matching ICD-10 codes found for this symptom"
        );
    }

    #[test]
    fn blank_backend_message_uses_fallback() {
        let err = ApiError::Backend {
            status: 500,
            message: Some("   ".into()),
        };
        assert_eq!(err.user_message("Failed to analyze costs"), "Failed to analyze costs");
        let err = ApiError::Decode("missing field".into());
        assert_eq!(err.user_message("Failed to analyze costs"), "Failed to analyze costs");
    }

    #[test]
    fn transport_errors_have_their_own_wording() {
        assert_eq!(
            ApiError::Network("refused".into()).user_message("x"),
            NETWORK_ERROR_MESSAGE
        );
        assert_eq!(
            ApiError::Timeout("30s".into()).user_message("x"),
            TIMEOUT_ERROR_MESSAGE
        );
        assert!(ApiError::Timeout("30s".into()).is_transport());
        assert!(!ApiError::Decode("x".into()).is_transport());
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = ApiError::Backend {
            status: 400,
            message: Some("Invalid zip code provided".into()),
        };
        assert_eq!(err.to_string(), "backend returned HTTP 400: Invalid zip code provided");
        let err = ApiError::Backend {
            status: 502,
            message: None,
        };
        assert_eq!(err.to_string(), "backend returned HTTP 502");
    }
}
