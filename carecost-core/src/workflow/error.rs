//! Workflow errors and the user-facing wording for each.

use thiserror::Error;

use crate::api::ApiError;

pub const EMPTY_SYMPTOM_MESSAGE: &str = "Please enter a symptom";
pub const BAD_ZIP_MESSAGE: &str = "Please enter a valid 5-digit ZIP code";
pub const NO_SELECTION_MESSAGE: &str = "Please select an ICD code first";
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a question";

pub const SEARCH_FALLBACK_MESSAGE: &str = "Failed to search ICD codes";
pub const ANALYSIS_FALLBACK_MESSAGE: &str = "Failed to analyze costs";
pub const CHAT_FALLBACK_MESSAGE: &str = "Failed to get a response";

/// Failure of a workflow operation. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    /// Local precondition failed; no request was sent.
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Search {
        message: String,
        #[source]
        source: ApiError,
    },

    #[error("{message}")]
    Analysis {
        message: String,
        #[source]
        source: ApiError,
    },

    #[error("{message}")]
    Chat {
        message: String,
        #[source]
        source: ApiError,
    },

    /// Front-end wiring passed an index the current candidate list does not have.
    #[error("diagnosis index {index} out of range for {len} candidates")]
    SelectionOutOfRange { index: usize, len: usize },
}

impl WorkflowError {
    pub fn validation(message: &str) -> Self {
        WorkflowError::Validation(message.to_string())
    }

    pub fn search(source: ApiError) -> Self {
        WorkflowError::Search {
            message: source.user_message(SEARCH_FALLBACK_MESSAGE),
            source,
        }
    }

    pub fn analysis(source: ApiError) -> Self {
        WorkflowError::Analysis {
            message: source.user_message(ANALYSIS_FALLBACK_MESSAGE),
            source,
        }
    }

    pub fn chat(source: ApiError) -> Self {
        WorkflowError::Chat {
            message: source.user_message(CHAT_FALLBACK_MESSAGE),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, WorkflowError::Validation(_))
    }

    /// The backend failure behind this error, if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            WorkflowError::Search { source, .. }
            | WorkflowError::Analysis { source, .. }
            | WorkflowError::Chat { source, .. } => Some(source),
            WorkflowError::Validation(_) | WorkflowError::SelectionOutOfRange { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NETWORK_ERROR_MESSAGE;

    #[test]
    fn search_error_prefers_backend_message() {
        let err = WorkflowError::search(ApiError::Backend {
            status: 404,
            message: Some("No matching ICD-10 codes found for this symptom".into()),
        });
        assert_eq!(err.to_string(), "No matching ICD-10 codes found for this symptom");
        assert!(err.api_error().is_some());
    }

    #[test]
    fn analysis_error_falls_back() {
        let err = WorkflowError::analysis(ApiError::Backend {
            status: 500,
            message: None,
        });
        assert_eq!(err.to_string(), ANALYSIS_FALLBACK_MESSAGE);
    }

    #[test]
    fn network_failure_uses_generic_wording() {
        let err = WorkflowError::search(ApiError::Network("connection refused".into()));
        assert_eq!(err.to_string(), NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn validation_errors_have_no_api_source() {
        let err = WorkflowError::validation(EMPTY_SYMPTOM_MESSAGE);
        assert!(err.is_validation());
        assert!(err.api_error().is_none());
        assert_eq!(err.to_string(), EMPTY_SYMPTOM_MESSAGE);
    }
}
