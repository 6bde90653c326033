//! HTTP backend client.
//!
//! Posts JSON to the four backend endpoints with a blocking reqwest client.
//! Every request is a single attempt bounded by the configured timeout; a
//! timeout is reported separately from other transport failures.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::provider::{AnalysisRequest, ApiError, CareCostApi};
use super::wire::{
    decode_body, AnalyzeCostsRes, ChatbotReq, ChatbotRes, SearchIcdReq, SearchIcdRes,
    ValidateZipReq, ValidateZipRes, ANALYZE_COSTS_PATH, CHATBOT_PATH, SEARCH_ICD_PATH,
    VALIDATE_ZIP_PATH,
};
use crate::config::ClientConfig;
use crate::domain::{CostAnalysisResult, DiagnosisCode};

/// Backend client speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::blocking::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let timeout = config.timeout();
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("carecost/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST `body` to `path` and return the status code with the raw response text.
    fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(u16, String), ApiError> {
        let url = self.endpoint(path);
        debug!(%url, "POST");

        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| self.transport_error(&url, e))?;

        let status = resp.status().as_u16();
        let text = resp.text().map_err(|e| self.transport_error(&url, e))?;
        debug!(%url, status, bytes = text.len(), "response received");
        Ok((status, text))
    }

    fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let (status, text) = self.post(path, body)?;
        decode_body(status, &text)
    }

    fn transport_error(&self, url: &str, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(format!("{url} after {}s", self.timeout.as_secs()))
        } else {
            ApiError::Network(format!("{url}: {e}"))
        }
    }
}

impl CareCostApi for HttpBackend {
    fn search_icd(&self, symptom: &str) -> Result<Vec<DiagnosisCode>, ApiError> {
        let res: SearchIcdRes = self.post_json(SEARCH_ICD_PATH, &SearchIcdReq { symptom })?;
        Ok(res.icd_codes)
    }

    fn validate_zip(&self, zip_code: &str) -> Result<bool, ApiError> {
        match self.post_json::<_, ValidateZipRes>(VALIDATE_ZIP_PATH, &ValidateZipReq { zip_code }) {
            Ok(res) => Ok(res.valid),
            Err(ApiError::Backend { status, .. }) => {
                debug!(zip_code, status, "zip rejected by backend");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn analyze_costs(&self, request: &AnalysisRequest) -> Result<CostAnalysisResult, ApiError> {
        let res: AnalyzeCostsRes = self.post_json(ANALYZE_COSTS_PATH, request)?;
        Ok(res.into())
    }

    fn ask(&self, query: &str) -> Result<String, ApiError> {
        let res: ChatbotRes = self.post_json(CHATBOT_PATH, &ChatbotReq { query })?;
        Ok(res.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let config = ClientConfig {
            base_url: "http://localhost:5000/".into(),
            timeout_secs: 5,
        };
        let backend = HttpBackend::new(&config).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5000");
        assert_eq!(
            backend.endpoint(SEARCH_ICD_PATH),
            "http://localhost:5000/api/search-icd"
        );
    }

    #[test]
    fn unreachable_backend_is_a_network_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let config = ClientConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 2,
        };
        let backend = HttpBackend::new(&config).unwrap();
        let err = backend.search_icd("headache").unwrap_err();
        assert!(err.is_transport(), "expected transport error, got {err:?}");
    }
}
