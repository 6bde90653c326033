//! JSON bodies exchanged with the backend, and status/body decoding.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::provider::ApiError;
use crate::domain::{CostAnalysisResult, CostCategory, DiagnosisCode, OverallRange};

pub const SEARCH_ICD_PATH: &str = "/api/search-icd";
pub const VALIDATE_ZIP_PATH: &str = "/api/validate-zip";
pub const ANALYZE_COSTS_PATH: &str = "/api/analyze-costs";
pub const CHATBOT_PATH: &str = "/api/chatbot";

#[derive(Debug, Serialize)]
pub struct SearchIcdReq<'a> {
    pub symptom: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SearchIcdRes {
    #[serde(default)]
    pub icd_codes: Vec<DiagnosisCode>,
}

#[derive(Debug, Serialize)]
pub struct ValidateZipReq<'a> {
    pub zip_code: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ValidateZipRes {
    #[serde(default)]
    pub valid: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeCostsRes {
    pub analysis: AnalysisBody,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisBody {
    pub selected_icd: DiagnosisCode,
    pub cost_analysis: CostAnalysisBody,
}

#[derive(Debug, Deserialize)]
pub struct CostAnalysisBody {
    #[serde(default)]
    pub categories: Vec<CostCategory>,
    #[serde(default)]
    pub overall_in_network_range: Option<OverallRange>,
    #[serde(default)]
    pub overall_out_network_range: Option<OverallRange>,
    #[serde(default)]
    pub zip_code: Option<String>,
}

impl From<AnalyzeCostsRes> for CostAnalysisResult {
    fn from(res: AnalyzeCostsRes) -> Self {
        let AnalysisBody {
            selected_icd,
            cost_analysis,
        } = res.analysis;
        CostAnalysisResult {
            selected_diagnosis: selected_icd,
            categories: cost_analysis.categories,
            overall_in_network_range: cost_analysis.overall_in_network_range,
            overall_out_network_range: cost_analysis.overall_out_network_range,
            zip_code: cost_analysis.zip_code,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatbotReq<'a> {
    pub query: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatbotRes {
    pub response: String,
}

/// Error payload of a non-success response: `{ "error": "..." }`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Turn a status code and raw body into a typed success value or an [`ApiError`].
///
/// Non-2xx statuses become `ApiError::Backend`, carrying the `error` field when the
/// body has one. A 2xx body that does not match `T` is `ApiError::Decode`.
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error);
        return Err(ApiError::Backend { status, message });
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_success_carries_backend_message() {
        let err = decode_body::<SearchIcdRes>(
            404,
            r#"{"error":"No matching ICD-10 codes found for this symptom"}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ApiError::Backend {
                status: 404,
                message: Some("No matching ICD-10 codes found for this symptom".into()),
            }
        );
    }

    #[test]
    fn non_success_with_html_body_has_no_message() {
        let err = decode_body::<SearchIcdRes>(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(
            err,
            ApiError::Backend {
                status: 502,
                message: None
            }
        );
    }

    #[test]
    fn success_with_wrong_shape_is_decode_error() {
        let err = decode_body::<AnalyzeCostsRes>(200, r#"{"success":true}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn analysis_body_maps_to_domain_result() {
        let body = r#"{
            "success": true,
            "analysis": {
                "symptom": "chest pain",
                "selected_icd": {"code": "R07.9", "name": "Chest pain, unspecified", "description": "Pain in the chest."},
                "cost_analysis": {
                    "categories": [
                        {"category": "Office Visits", "in_network_range": {"min": 200, "max": 400}, "out_network_range": null},
                        {"category": "Imaging", "in_network_range": {"min": 1000, "max": 3000}, "out_network_range": {"min": 1500, "max": 4200}}
                    ],
                    "overall_in_network_range": {"min": 1200, "max": 3400, "category_count": 2},
                    "overall_out_network_range": null,
                    "zip_code": "10001"
                }
            }
        }"#;
        let res: AnalyzeCostsRes = decode_body(200, body).unwrap();
        let result = CostAnalysisResult::from(res);
        assert_eq!(result.selected_diagnosis.code, "R07.9");
        assert_eq!(result.categories.len(), 2);
        assert!(result.categories[0].out_network_range.is_none());
        let overall = result.overall_in_network_range.unwrap();
        assert_eq!(overall.range.max(), 3400.0);
        assert_eq!(overall.category_count, Some(2));
        assert!(result.overall_out_network_range.is_none());
        assert_eq!(result.zip_code.as_deref(), Some("10001"));
    }

    #[test]
    fn validate_zip_body_without_valid_reads_false() {
        let res: ValidateZipRes = decode_body(200, r#"{"zip_code":"00000"}"#).unwrap();
        assert!(!res.valid);
    }
}
