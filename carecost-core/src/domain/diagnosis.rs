//! DiagnosisCode - an ICD-10 match returned by the symptom search.

use serde::{Deserialize, Serialize};

/// A diagnosis classification code with a short name and a plain-language description.
///
/// Values only ever come from the backend; the client never invents one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisCode {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl DiagnosisCode {
    /// `"R51: Headache"`, the form used in headers and CLI listings.
    pub fn label(&self) -> String {
        format!("{}: {}", self.code, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_description_defaults_to_empty() {
        let code: DiagnosisCode =
            serde_json::from_str(r#"{"code":"R51","name":"Headache"}"#).unwrap();
        assert_eq!(code.code, "R51");
        assert!(code.description.is_empty());
    }

    #[test]
    fn label_joins_code_and_name() {
        let code = DiagnosisCode {
            code: "G44".into(),
            name: "Other headache syndromes".into(),
            description: String::new(),
        };
        assert_eq!(code.label(), "G44: Other headache syndromes");
    }
}
