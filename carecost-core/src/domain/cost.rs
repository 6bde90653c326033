//! Cost analysis values - ranges, per-category breakdowns, and the overall result.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::DiagnosisCode;

/// Why a range received from the backend was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("range bound is not a finite number")]
    NotFinite,

    #[error("range bound is negative: {0}")]
    Negative(f64),

    #[error("range min {min} exceeds max {max}")]
    Inverted { min: f64, max: f64 },
}

fn check_bounds(min: f64, max: f64) -> Result<(), RangeError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(RangeError::NotFinite);
    }
    if min < 0.0 {
        return Err(RangeError::Negative(min));
    }
    if max < 0.0 {
        return Err(RangeError::Negative(max));
    }
    if min > max {
        return Err(RangeError::Inverted { min, max });
    }
    Ok(())
}

/// Minimum and maximum observed cost, in dollars.
///
/// Invariant: `0 <= min <= max`, both finite. Enforced on construction and on decode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct Range {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawRange {
    min: f64,
    max: f64,
}

impl TryFrom<RawRange> for Range {
    type Error = RangeError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Range::new(raw.min, raw.max)
    }
}

impl Range {
    pub fn new(min: f64, max: f64) -> Result<Self, RangeError> {
        check_bounds(min, max)?;
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

/// An overall (summed) range, optionally tagged with how many category ranges went into it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOverallRange")]
pub struct OverallRange {
    pub range: Range,
    pub category_count: Option<u32>,
}

#[derive(Deserialize)]
struct RawOverallRange {
    min: f64,
    max: f64,
    #[serde(default)]
    category_count: Option<u32>,
}

impl TryFrom<RawOverallRange> for OverallRange {
    type Error = RangeError;

    fn try_from(raw: RawOverallRange) -> Result<Self, Self::Error> {
        Ok(Self {
            range: Range::new(raw.min, raw.max)?,
            category_count: raw.category_count,
        })
    }
}

impl From<Range> for OverallRange {
    fn from(range: Range) -> Self {
        Self {
            range,
            category_count: None,
        }
    }
}

/// Priced procedure (CPT code) inside a category. Either price may be unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedurePrice {
    pub code: String,
    #[serde(default)]
    pub in_network_price: Option<f64>,
    #[serde(default)]
    pub out_network_price: Option<f64>,
}

/// One care category (e.g. "Office Visits") with its in- and out-of-network ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCategory {
    #[serde(rename = "category")]
    pub category_name: String,
    #[serde(default)]
    pub in_network_range: Option<Range>,
    #[serde(default)]
    pub out_network_range: Option<Range>,
    #[serde(rename = "cpt_details", default)]
    pub procedures: Vec<ProcedurePrice>,
}

/// Full result of a cost analysis for the selected diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostAnalysisResult {
    pub selected_diagnosis: DiagnosisCode,
    pub categories: Vec<CostCategory>,
    pub overall_in_network_range: Option<OverallRange>,
    pub overall_out_network_range: Option<OverallRange>,
    pub zip_code: Option<String>,
}

impl CostAnalysisResult {
    /// True when at least one overall range is present (the summary block is shown).
    pub fn has_overall(&self) -> bool {
        self.overall_in_network_range.is_some() || self.overall_out_network_range.is_some()
    }
}
