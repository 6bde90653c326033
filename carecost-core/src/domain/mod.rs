//! Domain types for CareCost

pub mod cost;
pub mod diagnosis;

pub use cost::{
    CostAnalysisResult, CostCategory, OverallRange, ProcedurePrice, Range, RangeError,
};
pub use diagnosis::DiagnosisCode;
