//! Report view-models.
//!
//! Pure functions from workflow state to display structures. No I/O and no
//! business rules: the TUI draws these with ratatui widgets, the CLI prints
//! them through `Display`.

use std::fmt;

use crate::domain::{CostAnalysisResult, CostCategory, DiagnosisCode, OverallRange, Range};
use crate::format::{format_price, format_range};

pub const NO_DATA: &str = "No data available";
pub const NO_MATCHES: &str = "No matching codes found.";
pub const SUMMARY_TITLE: &str = "Overall Cost Summary";

pub const IN_NETWORK_LABEL: &str = "In-Network Range";
pub const OUT_NETWORK_LABEL: &str = "Out-of-Network Range";
pub const TOTAL_IN_NETWORK_LABEL: &str = "Total In-Network Range";
pub const TOTAL_OUT_NETWORK_LABEL: &str = "Total Out-of-Network Range";

/// A formatted range, or the explicit placeholder when the backend had no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeText {
    Amount(String),
    NoData,
}

impl RangeText {
    pub fn from_range(range: Option<&Range>) -> Self {
        match range {
            Some(r) => RangeText::Amount(format_range(r)),
            None => RangeText::NoData,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RangeText::Amount(s) => s,
            RangeText::NoData => NO_DATA,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, RangeText::NoData)
    }
}

impl fmt::Display for RangeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisHeader {
    pub code: String,
    pub name: String,
    pub description: String,
}

impl From<&DiagnosisCode> for DiagnosisHeader {
    fn from(d: &DiagnosisCode) -> Self {
        Self {
            code: d.code.clone(),
            name: d.name.clone(),
            description: d.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostRow {
    pub label: &'static str,
    pub value: RangeText,
}

/// One priced procedure line inside a category card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureLine {
    pub code: String,
    pub in_network: String,
    pub out_network: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCard {
    pub title: String,
    /// In-network row first, then out-of-network.
    pub rows: Vec<CostRow>,
    pub procedures: Vec<ProcedureLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryItem {
    pub label: &'static str,
    pub amount: RangeText,
    pub category_count: Option<u32>,
}

impl SummaryItem {
    /// `"Sum of 2 category ranges"` when the backend reported the count.
    pub fn note(&self) -> Option<String> {
        match self.category_count {
            Some(1) => Some("Sum of 1 category range".to_string()),
            Some(n) => Some(format!("Sum of {n} category ranges")),
            None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryBlock {
    pub title: &'static str,
    pub items: Vec<SummaryItem>,
}

/// Everything the results view shows, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostReport {
    pub header: DiagnosisHeader,
    pub categories: Vec<CategoryCard>,
    /// Present only when at least one overall range exists.
    pub summary: Option<SummaryBlock>,
    pub zip_code: Option<String>,
}

fn procedure_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p.is_finite() => format_price(p),
        _ => "n/a".to_string(),
    }
}

fn category_card(category: &CostCategory) -> CategoryCard {
    CategoryCard {
        title: category.category_name.clone(),
        rows: vec![
            CostRow {
                label: IN_NETWORK_LABEL,
                value: RangeText::from_range(category.in_network_range.as_ref()),
            },
            CostRow {
                label: OUT_NETWORK_LABEL,
                value: RangeText::from_range(category.out_network_range.as_ref()),
            },
        ],
        procedures: category
            .procedures
            .iter()
            .map(|p| ProcedureLine {
                code: p.code.clone(),
                in_network: procedure_price(p.in_network_price),
                out_network: procedure_price(p.out_network_price),
            })
            .collect(),
    }
}

fn summary_item(label: &'static str, overall: Option<&OverallRange>) -> SummaryItem {
    SummaryItem {
        label,
        amount: RangeText::from_range(overall.map(|o| &o.range)),
        category_count: overall.and_then(|o| o.category_count),
    }
}

/// Build the results view-model for a cost analysis.
pub fn render_report(result: &CostAnalysisResult) -> CostReport {
    let summary = result.has_overall().then(|| SummaryBlock {
        title: SUMMARY_TITLE,
        items: vec![
            summary_item(
                TOTAL_IN_NETWORK_LABEL,
                result.overall_in_network_range.as_ref(),
            ),
            summary_item(
                TOTAL_OUT_NETWORK_LABEL,
                result.overall_out_network_range.as_ref(),
            ),
        ],
    });

    CostReport {
        header: DiagnosisHeader::from(&result.selected_diagnosis),
        categories: result.categories.iter().map(category_card).collect(),
        summary,
        zip_code: result.zip_code.clone(),
    }
}

impl fmt::Display for CostReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Selected: {}: {}", self.header.code, self.header.name)?;
        if !self.header.description.is_empty() {
            writeln!(f, "  {}", self.header.description)?;
        }
        if let Some(zip) = &self.zip_code {
            writeln!(f, "ZIP code: {zip}")?;
        }
        writeln!(f, "{}", "-".repeat(50))?;

        for card in &self.categories {
            writeln!(f, "Category: {}", card.title)?;
            for row in &card.rows {
                writeln!(f, "  {}: {}", row.label, row.value)?;
            }
            for p in &card.procedures {
                writeln!(f, "    CPT {}: in {} / out {}", p.code, p.in_network, p.out_network)?;
            }
            writeln!(f, "{}", "-".repeat(30))?;
        }

        if let Some(summary) = &self.summary {
            writeln!(f, "{}", summary.title.to_uppercase())?;
            writeln!(f, "{}", "=".repeat(50))?;
            for item in &summary.items {
                writeln!(f, "{}: {}", item.label, item.amount)?;
                if let Some(note) = item.note() {
                    writeln!(f, "  ({note})")?;
                }
            }
            writeln!(f, "{}", "=".repeat(50))?;
        }
        Ok(())
    }
}

/// One selectable diagnosis card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisCard {
    pub index: usize,
    pub code: String,
    pub name: String,
    pub description: String,
    pub selected: bool,
}

/// The diagnosis-selection view. Empty means "no matches", which is still shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiagnosisList {
    pub cards: Vec<DiagnosisCard>,
}

impl DiagnosisList {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }
}

/// Build the diagnosis list view-model, marking the selected card if any.
pub fn render_diagnoses(candidates: &[DiagnosisCode], selected: Option<usize>) -> DiagnosisList {
    DiagnosisList {
        cards: candidates
            .iter()
            .enumerate()
            .map(|(index, d)| DiagnosisCard {
                index,
                code: d.code.clone(),
                name: d.name.clone(),
                description: d.description.clone(),
                selected: selected == Some(index),
            })
            .collect(),
    }
}

impl fmt::Display for DiagnosisList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cards.is_empty() {
            return writeln!(f, "{NO_MATCHES}");
        }
        for card in &self.cards {
            let marker = if card.selected { "*" } else { " " };
            writeln!(f, "{marker}{}. {}: {}", card.index + 1, card.code, card.name)?;
            if !card.description.is_empty() {
                writeln!(f, "   -> {}", card.description)?;
            }
        }
        Ok(())
    }
}
