//! Session - the state carried across the three workflow steps.

use crate::domain::DiagnosisCode;

/// Symptom, candidate codes from the most recent search, and the chosen one.
///
/// Invariant: `selected_index`, when set, indexes into `candidates` of the most
/// recent search. Mutation goes through methods that keep it that way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    symptom_text: String,
    candidates: Vec<DiagnosisCode>,
    selected_index: Option<usize>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symptom of the most recent successful search (empty before any).
    pub fn symptom_text(&self) -> &str {
        &self.symptom_text
    }

    pub fn candidates(&self) -> &[DiagnosisCode] {
        &self.candidates
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&DiagnosisCode> {
        self.selected_index.and_then(|i| self.candidates.get(i))
    }

    /// Install the results of a new search. Prior candidates and selection are dropped.
    pub fn replace_candidates(&mut self, symptom: String, candidates: Vec<DiagnosisCode>) {
        self.symptom_text = symptom;
        self.candidates = candidates;
        self.selected_index = None;
    }

    /// Select a candidate. Returns false (and changes nothing) when out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.candidates.len() {
            self.selected_index = Some(index);
            true
        } else {
            false
        }
    }
}
