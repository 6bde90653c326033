//! Plain-text rendering of workflow output for the terminal.

use std::io::{self, BufRead, Write};

use carecost_core::report::{CostReport, DiagnosisList};
use carecost_core::{Section, WorkflowView, ZipStatus};

/// Prints diagnoses and reports to `out` and user-facing errors to stderr.
///
/// With `quiet` set nothing but errors is printed; the caller writes its own
/// JSON instead.
pub struct ConsoleView<W: Write> {
    out: W,
    quiet: bool,
    errors: Vec<String>,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W, quiet: bool) -> Self {
        Self {
            out,
            quiet,
            errors: Vec::new(),
        }
    }

    /// Messages passed to `notify_error`, oldest first.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if self.quiet {
            return;
        }
        // stdout closed under a pipe is not worth failing the lookup over
        let _ = self.out.write_all(text.as_bytes());
        let _ = self.out.flush();
    }
}

impl<W: Write> WorkflowView for ConsoleView<W> {
    fn set_busy(&mut self, _busy: bool) {}

    fn show_section(&mut self, _section: Section) {}

    fn show_diagnoses(&mut self, list: &DiagnosisList) {
        self.emit(&list.to_string());
    }

    fn show_zip_status(&mut self, status: ZipStatus) {
        if status != ZipStatus::Unknown {
            self.emit(&format!("{}\n", status.label()));
        }
    }

    fn show_report(&mut self, report: &CostReport) {
        self.emit(&format!("\n{report}"));
    }

    fn notify_error(&mut self, message: &str) {
        eprintln!("Error: {message}");
        self.errors.push(message.to_string());
    }
}

/// Print `label` and read one trimmed line. `None` at end of input.
pub fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> io::Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Parse a 1-based menu choice into a 0-based index.
pub fn parse_choice(raw: &str, count: usize) -> Option<usize> {
    let choice: usize = raw.trim().parse().ok()?;
    (1..=count).contains(&choice).then(|| choice - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use carecost_core::report::{render_diagnoses, render_report};
    use carecost_core::testing::{sample_analysis, sample_codes};

    #[test]
    fn diagnoses_are_numbered_from_one() {
        let mut view = ConsoleView::new(Vec::new(), false);
        view.show_diagnoses(&render_diagnoses(&sample_codes(), None));
        let text = String::from_utf8(view.into_inner()).unwrap();
        assert!(text.contains("1. R07.9: Chest pain, unspecified"));
        assert!(text.contains("2. R07.89: Other chest pain"));
    }

    #[test]
    fn report_lists_categories_and_summary() {
        let mut view = ConsoleView::new(Vec::new(), false);
        view.show_report(&render_report(&sample_analysis()));
        let text = String::from_utf8(view.into_inner()).unwrap();
        assert!(text.contains("Category: Diagnostic Tests"));
        assert!(text.contains("$1,200 - $3,400"));
    }

    #[test]
    fn quiet_view_prints_nothing_but_keeps_errors() {
        let mut view = ConsoleView::new(Vec::new(), true);
        view.show_diagnoses(&render_diagnoses(&sample_codes(), None));
        view.notify_error("Please enter a symptom");
        assert_eq!(view.errors(), ["Please enter a symptom".to_string()]);
        assert!(view.into_inner().is_empty());
    }

    #[test]
    fn unknown_zip_status_is_silent() {
        let mut view = ConsoleView::new(Vec::new(), false);
        view.show_zip_status(ZipStatus::Unknown);
        view.show_zip_status(ZipStatus::Invalid);
        let text = String::from_utf8(view.into_inner()).unwrap();
        assert_eq!(text, "Invalid ZIP code\n");
    }

    #[test]
    fn prompt_reads_trimmed_lines_until_eof() {
        let mut input = io::Cursor::new("  chest pain \n");
        let mut out = Vec::new();
        let first = prompt(&mut input, &mut out, "Enter a symptom: ").unwrap();
        assert_eq!(first.as_deref(), Some("chest pain"));
        assert_eq!(prompt(&mut input, &mut out, "again: ").unwrap(), None);
        assert_eq!(String::from_utf8(out).unwrap(), "Enter a symptom: again: ");
    }

    #[test]
    fn choices_are_one_based_and_bounded() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice(" 3 ", 3), Some(2));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("two", 3), None);
    }
}
