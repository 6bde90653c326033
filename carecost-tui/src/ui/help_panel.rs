//! Keyboard shortcuts, shown in the help overlay.

use ratatui::text::{Line, Span};

use crate::theme;

pub fn lines() -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Anywhere");
    key(&mut lines, "F1", "Toggle this help");
    key(&mut lines, "F2", "Error history");
    key(&mut lines, "F3", "Ask the assistant a question");
    key(&mut lines, "Ctrl+C", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "1. Symptom");
    key(&mut lines, "type", "Edit the symptom");
    key(&mut lines, "Enter", "Search ICD-10 codes");
    key(&mut lines, "Esc", "Clear the input");
    lines.push(Line::from(""));

    section(&mut lines, "2. Diagnosis");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "Enter / Space", "Choose the code under the cursor");
    key(&mut lines, "1-9", "Choose a code by number");
    key(&mut lines, "Esc", "Back to symptom");
    lines.push(Line::from(""));

    section(&mut lines, "3. ZIP Code");
    key(&mut lines, "digits", "Edit the ZIP; checked once it has 5 digits");
    key(&mut lines, "Enter", "Analyze costs");
    key(&mut lines, "Esc", "Back to diagnosis");
    lines.push(Line::from(""));

    section(&mut lines, "4. Results");
    key(&mut lines, "j / k", "Scroll");
    key(&mut lines, "n", "New search");
    key(&mut lines, "Esc", "Back to ZIP code");
    key(&mut lines, "q / ? / e / a", "Quit / help / errors / ask (outside text inputs)");

    lines
}

fn section(lines: &mut Vec<Line<'static>>, title: &'static str) {
    lines.push(Line::from(Span::styled(title, theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'static>>, keys: &'static str, desc: &'static str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:<16}"), theme::warning()),
        Span::styled(desc, theme::muted()),
    ]));
}
