//! Step 1 - Symptom: free-text input.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::input_line;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Describe the symptom you want priced, e.g. \"chest pain\" or \"persistent cough\".",
            theme::muted(),
        )),
        Line::from(""),
        input_line("Symptom: ", &app.symptom_input, "type here"),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter]search  [Esc]clear  [F1]help  [F3]ask a question",
            theme::muted(),
        )),
    ];

    let candidates = app.controller.session().candidates().len();
    if candidates > 0 {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "Last search: \"{}\" ({candidates} codes)",
                app.controller.session().symptom_text()
            ),
            theme::neutral(),
        )));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
