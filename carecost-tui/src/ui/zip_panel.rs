//! Step 3 - ZIP Code: five-digit input with a live validity indicator.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use carecost_core::workflow::ZipStatus;

use crate::app::AppState;
use crate::theme;
use crate::ui::input_line;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let view = app.view();
    let mut lines: Vec<Line> = Vec::new();

    if let Some(chosen) = app.controller.session().selected() {
        lines.push(Line::from(vec![
            Span::styled("Diagnosis: ", theme::muted()),
            Span::styled(chosen.label(), theme::accent()),
        ]));
        lines.push(Line::from(""));
    }

    let mut input = input_line("ZIP code: ", &app.zip_input, "5 digits");
    if view.zip_status != ZipStatus::Unknown {
        let mark = if view.zip_status == ZipStatus::Valid { "  ✓ " } else { "  ✗ " };
        input.spans.push(Span::styled(
            format!("{mark}{}", view.zip_status.label()),
            theme::zip_status(view.zip_status),
        ));
    }
    lines.push(input);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter]analyze costs  [Esc]back  [F1]help",
        theme::muted(),
    )));

    f.render_widget(Paragraph::new(lines), area);
}
