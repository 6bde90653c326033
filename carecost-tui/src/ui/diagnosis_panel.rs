//! Step 2 - Diagnosis: candidate ICD-10 codes, one selectable card each.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use carecost_core::report::NO_MATCHES;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let list = &app.view().diagnoses;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(
            format!("\"{}\" | ", app.controller.session().symptom_text()),
            theme::muted(),
        ),
        Span::styled(format!("{} codes", list.len()), theme::accent()),
        Span::styled("  [j/k]move [Enter]choose [1-9]pick [Esc]back", theme::muted()),
    ]));
    lines.push(Line::from(""));

    if list.is_empty() {
        lines.push(Line::from(Span::styled(NO_MATCHES, theme::warning())));
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    // Two lines per card; keep the cursor card on screen.
    let per_card = 2usize;
    let visible = (area.height.saturating_sub(2) as usize / per_card).max(1);
    let start = app.diagnosis_cursor.saturating_sub(visible - 1);
    let end = (start + visible).min(list.len());

    for card in &list.cards[start..end] {
        let is_cursor = card.index == app.diagnosis_cursor;
        let style = if is_cursor {
            theme::cursor()
        } else if card.selected {
            theme::positive().add_modifier(Modifier::BOLD)
        } else {
            theme::text()
        };
        let marker = if card.selected { "[x]" } else { "[ ]" };

        lines.push(Line::from(vec![
            Span::styled(format!("{marker} {:>2}. ", card.index + 1), style),
            Span::styled(format!("{}: {}", card.code, card.name), style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("        {}", card.description),
            theme::muted(),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}
