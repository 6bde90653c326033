//! Top-level UI layout - step bar, active section, status bar.

pub mod diagnosis_panel;
pub mod help_panel;
pub mod overlays;
pub mod results_panel;
pub mod status_bar;
pub mod symptom_panel;
pub mod zip_panel;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use carecost_core::workflow::Section;

use crate::app::{AppState, Overlay};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: step bar + main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    let main_area = chunks[1];

    draw_steps(f, chunks[0], app);
    draw_section(f, main_area, app);
    status_bar::render(f, chunks[2], app);

    // Draw overlays on top.
    match &app.overlay {
        Overlay::Welcome => overlays::render_welcome(f, main_area),
        Overlay::Help => overlays::render_help(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::Alert(message) => overlays::render_alert(f, main_area, message),
        Overlay::Ask { input, answer } => {
            overlays::render_ask(f, main_area, input, answer.as_deref())
        }
        Overlay::None => {}
    }

    if let Some(action) = app.pending {
        overlays::render_busy(f, main_area, action.label());
    }
}

/// One-line progress indicator: reached steps bright, current step bold.
fn draw_steps(f: &mut Frame, area: Rect, app: &AppState) {
    let view = app.view();
    let mut spans = Vec::new();
    for (i, section) in Section::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" > ", theme::muted()));
        }
        let style = if *section == view.section {
            theme::accent_bold()
        } else if section.index() <= view.reached.index() {
            theme::accent()
        } else {
            theme::muted()
        };
        spans.push(Span::styled(format!("{}. {}", i + 1, section.label()), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the active section with its border.
fn draw_section(f: &mut Frame, area: Rect, app: &AppState) {
    let section = app.section();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}/4] ", section.label(), section.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match section {
        Section::Symptom => symptom_panel::render(f, inner, app),
        Section::Diagnosis => diagnosis_panel::render(f, inner, app),
        Section::ZipEntry => zip_panel::render(f, inner, app),
        Section::Results => results_panel::render(f, inner, app),
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Text input line with a block cursor.
pub(crate) fn input_line<'a>(label: &'a str, value: &'a str, placeholder: &'a str) -> Line<'a> {
    let mut spans = vec![Span::styled(label, theme::accent_bold())];
    if value.is_empty() {
        spans.push(Span::styled(placeholder, theme::muted()));
    } else {
        spans.push(Span::styled(value, theme::text()));
    }
    spans.push(Span::styled("_", theme::accent()));
    Line::from(spans)
}
