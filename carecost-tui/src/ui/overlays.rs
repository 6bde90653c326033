//! Overlay widgets - welcome, help, error history, alert, assistant, busy.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::{centered_rect, help_panel};

/// First-run welcome overlay.
pub fn render_welcome(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Welcome to CareCost ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Getting started:", theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled("  1. Describe a symptom and press Enter", theme::muted())),
        Line::from(Span::styled("  2. Choose the matching ICD-10 code", theme::muted())),
        Line::from(Span::styled("  3. Enter your 5-digit ZIP code", theme::muted())),
        Line::from(Span::styled(
            "  4. Read the in- and out-of-network price ranges",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss...", theme::neutral())),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [Esc]close ")
        .title_style(theme::accent_bold());

    f.render_widget(Paragraph::new(help_panel::lines()).block(block), popup);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let start = app.error_scroll;
    let end = (start + visible_height).min(app.error_history.len());

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app.error_history.iter().enumerate().take(end).skip(start) {
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// Modal error notice.
pub fn render_alert(f: &mut Frame, area: Rect, message: &str) {
    let popup = centered_rect(50, 25, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(" Error ")
        .title_style(theme::negative().add_modifier(Modifier::BOLD));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, theme::text())),
        Line::from(""),
        Line::from(Span::styled("Press any key to continue", theme::muted())),
    ];
    f.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: true }), popup);
}

/// Assistant question box with the last answer underneath.
pub fn render_ask(f: &mut Frame, area: Rect, input: &str, answer: Option<&str>) {
    let popup = centered_rect(70, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Ask a Medical Question [Enter]send [Esc]close ")
        .title_style(theme::accent_bold());

    let mut text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(input, theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]),
        Line::from(""),
    ];
    if let Some(answer) = answer {
        for line in answer.lines() {
            text.push(Line::from(Span::styled(line, theme::text())));
        }
    }

    f.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: false }), popup);
}

/// Global busy indicator while a request is queued or running.
pub fn render_busy(f: &mut Frame, area: Rect, label: &str) {
    let popup = centered_rect(40, 15, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::warning());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(label, theme::warning().add_modifier(Modifier::BOLD))),
    ];
    f.render_widget(Paragraph::new(text).block(block).centered(), popup);
}
