//! Step 4 - Results: selected diagnosis, per-category ranges, overall summary.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use carecost_core::report::{CostReport, RangeText, IN_NETWORK_LABEL, TOTAL_IN_NETWORK_LABEL};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(report) = &app.view().report else {
        let para = Paragraph::new(Span::styled(
            "No analysis yet. Enter a ZIP code and press Enter.",
            theme::muted(),
        ));
        f.render_widget(para, area);
        return;
    };

    let lines = report_lines(report);
    let max_scroll = lines.len().saturating_sub(area.height as usize);
    let scroll = app.results_scroll.min(max_scroll) as u16;
    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
}

fn range_span(in_network: bool, value: &RangeText) -> Span<'static> {
    let style = if value.is_no_data() {
        theme::muted()
    } else if in_network {
        theme::positive()
    } else {
        theme::neutral()
    };
    Span::styled(value.to_string(), style)
}

/// Flatten the report into display lines.
pub fn report_lines(report: &CostReport) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Selected: ", theme::muted()),
        Span::styled(
            format!("{}: {}", report.header.code, report.header.name),
            theme::accent_bold(),
        ),
    ]));
    if !report.header.description.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", report.header.description),
            theme::muted(),
        )));
    }
    if let Some(zip) = &report.zip_code {
        lines.push(Line::from(Span::styled(format!("ZIP code: {zip}"), theme::muted())));
    }
    lines.push(Line::from(""));

    for card in &report.categories {
        lines.push(Line::from(Span::styled(card.title.clone(), theme::accent())));
        for row in &card.rows {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<22}", row.label), theme::text()),
                range_span(row.label == IN_NETWORK_LABEL, &row.value),
            ]));
        }
        for p in &card.procedures {
            lines.push(Line::from(Span::styled(
                format!("    CPT {:<8} in {:>12}  out {:>12}", p.code, p.in_network, p.out_network),
                theme::muted(),
            )));
        }
        lines.push(Line::from(""));
    }

    if let Some(summary) = &report.summary {
        lines.push(Line::from(Span::styled(summary.title, theme::accent_bold())));
        for item in &summary.items {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<28}", item.label), theme::text()),
                range_span(item.label == TOTAL_IN_NETWORK_LABEL, &item.amount),
            ]));
            if let Some(note) = item.note() {
                lines.push(Line::from(Span::styled(format!("    ({note})"), theme::muted())));
            }
        }
    }

    lines
}
