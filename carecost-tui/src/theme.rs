//! Theme tokens for the CareCost TUI
//!
//! Dark background with a teal accent. Free functions return ready-made
//! styles so panels don't thread a `Theme` value around.

use ratatui::style::{Color, Modifier, Style};

use carecost_core::workflow::ZipStatus;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    /// Focus, highlights, titles
    pub accent: Color,
    /// Valid ZIP, successful results
    pub positive: Color,
    /// Errors, invalid ZIP
    pub negative: Color,
    pub warning: Color,
    /// Secondary info such as out-of-network figures
    pub neutral: Color,
    /// Hints, placeholders, disabled text
    pub muted: Color,
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::clinic_dark()
    }
}

impl Theme {
    pub fn clinic_dark() -> Self {
        Self {
            background: Color::Rgb(16, 20, 24),
            accent: Color::Rgb(0, 200, 190),
            positive: Color::Rgb(80, 220, 120),
            negative: Color::Rgb(240, 80, 90),
            warning: Color::Rgb(255, 170, 40),
            neutral: Color::Rgb(150, 130, 230),
            muted: Color::Rgb(120, 140, 160),
            text_primary: Color::White,
        }
    }

    pub fn zip_status_color(&self, status: ZipStatus) -> Color {
        match status {
            ZipStatus::Valid => self.positive,
            ZipStatus::Invalid => self.negative,
            ZipStatus::Unknown => self.muted,
        }
    }
}

fn fg(pick: fn(&Theme) -> Color) -> Style {
    Style::default().fg(pick(&Theme::default()))
}

pub fn accent() -> Style {
    fg(|t| t.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    fg(|t| t.positive)
}

pub fn negative() -> Style {
    fg(|t| t.negative)
}

pub fn warning() -> Style {
    fg(|t| t.warning)
}

pub fn neutral() -> Style {
    fg(|t| t.neutral)
}

pub fn muted() -> Style {
    fg(|t| t.muted)
}

pub fn text() -> Style {
    fg(|t| t.text_primary)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

pub fn zip_status(status: ZipStatus) -> Style {
    Style::default().fg(Theme::default().zip_status_color(status))
}

/// Highlighted row in a selectable list.
pub fn cursor() -> Style {
    accent().add_modifier(Modifier::REVERSED)
}
