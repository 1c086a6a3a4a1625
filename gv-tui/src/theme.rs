//! Theme system for dark/light modes

use gv_core::config::ThemeVariant;
use ratatui::style::{Color, Modifier, Style};

/// Theme definition
#[derive(Clone, Debug)]
pub struct Theme {
    pub base: Style,
    /// Top-level headlines in multi-list mode
    pub list_title: Style,
    pub bullet: Style,
    pub selection: Style,
    pub border: Color,
    pub title: Style,
    pub status_bar_fg: Color,
    pub status_bar_bg: Color,
    pub prompt: Style,
    pub help_key: Style,
}

impl Theme {
    /// Create a theme for the given variant
    pub fn for_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            base: Style::default().fg(Color::White),
            list_title: Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
            bullet: Style::default().fg(Color::LightRed),
            selection: Style::default().fg(Color::Black).bg(Color::LightCyan),
            border: Color::DarkGray,
            title: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            status_bar_fg: Color::Black,
            status_bar_bg: Color::LightBlue,
            prompt: Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            help_key: Style::default().fg(Color::Cyan),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            base: Style::default().fg(Color::Black),
            list_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            bullet: Style::default().fg(Color::Red),
            selection: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(230, 230, 250)), // Light lavender
            border: Color::Gray,
            title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            status_bar_fg: Color::White,
            status_bar_bg: Color::Blue,
            prompt: Style::default()
                .fg(Color::Rgb(150, 100, 0)) // Dark yellow
                .add_modifier(Modifier::BOLD),
            help_key: Style::default().fg(Color::Blue),
        }
    }
}
