//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;
use serde::{Deserialize, Serialize};

use crate::scoring::Level;

/// Theme selection from config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Auto,
    Dark,
    Light,
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Level colors, lowest band first
    pub level_colors: [Color; 6],

    // Slider colors
    pub slider_filled: Color,
    pub slider_empty: Color,
    pub unanswered: Color,

    // Chart colors
    pub radar_line: Color,
    pub radar_grid: Color,

    // Styles
    pub title_style: Style,
    pub header_style: Style,
    pub row_selected: Style,
    pub row_alt_bg: Color,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub text: Color,

    // Tab colors
    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,

    // Interpretation box accent
    pub accent: Color,
}

const LEVEL_PALETTE: [Color; 6] = [
    Color::Rgb(0xe7, 0x4c, 0x3c),
    Color::Rgb(0xe6, 0x7e, 0x22),
    Color::Rgb(0xf3, 0x9c, 0x12),
    Color::Rgb(0x34, 0x98, 0xdb),
    Color::Rgb(0x27, 0xae, 0x60),
    Color::Rgb(0x16, 0xa0, 0x85),
];

impl ThemeColors {
    /// Dark theme palette
    pub fn dark() -> Self {
        Self {
            level_colors: LEVEL_PALETTE,
            slider_filled: Color::Cyan,
            slider_empty: Color::DarkGray,
            unanswered: Color::Yellow,
            radar_line: Color::Rgb(0x1f, 0x77, 0xb4),
            radar_grid: Color::DarkGray,
            title_style: Style::new().bold(),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            row_alt_bg: Color::Indexed(235),
            muted: Color::Gray,
            title_color: Color::Cyan,
            text: Color::White,
            tab_active_style: Style::new().fg(Color::Cyan).bold(),
            tab_inactive_style: Style::new().fg(Color::DarkGray),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
            accent: Color::Rgb(0x1f, 0x77, 0xb4),
        }
    }

    /// Light theme palette for bright terminal backgrounds
    pub fn light() -> Self {
        Self {
            level_colors: LEVEL_PALETTE,
            slider_filled: Color::Blue,
            slider_empty: Color::Indexed(250),
            unanswered: Color::Rgb(0xb3, 0x6b, 0x00),
            radar_line: Color::Rgb(0x1f, 0x77, 0xb4),
            radar_grid: Color::Indexed(248),
            title_style: Style::new().bold(),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            row_alt_bg: Color::Indexed(254),
            muted: Color::Indexed(242),
            title_color: Color::Blue,
            text: Color::Black,
            tab_active_style: Style::new().fg(Color::Blue).bold(),
            tab_inactive_style: Style::new().fg(Color::Indexed(245)),
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(0x1e, 0x7e, 0x34),
            flash_error: Color::Rgb(0xc0, 0x39, 0x2b),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(255),
            accent: Color::Rgb(0x1f, 0x77, 0xb4),
        }
    }

    pub fn level_color(&self, level: Level) -> Color {
        match level {
            Level::VeryLow => self.level_colors[0],
            Level::Low => self.level_colors[1],
            Level::SomewhatLow => self.level_colors[2],
            Level::Average => self.level_colors[3],
            Level::High => self.level_colors[4],
            Level::VeryHigh => self.level_colors[5],
        }
    }
}

/// Resolve the configured theme to a palette.
///
/// `Auto` asks the terminal for its background luminance and falls back to
/// dark when the terminal doesn't answer. Must run before the TUI takes over
/// the terminal.
pub fn resolve_theme(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Dark => ThemeColors::dark(),
        Theme::Light => ThemeColors::light(),
        Theme::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            Ok(_) => ThemeColors::dark(),
            Err(e) => {
                tracing::debug!("background detection failed, using dark theme: {}", e);
                ThemeColors::dark()
            }
        },
    }
}
