//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Headings
    pub title_color: Color,
    pub subtitle_color: Color,
    pub muted: Color,

    // Table
    pub header_style: Style,
    pub row_selected: Style,
    pub row_alt_bg: Color,
    pub index_color: Color,
    pub link_color: Color,

    // Metrics
    pub star_color: Color,
    pub reaction_color: Color,

    // View states
    pub skeleton_color: Color,
    pub spinner_color: Color,
    pub error_color: Color,

    // Landing cards
    pub card_border: Color,
    pub card_border_selected: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,
    pub flash_info: Color,

    // Popups
    pub popup_border: Color,
    pub popup_key: Style,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::dark()
    }
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            title_color: Color::Cyan,
            subtitle_color: Color::Gray,
            muted: Color::DarkGray,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            link_color: Color::Blue,
            star_color: Color::Yellow,
            reaction_color: Color::LightRed,
            skeleton_color: Color::Indexed(238),
            spinner_color: Color::Cyan,
            error_color: Color::Red,
            card_border: Color::Indexed(240),
            card_border_selected: Color::Cyan,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            flash_info: Color::White,
            popup_border: Color::Cyan,
            popup_key: Style::new().fg(Color::Cyan).bold(),
        }
    }

    /// Color for a status-bar flash message based on its wording
    pub fn flash_color(&self, msg: &str) -> Color {
        if msg.starts_with("Failed") || msg.starts_with("Error") || msg.starts_with("Refusing") {
            self.flash_error
        } else if msg.starts_with("Opened:") || msg.starts_with("Filters reset") {
            self.flash_success
        } else {
            self.flash_info
        }
    }
}
