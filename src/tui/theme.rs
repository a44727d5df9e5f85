// Color palettes for the terminal host
//
// The card's `theme` attribute picks the palette used to draw the card and
// the surrounding host, mirroring the `:host([theme="dark"])` rule in the
// card's scoped styles.

use crate::card::Theme;
use ratatui::style::Color;

/// Colors for every element the host draws
#[derive(Debug, Clone)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub border: Color,
    pub title: Color,
    pub muted: Color,
    pub loader: Color,
    pub button: Color,

    // Event colors
    pub user_loaded: Color,
    pub error_occurred: Color,
    pub card_click: Color,

    // Log levels
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }

    /// Light palette (default)
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            border: Color::Gray,
            title: Color::Blue,
            muted: Color::DarkGray,
            loader: Color::Blue,
            button: Color::Blue,

            user_loaded: Color::Green,
            error_occurred: Color::Red,
            card_click: Color::Magenta,

            log_error: Color::Red,
            log_warn: Color::Rgb(184, 134, 11), // Dark goldenrod
            log_info: Color::Blue,
            log_debug: Color::DarkGray,
        }
    }

    /// Dark palette: #333 background, white text
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(0x33, 0x33, 0x33),
            fg: Color::White,
            border: Color::Gray,
            title: Color::Cyan,
            muted: Color::Gray,
            loader: Color::LightBlue,
            button: Color::Cyan,

            user_loaded: Color::LightGreen,
            error_occurred: Color::LightRed,
            card_click: Color::LightMagenta,

            log_error: Color::LightRed,
            log_warn: Color::Yellow,
            log_info: Color::LightBlue,
            log_debug: Color::Gray,
        }
    }
}
