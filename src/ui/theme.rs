//! Theme: dark popup, host-provided primary colour.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use tracing::warn;

pub mod colors {
    use super::*;
    /// Message log background.
    pub const BG: Color = Color::Rgb(0x18, 0x1c, 0x22);
    /// Popup chrome and input bar.
    pub const ELEVATED: Color = Color::Rgb(0x16, 0x1a, 0x1f);
    pub const BORDER: Color = Color::Rgb(0x2d, 0x34, 0x3e);
    /// "You" label, prompt.
    pub const ACCENT: Color = Color::Rgb(0x6b, 0xbc, 0xff);
    /// "AI" label.
    pub const ACCENT_SOFT: Color = Color::Rgb(0x99, 0xd4, 0xff);
    pub const TEXT: Color = Color::Rgb(0xf2, 0xf4, 0xf8);
    pub const TEXT_DIM: Color = Color::Rgb(0xbc, 0xc5, 0xd0);
    /// Placeholder, hints.
    pub const MUTED: Color = Color::Rgb(0x94, 0x9e, 0xad);
    pub const CODE_BG: Color = Color::Rgb(0x1e, 0x24, 0x2e);
    pub const HEADING: Color = Color::Rgb(0xff, 0xc8, 0x6b);
}

pub const BUTTON_WIDTH: u16 = 8;
pub const BUTTON_HEIGHT: u16 = 3;
pub const POPUP_WIDTH: u16 = 46;
pub const POPUP_HEIGHT: u16 = 22;
/// Distance from the right and bottom edges of the render root.
pub const MARGIN_X: u16 = 2;
pub const MARGIN_Y: u16 = 1;
/// Rows between the popup and the button.
pub const POPUP_GAP: u16 = 1;
pub const HEADER_HEIGHT: u16 = 1;
/// Top border plus one text row.
pub const INPUT_HEIGHT: u16 = 2;
pub const CLOSE_WIDTH: u16 = 3;
pub const SEND_WIDTH: u16 = 3;
/// Blank rows between messages.
pub const MESSAGE_GAP: usize = 1;
pub const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Host-provided theming. `Color::Reset` means the host set nothing and the
/// terminal's own default applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self { primary: Color::Reset }
    }
}

impl Theme {
    /// Accepts anything ratatui parses: `#7b2ff7`, `magenta`, `93`.
    pub fn from_primary(value: Option<&str>) -> Self {
        let primary = match value {
            Some(raw) => Color::from_str(raw).unwrap_or_else(|_| {
                warn!(value = raw, "unparsable primary colour; using terminal default");
                Color::Reset
            }),
            None => Color::Reset,
        };
        Self { primary }
    }

    /// Filled surface in the primary colour (button, header, send control).
    pub fn primary_fill(&self) -> Style {
        match self.primary {
            Color::Reset => Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
            c => Style::default().fg(Color::White).bg(c).add_modifier(Modifier::BOLD),
        }
    }

    pub fn primary_fg(&self) -> Style {
        Style::default().fg(self.primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_named_colours() {
        assert_eq!(Theme::from_primary(Some("#7b2ff7")).primary, Color::Rgb(0x7b, 0x2f, 0xf7));
        assert_eq!(Theme::from_primary(Some("magenta")).primary, Color::Magenta);
    }

    #[test]
    fn missing_or_bad_colour_uses_terminal_default() {
        assert_eq!(Theme::from_primary(None), Theme::default());
        assert_eq!(Theme::from_primary(Some("not-a-colour")).primary, Color::Reset);
    }
}
