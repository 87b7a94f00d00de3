//! Dark palette shared by every widget. Mirrors the page theme of the
//! source application: near-black surfaces, light gray text, gray borders
//! that brighten on focus.

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(0x22, 0x22, 0x22);
pub const TEXT: Color = Color::Rgb(0xcc, 0xcc, 0xcc);
pub const BORDER: Color = Color::Rgb(0x66, 0x66, 0x66);
pub const BORDER_FOCUS: Color = Color::Rgb(0xaa, 0xaa, 0xaa);
pub const SELECTION_BG: Color = Color::Rgb(0x44, 0x44, 0x44);
pub const SELECTION_FG: Color = Color::White;

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BACKGROUND)
}

pub fn border(focused: bool) -> Style {
    Style::default().fg(if focused { BORDER_FOCUS } else { BORDER })
}

pub fn selection() -> Style {
    Style::default().fg(SELECTION_FG).bg(SELECTION_BG).add_modifier(Modifier::BOLD)
}

pub fn error() -> Style {
    Style::default().fg(Color::Red)
}

/// Color-codes a priority label the way the grid's cell renderer did:
/// high is red, medium orange, low green, all bold; unknown labels are
/// left unstyled. Matching is case-insensitive.
pub fn priority(label: &str) -> Style {
    let color = match label.to_ascii_lowercase().as_str() {
        "high" => Some(Color::Red),
        "medium" => Some(Color::Rgb(0xff, 0xa5, 0x00)),
        "low" => Some(Color::Green),
        _ => None,
    };
    match color {
        Some(c) => Style::default().fg(c).add_modifier(Modifier::BOLD),
        None => Style::default().fg(TEXT),
    }
}
