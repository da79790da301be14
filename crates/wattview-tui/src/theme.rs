//! Palette and semantic styling for the dashboard.

use ratatui::style::{Color, Modifier, Style};

// ── Core palette ─────────────────────────────────────────────────────

pub const AMBER: Color = Color::Rgb(255, 191, 71); // #ffbf47
pub const MINT: Color = Color::Rgb(102, 255, 178); // #66ffb2
pub const SKY: Color = Color::Rgb(125, 207, 255); // #7dcfff
pub const ERROR_RED: Color = Color::Rgb(255, 99, 99); // #ff6363
pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29

// ── Semantic styles ──────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(AMBER)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Normal list row text.
pub fn row() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Row under the cursor.
pub fn row_selected() -> Style {
    Style::default()
        .fg(AMBER)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Checked checkbox marker.
pub fn checked() -> Style {
    Style::default().fg(MINT).add_modifier(Modifier::BOLD)
}

/// Group header inside a panel (a server name above its VMs).
pub fn group_header() -> Style {
    Style::default().fg(SKY).add_modifier(Modifier::BOLD)
}

/// Inline validation / fetch error text.
pub fn error_text() -> Style {
    Style::default().fg(ERROR_RED)
}

/// Success / result value text.
pub fn value_text() -> Style {
    Style::default().fg(MINT).add_modifier(Modifier::BOLD)
}

/// De-emphasized text (hints, placeholders, unselectable rows).
pub fn muted() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key name inside a key hint.
pub fn key_hint_key() -> Style {
    Style::default().fg(SKY).add_modifier(Modifier::BOLD)
}

/// Key hint description text.
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}
