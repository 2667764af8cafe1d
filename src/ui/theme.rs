//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── grid items ─────────────────────────────────────────────
    pub fn item_border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn selected_border_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dragging_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM | Modifier::ITALIC)
    }

    pub fn resizing_border_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn label_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn span_style() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn handle_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn active_handle_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn error_status_style() -> Style {
        Style::default().bg(Color::Red).fg(Color::White)
    }
}
