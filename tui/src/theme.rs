//! Colors and styles derived from the host theme.
//!
//! The host supplies web colors; terminals have no alpha, so every
//! translucent shade is flattened against the channel background.

use ratatui::style::{Color, Modifier, Style};
use tracing::warn;

use postreminder_types::{HostTheme, Rgb, ThemeError, change_opacity};

/// Resolved palette used by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub text: Color,
    pub text_muted: Color,
    pub help: Color,
    pub border: Color,
    pub focus: Color,
    pub button_fg: Color,
    pub button_bg: Color,
    pub button_inactive_fg: Color,
    pub button_inactive_bg: Color,
    pub code: Color,
}

fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

fn resolve(field: &str, parsed: Result<Rgb, ThemeError>, fallback: &str) -> Rgb {
    parsed.unwrap_or_else(|err| {
        warn!(field, %err, "Invalid theme color; using default");
        Rgb::parse(fallback).unwrap_or(Rgb::new(0, 0, 0))
    })
}

impl Palette {
    #[must_use]
    pub fn from_theme(theme: &HostTheme) -> Self {
        let defaults = HostTheme::default();
        let text = resolve(
            "center_channel_color",
            theme.center_channel_color(),
            &defaults.center_channel_color,
        );
        let bg = resolve(
            "center_channel_bg",
            theme.center_channel_bg(),
            &defaults.center_channel_bg,
        );
        let button_color = resolve("button_color", theme.button_color(), &defaults.button_color);
        let button_bg = resolve("button_bg", theme.button_bg(), &defaults.button_bg);

        Self {
            bg: rgb(bg),
            text: rgb(change_opacity(text, 0.88, bg)),
            text_muted: rgb(change_opacity(text, 0.56, bg)),
            help: rgb(change_opacity(text, 0.64, bg)),
            border: rgb(change_opacity(text, 0.24, bg)),
            focus: rgb(button_bg),
            button_fg: rgb(button_color),
            button_bg: rgb(button_bg),
            button_inactive_fg: rgb(change_opacity(button_color, 0.88, bg)),
            button_inactive_bg: rgb(change_opacity(button_bg, 0.32, bg)),
            code: rgb(change_opacity(button_bg, 0.8, text)),
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            text: Color::White,
            text_muted: Color::Gray,
            help: Color::Gray,
            border: Color::White,
            focus: Color::Yellow,
            button_fg: Color::Black,
            button_bg: Color::White,
            button_inactive_fg: Color::DarkGray,
            button_inactive_bg: Color::Black,
            code: Color::Cyan,
        }
    }
}

pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn text(palette: &Palette) -> Style {
        Style::default().fg(palette.text).bg(palette.bg)
    }

    #[must_use]
    pub fn heading(palette: &Palette) -> Style {
        text(palette).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn help(palette: &Palette) -> Style {
        Style::default().fg(palette.help).bg(palette.bg)
    }

    #[must_use]
    pub fn field(palette: &Palette, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(palette.focus)
                .bg(palette.bg)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            text(palette)
        }
    }

    #[must_use]
    pub fn tab(palette: &Palette, active: bool) -> Style {
        if active {
            button(palette, true)
        } else {
            Style::default().fg(palette.text_muted).bg(palette.bg)
        }
    }

    /// "Add Reminder" button: theme button colors, washed out when disabled.
    #[must_use]
    pub fn button(palette: &Palette, enabled: bool) -> Style {
        if enabled {
            Style::default()
                .fg(palette.button_fg)
                .bg(palette.button_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(palette.button_inactive_fg)
                .bg(palette.button_inactive_bg)
        }
    }

    #[must_use]
    pub fn border(palette: &Palette) -> Style {
        Style::default().fg(palette.border).bg(palette.bg)
    }
}
