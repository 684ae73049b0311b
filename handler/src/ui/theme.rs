//! Color theme and styling for the Handler TUI

use ratatui::style::{Color, Modifier, Style};

/// Delta Green terminal palette: phosphor green on black, with amber for
/// the unnatural and grey for the bureaucracy.
#[derive(Debug, Clone)]
pub struct HandlerTheme {
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    pub handler_text: Color,
    pub player_text: Color,
    pub ooc_text: Color,
    pub failure_text: Color,

    pub choice_number: Color,
    pub choice_text: Color,
    pub roll_badge: Color,

    pub title: Color,
    pub status_text: Color,
}

impl Default for HandlerTheme {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Green,

            handler_text: Color::Gray,
            player_text: Color::Cyan,
            ooc_text: Color::DarkGray,
            failure_text: Color::Red,

            choice_number: Color::Green,
            choice_text: Color::White,
            roll_badge: Color::Yellow,

            title: Color::Green,
            status_text: Color::DarkGray,
        }
    }
}

impl HandlerTheme {
    pub fn handler_style(&self) -> Style {
        Style::default().fg(self.handler_text)
    }

    pub fn player_style(&self) -> Style {
        Style::default()
            .fg(self.player_text)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn ooc_style(&self) -> Style {
        Style::default().fg(self.ooc_text)
    }

    pub fn failure_style(&self) -> Style {
        Style::default()
            .fg(self.failure_text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.title)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_style(&self) -> Style {
        Style::default()
            .fg(self.status_text)
            .add_modifier(Modifier::DIM)
    }

    pub fn roll_badge_style(&self) -> Style {
        Style::default()
            .fg(self.roll_badge)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }
}
