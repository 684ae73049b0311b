//! Status bar widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::{InputMode, SpeechMode};
use crate::ui::theme::HandlerTheme;

/// One-line status: input mode, speech mode, request state, message.
pub struct StatusBarWidget<'a> {
    input_mode: InputMode,
    speech_mode: SpeechMode,
    awaiting_roll: bool,
    request_in_flight: bool,
    message: Option<&'a str>,
    theme: &'a HandlerTheme,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(
        input_mode: InputMode,
        speech_mode: SpeechMode,
        theme: &'a HandlerTheme,
    ) -> Self {
        Self {
            input_mode,
            speech_mode,
            awaiting_roll: false,
            request_in_flight: false,
            message: None,
            theme,
        }
    }

    pub fn awaiting_roll(mut self, awaiting_roll: bool) -> Self {
        self.awaiting_roll = awaiting_roll;
        self
    }

    pub fn request_in_flight(mut self, in_flight: bool) -> Self {
        self.request_in_flight = in_flight;
        self
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mode = match self.input_mode {
            InputMode::Normal => "NORMAL",
            InputMode::Insert => "INSERT",
            InputMode::Command => "COMMAND",
        };

        let speech = if self.awaiting_roll {
            Span::styled("ROLL", self.theme.roll_badge_style())
        } else {
            match self.speech_mode {
                SpeechMode::InCharacter => Span::styled("IC", self.theme.player_style()),
                SpeechMode::OutOfCharacter => {
                    Span::styled("OOC", self.theme.ooc_style().add_modifier(Modifier::BOLD))
                }
            }
        };

        let mut spans = vec![
            Span::styled(format!(" {mode} "), self.theme.title_style()),
            Span::raw("| "),
            speech,
            Span::raw(" | "),
        ];

        if self.request_in_flight {
            spans.push(Span::styled(
                "Contacting the Handler...",
                self.theme.status_style().add_modifier(Modifier::ITALIC),
            ));
        } else if let Some(message) = self.message {
            spans.push(Span::styled(message, Style::default()));
        } else {
            spans.push(Span::styled(
                "i: type  o: IC/OOC  1-9: choose  ?: help  :q quit",
                self.theme.status_style(),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
