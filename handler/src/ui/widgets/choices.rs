//! Offered-choices widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::ui::theme::HandlerTheme;

/// Lists the Handler's current offer, numbered for hotkey selection.
/// Renders sensibly whether the Handler offered zero, one, or a dozen.
pub struct ChoicesWidget<'a> {
    choices: &'a [String],
    theme: &'a HandlerTheme,
    awaiting_roll: bool,
}

impl<'a> ChoicesWidget<'a> {
    pub fn new(choices: &'a [String], theme: &'a HandlerTheme) -> Self {
        Self {
            choices,
            theme,
            awaiting_roll: false,
        }
    }

    pub fn awaiting_roll(mut self, awaiting_roll: bool) -> Self {
        self.awaiting_roll = awaiting_roll;
        self
    }
}

impl Widget for ChoicesWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Choices ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::new();

        if self.awaiting_roll {
            lines.push(Line::from(Span::styled(
                "⚄ ROLL REQUESTED",
                self.theme.roll_badge_style(),
            )));
            lines.push(Line::from(Span::styled(
                "Type your roll result and press Enter.",
                self.theme.status_style(),
            )));
            lines.push(Line::from(""));
        }

        if self.choices.is_empty() {
            lines.push(Line::from(Span::styled(
                "No choices offered.",
                self.theme.status_style(),
            )));
            lines.push(Line::from(Span::styled(
                "Press 'i' to describe your action.",
                self.theme.status_style(),
            )));
        } else {
            for (index, choice) in self.choices.iter().enumerate() {
                // Numbered hotkeys only cover the first nine
                let number = if index < 9 {
                    format!("[{}] ", index + 1)
                } else {
                    "    ".to_string()
                };
                lines.push(Line::from(vec![
                    Span::styled(
                        number,
                        Style::default()
                            .fg(self.theme.choice_number)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(choice.clone(), Style::default().fg(self.theme.choice_text)),
                ]));
            }
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        paragraph.render(inner, buf);
    }
}
