//! Agent roster sidebar widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use handler_core::Agent;

use crate::ui::theme::HandlerTheme;

/// Lists the agents on the operation and marks which one the next
/// submission speaks as.
pub struct RosterWidget<'a> {
    roster: &'a [Agent],
    active: usize,
    theme: &'a HandlerTheme,
}

impl<'a> RosterWidget<'a> {
    pub fn new(roster: &'a [Agent], theme: &'a HandlerTheme) -> Self {
        Self {
            roster,
            active: 0,
            theme,
        }
    }

    pub fn active(mut self, active: usize) -> Self {
        self.active = active;
        self
    }
}

impl Widget for RosterWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Agents ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let inner = block.inner(area);
        block.render(area, buf);

        let multi = self.roster.len() > 1;
        let lines: Vec<Line> = self
            .roster
            .iter()
            .enumerate()
            .map(|(index, agent)| {
                let marker = if multi && index == self.active {
                    "▸ "
                } else {
                    "  "
                };
                let portrait = if agent.portrait.has_image() {
                    " ✦"
                } else {
                    ""
                };
                let style = if multi && index == self.active {
                    Style::default()
                        .fg(self.theme.player_text)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.theme.foreground)
                };
                Line::from(vec![
                    Span::styled(format!("{marker}{}", agent.name), style),
                    Span::styled(portrait, self.theme.title_style()),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
