//! Transcript display widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget, Wrap,
    },
};

use handler_core::session::COMM_FAILURE_MESSAGE;
use handler_core::Turn;

use crate::ui::theme::HandlerTheme;

/// Widget for displaying the session transcript
pub struct TranscriptWidget<'a> {
    turns: &'a [Turn],
    scroll: usize,
    theme: &'a HandlerTheme,
    loading: bool,
}

impl<'a> TranscriptWidget<'a> {
    pub fn new(turns: &'a [Turn], theme: &'a HandlerTheme) -> Self {
        Self {
            turns,
            scroll: 0,
            theme,
            loading: false,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    fn style_for_turn(&self, turn: &Turn) -> Style {
        match turn {
            Turn::Handler { content, .. } if content == COMM_FAILURE_MESSAGE => {
                self.theme.failure_style()
            }
            Turn::Handler { content, .. } if content.starts_with("[OOC:") => {
                self.theme.ooc_style()
            }
            Turn::Handler { .. } => self.theme.handler_style(),
            Turn::Player { content, .. } if content.starts_with("[OOC]") => {
                self.theme.ooc_style()
            }
            Turn::Player { .. } => self.theme.player_style(),
        }
    }
}

impl Widget for TranscriptWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Session Log ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::new();

        for turn in self.turns {
            let style = self.style_for_turn(turn);

            let header = match turn {
                Turn::Handler { .. } => "HANDLER".to_string(),
                Turn::Player {
                    agent: Some(agent), ..
                } => format!("> {agent}"),
                Turn::Player { agent: None, .. } => "> AGENT".to_string(),
            };
            lines.push(Line::from(Span::styled(
                header,
                style.add_modifier(Modifier::BOLD),
            )));

            for line in turn.content().lines() {
                lines.push(Line::from(Span::styled(line.to_string(), style)));
            }

            // Blank line between turns
            lines.push(Line::from(""));
        }

        if self.loading {
            lines.push(Line::from(Span::styled(
                "The Handler is typing...",
                self.theme.status_style().add_modifier(Modifier::ITALIC),
            )));
        }

        let visible_height = inner.height as usize;
        let total_lines = lines.len();
        let max_scroll = total_lines.saturating_sub(visible_height);
        let scroll = self.scroll.min(max_scroll);

        let paragraph = Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .wrap(Wrap { trim: false });

        paragraph.render(inner, buf);

        if total_lines > visible_height {
            let scrollbar_area = Rect {
                x: inner.x + inner.width.saturating_sub(1),
                y: inner.y,
                width: 1,
                height: inner.height,
            };

            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .thumb_style(Style::default().fg(Color::DarkGray))
                .track_style(Style::default().fg(Color::Black))
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll);
            scrollbar.render(scrollbar_area, buf, &mut scrollbar_state);
        }
    }
}
