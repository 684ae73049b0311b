//! Render orchestration for the Handler TUI

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use handler_core::CampaignMode;

use crate::app::{App, InputMode, SpeechMode};
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::widgets::{
    ChoicesWidget, InputTag, InputWidget, RosterWidget, StatusBarWidget, TranscriptWidget,
};

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = AppLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);

    let transcript_widget = TranscriptWidget::new(app.session.transcript().turns(), &app.theme)
        .scroll(app.transcript_scroll)
        .loading(app.request_in_flight);
    frame.render_widget(transcript_widget, layout.transcript_area);

    let roster_widget = RosterWidget::new(app.session.roster(), &app.theme).active(app.active_agent);
    frame.render_widget(roster_widget, layout.roster_area);

    let choices_widget = ChoicesWidget::new(app.session.state().offered_choices(), &app.theme)
        .awaiting_roll(app.session.state().awaiting_roll());
    frame.render_widget(choices_widget, layout.choices_area);

    render_status_bar(frame, app, layout.status_bar);
    render_input(frame, app, layout.input_area);

    if app.show_help {
        render_help_overlay(frame, app, area);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode = match app.session.mode() {
        CampaignMode::NewCampaign => "NEW OPERATION",
        CampaignMode::ContinueCampaign => "CONTINUED OPERATION",
    };
    let title = format!(" DELTA GREEN: HANDLER // {mode} ");

    let line = Line::from(Span::styled(title, app.theme.title_style()));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status_widget = StatusBarWidget::new(app.input_mode, app.speech_mode, &app.theme)
        .awaiting_roll(app.session.state().awaiting_roll())
        .request_in_flight(app.request_in_flight)
        .message(app.status_message());

    frame.render_widget(status_widget, area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = matches!(app.input_mode, InputMode::Insert | InputMode::Command);
    let is_command = matches!(app.input_mode, InputMode::Command);

    let tag = if app.session.state().awaiting_roll() {
        InputTag::Roll
    } else {
        match app.speech_mode {
            SpeechMode::InCharacter => InputTag::Ic,
            SpeechMode::OutOfCharacter => InputTag::Ooc,
        }
    };

    let placeholder = if app.request_in_flight {
        "Waiting for the Handler..."
    } else if app.session.state().awaiting_roll() {
        "Enter your roll result..."
    } else {
        "Describe your agent's action..."
    };

    let input_widget = InputWidget::new(app.input_buffer(), &app.theme)
        .cursor_position(app.cursor_position())
        .tag(tag)
        .active(is_active)
        .command_mode(is_command)
        .placeholder(placeholder);

    frame.render_widget(input_widget, area);
}

fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(52, 22, area);

    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            " Delta Green: Handler - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Input Modes:",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  i       Enter INSERT mode (type your action)"),
        Line::from("  o       Toggle IC/OOC for the next message"),
        Line::from("  :       Enter COMMAND mode"),
        Line::from("  Esc     Return to NORMAL mode"),
        Line::from(""),
        Line::from(Span::styled(
            "Play:",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  1-9     Take one of the offered choices"),
        Line::from("  Tab     Speak as the next agent on the roster"),
        Line::from("  When a roll is requested, type the result"),
        Line::from(""),
        Line::from(Span::styled(
            "Navigation (NORMAL mode):",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  j/k or ↑/↓     Scroll the session log"),
        Line::from("  g/G            Jump to top/bottom"),
        Line::from(""),
        Line::from(Span::styled(
            "Commands:",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  :q               Quit"),
        Line::from("  :summary         Ask for a session summary"),
        Line::from("  :recall <file>   Feed a past summary to the Handler"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}
