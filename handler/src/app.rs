//! Main application state and logic

use std::collections::VecDeque;
use std::path::PathBuf;

use handler_core::{HandlerSession, PlayerInput};

use crate::ui::theme::HandlerTheme;

/// Vim-style input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal mode - navigation and hotkeys (default)
    #[default]
    Normal,
    /// Insert mode - free text input
    Insert,
    /// Command mode - entering : commands
    Command,
}

/// How the next free-text submission will be tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeechMode {
    /// In-character action text.
    #[default]
    InCharacter,
    /// Out-of-character question or aside.
    OutOfCharacter,
}

/// A session request queued by the event handler, to be awaited by the
/// main loop.
#[derive(Debug, Clone)]
pub enum PendingRequest {
    Open,
    Submit(PlayerInput),
    SelectChoice(usize),
    Summarize,
    Recall(PathBuf),
}

/// Main application state
pub struct App {
    pub session: HandlerSession,

    // UI state
    pub theme: HandlerTheme,
    pub show_help: bool,

    // Transcript display
    pub transcript_scroll: usize,
    pub scroll_locked_to_bottom: bool,

    // Input state
    pub input_mode: InputMode,
    pub speech_mode: SpeechMode,
    input_buffer: String,
    cursor_position: usize,
    pub input_history: VecDeque<String>,
    pub history_index: Option<usize>,
    pub saved_input: Option<String>,

    // Which roster agent submissions are attributed to
    pub active_agent: usize,

    // A request the main loop should await
    pub pending_request: Option<PendingRequest>,

    // Status
    status_message: Option<String>,
    pub should_quit: bool,
    pub request_in_flight: bool,
}

impl App {
    pub fn new(session: HandlerSession) -> Self {
        Self {
            session,
            theme: HandlerTheme::default(),
            show_help: false,
            transcript_scroll: 0,
            scroll_locked_to_bottom: true,
            input_mode: InputMode::Normal,
            speech_mode: SpeechMode::default(),
            input_buffer: String::new(),
            cursor_position: 0,
            input_history: VecDeque::with_capacity(100),
            history_index: None,
            saved_input: None,
            active_agent: 0,
            pending_request: Some(PendingRequest::Open),
            status_message: None,
            should_quit: false,
            request_in_flight: false,
        }
    }

    /// The name the next submission is attributed to. Solo rosters skip
    /// attribution; the Handler already knows who is playing.
    pub fn active_agent_name(&self) -> Option<String> {
        let roster = self.session.roster();
        if roster.len() < 2 {
            return None;
        }
        roster.get(self.active_agent).map(|a| a.name.clone())
    }

    /// Cycle submission attribution to the next roster agent.
    pub fn cycle_agent(&mut self) {
        let count = self.session.roster().len();
        if count > 1 {
            self.active_agent = (self.active_agent + 1) % count;
            if let Some(name) = self.active_agent_name() {
                self.set_status(format!("Speaking as {name}"));
            }
        }
    }

    pub fn toggle_speech_mode(&mut self) {
        self.speech_mode = match self.speech_mode {
            SpeechMode::InCharacter => SpeechMode::OutOfCharacter,
            SpeechMode::OutOfCharacter => SpeechMode::InCharacter,
        };
    }

    /// Enter command mode (starts with :)
    pub fn enter_command_mode(&mut self) {
        self.input_mode = InputMode::Command;
        self.input_buffer.clear();
        self.input_buffer.push(':');
        self.cursor_position = 1;
    }

    /// Exit to normal mode
    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
        if self.input_buffer.starts_with(':') {
            self.input_buffer.clear();
            self.cursor_position = 0;
        }
    }

    /// Scroll transcript to bottom and lock to bottom
    pub fn scroll_to_bottom(&mut self) {
        // Set to max value - the widget caps it to the actual max scroll
        self.transcript_scroll = usize::MAX / 2;
        self.scroll_locked_to_bottom = true;
    }

    /// Estimate max scroll based on transcript content, assuming ~60 char
    /// effective width
    fn estimate_max_scroll(&self) -> usize {
        const ESTIMATED_WIDTH: usize = 60;
        const ESTIMATED_VISIBLE_HEIGHT: usize = 20;

        let estimated_lines: usize = self
            .session
            .transcript()
            .turns()
            .iter()
            .map(|turn| {
                turn.content()
                    .lines()
                    .map(|line| (line.len() / ESTIMATED_WIDTH).max(1))
                    .sum::<usize>()
                    + 1
            })
            .sum();

        estimated_lines.saturating_sub(ESTIMATED_VISIBLE_HEIGHT)
    }

    /// Scroll transcript up (unlocks from bottom)
    pub fn scroll_up(&mut self, lines: usize) {
        let max_scroll = self.estimate_max_scroll();
        if self.transcript_scroll > max_scroll {
            self.transcript_scroll = max_scroll;
        }
        self.transcript_scroll = self.transcript_scroll.saturating_sub(lines);
        self.scroll_locked_to_bottom = false;
    }

    /// Scroll transcript down
    pub fn scroll_down(&mut self, lines: usize) {
        self.transcript_scroll = self.transcript_scroll.saturating_add(lines);
        let max_scroll = self.estimate_max_scroll();
        self.transcript_scroll = self.transcript_scroll.min(max_scroll + 100);
    }

    /// Turn the current input buffer into a queued submission. The tag
    /// depends on the session: a pending roll request makes the text a roll
    /// result, otherwise the IC/OOC toggle decides.
    pub fn submit_input(&mut self) -> bool {
        if self.input_buffer.is_empty() || self.request_in_flight {
            return false;
        }

        let text = std::mem::take(&mut self.input_buffer);
        self.cursor_position = 0;
        self.input_history.push_front(text.clone());
        if self.input_history.len() > 100 {
            self.input_history.pop_back();
        }
        self.history_index = None;
        self.saved_input = None;

        let agent = self.active_agent_name();
        let input = if self.session.state().awaiting_roll() {
            PlayerInput::roll(text, agent)
        } else {
            match self.speech_mode {
                SpeechMode::InCharacter => PlayerInput::ic(text, agent),
                SpeechMode::OutOfCharacter => PlayerInput::ooc(text, agent),
            }
        };

        self.pending_request = Some(PendingRequest::Submit(input));
        true
    }

    /// Queue the offered choice at `index` (zero-based) as the player turn.
    pub fn select_choice(&mut self, index: usize) {
        if self.request_in_flight {
            self.set_status("The Handler is still responding...");
            return;
        }
        // Bounds are checked by the session when the request runs; an
        // out-of-range index comes back as a NoSuchChoice error.
        self.pending_request = Some(PendingRequest::SelectChoice(index));
    }

    /// Handle a typed character (unicode-safe)
    pub fn type_char(&mut self, c: char) {
        let byte_pos = self
            .input_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len());
        self.input_buffer.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    /// Handle backspace (unicode-safe)
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position)
            {
                self.input_buffer
                    .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    /// Handle delete (unicode-safe)
    pub fn delete(&mut self) {
        let char_count = self.input_buffer.chars().count();
        if self.cursor_position < char_count {
            if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position)
            {
                self.input_buffer
                    .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.input_buffer.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.chars().count();
    }

    /// Navigate to previous input in history
    pub fn history_prev(&mut self) {
        if self.input_history.is_empty() {
            return;
        }

        if self.history_index.is_none() && !self.input_buffer.is_empty() {
            self.saved_input = Some(self.input_buffer.clone());
        }

        let new_index = match self.history_index {
            None => Some(0),
            Some(i) if i + 1 < self.input_history.len() => Some(i + 1),
            Some(i) => Some(i),
        };

        if let Some(idx) = new_index {
            if let Some(entry) = self.input_history.get(idx) {
                self.input_buffer = entry.clone();
                self.cursor_position = self.input_buffer.chars().count();
                self.history_index = new_index;
            }
        }
    }

    /// Navigate to next input in history
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(0) => {
                self.input_buffer = self.saved_input.take().unwrap_or_default();
                self.cursor_position = self.input_buffer.chars().count();
                self.history_index = None;
            }
            Some(i) => {
                if let Some(entry) = self.input_history.get(i - 1) {
                    self.input_buffer = entry.clone();
                    self.cursor_position = self.input_buffer.chars().count();
                    self.history_index = Some(i - 1);
                }
            }
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Process a colon command
    pub fn process_command(&mut self, command: &str) {
        let cmd = command.trim_start_matches(':');
        let parts: Vec<&str> = cmd.split_whitespace().collect();

        if parts.is_empty() {
            return;
        }

        match parts[0] {
            "q" | "quit" | "exit" => {
                self.should_quit = true;
            }
            "summary" => {
                if self.request_in_flight {
                    self.set_status("The Handler is still responding...");
                } else {
                    self.pending_request = Some(PendingRequest::Summarize);
                }
            }
            "recall" => {
                if parts.len() > 1 {
                    if self.request_in_flight {
                        self.set_status("The Handler is still responding...");
                    } else {
                        self.pending_request =
                            Some(PendingRequest::Recall(PathBuf::from(parts[1..].join(" "))));
                    }
                } else {
                    self.set_status("Usage: :recall <summary-file>");
                }
            }
            "help" | "h" => {
                self.toggle_help();
            }
            _ => {
                self.set_status(format!("Unknown command: {}", parts[0]));
            }
        }
    }

    /// Set status message (always overwrites)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }
}
