//! The session transcript: an append-only log of turns.
//!
//! Every exchange between the players and the Handler lands here. Turns are
//! never edited or removed once appended; everything the UI shows (including
//! which choices are currently on offer) is derived by reading the log.

use serde::{Deserialize, Serialize};

/// The greeting the Handler posts before any rulebooks are processed.
pub const SYSTEM_ONLINE_MESSAGE: &str = "Welcome to Delta Green. The files you upload will \
provide the necessary context for our operation. Once uploaded, I will begin the briefing. \
Acknowledge when you are ready to proceed.";

/// One atomic entry in the transcript.
///
/// Player turns carry an optional agent attribution; handler turns carry the
/// choice list that was offered alongside the narration. A turn is immutable
/// once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "sender", rename_all = "lowercase")]
pub enum Turn {
    Player {
        content: String,
        agent: Option<String>,
    },
    Handler {
        content: String,
        choices: Vec<String>,
    },
}

impl Turn {
    /// The turn's text content, regardless of sender.
    pub fn content(&self) -> &str {
        match self {
            Turn::Player { content, .. } => content,
            Turn::Handler { content, .. } => content,
        }
    }

    pub fn is_handler(&self) -> bool {
        matches!(self, Turn::Handler { .. })
    }
}

/// How a player submission was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// In-character action text.
    Ic,
    /// Out-of-character question or aside.
    Ooc,
    /// The outcome of a requested dice roll.
    Roll,
    /// Selection of one of the offered choices.
    Choice,
}

/// A player submission, before it becomes a transcript turn.
#[derive(Debug, Clone)]
pub struct PlayerInput {
    pub kind: InputKind,
    pub content: String,
    pub agent: Option<String>,
}

impl PlayerInput {
    /// In-character input; the content is tagged with the `[IC]` marker.
    pub fn ic(text: impl AsRef<str>, agent: Option<String>) -> Self {
        Self {
            kind: InputKind::Ic,
            content: format!("[IC] {}", text.as_ref()),
            agent,
        }
    }

    /// Out-of-character input; the content is tagged with the `[OOC]` marker.
    pub fn ooc(text: impl AsRef<str>, agent: Option<String>) -> Self {
        Self {
            kind: InputKind::Ooc,
            content: format!("[OOC] {}", text.as_ref()),
            agent,
        }
    }

    /// A dice-roll outcome, submitted while the Handler awaits a roll.
    pub fn roll(text: impl Into<String>, agent: Option<String>) -> Self {
        Self {
            kind: InputKind::Roll,
            content: text.into(),
            agent,
        }
    }

    /// Selection of an offered choice; the content is the choice text itself.
    pub fn choice(text: impl Into<String>, agent: Option<String>) -> Self {
        Self {
            kind: InputKind::Choice,
            content: text.into(),
            agent,
        }
    }
}

/// Append-only store of session turns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transcript pre-seeded with the system-online greeting.
    pub fn with_system_online() -> Self {
        let mut transcript = Self::new();
        transcript.append(Turn::Handler {
            content: SYSTEM_ONLINE_MESSAGE.to_string(),
            choices: Vec::new(),
        });
        transcript
    }

    /// Append a turn. This is the only mutator.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// The full ordered sequence of turns.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The choices currently on offer.
    ///
    /// A pure read: the offer is exactly the choice list of the final turn
    /// when that turn is a handler turn, and empty otherwise. A player
    /// submission therefore clears the offer simply by being appended, and
    /// older handler turns are historical record only.
    pub fn offered_choices(&self) -> &[String] {
        match self.turns.last() {
            Some(Turn::Handler { choices, .. }) => choices,
            _ => &[],
        }
    }
}
