//! Session state and the turn controller.
//!
//! The state machine lives in [`SessionState`], a synchronous reducer over
//! transcript turns: submissions and outcomes are applied as explicit
//! transitions, so every rule about choices, rolls, and failure turns is
//! testable without a network. [`HandlerSession`] wraps the reducer with a
//! real [`Handler`] and drives the async request cycle.

use thiserror::Error;

use crate::briefing::BriefingContext;
use crate::handler::{Handler, HandlerError, HandlerResponse};
use crate::roster::Agent;
use crate::setup::{Campaign, CampaignMode};
use crate::transcript::{PlayerInput, Transcript, Turn};

/// Appended as a handler turn whenever a turn request fails, for any reason.
pub const COMM_FAILURE_MESSAGE: &str = "[OOC: An error occurred communicating with the \
     Handler. Please check your API key and network connection, then try again.]";

/// Header line prepended to a successful session summary turn.
pub const SUMMARY_HEADER: &str = "[OOC: SESSION SUMMARY]";

/// Appended as a handler turn when summary generation fails.
pub const SUMMARY_FAILURE_MESSAGE: &str = "[OOC: Failed to generate summary.]";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a handler request is already in flight")]
    RequestInFlight,
    #[error("the session is already open")]
    AlreadyOpened,
    #[error("choice index {index} is out of range: {offered} choices offered")]
    NoSuchChoice { index: usize, offered: usize },
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No narration yet; the next handler turn opens the operation.
    OpeningTurn,
    /// Normal play.
    Playing,
}

/// What came back from a turn request.
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// A well-formed handler reply.
    Narrated(HandlerResponse),
    /// Network error, API error, empty reply, or schema violation. All are
    /// handled identically.
    CommunicationFailure,
}

/// The reducer: transcript plus the few bits of state that are not derivable
/// from it.
///
/// Invariants the transitions maintain:
/// - at most one request in flight (`loading` gates every `begin_*`);
/// - every submission is followed by exactly one handler turn, real or
///   failure;
/// - the offered choice set is always the last handler turn's list, so a
///   player turn clears it and a failure turn restores the pre-submission
///   snapshot.
#[derive(Debug, Clone)]
pub struct SessionState {
    transcript: Transcript,
    phase: Phase,
    loading: bool,
    awaiting_roll: bool,
    // Offer at the moment of the last begin_turn, for the failure path.
    prior_choices: Vec<String>,
}

impl SessionState {
    /// Fresh session: system-online greeting in the log, opening turn ahead.
    pub fn new() -> Self {
        Self {
            transcript: Transcript::with_system_online(),
            phase: Phase::OpeningTurn,
            loading: false,
            awaiting_roll: false,
            prior_choices: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn awaiting_roll(&self) -> bool {
        self.awaiting_roll
    }

    /// The choices currently on offer, derived from the last turn.
    pub fn offered_choices(&self) -> &[String] {
        self.transcript.offered_choices()
    }

    /// Resolve the offered choice at `index` into a submission carrying the
    /// choice text verbatim.
    pub fn choice_input(
        &self,
        index: usize,
        agent: Option<String>,
    ) -> Result<PlayerInput, SessionError> {
        let offered = self.offered_choices();
        let text = offered
            .get(index)
            .cloned()
            .ok_or(SessionError::NoSuchChoice {
                index,
                offered: offered.len(),
            })?;
        Ok(PlayerInput::choice(text, agent))
    }

    /// Start the opening turn: no player turn is appended, the Handler
    /// narrates from the briefing context alone. Only valid once; after the
    /// opening narration lands the session is in [`Phase::Playing`] and a
    /// second opening is rejected.
    pub fn begin_opening(&mut self) -> Result<(), SessionError> {
        if self.loading {
            return Err(SessionError::RequestInFlight);
        }
        if self.phase != Phase::OpeningTurn {
            return Err(SessionError::AlreadyOpened);
        }
        self.prior_choices = self.transcript.offered_choices().to_vec();
        self.loading = true;
        Ok(())
    }

    /// Commit a player submission and mark a request in flight.
    pub fn begin_turn(&mut self, input: PlayerInput) -> Result<(), SessionError> {
        if self.loading {
            return Err(SessionError::RequestInFlight);
        }
        self.prior_choices = self.transcript.offered_choices().to_vec();
        self.transcript.append(Turn::Player {
            content: input.content,
            agent: input.agent,
        });
        self.awaiting_roll = false;
        self.loading = true;
        Ok(())
    }

    /// Mark a summary request in flight. Nothing is appended yet.
    pub fn begin_summary(&mut self) -> Result<(), SessionError> {
        if self.loading {
            return Err(SessionError::RequestInFlight);
        }
        self.prior_choices = self.transcript.offered_choices().to_vec();
        self.loading = true;
        Ok(())
    }

    /// Apply the result of a turn request begun with [`begin_opening`] or
    /// [`begin_turn`]. Exactly one handler turn is appended either way.
    ///
    /// [`begin_opening`]: SessionState::begin_opening
    /// [`begin_turn`]: SessionState::begin_turn
    pub fn apply_outcome(&mut self, outcome: TurnOutcome) {
        match outcome {
            TurnOutcome::Narrated(response) => {
                self.transcript.append(Turn::Handler {
                    content: response.narrative,
                    choices: response.choices,
                });
                self.awaiting_roll = response.awaits_roll;
                self.phase = Phase::Playing;
            }
            TurnOutcome::CommunicationFailure => {
                // The failure turn carries the pre-submission offer so the
                // player can retry from where they stood.
                self.transcript.append(Turn::Handler {
                    content: COMM_FAILURE_MESSAGE.to_string(),
                    choices: self.prior_choices.clone(),
                });
            }
        }
        self.loading = false;
    }

    /// Apply the result of a summary request. The summary turn re-carries
    /// the current offer, so neither the offered choices nor `awaiting_roll`
    /// change.
    pub fn apply_summary(&mut self, summary: Option<String>) {
        let content = match summary {
            Some(text) => format!("{SUMMARY_HEADER}\n\n{text}"),
            None => SUMMARY_FAILURE_MESSAGE.to_string(),
        };
        self.transcript.append(Turn::Handler {
            content,
            choices: self.prior_choices.clone(),
        });
        self.loading = false;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// A live session: the reducer, the immutable briefing context, the agent
/// roster, and the Handler that narrates.
pub struct HandlerSession {
    state: SessionState,
    context: BriefingContext,
    roster: Vec<Agent>,
    mode: CampaignMode,
    handler: Handler,
}

impl HandlerSession {
    pub fn new(campaign: Campaign, handler: Handler) -> Self {
        Self {
            state: SessionState::new(),
            context: campaign.context,
            roster: campaign.roster,
            mode: campaign.mode,
            handler,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn transcript(&self) -> &Transcript {
        self.state.transcript()
    }

    pub fn roster(&self) -> &[Agent] {
        &self.roster
    }

    pub fn mode(&self) -> CampaignMode {
        self.mode
    }

    pub fn context(&self) -> &BriefingContext {
        &self.context
    }

    /// Request the opening narration. Whether it reads as a fresh briefing
    /// or a continuation is the provider's call, driven by whether the
    /// context ends in a campaign journal.
    pub async fn open(&mut self) -> Result<(), SessionError> {
        self.state.begin_opening()?;
        let outcome = self.request_turn().await;
        self.state.apply_outcome(outcome);
        Ok(())
    }

    /// Submit a player turn and wait for the Handler's reply. A failed
    /// request still resolves into a transcript turn; the only error this
    /// returns is an in-flight rejection.
    pub async fn submit(&mut self, input: PlayerInput) -> Result<(), SessionError> {
        self.state.begin_turn(input)?;
        let outcome = self.request_turn().await;
        self.state.apply_outcome(outcome);
        Ok(())
    }

    /// Submit the offered choice at `index` verbatim as the player turn.
    pub async fn select_choice(
        &mut self,
        index: usize,
        agent: Option<String>,
    ) -> Result<(), SessionError> {
        let input = self.state.choice_input(index, agent)?;
        self.submit(input).await
    }

    /// Feed a prior session's summary back into the log as an OOC player
    /// turn, then let the Handler react to it.
    pub async fn recall_summary(&mut self, summary: &str) -> Result<(), SessionError> {
        let content = format!(
            "[OOC: Uploaded previous session summary for context.]\n\n\
             ---SUMMARY START---\n{summary}\n---SUMMARY END---"
        );
        let input = PlayerInput {
            kind: crate::transcript::InputKind::Ooc,
            content,
            agent: None,
        };
        self.submit(input).await
    }

    /// Ask for a session summary and append it to the log.
    pub async fn summarize(&mut self) -> Result<(), SessionError> {
        self.state.begin_summary()?;
        let summary = self
            .handler
            .summarize(&self.context, self.state.transcript())
            .await
            .ok();
        self.state.apply_summary(summary);
        Ok(())
    }

    async fn request_turn(&self) -> TurnOutcome {
        match self
            .handler
            .respond(&self.context, self.state.transcript())
            .await
        {
            Ok(response) => TurnOutcome::Narrated(response),
            // Network errors, API errors, empty replies, and schema
            // violations all get the same treatment.
            Err(HandlerError::NoApiKey | HandlerError::Api(_)) => {
                TurnOutcome::CommunicationFailure
            }
            Err(HandlerError::EmptyReply | HandlerError::Malformed(_)) => {
                TurnOutcome::CommunicationFailure
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::SYSTEM_ONLINE_MESSAGE;

    fn narrated(narrative: &str, choices: &[&str], awaits_roll: bool) -> TurnOutcome {
        TurnOutcome::Narrated(HandlerResponse {
            narrative: narrative.to_string(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            awaits_roll,
        })
    }

    #[test]
    fn test_new_session_starts_with_greeting() {
        let state = SessionState::new();
        assert_eq!(state.phase(), Phase::OpeningTurn);
        assert_eq!(state.transcript().len(), 1);
        assert_eq!(state.transcript().last().unwrap().content(), SYSTEM_ONLINE_MESSAGE);
        assert!(!state.is_loading());
        assert!(!state.awaiting_roll());
    }

    #[test]
    fn test_opening_outcome_enters_playing() {
        let mut state = SessionState::new();
        state.begin_opening().unwrap();
        assert!(state.is_loading());
        state.apply_outcome(narrated("The briefing begins.", &["Listen.", "Interrupt."], false));
        assert_eq!(state.phase(), Phase::Playing);
        assert!(!state.is_loading());
        assert_eq!(state.offered_choices(), ["Listen.", "Interrupt."]);
    }

    #[test]
    fn test_second_opening_rejected_once_playing() {
        let mut state = SessionState::new();
        state.begin_opening().unwrap();
        state.apply_outcome(narrated("The briefing begins.", &["Listen."], false));

        assert!(matches!(
            state.begin_opening(),
            Err(SessionError::AlreadyOpened)
        ));
        assert_eq!(state.transcript().len(), 2);
    }

    #[test]
    fn test_failed_opening_can_be_retried() {
        let mut state = SessionState::new();
        state.begin_opening().unwrap();
        state.apply_outcome(TurnOutcome::CommunicationFailure);

        // The failure left the session unopened, so another attempt is fine.
        assert_eq!(state.phase(), Phase::OpeningTurn);
        assert!(state.begin_opening().is_ok());
    }

    #[test]
    fn test_second_begin_while_loading_is_rejected() {
        let mut state = SessionState::new();
        state.begin_turn(PlayerInput::ic("I knock.", None)).unwrap();
        let err = state.begin_turn(PlayerInput::ic("I knock again.", None));
        assert!(matches!(err, Err(SessionError::RequestInFlight)));
        let err = state.begin_summary();
        assert!(matches!(err, Err(SessionError::RequestInFlight)));
        // Only the first submission landed.
        assert_eq!(state.transcript().len(), 2);
    }

    #[test]
    fn test_submission_clears_offer_and_roll_flag() {
        let mut state = SessionState::new();
        state.begin_opening().unwrap();
        state.apply_outcome(narrated("Roll Alertness.", &["Press on."], true));
        assert!(state.awaiting_roll());

        state.begin_turn(PlayerInput::roll("Rolled 34: success.", None)).unwrap();
        assert!(!state.awaiting_roll());
        assert!(state.offered_choices().is_empty());
    }

    #[test]
    fn test_failure_appends_turn_and_restores_offer() {
        let mut state = SessionState::new();
        state.begin_opening().unwrap();
        state.apply_outcome(narrated("Pick one.", &["Run.", "Hide.", "Fight."], false));

        state.begin_turn(PlayerInput::ic("I run.", None)).unwrap();
        let before = state.transcript().len();
        state.apply_outcome(TurnOutcome::CommunicationFailure);

        assert_eq!(state.transcript().len(), before + 1);
        assert_eq!(state.transcript().last().unwrap().content(), COMM_FAILURE_MESSAGE);
        assert_eq!(state.offered_choices(), ["Run.", "Hide.", "Fight."]);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_roll_flag_not_restored_by_failure() {
        let mut state = SessionState::new();
        state.begin_opening().unwrap();
        state.apply_outcome(narrated("Roll it.", &[], true));

        state.begin_turn(PlayerInput::roll("Rolled 98.", None)).unwrap();
        state.apply_outcome(TurnOutcome::CommunicationFailure);
        assert!(!state.awaiting_roll());
    }

    #[test]
    fn test_summary_preserves_offer_and_roll_flag() {
        let mut state = SessionState::new();
        state.begin_opening().unwrap();
        state.apply_outcome(narrated("Roll Sanity.", &["Flee.", "Stare."], true));

        state.begin_summary().unwrap();
        state.apply_summary(Some("- The team found the idol.".to_string()));

        let last = state.transcript().last().unwrap();
        assert!(last.content().starts_with("[OOC: SESSION SUMMARY]\n\n"));
        assert!(last.content().contains("found the idol"));
        assert_eq!(state.offered_choices(), ["Flee.", "Stare."]);
        assert!(state.awaiting_roll());
    }

    #[test]
    fn test_summary_failure_turn() {
        let mut state = SessionState::new();
        state.begin_summary().unwrap();
        state.apply_summary(None);
        assert_eq!(state.transcript().last().unwrap().content(), SUMMARY_FAILURE_MESSAGE);
        assert!(!state.is_loading());
    }
}
