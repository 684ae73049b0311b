//! Test doubles for driving sessions without a network.
//!
//! [`MockHandler`] scripts turn and summary outcomes; [`TestHarness`] pairs
//! one with a [`SessionState`] and a fixed briefing context and drives the
//! same transitions the live session does, capturing the prompt that would
//! have been sent.

use std::collections::VecDeque;

use crate::briefing::{self, BriefingContext};
use crate::handler::{prompt, HandlerResponse};
use crate::session::{SessionError, SessionState, TurnOutcome};
use crate::transcript::PlayerInput;

/// A scripted Handler. Outcomes are consumed in order; running out of
/// script is a test bug and panics.
#[derive(Debug, Default)]
pub struct MockHandler {
    turns: VecDeque<TurnOutcome>,
    summaries: VecDeque<Option<String>>,
}

impl MockHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful narrated turn.
    pub fn expect_response(
        mut self,
        narrative: &str,
        choices: &[&str],
        awaits_roll: bool,
    ) -> Self {
        self.turns.push_back(TurnOutcome::Narrated(HandlerResponse {
            narrative: narrative.to_string(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            awaits_roll,
        }));
        self
    }

    /// Queue a failed turn request.
    pub fn expect_failure(mut self) -> Self {
        self.turns.push_back(TurnOutcome::CommunicationFailure);
        self
    }

    /// Queue a summary result; `None` scripts a summary failure.
    pub fn expect_summary(mut self, summary: Option<&str>) -> Self {
        self.summaries.push_back(summary.map(|s| s.to_string()));
        self
    }

    fn next_turn(&mut self) -> TurnOutcome {
        match self.turns.pop_front() {
            Some(outcome) => outcome,
            None => panic!("MockHandler ran out of scripted turn outcomes"),
        }
    }

    fn next_summary(&mut self) -> Option<String> {
        match self.summaries.pop_front() {
            Some(summary) => summary,
            None => panic!("MockHandler ran out of scripted summaries"),
        }
    }
}

/// Drives a [`SessionState`] against a [`MockHandler`].
pub struct TestHarness {
    pub state: SessionState,
    pub context: BriefingContext,
    handler: MockHandler,
    last_prompt: Option<String>,
}

impl TestHarness {
    pub fn new(handler: MockHandler) -> Self {
        Self::with_context(handler, "TEST RULEBOOK: standard Delta Green rules apply.")
    }

    pub fn with_context(handler: MockHandler, rulebook: &str) -> Self {
        Self {
            state: SessionState::new(),
            context: briefing::assemble(&[rulebook.to_string()], None, &[], None),
            handler,
            last_prompt: None,
        }
    }

    /// Run the opening turn against the next scripted outcome.
    pub fn open(&mut self) -> Result<(), SessionError> {
        self.state.begin_opening()?;
        self.last_prompt = Some(prompt::format_prompt(&self.context, self.state.transcript()));
        let outcome = self.handler.next_turn();
        self.state.apply_outcome(outcome);
        Ok(())
    }

    /// Submit a player turn against the next scripted outcome.
    pub fn submit(&mut self, input: PlayerInput) -> Result<(), SessionError> {
        self.state.begin_turn(input)?;
        self.last_prompt = Some(prompt::format_prompt(&self.context, self.state.transcript()));
        let outcome = self.handler.next_turn();
        self.state.apply_outcome(outcome);
        Ok(())
    }

    /// Select the offered choice at `index`, as the session's choice sugar
    /// does, against the next scripted outcome.
    pub fn select_choice(
        &mut self,
        index: usize,
        agent: Option<String>,
    ) -> Result<(), SessionError> {
        let input = self.state.choice_input(index, agent)?;
        self.submit(input)
    }

    /// Run a summary request against the next scripted summary.
    pub fn summarize(&mut self) -> Result<(), SessionError> {
        self.state.begin_summary()?;
        self.last_prompt = Some(prompt::format_summary_prompt(
            &self.context,
            self.state.transcript(),
        ));
        let summary = self.handler.next_summary();
        self.state.apply_summary(summary);
        Ok(())
    }

    /// The full prompt text of the most recent request.
    pub fn last_prompt(&self) -> &str {
        match &self.last_prompt {
            Some(prompt) => prompt,
            None => panic!("no request has been made yet"),
        }
    }

    pub fn assert_turn_count(&self, expected: usize) {
        let actual = self.state.transcript().len();
        assert_eq!(
            actual, expected,
            "expected {expected} transcript turns, found {actual}"
        );
    }

    pub fn assert_offered(&self, expected: &[&str]) {
        let actual = self.state.offered_choices();
        assert_eq!(
            actual, expected,
            "offered choices mismatch: expected {expected:?}, found {actual:?}"
        );
    }

    pub fn assert_awaiting_roll(&self, expected: bool) {
        assert_eq!(
            self.state.awaiting_roll(),
            expected,
            "awaiting_roll expected {expected}"
        );
    }

    pub fn assert_last_content(&self, expected: &str) {
        let actual = self.state.transcript().last().map(|t| t.content());
        assert_eq!(
            actual,
            Some(expected),
            "last transcript turn content mismatch"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_runs_a_scripted_exchange() {
        let mock = MockHandler::new()
            .expect_response("You stand before the farmhouse.", &["Enter.", "Circle around."], false)
            .expect_response("Inside, the smell hits you.", &["Search.", "Retreat."], false);
        let mut harness = TestHarness::new(mock);

        harness.open().unwrap();
        harness.assert_offered(&["Enter.", "Circle around."]);

        harness
            .submit(PlayerInput::ic("I go inside.", None))
            .unwrap();
        harness.assert_offered(&["Search.", "Retreat."]);
        harness.assert_turn_count(4);
        assert!(harness.last_prompt().contains("PLAYER: [IC] I go inside."));
    }

    #[test]
    #[should_panic(expected = "ran out of scripted turn outcomes")]
    fn test_exhausted_script_panics() {
        let mut harness = TestHarness::new(MockHandler::new());
        let _ = harness.open();
    }
}
