//! End-to-end session flows against the scripted harness.

use handler_core::briefing;
use handler_core::roster::{Agent, Portrait};
use handler_core::session::{COMM_FAILURE_MESSAGE, Phase, SessionError, SUMMARY_FAILURE_MESSAGE};
use handler_core::testing::{MockHandler, TestHarness};
use handler_core::transcript::{PlayerInput, SYSTEM_ONLINE_MESSAGE};

fn agent(name: &str, sheet: &str) -> Agent {
    Agent {
        name: name.to_string(),
        sheet: sheet.to_string(),
        portrait: Portrait::Placeholder,
    }
}

#[test]
fn fresh_campaign_opening() {
    let mock = MockHandler::new().expect_response(
        "Your phone buzzes at 3 AM. A voice says only: 'Clear signal. Dulwich, Vermont.'",
        &["Pack and drive north.", "Call your case officer back.", "Go back to sleep."],
        false,
    );
    let mut harness = TestHarness::new(mock);

    assert_eq!(harness.state.phase(), Phase::OpeningTurn);
    assert_eq!(harness.state.transcript().len(), 1);
    assert_eq!(
        harness.state.transcript().last().unwrap().content(),
        SYSTEM_ONLINE_MESSAGE
    );

    harness.open().unwrap();

    // No player turn precedes the opening narration.
    assert_eq!(harness.state.phase(), Phase::Playing);
    harness.assert_turn_count(2);
    harness.assert_offered(&[
        "Pack and drive north.",
        "Call your case officer back.",
        "Go back to sleep.",
    ]);
    harness.assert_awaiting_roll(false);
}

#[test]
fn choice_selection_round_trip() {
    let mock = MockHandler::new()
        .expect_response("The door hangs open.", &["Enter.", "Knock first."], false)
        .expect_response("You step into the dark hallway.", &["Find a light.", "Listen."], false);
    let mut harness = TestHarness::new(mock);
    harness.open().unwrap();

    // The selected choice text goes into the log verbatim.
    harness
        .select_choice(0, Some("Reyes, Maria".to_string()))
        .unwrap();

    let turns = harness.state.transcript().turns();
    assert_eq!(turns[2].content(), "Enter.");
    assert!(harness.last_prompt().contains("PLAYER (Reyes, Maria): Enter."));
    harness.assert_offered(&["Find a light.", "Listen."]);
}

#[test]
fn out_of_range_choice_rejected_without_a_turn() {
    let mock = MockHandler::new().expect_response("Pick one.", &["Run.", "Hide."], false);
    let mut harness = TestHarness::new(mock);
    harness.open().unwrap();

    let err = harness.select_choice(5, None);
    assert!(matches!(
        err,
        Err(SessionError::NoSuchChoice {
            index: 5,
            offered: 2
        })
    ));

    // Nothing landed in the log and the offer is untouched.
    harness.assert_turn_count(2);
    harness.assert_offered(&["Run.", "Hide."]);
    assert!(!harness.state.is_loading());
}

#[test]
fn roll_request_and_resolution() {
    let mock = MockHandler::new()
        .expect_response(
            "Something moves behind the curtain. Roll an Alertness test.",
            &[],
            true,
        )
        .expect_response("You catch the glint of a blade just in time.", &["Dodge.", "Shout."], false);
    let mut harness = TestHarness::new(mock);
    harness.open().unwrap();

    harness.assert_awaiting_roll(true);
    harness.assert_offered(&[]);

    harness
        .submit(PlayerInput::roll("Rolled 23 against Alertness 50: success.", None))
        .unwrap();

    harness.assert_awaiting_roll(false);
    harness.assert_offered(&["Dodge.", "Shout."]);
}

#[test]
fn failure_then_retry_preserves_the_offer() {
    let mock = MockHandler::new()
        .expect_response("Choose your approach.", &["Front door.", "Back window."], false)
        .expect_failure()
        .expect_response("You pick the lock and slip inside.", &["Search upstairs."], false);
    let mut harness = TestHarness::new(mock);
    harness.open().unwrap();

    harness.submit(PlayerInput::ic("I try the back window.", None)).unwrap();

    // The failure still lands as a handler turn and re-offers the
    // pre-submission choices.
    harness.assert_last_content(COMM_FAILURE_MESSAGE);
    harness.assert_offered(&["Front door.", "Back window."]);
    assert!(!harness.state.is_loading());

    // The retry goes through as an ordinary turn.
    harness.submit(PlayerInput::ic("I try the back window.", None)).unwrap();
    harness.assert_offered(&["Search upstairs."]);
    harness.assert_turn_count(6);
}

#[test]
fn schema_violation_handled_like_network_failure() {
    // The harness scripts both as the same failure outcome; this pins the
    // user-visible result: fixed OOC message, prior offer, not loading.
    let mock = MockHandler::new()
        .expect_response("Pick.", &["A.", "B."], false)
        .expect_failure();
    let mut harness = TestHarness::new(mock);
    harness.open().unwrap();
    harness.submit(PlayerInput::ooc("What do I know about the town?", None)).unwrap();

    harness.assert_last_content(COMM_FAILURE_MESSAGE);
    harness.assert_offered(&["A.", "B."]);
}

#[test]
fn no_second_request_while_loading() {
    let mut state = handler_core::SessionState::new();
    state.begin_turn(PlayerInput::ic("First.", None)).unwrap();

    assert!(matches!(
        state.begin_turn(PlayerInput::ic("Second.", None)),
        Err(SessionError::RequestInFlight)
    ));
    assert!(matches!(
        state.begin_opening(),
        Err(SessionError::RequestInFlight)
    ));
    assert_eq!(state.transcript().len(), 2);
}

#[test]
fn summary_leaves_play_state_alone() {
    let mock = MockHandler::new()
        .expect_response("Roll Sanity as the thing unfolds.", &["Look away.", "Keep watching."], true)
        .expect_summary(Some("- The team breached the silo.\n- Shaw saw the thing inside."));
    let mut harness = TestHarness::new(mock);
    harness.open().unwrap();
    harness.summarize().unwrap();

    let last = harness.state.transcript().last().unwrap();
    assert!(last.content().starts_with("[OOC: SESSION SUMMARY]\n\n"));
    assert!(last.content().contains("breached the silo"));
    // Neither the offer nor the pending roll changed.
    harness.assert_offered(&["Look away.", "Keep watching."]);
    harness.assert_awaiting_roll(true);
    assert!(harness.last_prompt().contains("--- SESSION LOG TO SUMMARIZE ---"));
}

#[test]
fn summary_failure_is_a_fixed_message() {
    let mock = MockHandler::new()
        .expect_response("Opening.", &["Go."], false)
        .expect_summary(None);
    let mut harness = TestHarness::new(mock);
    harness.open().unwrap();
    harness.summarize().unwrap();

    harness.assert_last_content(SUMMARY_FAILURE_MESSAGE);
    harness.assert_offered(&["Go."]);
}

#[test]
fn odd_sized_choice_lists_flow_through() {
    let mock = MockHandler::new()
        .expect_response("Only one way forward.", &["Descend."], false)
        .expect_response(
            "Too many doors.",
            &["One.", "Two.", "Three.", "Four.", "Five.", "Six."],
            false,
        );
    let mut harness = TestHarness::new(mock);
    harness.open().unwrap();
    harness.assert_offered(&["Descend."]);

    harness.submit(PlayerInput::ic("I descend.", None)).unwrap();
    assert_eq!(harness.state.offered_choices().len(), 6);
}

#[test]
fn multi_agent_context_sections_in_roster_order() {
    let roster = vec![
        agent("Reyes, Maria", "FBI. Bureaucracy 60%."),
        agent("Carver, David", "CDC. Medicine 70%."),
        agent("Shaw, Ellen", "Occultist. Unnatural 12%."),
    ];
    let context = briefing::assemble(
        &["AGENT'S HANDBOOK excerpt".to_string()],
        None,
        &roster,
        Some("Last time: the silo."),
    );

    let text = context.as_str();
    let rules = text.find("AGENT'S HANDBOOK excerpt").unwrap();
    let one = text.find("--- AGENT 1: Reyes, Maria ---").unwrap();
    let two = text.find("--- AGENT 2: Carver, David ---").unwrap();
    let three = text.find("--- AGENT 3: Shaw, Ellen ---").unwrap();
    let journal = text.find("--- CAMPAIGN JOURNAL ---").unwrap();
    assert!(rules < one && one < two && two < three && three < journal);
}

#[test]
fn session_prompt_carries_full_context_and_log() {
    let mock = MockHandler::new()
        .expect_response("Opening.", &["Go."], false)
        .expect_response("Next.", &["On."], false);
    let mut harness = TestHarness::with_context(mock, "THE RITUAL REQUIRES THREE NAMES");
    harness.open().unwrap();
    harness.submit(PlayerInput::ic("I read the ledger.", None)).unwrap();

    let prompt = harness.last_prompt();
    // Every request carries the whole briefing and the whole log.
    assert!(prompt.contains("THE RITUAL REQUIRES THREE NAMES"));
    assert!(prompt.contains(SYSTEM_ONLINE_MESSAGE));
    assert!(prompt.contains("HANDLER: Opening."));
    assert!(prompt.contains("PLAYER: [IC] I read the ledger."));
}

fn context_block(prompt: &str) -> String {
    let start = prompt
        .find("--- RULEBOOK/SETTING CONTEXT ---")
        .expect("prompt has a context header");
    let end = prompt
        .find("--- END CONTEXT ---")
        .expect("prompt has a context footer");
    prompt[start..end].to_string()
}

#[test]
fn briefing_context_identical_across_requests() {
    let mock = MockHandler::new()
        .expect_response("Opening.", &["Go."], false)
        .expect_response("Next.", &["On."], false)
        .expect_response("Again.", &["More."], false);
    let mut harness = TestHarness::with_context(mock, "THE TOWN REMEMBERS");
    harness.open().unwrap();
    let first = context_block(harness.last_prompt());

    harness.submit(PlayerInput::ic("I knock.", None)).unwrap();
    let second = context_block(harness.last_prompt());

    harness.submit(PlayerInput::ooc("What time is it?", None)).unwrap();
    let third = context_block(harness.last_prompt());

    // The briefing is assembled once; only the session log grows.
    assert_eq!(first, second);
    assert_eq!(second, third);
}
