//! Live smoke tests against the real Gemini API.
//!
//! Ignored by default; run with `cargo test -- --ignored` and a
//! `GEMINI_API_KEY` in the environment or a `.env` file.

use handler_core::briefing;
use handler_core::handler::Handler;
use handler_core::transcript::{PlayerInput, Transcript, Turn};

fn rulebook_context() -> handler_core::BriefingContext {
    briefing::assemble(
        &["Delta Green is a game of cosmic horror. Agents investigate the unnatural. \
           Skill tests roll d100 under the skill rating."
            .to_string()],
        None,
        &[],
        None,
    )
}

#[tokio::test]
#[ignore]
async fn live_opening_turn() {
    dotenvy::dotenv().ok();
    let handler = Handler::from_env().unwrap();

    let transcript = Transcript::with_system_online();
    let response = handler
        .respond(&rulebook_context(), &transcript)
        .await
        .unwrap();

    assert!(!response.narrative.is_empty());
    // The prompt instructs 3 to 4 choices; tolerate drift but require some.
    assert!(!response.choices.is_empty());
}

#[tokio::test]
#[ignore]
async fn live_summary() {
    dotenvy::dotenv().ok();
    let handler = Handler::from_env().unwrap();

    let mut transcript = Transcript::with_system_online();
    transcript.append(Turn::Handler {
        content: "You arrive at the abandoned farmhouse outside Dulwich.".to_string(),
        choices: vec![],
    });
    let input = PlayerInput::ic("I search the cellar.", Some("Shaw, Ellen".to_string()));
    transcript.append(Turn::Player {
        content: input.content,
        agent: input.agent,
    });

    let summary = handler
        .summarize(&rulebook_context(), &transcript)
        .await
        .unwrap();
    assert!(!summary.trim().is_empty());
}
