//! Prompt construction for the Handler.
//!
//! Every request carries the full briefing context and the full session log;
//! nothing the model saw is summarized or dropped mid-session.

use crate::briefing::BriefingContext;
use crate::transcript::{Transcript, Turn};

/// The Handler's standing instructions.
pub const SYSTEM_PROMPT: &str = include_str!("prompts/handler_base.txt");

/// Preamble for the end-of-session summary request.
pub const SUMMARY_PROMPT: &str = include_str!("prompts/summary.txt");

const EMPTY_LOG: &str = "(The session log is empty.)";

/// Render the transcript as the session log block, one line per turn.
fn format_history(transcript: &Transcript) -> String {
    if transcript.is_empty() {
        return EMPTY_LOG.to_string();
    }
    transcript
        .turns()
        .iter()
        .map(|turn| match turn {
            Turn::Handler { content, .. } => format!("HANDLER: {content}"),
            Turn::Player {
                content,
                agent: Some(agent),
            } => format!("PLAYER ({agent}): {content}"),
            Turn::Player {
                content,
                agent: None,
            } => format!("PLAYER: {content}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the full turn prompt: standing instructions, briefing context,
/// session log, and the trailing directive.
pub fn format_prompt(context: &BriefingContext, transcript: &Transcript) -> String {
    format!(
        "\n{SYSTEM_PROMPT}\n\
         --- RULEBOOK/SETTING CONTEXT ---\n\
         {context}\n\
         --- END CONTEXT ---\n\n\
         --- CURRENT SESSION LOG ---\n\
         {history}\n\
         --- END SESSION LOG ---\n\n\
         Based on the last player action, provide the next narrative beat as the Handler.\n",
        context = context.as_str(),
        history = format_history(transcript),
    )
}

/// Build the summary prompt over the same context and log.
pub fn format_summary_prompt(context: &BriefingContext, transcript: &Transcript) -> String {
    format!(
        "\n{SUMMARY_PROMPT}\n\
         --- RULEBOOK/SETTING CONTEXT (for your reference) ---\n\
         {context}\n\
         --- END CONTEXT ---\n\n\
         --- SESSION LOG TO SUMMARIZE ---\n\
         {history}\n\
         --- END SESSION LOG ---\n\n\
         Please generate the summary.\n",
        context = context.as_str(),
        history = format_history(transcript),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::briefing;
    use crate::transcript::{PlayerInput, Transcript};

    fn context() -> BriefingContext {
        briefing::assemble(&["core rulebook text".to_string()], None, &[], None)
    }

    fn player(input: PlayerInput) -> Turn {
        Turn::Player {
            content: input.content,
            agent: input.agent,
        }
    }

    #[test]
    fn test_prompt_contains_all_blocks_in_order() {
        let mut transcript = Transcript::with_system_online();
        transcript.append(player(PlayerInput::ic(
            "I check the door.",
            Some("Shaw, Ellen".to_string()),
        )));

        let prompt = format_prompt(&context(), &transcript);

        let system = prompt.find("You are the Handler").unwrap();
        let ctx = prompt.find("--- RULEBOOK/SETTING CONTEXT ---").unwrap();
        let log = prompt.find("--- CURRENT SESSION LOG ---").unwrap();
        let directive = prompt.find("Based on the last player action").unwrap();
        assert!(system < ctx && ctx < log && log < directive);
        assert!(prompt.contains("core rulebook text"));
    }

    #[test]
    fn test_turns_attributed_by_sender() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::Handler {
            content: "You arrive at the site.".to_string(),
            choices: vec![],
        });
        transcript.append(player(PlayerInput::ic(
            "I look around.",
            Some("Reyes, Maria".to_string()),
        )));
        transcript.append(player(PlayerInput::ooc("Clarifying question.", None)));

        let prompt = format_prompt(&context(), &transcript);
        assert!(prompt.contains("HANDLER: You arrive at the site."));
        assert!(prompt.contains("PLAYER (Reyes, Maria): [IC] I look around."));
        assert!(prompt.contains("PLAYER: [OOC] Clarifying question."));
    }

    #[test]
    fn test_empty_transcript_renders_sentinel() {
        let prompt = format_prompt(&context(), &Transcript::new());
        assert!(prompt.contains("(The session log is empty.)"));
    }

    #[test]
    fn test_summary_prompt_uses_same_log() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::Handler {
            content: "The farmhouse burns.".to_string(),
            choices: vec![],
        });

        let prompt = format_summary_prompt(&context(), &transcript);
        assert!(prompt.contains("summarize the provided session log"));
        assert!(prompt.contains("--- SESSION LOG TO SUMMARIZE ---"));
        assert!(prompt.contains("HANDLER: The farmhouse burns."));
        assert!(prompt.contains("Please generate the summary."));
    }
}
