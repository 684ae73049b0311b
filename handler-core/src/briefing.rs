//! Briefing context assembly.
//!
//! The briefing context is the static text corpus supplied to the Handler on
//! every prompt: rulebook text, one section per agent, and optionally a prior
//! campaign journal. It is assembled once at setup and never mutated; a new
//! session requires a new context.

use crate::roster::Agent;

/// Literal separator placed between concatenated rulebook files.
pub const FILE_SEPARATOR: &str = "\n\n--- END OF FILE ---\n\n";

/// The immutable session-long context string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefingContext(String);

impl BriefingContext {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Assemble the briefing context with stable section ordering: rulebooks
/// first, then the optional Mythic GME rulebook, then one headed section per
/// agent in roster order, then the journal last when present.
pub fn assemble(
    rulebooks: &[String],
    mythic_rulebook: Option<&str>,
    roster: &[Agent],
    journal: Option<&str>,
) -> BriefingContext {
    let mut context = rulebooks.join(FILE_SEPARATOR);

    if let Some(mythic) = mythic_rulebook {
        context.push_str("\n\n--- MYTHIC GME RULEBOOK ---\n\n");
        context.push_str(mythic);
    }

    for (index, agent) in roster.iter().enumerate() {
        context.push_str(&format!(
            "\n\n--- AGENT {}: {} ---\n\n",
            index + 1,
            agent.name
        ));
        context.push_str(&agent.sheet);
    }

    if let Some(journal) = journal {
        context.push_str("\n\n--- CAMPAIGN JOURNAL ---\n\n");
        context.push_str(journal);
    }

    BriefingContext(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Portrait;

    fn agent(name: &str, sheet: &str) -> Agent {
        Agent {
            name: name.to_string(),
            sheet: sheet.to_string(),
            portrait: Portrait::Placeholder,
        }
    }

    #[test]
    fn test_rulebooks_joined_in_order() {
        let context = assemble(
            &["contents of A".to_string(), "contents of B".to_string()],
            None,
            &[],
            None,
        );

        let a = context.as_str().find("contents of A").unwrap();
        let sep = context.as_str().find("--- END OF FILE ---").unwrap();
        let b = context.as_str().find("contents of B").unwrap();
        assert!(a < sep && sep < b);
    }

    #[test]
    fn test_single_rulebook_has_no_separator() {
        let context = assemble(&["just one book".to_string()], None, &[], None);
        assert!(!context.as_str().contains("--- END OF FILE ---"));
    }

    #[test]
    fn test_agent_sections_numbered_in_roster_order() {
        let roster = vec![
            agent("Reyes, Maria", "sheet one"),
            agent("Carver, David", "sheet two"),
        ];
        let context = assemble(&["rules".to_string()], None, &roster, None);

        let first = context.as_str().find("--- AGENT 1: Reyes, Maria ---").unwrap();
        let second = context.as_str().find("--- AGENT 2: Carver, David ---").unwrap();
        assert!(first < second);
        assert!(context.as_str().contains("sheet one"));
        assert!(context.as_str().contains("sheet two"));
    }

    #[test]
    fn test_journal_comes_last() {
        let roster = vec![agent("Shaw, Ellen", "sheet")];
        let context = assemble(
            &["rules".to_string()],
            Some("mythic tables"),
            &roster,
            Some("previous events"),
        );

        let mythic = context.as_str().find("--- MYTHIC GME RULEBOOK ---").unwrap();
        let agent_section = context.as_str().find("--- AGENT 1:").unwrap();
        let journal = context.as_str().find("--- CAMPAIGN JOURNAL ---").unwrap();
        assert!(mythic < agent_section && agent_section < journal);
        assert!(context.as_str().ends_with("previous events"));
    }
}
