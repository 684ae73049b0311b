//! Player agents and the session roster.
//!
//! The roster is fixed at session start: 1 to 8 agents, each with a display
//! name, the raw text of their character sheet (opaque to this layer), and a
//! portrait reference used only for display.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// A player-controlled character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Display name, parsed from the sheet or entered manually.
    pub name: String,
    /// Raw character sheet text, forwarded verbatim into the briefing context.
    pub sheet: String,
    /// Portrait reference for display.
    pub portrait: Portrait,
}

/// A self-contained portrait reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Portrait {
    /// An uploaded image embedded as a data URI.
    DataUri(String),
    /// The fixed placeholder used when no portrait was provided.
    Placeholder,
}

impl Portrait {
    /// Embed raw image bytes as a data URI.
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Portrait::DataUri(format!("data:{mime_type};base64,{}", STANDARD.encode(bytes)))
    }

    /// Whether an actual image is on file.
    pub fn has_image(&self) -> bool {
        matches!(self, Portrait::DataUri(_))
    }
}

/// Best-effort extraction of an agent name from character sheet text.
///
/// Looks for the official sheet's `LAST NAME, FIRST NAME` label and takes the
/// following line, falling back to a `NAME:` line. Form feeds (common in text
/// copied out of PDFs) are stripped first, and leading list numbering like
/// `1. ` is removed from the result. Returns `None` when nothing plausible is
/// found; the caller falls back to manual entry.
pub fn parse_agent_name(sheet: &str) -> Option<String> {
    if sheet.is_empty() {
        return None;
    }

    let cleaned = sheet.replace('\u{000C}', "");
    let lines: Vec<&str> = cleaned.lines().collect();

    if let Some(label_index) = lines
        .iter()
        .position(|line| line.to_uppercase().contains("LAST NAME, FIRST NAME"))
    {
        if let Some(name_line) = lines.get(label_index + 1) {
            let name = name_line
                .trim()
                .trim_start_matches(|c: char| c.is_ascii_digit())
                .trim_start_matches('.')
                .trim();
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
    }

    lines
        .iter()
        .find(|line| line.to_uppercase().starts_with("NAME:"))
        .map(|line| line[5..].trim().to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_official_sheet_label() {
        let sheet = "SF-315-A\nLAST NAME, FIRST NAME\nReyes, Maria\nPROFESSION: Federal Agent";
        assert_eq!(parse_agent_name(sheet).as_deref(), Some("Reyes, Maria"));
    }

    #[test]
    fn test_parse_label_is_case_insensitive() {
        let sheet = "1. Last Name, First Name\nCarver, David";
        assert_eq!(parse_agent_name(sheet).as_deref(), Some("Carver, David"));
    }

    #[test]
    fn test_parse_strips_numbering_and_form_feeds() {
        let sheet = "\u{000C}LAST NAME, FIRST NAME\n2. Shaw, Ellen\n";
        assert_eq!(parse_agent_name(sheet).as_deref(), Some("Shaw, Ellen"));
    }

    #[test]
    fn test_parse_name_line_fallback() {
        let sheet = "some preamble\nNAME: Agent Cooper\nAGE: 41";
        assert_eq!(parse_agent_name(sheet).as_deref(), Some("Agent Cooper"));
    }

    #[test]
    fn test_parse_returns_none_when_nothing_found() {
        assert_eq!(parse_agent_name(""), None);
        assert_eq!(parse_agent_name("just some notes\nnothing labeled"), None);
    }

    #[test]
    fn test_portrait_data_uri() {
        let portrait = Portrait::from_bytes("image/png", &[0x89, 0x50, 0x4e, 0x47]);
        assert!(portrait.has_image());
        match portrait {
            Portrait::DataUri(uri) => {
                assert!(uri.starts_with("data:image/png;base64,"));
            }
            Portrait::Placeholder => panic!("expected a data URI"),
        }
        assert!(!Portrait::Placeholder.has_image());
    }
}
