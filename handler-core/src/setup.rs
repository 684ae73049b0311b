//! Campaign setup: loading rulebooks, agent sheets, portraits, and an
//! optional prior-session journal from disk, then resolving them into a
//! [`Campaign`] ready to open a session.
//!
//! All reads for a campaign happen up front and the load is atomic: any
//! unreadable file fails the whole setup and nothing partial is produced.

use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use thiserror::Error;

use crate::briefing::{self, BriefingContext};
use crate::roster::{parse_agent_name, Agent, Portrait};

/// Errors produced while loading campaign files.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("at least one rulebook file is required")]
    NoRulebooks,
    #[error("at least one agent sheet is required")]
    NoAgents,
    #[error("at most {max} agents are supported, got {got}")]
    TooManyAgents { max: usize, got: usize },
    #[error("agent {index} has no name: none given and none found in the sheet")]
    UnnamedAgent { index: usize },
}

/// Maximum number of agents in a roster.
pub const MAX_AGENTS: usize = 8;

/// Whether the session begins fresh or continues from a journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignMode {
    /// A brand new campaign: the Handler improvises an opening scene.
    NewCampaign,
    /// Continuing from an uploaded journal of a previous session.
    ContinueCampaign,
}

/// One agent's files as given on the command line. The name is optional;
/// when absent it is parsed from the sheet text.
#[derive(Debug, Clone, Default)]
pub struct AgentFiles {
    pub sheet: PathBuf,
    pub name: Option<String>,
    pub portrait: Option<PathBuf>,
}

impl AgentFiles {
    pub fn new(sheet: impl Into<PathBuf>) -> Self {
        AgentFiles {
            sheet: sheet.into(),
            name: None,
            portrait: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_portrait(mut self, portrait: impl Into<PathBuf>) -> Self {
        self.portrait = Some(portrait.into());
        self
    }
}

/// Every file path a campaign needs, before any reads happen.
#[derive(Debug, Clone, Default)]
pub struct CampaignFiles {
    pub rulebooks: Vec<PathBuf>,
    pub mythic_rulebook: Option<PathBuf>,
    pub agents: Vec<AgentFiles>,
    pub journal: Option<PathBuf>,
}

impl CampaignFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rulebook(mut self, path: impl Into<PathBuf>) -> Self {
        self.rulebooks.push(path.into());
        self
    }

    pub fn mythic_rulebook(mut self, path: impl Into<PathBuf>) -> Self {
        self.mythic_rulebook = Some(path.into());
        self
    }

    pub fn agent(mut self, agent: AgentFiles) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn journal(mut self, path: impl Into<PathBuf>) -> Self {
        self.journal = Some(path.into());
        self
    }

    /// Read and resolve everything into a [`Campaign`].
    pub async fn load(self) -> Result<Campaign, SetupError> {
        if self.rulebooks.is_empty() {
            return Err(SetupError::NoRulebooks);
        }
        if self.agents.is_empty() {
            return Err(SetupError::NoAgents);
        }
        if self.agents.len() > MAX_AGENTS {
            return Err(SetupError::TooManyAgents {
                max: MAX_AGENTS,
                got: self.agents.len(),
            });
        }

        let rulebooks = try_join_all(self.rulebooks.iter().map(|p| read_text(p))).await?;

        let mythic = match &self.mythic_rulebook {
            Some(path) => Some(read_text(path).await?),
            None => None,
        };

        let journal = match &self.journal {
            Some(path) => Some(read_text(path).await?),
            None => None,
        };

        let mut roster = Vec::with_capacity(self.agents.len());
        for (index, files) in self.agents.iter().enumerate() {
            let sheet = read_text(&files.sheet).await?;

            let name = match &files.name {
                Some(name) => name.clone(),
                None => parse_agent_name(&sheet)
                    .ok_or(SetupError::UnnamedAgent { index: index + 1 })?,
            };

            let portrait = match &files.portrait {
                Some(path) => {
                    let bytes = read_bytes(path).await?;
                    Portrait::from_bytes(guess_image_mime(path), &bytes)
                }
                None => Portrait::Placeholder,
            };

            roster.push(Agent {
                name,
                sheet,
                portrait,
            });
        }

        let mode = if journal.is_some() {
            CampaignMode::ContinueCampaign
        } else {
            CampaignMode::NewCampaign
        };

        let context = briefing::assemble(
            &rulebooks,
            mythic.as_deref(),
            &roster,
            journal.as_deref(),
        );

        Ok(Campaign {
            context,
            roster,
            mode,
        })
    }
}

/// A fully loaded campaign: the assembled briefing context, the agent
/// roster, and whether the session is fresh or a continuation.
#[derive(Debug, Clone)]
pub struct Campaign {
    pub context: BriefingContext,
    pub roster: Vec<Agent>,
    pub mode: CampaignMode,
}

async fn read_text(path: &Path) -> Result<String, SetupError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SetupError::Read {
            path: path.to_path_buf(),
            source,
        })
}

async fn read_bytes(path: &Path) -> Result<Vec<u8>, SetupError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| SetupError::Read {
            path: path.to_path_buf(),
            source,
        })
}

fn guess_image_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}
