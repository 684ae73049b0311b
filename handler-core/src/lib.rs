//! Headless engine for a Handler-narrated Delta Green session.
//!
//! The crate is frontend-agnostic: it loads campaign files into a briefing
//! context, keeps an append-only transcript of the session, and drives a
//! Gemini-backed Handler through the turn cycle. The TUI in the `handler`
//! crate is one consumer; the [`testing`] harness is another.
//!
//! ```no_run
//! use handler_core::setup::{AgentFiles, CampaignFiles};
//! use handler_core::session::HandlerSession;
//! use handler_core::handler::Handler;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let campaign = CampaignFiles::new()
//!     .rulebook("rules/agents-handbook.txt")
//!     .agent(AgentFiles::new("agents/reyes.txt"))
//!     .load()
//!     .await?;
//!
//! let mut session = HandlerSession::new(campaign, Handler::from_env()?);
//! session.open().await?;
//! # Ok(())
//! # }
//! ```

pub mod briefing;
pub mod handler;
pub mod roster;
pub mod session;
pub mod setup;
pub mod testing;
pub mod transcript;

pub use briefing::BriefingContext;
pub use handler::{Handler, HandlerConfig, HandlerError, HandlerResponse};
pub use roster::{Agent, Portrait};
pub use session::{HandlerSession, Phase, SessionError, SessionState, TurnOutcome};
pub use setup::{AgentFiles, Campaign, CampaignFiles, CampaignMode, SetupError};
pub use transcript::{InputKind, PlayerInput, Transcript, Turn};
