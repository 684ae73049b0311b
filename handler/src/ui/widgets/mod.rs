//! TUI widgets for the Handler game

pub mod choices;
pub mod input;
pub mod roster;
pub mod status_bar;
pub mod transcript;

pub use choices::ChoicesWidget;
pub use input::{InputTag, InputWidget};
pub use roster::RosterWidget;
pub use status_bar::StatusBarWidget;
pub use transcript::TranscriptWidget;
