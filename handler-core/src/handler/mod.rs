//! The Handler: prompt construction, the structured response contract, and
//! the agent that speaks to the Gemini API.

mod agent;
pub mod prompt;
mod response;

pub use agent::{Handler, HandlerConfig, HandlerError};
pub use response::HandlerResponse;
