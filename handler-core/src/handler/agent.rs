//! The Handler agent: wraps a Gemini client with the prompt discipline and
//! response contract the game expects.

use thiserror::Error;

use crate::briefing::BriefingContext;
use crate::transcript::Transcript;

use super::prompt;
use super::response::HandlerResponse;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("GEMINI_API_KEY environment variable not set")]
    NoApiKey,
    #[error("API request failed: {0}")]
    Api(#[from] gemini::Error),
    #[error("the model returned an empty reply")]
    EmptyReply,
    #[error("the model reply was not a valid handler response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Generation parameters for the Handler. Turn requests run hotter than
/// summary requests.
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub summary_temperature: f32,
    pub max_output_tokens: Option<usize>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.8,
            top_p: 0.95,
            summary_temperature: 0.5,
            max_output_tokens: None,
        }
    }
}

/// The narrating agent. Owns the API client; holds no session state.
pub struct Handler {
    client: gemini::Gemini,
    config: HandlerConfig,
}

impl Handler {
    pub fn new(client: gemini::Gemini) -> Self {
        Self {
            client,
            config: HandlerConfig::default(),
        }
    }

    /// Build a Handler from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, HandlerError> {
        let client = gemini::Gemini::from_env().map_err(|_| HandlerError::NoApiKey)?;
        Ok(Self::new(client))
    }

    pub fn with_config(mut self, config: HandlerConfig) -> Self {
        self.config = config;
        self
    }

    /// One narrative turn: full context plus full transcript in, a parsed
    /// structured response out.
    pub async fn respond(
        &self,
        context: &BriefingContext,
        transcript: &Transcript,
    ) -> Result<HandlerResponse, HandlerError> {
        let text = prompt::format_prompt(context, transcript);
        let mut request = gemini::Request::from_text(text)
            .with_model(self.config.model.clone())
            .with_temperature(self.config.temperature)
            .with_top_p(self.config.top_p)
            .with_response_schema(HandlerResponse::schema());
        if let Some(max) = self.config.max_output_tokens {
            request = request.with_max_output_tokens(max);
        }

        let response = self.client.generate(request).await?;
        let raw = response.text();
        if raw.trim().is_empty() {
            return Err(HandlerError::EmptyReply);
        }
        Ok(HandlerResponse::parse(&raw)?)
    }

    /// Summarize the session log into plain prose for a future session's
    /// journal. No response schema; the reply is free text.
    pub async fn summarize(
        &self,
        context: &BriefingContext,
        transcript: &Transcript,
    ) -> Result<String, HandlerError> {
        let text = prompt::format_summary_prompt(context, transcript);
        let request = gemini::Request::from_text(text)
            .with_model(self.config.model.clone())
            .with_temperature(self.config.summary_temperature);

        let response = self.client.generate(request).await?;
        let raw = response.text();
        if raw.trim().is_empty() {
            return Err(HandlerError::EmptyReply);
        }
        Ok(raw)
    }
}
