//! Minimal Google Gemini API client.
//!
//! This crate provides a focused client for the `generateContent` endpoint
//! with:
//! - Plain text generation
//! - Structured JSON output via response schemas
//! - Token usage reporting

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Errors that can occur when using the Gemini client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("API key not configured")]
    NoApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Gemini API client.
#[derive(Clone)]
pub struct Gemini {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl Gemini {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .connect_timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create a Gemini client from the GEMINI_API_KEY environment variable.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| Error::NoApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Set the default model for this client.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Send a generation request and return the full response.
    pub async fn generate(&self, request: Request) -> Result<Response, Error> {
        let model = request.model.clone().unwrap_or_else(|| self.model.clone());
        let api_request = build_api_request(&request);
        let headers = self.build_headers()?;

        let response = self
            .client
            .post(format!("{API_BASE}/models/{model}:generateContent"))
            .headers(headers)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        Ok(parse_response(api_response))
    }

    fn build_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| Error::Config(format!("Invalid API key: {e}")))?,
        );
        Ok(headers)
    }
}

// ============================================================================
// Public types
// ============================================================================

/// A generation request to send to Gemini.
#[derive(Debug, Clone)]
pub struct Request {
    pub model: Option<String>,
    pub contents: Vec<Content>,
    pub config: GenerationConfig,
}

impl Request {
    /// Create a new request with the given conversation contents.
    pub fn new(contents: Vec<Content>) -> Self {
        Self {
            model: None,
            contents,
            config: GenerationConfig::default(),
        }
    }

    /// Create a single-turn request from one block of user text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(vec![Content::user(text)])
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.config.top_p = Some(top_p);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: usize) -> Self {
        self.config.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Request structured JSON output conforming to the given schema.
    pub fn with_response_schema(mut self, schema: Schema) -> Self {
        self.config.response_mime_type = Some("application/json".to_string());
        self.config.response_schema = Some(schema);
        self
    }
}

/// Sampling and output configuration for a request.
#[derive(Debug, Clone, Default)]
pub struct GenerationConfig {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_output_tokens: Option<usize>,
    pub response_mime_type: Option<String>,
    pub response_schema: Option<Schema>,
}

/// One turn of conversation content.
#[derive(Debug, Clone)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    /// Create user content from text.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::Text { text: text.into() }],
        }
    }

    /// Create model content from text.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part::Text { text: text.into() }],
        }
    }
}

/// The role of a content author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

/// A block of content within a turn.
#[derive(Debug, Clone)]
pub enum Part {
    Text { text: String },
}

impl Part {
    /// Extract text from a Text part.
    pub fn as_text(&self) -> Option<&str> {
        let Part::Text { text } = self;
        Some(text)
    }
}

/// A declarative output schema, serialized in the format the
/// `responseSchema` generation config expects (uppercase type names).
#[derive(Debug, Clone)]
pub struct Schema {
    pub schema_type: SchemaType,
    pub description: Option<String>,
    pub properties: Option<Vec<(String, Schema)>>,
    pub items: Option<Box<Schema>>,
    pub required: Option<Vec<String>>,
}

impl Schema {
    fn leaf(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            properties: None,
            items: None,
            required: None,
        }
    }

    /// A string-valued schema node.
    pub fn string() -> Self {
        Self::leaf(SchemaType::String)
    }

    /// A boolean-valued schema node.
    pub fn boolean() -> Self {
        Self::leaf(SchemaType::Boolean)
    }

    /// An array of the given item schema.
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::leaf(SchemaType::Array)
        }
    }

    /// An object with the given named properties, all of them required.
    pub fn object(properties: Vec<(String, Schema)>) -> Self {
        let required = properties.iter().map(|(name, _)| name.clone()).collect();
        Self {
            properties: Some(properties),
            required: Some(required),
            ..Self::leaf(SchemaType::Object)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Schema node types understood by the structured-output config.
#[derive(Debug, Clone, Copy, Serialize)]
pub enum SchemaType {
    #[serde(rename = "STRING")]
    String,
    #[serde(rename = "BOOLEAN")]
    Boolean,
    #[serde(rename = "ARRAY")]
    Array,
    #[serde(rename = "OBJECT")]
    Object,
}

/// A generation response from Gemini.
#[derive(Debug, Clone)]
pub struct Response {
    pub content: Vec<Part>,
    pub finish_reason: FinishReason,
    pub usage: Usage,
}

impl Response {
    /// Get all text content concatenated.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| part.as_text())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Other,
}

/// Token usage information.
#[derive(Debug, Clone, Default)]
pub struct Usage {
    pub input_tokens: usize,
    pub output_tokens: usize,
}

// ============================================================================
// Internal API types
// ============================================================================

fn build_api_request(request: &Request) -> ApiRequest {
    let contents = request
        .contents
        .iter()
        .map(|c| ApiContent {
            role: match c.role {
                Role::User => "user".to_string(),
                Role::Model => "model".to_string(),
            },
            parts: c
                .parts
                .iter()
                .map(|p| {
                    let Part::Text { text } = p;
                    ApiPart { text: text.clone() }
                })
                .collect(),
        })
        .collect();

    let config = &request.config;
    let generation_config = ApiGenerationConfig {
        temperature: config.temperature,
        top_p: config.top_p,
        max_output_tokens: config.max_output_tokens,
        response_mime_type: config.response_mime_type.clone(),
        response_schema: config.response_schema.as_ref().map(serialize_schema),
    };

    ApiRequest {
        contents,
        generation_config,
    }
}

/// Serialize a Schema into the JSON object shape the API expects.
///
/// Properties are declared as a Vec of pairs to keep a stable order, but
/// the wire format wants a JSON object, so this builds one by hand.
pub fn serialize_schema(schema: &Schema) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    map.insert(
        "type".to_string(),
        serde_json::to_value(schema.schema_type).unwrap_or_default(),
    );
    if let Some(ref description) = schema.description {
        map.insert("description".to_string(), description.clone().into());
    }
    if let Some(ref properties) = schema.properties {
        let props: serde_json::Map<String, serde_json::Value> = properties
            .iter()
            .map(|(name, s)| (name.clone(), serialize_schema(s)))
            .collect();
        map.insert("properties".to_string(), props.into());
    }
    if let Some(ref items) = schema.items {
        map.insert("items".to_string(), serialize_schema(items));
    }
    if let Some(ref required) = schema.required {
        map.insert(
            "required".to_string(),
            required
                .iter()
                .map(|r| serde_json::Value::from(r.clone()))
                .collect::<Vec<_>>()
                .into(),
        );
    }
    serde_json::Value::Object(map)
}

fn parse_response(api_response: ApiResponse) -> Response {
    let candidate = api_response.candidates.into_iter().next();

    let (content, finish_reason) = match candidate {
        Some(c) => {
            let parts = c
                .content
                .map(|content| {
                    content
                        .parts
                        .into_iter()
                        .map(|p| Part::Text { text: p.text })
                        .collect()
                })
                .unwrap_or_default();
            let finish = match c.finish_reason.as_deref() {
                Some("STOP") => FinishReason::Stop,
                Some("MAX_TOKENS") => FinishReason::MaxTokens,
                Some("SAFETY") => FinishReason::Safety,
                _ => FinishReason::Other,
            };
            (parts, finish)
        }
        None => (Vec::new(), FinishReason::Other),
    };

    let usage = api_response
        .usage_metadata
        .map(|u| Usage {
            input_tokens: u.prompt_token_count,
            output_tokens: u.candidates_token_count,
        })
        .unwrap_or_default();

    Response {
        content,
        finish_reason,
        usage,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest {
    contents: Vec<ApiContent>,
    generation_config: ApiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct ApiContent {
    role: String,
    parts: Vec<ApiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<ApiCandidate>,
    usage_metadata: Option<ApiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCandidate {
    content: Option<ApiCandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiCandidateContent {
    #[serde(default)]
    parts: Vec<ApiPart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiUsageMetadata {
    #[serde(default)]
    prompt_token_count: usize,
    #[serde(default)]
    candidates_token_count: usize,
}
