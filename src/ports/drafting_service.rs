//! Drafting Service Port - AI-assisted resolution drafting.
//!
//! A `DraftRequest` carries the user's plain-language request plus optional
//! district context. Implementations return a `DraftSuggestion` that the
//! editing session merges into the current draft.
//!
//! Inputs are sanitized on construction: the prompt is cut to
//! `MAX_PROMPT_CHARS`, the context to `MAX_CONTEXT_CHARS`, angle brackets are
//! removed, and whitespace is trimmed.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

/// Longest prompt forwarded to a model.
pub const MAX_PROMPT_CHARS: usize = 1000;

/// Longest context forwarded to a model.
pub const MAX_CONTEXT_CHARS: usize = 500;

/// Port for generating draft resolutions from a prompt.
#[async_trait]
pub trait DraftingService: Send + Sync {
    async fn generate(&self, request: DraftRequest) -> Result<DraftSuggestion, DraftingError>;
}

/// A sanitized drafting request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRequest {
    prompt: String,
    context: Option<String>,
}

impl DraftRequest {
    /// Sanitizes the inputs.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` when nothing is left of the prompt after sanitizing.
    pub fn new(prompt: &str, context: Option<&str>) -> Result<Self, DraftingError> {
        let prompt = sanitize(prompt, MAX_PROMPT_CHARS);
        if prompt.is_empty() {
            return Err(DraftingError::invalid_request("Prompt is required"));
        }
        let context = context
            .map(|c| sanitize(c, MAX_CONTEXT_CHARS))
            .filter(|c| !c.is_empty());
        Ok(Self { prompt, context })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

fn sanitize(input: &str, max_chars: usize) -> String {
    input
        .chars()
        .take(max_chars)
        .filter(|c| *c != '<' && *c != '>')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Fields a model proposes for a draft.
///
/// Every field is optional so a partial answer still merges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftSuggestion {
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub resolution_number: Option<String>,
    #[serde(deserialize_with = "lenient_year")]
    pub series_year: Option<i32>,
    pub whereas_clauses: Vec<String>,
    pub resolved_clauses: Vec<String>,
    pub description: Option<String>,
}

/// Models sometimes answer `"resolutionNumber": 12`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts `2025` or `"2025"`; anything else becomes `None`.
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Removes markdown code fences a model may wrap around its JSON.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parses model output into a suggestion.
///
/// # Errors
///
/// `MalformedResponse` when the text is not a JSON object of the expected shape.
pub fn parse_suggestion(raw: &str) -> Result<DraftSuggestion, DraftingError> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned).map_err(|e| DraftingError::MalformedResponse(e.to_string()))
}

/// Drafting errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftingError {
    /// No API key configured.
    #[error("drafting is not configured")]
    NotConfigured,

    /// Rejected before calling the model.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// API key rejected by the provider.
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited by provider")]
    RateLimited,

    /// Provider returned a server error.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The provider answered without any text.
    #[error("no content generated")]
    EmptyResponse,

    /// Text came back but was not valid suggestion JSON.
    #[error("AI generated invalid JSON: {0}")]
    MalformedResponse(String),
}

impl DraftingError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Returns true if the same request may succeed when sent again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DraftingError::RateLimited
                | DraftingError::Unavailable(_)
                | DraftingError::Network(_)
                | DraftingError::Timeout { .. }
        )
    }

    /// Message that is safe to show to end users.
    pub fn user_message(&self) -> &'static str {
        match self {
            DraftingError::InvalidRequest(_) => "Prompt is required",
            DraftingError::MalformedResponse(_) => "AI generated invalid JSON. Please try again.",
            DraftingError::RateLimited => "The drafting service is busy. Please try again.",
            DraftingError::NotConfigured => "AI drafting is not available.",
            _ => "Failed to generate resolution.",
        }
    }
}
