//! Gemini Drafting - `DraftingService` backed by Google's Gemini API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.5-flash")
//!     .with_max_retries(2);
//!
//! let drafting = GeminiDraftingService::new(config)?;
//! ```
//!
//! The model is asked for a bare JSON object. Code fences are stripped before
//! parsing; anything that still fails to parse is a `MalformedResponse`.
//! Raw model output is only logged at `debug` level.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, warn};

use crate::ports::{parse_suggestion, DraftRequest, DraftSuggestion, DraftingError, DraftingService};

/// Configuration for the Gemini drafting client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Base URL for the API (default: https://generativelanguage.googleapis.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 2,
        }
    }

    pub fn from_secret(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            ..Self::new(String::new())
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Instructions prepended to every drafting prompt.
pub const SYSTEM_INSTRUCTION: &str = r#"You are an expert legal assistant for a Philippine Water District.
Your task is to generate a Board Resolution based on the user's request.

Adhere strictly to this structure:
1. Title: Uppercase, concise, starting with "APPROVING...", "AUTHORIZING...", etc.
2. WHEREAS clauses: Context and justification. Start each with "WHEREAS,".
3. RESOLVED clauses: The action taken. Start with "RESOLVED," or "RESOLVED FURTHER,".

Output strictly valid JSON (and NOTHING else) in this format:
{
  "title": "STRING",
  "resolutionNumber": "STRING (suggest a placeholder if unknown)",
  "seriesYear": NUMBER (current year),
  "whereasClauses": ["STRING", "STRING"],
  "resolvedClauses": ["STRING", "STRING"],
  "description": "STRING (A brief, one-sentence summary of what this resolution is about.)"
}

Do not include markdown formatting like ```json. Just the raw JSON object."#;

/// Full prompt text sent to the model.
pub fn build_prompt(request: &DraftRequest) -> String {
    format!(
        "{}\n\nTask: {}\nContext: {}",
        SYSTEM_INSTRUCTION,
        request.prompt(),
        request.context().unwrap_or("None")
    )
}

/// Drafting service calling Gemini's `generateContent` endpoint.
pub struct GeminiDraftingService {
    config: GeminiConfig,
    client: Client,
}

impl GeminiDraftingService {
    /// # Errors
    ///
    /// `NotConfigured` when the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, DraftingError> {
        let client = Client::builder().timeout(config.timeout).build().map_err(|e| {
            error!(error = %e, "Failed to build Gemini HTTP client");
            DraftingError::NotConfigured
        })?;
        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn send_request(&self, prompt: &str) -> Result<Response, DraftingError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        self.client
            .post(self.generate_url())
            .query(&[("key", self.config.api_key())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                // The request URL carries the API key.
                let e = e.without_url();
                if e.is_timeout() {
                    DraftingError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    DraftingError::network(format!("Connection failed: {}", e))
                } else {
                    DraftingError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, DraftingError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        error!(status = status.as_u16(), body = %error_body, "Gemini API error");

        match status.as_u16() {
            401 | 403 => Err(DraftingError::AuthenticationFailed),
            429 => Err(DraftingError::RateLimited),
            400 => Err(DraftingError::invalid_request(format!(
                "Gemini API request failed ({})",
                status.as_u16()
            ))),
            500..=599 => Err(DraftingError::unavailable(format!(
                "Server error {}",
                status.as_u16()
            ))),
            _ => Err(DraftingError::network(format!(
                "Unexpected status {}",
                status.as_u16()
            ))),
        }
    }

    async fn parse_response(&self, response: Response) -> Result<DraftSuggestion, DraftingError> {
        let response = self.handle_response_status(response).await?;
        let gemini: GeminiResponse = response
            .json()
            .await
            .map_err(|e| DraftingError::MalformedResponse(format!("Failed to parse response: {}", e)))?;

        let text = gemini.first_text().ok_or(DraftingError::EmptyResponse)?;
        debug!(raw = %text, "Gemini raw response");

        parse_suggestion(&text).map_err(|err| {
            error!("Failed to parse JSON from AI response");
            err
        })
    }
}

#[async_trait]
impl DraftingService for GeminiDraftingService {
    async fn generate(&self, request: DraftRequest) -> Result<DraftSuggestion, DraftingError> {
        if self.config.api_key().trim().is_empty() {
            return Err(DraftingError::NotConfigured);
        }
        let prompt = build_prompt(&request);
        let mut last_error = DraftingError::network("No attempts made");
        let mut retry_count = 0;

        while retry_count <= self.config.max_retries {
            let attempt = match self.send_request(&prompt).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };
            match attempt {
                Ok(suggestion) => return Ok(suggestion),
                Err(err) => {
                    if !err.is_retryable() || retry_count >= self.config.max_retries {
                        return Err(err);
                    }
                    warn!(error = %err, attempt = retry_count + 1, "Retrying drafting request");
                    last_error = err;
                }
            }

            // Exponential backoff: 1s, 2s, 4s, ...
            sleep(Duration::from_secs(1 << retry_count)).await;
            retry_count += 1;
        }

        Err(last_error)
    }
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiContent,
}

impl GeminiResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.trim().is_empty())
    }
}
