//! Mock drafting service for tests and for running without an API key.
//!
//! Queued responses are raw model text, so fence stripping and JSON parsing
//! run exactly as they do for a real provider.
//!
//! # Example
//!
//! ```ignore
//! let drafting = MockDraftingService::new()
//!     .with_response(r#"{"title":"APPROVING THE BUDGET"}"#)
//!     .with_delay(Duration::from_millis(100));
//!
//! let suggestion = drafting.generate(request).await?;
//! assert_eq!(suggestion.title.as_deref(), Some("APPROVING THE BUDGET"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{parse_suggestion, DraftRequest, DraftSuggestion, DraftingError, DraftingService};

/// Text returned when the queue is empty.
const DEFAULT_RESPONSE: &str = r#"{
  "title": "APPROVING THE REQUEST",
  "resolutionNumber": "___",
  "whereasClauses": ["WHEREAS, the Board has received the request"],
  "resolvedClauses": ["RESOLVED, to approve the request"],
  "description": "A resolution approving the request."
}"#;

/// Mock drafting service.
#[derive(Debug, Clone, Default)]
pub struct MockDraftingService {
    responses: Arc<Mutex<VecDeque<Result<String, DraftingError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<DraftRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockDraftingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue raw model output.
    pub fn with_response(self, raw: impl Into<String>) -> Self {
        lock(&self.responses).push_back(Ok(raw.into()));
        self
    }

    /// Queue an error.
    pub fn with_error(self, error: DraftingError) -> Self {
        lock(&self.responses).push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn get_calls(&self) -> Vec<DraftRequest> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl DraftingService for MockDraftingService {
    async fn generate(&self, request: DraftRequest) -> Result<DraftSuggestion, DraftingError> {
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = lock(&self.responses).pop_front();
        match next {
            Some(Ok(raw)) => parse_suggestion(&raw),
            Some(Err(err)) => Err(err),
            None => parse_suggestion(DEFAULT_RESPONSE),
        }
    }
}
