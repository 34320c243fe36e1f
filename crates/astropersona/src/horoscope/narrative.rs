//! Narrative text generation collaborator.
//!
//! - `NarrativeGenerator`: async trait implemented by LLM clients
//! - `MockNarrator`: deterministic narrator for tests and offline runs
//! - `TimeoutNarrator`: bounds the time any narrator may take

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while generating narrative text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NarrativeError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the model
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Narrative generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Narrative error: {0}")]
    Other(String),
}

/// Turns a prompt into free-form text
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, NarrativeError>;
}

#[async_trait]
impl<'a, N: NarrativeGenerator + ?Sized> NarrativeGenerator for &'a N {
    async fn generate_text(&self, prompt: &str) -> Result<String, NarrativeError> {
        (**self).generate_text(prompt).await
    }
}

#[async_trait]
impl<N: NarrativeGenerator + ?Sized> NarrativeGenerator for Arc<N> {
    async fn generate_text(&self, prompt: &str) -> Result<String, NarrativeError> {
        (**self).generate_text(prompt).await
    }
}

#[async_trait]
impl<N: NarrativeGenerator + ?Sized> NarrativeGenerator for Box<N> {
    async fn generate_text(&self, prompt: &str) -> Result<String, NarrativeError> {
        (**self).generate_text(prompt).await
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Mock narrator returning pre-configured text without network calls.
///
/// Clones share responses, call count and recorded prompts.
#[derive(Debug, Clone)]
pub struct MockNarrator {
    default_response: Result<String, NarrativeError>,
    responses: Arc<Mutex<HashMap<String, Result<String, NarrativeError>>>>,
    call_count: Arc<Mutex<usize>>,
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl MockNarrator {
    /// Create a narrator with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(Ok(response.into()))
    }

    /// Create a narrator that fails every prompt with `error`
    pub fn failing(error: NarrativeError) -> Self {
        Self::with_default(Err(error))
    }

    fn with_default(default_response: Result<String, NarrativeError>) -> Self {
        Self {
            default_response,
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), Ok(response.into()));
    }

    /// Fail a specific prompt
    pub fn add_error(&self, prompt: impl Into<String>, error: NarrativeError) {
        lock(&self.responses).insert(prompt.into(), Err(error));
    }

    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.last_prompt).clone()
    }
}

impl Default for MockNarrator {
    fn default() -> Self {
        Self::new("Default mock narrative")
    }
}

#[async_trait]
impl NarrativeGenerator for MockNarrator {
    async fn generate_text(&self, prompt: &str) -> Result<String, NarrativeError> {
        *lock(&self.call_count) += 1;
        *lock(&self.last_prompt) = Some(prompt.to_string());

        let responses = lock(&self.responses);
        match responses.get(prompt) {
            Some(response) => response.clone(),
            None => self.default_response.clone(),
        }
    }
}

/// Fails the wrapped narrator's call once `limit` elapses
#[derive(Debug, Clone)]
pub struct TimeoutNarrator<N> {
    inner: N,
    limit: Duration,
}

impl<N: NarrativeGenerator> TimeoutNarrator<N> {
    pub fn new(inner: N, limit: Duration) -> Self {
        Self { inner, limit }
    }

    pub fn inner(&self) -> &N {
        &self.inner
    }
}

#[async_trait]
impl<N: NarrativeGenerator> NarrativeGenerator for TimeoutNarrator<N> {
    async fn generate_text(&self, prompt: &str) -> Result<String, NarrativeError> {
        match tokio::time::timeout(self.limit, self.inner.generate_text(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(NarrativeError::Timeout(self.limit)),
        }
    }
}
