//! Mock generation backend for deterministic testing.
//!
//! Returns a canned payload (or a canned failure) for every request and logs
//! the prompts it receives so tests can assert on what was sent.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use taxon_core::{Error, GenerationBackend, Result};

enum MockReply {
    Text(String),
    Fail(String),
}

/// Scripted backend: every call yields the configured reply.
pub struct MockBackend {
    reply: MockReply,
    prompts: Mutex<Vec<String>>,
}

impl MockBackend {
    /// Respond to every request with `payload`.
    pub fn with_response(payload: impl Into<String>) -> Self {
        Self {
            reply: MockReply::Text(payload.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fail every request with a classification error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: MockReply::Fail(message.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of generation calls made.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn generate_structured(&self, prompt: &str, _schema: &JsonValue) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            MockReply::Text(payload) => Ok(payload.clone()),
            MockReply::Fail(message) => Err(Error::Classification(message.clone())),
        }
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
