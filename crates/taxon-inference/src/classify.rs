//! Classification adapter: one query in, a validated candidate sequence out.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value as JsonValue;
use tracing::{debug, instrument, warn};

use taxon_core::{CategoryHint, ClassificationResult, Error, GenerationBackend, Result};

use crate::prompt::classification_prompt;
use crate::schema::classification_schema;

/// Stateless request/response adapter around the generation backend.
///
/// Builds the prompt, submits it with the response schema, and parses and
/// validates the returned candidate array. One outbound call per invocation;
/// no retries, no caching, no deduplication.
///
/// Blank-input policy: callers reject blank single-query input before calling;
/// the adapter itself sends whatever description it is given, including an
/// empty string (the remote service may reject it or return an empty array).
#[derive(Clone)]
pub struct ClassificationAdapter {
    backend: Arc<dyn GenerationBackend>,
}

impl ClassificationAdapter {
    /// Create an adapter over the given backend.
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// The backend serving this adapter.
    pub fn backend(&self) -> &Arc<dyn GenerationBackend> {
        &self.backend
    }

    /// Classify one description under the given category hint.
    ///
    /// Returns the full candidate sequence in model order. The prompt asks for
    /// five candidates but any array length, including empty, is accepted.
    #[instrument(skip(self, description), fields(subsystem = "inference", component = "adapter", op = "classify", category_hint = hint.label(), model = %self.backend.model_name()))]
    pub async fn classify(
        &self,
        description: &str,
        hint: CategoryHint,
    ) -> Result<Vec<ClassificationResult>> {
        let start = Instant::now();

        let prompt = classification_prompt(description, hint);
        let schema = classification_schema();
        let raw = self.backend.generate_structured(&prompt, &schema).await?;
        let results = parse_results(&raw)?;

        debug!(
            result_count = results.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Classification complete"
        );
        Ok(results)
    }
}

/// Parse and validate a raw response payload into the result sequence.
///
/// Validation is strict: the payload must be JSON, must be an array, and every
/// element must decode with all five fields present and a known category.
/// `gstRate` values outside 0-100 pass through with a warning; downstream
/// consumers must tolerate them.
fn parse_results(raw: &str) -> Result<Vec<ClassificationResult>> {
    let value: JsonValue = serde_json::from_str(raw.trim())
        .map_err(|_| Error::Format("invalid response format".to_string()))?;

    let items = value
        .as_array()
        .ok_or_else(|| Error::Format("API did not return a valid array".to_string()))?;

    let mut results = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let result: ClassificationResult = serde_json::from_value(item.clone()).map_err(|e| {
            Error::Format(format!("element {} is not a valid classification: {}", idx, e))
        })?;

        if !(0.0..=100.0).contains(&result.gst_rate) {
            warn!(
                code = %result.code,
                gst_rate = result.gst_rate,
                "GST rate outside the expected 0-100 range"
            );
        }
        results.push(result);
    }

    Ok(results)
}
