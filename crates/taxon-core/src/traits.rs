//! Core traits for taxon abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::models::HistoryItem;

// =============================================================================
// GENERATION BACKEND
// =============================================================================

/// A structured-output-capable text generation capability.
///
/// The sole network boundary of the system: given a prompt and a schema
/// describing the expected response shape, return the raw text payload
/// (expected to be JSON matching the schema) or fail. Implementations make
/// exactly one outbound call per invocation; no retries, no caching.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate a response constrained to `schema`.
    ///
    /// Returns the raw response text; the caller is responsible for parsing
    /// and validating it.
    async fn generate_structured(&self, prompt: &str, schema: &JsonValue) -> Result<String>;

    /// Name of the model serving generation requests.
    fn model_name(&self) -> &str;

    /// Probe whether the remote service is reachable.
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}

// =============================================================================
// HISTORY STORE
// =============================================================================

/// Durable, bounded, most-recent-first log of past single-query searches.
///
/// The storage contract supports wholesale replacement so that clearing the
/// log is trivial. The read-prepend-write update is not atomic across
/// concurrent writers; acceptable for the expected single-user usage.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Prepend `item`, truncate to the retention cap, persist immediately.
    async fn record(&self, item: HistoryItem) -> Result<()>;

    /// Current stored sequence, most-recent first.
    async fn read(&self) -> Result<Vec<HistoryItem>>;

    /// Reset the log to an empty sequence.
    async fn clear(&self) -> Result<()>;
}
