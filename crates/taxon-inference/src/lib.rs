//! # taxon-inference
//!
//! Gemini generation backend and classification adapter for taxon.
//!
//! This crate provides:
//! - [`GeminiBackend`]: reqwest client for the Gemini `generateContent` API
//!   with schema-constrained JSON output
//! - [`ClassificationAdapter`]: prompt construction, backend invocation, and
//!   strict parsing/validation of the returned candidate array
//! - The classification prompt and response schema
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taxon_core::CategoryHint;
//! use taxon_inference::{ClassificationAdapter, GeminiBackend};
//!
//! #[tokio::main]
//! async fn main() -> taxon_core::Result<()> {
//!     let backend = GeminiBackend::from_env()?;
//!     let adapter = ClassificationAdapter::new(Arc::new(backend));
//!     let results = adapter
//!         .classify("Frozen french fries", CategoryHint::AutoDetect)
//!         .await?;
//!     println!("{} candidates", results.len());
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod gemini;
pub mod prompt;
pub mod schema;

// Mock generation backend for testing
#[cfg(test)]
pub mod mock;

// Re-export core types
pub use taxon_core::*;

pub use classify::ClassificationAdapter;
pub use gemini::{GeminiBackend, GeminiConfig};
pub use prompt::classification_prompt;
pub use schema::classification_schema;
