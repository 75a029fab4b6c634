//! # taxon-core
//!
//! Core types, traits, and abstractions for the taxon classification service.
//!
//! This crate provides the foundational data structures and trait definitions
//! that other taxon crates depend on:
//! - The workspace error type and `Result` alias
//! - Domain models (classification queries, results, history, batch rows)
//! - Centralized default constants
//! - Structured logging field schema
//! - Backend and store traits for pluggable implementations

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{BulkRow, Category, CategoryHint, ClassificationResult, HistoryItem};
pub use traits::{GenerationBackend, HistoryStore};
