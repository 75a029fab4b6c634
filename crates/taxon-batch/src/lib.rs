//! # taxon-batch
//!
//! Bulk classification over tabular input.
//!
//! This crate provides:
//! - [`BatchInput`]: delimited-text parsing with the `description`/`Description`
//!   column convention
//! - [`BatchRunner`]: strictly sequential per-row classification with
//!   synchronous fractional progress reporting and per-row error isolation
//! - The downloadable CSV template offered to users preparing input

pub mod input;
pub mod runner;

// Re-export core types
pub use taxon_core::*;

pub use input::{BatchInput, BatchRecord, TEMPLATE_CSV};
pub use runner::{BatchRunner, ProgressCallback};
