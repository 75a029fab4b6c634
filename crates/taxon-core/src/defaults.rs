//! Centralized default constants for the taxon system.
//!
//! **This module is the single source of truth** for all shared default values.
//! All crates and the HTTP server should reference these constants instead of
//! defining their own magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// GENERATION
// =============================================================================

/// Default Gemini API base URL.
pub const GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generation model.
pub const GEN_MODEL: &str = "gemini-2.5-flash";

/// Timeout for generation requests (seconds).
pub const GEN_TIMEOUT_SECS: u64 = 120;

/// Sampling temperature for classification requests. Low, since code lookup
/// rewards determinism over variety.
pub const GEN_TEMPERATURE: f64 = 0.2;

/// Number of candidate codes the prompt asks for. Prompt text only: the
/// response contract accepts any array length, including empty.
pub const TOP_CANDIDATES: usize = 5;

/// Threshold above which a generation call is logged as slow (milliseconds).
pub const SLOW_GEN_WARN_MS: u64 = 30_000;

// =============================================================================
// HISTORY
// =============================================================================

/// Maximum entries retained in the history log (the newest plus 15 prior).
pub const HISTORY_CAP: usize = 16;

/// File name of the durable history slot inside the data directory.
pub const HISTORY_FILE: &str = "history.json";

/// Application data directory name.
pub const DATA_DIR_NAME: &str = "taxon";

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Maximum accepted request body size in bytes (bulk CSV uploads).
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;
