//! Core data models for taxon.
//!
//! These types are shared across all taxon crates and represent
//! the core domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// CATEGORY TYPES
// =============================================================================

/// Caller-selected scope for a classification query.
///
/// This is the input-side enum: `AutoDetect` asks the model to decide whether
/// the description is a good or a service before classifying it. Output
/// categories always resolve to a concrete [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryHint {
    Goods,
    Services,
    #[serde(rename = "Auto Detect")]
    AutoDetect,
}

impl CategoryHint {
    /// Label embedded verbatim in the classification prompt.
    pub fn label(&self) -> &'static str {
        match self {
            CategoryHint::Goods => "Goods",
            CategoryHint::Services => "Services",
            CategoryHint::AutoDetect => "Auto Detect",
        }
    }
}

impl Default for CategoryHint {
    fn default() -> Self {
        CategoryHint::AutoDetect
    }
}

/// Concrete category of a classification candidate.
///
/// Narrower than [`CategoryHint`]: every result commits to one of the two.
/// Any other value in a remote payload fails element validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Goods,
    Service,
}

impl Category {
    /// Display label, identical to the wire value.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Goods => "Goods",
            Category::Service => "Service",
        }
    }
}

// =============================================================================
// CLASSIFICATION TYPES
// =============================================================================

/// One candidate HSN/SAC code returned by the model.
///
/// Field values beyond shape are trusted from model output: `code` is not
/// validated against a code registry and `gst_rate` may fall outside 0-100
/// (logged as anomalous, never rejected).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// The HSN (goods) or SAC (services) code token.
    pub code: String,
    /// Official textual description of the code.
    pub description: String,
    pub category: Category,
    /// Applicable GST rate in percent, e.g. 18 for 18%.
    pub gst_rate: f64,
    /// Free-text justification for the match.
    pub reason: String,
}

// =============================================================================
// HISTORY TYPES
// =============================================================================

/// One past single-query classification, as kept in the history log.
///
/// Created exactly once after a successful single-query classification and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: Uuid,
    /// Capture time, assigned at creation.
    pub timestamp: DateTime<Utc>,
    /// The original description text.
    pub query: String,
    /// The category hint used for that query.
    pub category: CategoryHint,
}

impl HistoryItem {
    /// Create a new history item stamped with the current time.
    pub fn new(query: impl Into<String>, category: CategoryHint) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            query: query.into(),
            category,
        }
    }
}

// =============================================================================
// BATCH TYPES
// =============================================================================

/// Outcome of one row of a bulk classification batch.
///
/// Exactly one of `classifications`/`error` is populated: never both,
/// never neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRow {
    /// Source text for this row.
    pub input_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifications: Option<Vec<ClassificationResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BulkRow {
    /// Build a succeeded row.
    pub fn success(input_description: impl Into<String>, results: Vec<ClassificationResult>) -> Self {
        Self {
            input_description: input_description.into(),
            classifications: Some(results),
            error: None,
        }
    }

    /// Build a failed row carrying the failure message.
    pub fn failure(input_description: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            input_description: input_description.into(),
            classifications: None,
            error: Some(error.into()),
        }
    }
}
