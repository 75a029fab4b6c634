//! Sequential batch runner.
//!
//! Processes batch rows strictly one at a time so at most one remote call is
//! ever in flight, reporting fractional progress after every row. A row's
//! failure is captured in its result and never aborts the batch; only the
//! "no usable rows at all" precondition fails the whole run.

use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use taxon_core::{BulkRow, CategoryHint, Error, Result};
use taxon_inference::ClassificationAdapter;

use crate::input::BatchInput;

/// Callback invoked synchronously after each processed row with the completed
/// percentage, non-decreasing from just above 0 to exactly 100.
pub type ProgressCallback = Box<dyn Fn(f32) + Send + Sync>;

/// Runs a batch of descriptions through the classification adapter.
pub struct BatchRunner {
    adapter: ClassificationAdapter,
    hint: CategoryHint,
}

impl BatchRunner {
    /// Create a runner classifying every row under `AutoDetect`.
    pub fn new(adapter: ClassificationAdapter) -> Self {
        Self {
            adapter,
            hint: CategoryHint::AutoDetect,
        }
    }

    /// Use a fixed category hint for the whole batch.
    pub fn with_hint(mut self, hint: CategoryHint) -> Self {
        self.hint = hint;
        self
    }

    /// Process `input` row by row, in input order.
    ///
    /// Rows without a usable description are filtered out first; if nothing
    /// remains the batch fails before any remote call. The returned sequence
    /// preserves input order unconditionally, with exactly one of
    /// `classifications`/`error` populated per row.
    #[instrument(skip(self, input, on_progress), fields(subsystem = "batch", component = "runner", op = "run", category_hint = self.hint.label()))]
    pub async fn run(
        &self,
        input: &BatchInput,
        on_progress: impl Fn(f32),
    ) -> Result<Vec<BulkRow>> {
        let descriptions: Vec<String> = input
            .records()
            .iter()
            .filter_map(|record| record.description().map(str::to_string))
            .collect();

        if descriptions.is_empty() {
            return Err(Error::InvalidInput(
                "no valid description column found".to_string(),
            ));
        }

        let total = descriptions.len();
        let start = Instant::now();
        info!(row_count = total, "Starting batch run");

        let mut rows = Vec::with_capacity(total);
        for (index, description) in descriptions.iter().enumerate() {
            match self.adapter.classify(description, self.hint).await {
                Ok(results) => {
                    debug!(
                        row = index + 1,
                        result_count = results.len(),
                        "Batch row classified"
                    );
                    rows.push(BulkRow::success(description.clone(), results));
                }
                Err(e) => {
                    warn!(row = index + 1, error = %e, "Batch row failed");
                    rows.push(BulkRow::failure(description.clone(), e.to_string()));
                }
            }
            on_progress(((index + 1) as f32 / total as f32) * 100.0);
        }

        info!(
            row_count = total,
            duration_ms = start.elapsed().as_millis() as u64,
            "Batch run complete"
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::Value as JsonValue;

    use taxon_core::GenerationBackend;

    const OK_PAYLOAD: &str = r#"[{"code":"2106","description":"Food preparations","category":"Goods","gstRate":12,"reason":"Namkeens fall under heading 2106."}]"#;

    /// Backend that fails any row whose description carries the FAIL marker.
    /// The marker travels inside the prompt, which embeds the description.
    struct RowScriptedBackend {
        calls: AtomicUsize,
    }

    impl RowScriptedBackend {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerationBackend for RowScriptedBackend {
        async fn generate_structured(&self, prompt: &str, _schema: &JsonValue) -> taxon_core::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if prompt.contains("FAIL") {
                Err(Error::Classification("simulated remote failure".to_string()))
            } else {
                Ok(OK_PAYLOAD.to_string())
            }
        }

        fn model_name(&self) -> &str {
            "scripted-model"
        }
    }

    fn runner_over(backend: Arc<RowScriptedBackend>) -> BatchRunner {
        BatchRunner::new(ClassificationAdapter::new(backend))
    }

    fn input_of(descriptions: &[&str]) -> BatchInput {
        let mut csv = String::from("description\n");
        for d in descriptions {
            csv.push_str(&format!("\"{}\"\n", d));
        }
        BatchInput::from_bytes(csv.as_bytes()).unwrap()
    }

    #[tokio::test]
    async fn test_failed_rows_are_isolated_and_order_preserved() {
        let backend = Arc::new(RowScriptedBackend::new());
        let runner = runner_over(backend.clone());
        let input = input_of(&[
            "Namkeens",
            "FAIL row two",
            "Carton boxes",
            "Solar cookers",
            "FAIL row five",
        ]);

        let rows = runner.run(&input, |_| {}).await.unwrap();

        assert_eq!(rows.len(), 5);
        assert_eq!(backend.call_count(), 5);
        for (i, row) in rows.iter().enumerate() {
            let failed = i == 1 || i == 4;
            assert_eq!(row.classifications.is_none(), failed, "row {}", i + 1);
            assert_eq!(row.error.is_some(), failed, "row {}", i + 1);
        }
        assert_eq!(rows[0].input_description, "Namkeens");
        assert_eq!(rows[4].input_description, "FAIL row five");
        assert!(rows[1]
            .error
            .as_deref()
            .unwrap()
            .contains("simulated remote failure"));
    }

    #[tokio::test]
    async fn test_progress_is_monotone_and_ends_at_exactly_100() {
        let backend = Arc::new(RowScriptedBackend::new());
        let runner = runner_over(backend);
        let input = input_of(&["one", "two", "FAIL three", "four"]);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in_callback = seen.clone();
        runner
            .run(&input, move |pct| {
                seen_in_callback.lock().unwrap().push(pct);
            })
            .await
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert!(seen[0] > 0.0);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*seen.last().unwrap(), 100.0);
    }

    #[tokio::test]
    async fn test_no_usable_rows_fails_before_any_remote_call() {
        let backend = Arc::new(RowScriptedBackend::new());
        let runner = runner_over(backend.clone());
        let input = BatchInput::from_bytes(b"name,sku\nwidget,A-1\n").unwrap();

        let err = runner.run(&input, |_| {}).await.unwrap_err();
        match err {
            Error::InvalidInput(msg) => {
                assert_eq!(msg, "no valid description column found")
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_rows_are_filtered_not_failed() {
        let backend = Arc::new(RowScriptedBackend::new());
        let runner = runner_over(backend.clone());
        let input = BatchInput::from_bytes(b"description\nNamkeens\n\"  \"\nCarton boxes\n").unwrap();

        let rows = runner.run(&input, |_| {}).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_capitalized_description_column_is_processed() {
        let backend = Arc::new(RowScriptedBackend::new());
        let runner = runner_over(backend);
        let input = BatchInput::from_bytes(b"Description\nLeather shoes\n").unwrap();

        let rows = runner.run(&input, |_| {}).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].classifications.is_some());
    }

    #[tokio::test]
    async fn test_hint_is_fixed_for_the_whole_batch() {
        let backend = Arc::new(RowScriptedBackend::new());
        let adapter = ClassificationAdapter::new(backend);
        let runner = BatchRunner::new(adapter).with_hint(CategoryHint::Services);
        let input = input_of(&["IT consulting services"]);

        let rows = runner.run(&input, |_| {}).await.unwrap();
        assert_eq!(rows.len(), 1);
    }
}
