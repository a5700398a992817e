//! Batched, partial-failure-tolerant product writes.
//!
//! Records are split into contiguous batches in source order and written one
//! at a time. A failed batch is recorded and the loop moves on; the caller
//! decides the exit status from the returned [`ImportSummary`].

use vitrine_core::ProductUpsert;

use crate::client::StoreClient;

/// Records per upsert request.
pub const BATCH_SIZE: usize = 200;

/// Outcome of writing one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    /// 1-based batch number.
    pub index: usize,
    pub attempted: usize,
    /// Rows the store confirmed as inserted or updated.
    pub written: usize,
    pub error: Option<String>,
}

impl BatchResult {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Totals for one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub rows_read: usize,
    pub valid: usize,
    pub skipped: usize,
    /// Sum of confirmed writes over successful batches.
    pub processed: usize,
    /// Records in failed batches.
    pub failed: usize,
    pub batches: Vec<BatchResult>,
}

impl ImportSummary {
    #[must_use]
    pub fn new(rows_read: usize, valid: usize, skipped: usize) -> Self {
        Self {
            rows_read,
            valid,
            skipped,
            ..Self::default()
        }
    }

    /// Folds one batch outcome into the running totals.
    pub fn absorb(&mut self, result: BatchResult) {
        if result.is_failure() {
            self.failed += result.attempted;
        } else {
            self.processed += result.written;
        }
        self.batches.push(result);
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Splits `items` into contiguous chunks of at most `size` elements.
///
/// A `size` of zero is treated as one.
#[must_use]
pub fn partition<T>(items: &[T], size: usize) -> Vec<&[T]> {
    items.chunks(size.max(1)).collect()
}

/// Writes `products` in batches of `batch_size`, folding each outcome into
/// `summary`.
///
/// `on_batch` runs after every batch, successful or not, so callers can
/// report progress as it happens.
pub async fn write_batches<F>(
    client: &StoreClient,
    products: &[ProductUpsert],
    batch_size: usize,
    mut summary: ImportSummary,
    mut on_batch: F,
) -> ImportSummary
where
    F: FnMut(&BatchResult),
{
    for (i, batch) in partition(products, batch_size).into_iter().enumerate() {
        let index = i + 1;
        let result = match client.upsert_products(batch).await {
            Ok(written) => {
                tracing::debug!(batch = index, attempted = batch.len(), written, "batch upserted");
                BatchResult {
                    index,
                    attempted: batch.len(),
                    written,
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!(batch = index, attempted = batch.len(), error = %e, "batch failed");
                BatchResult {
                    index,
                    attempted: batch.len(),
                    written: 0,
                    error: Some(e.to_string()),
                }
            }
        };
        on_batch(&result);
        summary.absorb(result);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(index: usize, n: usize) -> BatchResult {
        BatchResult {
            index,
            attempted: n,
            written: n,
            error: None,
        }
    }

    #[test]
    fn partition_count_is_ceiling_of_len_over_size() {
        let items: Vec<u32> = (0..401).collect();
        assert_eq!(partition(&items, BATCH_SIZE).len(), 3);

        let items: Vec<u32> = (0..400).collect();
        assert_eq!(partition(&items, BATCH_SIZE).len(), 2);

        let items: Vec<u32> = (0..1).collect();
        assert_eq!(partition(&items, BATCH_SIZE).len(), 1);
    }

    #[test]
    fn partition_of_empty_input_is_empty() {
        let items: Vec<u32> = Vec::new();
        assert!(partition(&items, BATCH_SIZE).is_empty());
    }

    #[test]
    fn partition_concatenation_reproduces_input() {
        let items: Vec<u32> = (0..457).collect();
        let batches = partition(&items, BATCH_SIZE);
        assert!(batches.iter().all(|b| b.len() <= BATCH_SIZE));
        assert_eq!(batches.last().map(|b| b.len()), Some(57));
        let joined: Vec<u32> = batches.concat();
        assert_eq!(joined, items);
    }

    #[test]
    fn partition_zero_size_does_not_panic() {
        let items = [1, 2, 3];
        assert_eq!(partition(&items, 0).len(), 3);
    }

    #[test]
    fn absorb_adds_written_for_success_and_attempted_for_failure() {
        let mut summary = ImportSummary::new(450, 401, 49);
        summary.absorb(ok(1, 200));
        summary.absorb(BatchResult {
            index: 2,
            attempted: 200,
            written: 0,
            error: Some("boom".to_owned()),
        });
        summary.absorb(ok(3, 1));

        assert_eq!(summary.processed, 201);
        assert_eq!(summary.failed, 200);
        assert_eq!(summary.batches.len(), 3);
        assert!(!summary.is_success());
    }

    #[test]
    fn summary_without_failures_is_success() {
        let mut summary = ImportSummary::new(2, 2, 0);
        summary.absorb(ok(1, 2));
        assert!(summary.is_success());
        assert_eq!(summary.processed, 2);
    }

    #[test]
    fn empty_summary_is_success() {
        assert!(ImportSummary::new(0, 0, 0).is_success());
    }
}
