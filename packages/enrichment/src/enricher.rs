use tracing::{info, warn};

use crate::client::{Embedder, SpellChecker};
use crate::error::Result;
use crate::prompt::embedding_input;
use crate::retry::{with_retry, RetryPolicy};
use crate::table::{EnrichedRow, EnrichmentTable};

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentSummary {
    /// Rows visited in this run.
    pub processed: usize,
    /// Rows already complete before the run and left untouched.
    pub skipped: usize,
    /// Spellcheck results obtained in this run.
    pub corrected: usize,
    /// Embeddings obtained in this run.
    pub embedded: usize,
    /// Rows still missing a result after this run.
    pub failed: usize,
}

/// Outcome of enriching one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RowOutcome {
    corrected: bool,
    embedded: bool,
}

/// Runs the spellcheck and embedding collaborators over an enrichment table.
///
/// Collaborator failures never abort a run: after the retry budget is spent
/// the field stays empty and the next row is processed. A later run picks up
/// from the first row lacking a result.
pub struct Enricher<'a, S: SpellChecker, E: Embedder> {
    spellchecker: &'a S,
    embedder: &'a E,
    policy: RetryPolicy,
}

impl<'a, S: SpellChecker, E: Embedder> Enricher<'a, S, E> {
    pub fn new(spellchecker: &'a S, embedder: &'a E, policy: RetryPolicy) -> Self {
        Self {
            spellchecker,
            embedder,
            policy,
        }
    }

    /// Enrich every incomplete row, starting at the first one.
    ///
    /// `checkpoint` is called after each visited row so progress survives an
    /// interruption. Only a checkpoint error ends the run early.
    pub async fn run<F>(&self, table: &mut EnrichmentTable, mut checkpoint: F) -> Result<EnrichmentSummary>
    where
        F: FnMut(&mut EnrichmentTable) -> Result<()>,
    {
        let mut summary = EnrichmentSummary::default();
        let Some(start) = table.first_missing() else {
            summary.skipped = table.len();
            info!(rows = table.len(), "all rows already enriched");
            return Ok(summary);
        };
        summary.skipped = start;

        info!(rows = table.len(), start, "starting enrichment run");

        for index in start..table.len() {
            let Some(row) = table.rows.get_mut(index) else {
                break;
            };
            if row.is_complete() {
                summary.skipped += 1;
                continue;
            }

            let outcome = self.enrich_row(row).await;
            summary.processed += 1;
            summary.corrected += usize::from(outcome.corrected);
            summary.embedded += usize::from(outcome.embedded);
            if !row.is_complete() {
                summary.failed += 1;
            }

            checkpoint(table)?;
        }

        info!(
            processed = summary.processed,
            corrected = summary.corrected,
            embedded = summary.embedded,
            failed = summary.failed,
            "enrichment run finished"
        );
        Ok(summary)
    }

    /// Fill in whichever results the row is missing.
    async fn enrich_row(&self, row: &mut EnrichedRow) -> RowOutcome {
        let mut outcome = RowOutcome::default();
        let index = row.record.index;

        if row.corrected_body.is_none() {
            let body = row.record.body.as_str();
            let result = with_retry(&self.policy, "spellcheck", |_| self.spellchecker.correct(body)).await;
            match result {
                Ok(corrected) => {
                    row.corrected_body = Some(corrected);
                    outcome.corrected = true;
                }
                Err(e) => warn!(row = index, error = %e, "leaving corrected body empty"),
            }
        }

        if row.embedding.is_none() {
            let Some(corrected) = row.corrected_body.as_deref() else {
                warn!(row = index, "no corrected body, skipping embedding");
                return outcome;
            };
            let input = embedding_input(&row.record.full_label, corrected);
            let result = with_retry(&self.policy, "embedding", |_| self.embedder.embed(&input)).await;
            match result {
                Ok(embedding) => {
                    row.embedding = Some(embedding);
                    outcome.embedded = true;
                }
                Err(e) => warn!(row = index, error = %e, "leaving embedding empty"),
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{MockEmbedder, MockSpellChecker};
    use crate::error::EnrichmentError;
    use pretty_assertions::assert_eq;
    use regtext_segmenter::output::generate_rows;
    use regtext_segmenter::segment_text;
    use std::time::Duration;

    fn table() -> EnrichmentTable {
        let document = segment_text(
            "3 OVERVIEW\n\n3.1 Scope\nThis section explains scope.\n\n3.2 Reporting\nInstitutions report annually.\n",
        );
        EnrichmentTable::from_rows(generate_rows(&document))
    }

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_enriches_every_row() {
        let spellchecker = MockSpellChecker::echo();
        let embedder = MockEmbedder::fixed();
        let mut table = table();
        let mut checkpoints = 0;

        let summary = Enricher::new(&spellchecker, &embedder, policy(3))
            .run(&mut table, |_| {
                checkpoints += 1;
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(
            summary,
            EnrichmentSummary {
                processed: 2,
                skipped: 0,
                corrected: 2,
                embedded: 2,
                failed: 0,
            }
        );
        assert_eq!(checkpoints, 2);
        assert_eq!(
            embedder.calls(),
            vec![
                "Source: OVERVIEW > Scope; Content: This section explains scope.",
                "Source: OVERVIEW > Reporting; Content: Institutions report annually.",
            ]
        );
    }

    #[tokio::test]
    async fn test_exhausted_spellcheck_leaves_fields_empty() {
        let spellchecker = MockSpellChecker::new(vec![
            Err(EnrichmentError::EmptyResponse),
            Err(EnrichmentError::EmptyResponse),
        ]);
        let embedder = MockEmbedder::fixed();
        let mut table = table();

        let summary = Enricher::new(&spellchecker, &embedder, policy(2))
            .run(&mut table, |_| Ok(()))
            .await
            .unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.corrected, 1);
        assert!(table.rows[0].corrected_body.is_none());
        assert!(table.rows[0].embedding.is_none());
        assert!(table.rows[1].is_complete());
        assert_eq!(table.first_missing(), Some(0));
        // The embedder is never asked for the row without a corrected body
        assert_eq!(embedder.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_resume_skips_completed_rows() {
        let mut table = table();
        table.rows[0].corrected_body = Some("Done.".into());
        table.rows[0].embedding = Some(vec![1.0]);
        table.rows[1].corrected_body = Some("Institutions report annually.".into());

        let spellchecker = MockSpellChecker::echo();
        let embedder = MockEmbedder::fixed();
        let summary = Enricher::new(&spellchecker, &embedder, policy(3))
            .run(&mut table, |_| Ok(()))
            .await
            .unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.corrected, 0);
        assert_eq!(summary.embedded, 1);
        assert!(spellchecker.calls().is_empty());
        assert_eq!(table.rows[0].corrected_body.as_deref(), Some("Done."));
    }

    #[tokio::test]
    async fn test_complete_table_is_untouched() {
        let mut table = table();
        for row in &mut table.rows {
            row.corrected_body = Some(row.record.body.clone());
            row.embedding = Some(vec![0.0]);
        }

        let spellchecker = MockSpellChecker::echo();
        let embedder = MockEmbedder::fixed();
        let summary = Enricher::new(&spellchecker, &embedder, policy(3))
            .run(&mut table, |_| Ok(()))
            .await
            .unwrap();

        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.processed, 0);
    }

    #[tokio::test]
    async fn test_checkpoint_error_stops_run() {
        let spellchecker = MockSpellChecker::echo();
        let embedder = MockEmbedder::fixed();
        let mut table = table();

        let result = Enricher::new(&spellchecker, &embedder, policy(3))
            .run(&mut table, |_| {
                Err(EnrichmentError::Io(std::io::Error::other("disk full")))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(spellchecker.calls().len(), 1);
    }
}
