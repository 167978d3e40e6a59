//! Spellcheck and embedding enrichment for segmented regulation records.
//!
//! Rows produced by `regtext-segmenter` are sent, one at a time, to a
//! spellcheck service and then to an embedding service. Every call is
//! wrapped in a bounded retry; a row whose calls keep failing keeps an empty
//! field and the run moves on. Progress is checkpointed after each row so an
//! interrupted run resumes at the first row lacking a result.

pub mod client;
pub mod config;
pub mod enricher;
pub mod error;
pub mod prompt;
pub mod retry;
pub mod table;

pub use client::{Embedder, OpenAiClient, SpellChecker};
#[cfg(any(test, feature = "test-utils"))]
pub use client::test_support::{MockEmbedder, MockSpellChecker};
pub use config::EnrichmentConfig;
pub use enricher::{Enricher, EnrichmentSummary};
pub use error::{EnrichmentError, Result};
pub use retry::{with_retry, RetryPolicy};
pub use table::{EnrichedRow, EnrichmentTable};
