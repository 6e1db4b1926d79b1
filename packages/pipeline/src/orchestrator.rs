//! Runs chunk → extract → merge over multiple text sources for one entity.

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::chunker::chunk;
use crate::error::{PipelineError, Result};
use crate::extractor::Extractor;
use crate::merger::merge;
use crate::record::{MergedRecord, PartialRecord};
use crate::schema::Schema;

/// One raw text source for an entity: the scraped page body, the spec-sheet
/// text, and so on.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    source: Option<String>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
        }
    }

    /// Label the origin of this document, for logging.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// What to do when extraction fails for a single chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChunkFailurePolicy {
    /// Log the failure and keep going with the remaining chunks.
    #[default]
    Skip,
    /// Fail the whole entity on the first failing chunk.
    Abort,
}

/// Tuning knobs for [`Pipeline::extract_entity`].
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Upper bound on chunk size, in characters.
    pub max_chunk_size: usize,
    /// Maximum extraction calls in flight at once.
    pub concurrency: usize,
    /// Per-chunk failure handling.
    pub on_failure: ChunkFailurePolicy,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_chunk_size: 3000,
            concurrency: 4,
            on_failure: ChunkFailurePolicy::default(),
        }
    }
}

/// Orchestrates chunking, extraction, and merging for one entity.
///
/// Documents are processed in the order given and their partial records are
/// accumulated in that same order: every chunk of document 1 before any
/// chunk of document 2. A later source (a spec sheet fetched after the
/// page body) therefore overrides earlier sources field by field in the
/// merge.
pub struct Pipeline<E> {
    extractor: E,
    options: ExtractOptions,
}

impl<E: Extractor> Pipeline<E> {
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            options: ExtractOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract one merged record from the given sources.
    ///
    /// Extraction calls run concurrently up to `options.concurrency`, but
    /// results are collected in input order, so the merge outcome does not
    /// depend on completion timing. A failing chunk is handled per
    /// `options.on_failure`; with [`ChunkFailurePolicy::Skip`] it is logged
    /// and its fields are simply absent from the merge input.
    pub async fn extract_entity(
        &self,
        documents: &[Document],
        schema: &Schema,
    ) -> Result<MergedRecord> {
        if self.options.concurrency == 0 {
            return Err(PipelineError::InvalidConfiguration {
                reason: "extraction concurrency must be at least 1".into(),
            });
        }

        let mut tasks = Vec::new();
        for (doc_idx, document) in documents.iter().enumerate() {
            let chunks = chunk(document.text(), self.options.max_chunk_size)?;
            debug!(
                document = doc_idx,
                source = document.source().unwrap_or("unlabeled"),
                chunks = chunks.len(),
                "chunked document"
            );
            for (chunk_idx, text) in chunks.into_iter().enumerate() {
                tasks.push((doc_idx, chunk_idx, text));
            }
        }

        // `buffered` keeps input order, which is what makes "later
        // documents win" hold under concurrency.
        let outcomes: Vec<(usize, usize, std::result::Result<PartialRecord, _>)> =
            stream::iter(tasks)
                .map(|(doc_idx, chunk_idx, text)| {
                    let extractor = &self.extractor;
                    async move {
                        let outcome = extractor.extract(&text, schema).await;
                        (doc_idx, chunk_idx, outcome)
                    }
                })
                .buffered(self.options.concurrency)
                .collect()
                .await;

        let mut partials = Vec::with_capacity(outcomes.len());
        for (document, chunk, outcome) in outcomes {
            match outcome {
                Ok(record) => partials.push(record),
                Err(source) => {
                    let err = PipelineError::ExtractionFailure {
                        document,
                        chunk,
                        source,
                    };
                    match self.options.on_failure {
                        ChunkFailurePolicy::Skip => {
                            warn!(error = %err, "skipping failed chunk")
                        }
                        ChunkFailurePolicy::Abort => return Err(err),
                    }
                }
            }
        }

        merge(&partials, schema)
    }
}
