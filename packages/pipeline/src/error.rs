//! Typed errors for the extraction pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can match
//! on the failure kind and decide whether to skip, retry, or abort.

use thiserror::Error;

/// Errors produced by the chunk/extract/merge pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Bad chunk size, unknown schema name, or other setup problem.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// The model backend failed for one specific chunk.
    ///
    /// `document` and `chunk` identify the failing chunk within the input
    /// sequence handed to the orchestrator.
    #[error("extraction failed for document {document}, chunk {chunk}: {source}")]
    ExtractionFailure {
        document: usize,
        chunk: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An extracted or merged value does not satisfy the schema contract.
    #[error("schema violation on field `{field}`: {reason}")]
    SchemaViolation { field: String, reason: String },
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
