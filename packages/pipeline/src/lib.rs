//! Chunk, extract, and merge structured product data from scraped text.
//!
//! Given one or more raw text sources for a product (a scraped page body,
//! the text of a linked spec-sheet PDF), this library splits each source
//! into model-sized chunks without cutting through tables, extracts a
//! partial record per chunk through an [`Extractor`] backend, and merges
//! the partials into one final record with last-non-absent-wins precedence.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pipeline::{Document, FieldKind, FieldSpec, OpenAiExtractor, Pipeline, Schema};
//!
//! let schema = Schema::new("compressor")
//!     .field(FieldSpec::new("brand", FieldKind::Text).with_hint("Brand name, e.g. Copeland"))
//!     .field(FieldSpec::new("weight_lb", FieldKind::Number));
//!
//! let pipeline = Pipeline::new(OpenAiExtractor::from_env("gpt-4o-2024-08-06")?);
//! let record = pipeline
//!     .extract_entity(
//!         &[
//!             Document::new(page_markdown).with_source(url),
//!             Document::new(spec_sheet_text).with_source("spec sheet"),
//!         ],
//!         &schema,
//!     )
//!     .await?;
//! ```
//!
//! # Modules
//!
//! - [`chunker`] - table-safe text splitting
//! - [`extractor`] - the model-backed [`Extractor`] boundary
//! - [`merger`] - last-non-absent-wins record merging
//! - [`orchestrator`] - multi-source [`Pipeline`] driver
//! - [`schema`] / [`registry`] - extraction contracts and their lookup
//! - [`flatten`] - record-to-sink-row flattening
//! - [`testing`] - mock extractor for consumers' tests

pub mod chunker;
pub mod error;
pub mod extractor;
pub mod flatten;
pub mod merger;
pub mod orchestrator;
pub mod prompts;
pub mod record;
pub mod registry;
pub mod schema;
pub mod testing;

pub use chunker::chunk;
pub use error::{PipelineError, Result};
pub use extractor::{Extractor, ExtractorError};
pub use flatten::{flatten_record, ColumnMapping};
pub use merger::merge;
pub use orchestrator::{ChunkFailurePolicy, Document, ExtractOptions, Pipeline};
pub use record::{FieldValue, MergedRecord, PartialRecord};
pub use registry::SchemaRegistry;
pub use schema::{FieldKind, FieldSpec, Schema};

#[cfg(feature = "openai")]
pub use extractor::OpenAiExtractor;
