//! Testing utilities.
//!
//! [`MockExtractor`] lets pipeline consumers exercise chunking, ordering,
//! and merge behavior without a model backend or network access.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::extractor::{Extractor, ExtractorError};
use crate::record::PartialRecord;
use crate::schema::Schema;

/// A scripted extractor.
///
/// Returns the partial record registered for the first marker the chunk
/// contains, an empty record when nothing matches, and an error for chunks
/// matching a failure marker. Every call is logged for assertions; clones
/// share their script and call log.
#[derive(Clone, Default)]
pub struct MockExtractor {
    responses: Arc<RwLock<Vec<(String, PartialRecord)>>>,
    failures: Arc<RwLock<Vec<String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `record` for chunks containing `marker`.
    pub fn with_response(self, marker: impl Into<String>, record: PartialRecord) -> Self {
        self.responses
            .write()
            .unwrap()
            .push((marker.into(), record));
        self
    }

    /// Fail for chunks containing `marker`.
    pub fn with_failure(self, marker: impl Into<String>) -> Self {
        self.failures.write().unwrap().push(marker.into());
        self
    }

    /// Chunks received so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn extract(
        &self,
        chunk: &str,
        _schema: &Schema,
    ) -> std::result::Result<PartialRecord, ExtractorError> {
        self.calls.write().unwrap().push(chunk.to_string());

        if self
            .failures
            .read()
            .unwrap()
            .iter()
            .any(|marker| chunk.contains(marker))
        {
            return Err(format!("scripted failure for chunk: {chunk:.40}").into());
        }

        let responses = self.responses.read().unwrap();
        for (marker, record) in responses.iter() {
            if chunk.contains(marker) {
                return Ok(record.clone());
            }
        }
        Ok(PartialRecord::new())
    }
}
