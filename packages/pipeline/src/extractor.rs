//! The model-backed field extractor.

use async_trait::async_trait;

use crate::record::PartialRecord;
use crate::schema::Schema;

/// Backend error returned by extractor implementations.
///
/// The orchestrator attaches the chunk identity when it wraps one of these
/// into [`PipelineError::ExtractionFailure`](crate::PipelineError).
pub type ExtractorError = Box<dyn std::error::Error + Send + Sync>;

/// Extracts a partial record from one chunk of text.
///
/// Implementations wrap a specific model backend. Calls are stateless and
/// safe to issue concurrently; a failed call is reported to the caller and
/// never retried internally.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(
        &self,
        chunk: &str,
        schema: &Schema,
    ) -> std::result::Result<PartialRecord, ExtractorError>;
}

#[cfg(feature = "openai")]
pub use openai::OpenAiExtractor;

#[cfg(feature = "openai")]
mod openai {
    use async_trait::async_trait;
    use llm_client::{OpenAiClient, StructuredRequest};
    use tracing::debug;

    use super::{Extractor, ExtractorError};
    use crate::prompts::{extraction_prompt, EXTRACT_SYSTEM_PROMPT};
    use crate::record::PartialRecord;
    use crate::schema::Schema;

    /// Extractor backed by the OpenAI structured-output API.
    pub struct OpenAiExtractor {
        client: OpenAiClient,
        model: String,
    }

    impl OpenAiExtractor {
        pub fn new(client: OpenAiClient, model: impl Into<String>) -> Self {
            Self {
                client,
                model: model.into(),
            }
        }

        /// Create from the `OPENAI_API_KEY` environment variable.
        pub fn from_env(model: impl Into<String>) -> llm_client::Result<Self> {
            Ok(Self::new(OpenAiClient::from_env()?, model))
        }
    }

    #[async_trait]
    impl Extractor for OpenAiExtractor {
        async fn extract(
            &self,
            chunk: &str,
            schema: &Schema,
        ) -> std::result::Result<PartialRecord, ExtractorError> {
            debug!(
                schema = schema.name(),
                chunk_len = chunk.len(),
                model = %self.model,
                "requesting structured extraction"
            );

            let request = StructuredRequest::new(
                &self.model,
                EXTRACT_SYSTEM_PROMPT,
                extraction_prompt(chunk, schema),
                schema.response_schema(),
            );

            let raw = self.client.structured_output(request).await?;
            let value: serde_json::Value = serde_json::from_str(&raw)?;
            let record = PartialRecord::from_response(&value, schema)?;

            debug!(
                schema = schema.name(),
                fields = record.len(),
                "extraction returned"
            );
            Ok(record)
        }
    }
}
