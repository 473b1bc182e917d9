use std::sync::Arc;

use serde_json::Value;

use crate::application::ports::{LlmClient, LlmClientError, TextSplitter};

use super::prompts;
use super::retry::RetryPolicy;
use super::structure_transformer::StructureTransformer;
use super::structured_response::parse_structured_response;

/// How partial outputs of a chunked call are reassembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkMerge {
    /// One more call asks the service to combine the partial results.
    Summarize,
    /// Partial results are joined in chunk order.
    Concatenate,
}

/// Runs legal-text operations against the text service, splitting oversized
/// input and retrying every external call.
pub struct DocumentAssistant {
    llm_client: Arc<dyn LlmClient>,
    text_splitter: Arc<dyn TextSplitter>,
    retry_policy: RetryPolicy,
    transformer: StructureTransformer,
}

impl DocumentAssistant {
    pub fn new(
        llm_client: Arc<dyn LlmClient>,
        text_splitter: Arc<dyn TextSplitter>,
        retry_policy: RetryPolicy,
        transformer: StructureTransformer,
    ) -> Self {
        Self {
            llm_client,
            text_splitter,
            retry_policy,
            transformer,
        }
    }

    pub async fn summarize(&self, text: &str) -> Result<String, AssistantError> {
        self.run_chunked("summarize", text, &prompts::summarize, ChunkMerge::Summarize)
            .await
    }

    pub async fn ask(&self, text: &str, question: &str) -> Result<String, AssistantError> {
        if question.trim().is_empty() {
            return Err(AssistantError::InvalidInput(
                "question must not be empty".to_string(),
            ));
        }
        self.call("ask", prompts::ask(text, question)).await
    }

    pub async fn compare(&self, first: &str, second: &str) -> Result<String, AssistantError> {
        self.call("compare", prompts::compare(first, second)).await
    }

    /// Translates plain text. Long input is translated chunk by chunk and the
    /// pieces are joined in order.
    pub async fn translate_text(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, AssistantError> {
        let target_language = validate_language(target_language)?;
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }
        let prompt_for = move |chunk: &str| prompts::translate(chunk, target_language);
        self.run_chunked("translate", text, &prompt_for, ChunkMerge::Concatenate)
            .await
    }

    /// Translates every string inside an analysis result. Input that is not
    /// JSON is translated as one piece of text.
    pub async fn translate_analysis(
        &self,
        input: &str,
        target_language: &str,
    ) -> Result<Value, AssistantError> {
        let target_language = validate_language(target_language)?;
        let leaf = move |s: String| async move { self.translate_text(&s, target_language).await };
        self.transformer.transform_document(input, &leaf).await
    }

    pub async fn translate_value(
        &self,
        value: Value,
        target_language: &str,
    ) -> Result<Value, AssistantError> {
        let target_language = validate_language(target_language)?;
        let leaf = move |s: String| async move { self.translate_text(&s, target_language).await };
        self.transformer.transform(value, &leaf).await
    }

    pub async fn extract_key_terms(&self, text: &str) -> Result<Value, AssistantError> {
        self.structured("key_terms", prompts::key_terms(text)).await
    }

    pub async fn identify_legal_issues(&self, text: &str) -> Result<Value, AssistantError> {
        self.structured("legal_issues", prompts::legal_issues(text))
            .await
    }

    pub async fn analyze_clauses(&self, text: &str) -> Result<Value, AssistantError> {
        self.structured("clauses", prompts::contract_clauses(text))
            .await
    }

    pub async fn comprehensive_analysis(&self, text: &str) -> Result<Value, AssistantError> {
        self.structured("comprehensive", prompts::comprehensive_analysis(text))
            .await
    }

    pub async fn analyze_document(&self, text: &str) -> Result<Value, AssistantError> {
        self.structured("analyze", prompts::document_analysis(text))
            .await
    }

    async fn run_chunked(
        &self,
        operation: &'static str,
        text: &str,
        prompt_for: &(dyn Fn(&str) -> String + Sync),
        merge: ChunkMerge,
    ) -> Result<String, AssistantError> {
        if text.chars().count() <= self.text_splitter.max_chunk_chars() {
            return self.call(operation, prompt_for(text)).await;
        }

        let chunks = self.text_splitter.split(text);
        let chunk_count = chunks.len();
        tracing::info!(operation, chunk_count, "input exceeds chunk limit, splitting");

        let mut partials = Vec::with_capacity(chunk_count);
        for chunk in &chunks {
            tracing::debug!(
                operation,
                chunk = chunk.index + 1,
                chunk_count,
                "processing chunk"
            );
            partials.push(self.call(operation, prompt_for(&chunk.text)).await?);
        }

        match merge {
            ChunkMerge::Summarize => {
                self.call("merge_summaries", prompts::merge_summaries(&partials))
                    .await
            }
            ChunkMerge::Concatenate => Ok(partials.join(" ")),
        }
    }

    async fn structured(
        &self,
        operation: &'static str,
        prompt: String,
    ) -> Result<Value, AssistantError> {
        let text = self.call(operation, prompt).await?;
        Ok(parse_structured_response(operation, &text))
    }

    async fn call(&self, operation: &'static str, prompt: String) -> Result<String, AssistantError> {
        self.retry_policy
            .run(operation, || self.llm_client.complete(&prompt))
            .await
            .map_err(|exhausted| AssistantError::Completion {
                operation,
                attempts: exhausted.attempts,
                source: exhausted.last_error,
            })
    }
}

fn validate_language(target_language: &str) -> Result<&str, AssistantError> {
    let trimmed = target_language.trim();
    if trimmed.is_empty() {
        return Err(AssistantError::InvalidInput(
            "target language must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{operation} failed after {attempts} attempt(s): {source}")]
    Completion {
        operation: &'static str,
        attempts: u32,
        source: LlmClientError,
    },
}
