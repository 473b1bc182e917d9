use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use lawgenie::application::ports::{LlmClient, LlmClientError};

type Responder = Box<dyn Fn(&str) -> String + Send + Sync>;

/// In-memory text service that records every prompt and can fail a fixed
/// number of times before answering.
pub struct ScriptedLlmClient {
    prompts: Mutex<Vec<String>>,
    failures_remaining: AtomicU32,
    respond: Responder,
}

impl ScriptedLlmClient {
    pub fn answering(respond: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self::failing_then(0, respond)
    }

    pub fn constant(answer: &'static str) -> Self {
        Self::answering(move |_| answer.to_string())
    }

    pub fn failing_then(
        failures: u32,
        respond: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            failures_remaining: AtomicU32::new(failures),
            respond: Box::new(respond),
        }
    }

    pub fn always_failing() -> Self {
        Self::failing_then(u32::MAX, |_| unreachable!())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let remaining = self.failures_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(LlmClientError::ApiRequestFailed("HTTP 503: unavailable".to_string()));
        }

        Ok((self.respond)(prompt))
    }
}

/// Text after the last blank line of a prompt, which is where every template
/// places its input.
pub fn prompt_payload(prompt: &str) -> &str {
    prompt.rsplit("\n\n").next().unwrap_or(prompt)
}
