use anyhow::Result;
use async_trait::async_trait;
use ollama_rs::generation::completion::request::GenerationRequest;
use ollama_rs::generation::options::GenerationOptions;
use ollama_rs::Ollama;
use rig::completion::Prompt;
use rig::prelude::*;
use tracing::debug;

/// Output-token budget for the local narrative stage.
pub const NARRATIVE_MAX_TOKENS: i32 = 512;
/// Output-token budget for the cloud condense stage.
pub const CONDENSE_MAX_TOKENS: u64 = 1000;
/// Output-token budget for question answering.
pub const ANSWER_MAX_TOKENS: u64 = 200;
/// Fixed sampling temperature for the cloud model.
pub const SAMPLING_TEMPERATURE: f64 = 0.9;

/// Seam over the generative backends: one prompt in, one completion out.
/// Lets the summarizer and answerer be exercised against stubs.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Local model served by Ollama.
pub struct OllamaGenerator {
    client: Ollama,
    model: String,
    num_predict: i32,
}

impl OllamaGenerator {
    pub fn new(host: String, port: u16, model: String, num_predict: i32) -> Self {
        Self {
            client: Ollama::new(host, port),
            model,
            num_predict,
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!("invoking local model {}", self.model);
        let request = GenerationRequest::new(self.model.clone(), prompt.to_string())
            .options(GenerationOptions::default().num_predict(self.num_predict));
        let response = self.client.generate(request).await?;
        Ok(response.response)
    }
}

/// Cloud model reached through a rig OpenAI agent. The agent is built per
/// call from the stored key, so one generator can serve concurrent sessions.
pub struct CloudGenerator {
    api_key: String,
    model: String,
    max_tokens: u64,
    temperature: f64,
}

impl CloudGenerator {
    pub fn new(api_key: String, model: String, max_tokens: u64, temperature: f64) -> Self {
        Self {
            api_key,
            model,
            max_tokens,
            temperature,
        }
    }

    fn agent(
        &self,
    ) -> rig::agent::Agent<rig::providers::openai::responses_api::ResponsesCompletionModel> {
        let client = rig::providers::openai::Client::new(&self.api_key);
        client
            .agent(&self.model)
            .preamble("You are a helpful assistant.")
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build()
    }
}

#[async_trait]
impl TextGenerator for CloudGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!("invoking cloud model {}", self.model);
        let completion = self.agent().prompt(prompt).await?;
        Ok(completion)
    }
}
