use std::sync::Arc;

use tracing::{error, info};

use crate::error::SummaryError;
use crate::llm::TextGenerator;

/// Two-stage narrative summarizer: a local model turns the merged plot into
/// a promotional narrative, then a cloud model condenses that narrative into
/// the final summary.
pub struct Summarizer {
    narrative: Arc<dyn TextGenerator>,
    condenser: Arc<dyn TextGenerator>,
}

impl Summarizer {
    pub fn new(narrative: Arc<dyn TextGenerator>, condenser: Arc<dyn TextGenerator>) -> Self {
        Self {
            narrative,
            condenser,
        }
    }

    /// Fail-closed entry point: a failure at either stage is logged and
    /// collapses to `None`. Callers treat absence as "no summary available"
    /// and must not retry automatically. No partial output is ever returned.
    pub async fn summarize(&self, title: &str, plot: &str) -> Option<String> {
        match self.try_summarize(title, plot).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                error!("summarization failed: {}", e);
                None
            }
        }
    }

    /// Run both stages, naming the failing stage on error.
    pub async fn try_summarize(&self, title: &str, plot: &str) -> Result<String, SummaryError> {
        let narrative = self
            .narrative
            .generate(&narrative_prompt(title, plot))
            .await
            .map_err(SummaryError::Narrative)?;
        info!("narrative stage produced {} chars", narrative.len());

        let summary = self
            .condenser
            .generate(&condense_prompt(&narrative))
            .await
            .map_err(SummaryError::Condense)?;
        info!("condense stage produced {} chars", summary.len());

        Ok(summary)
    }
}

fn narrative_prompt(title: &str, plot: &str) -> String {
    format!(
        "This information is about the movie {title} with this review: {plot}. \
         Give a summary of the movie so that the reader will be interested in watching the movie.\n\
         Your Response:"
    )
}

fn condense_prompt(narrative: &str) -> String {
    format!("Summarize the following text:\n\n{narrative}\n\nSummary:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            Err(anyhow!("model offline"))
        }
    }

    /// Records the prompt it was handed, then echoes a fixed reply.
    struct RecordingGenerator {
        seen: Mutex<Option<String>>,
        reply: &'static str,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
            *self.seen.lock().unwrap() = Some(prompt.to_string());
            Ok(self.reply.to_string())
        }
    }

    #[tokio::test]
    async fn healthy_stages_pass_condensed_text_through() {
        let summarizer = Summarizer::new(
            Arc::new(FixedGenerator("a long enticing narrative")),
            Arc::new(FixedGenerator("short summary")),
        );
        assert_eq!(
            summarizer.summarize("Inception", "A thief enters dreams.").await,
            Some("short summary".to_string())
        );
    }

    #[tokio::test]
    async fn narrative_failure_collapses_to_none() {
        let summarizer = Summarizer::new(
            Arc::new(FailingGenerator),
            Arc::new(FixedGenerator("never reached")),
        );
        assert_eq!(summarizer.summarize("Inception", "plot").await, None);

        let err = summarizer.try_summarize("Inception", "plot").await.unwrap_err();
        assert!(matches!(err, SummaryError::Narrative(_)));
    }

    #[tokio::test]
    async fn condense_failure_collapses_to_none() {
        let summarizer = Summarizer::new(
            Arc::new(FixedGenerator("a narrative")),
            Arc::new(FailingGenerator),
        );
        assert_eq!(summarizer.summarize("Inception", "plot").await, None);

        let err = summarizer.try_summarize("Inception", "plot").await.unwrap_err();
        assert!(matches!(err, SummaryError::Condense(_)));
    }

    #[tokio::test]
    async fn stage_prompts_embed_their_inputs() {
        let narrative = Arc::new(RecordingGenerator {
            seen: Mutex::new(None),
            reply: "the narrative text",
        });
        let condenser = Arc::new(RecordingGenerator {
            seen: Mutex::new(None),
            reply: "final",
        });
        let summarizer = Summarizer::new(narrative.clone(), condenser.clone());

        summarizer
            .try_summarize("Inception", "A thief enters dreams.")
            .await
            .unwrap();

        let stage1 = narrative.seen.lock().unwrap().clone().unwrap();
        assert!(stage1.contains("Inception"));
        assert!(stage1.contains("A thief enters dreams."));

        let stage2 = condenser.seen.lock().unwrap().clone().unwrap();
        assert!(stage2.contains("the narrative text"));
        assert!(stage2.starts_with("Summarize the following text"));
    }
}
