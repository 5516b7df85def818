use std::sync::Arc;

use serde::Serialize;
use tracing::error;

use crate::llm::TextGenerator;
use crate::models::{OmdbMovie, TmdbMovie};

/// One-shot question answering over the two fetched catalog records.
/// Stateless: every call stands alone, there is no conversation memory.
pub struct Answerer {
    generator: Arc<dyn TextGenerator>,
}

impl Answerer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Answer a question against the records, or `None` on any model
    /// failure (logged, never propagated).
    pub async fn answer(
        &self,
        question: &str,
        tmdb: Option<&TmdbMovie>,
        omdb: Option<&OmdbMovie>,
    ) -> Option<String> {
        let prompt = question_prompt(question, tmdb, omdb);
        match self.generator.generate(&prompt).await {
            Ok(answer) => Some(answer),
            Err(e) => {
                error!("question answering failed: {}", e);
                None
            }
        }
    }
}

fn question_prompt(
    question: &str,
    tmdb: Option<&TmdbMovie>,
    omdb: Option<&OmdbMovie>,
) -> String {
    format!(
        "Movie data: {} and {}\n\nQuestion: {}\nAnswer:",
        render_record(tmdb),
        render_record(omdb),
        question
    )
}

/// Raw textual rendering of a record for prompt embedding; absent records
/// appear as the literal "None".
fn render_record<T: Serialize>(record: Option<&T>) -> String {
    record
        .and_then(|r| serde_json::to_string(r).ok())
        .unwrap_or_else(|| "None".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;

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

    #[test]
    fn prompt_embeds_question_and_both_records() {
        let tmdb = TmdbMovie {
            title: "Inception".to_string(),
            ..Default::default()
        };
        let omdb = OmdbMovie {
            plot: "A thief enters dreams.".to_string(),
            ..Default::default()
        };

        let prompt = question_prompt("Who directed it", Some(&tmdb), Some(&omdb));
        assert!(prompt.contains("Inception"));
        assert!(prompt.contains("A thief enters dreams."));
        assert!(prompt.contains("Question: Who directed it"));
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn absent_records_render_as_none() {
        let prompt = question_prompt("Anything", None, None);
        assert!(prompt.starts_with("Movie data: None and None"));
    }

    #[tokio::test]
    async fn completion_text_passes_through() {
        let answerer = Answerer::new(Arc::new(FixedGenerator("Christopher Nolan")));
        let answer = answerer.answer("Who directed it", None, None).await;
        assert_eq!(answer, Some("Christopher Nolan".to_string()));
    }

    #[tokio::test]
    async fn model_failure_yields_absence() {
        let answerer = Answerer::new(Arc::new(FailingGenerator));
        assert_eq!(answerer.answer("Who directed it", None, None).await, None);
    }
}
