pub mod prompt;
pub mod stats;

use std::sync::Arc;

use crate::api::{ChatMessage, GenerationError, TextGenerator};
use crate::utils::code::{extract_solution, Extraction};

pub use stats::SolutionStats;

pub const DEFAULT_LANGUAGE: &str = "python";

/// Turns a problem description into solution code via a text generator.
///
/// Holds nothing but the generator handle and the target language, so every
/// call is independent.
#[derive(Clone)]
pub struct SolutionGenerator {
    model: Arc<dyn TextGenerator>,
    language: String,
}

impl SolutionGenerator {
    pub fn new(model: Arc<dyn TextGenerator>, language: impl Into<String>) -> Self {
        Self { model, language: language.into() }
    }

    pub async fn generate(&self, problem_description: &str) -> Result<String, GenerationError> {
        let prompt = prompt::build_prompt(problem_description, &self.language);
        let messages = vec![ChatMessage::user(prompt)];
        let response = self.model.generate(messages).await?;

        let extraction = extract_solution(&response.generated_text, &self.language);
        match &extraction {
            Extraction::Tagged(_) => {}
            Extraction::Untagged(_) => {
                tracing::warn!(language = %self.language, "no block tagged for target language; using another fenced block");
            }
            Extraction::Raw(_) => {
                tracing::warn!(language = %self.language, "reply has no fenced block; returning raw text");
            }
        }
        Ok(extraction.into_code())
    }
}
