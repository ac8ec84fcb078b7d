use crate::api::GenerationError;
use crate::session::history::{Message, Role, Transcript};
use crate::solver::{SolutionGenerator, SolutionStats};

/// Pairs a transcript with the generator that answers into it.
pub struct ChatSession {
    transcript: Transcript,
    generator: SolutionGenerator,
}

impl ChatSession {
    pub fn new(transcript: Transcript, generator: SolutionGenerator) -> Self {
        Self { transcript, generator }
    }

    /// Record `text` as a user message and answer it.
    ///
    /// On failure the user message stays in the transcript and nothing is
    /// recorded for the assistant.
    pub async fn submit(&mut self, text: &str) -> Result<&Message, GenerationError> {
        self.transcript.append(Role::User, text);
        let solution = self.generator.generate(text).await?;
        Ok(self.transcript.append(Role::Assistant, solution))
    }

    pub fn transcript(&self) -> &Transcript { &self.transcript }

    pub fn stats(&self) -> Option<SolutionStats> {
        self.transcript.latest_solution().map(|m| SolutionStats::of(m.content()))
    }
}
