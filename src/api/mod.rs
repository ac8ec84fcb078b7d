pub mod client;
pub mod error;
pub mod models;
pub mod openai_compat;
pub mod providers;

use async_trait::async_trait;

pub use error::GenerationError;
pub use models::{ChatMessage, GeneratedText};

/// A text-generation capability: takes a conversation, returns the model's reply.
///
/// Implementations must not retry or cache; a failure is handed back to the
/// caller as-is.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, messages: Vec<ChatMessage>) -> Result<GeneratedText, GenerationError>;
}
