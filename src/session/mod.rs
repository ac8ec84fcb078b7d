pub mod chat;
pub mod export;
pub mod history;

pub use chat::ChatSession;
pub use export::ExportError;
pub use history::{Message, Role, Transcript};
