use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use quant_solver::api::{ChatMessage, GeneratedText, GenerationError, TextGenerator};
use quant_solver::session::{ChatSession, Role, Transcript};
use quant_solver::solver::prompt::DIRECTIVES;
use quant_solver::solver::{SolutionGenerator, SolutionStats};

/// Replies with a canned text and remembers what it was asked.
struct Canned {
    reply: Result<String, String>,
    seen: Mutex<Vec<Vec<ChatMessage>>>,
}

impl Canned {
    fn ok(reply: &str) -> Arc<Self> {
        Arc::new(Self { reply: Ok(reply.to_string()), seen: Mutex::new(Vec::new()) })
    }

    fn failing(msg: &str) -> Arc<Self> {
        Arc::new(Self { reply: Err(msg.to_string()), seen: Mutex::new(Vec::new()) })
    }
}

#[async_trait]
impl TextGenerator for Canned {
    async fn generate(&self, messages: Vec<ChatMessage>) -> Result<GeneratedText, GenerationError> {
        self.seen.lock().unwrap().push(messages);
        match &self.reply {
            Ok(text) => Ok(GeneratedText::new(text.clone())),
            Err(msg) => Err(GenerationError::malformed(msg.clone())),
        }
    }
}

#[tokio::test]
async fn sends_single_user_turn_with_directives() {
    let model = Canned::ok("```python\nx = 1\n```");
    let generator = SolutionGenerator::new(model.clone(), "python");
    generator.generate("Find the median of two sorted arrays").await.unwrap();

    let seen = model.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let turn = &seen[0];
    assert_eq!(turn.len(), 1);
    assert_eq!(turn[0].role, "user");
    assert!(turn[0].content.contains("Find the median of two sorted arrays"));
    for directive in DIRECTIVES {
        assert!(turn[0].content.contains(directive), "missing {}", directive);
    }
    assert!(turn[0].content.contains("Python"));
}

#[tokio::test]
async fn returns_extracted_code() {
    let model = Canned::ok("Sure!\n```python\nx = 1\n```\nComplexity: O(1)");
    let generator = SolutionGenerator::new(model, "python");
    assert_eq!(generator.generate("").await.unwrap(), "x = 1");
}

#[tokio::test]
async fn returns_trimmed_reply_without_blocks() {
    let model = Canned::ok("\n  just prose  \n");
    let generator = SolutionGenerator::new(model, "python");
    assert_eq!(generator.generate("anything").await.unwrap(), "just prose");
}

#[tokio::test]
async fn model_failure_propagates() {
    let model = Canned::failing("boom");
    let generator = SolutionGenerator::new(model.clone(), "python");
    let err = generator.generate("p").await.unwrap_err();
    assert!(matches!(err, GenerationError::MalformedResponse(ref m) if m == "boom"));
    assert_eq!(model.seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn each_call_reaches_the_model() {
    let model = Canned::ok("x");
    let generator = SolutionGenerator::new(model.clone(), "python");
    generator.generate("same").await.unwrap();
    generator.generate("same").await.unwrap();
    assert_eq!(model.seen.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn session_records_both_sides() {
    let model = Canned::ok("```python\ndef f():\n    return 1\n```");
    let mut session = ChatSession::new(Transcript::new(), SolutionGenerator::new(model, "python"));

    let reply = session.submit("write f").await.unwrap();
    assert_eq!(reply.role(), Role::Assistant);
    assert_eq!(reply.content(), "def f():\n    return 1");

    let all = session.transcript().all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].role(), Role::User);
    assert_eq!(all[0].content(), "write f");
    assert_eq!(session.stats(), Some(SolutionStats { lines: 2, characters: 21 }));
}

#[tokio::test]
async fn session_keeps_user_message_on_failure() {
    let model = Canned::failing("quota");
    let mut session = ChatSession::new(Transcript::new(), SolutionGenerator::new(model, "python"));

    assert!(session.submit("write f").await.is_err());
    let all = session.transcript().all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].role(), Role::User);
    assert_eq!(session.stats(), None);
}

#[test]
fn stats_count_lines_and_chars() {
    assert_eq!(SolutionStats::of(""), SolutionStats { lines: 1, characters: 0 });
    assert_eq!(SolutionStats::of("a\nbé"), SolutionStats { lines: 2, characters: 4 });
}
