use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::api::error::GenerationError;
use crate::api::models::{ChatMessage, ChatRequest, GeneratedText};
use crate::api::providers::Provider;
use crate::api::TextGenerator;

const DEFAULT_PATH: &str = "/chat/completions";

fn build_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), DEFAULT_PATH)
}

/// Talks to any endpoint speaking the OpenAI chat-completions dialect.
#[derive(Clone)]
pub struct OpenAiCompatGenerator {
    client: reqwest::Client,
    endpoint: String,
    headers: HeaderMap,
    model: String,
}

impl OpenAiCompatGenerator {
    pub fn new(
        client: reqwest::Client,
        provider: Provider,
        base_url: Option<&str>,
        api_key: Option<&str>,
        model: &str,
    ) -> anyhow::Result<Self> {
        let endpoint = build_endpoint(base_url.unwrap_or(provider.default_base_url()));
        let headers = build_headers(provider, api_key)?;
        Ok(Self { client, endpoint, headers, model: model.to_string() })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn build_headers(provider: Provider, api_key: Option<&str>) -> anyhow::Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(key) = api_key {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", key))?);
    }
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if provider == Provider::OpenRouter {
        // Optional but recommended headers for OpenRouter
        headers.insert("X-Title", HeaderValue::from_static("quant_solver"));
    }
    Ok(headers)
}

#[derive(Debug, Deserialize)]
struct OaChoiceMsg {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OaChoice {
    message: Option<OaChoiceMsg>,
}

#[derive(Debug, Deserialize)]
struct OaResp {
    choices: Vec<OaChoice>,
}

fn parse_response(body: &str) -> Result<GeneratedText, GenerationError> {
    let resp: OaResp = serde_json::from_str(body)
        .map_err(|e| GenerationError::malformed(format!("unexpected body: {}", e)))?;
    let choice = resp
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::malformed("response has no choices"))?;
    let content = choice
        .message
        .and_then(|m| m.content)
        .ok_or_else(|| GenerationError::malformed("first choice has no message content"))?;
    Ok(GeneratedText::new(content))
}

/// Non-2xx is a provider error whatever the body says.
fn read_completion(status: StatusCode, body: String) -> Result<GeneratedText, GenerationError> {
    if !status.is_success() {
        return Err(GenerationError::Status { status: status.as_u16(), body });
    }
    parse_response(&body)
}

#[async_trait]
impl TextGenerator for OpenAiCompatGenerator {
    async fn generate(&self, messages: Vec<ChatMessage>) -> Result<GeneratedText, GenerationError> {
        let req = ChatRequest { model: self.model.clone(), messages };

        tracing::debug!(endpoint = %self.endpoint, model = %self.model, "sending chat completion");
        let resp = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        let body = if status.is_success() {
            resp.text().await?
        } else {
            tracing::warn!(status = status.as_u16(), "provider returned an error status");
            resp.text().await.unwrap_or_default()
        };
        let generated = read_completion(status, body)?;
        tracing::debug!(chars = generated.generated_text.len(), "received completion");
        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        assert_eq!(build_endpoint("https://api.example.com/v1/"), "https://api.example.com/v1/chat/completions");
        assert_eq!(build_endpoint("https://api.example.com/v1"), "https://api.example.com/v1/chat/completions");
    }

    #[test]
    fn parses_first_choice_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}},{"message":{"content":"ignored"}}]}"#;
        assert_eq!(parse_response(body).unwrap().generated_text, "hello");
    }

    #[test]
    fn rejects_empty_choices() {
        let err = parse_response(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn rejects_missing_content() {
        let err = parse_response(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn rejects_other_shapes() {
        let err = parse_response(r#"[{"generated_text":"hi"}]"#).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn error_status_wins_over_body() {
        let body = r#"{"choices":[{"message":{"content":"hello"}}]}"#.to_string();
        match read_completion(StatusCode::TOO_MANY_REQUESTS, body) {
            Err(GenerationError::Status { status, body }) => {
                assert_eq!(status, 429);
                assert!(body.contains("hello"));
            }
            other => panic!("expected status error, got {:?}", other),
        }

        let err = read_completion(StatusCode::INTERNAL_SERVER_ERROR, String::new()).unwrap_err();
        assert_eq!(err.to_string(), "Provider error 500: ");
    }

    #[test]
    fn success_status_parses_body() {
        let body = r#"{"choices":[{"message":{"content":"x = 1"}}]}"#.to_string();
        assert_eq!(read_completion(StatusCode::OK, body).unwrap().generated_text, "x = 1");
        let err = read_completion(StatusCode::OK, "not json".to_string()).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn openrouter_gets_title_header() {
        let headers = build_headers(Provider::OpenRouter, Some("k")).unwrap();
        assert_eq!(headers.get("X-Title").unwrap(), "quant_solver");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer k");

        let headers = build_headers(Provider::Ollama, None).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
        assert!(headers.get("X-Title").is_none());
    }
}
