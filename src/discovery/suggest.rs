use super::SuggestionSignal;
use crate::config::LlmConfig;
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<CompletionContent>,
}

/// Message content as returned by chat-completion style APIs.
///
/// Some providers return a plain string, others a list of typed fragments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CompletionContent {
    PlainText(String),
    FragmentList(Vec<ContentFragment>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentFragment {
    #[serde(default)]
    pub text: Option<String>,
}

impl CompletionContent {
    /// Collapse the content into a single string.
    pub fn into_text(self) -> String {
        match self {
            CompletionContent::PlainText(text) => text,
            CompletionContent::FragmentList(fragments) => fragments
                .into_iter()
                .filter_map(|f| f.text)
                .collect::<Vec<_>>()
                .concat(),
        }
    }
}

/// Client for OpenAI-compatible chat completion endpoints
pub struct ChatCompletionClient {
    client: Client,
    config: LlmConfig,
    api_key: Option<String>,
}

impl ChatCompletionClient {
    pub fn new(config: LlmConfig) -> AppResult<Self> {
        let api_key = config.resolved_api_key();

        Ok(Self {
            client: Client::builder()
                .user_agent(concat!("sagelytics/", env!("CARGO_PKG_VERSION")))
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .map_err(|e| AppError::Network(format!("Failed to create HTTP client: {}", e)))?,
            config,
            api_key,
        })
    }
}

#[async_trait]
impl SuggestionSignal for ChatCompletionClient {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut builder = self.client.post(&self.config.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Failed to reach completion API: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Network(format!(
                "Completion request failed: {} - {}",
                status, error_text
            )));
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            AppError::Network(format!("Failed to parse completion response: {}", e))
        })?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Network("Completion response had no content".to_string()))?;

        let text = content.into_text();
        debug!(model = %self.config.model, chars = text.len(), "completion received");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ChatCompletionClient {
        ChatCompletionClient::new(LlmConfig {
            endpoint: format!("{}/v1/chat/completions", server.uri()),
            api_key: Some("sk-test".to_string()),
            model: "test-model".to_string(),
            ..LlmConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_plain_and_fragment_content_resolve_alike() {
        let plain: CompletionContent = serde_json::from_str("\"a.com, b.com\"").unwrap();
        let fragments: CompletionContent = serde_json::from_str(
            r#"[{"type": "text", "text": "a.com, "}, {"type": "image"}, {"type": "text", "text": "b.com"}]"#,
        )
        .unwrap();

        assert!(matches!(plain, CompletionContent::PlainText(_)));
        assert!(matches!(fragments, CompletionContent::FragmentList(_)));
        assert_eq!(plain.into_text(), fragments.into_text());
    }

    #[tokio::test]
    async fn test_complete_posts_prompt_and_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "rival.com, other.io" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server).complete("Suggest 5").await.unwrap();
        assert_eq!(text, "rival.com, other.io");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["model"], "test-model");
        assert_eq!(body["messages"][0]["content"], "Suggest 5");
    }

    #[tokio::test]
    async fn test_complete_accepts_fragment_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    { "message": { "content": [ { "text": "a.com," }, { "text": " b.com" } ] } }
                ]
            })))
            .mount(&server)
            .await;

        let text = client_for(&server).complete("p").await.unwrap();
        assert_eq!(text, "a.com, b.com");
    }

    #[tokio::test]
    async fn test_complete_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("p").await.unwrap_err();
        assert!(matches!(err, AppError::Network(_)));
    }

    #[tokio::test]
    async fn test_complete_without_choices_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        assert!(client_for(&server).complete("p").await.is_err());
    }
}
