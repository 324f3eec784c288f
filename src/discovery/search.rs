use super::SearchSignal;
use crate::config::SearchConfig;
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    gl: &'a str,
    hl: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    link: Option<String>,
}

/// Serper.dev web search client
pub struct SerperClient {
    client: Client,
    config: SearchConfig,
    api_key: Option<String>,
}

impl SerperClient {
    pub fn new(config: SearchConfig) -> AppResult<Self> {
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
impl SearchSignal for SerperClient {
    async fn search(&self, query: &str) -> AppResult<Vec<String>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::System(format!(
                "Search API key not found. Set it in config or use {} environment variable",
                crate::config::SERPER_API_KEY_ENV
            ))
        })?;

        let request = SearchRequest {
            q: query,
            gl: &self.config.country,
            hl: &self.config.language,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("X-API-KEY", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Failed to reach search API: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Network(format!(
                "Search request failed: {} - {}",
                status, error_text
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::Network(format!("Failed to parse search response: {}", e)))?;

        let links: Vec<String> = body.organic.into_iter().filter_map(|r| r.link).collect();
        debug!(query, results = links.len(), "search finished");
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, api_key: Option<&str>) -> SerperClient {
        SerperClient::new(SearchConfig {
            endpoint: format!("{}/search", server.uri()),
            api_key: api_key.map(str::to_string),
            ..SearchConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_search_sends_query_and_reads_links() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("X-API-KEY", "secret"))
            .and(body_json(serde_json::json!({
                "q": "top competitors of x.com",
                "gl": "us",
                "hl": "en"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "organic": [
                    { "link": "https://www.rival.com/", "title": "Rival" },
                    { "title": "no link here" },
                    { "link": "https://other.io/shop" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let links = client_for(&server, Some("secret"))
            .search("top competitors of x.com")
            .await
            .unwrap();

        assert_eq!(links, vec!["https://www.rival.com/", "https://other.io/shop"]);
    }

    #[tokio::test]
    async fn test_search_missing_organic_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let links = client_for(&server, Some("secret")).search("q").await.unwrap();
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn test_search_non_success_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = client_for(&server, Some("secret")).search("q").await.unwrap_err();
        assert!(matches!(err, AppError::Network(msg) if msg.contains("403")));
    }

    #[tokio::test]
    async fn test_search_without_key_fails_before_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut client = client_for(&server, None);
        client.api_key = None;
        assert!(client.search("q").await.is_err());
    }
}
