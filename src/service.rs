//! Orchestration over discovery and pricing
//!
//! [`Sagelytics`] is constructed once by the caller and passed to whatever
//! handles requests. It owns no global state.

use crate::config::Config;
use crate::discovery::{
    CompetitorCandidate, CompetitorDiscoverer, search::SerperClient, suggest::ChatCompletionClient,
};
use crate::domain::{Domain, normalize};
use crate::pricing::{Aggregator, ChartData, PricingInput};
use crate::utils::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Business details supplied with a discovery request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessContext {
    pub domain: String,
    #[serde(default)]
    pub business_type: String,
    #[serde(default)]
    pub known_competitors: Vec<String>,
    pub product_catalog_url: String,
}

impl BusinessContext {
    /// Check required fields and normalize every domain.
    pub fn validate(&self) -> AppResult<(Domain, Vec<Domain>)> {
        if self.domain.trim().is_empty() {
            return Err(AppError::Validation("Domain is required".to_string()));
        }
        if self.product_catalog_url.trim().is_empty() {
            return Err(AppError::Validation(
                "Product catalog URL is required".to_string(),
            ));
        }

        let domain = normalize(&self.domain)?;
        let known = self
            .known_competitors
            .iter()
            .map(|c| normalize(c))
            .collect::<AppResult<Vec<_>>>()?;

        Ok((domain, known))
    }
}

/// Result of one discovery request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryReport {
    pub domain: Domain,
    pub business_type: String,
    pub product_catalog_url: String,
    pub candidates: Vec<CompetitorCandidate>,
    #[serde(with = "crate::utils::time_format")]
    pub discovered_at: DateTime<Utc>,
}

impl DiscoveryReport {
    pub fn competitors(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.domain.clone()).collect()
    }
}

pub struct Sagelytics {
    discoverer: CompetitorDiscoverer,
    aggregator: Aggregator,
}

impl Sagelytics {
    pub fn new(discoverer: CompetitorDiscoverer, aggregator: Aggregator) -> Self {
        Self {
            discoverer,
            aggregator,
        }
    }

    /// Build a client wired to the configured search and completion APIs
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let search = SerperClient::new(config.search.clone())?;
        let suggest = ChatCompletionClient::new(config.llm.clone())?;

        Ok(Self::new(
            CompetitorDiscoverer::new(Box::new(search), Box::new(suggest)),
            Aggregator::new(config.pricing.default_baseline),
        ))
    }

    pub async fn discover_competitors(&self, context: &BusinessContext) -> AppResult<DiscoveryReport> {
        let (domain, known) = context.validate()?;
        info!(%domain, known = known.len(), "discovering competitors");

        let candidates = self.discoverer.discover_candidates(&domain, &known).await?;

        Ok(DiscoveryReport {
            domain,
            business_type: context.business_type.clone(),
            product_catalog_url: context.product_catalog_url.clone(),
            candidates,
            discovered_at: Utc::now(),
        })
    }

    pub fn pricing_chart<R: Rng + ?Sized>(&self, input: &PricingInput, rng: &mut R) -> ChartData {
        info!(
            user_prices = input.user_prices.len(),
            competitors = input.competitors.len(),
            "aggregating pricing"
        );
        self.aggregator
            .aggregate(&input.user_prices, &input.competitors, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{SearchSignal, SuggestionSignal};
    use crate::pricing::CompetitorPrices;
    use async_trait::async_trait;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct StaticSearch(Vec<String>);

    #[async_trait]
    impl SearchSignal for StaticSearch {
        async fn search(&self, _query: &str) -> AppResult<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct EchoSuggest;

    #[async_trait]
    impl SuggestionSignal for EchoSuggest {
        async fn complete(&self, prompt: &str) -> AppResult<String> {
            if prompt.contains("suggest 3") {
                Ok("similar.com".to_string())
            } else {
                Ok("trend.com, Rival.com".to_string())
            }
        }
    }

    fn client() -> Sagelytics {
        Sagelytics::new(
            CompetitorDiscoverer::new(
                Box::new(StaticSearch(vec!["https://www.rival.com/".to_string()])),
                Box::new(EchoSuggest),
            ),
            Aggregator::default(),
        )
    }

    fn context(domain: &str, known: &[&str]) -> BusinessContext {
        BusinessContext {
            domain: domain.to_string(),
            business_type: "electronics".to_string(),
            known_competitors: known.iter().map(|k| k.to_string()).collect(),
            product_catalog_url: "https://x.com/catalog".to_string(),
        }
    }

    #[tokio::test]
    async fn test_discover_normalizes_request_domain() {
        let report = client()
            .discover_competitors(&context("https://www.X.com/shop", &[]))
            .await
            .unwrap();

        assert_eq!(report.domain.as_str(), "x.com");
        assert_eq!(report.competitors(), vec!["rival.com", "trend.com"]);
    }

    #[tokio::test]
    async fn test_discover_with_known_competitors_uses_similar_prompt() {
        let report = client()
            .discover_competitors(&context("x.com", &["a.com", "www.b.com"]))
            .await
            .unwrap();

        assert_eq!(report.competitors(), vec!["rival.com", "similar.com"]);
    }

    #[tokio::test]
    async fn test_missing_catalog_url_is_validation_error() {
        let mut ctx = context("x.com", &[]);
        ctx.product_catalog_url = "  ".to_string();

        let err = client().discover_competitors(&ctx).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_invalid_known_competitor_is_rejected() {
        let err = client()
            .discover_competitors(&context("x.com", &["not a url"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidDomain(_)));
    }

    #[test]
    fn test_context_deserializes_from_camel_case() {
        let ctx: BusinessContext = serde_json::from_str(
            r#"{"domain": "x.com", "knownCompetitors": ["a.com"], "productCatalogUrl": "https://x.com/p"}"#,
        )
        .unwrap();

        assert_eq!(ctx.known_competitors, vec!["a.com"]);
        assert!(ctx.business_type.is_empty());
        assert!(ctx.validate().is_ok());
    }

    #[test]
    fn test_pricing_chart_uses_configured_baseline() {
        let sagelytics = Sagelytics::new(
            CompetitorDiscoverer::new(Box::new(StaticSearch(Vec::new())), Box::new(EchoSuggest)),
            Aggregator::new(100.0),
        );
        let input = PricingInput {
            user_prices: Vec::new(),
            competitors: vec![CompetitorPrices {
                domain: "rival.com".to_string(),
                prices: vec![Some(100.0), Some(200.0)],
            }],
        };

        let chart = sagelytics.pricing_chart(&input, &mut ChaCha8Rng::seed_from_u64(8));

        assert_eq!(chart.datasets.len(), 2);
        assert!(chart.datasets[0].data.iter().all(|p| (95.0..=105.0).contains(p)));
        assert!(chart.datasets[1].data.iter().all(|p| (142.5..=157.5).contains(p)));
    }

    #[tokio::test]
    async fn test_from_config_survives_search_outage() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "content": "Alpha.com, beta.io, alpha.com" } }]
            })))
            .mount(&server)
            .await;

        let mut config = Config::default();
        config.search.endpoint = format!("{}/search", server.uri());
        config.search.api_key = Some("serper".to_string());
        config.llm.endpoint = format!("{}/chat", server.uri());
        config.llm.api_key = Some("llm".to_string());

        let report = Sagelytics::from_config(&config)
            .unwrap()
            .discover_competitors(&context("x.com", &[]))
            .await
            .unwrap();

        assert_eq!(report.competitors(), vec!["alpha.com", "beta.io"]);
        assert!(report.candidates.iter().all(|c| c.provenance == crate::Provenance::Suggestion));
    }
}
