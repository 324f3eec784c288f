//! Competitor discovery
//!
//! Combines two independent signal sources into one deduplicated list of
//! competitor domains: a web search for the caller's domain and a
//! text-generation model asked for suggestions.

pub mod search;
pub mod suggest;

use crate::domain::{Domain, extract_host};
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Number of suggestions requested when known competitors are supplied
pub const SIMILAR_SUGGESTION_COUNT: usize = 3;
/// Number of suggestions requested when nothing is known yet
pub const MARKET_SUGGESTION_COUNT: usize = 5;

/// Web search returning result links for a query
#[async_trait]
pub trait SearchSignal: Send + Sync {
    async fn search(&self, query: &str) -> AppResult<Vec<String>>;
}

/// Text-generation model answering a single prompt
#[async_trait]
pub trait SuggestionSignal: Send + Sync {
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Search,
    Suggestion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompetitorCandidate {
    pub domain: String,
    pub provenance: Provenance,
}

pub struct CompetitorDiscoverer {
    search: Box<dyn SearchSignal>,
    suggest: Box<dyn SuggestionSignal>,
}

impl CompetitorDiscoverer {
    pub fn new(search: Box<dyn SearchSignal>, suggest: Box<dyn SuggestionSignal>) -> Self {
        Self { search, suggest }
    }

    /// Discover competitor domains for `domain`.
    ///
    /// Search failures degrade to an empty contribution. A failed suggestion
    /// call fails the whole discovery with [`AppError::Discovery`].
    pub async fn discover(&self, domain: &Domain, known: &[Domain]) -> AppResult<Vec<String>> {
        let candidates = self.discover_candidates(domain, known).await?;
        Ok(candidates.into_iter().map(|c| c.domain).collect())
    }

    /// Same as [`discover`](Self::discover) but keeps where each domain came from.
    pub async fn discover_candidates(
        &self,
        domain: &Domain,
        known: &[Domain],
    ) -> AppResult<Vec<CompetitorCandidate>> {
        let query = search_query(domain);
        let prompt = build_suggestion_prompt(domain, known);
        debug!(%domain, known = known.len(), "querying discovery signals");

        let (search_result, suggest_result) =
            tokio::join!(self.search.search(&query), self.suggest.complete(&prompt));

        let links = match search_result {
            Ok(links) => links,
            Err(e) => {
                warn!(%domain, error = %e, "search signal failed, continuing without it");
                Vec::new()
            }
        };

        let reply = suggest_result.map_err(|e| {
            AppError::Discovery(format!("competitor suggestion failed for {}: {}", domain, e))
        })?;

        let candidates = merge_candidates(&links, &parse_suggestions(&reply));
        info!(
            %domain,
            links = links.len(),
            candidates = candidates.len(),
            "competitor discovery finished"
        );
        Ok(candidates)
    }
}

pub fn search_query(domain: &Domain) -> String {
    format!("top competitors of {}", domain)
}

/// Build the prompt sent to the suggestion model.
///
/// Known competitors switch the request from broad market suggestions to a
/// smaller set of similar businesses.
pub fn build_suggestion_prompt(domain: &Domain, known: &[Domain]) -> String {
    if known.is_empty() {
        format!(
            "Suggest {} potential competitors for {} based on general market trends. \
             Respond only with a comma-separated list of bare domain names.",
            MARKET_SUGGESTION_COUNT, domain
        )
    } else {
        let known_list = known
            .iter()
            .map(Domain::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Given these known competitors: {}, suggest {} similar competitors for {}. \
             Respond only with a comma-separated list of bare domain names.",
            known_list, SIMILAR_SUGGESTION_COUNT, domain
        )
    }
}

/// Split a model reply into trimmed, lower-cased fragments.
pub fn parse_suggestions(reply: &str) -> Vec<String> {
    reply
        .split(',')
        .map(|fragment| fragment.trim().to_lowercase())
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Union of search hostnames and suggestions, each domain kept once.
///
/// Search-derived domains come first; the first occurrence decides provenance.
pub fn merge_candidates(links: &[String], suggestions: &[String]) -> Vec<CompetitorCandidate> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    let from_search = links.iter().filter_map(|link| {
        let host = extract_host(link);
        if host.is_none() {
            debug!(link = %link, "skipping search result without a usable host");
        }
        host.map(|h| (h, Provenance::Search))
    });
    let from_suggestion = suggestions
        .iter()
        .map(|s| (s.trim().to_string(), Provenance::Suggestion));

    for (domain, provenance) in from_search.chain(from_suggestion) {
        if domain.is_empty() || !seen.insert(domain.clone()) {
            continue;
        }
        merged.push(CompetitorCandidate { domain, provenance });
    }

    merged
}
