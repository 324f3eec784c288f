use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prices for one tracked competitor. Entries may be null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorPrices {
    pub domain: String,
    #[serde(default)]
    pub prices: Vec<Option<f64>>,
}

/// Pricing data read by the `chart` command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingInput {
    #[serde(default)]
    pub user_prices: Vec<f64>,
    #[serde(default)]
    pub competitors: Vec<CompetitorPrices>,
}

impl PricingInput {
    /// Tracking entries for freshly discovered competitors, with no prices yet.
    /// Repeated domains are kept once.
    pub fn from_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut input = Self::default();
        input.merge_competitors(domains);
        input
    }

    /// Add competitors not already tracked, keeping existing price data.
    pub fn merge_competitors<I, S>(&mut self, domains: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = 0;
        for domain in domains {
            let domain = domain.into();
            if self.competitors.iter().any(|c| c.domain == domain) {
                continue;
            }
            self.competitors.push(CompetitorPrices {
                domain,
                prices: Vec::new(),
            });
            added += 1;
        }
        added
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        serde_json::from_str(&content).map_err(|e| {
            AppError::Validation(format!("Invalid pricing file {}: {}", path.display(), e))
        })
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Io(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::System(format!("Failed to serialize pricing data: {}", e)))?;

        std::fs::write(path, content).map_err(|e| AppError::Io(e.to_string()))
    }
}
