//! Pricing aggregation
//!
//! Builds chart-ready weekly price series for the seller and each tracked
//! competitor. Baselines come from real prices where they exist. The weekly
//! points are a simulated trend around that baseline, and competitors without
//! usable prices get a synthesized baseline near the seller's own.

pub mod input;

pub use input::{CompetitorPrices, PricingInput};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Assumed price point when the seller has no catalog data yet
pub const DEFAULT_BASELINE: f64 = 200.0;
pub const WEEKS: usize = 4;
pub const USER_SERIES_LABEL: &str = "Your Price";

const MAX_WEEKLY_VARIATION: f64 = 0.05;
const FLOOR_RATIO: f64 = 0.95;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSeries {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<PricingSeries>,
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    default_baseline: f64,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            default_baseline: DEFAULT_BASELINE,
        }
    }
}

impl Aggregator {
    pub fn new(default_baseline: f64) -> Self {
        Self { default_baseline }
    }

    /// Seller baseline: mean of their prices, or the default when they have none.
    pub fn user_baseline(&self, user_prices: &[f64]) -> f64 {
        mean(user_prices).unwrap_or(self.default_baseline)
    }

    pub fn aggregate<R: Rng + ?Sized>(
        &self,
        user_prices: &[f64],
        competitors: &[CompetitorPrices],
        rng: &mut R,
    ) -> ChartData {
        let user_baseline = self.user_baseline(user_prices);

        let mut baselines = Vec::with_capacity(competitors.len() + 1);
        baselines.push((USER_SERIES_LABEL.to_string(), user_baseline));
        for competitor in competitors {
            let baseline = competitor_baseline(&competitor.prices, user_baseline, rng);
            debug!(competitor = %competitor.domain, baseline, "competitor baseline");
            baselines.push((competitor.domain.clone(), baseline));
        }

        let datasets = baselines
            .into_iter()
            .enumerate()
            .map(|(index, (label, baseline))| {
                let (border_color, background_color) = series_colors(index);
                PricingSeries {
                    label,
                    data: generate_trend(baseline, rng),
                    border_color,
                    background_color,
                }
            })
            .collect();

        ChartData {
            labels: week_labels(),
            datasets,
        }
    }
}

/// Aggregate with the standard default baseline.
pub fn aggregate<R: Rng + ?Sized>(
    user_prices: &[f64],
    competitors: &[CompetitorPrices],
    rng: &mut R,
) -> ChartData {
    Aggregator::default().aggregate(user_prices, competitors, rng)
}

/// Competitor baseline from known prices.
///
/// Missing, non-finite and non-positive prices are ignored. With nothing left
/// the baseline is drawn uniformly within ±10% of the seller's baseline.
pub fn competitor_baseline<R: Rng + ?Sized>(
    known_prices: &[Option<f64>],
    user_baseline: f64,
    rng: &mut R,
) -> f64 {
    let valid: Vec<f64> = known_prices
        .iter()
        .flatten()
        .copied()
        .filter(|p| p.is_finite() && *p > 0.0)
        .collect();

    match mean(&valid) {
        Some(baseline) => baseline,
        None => {
            let r: f64 = rng.r#gen();
            user_baseline * (0.9 + r * 0.2)
        }
    }
}

/// Four weekly points fluctuating around `baseline`.
///
/// The floor at 95% of baseline matches the variation range, so it only
/// binds at the boundary.
pub fn generate_trend<R: Rng + ?Sized>(baseline: f64, rng: &mut R) -> Vec<f64> {
    (0..WEEKS)
        .map(|_| {
            let variation = rng.gen_range(-MAX_WEEKLY_VARIATION..MAX_WEEKLY_VARIATION);
            let price = (baseline * (1.0 + variation)).max(baseline * FLOOR_RATIO);
            round_cents(price)
        })
        .collect()
}

pub fn week_labels() -> Vec<String> {
    (1..=WEEKS).map(|week| format!("Week {}", week)).collect()
}

/// Border and background colors for the series at `index`.
pub fn series_colors(index: usize) -> (String, String) {
    let i = (index % 256) as u32;
    let r = (54 + 67 * i) % 256;
    let g = (162 + 43 * i) % 256;
    let b = (235 + 97 * i) % 256;
    (
        format!("rgb({}, {}, {})", r, g, b),
        format!("rgba({}, {}, {}, 0.5)", r, g, b),
    )
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
