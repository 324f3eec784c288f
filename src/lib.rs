//! Sagelytics - competitor discovery and pricing trends for e-commerce sellers
//!
//! The library discovers competitor domains from a web search and a
//! text-generation model, and turns seller and competitor prices into
//! chart-ready weekly series.

pub mod cli;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod domain;
pub mod pricing;
pub mod service;
pub mod utils;

pub use discovery::{CompetitorCandidate, CompetitorDiscoverer, Provenance, SearchSignal, SuggestionSignal};
pub use domain::{Domain, normalize};
pub use pricing::{Aggregator, ChartData, CompetitorPrices, PricingInput, PricingSeries, aggregate};
pub use service::{BusinessContext, DiscoveryReport, Sagelytics};
pub use utils::error::{AppError, AppResult};
