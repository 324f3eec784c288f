use crate::cli::ChartArgs;
use crate::config::{Config, OutputFormat};
use crate::pricing::{Aggregator, ChartData, PricingInput};
use crate::utils::DisplayFormatter;
use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub fn handle_chart_command(config: &Config, args: &ChartArgs) -> Result<()> {
    let input = PricingInput::load(&args.input)
        .with_context(|| format!("Failed to load pricing data from {}", args.input.display()))?;

    let aggregator = Aggregator::new(config.pricing.default_baseline);
    let chart = build_chart(&aggregator, &input, args.seed);

    match args.format.unwrap_or(config.general.format) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&chart).context("Failed to serialize chart")?;
            println!("{}", json);
        }
        OutputFormat::Table => DisplayFormatter::print_chart(&chart),
    }

    Ok(())
}

fn build_chart(aggregator: &Aggregator, input: &PricingInput, seed: Option<u64>) -> ChartData {
    match seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            aggregator.aggregate(&input.user_prices, &input.competitors, &mut rng)
        }
        None => aggregator.aggregate(&input.user_prices, &input.competitors, &mut rand::thread_rng()),
    }
}
