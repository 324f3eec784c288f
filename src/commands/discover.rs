use crate::cli::DiscoverArgs;
use crate::config::{Config, OutputFormat};
use crate::pricing::PricingInput;
use crate::service::{BusinessContext, Sagelytics};
use crate::utils::{DisplayFormatter, print_success, print_warning};
use anyhow::{Context, Result};
use std::path::Path;

pub async fn handle_discover_command(config: &Config, args: &DiscoverArgs) -> Result<()> {
    let sagelytics = Sagelytics::from_config(config).context("Failed to set up API clients")?;

    let context = BusinessContext {
        domain: args.domain.clone(),
        business_type: args.business_type.clone(),
        known_competitors: args.known.clone(),
        product_catalog_url: args.catalog_url.clone(),
    };

    let report = sagelytics.discover_competitors(&context).await?;

    match args.format.unwrap_or(config.general.format) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize discovery report")?;
            println!("{}", json);
        }
        OutputFormat::Table => DisplayFormatter::print_discovery(&report),
    }

    if let Some(path) = &args.output {
        let added = track_competitors(path, report.competitors())?;
        if added == 0 {
            print_warning("No new competitors to track");
        } else {
            print_success(&format!("Tracking {} new competitor(s) in {}", added, path.display()));
        }
    }

    Ok(())
}

/// Add discovered domains to a pricing file, creating it when missing.
fn track_competitors(path: &Path, competitors: Vec<String>) -> Result<usize> {
    let (input, added) = if path.exists() {
        let mut input = PricingInput::load(path)?;
        let added = input.merge_competitors(competitors);
        (input, added)
    } else {
        let input = PricingInput::from_domains(competitors);
        let added = input.competitors.len();
        (input, added)
    };

    input
        .save(path)
        .with_context(|| format!("Failed to write pricing file: {}", path.display()))?;
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_competitors_creates_and_extends_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracking.json");

        let added = track_competitors(&path, vec!["a.com".to_string(), "b.com".to_string()]).unwrap();
        assert_eq!(added, 2);

        let added = track_competitors(&path, vec!["b.com".to_string(), "c.com".to_string()]).unwrap();
        assert_eq!(added, 1);

        let input = PricingInput::load(&path).unwrap();
        let domains: Vec<_> = input.competitors.iter().map(|c| c.domain.as_str()).collect();
        assert_eq!(domains, vec!["a.com", "b.com", "c.com"]);
    }
}
