use crate::commands::{chart, configure, discover, normalize};
use crate::config::{Config, OutputFormat};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sagelytics")]
#[command(about = "Discover e-commerce competitors and compare their pricing")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Commands {
    pub async fn execute(self, config: Config, config_path: &Path) -> Result<()> {
        match self {
            Commands::Discover(args) => {
                discover::handle_discover_command(&config, &args).await?;
            }
            Commands::Chart(args) => {
                chart::handle_chart_command(&config, &args)?;
            }
            Commands::Normalize(args) => {
                normalize::handle_normalize_command(&args)?;
            }
            Commands::Config(args) => {
                configure::handle_config_command(config, config_path, args.command)?;
            }
        }
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover competitors for a domain
    Discover(DiscoverArgs),

    /// Build weekly pricing trends from a pricing file
    Chart(ChartArgs),

    /// Print the normalized form of domains or URLs
    Normalize(NormalizeArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct DiscoverArgs {
    #[arg(help = "Your store's domain or URL")]
    pub domain: String,

    #[arg(long = "catalog-url", help = "URL of your product catalog")]
    pub catalog_url: String,

    #[arg(short = 'b', long = "business-type", default_value = "")]
    pub business_type: String,

    #[arg(short = 'k', long = "known", help = "Known competitor domain (repeatable)")]
    pub known: Vec<String>,

    #[arg(short, long, help = "Add discovered competitors to this pricing file")]
    pub output: Option<PathBuf>,

    #[arg(short, long, help = "Output format (overrides config)")]
    pub format: Option<OutputFormat>,
}

#[derive(Args)]
pub struct ChartArgs {
    #[arg(help = "Pricing file (JSON)")]
    pub input: PathBuf,

    #[arg(long, help = "Seed for reproducible trends")]
    pub seed: Option<u64>,

    #[arg(short, long, help = "Output format (overrides config)")]
    pub format: Option<OutputFormat>,
}

#[derive(Args)]
pub struct NormalizeArgs {
    #[arg(required = true, help = "Domains or URLs to normalize")]
    pub inputs: Vec<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_discover_args() {
        let cli = Cli::try_parse_from([
            "sagelytics",
            "discover",
            "www.x.com",
            "--catalog-url",
            "https://x.com/catalog",
            "-k",
            "a.com",
            "-k",
            "b.com",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Discover(args) => {
                assert_eq!(args.domain, "www.x.com");
                assert_eq!(args.catalog_url, "https://x.com/catalog");
                assert_eq!(args.known, vec!["a.com", "b.com"]);
                assert_eq!(args.format, Some(OutputFormat::Json));
                assert!(args.business_type.is_empty());
                assert!(args.output.is_none());
            }
            _ => panic!("expected discover command"),
        }
    }

    #[test]
    fn test_discover_requires_catalog_url() {
        assert!(Cli::try_parse_from(["sagelytics", "discover", "x.com"]).is_err());
    }

    #[test]
    fn test_parse_chart_args() {
        let cli =
            Cli::try_parse_from(["sagelytics", "-d", "chart", "prices.json", "--seed", "42"]).unwrap();

        assert!(cli.debug);
        match cli.command {
            Commands::Chart(args) => {
                assert_eq!(args.input, PathBuf::from("prices.json"));
                assert_eq!(args.seed, Some(42));
                assert!(args.format.is_none());
            }
            _ => panic!("expected chart command"),
        }
    }

    #[test]
    fn test_normalize_requires_input() {
        assert!(Cli::try_parse_from(["sagelytics", "normalize"]).is_err());
    }
}
