use crate::cli::ConfigCommands;
use crate::config::{Config, OPENAI_API_KEY_ENV, SERPER_API_KEY_ENV};
use crate::utils::print_success;
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

pub fn handle_config_command(
    config: Config,
    config_path: &Path,
    command: Option<ConfigCommands>,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) => handle_show_command(&config),
        Some(ConfigCommands::Path) => {
            println!("{}", config_path.display());
            Ok(())
        }
        Some(ConfigCommands::Reset) => handle_reset_command(config_path),
        None => handle_config_help(config_path),
    }
}

fn secret_status(configured: bool, env_var: &str) -> String {
    if configured {
        "✓ (config)".to_string()
    } else if std::env::var(env_var).is_ok() {
        format!("✓ ({})", env_var)
    } else {
        "not set".to_string()
    }
}

fn handle_show_command(config: &Config) -> Result<()> {
    println!("⚙️  Sagelytics Configuration");
    println!("==========================");

    println!("General:");
    println!("  Log level: {}", config.general.log_level);
    println!("  Color: {}", config.general.color);
    println!("  Format: {:?}", config.general.format);

    println!("Search:");
    println!("  Endpoint: {}", config.search.endpoint);
    println!(
        "  API key: {}",
        secret_status(config.search.api_key.is_some(), SERPER_API_KEY_ENV)
    );
    println!("  Country: {}", config.search.country);
    println!("  Language: {}", config.search.language);
    println!("  Timeout: {}s", config.search.timeout_secs);

    println!("LLM:");
    println!("  Endpoint: {}", config.llm.endpoint);
    println!(
        "  API key: {}",
        secret_status(config.llm.api_key.is_some(), OPENAI_API_KEY_ENV)
    );
    println!("  Model: {}", config.llm.model);
    println!("  Timeout: {}s", config.llm.timeout_secs);

    println!("Pricing:");
    println!("  Default baseline: {:.2}", config.pricing.default_baseline);

    Ok(())
}

fn handle_config_help(config_path: &Path) -> Result<()> {
    println!("⚙️  Configuration Management");
    println!("==========================");
    println!("Available configuration commands:");
    println!("  sagelytics config show    - Show current configuration");
    println!("  sagelytics config path    - Print the configuration file location");
    println!("  sagelytics config reset   - Reset configuration to defaults");
    println!();
    println!("Configuration file location: {}", config_path.display());
    Ok(())
}

fn handle_reset_command(config_path: &Path) -> Result<()> {
    if prompt_yes_no(
        "Are you sure you want to reset configuration to defaults? This will overwrite your current settings.",
    )? {
        Config::default()
            .save_to(config_path)
            .context("Failed to write default configuration")?;
        print_success("Configuration reset to defaults!");
    } else {
        println!("Reset cancelled.");
    }
    Ok(())
}

fn prompt_yes_no(question: &str) -> Result<bool> {
    print!("{} [y/N]: ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(parse_yes(&input))
}

fn parse_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yes() {
        assert!(parse_yes("y\n"));
        assert!(parse_yes(" YES "));
        assert!(!parse_yes(""));
        assert!(!parse_yes("no"));
    }

    #[test]
    fn test_secret_status_prefers_config() {
        assert_eq!(secret_status(true, "SAGELYTICS_UNUSED_TEST_VAR"), "✓ (config)");
        assert_eq!(secret_status(false, "SAGELYTICS_UNUSED_TEST_VAR"), "not set");
    }
}
