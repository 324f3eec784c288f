use anyhow::Result;
use clap::Parser;

use sagelytics::cli::Cli;
use sagelytics::config::Config;
use sagelytics::utils::error::{AppError, report_error};
use sagelytics::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_file_path);
    let config = Config::load_custom(&config_path)?;

    logging::init(cli.debug, &config.general.log_level);
    if !config.general.color {
        colored::control::set_override(false);
    }

    if let Err(err) = cli.command.execute(config, &config_path).await {
        if let Some(app_err) = err.downcast_ref::<AppError>() {
            report_error(app_err);
            std::process::exit(1);
        }
        return Err(err);
    }

    Ok(())
}
