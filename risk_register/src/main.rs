//! Main entry point for the Risk Register CLI.

use anyhow::Result;
use clap::Parser;
use risk_register::{cli, server, settings::Settings, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = cli::Cli::parse();

    // Load settings
    let mut settings = Settings::load(args.config.as_deref())?;

    match args.command {
        cli::Commands::Serve { addr } => {
            if let Some(addr) = addr {
                settings.server.host = addr.ip().to_string();
                settings.server.port = addr.port();
                settings.validate()?;
            }

            telemetry::init(&settings.logging)?;
            server::serve(&settings).await
        }
        cli::Commands::Config => {
            print!("{}", toml::to_string_pretty(&settings)?);
            Ok(())
        }
    }
}
