//! Command-line interface definitions using clap derive API.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Risk Register CLI
#[derive(Parser)]
#[command(name = "risk-register")]
#[command(about = "An in-memory risk register served over HTTP")]
#[command(version)]
pub struct Cli {
    /// Configuration file layered over the built-in defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind to, overriding the configured host and port
        #[arg(long)]
        addr: Option<SocketAddr>,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_with_addr_override() {
        let cli = Cli::try_parse_from(["risk-register", "serve", "--addr", "127.0.0.1:9000"]).unwrap();
        match cli.command {
            Commands::Serve { addr } => {
                assert_eq!(addr, Some("127.0.0.1:9000".parse().unwrap()));
            }
            Commands::Config => panic!("expected serve"),
        }
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["risk-register", "config", "--config", "custom.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::Config));
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }
}
