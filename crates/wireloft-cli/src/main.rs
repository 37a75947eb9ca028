//! Wireloft command-line interface
//!
//! Thin wrapper over `wireloft-core` for discovering DailyWire episodes
//! from a terminal.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wireloft_core::{Catalog, ClientConfig};

use crate::commands::Output;

/// Discover DailyWire show episodes through the Middleware API
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bearer token for premium content
    #[arg(long, env = "DAILYWIRE_ACCESS_TOKEN", hide_env_values = true, global = true)]
    access_token: Option<String>,

    /// Membership plan forwarded with show page requests
    #[arg(long, env = "DAILYWIRE_MEMBERSHIP_PLAN", global = true)]
    membership_plan: Option<String>,

    /// Middleware API root
    #[arg(long, value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30, global = true)]
    timeout: u64,

    /// Request rate limit; 0 disables throttling
    #[arg(long, value_name = "RATE", default_value_t = 2.0, global = true)]
    requests_per_second: f64,

    /// Print results as JSON
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose logging
    ///
    /// Specify twice for trace logging.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show-level operations
    Show {
        #[command(subcommand)]
        action: ShowAction,
    },
    /// Episode-level operations
    Episode {
        #[command(subcommand)]
        action: EpisodeAction,
    },
}

#[derive(Debug, Subcommand)]
enum ShowAction {
    /// Print show metadata and seasons
    Info { slug: String },
    /// Crawl every season and list all episodes
    Episodes { slug: String },
    /// Print the unprocessed show page
    Raw { slug: String },
}

#[derive(Debug, Subcommand)]
enum EpisodeAction {
    /// Print episode details
    Info { slug: String },
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig {
            requests_per_second: self.requests_per_second,
            timeout_secs: self.timeout,
            access_token: self.access_token.clone().filter(|t| !t.trim().is_empty()),
            membership_plan: self.membership_plan.clone().filter(|p| !p.trim().is_empty()),
            ..ClientConfig::default()
        };
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        config
    }
}

/// Log filter: `-v` flags win over `RUST_LOG`, which wins over `warn`.
fn log_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("wireloft_cli=debug,wireloft_core=debug"),
        _ => EnvFilter::new("wireloft_cli=trace,wireloft_core=trace"),
    }
}

fn init_logger(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let catalog = Catalog::with_config(cli.client_config()).context("failed to build HTTP client")?;
    let output = Output::from_flag(cli.json);

    let rendered = match &cli.command {
        Command::Show { action } => match action {
            ShowAction::Info { slug } => commands::show_info(&catalog, slug, output).await?,
            ShowAction::Episodes { slug } => commands::show_episodes(&catalog, slug, output).await?,
            ShowAction::Raw { slug } => commands::show_raw(&catalog, slug).await?,
        },
        Command::Episode { action } => match action {
            EpisodeAction::Info { slug } => commands::episode_info(&catalog, slug, output).await?,
        },
    };

    if !rendered.is_empty() {
        println!("{}", rendered);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_show_episodes_with_globals() {
        let cli = Cli::try_parse_from([
            "wireloft",
            "show",
            "episodes",
            "the-ben-shapiro-show",
            "--json",
            "-vv",
            "--requests-per-second",
            "0",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Command::Show { action: ShowAction::Episodes { ref slug } } if slug == "the-ben-shapiro-show"
        ));
        assert_eq!(cli.client_config().requests_per_second, 0.0);
    }

    #[test]
    fn test_parse_episode_info() {
        let cli = Cli::try_parse_from(["wireloft", "episode", "info", "ep-1"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Episode { action: EpisodeAction::Info { ref slug } } if slug == "ep-1"
        ));
        assert!(!cli.json);
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["wireloft", "show"]).is_err());
        assert!(Cli::try_parse_from(["wireloft"]).is_err());
    }

    #[test]
    fn test_client_config_from_flags() {
        let cli = Cli::try_parse_from([
            "wireloft",
            "--base-url",
            "http://localhost:9000/",
            "--timeout",
            "5",
            "--access-token",
            "jwt",
            "--membership-plan",
            "insider",
            "show",
            "info",
            "x",
        ])
        .unwrap();
        let config = cli.client_config();

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.access_token.as_deref(), Some("jwt"));
        assert_eq!(config.membership_plan.as_deref(), Some("insider"));
        assert_eq!(config.max_retries, ClientConfig::default().max_retries);
    }
}
