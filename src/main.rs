// user-card - host binary for the user card element
//
// Architecture:
// - Card (library): state store, lifecycle controller, renderer, events
// - Lookup API: reqwest client behind the UserApi trait
// - TUI (ratatui): interactive host page that mounts one card
// - Fetch subcommand: headless one-shot load for scripting

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use user_card::config::Config;
use user_card::logging::{self, LogBuffer};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { show, reset, path }) = cli.command {
        return cli::handle_config(show, reset, path);
    }

    Config::ensure_config_exists();
    let mut config = Config::from_env();

    // The fetch subcommand always logs to stdout
    if matches!(cli.command, Some(Commands::Fetch { .. })) {
        config.enable_tui = false;
    }

    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init_tracing(&config.logging, config.enable_tui, &log_buffer);

    tracing::debug!(
        "Config: api_url={}, theme={}, stale_responses={}",
        config.api_url,
        config.theme.as_str(),
        config.stale_responses.as_str()
    );

    match cli.command {
        Some(Commands::Fetch { id, markup_only }) => {
            cli::handle_fetch(&config, &id, markup_only).await
        }
        _ if config.enable_tui => {
            tracing::info!("Starting TUI");
            user_card::tui::run_tui(config, log_buffer)
                .await
                .context("Terminal host failed")
        }
        _ => {
            tracing::info!("TUI disabled; use `user-card fetch <ID>` for headless lookups");
            Ok(())
        }
    }
}
