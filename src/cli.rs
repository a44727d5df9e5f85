// CLI module - command-line argument parsing and handlers
//
// Without a subcommand the interactive host runs. Subcommands:
// - fetch <ID>: mount a card headlessly, load one user, print the result
// - config --show | --path | --reset: configuration management

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::sync::Arc;
use user_card::api::HttpUserApi;
use user_card::card::{CustomElement, EventKind, UserCard, ATTR_THEME, ATTR_USER_ID};
use user_card::config::{Config, VERSION};

/// user-card - a self-loading user card
#[derive(Parser)]
#[command(name = "user-card")]
#[command(version = VERSION)]
#[command(about = "Load and display a user card", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load one user without the interactive host
    Fetch {
        /// User id to look up
        id: String,

        /// Print only the rendered markup
        #[arg(long)]
        markup_only: bool,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle `config` flags
pub fn handle_config(show: bool, reset: bool, path: bool) -> Result<()> {
    if path {
        let path = Config::config_path().context("Could not determine config path")?;
        println!("{}", path.display());
    } else if show {
        handle_config_show();
    } else if reset {
        handle_config_reset()?;
    } else {
        println!("Usage: user-card config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
    }
    Ok(())
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&path, Config::default().to_toml()).context("Failed to write config")?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

/// Mount a card, load one user and print what the host would observe
pub async fn handle_fetch(config: &Config, id: &str, markup_only: bool) -> Result<()> {
    let api = HttpUserApi::new(config.api_url.clone(), config.request_timeout())
        .context("Failed to create lookup client")?;

    let mut card = UserCard::new(Arc::new(api)).with_stale_policy(config.stale_responses);
    let mut events = card.subscribe();

    card.connected_callback();
    card.set_attribute(ATTR_THEME, config.theme.as_str());
    card.set_attribute(ATTR_USER_ID, id);
    card.run_until_idle().await;

    let mut failure = None;
    while let Ok(event) = events.try_recv() {
        if event.kind == EventKind::ErrorOccurred {
            failure = event.detail_json()["message"].as_str().map(str::to_string);
        }
        if !markup_only {
            println!("{} {}", event.kind.name(), event.detail_json());
        }
    }

    if !markup_only {
        println!();
    }
    print!("{}", card.shadow_root().inner_html());

    if let Some(message) = failure {
        bail!("Lookup for user {} failed: {}", id, message);
    }
    Ok(())
}
