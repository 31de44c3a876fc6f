// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ICT Eerbeek website server.
//!
//! This is the binary entry point: it loads configuration and dispatches to
//! the `serve`, `migrate`, `config` and `doctor` subcommands.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod doctor;
mod migrate;
mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eerbeek_config::model::EerbeekConfig;
use eerbeek_core::EerbeekError;
use tracing_subscriber::EnvFilter;

/// ICT Eerbeek website server.
#[derive(Parser, Debug)]
#[command(name = "eerbeek", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(short = 'c', long = "config", global = true, value_name = "FILE")]
    config_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web server (default).
    Serve,
    /// Create or upgrade the database schema and exit.
    Migrate,
    /// Print the effective configuration as TOML.
    Config,
    /// Run diagnostic checks.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config_path {
        Some(path) => eerbeek_config::load_and_validate_path(path),
        None => eerbeek_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            eerbeek_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.site.log_level);

    let outcome = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Migrate => migrate::run_migrate(&config.storage).await.map(|count| {
            println!(
                "eerbeek: schema up to date at {} ({count} submission(s) stored)",
                config.storage.database_path
            );
        }),
        Commands::Config => render_config(&config).map(|toml| print!("{toml}")),
        Commands::Doctor { plain } => {
            let failures = doctor::run_doctor(&config, plain).await;
            if failures > 0 {
                std::process::exit(2);
            }
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("eerbeek: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing for every subcommand. `RUST_LOG` overrides the
/// configured level. Logs go to stderr so `eerbeek config` output stays clean.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

fn default_filter(log_level: &str) -> EnvFilter {
    EnvFilter::new(format!("eerbeek={log_level},tower_http={log_level},warn"))
}

/// Effective configuration as TOML with the API key masked.
fn render_config(config: &EerbeekConfig) -> Result<String, EerbeekError> {
    let mut shown = config.clone();
    if shown.gemini.api_key.is_some() {
        shown.gemini.api_key = Some("********".to_string());
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| EerbeekError::Config(format!("failed to render configuration: {e}")))
}
