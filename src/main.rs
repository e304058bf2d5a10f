//! Command-line front end for the alias allocator.
//!
//! # Usage
//!
//! ```bash
//! # Allocate (or reuse) an alias
//! cargo run -- shorten https://example.com/some/long/path
//!
//! # Reserve a custom alias
//! cargo run -- shorten https://example.com/docs --custom docs-2024
//!
//! # Look up and remove aliases
//! cargo run -- resolve docs-2024
//! cargo run -- remove docs-2024
//!
//! # Print the effective configuration
//! cargo run -- check
//! ```
//!
//! Configuration comes from the environment (and `.env`); see [`url_alias::config`].

use url_alias::bootstrap::build_shortener;
use url_alias::config::{self, Config};
use url_alias::error::AppError;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Short alias allocation tool.
#[derive(Parser)]
#[command(name = "url-alias")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate an alias for a target, reusing an existing one if present
    Shorten {
        /// Target URL
        url: String,

        /// Reserve this alias instead of deriving one
        #[arg(short, long)]
        custom: Option<String>,
    },

    /// Print the target of an alias
    Resolve { alias: String },

    /// Remove an alias that is still within its lock age
    Remove { alias: String },

    /// Validate and print the configuration
    Check,
}

#[derive(Serialize)]
struct AliasOutput<'a> {
    alias: &'a str,
    target: Option<&'a str>,
    removed: Option<bool>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    init_tracing(&config);

    if let Err(e) = run(cli, &config).await {
        match e.downcast_ref::<AppError>() {
            Some(app_error) => {
                eprintln!("{} {}", "Error:".red().bold(), app_error);
                eprintln!("  {} {}", "code:".dimmed(), app_error.code());
                std::process::exit(1);
            }
            None => return Err(e),
        }
    }

    Ok(())
}

async fn run(cli: Cli, config: &Config) -> Result<()> {
    match cli.command {
        Commands::Check => {
            config.print_summary();
            println!("{}", "Configuration OK".green());
        }
        Commands::Shorten { url, custom } => {
            let shortener = build_shortener(config).await?;
            let alias = match custom {
                Some(custom) => shortener.shorten_with_custom(&url, &custom).await?,
                None => shortener.shorten(&url).await?,
            };
            // Stored target, after unwrapping.
            let target = shortener.resolve(&alias).await?;
            let output = AliasOutput {
                alias: &alias,
                target: Some(target.as_str()),
                removed: None,
            };
            print_output(cli.json, &output, || {
                format!("{} → {}", alias.bright_blue().bold(), target)
            })?;
        }
        Commands::Resolve { alias } => {
            let shortener = build_shortener(config).await?;
            let target = shortener.resolve(&alias).await?;
            let output = AliasOutput {
                alias: &alias,
                target: Some(target.as_str()),
                removed: None,
            };
            print_output(cli.json, &output, || target.clone())?;
        }
        Commands::Remove { alias } => {
            let shortener = build_shortener(config).await?;
            let removed = shortener.remove(&alias).await?;
            let output = AliasOutput {
                alias: &alias,
                target: None,
                removed: Some(removed),
            };
            print_output(cli.json, &output, || {
                if removed {
                    format!("{} {}", "Removed".green(), alias)
                } else {
                    format!("{} {}", "No such alias:".yellow(), alias)
                }
            })?;
        }
    }

    Ok(())
}

fn print_output(json: bool, output: &AliasOutput<'_>, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(output)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
