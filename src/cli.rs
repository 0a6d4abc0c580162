//! CLI commands implementation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;

use courselimit::{format_wait_time, FileStore, RateLimitConfig, RateLimiter};

#[derive(Parser)]
#[command(name = "courselimit")]
#[command(about = "Client-side rate limiting for AI course generation")]
#[command(version)]
pub struct Cli {
    /// State file (defaults to the per-user data directory)
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current rate limit status
    Status,
    /// Count one generation attempt against the limit
    Record,
    /// Reset to the never-attempted state
    Clear,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = RateLimitConfig::from_env();
    let store = FileStore::new(cli.state_file.unwrap_or_else(FileStore::default_path));
    let state_path = store.path().to_path_buf();
    let limiter = RateLimiter::new(Box::new(store), config);

    match cli.command {
        Commands::Status => {
            let status = limiter.check().await;
            if status.allowed {
                println!(
                    "{}: {} of {} generation(s) remaining",
                    style("allowed").green().bold(),
                    status.remaining_attempts,
                    limiter.config().max_attempts
                );
            } else {
                println!("{}", style("blocked").red().bold());
                if let Some(message) = &status.message {
                    println!("{}", message);
                }
            }
            if let Some(wait) = limiter.time_until_reset().await {
                println!("Resets in {}", format_wait_time(wait.as_secs() as i64));
            }
            println!("State file: {}", state_path.display());
        }
        Commands::Record => {
            let status = limiter.check().await;
            if !status.allowed {
                println!("{}", style("blocked").red().bold());
                if let Some(message) = &status.message {
                    println!("{}", message);
                }
                return Ok(());
            }

            let record = limiter.record().await;
            println!(
                "Recorded attempt {} of {}",
                record.attempts,
                limiter.config().max_attempts
            );
            if record.cooldown_start.is_some() {
                println!(
                    "{}: cooldown started",
                    style("limit reached").yellow().bold()
                );
            }
        }
        Commands::Clear => {
            limiter.clear().await;
            println!("Rate limit state cleared");
        }
    }

    Ok(())
}
