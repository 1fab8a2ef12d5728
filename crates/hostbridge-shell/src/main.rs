//! Hostbridge shell binary.
//!
//! # Usage
//!
//! ```bash
//! # In-memory remember-me record
//! hostbridge-shell
//!
//! # Persist the remember-me record between runs
//! hostbridge-shell --store ~/.config/hostbridge/store.json
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use hostbridge_core::{FileStore, MemoryStore, PendingPolicy, TranslationCache};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Batch translation reply policy.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// A batch reply clears every pending key.
    ClearAll,
    /// A batch reply clears only the keys it answered.
    ClearReplied,
}

impl From<PolicyArg> for PendingPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::ClearAll => Self::ClearAll,
            PolicyArg::ClearReplied => Self::ClearReplied,
        }
    }
}

/// Headless UI/host bridge shell
#[derive(Parser, Debug)]
#[command(name = "hostbridge-shell")]
#[command(about = "Drive the login bridge over stdio")]
#[command(version)]
struct Args {
    /// JSON file backing the remember-me record
    ///
    /// If not provided, the record lives in memory for this run only.
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// What a batch translation reply does to unanswered keys
    #[arg(long, value_enum, default_value = "clear-all")]
    pending_policy: PolicyArg,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();

    let cache = TranslationCache::with_policy(args.pending_policy.into());

    match args.store {
        Some(path) => {
            tracing::info!(path = %path.display(), "using file store");
            hostbridge_shell::run(FileStore::open(path)?, cache).await?;
        },
        None => hostbridge_shell::run(MemoryStore::new(), cache).await?,
    }

    Ok(())
}
