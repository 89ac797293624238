//! `postsync` binary.
//!
//! Registered as the site generator's post-build hook: `postsync sync`
//! runs after every build and republishes the full post corpus. `init` and
//! `test` exist for first-time setup.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use diagnostics::init_diagnostics;
use postsync::{Client, PostIndexer, SyncOptions, create_example_config, load_config};

#[derive(Parser)]
#[command(
    name = "postsync",
    version,
    about = "Push blog posts to a hosted search index"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an example configuration file
    Init {
        /// Config file to create
        #[arg(default_value = "postsync.yaml")]
        config: PathBuf,
    },
    /// Check the configured credentials against the hosted index
    Test {
        /// Config file to load
        #[arg(default_value = "postsync.yaml")]
        config: PathBuf,
    },
    /// Discover posts and push them to the index (post-build hook entry)
    Sync {
        /// Config file to load
        #[arg(default_value = "postsync.yaml")]
        config: PathBuf,
        /// Build and log records without publishing
        #[arg(long)]
        dry_run: bool,
        /// Abort on the first failure instead of continuing
        #[arg(long)]
        fail_fast: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_diagnostics();

    let cli = Cli::parse();
    match cli.command {
        Command::Init { config } => init_config(&config),
        Command::Test { config } => test_credentials(&config).await,
        Command::Sync {
            config,
            dry_run,
            fail_fast,
        } => sync(&config, dry_run, fail_fast).await,
    }
}

fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Configuration file already exists: {}", path.display());
        println!("Delete it first if you want to create a new one.");
        return Ok(());
    }

    create_example_config(path)
        .with_context(|| format!("Failed to create configuration file: {}", path.display()))?;

    println!("Created example configuration file: {}", path.display());
    println!();
    println!("Edit it to add your search index credentials:");
    println!("  - application_id: your application id");
    println!("  - api_key: a write-capable API key");
    println!("  - source_dir: the directory holding your markdown posts");
    println!();
    println!("Then run: postsync sync {}", path.display());
    Ok(())
}

async fn test_credentials(path: &Path) -> Result<()> {
    let config = load_or_suggest_init(path)?;

    println!(
        "Testing credentials for application {}",
        config.application_id
    );
    let client = Client::new(&config)?;
    match client.check_credentials().await {
        Ok(()) => {
            println!("✓ Credentials accepted - index API is responding");
            Ok(())
        }
        Err(e) => {
            println!("✗ Credential check failed");
            Err(anyhow::Error::new(e).context("Credential check failed"))
        }
    }
}

async fn sync(path: &Path, dry_run: bool, fail_fast: bool) -> Result<()> {
    let config = load_or_suggest_init(path)?;

    let indexer = PostIndexer::new(config)?;
    let options = SyncOptions { dry_run, fail_fast };
    let report = indexer.sync_with_options(&options).await?;

    println!(
        "Indexed {} of {} posts ({} failed, {} skipped)",
        report.indexed, report.discovered, report.failed, report.skipped
    );
    Ok(())
}

fn load_or_suggest_init(path: &Path) -> Result<postsync::SyncConfig> {
    if !path.exists() {
        println!("Configuration file not found: {}", path.display());
        println!("Run: postsync init {} to create one", path.display());
        anyhow::bail!("configuration file not found: {}", path.display());
    }

    load_config(path)
        .with_context(|| format!("Failed to load configuration from: {}", path.display()))
}
