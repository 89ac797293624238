//! # postsync — blog post search-index sync
//!
//! Runs after a static site build: discovers markdown posts, parses their
//! front matter, renders bodies to plain text, and upserts one record per
//! post into a hosted search index.
//!
//! Publishing is best-effort. The index is a side channel, not something
//! the site depends on, so per-post failures are logged and counted rather
//! than aborting the run; an aggregate [`SyncReport`] is produced at the
//! end. `fail_fast` flips that policy for callers who want a hard stop.

pub mod client;
pub mod config;
pub mod frontmatter;
pub mod markdown;
pub mod models;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use diagnostics::*;

pub use crate::client::{Client, PublishError};
pub use crate::config::{SyncConfig, create_example_config, load_config};
pub use crate::frontmatter::FrontMatter;
pub use crate::models::PostRecord;

/// Options for a sync run.
#[derive(Debug, Default, Clone)]
pub struct SyncOptions {
    /// Abort on the first per-file failure instead of continuing.
    pub fail_fast: bool,
    /// Build and log records without publishing them.
    pub dry_run: bool,
}

/// Aggregate result of a sync run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Markdown files matched under the source directory.
    pub discovered: usize,
    /// Records accepted by the index (or built, under dry-run).
    pub indexed: usize,
    /// Records the index rejected or that never reached it.
    pub failed: usize,
    /// Files that could not be parsed into a record.
    pub skipped: usize,
}

/// Drives the post pipeline: discover, parse, render, build, publish.
pub struct PostIndexer {
    config: SyncConfig,
    client: Client,
}

impl PostIndexer {
    /// Create an indexer from explicit configuration.
    pub fn new(config: SyncConfig) -> Result<Self> {
        let client = Client::new(&config)?;
        Ok(Self { config, client })
    }

    /// Sync the full corpus with default options.
    pub async fn sync(&self) -> Result<SyncReport> {
        self.sync_with_options(&SyncOptions::default()).await
    }

    /// Sync the full corpus.
    ///
    /// Files are processed sequentially: each is fully read, parsed,
    /// rendered, and published before the next begins. Every run
    /// republishes every post; the index's upsert contract keeps that
    /// idempotent.
    pub async fn sync_with_options(&self, options: &SyncOptions) -> Result<SyncReport> {
        let fail_fast = options.fail_fast || self.config.fail_fast;
        let posts = self.discover_posts()?;
        let discovered = posts.len();
        let source_dir = &self.config.source_dir;
        info!("Syncing {discovered} posts from {source_dir}");

        let mut report = SyncReport {
            discovered,
            ..SyncReport::default()
        };

        for path in posts {
            let record = match self.build_record(&path) {
                Ok(record) => record,
                Err(e) => {
                    if fail_fast {
                        return Err(e.context(format!("while processing {}", path.display())));
                    }
                    let file = path.display().to_string();
                    let cause = format!("{e:#}");
                    warn!("Skipping {file}: {cause}");
                    report.skipped += 1;
                    continue;
                }
            };

            if options.dry_run {
                let object_id = &record.object_id;
                let link = &record.article_link;
                info!("Would index {object_id} -> {link}");
                report.indexed += 1;
                continue;
            }

            match self.client.save_object(&self.config.index, &record).await {
                Ok(saved) => {
                    let object_id = saved.object_id;
                    debug!("Indexed {object_id}");
                    report.indexed += 1;
                }
                Err(e) => {
                    if fail_fast {
                        return Err(anyhow::Error::new(e)
                            .context(format!("failed to publish {}", path.display())));
                    }
                    let file = path.display().to_string();
                    let cause = e.to_string();
                    warn!("Failed to publish {file}: {cause}");
                    report.failed += 1;
                }
            }
        }

        let indexed = report.indexed;
        let failed = report.failed;
        let skipped = report.skipped;
        info!("Indexed {indexed} of {discovered} posts ({failed} failed, {skipped} skipped)");

        Ok(report)
    }

    /// Enumerate markdown files matching the configured glob, sorted for a
    /// deterministic processing order.
    pub fn discover_posts(&self) -> Result<Vec<PathBuf>> {
        let source_dir = Path::new(&self.config.source_dir);
        if !source_dir.is_dir() {
            anyhow::bail!("source directory not found: {}", source_dir.display());
        }

        let glob = wax::Glob::new(&self.config.pattern)
            .map_err(|e| anyhow!("invalid glob pattern '{}': {}", self.config.pattern, e))?;

        let mut posts = Vec::new();
        for entry in glob.walk(source_dir) {
            let entry =
                entry.map_err(|e| anyhow!("failed to walk {}: {}", source_dir.display(), e))?;

            let path = entry.path();
            let md = std::fs::metadata(path)?;
            if !md.is_file() {
                continue;
            }

            posts.push(path.to_path_buf());
        }
        posts.sort();
        Ok(posts)
    }

    /// Read one post and build its index record.
    fn build_record(&self, path: &Path) -> Result<PostRecord> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let (front, body) = frontmatter::parse_document(&content)?;
        let text = markdown::plain_text(body);
        PostRecord::from_parts(&front, text)
    }
}
