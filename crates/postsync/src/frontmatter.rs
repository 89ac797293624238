//! Front matter extraction for markdown posts.
//!
//! Posts carry a small YAML header between `---` fences:
//!
//! ```text
//! ---
//! title: Hello World
//! tags: a,b
//! date: 2020-01-01
//! ---
//!
//! Body text.
//! ```

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// Metadata header of a single post.
#[derive(Debug, Clone, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    /// Comma-joined tag list; split with [`FrontMatter::tag_list`].
    pub tags: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
}

impl FrontMatter {
    /// Split the comma-joined `tags` value into an ordered tag list.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Split a document into its front matter and body.
///
/// The header must open with a `---` fence on the first non-blank line and
/// close with a matching `---` fence. The YAML between the fences must
/// carry `title`, `tags`, and `date`; anything after the closing fence is
/// the body, with leading blank lines stripped.
pub fn parse_document(content: &str) -> Result<(FrontMatter, &str)> {
    let trimmed = content.trim_start();
    let rest = trimmed
        .strip_prefix("---")
        .ok_or_else(|| anyhow!("missing opening --- front matter fence"))?;

    let close = rest
        .find("\n---")
        .ok_or_else(|| anyhow!("missing closing --- front matter fence"))?;
    let yaml = &rest[..close];

    // Skip the rest of the closing fence line, then leading blank lines.
    let mut body = &rest[close + 4..];
    match body.find('\n') {
        Some(nl) => body = &body[nl + 1..],
        None => body = "",
    }
    let body = body.trim_start_matches('\n');

    let front: FrontMatter =
        serde_yaml_ng::from_str(yaml).context("front matter is not valid YAML")?;

    Ok((front, body))
}
