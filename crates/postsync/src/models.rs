//! Wire records pushed to the hosted search index.

use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::frontmatter::FrontMatter;

/// One search record per post.
///
/// The hosted index upserts by `objectID`, so republishing a post replaces
/// its prior record rather than appending a duplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub title: String,
    /// Published URL of the post on the site.
    pub article_link: String,
    pub tags: Vec<String>,
    /// Plain-text body, whitespace collapsed.
    pub text: String,
    /// Unix timestamp: midnight UTC on the post's date.
    pub date: i64,
}

impl PostRecord {
    /// Build a record from parsed front matter and the rendered body text.
    ///
    /// Fails only on an unparseable date; everything else is derived
    /// deterministically from the title.
    pub fn from_parts(front: &FrontMatter, text: String) -> Result<Self> {
        Ok(PostRecord {
            object_id: object_id(&front.title),
            title: front.title.clone(),
            article_link: article_link(&front.title),
            tags: front.tag_list(),
            text,
            date: date_to_unix(&front.date)?,
        })
    }
}

/// Stable identifier for a post: base64 of the verbatim title. Encoding
/// keeps the id free of characters the index rejects while distinct titles
/// stay distinct.
pub fn object_id(title: &str) -> String {
    BASE64.encode(title)
}

/// Published URL for a post: lowercased title, spaces to hyphens.
///
/// Must match the permalink the site builder generates for the post; the
/// publisher does not verify this.
pub fn article_link(title: &str) -> String {
    format!("/{}.html", title.to_lowercase().replace(' ', "-"))
}

/// Parse a `YYYY-MM-DD` date as midnight UTC.
pub fn date_to_unix(date: &str) -> Result<i64> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid post date '{}'", date))?;
    Ok(day.and_time(NaiveTime::MIN).and_utc().timestamp())
}
