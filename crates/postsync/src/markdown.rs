//! Markdown rendering and plain-text extraction for index records.
//!
//! Rendering uses pulldown-cmark with GFM extensions (tables,
//! strikethrough, task lists). Raw HTML blocks pass through unchanged per
//! the CommonMark spec; post sources are trusted.

use pulldown_cmark::{Options, Parser, html::push_html};

/// Render markdown to HTML.
pub fn render_markdown(content: &str) -> String {
    let options =
        Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS | Options::ENABLE_TABLES;

    let parser = Parser::new_ext(content, options);

    let mut html = String::with_capacity(content.len() * 2);
    push_html(&mut html, parser);
    html
}

/// Strip tags from rendered HTML, producing index-friendly text.
///
/// Tag contents are dropped, the five standard entities are decoded, and
/// whitespace runs collapse to single spaces. Block separation survives via
/// the newlines the renderer emits between blocks; inline tags introduce no
/// spaces, so emphasis inside a word does not split it.
pub fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            // Unterminated tag: drop the remainder.
            None => {
                rest = "";
                break;
            }
        }
    }
    text.push_str(rest);

    collapse_whitespace(&decode_entities(&text))
}

/// Plain-text rendering of a markdown body: render to HTML, then strip.
pub fn plain_text(content: &str) -> String {
    strip_html(&render_markdown(content))
}

/// Decode the entities pulldown-cmark escapes in text content.
/// `&amp;` must come last so `&amp;lt;` decodes to `&lt;`, not `<`.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown() {
        let html = render_markdown("**Hi**");
        assert_eq!(html, "<p><strong>Hi</strong></p>\n");
    }

    #[test]
    fn test_render_markdown_gfm_table() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_plain_text_strips_emphasis() {
        assert_eq!(plain_text("**Hi**"), "Hi");
    }

    #[test]
    fn test_plain_text_joins_blocks_with_single_spaces() {
        let text = plain_text("# Title\n\nFirst paragraph.\n\nSecond paragraph.\n");
        assert_eq!(text, "Title First paragraph. Second paragraph.");
    }

    #[test]
    fn test_plain_text_keeps_words_intact_across_inline_tags() {
        assert_eq!(plain_text("re*do*ne"), "redone");
    }

    #[test]
    fn test_plain_text_decodes_entities() {
        assert_eq!(plain_text("a & b < c"), "a & b < c");
    }

    #[test]
    fn test_plain_text_collapses_whitespace() {
        assert_eq!(plain_text("one\n\n\ntwo   three"), "one two three");
    }

    #[test]
    fn test_strip_html_drops_raw_html() {
        let text = plain_text("before\n\n<div class=\"x\">inside</div>\n\nafter");
        assert_eq!(text, "before inside after");
    }

    #[test]
    fn test_strip_html_links_keep_anchor_text() {
        assert_eq!(plain_text("[a link](https://example.com)"), "a link");
    }
}
