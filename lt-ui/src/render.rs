//! Server-side HTML rendering for text cards and tag badges
//!
//! Pure functions of their input values: no fetching, no mutation, no error
//! handling. Callers pass already-fetched data.

use lt_common::models::{TagWithConfidence, TextWithTags};

/// Escape text for embedding in HTML element content
///
/// Newlines are left untouched; the `.text-content` style uses
/// `white-space: pre-wrap` so they render as line breaks.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render one tag badge: the tag name annotated with its confidence
///
/// Confidence is shown with two decimal places, passed through unvalidated.
pub fn render_tag_badge(tag: &TagWithConfidence) -> String {
    format!(
        "<span class=\"tag-badge\">{} <span class=\"tag-confidence\">{:.2}</span></span>",
        escape_html(&tag.name),
        tag.confidence
    )
}

/// Render one text with its tags as a self-contained card
///
/// The badge region is omitted entirely when there are no tags. Badges keep
/// the order of the supplied collection; nothing re-sorts by confidence or
/// name.
pub fn render_text_card(text: &TextWithTags) -> String {
    let mut card = String::new();
    card.push_str("<div class=\"text-card\">\n");
    card.push_str(&format!(
        "  <p class=\"text-content\">{}</p>\n",
        escape_html(&text.content)
    ));

    if !text.tags.is_empty() {
        card.push_str("  <div class=\"tag-list\">");
        for tag in &text.tags {
            card.push_str(&render_tag_badge(tag));
        }
        card.push_str("</div>\n");
    }

    card.push_str("</div>");
    card
}

/// Render the full texts page around the cards
pub fn render_texts_page(texts: &[TextWithTags]) -> String {
    let cards: Vec<String> = texts.iter().map(render_text_card).collect();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Living Tags - Texts</title>
<style>
body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }}
.text-card {{ border: 1px solid #ddd; border-radius: 0.5rem; padding: 1.5rem; margin-bottom: 1rem; }}
.text-content {{ white-space: pre-wrap; line-height: 1.6; margin: 0 0 1rem 0; }}
.tag-list {{ display: flex; flex-wrap: wrap; gap: 0.5rem; }}
.tag-badge {{ background: #eef; border-radius: 1rem; padding: 0.2rem 0.7rem; font-size: 0.85rem; }}
.tag-confidence {{ color: #667; font-size: 0.75rem; }}
</style>
</head>
<body>
<h1>Texts</h1>
<a href="/">Home</a>
{}
</body>
</html>
"#,
        cards.join("\n")
    )
}
