//! Page shell and rendering for the call-script server.
//!
//! The served page is a static rendering with no script attached: cards,
//! fields and filters do nothing in a browser. Interaction is only
//! available through the [`crate::page::Page`] API.

use crate::card::CardAssembler;
use crate::config::PageConfig;
use crate::models::ScriptRecord;
use crate::render::build_page;
use crate::text::html_escape;

use super::styles::STYLE;

// ============================================================================
// Base Template
// ============================================================================

pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    {content}
</body>
</html>"#,
        title = html_escape(title),
        STYLE = STYLE,
        content = content,
    )
}

// ============================================================================
// Script Page
// ============================================================================

/// Full HTML document for `records`, reset controls included.
pub fn render_page(records: &[ScriptRecord], config: &PageConfig) -> String {
    let mut doc = build_page(records, config);
    CardAssembler::new(config).attach(&mut doc);
    base_html("Call Scripts", &doc.inner_html(doc.root()))
}

/// Shown when the feed holds no records.
pub fn empty_page() -> String {
    base_html(
        "Call Scripts",
        r#"<main class="empty"><p>No scripts loaded.</p></main>"#,
    )
}
