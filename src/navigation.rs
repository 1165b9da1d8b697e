//! Channel filter, module nav buttons and side navigation.

use crate::dom::{Document, NodeId};
use crate::models::{Channel, ChannelFilter};
use crate::render::NAV_CONTAINER_CLASS;

pub const ACTIVE: &str = "active";
const CARD_SUB_CLASS: &str = "script-card-sub";

// ============================================================================
// Channel Filter
// ============================================================================

/// Toggle a title block and the card container that follows it.
fn toggle_title(doc: &mut Document, title: NodeId, on: bool) {
    doc.toggle_class(title, ACTIVE, on);
    if let Some(card_sub) = doc.next_element_sibling(title) {
        if doc.has_class(card_sub, CARD_SUB_CLASS) {
            doc.toggle_class(card_sub, ACTIVE, on);
        }
    }
}

/// Show the title blocks of the selected channel(s). `None` (an unknown
/// selector value) hides every title.
pub fn update_titles(doc: &mut Document, filter: Option<ChannelFilter>) {
    for channel in [Channel::Chat, Channel::Voice] {
        let on = filter.is_some_and(|f| f.shows(channel));
        for title in doc.query_class(doc.root(), channel.title_class()) {
            toggle_title(doc, title, false);
            if on {
                toggle_title(doc, title, true);
            }
        }
    }
}

// ============================================================================
// Module Nav Buttons
// ============================================================================

/// Activate only the module matching the active nav button.
pub fn update_module(doc: &mut Document) {
    for module in doc.query_class(doc.root(), "script-module") {
        doc.remove_class(module, ACTIVE);
    }
    let Some(container) = doc.query_first_class(doc.root(), NAV_CONTAINER_CLASS) else {
        return;
    };
    let active_button = doc
        .query_class(container, "nav-btn")
        .into_iter()
        .find(|&b| doc.has_class(b, ACTIVE));
    let module_id = active_button
        .and_then(|b| doc.id_of(b))
        .map(|id| id.trim_end_matches("-nav").to_string());
    if let Some(module) = module_id.and_then(|id| doc.by_id(&id)) {
        doc.add_class(module, ACTIVE);
    }
}

/// Make `button` the only active nav button and show its module.
pub fn set_active_button(doc: &mut Document, button: NodeId) {
    for other in doc.query_class(doc.root(), "nav-btn") {
        doc.remove_class(other, ACTIVE);
    }
    doc.add_class(button, ACTIVE);
    update_module(doc);
}

// ============================================================================
// Side Navigation
// ============================================================================

/// Activate a side-nav item and the sub-page its button points at
/// (`<key>-page-action` -> `<key>-page`).
pub fn toggle_active_page(doc: &mut Document, nav_item: NodeId) {
    let target_id = doc
        .query_tag(nav_item, "button")
        .and_then(|b| doc.id_of(b))
        .map(|id| id.replace("-page-action", "-page"));

    for item in doc.query_class(doc.root(), "nav-item") {
        doc.remove_class(item, ACTIVE);
    }
    for page in doc.query_class(doc.root(), "sub-page") {
        doc.remove_class(page, ACTIVE);
    }

    doc.add_class(nav_item, ACTIVE);
    if let Some(page) = target_id.and_then(|id| doc.by_id(&id)) {
        doc.add_class(page, ACTIVE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::models::{ScriptCard, ScriptRecord};
    use crate::render::build_page;

    fn record(id: &str, category: Channel, title: &str) -> ScriptRecord {
        ScriptRecord {
            id: id.to_string(),
            category,
            title: title.to_string(),
            description: String::new(),
            cards: vec![ScriptCard {
                content: "Hello".to_string(),
            }],
        }
    }

    fn page() -> Document {
        build_page(
            &[
                record("opening", Channel::Chat, "Chat greeting"),
                record("opening", Channel::Voice, "Voice greeting"),
                record("closing", Channel::Chat, "Chat goodbye"),
            ],
            &PageConfig::default(),
        )
    }

    fn active_titles(doc: &Document) -> Vec<String> {
        ["script-title-chat", "script-title-voice"]
            .iter()
            .flat_map(|class| doc.query_class(doc.root(), class))
            .filter(|&t| doc.has_class(t, ACTIVE))
            .map(|t| doc.text_content(doc.query_tag(t, "h4").unwrap()))
            .collect()
    }

    #[test]
    fn test_update_titles_by_channel() {
        let mut doc = page();
        update_titles(&mut doc, ChannelFilter::parse("voice"));
        assert_eq!(active_titles(&doc), vec!["Voice greeting"]);

        let voice = doc.query_first_class(doc.root(), "script-title-voice").unwrap();
        let card_sub = doc.next_element_sibling(voice).unwrap();
        assert!(doc.has_class(card_sub, ACTIVE));

        update_titles(&mut doc, ChannelFilter::parse("all"));
        assert_eq!(active_titles(&doc).len(), 3);

        update_titles(&mut doc, None);
        assert!(active_titles(&doc).is_empty());
    }

    #[test]
    fn test_set_active_button_switches_module() {
        let mut doc = page();
        let closing_btn = doc.by_id("closing-nav").unwrap();
        set_active_button(&mut doc, closing_btn);

        assert!(doc.has_class(closing_btn, ACTIVE));
        assert!(!doc.has_class(doc.by_id("opening-nav").unwrap(), ACTIVE));
        assert!(doc.has_class(doc.by_id("closing").unwrap(), ACTIVE));
        assert!(!doc.has_class(doc.by_id("opening").unwrap(), ACTIVE));
    }

    #[test]
    fn test_toggle_active_page() {
        let mut doc = page();
        let items = doc.query_class(doc.root(), "nav-item");
        toggle_active_page(&mut doc, items[1]);
        assert!(doc.has_class(items[1], ACTIVE));
        assert!(!doc.has_class(items[0], ACTIVE));
        assert!(doc.has_class(doc.by_id("guide-page").unwrap(), ACTIVE));
        assert!(!doc.has_class(doc.by_id("scripts-page").unwrap(), ACTIVE));
    }
}
