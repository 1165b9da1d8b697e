//! Page builder: turns script records into the page tree.
//!
//! Produces the page skeleton (channel selector, name inputs, search box,
//! side navigation, sub-pages) and fills the script area with nav buttons
//! and script modules. Card placeholders become editable
//! `span.manual-edit` fields carrying their `data-default-text`.

use crate::config::PageConfig;
use crate::dom::{Document, NodeId};
use crate::feed::parse_content;
use crate::models::{group_modules, module_ids, ContentSegment, ScriptRecord, OPENING_MODULE};
use crate::text::capitalize;

pub const CHANNEL_SELECT_ID: &str = "channel-selection";
pub const SEARCH_INPUT_ID: &str = "search-input";
pub const SEARCH_BUTTON_ID: &str = "search-action";
pub const NAV_CONTAINER_CLASS: &str = "script-nav-container";
pub const CANVAS_CLASS: &str = "script-canvas";

/// Side-navigation sub-pages: (key, label). The first one is active.
pub const SUB_PAGES: &[(&str, &str)] = &[("scripts", "Scripts"), ("guide", "Guide")];

const GUIDE_TEXT: &[&str] = &[
    "Click a highlighted field to type into it; fields with the same label update together.",
    "Click a card to jump to its next empty field, or to copy it once every field is filled.",
    "Reset clears a card's fields. The agent name is kept.",
];

// ============================================================================
// Page Skeleton
// ============================================================================

/// Build the whole page for `records`.
pub fn build_page(records: &[ScriptRecord], config: &PageConfig) -> Document {
    let mut doc = Document::new();
    let root = doc.root();

    build_header(&mut doc, root, config);

    let layout = doc.create_element(root, "div");
    doc.add_class(layout, "layout");
    build_side_nav(&mut doc, layout);

    let main = doc.create_element(layout, "main");
    for (i, (key, label)) in SUB_PAGES.iter().enumerate() {
        let page = doc.create_element(main, "section");
        doc.set_attr(page, "id", &format!("{}-page", key));
        doc.add_class(page, "sub-page");
        if i == 0 {
            doc.add_class(page, "active");
        }
        if *key == "scripts" {
            let nav = doc.create_element(page, "div");
            doc.add_class(nav, NAV_CONTAINER_CLASS);
            let canvas = doc.create_element(page, "div");
            doc.add_class(canvas, CANVAS_CLASS);
            generate_nav_buttons(&mut doc, nav, records);
            generate_script_modules(&mut doc, canvas, records, config);
        } else {
            let heading = doc.create_element(page, "h2");
            doc.append_text(heading, label);
            let list = doc.create_element(page, "ul");
            for line in GUIDE_TEXT {
                let item = doc.create_element(list, "li");
                doc.append_text(item, line);
            }
        }
    }

    doc
}

fn build_header(doc: &mut Document, root: NodeId, config: &PageConfig) {
    let header = doc.create_element(root, "header");
    doc.add_class(header, "page-header");

    let title = doc.create_element(header, "h1");
    doc.append_text(title, "Call Scripts");

    let select = doc.create_element(header, "select");
    doc.set_attr(select, "id", CHANNEL_SELECT_ID);
    doc.set_attr(select, "aria-label", "Channel");
    for (value, label) in [("all", "All"), ("chat", "Chat"), ("voice", "Voice")] {
        let option = doc.create_element(select, "option");
        doc.set_attr(option, "value", value);
        doc.append_text(option, label);
    }
    doc.set_value(select, "all");

    let names = doc.create_element(header, "div");
    doc.add_class(names, "name-inputs");
    for binding in &config.input_bindings {
        let input = doc.create_element(names, "input");
        doc.set_attr(input, "id", &binding.input_id);
        doc.set_attr(input, "type", "text");
        doc.set_attr(input, "placeholder", &binding.default_text);
        doc.set_attr(input, "aria-label", &binding.default_text);
    }

    let search = doc.create_element(header, "div");
    doc.add_class(search, "search-box");
    let input = doc.create_element(search, "input");
    doc.set_attr(input, "id", SEARCH_INPUT_ID);
    doc.set_attr(input, "type", "search");
    doc.set_attr(input, "placeholder", "Search scripts...");
    let button = doc.create_element(search, "button");
    doc.set_attr(button, "id", SEARCH_BUTTON_ID);
    doc.append_text(button, "Search");
}

fn build_side_nav(doc: &mut Document, parent: NodeId) {
    let aside = doc.create_element(parent, "aside");
    doc.add_class(aside, "side-nav");
    for (i, (key, label)) in SUB_PAGES.iter().enumerate() {
        let item = doc.create_element(aside, "div");
        doc.add_class(item, "nav-item");
        if i == 0 {
            doc.add_class(item, "active");
        }
        let button = doc.create_element(item, "button");
        doc.set_attr(button, "id", &format!("{}-page-action", key));
        doc.set_attr(button, "aria-label", label);
        let initial: String = label.chars().take(1).collect();
        doc.append_text(button, &initial);
        let tooltip = doc.create_element(item, "span");
        doc.add_class(tooltip, "nav-tooltip");
        doc.append_text(tooltip, label);
    }
}

// ============================================================================
// Script Area
// ============================================================================

/// Replace the nav container's buttons with one per module id.
pub fn generate_nav_buttons(doc: &mut Document, container: NodeId, records: &[ScriptRecord]) {
    doc.clear_children(container);
    for id in module_ids(records) {
        let button = doc.create_element(container, "button");
        doc.set_attr(button, "id", &format!("{}-nav", id));
        doc.add_class(button, "nav-btn");
        if id == OPENING_MODULE {
            doc.add_class(button, "active");
        }
        doc.append_text(button, &capitalize(id));
    }
}

/// Append one `script-module` per module id to the canvas.
pub fn generate_script_modules(
    doc: &mut Document,
    canvas: NodeId,
    records: &[ScriptRecord],
    config: &PageConfig,
) {
    for module in group_modules(records) {
        let opening = module.id == OPENING_MODULE;
        let module_div = doc.create_element(canvas, "div");
        doc.add_class(module_div, "script-module");
        doc.set_attr(module_div, "id", module.id);
        if opening {
            doc.add_class(module_div, "active");
        }

        for record in module.records {
            let title = doc.create_element(module_div, "div");
            doc.add_class(title, record.category.title_class());
            if opening {
                doc.add_class(title, "active");
            }
            let heading = doc.create_element(title, "h4");
            doc.append_text(heading, &record.title);
            let description = doc.create_element(title, "p");
            doc.append_text(description, &record.description);

            let card_sub = doc.create_element(module_div, "div");
            doc.add_class(card_sub, "script-card-sub");
            if opening {
                doc.add_class(card_sub, "active");
            }
            for card in &record.cards {
                let card_div = doc.create_element(card_sub, "div");
                doc.add_class(card_div, &config.classes.card);
                append_card_content(doc, card_div, &card.content, config);
            }
        }
    }
}

/// Fill a card with its content, turning placeholders into editable spans.
pub fn append_card_content(doc: &mut Document, card: NodeId, content: &str, config: &PageConfig) {
    for segment in parse_content(content) {
        match segment {
            ContentSegment::Text(text) => {
                doc.append_text(card, &text);
            }
            ContentSegment::Placeholder(placeholder) => {
                let span = doc.create_element(card, "span");
                doc.add_class(span, &config.classes.editable_field);
                doc.set_attr(span, "data-default-text", &placeholder);
                doc.append_text(span, &placeholder);
            }
            ContentSegment::LineBreak => {
                doc.create_element(card, "br");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Channel, ScriptCard};

    fn records() -> Vec<ScriptRecord> {
        vec![
            ScriptRecord {
                id: "closing".to_string(),
                category: Channel::Voice,
                title: "Goodbye".to_string(),
                description: "End the call".to_string(),
                cards: vec![ScriptCard {
                    content: "Thanks [Cx Name]".to_string(),
                }],
            },
            ScriptRecord {
                id: "opening".to_string(),
                category: Channel::Chat,
                title: "Greeting".to_string(),
                description: "Say hi".to_string(),
                cards: vec![
                    ScriptCard {
                        content: "Hi [Cx Name], I'm [Agent Name].".to_string(),
                    },
                    ScriptCard {
                        content: "How can I help?".to_string(),
                    },
                ],
            },
        ]
    }

    #[test]
    fn test_nav_buttons_opening_first_and_active() {
        let doc = build_page(&records(), &PageConfig::default());
        let buttons = doc.query_class(doc.root(), "nav-btn");
        let ids: Vec<&str> = buttons.iter().filter_map(|&b| doc.id_of(b)).collect();
        assert_eq!(ids, vec!["opening-nav", "closing-nav"]);
        assert!(doc.has_class(buttons[0], "active"));
        assert!(!doc.has_class(buttons[1], "active"));
        assert_eq!(doc.text_content(buttons[0]), "Opening");
    }

    #[test]
    fn test_modules_and_cards() {
        let doc = build_page(&records(), &PageConfig::default());
        let opening = doc.by_id("opening").unwrap();
        assert!(doc.has_class(opening, "active"));
        let closing = doc.by_id("closing").unwrap();
        assert!(!doc.has_class(closing, "active"));

        let title = doc.query_first_class(opening, "script-title-chat").unwrap();
        let card_sub = doc.next_element_sibling(title).unwrap();
        assert!(doc.has_class(card_sub, "script-card-sub"));
        assert_eq!(doc.query_class(card_sub, "card-module").len(), 2);
    }

    #[test]
    fn test_placeholders_become_fields() {
        let doc = build_page(&records(), &PageConfig::default());
        let fields = doc.query_class(doc.root(), "manual-edit");
        let defaults: Vec<&str> = fields
            .iter()
            .filter_map(|&f| doc.attr(f, "data-default-text"))
            .collect();
        assert_eq!(defaults, vec!["[Cx Name]", "[Cx Name]", "[Agent Name]"]);
        assert_eq!(doc.text_content(fields[2]), "[Agent Name]");
    }

    #[test]
    fn test_skeleton_has_inputs_and_sub_pages() {
        let doc = build_page(&[], &PageConfig::default());
        assert!(doc.by_id("customer").is_some());
        assert!(doc.by_id("user").is_some());
        assert!(doc.by_id(SEARCH_INPUT_ID).is_some());
        assert_eq!(doc.value(doc.by_id(CHANNEL_SELECT_ID).unwrap()), "all");
        let scripts = doc.by_id("scripts-page").unwrap();
        assert!(doc.has_class(scripts, "active"));
        assert!(!doc.has_class(doc.by_id("guide-page").unwrap(), "active"));
    }

    #[test]
    fn test_titles_are_escaped_in_markup() {
        let mut recs = records();
        recs[1].title = "<b>Greeting</b>".to_string();
        let doc = build_page(&recs, &PageConfig::default());
        let html = doc.inner_html(doc.root());
        assert!(html.contains("&lt;b&gt;Greeting&lt;/b&gt;"));
    }
}
