//! Script title search.
//!
//! Matches the search term (trimmed, case-insensitive substring) against
//! the heading of every title block, chat titles first, then voice. A
//! match activates the title, its card container and its module.

use crate::dom::{Document, NodeId};
use crate::models::{Channel, ChannelFilter};
use crate::navigation::{update_module, update_titles, ACTIVE};
use crate::render::{CHANNEL_SELECT_ID, SEARCH_INPUT_ID};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Empty term: the default view was restored.
    Restored,
    /// Titles that matched: chat titles in page order, then voice titles.
    Matches(Vec<NodeId>),
}

/// Tracks whether the page is currently showing search results.
#[derive(Debug, Clone, Default)]
pub struct SearchManager {
    active: bool,
}

impl SearchManager {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn perform(&mut self, doc: &mut Document, term: &str) -> SearchOutcome {
        let term = term.trim();
        if term.is_empty() {
            self.restore_default_state(doc);
            return SearchOutcome::Restored;
        }

        self.active = true;
        reset_modules(doc);
        let matches = matching_titles(doc, term);
        for &title in &matches {
            activate_title(doc, title);
        }
        if matches.is_empty() {
            log::debug!("No matching scripts found for {:?}", term);
        }
        SearchOutcome::Matches(matches)
    }

    /// Leave search mode: clear the input, show the module of the active
    /// nav button and re-apply the channel filter.
    pub fn restore_default_state(&mut self, doc: &mut Document) {
        self.active = false;
        reset_modules(doc);
        if let Some(input) = doc.by_id(SEARCH_INPUT_ID) {
            doc.set_value(input, "");
        }
        update_module(doc);
        let channel = doc
            .by_id(CHANNEL_SELECT_ID)
            .map(|select| doc.value(select).to_string())
            .unwrap_or_else(|| ChannelFilter::All.as_str().to_string());
        update_titles(doc, ChannelFilter::parse(&channel));
    }
}

/// Deactivate every module, title block and card container.
pub fn reset_modules(doc: &mut Document) {
    for module in doc.query_class(doc.root(), "script-module") {
        doc.remove_class(module, ACTIVE);
        let inner: Vec<NodeId> = doc
            .descendants(module)
            .into_iter()
            .filter(|&n| {
                doc.has_class(n, Channel::Chat.title_class())
                    || doc.has_class(n, Channel::Voice.title_class())
                    || doc.has_class(n, "script-card-sub")
            })
            .collect();
        for node in inner {
            doc.remove_class(node, ACTIVE);
        }
    }
}

/// Heading text of a title block.
pub fn title_text(doc: &Document, title: NodeId) -> String {
    doc.query_tag(title, "h4")
        .map(|h| doc.text_content(h).trim().to_string())
        .unwrap_or_default()
}

pub fn matching_titles(doc: &Document, term: &str) -> Vec<NodeId> {
    use rayon::prelude::*;

    let needle = term.to_lowercase();
    let titles: Vec<NodeId> = [Channel::Chat, Channel::Voice]
        .iter()
        .flat_map(|channel| doc.query_class(doc.root(), channel.title_class()))
        .collect();

    titles
        .par_iter()
        .filter(|&&title| title_text(doc, title).to_lowercase().contains(&needle))
        .copied()
        .collect()
}

fn activate_title(doc: &mut Document, title: NodeId) {
    let Some(module) = doc.closest(title, "script-module") else {
        return;
    };
    doc.add_class(module, ACTIVE);
    if let Some(card_sub) = doc.next_element_sibling(title) {
        if doc.has_class(card_sub, "script-card-sub") {
            doc.add_class(card_sub, ACTIVE);
        }
    }
    doc.add_class(title, ACTIVE);
}
