//! Card assembly: reset controls, click routing, validation and copy text.

use crate::config::PageConfig;
use crate::dom::{Document, NodeId};
use crate::error::ValidationError;
use crate::registry::{GroupRegistry, DEFAULT_TEXT_ATTR};
use crate::text::collapse_whitespace;

/// What a click on a card should do. Cards are filled first and copied
/// last: a click never copies while a field still shows its placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    Ignore,
    /// Start editing this field instead of copying.
    Activate(NodeId),
    Copy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub node: NodeId,
    pub reset_button: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct CardAssembler {
    card_class: String,
    field_class: String,
    reset_class: String,
    copying_class: String,
    reset_exempt: String,
}

impl CardAssembler {
    pub fn new(config: &PageConfig) -> Self {
        Self {
            card_class: config.classes.card.clone(),
            field_class: config.classes.editable_field.clone(),
            reset_class: config.classes.reset_button.clone(),
            copying_class: config.classes.copying.clone(),
            reset_exempt: config.reset_exempt_placeholder.clone(),
        }
    }

    /// Find every card and make sure each card with fields has exactly one
    /// reset control, and cards without fields have none.
    pub fn attach(&self, doc: &mut Document) -> Vec<Card> {
        let nodes = doc.query_class(doc.root(), &self.card_class);
        nodes
            .into_iter()
            .map(|node| Card {
                node,
                reset_button: self.ensure_reset_button(doc, node),
            })
            .collect()
    }

    fn ensure_reset_button(&self, doc: &mut Document, card: NodeId) -> Option<NodeId> {
        let has_fields = doc.query_first_class(card, &self.field_class).is_some();
        let mut existing = doc.query_class(card, &self.reset_class);

        if !has_fields {
            for button in existing {
                doc.remove(button);
            }
            return None;
        }
        if let Some(first) = existing.first().copied() {
            for button in existing.split_off(1) {
                doc.remove(button);
            }
            return Some(first);
        }

        let button = doc.create_element(card, "button");
        doc.add_class(button, &self.reset_class);
        doc.set_attr(button, "aria-label", "Reset all fields to default");
        doc.append_text(button, "Reset");
        Some(button)
    }

    pub fn card_of(&self, doc: &Document, node: NodeId) -> Option<NodeId> {
        doc.closest(node, &self.card_class)
    }

    pub fn is_reset_control(&self, doc: &Document, node: NodeId) -> bool {
        doc.closest(node, &self.reset_class).is_some()
    }

    pub fn is_locked(&self, doc: &Document, card: NodeId) -> bool {
        doc.has_class(card, &self.copying_class)
    }

    pub fn set_locked(&self, doc: &mut Document, card: NodeId, locked: bool) {
        doc.toggle_class(card, &self.copying_class, locked);
    }

    /// Decide what a click on `target` inside `card` does.
    pub fn route_click(
        &self,
        doc: &Document,
        registry: &GroupRegistry,
        card: NodeId,
        target: NodeId,
    ) -> ClickAction {
        if self.is_locked(doc, card)
            || self.is_reset_control(doc, target)
            || doc.closest(target, &self.field_class).is_some()
        {
            return ClickAction::Ignore;
        }
        match registry.find_first_unedited(doc, card) {
            Some(field) => ClickAction::Activate(field),
            None => ClickAction::Copy,
        }
    }

    /// Check every field of the card is filled and produce the text to
    /// copy. Works on a scratch copy; the live card is never touched.
    pub fn validate_and_serialize(
        &self,
        doc: &Document,
        card: NodeId,
    ) -> Result<String, ValidationError> {
        let (mut scratch, copy) = doc.extract(card);
        for button in scratch.query_class(copy, &self.reset_class) {
            scratch.remove(button);
        }

        let placeholders: Vec<String> = scratch
            .query_class(copy, &self.field_class)
            .into_iter()
            .filter_map(|field| {
                let default_text = scratch.attr(field, DEFAULT_TEXT_ATTR).unwrap_or("");
                let text = scratch.text_content(field);
                let text = text.trim();
                (text.is_empty() || text == default_text).then(|| default_text.to_string())
            })
            .collect();
        if !placeholders.is_empty() {
            return Err(ValidationError { placeholders });
        }

        Ok(collapse_whitespace(&scratch.inner_text(copy)))
    }

    /// Fields a reset of `card` restores, with their default text.
    /// Fields of the reset-exempt placeholder are left out.
    pub fn resettable_fields(&self, doc: &Document, card: NodeId) -> Vec<(NodeId, String)> {
        doc.query_class(card, &self.field_class)
            .into_iter()
            .filter_map(|field| {
                let default_text = doc.attr(field, DEFAULT_TEXT_ATTR)?;
                (default_text != self.reset_exempt).then(|| (field, default_text.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::render::append_card_content;

    fn card_with(content: &str) -> (Document, CardAssembler, GroupRegistry, Card) {
        let config = PageConfig::default();
        let mut doc = Document::new();
        let root = doc.root();
        let node = doc.create_element(root, "div");
        doc.add_class(node, "card-module");
        append_card_content(&mut doc, node, content, &config);
        let assembler = CardAssembler::new(&config);
        let cards = assembler.attach(&mut doc);
        let mut registry = GroupRegistry::new("manual-edit");
        registry.rebuild(&doc);
        (doc, assembler, registry, cards[0])
    }

    fn fields(doc: &Document, card: NodeId) -> Vec<NodeId> {
        doc.query_class(card, "manual-edit")
    }

    #[test]
    fn test_attach_adds_single_reset_button() {
        let (mut doc, assembler, _, card) = card_with("Hi [Cx Name]");
        let button = card.reset_button.unwrap();
        assert_eq!(doc.text_content(button), "Reset");
        assert_eq!(doc.attr(button, "aria-label"), Some("Reset all fields to default"));

        let again = assembler.attach(&mut doc);
        assert_eq!(again[0].reset_button, Some(button));
        assert_eq!(doc.query_class(card.node, "module-reset-button").len(), 1);
    }

    #[test]
    fn test_card_without_fields_has_no_reset_button() {
        let (doc, _, _, card) = card_with("How can I help?");
        assert!(card.reset_button.is_none());
        assert!(doc.query_class(card.node, "module-reset-button").is_empty());
    }

    #[test]
    fn test_click_routes_to_first_unedited_field() {
        let (mut doc, assembler, registry, card) = card_with("Hi [Cx Name], order [Order ID]");
        let f = fields(&doc, card.node);
        assert_eq!(
            assembler.route_click(&doc, &registry, card.node, card.node),
            ClickAction::Activate(f[0])
        );
        doc.set_text_content(f[0], "Alice");
        assert_eq!(
            assembler.route_click(&doc, &registry, card.node, card.node),
            ClickAction::Activate(f[1])
        );
        doc.set_text_content(f[1], "12345");
        assert_eq!(
            assembler.route_click(&doc, &registry, card.node, card.node),
            ClickAction::Copy
        );
    }

    #[test]
    fn test_click_on_field_reset_or_locked_card_is_ignored() {
        let (mut doc, assembler, registry, card) = card_with("Hi [Cx Name]");
        let f = fields(&doc, card.node);
        let button = card.reset_button.unwrap();
        assert_eq!(
            assembler.route_click(&doc, &registry, card.node, f[0]),
            ClickAction::Ignore
        );
        assert_eq!(
            assembler.route_click(&doc, &registry, card.node, button),
            ClickAction::Ignore
        );
        assembler.set_locked(&mut doc, card.node, true);
        assert_eq!(
            assembler.route_click(&doc, &registry, card.node, card.node),
            ClickAction::Ignore
        );
    }

    #[test]
    fn test_card_without_fields_copies_directly() {
        let (doc, assembler, registry, card) = card_with("How can I help?");
        assert_eq!(
            assembler.route_click(&doc, &registry, card.node, card.node),
            ClickAction::Copy
        );
        assert_eq!(
            assembler.validate_and_serialize(&doc, card.node).unwrap(),
            "How can I help?"
        );
    }

    #[test]
    fn test_validate_reports_unfilled_fields() {
        let (mut doc, assembler, _, card) = card_with("Hi [Cx Name], order [Order ID]");
        let f = fields(&doc, card.node);
        doc.set_text_content(f[1], "   ");
        let err = assembler.validate_and_serialize(&doc, card.node).unwrap_err();
        assert_eq!(err.placeholders, vec!["[Cx Name]", "[Order ID]"]);
    }

    #[test]
    fn test_serialize_collapses_whitespace_and_drops_reset() {
        let (mut doc, assembler, _, card) =
            card_with("  Hi   [Cx Name],\n\n your order   [Order ID]  is ready.  ");
        let f = fields(&doc, card.node);
        doc.set_text_content(f[0], "Alice  Smith");
        doc.set_text_content(f[1], "12345");
        let text = assembler.validate_and_serialize(&doc, card.node).unwrap();
        assert_eq!(text, "Hi Alice Smith, your order 12345 is ready.");
        assert!(!text.contains("Reset"));
        // live card untouched
        assert!(card.reset_button.is_some_and(|b| doc.parent(b) == Some(card.node)));
    }

    #[test]
    fn test_resettable_fields_skip_agent_name() {
        let (doc, assembler, _, card) = card_with("[Cx Name] [Agent Name] [Order ID]");
        let defaults: Vec<String> = assembler
            .resettable_fields(&doc, card.node)
            .into_iter()
            .map(|(_, d)| d)
            .collect();
        assert_eq!(defaults, vec!["[Cx Name]", "[Order ID]"]);
    }
}
