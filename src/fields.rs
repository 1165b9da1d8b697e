//! Placeholder fields and their edit lifecycle.
//!
//! A field is a `span` showing either its placeholder (default text) or
//! user content. Editing is marked on the node itself (the editing class
//! and `contenteditable`), so the document stays the single source of
//! truth for what the page shows.

use crate::config::ClassNames;
use crate::dom::{Document, NodeId};
use crate::registry::DEFAULT_TEXT_ATTR;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// Showing the placeholder, not focused.
    Default,
    /// Focused, content mutable.
    Editing,
    /// Showing user content, not focused.
    Filled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderField {
    pub node: NodeId,
    pub default_text: String,
    /// Text shown when the current edit started.
    pub previous_value: String,
}

/// Result of leaving edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deactivation {
    /// Nothing usable was left; the placeholder is shown again.
    Restored,
    /// Trimmed user content.
    Filled(String),
    /// The field was not being edited.
    Ignored,
}

/// Keys that end an edit without altering content.
pub fn is_commit_key(key: &str) -> bool {
    matches!(key, "Enter" | "Escape")
}

#[derive(Debug, Clone)]
pub struct FieldController {
    field_class: String,
    editing_class: String,
    fields: HashMap<NodeId, PlaceholderField>,
}

impl FieldController {
    pub fn new(classes: &ClassNames) -> Self {
        Self {
            field_class: classes.editable_field.clone(),
            editing_class: classes.editing.clone(),
            fields: HashMap::new(),
        }
    }

    /// Index every field in the document and give it its ARIA role.
    /// Fields seen before keep their edit snapshot.
    pub fn attach(&mut self, doc: &mut Document) {
        let nodes = doc.query_class(doc.root(), &self.field_class);
        self.fields.retain(|node, _| nodes.contains(node));
        for node in nodes {
            let Some(default_text) = doc.attr(node, DEFAULT_TEXT_ATTR).map(str::to_string) else {
                continue;
            };
            doc.set_attr(node, "role", "textbox");
            doc.set_attr(node, "aria-label", "Editable text field");
            self.fields.entry(node).or_insert_with(|| PlaceholderField {
                node,
                previous_value: doc.text_content(node),
                default_text,
            });
        }
    }

    pub fn get(&self, node: NodeId) -> Option<&PlaceholderField> {
        self.fields.get(&node)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn is_editing(&self, doc: &Document, node: NodeId) -> bool {
        self.fields.contains_key(&node) && doc.has_class(node, &self.editing_class)
    }

    pub fn state(&self, doc: &Document, node: NodeId) -> Option<FieldState> {
        let field = self.fields.get(&node)?;
        Some(if doc.has_class(node, &self.editing_class) {
            FieldState::Editing
        } else if doc.text_content(node) == field.default_text {
            FieldState::Default
        } else {
            FieldState::Filled
        })
    }

    /// Enter edit mode. Returns false when rejected: unknown field, or the
    /// owning card is locked.
    pub fn activate(&mut self, doc: &mut Document, node: NodeId, card_locked: bool) -> bool {
        if card_locked {
            return false;
        }
        let Some(field) = self.fields.get_mut(&node) else {
            return false;
        };

        let current = doc.text_content(node);
        if current == field.default_text {
            doc.set_text_content(node, "");
        }
        field.previous_value = current;

        doc.add_class(node, &self.editing_class);
        doc.set_attr(node, "contenteditable", "true");
        doc.set_focus(Some(node));
        true
    }

    /// Trimmed content after a mutation, if the field is being edited.
    pub fn content_changed(&self, doc: &Document, node: NodeId) -> Option<String> {
        if !self.is_editing(doc, node) {
            return None;
        }
        Some(doc.text_content(node).trim().to_string())
    }

    /// Leave edit mode, normalizing what was typed.
    pub fn deactivate(&mut self, doc: &mut Document, node: NodeId) -> Deactivation {
        if !self.is_editing(doc, node) {
            return Deactivation::Ignored;
        }
        let Some(field) = self.fields.get(&node) else {
            return Deactivation::Ignored;
        };

        doc.remove_class(node, &self.editing_class);
        doc.set_attr(node, "contenteditable", "false");
        if doc.focused() == Some(node) {
            doc.set_focus(None);
        }

        let content = doc.text_content(node).trim().to_string();
        if content.is_empty() || content == field.default_text {
            doc.set_text_content(node, &field.default_text);
            Deactivation::Restored
        } else {
            doc.set_text_content(node, &content);
            Deactivation::Filled(content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;

    fn setup() -> (Document, FieldController, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let card = doc.create_element(root, "div");
        let span = doc.create_element(card, "span");
        doc.add_class(span, "manual-edit");
        doc.set_attr(span, DEFAULT_TEXT_ATTR, "[Cx Name]");
        doc.append_text(span, "[Cx Name]");
        let mut controller = FieldController::new(&PageConfig::default().classes);
        controller.attach(&mut doc);
        (doc, controller, span)
    }

    #[test]
    fn test_attach_sets_aria() {
        let (doc, controller, span) = setup();
        assert_eq!(controller.len(), 1);
        assert_eq!(doc.attr(span, "role"), Some("textbox"));
        assert_eq!(doc.attr(span, "aria-label"), Some("Editable text field"));
        assert_eq!(controller.state(&doc, span), Some(FieldState::Default));
    }

    #[test]
    fn test_activate_clears_placeholder_and_focuses() {
        let (mut doc, mut controller, span) = setup();
        assert!(controller.activate(&mut doc, span, false));
        assert_eq!(doc.text_content(span), "");
        assert_eq!(doc.focused(), Some(span));
        assert_eq!(doc.attr(span, "contenteditable"), Some("true"));
        assert_eq!(controller.state(&doc, span), Some(FieldState::Editing));
        assert_eq!(controller.get(span).unwrap().previous_value, "[Cx Name]");
    }

    #[test]
    fn test_activate_rejected_when_card_locked() {
        let (mut doc, mut controller, span) = setup();
        assert!(!controller.activate(&mut doc, span, true));
        assert_eq!(doc.text_content(span), "[Cx Name]");
        assert_eq!(controller.state(&doc, span), Some(FieldState::Default));
    }

    #[test]
    fn test_activate_keeps_filled_content() {
        let (mut doc, mut controller, span) = setup();
        doc.set_text_content(span, "Alice");
        controller.activate(&mut doc, span, false);
        assert_eq!(doc.text_content(span), "Alice");
        assert_eq!(controller.get(span).unwrap().previous_value, "Alice");
    }

    #[test]
    fn test_deactivate_empty_restores_placeholder() {
        let (mut doc, mut controller, span) = setup();
        controller.activate(&mut doc, span, false);
        doc.set_text_content(span, "   ");
        assert_eq!(controller.deactivate(&mut doc, span), Deactivation::Restored);
        assert_eq!(doc.text_content(span), "[Cx Name]");
        assert_eq!(controller.state(&doc, span), Some(FieldState::Default));
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn test_deactivate_trims_and_fills() {
        let (mut doc, mut controller, span) = setup();
        controller.activate(&mut doc, span, false);
        doc.set_text_content(span, "  Alice ");
        assert_eq!(controller.content_changed(&doc, span), Some("Alice".to_string()));
        assert_eq!(
            controller.deactivate(&mut doc, span),
            Deactivation::Filled("Alice".to_string())
        );
        assert_eq!(doc.text_content(span), "Alice");
        assert_eq!(controller.state(&doc, span), Some(FieldState::Filled));
    }

    #[test]
    fn test_typing_the_placeholder_counts_as_default() {
        let (mut doc, mut controller, span) = setup();
        controller.activate(&mut doc, span, false);
        doc.set_text_content(span, "[Cx Name]");
        assert_eq!(controller.deactivate(&mut doc, span), Deactivation::Restored);
    }

    #[test]
    fn test_content_change_ignored_outside_edit_mode() {
        let (mut doc, mut controller, span) = setup();
        assert_eq!(controller.content_changed(&doc, span), None);
        assert_eq!(controller.deactivate(&mut doc, span), Deactivation::Ignored);
    }

    #[test]
    fn test_commit_keys() {
        assert!(is_commit_key("Enter"));
        assert!(is_commit_key("Escape"));
        assert!(!is_commit_key("a"));
    }
}
