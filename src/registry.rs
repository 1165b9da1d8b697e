//! Group synchronization registry.
//!
//! Maps a placeholder's default text to every field node showing it.
//! The registry only stores node ids; the document owns the nodes.

use crate::dom::{Document, NodeId};
use std::collections::HashMap;

pub const DEFAULT_TEXT_ATTR: &str = "data-default-text";

/// What a propagation wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagateOutcome {
    pub updated: Vec<NodeId>,
    /// The group was written back to its own default text.
    pub reset: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GroupRegistry {
    field_class: String,
    groups: HashMap<String, Vec<NodeId>>,
}

impl GroupRegistry {
    pub fn new(field_class: &str) -> Self {
        Self {
            field_class: field_class.to_string(),
            groups: HashMap::new(),
        }
    }

    /// Add `field` to the group of its default text. Fields without a
    /// default text, or already registered, are ignored.
    pub fn register(&mut self, doc: &Document, field: NodeId) {
        let Some(default_text) = doc.attr(field, DEFAULT_TEXT_ATTR) else {
            return;
        };
        let group = self.groups.entry(default_text.to_string()).or_default();
        if !group.contains(&field) {
            group.push(field);
        }
    }

    /// Recompute every group from the fields currently in the document.
    pub fn rebuild(&mut self, doc: &Document) {
        self.groups.clear();
        for field in doc.query_class(doc.root(), &self.field_class) {
            self.register(doc, field);
        }
    }

    pub fn group(&self, default_text: &str) -> &[NodeId] {
        self.groups
            .get(default_text)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Write `value` into every field of the group except `exclude`.
    /// Unknown keys are a no-op.
    pub fn propagate(
        &self,
        doc: &mut Document,
        default_text: &str,
        value: &str,
        exclude: Option<NodeId>,
    ) -> PropagateOutcome {
        let Some(group) = self.groups.get(default_text) else {
            return PropagateOutcome::default();
        };
        let mut updated = Vec::new();
        for &field in group {
            if Some(field) == exclude {
                continue;
            }
            doc.set_text_content(field, value);
            updated.push(field);
        }
        PropagateOutcome {
            updated,
            reset: value == default_text,
        }
    }

    /// First field in `card`, in document order, still showing its
    /// default text.
    pub fn find_first_unedited(&self, doc: &Document, card: NodeId) -> Option<NodeId> {
        doc.query_class(card, &self.field_class)
            .into_iter()
            .find(|&field| is_unedited(doc, field))
    }
}

/// The field's text equals its default text.
pub fn is_unedited(doc: &Document, field: NodeId) -> bool {
    doc.attr(field, DEFAULT_TEXT_ATTR)
        .is_some_and(|default_text| doc.text_content(field) == default_text)
}
