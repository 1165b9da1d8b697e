//! External-input bridge.
//!
//! Binds a free-standing text input (customer name, agent name) to the
//! placeholder group with the matching default text. Group writes go
//! through `Page::sync_group`; the bridge only decides what the input
//! should show afterwards.

use crate::config::InputBindingConfig;
use crate::dom::{Document, NodeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalInputBinding {
    pub input: NodeId,
    pub default_text: String,
}

impl ExternalInputBinding {
    /// Bind every configured input present in the document.
    pub fn bind_all(doc: &Document, configs: &[InputBindingConfig]) -> Vec<Self> {
        configs
            .iter()
            .filter_map(|config| {
                let input = doc.by_id(&config.input_id)?;
                Some(Self {
                    input,
                    default_text: config.default_text.clone(),
                })
            })
            .collect()
    }

    pub fn targets(&self, default_text: &str) -> bool {
        self.default_text == default_text
    }

    /// Mirror a group value into the input: the placeholder shows as an
    /// empty input.
    pub fn mirror(&self, doc: &mut Document, group_value: &str) {
        let value = if group_value == self.default_text {
            ""
        } else {
            group_value
        };
        doc.set_value(self.input, value);
    }

    /// A group reset was observed.
    pub fn on_group_reset(&self, doc: &mut Document) {
        doc.set_value(self.input, "");
    }
}
