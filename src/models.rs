//! Data models for the call-script feed.
//!
//! The feed is a JSON array of script records. Records sharing an `id`
//! are grouped into one script module (one nav button); each record
//! contributes a title block and a list of cards.

use serde::{Deserialize, Serialize};

/// Module id that is shown first and active on load.
pub const OPENING_MODULE: &str = "opening";

// ============================================================================
// Feed Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScriptRecord {
    /// Module/category key, e.g. `opening`, `closing`.
    pub id: String,
    pub category: Channel,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cards: Vec<ScriptCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScriptCard {
    /// Card text with bracketed placeholders such as `[Cx Name]`.
    pub content: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Chat,
    Voice,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Chat => "chat",
            Channel::Voice => "voice",
        }
    }

    /// Class of the title block for this channel.
    pub fn title_class(&self) -> &'static str {
        match self {
            Channel::Chat => "script-title-chat",
            Channel::Voice => "script-title-voice",
        }
    }
}

/// Value of the channel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelFilter {
    #[default]
    All,
    Only(Channel),
}

impl ChannelFilter {
    /// Parse a selector value. Unknown values show nothing, matching a
    /// select option that enables neither channel.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(ChannelFilter::All),
            "chat" => Some(ChannelFilter::Only(Channel::Chat)),
            "voice" => Some(ChannelFilter::Only(Channel::Voice)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelFilter::All => "all",
            ChannelFilter::Only(channel) => channel.as_str(),
        }
    }

    pub fn shows(&self, channel: Channel) -> bool {
        match self {
            ChannelFilter::All => true,
            ChannelFilter::Only(only) => *only == channel,
        }
    }
}

// ============================================================================
// Card Content
// ============================================================================

/// A piece of card content after placeholder parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSegment {
    Text(String),
    /// Full bracketed placeholder including brackets, e.g. `[Order ID]`.
    Placeholder(String),
    LineBreak,
}

// ============================================================================
// Grouping
// ============================================================================

/// Records grouped under one module id, in feed order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptModule<'a> {
    pub id: &'a str,
    pub records: Vec<&'a ScriptRecord>,
}

/// Unique module ids in nav order: `opening` first, everything else in
/// order of first appearance.
pub fn module_ids(records: &[ScriptRecord]) -> Vec<&str> {
    let mut ids: Vec<&str> = Vec::new();
    for record in records {
        if !ids.contains(&record.id.as_str()) {
            ids.push(&record.id);
        }
    }
    // Stable sort keeps first-appearance order for the rest
    ids.sort_by_key(|id| *id != OPENING_MODULE);
    ids
}

/// Group records into modules, in order of first appearance.
pub fn group_modules(records: &[ScriptRecord]) -> Vec<ScriptModule<'_>> {
    let mut modules: Vec<ScriptModule<'_>> = Vec::new();
    for record in records {
        match modules.iter_mut().find(|m| m.id == record.id) {
            Some(module) => module.records.push(record),
            None => modules.push(ScriptModule {
                id: &record.id,
                records: vec![record],
            }),
        }
    }
    modules
}
