//! Call-script library - re-exports for testing and external use.
//!
//! The page model (`page` and the components it drives) runs without a
//! browser: events go in through `Page` methods and the resulting
//! document can be inspected or rendered. The server side (`handlers`,
//! `templates`, `feed`) serves the rendered page and the feed.

pub mod bridge;
pub mod card;
pub mod clipboard;
pub mod config;
pub mod dom;
pub mod error;
pub mod feed;
pub mod fields;
pub mod handlers;
pub mod models;
pub mod navigation;
pub mod page;
pub mod registry;
pub mod render;
pub mod search;
pub mod templates;
pub mod text;
pub mod timers;
pub mod tooltip;

// ============================================================================
// Application State
// ============================================================================

/// Shared, read-only server state: the feed as loaded at start-up and the
/// page rendered from it.
pub struct AppState {
    pub records: Vec<models::ScriptRecord>,
    pub page_html: String,
}

impl AppState {
    pub fn new(records: Vec<models::ScriptRecord>, config: config::PageConfig) -> Self {
        let page_html = if records.is_empty() {
            templates::empty_page()
        } else {
            templates::render_page(&records, &config)
        };
        Self { records, page_html }
    }
}

// Re-export commonly used types
pub use bridge::ExternalInputBinding;
pub use card::{Card, CardAssembler, ClickAction};
pub use clipboard::{Clipboard, MemoryClipboard};
pub use config::{PageConfig, ServerConfig, AGENT_NAME_PLACEHOLDER, CUSTOMER_NAME_PLACEHOLDER};
pub use dom::{Document, NodeId};
pub use error::{ClipboardWriteError, CopyError, FeedError, ValidationError};
pub use feed::{load_feed, parse_content, parse_feed, placeholders, FeedSource};
pub use fields::{Deactivation, FieldController, FieldState, PlaceholderField};
pub use models::{Channel, ChannelFilter, ContentSegment, ScriptCard, ScriptRecord};
pub use page::{ClickOutcome, Page, SyncOrigin};
pub use registry::{GroupRegistry, PropagateOutcome};
pub use search::{SearchManager, SearchOutcome};
pub use timers::{Scheduler, TimerKey};
pub use tooltip::{FixedGeometry, Geometry, Rect, Tooltip, TooltipKind, Viewport};
