//! Page and server configuration.
//!
//! `PageConfig` holds the interaction constants of the call-script page
//! (timings, tooltip messages, CSS class names, reserved placeholders).
//! `ServerConfig` is read from the environment at start-up.

use std::env;
use std::path::PathBuf;

// ============================================================================
// Page Configuration
// ============================================================================

/// Placeholder whose fields the card reset control never touches.
pub const AGENT_NAME_PLACEHOLDER: &str = "[Agent Name]";
pub const CUSTOMER_NAME_PLACEHOLDER: &str = "[Cx Name]";

#[derive(Debug, Clone)]
pub struct TooltipMessages {
    pub success: String,
    pub empty: String,
    pub error: String,
    pub editing: String,
}

#[derive(Debug, Clone)]
pub struct ClassNames {
    pub tooltip: String,
    pub card: String,
    pub editable_field: String,
    pub editing: String,
    pub reset_button: String,
    pub copying: String,
}

/// An external input kept in step with every field of one placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBindingConfig {
    pub input_id: String,
    pub default_text: String,
}

#[derive(Debug, Clone)]
pub struct PageConfig {
    pub tooltip_duration_ms: u64,
    pub animation_duration_ms: u64,
    pub search_debounce_ms: u64,
    pub nav_tooltip_delay_ms: u64,
    pub messages: TooltipMessages,
    pub classes: ClassNames,
    /// Fields with this default text survive a card reset.
    pub reset_exempt_placeholder: String,
    pub input_bindings: Vec<InputBindingConfig>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            tooltip_duration_ms: 1500,
            animation_duration_ms: 100,
            search_debounce_ms: 300,
            nav_tooltip_delay_ms: 50,
            messages: TooltipMessages {
                success: "✓ Copied to clipboard".to_string(),
                empty: "⚠️ Please fill in all fields".to_string(),
                error: "✗ Failed to copy".to_string(),
                editing: "✎ Now editing...".to_string(),
            },
            classes: ClassNames {
                tooltip: "copy-tooltip".to_string(),
                card: "card-module".to_string(),
                editable_field: "manual-edit".to_string(),
                editing: "editing".to_string(),
                reset_button: "module-reset-button".to_string(),
                copying: "copying".to_string(),
            },
            reset_exempt_placeholder: AGENT_NAME_PLACEHOLDER.to_string(),
            input_bindings: vec![
                InputBindingConfig {
                    input_id: "customer".to_string(),
                    default_text: CUSTOMER_NAME_PLACEHOLDER.to_string(),
                },
                InputBindingConfig {
                    input_id: "user".to_string(),
                    default_text: AGENT_NAME_PLACEHOLDER.to_string(),
                },
            ],
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

pub const DEFAULT_FEED: &str = "scripts.json";
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// File path or http(s) URL of the script feed.
    pub feed: String,
    pub addr: String,
    /// Optional directory served under `/assets`.
    pub assets_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            feed: non_empty("CALLSCRIPTS_FEED").unwrap_or_else(|| DEFAULT_FEED.to_string()),
            addr: non_empty("CALLSCRIPTS_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            assets_dir: non_empty("CALLSCRIPTS_ASSETS").map(PathBuf::from),
        }
    }
}
