//! HTML templates and styling for the call-script server.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants and theme definitions
//! - `components` - Base template and the rendered script page

mod components;
mod styles;

pub use components::{base_html, empty_page, render_page};
pub use styles::STYLE;
