//! Clipboard collaborator.
//!
//! The page hands the assembled card text to a [`Clipboard`]; how the
//! text reaches the system clipboard is up to the host.

use crate::error::ClipboardWriteError;
use std::cell::RefCell;
use std::rc::Rc;

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardWriteError>;
}

#[derive(Debug, Default)]
struct MemoryClipboardState {
    contents: Option<String>,
    reject: Option<String>,
    writes: usize,
}

/// In-memory clipboard. Clones share the same contents, so a handle kept
/// outside the page sees what the page wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    state: Rc<RefCell<MemoryClipboardState>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.state.borrow().contents.clone()
    }

    pub fn writes(&self) -> usize {
        self.state.borrow().writes
    }

    /// Make every following write fail with `reason`.
    pub fn reject_with(&self, reason: &str) {
        self.state.borrow_mut().reject = Some(reason.to_string());
    }

    pub fn accept(&self) {
        self.state.borrow_mut().reject = None;
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardWriteError> {
        let mut state = self.state.borrow_mut();
        if let Some(reason) = &state.reject {
            return Err(ClipboardWriteError(reason.clone()));
        }
        state.contents = Some(text.to_string());
        state.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_contents() {
        let handle = MemoryClipboard::new();
        let mut writer = handle.clone();
        writer.write_text("hello").unwrap();
        assert_eq!(handle.contents().as_deref(), Some("hello"));
        assert_eq!(handle.writes(), 1);
    }

    #[test]
    fn test_rejected_write_keeps_previous_contents() {
        let handle = MemoryClipboard::new();
        let mut writer = handle.clone();
        writer.write_text("first").unwrap();
        handle.reject_with("permission denied");
        let err = writer.write_text("second").unwrap_err();
        assert_eq!(err, ClipboardWriteError("permission denied".to_string()));
        assert_eq!(handle.contents().as_deref(), Some("first"));
        handle.accept();
        assert!(writer.write_text("third").is_ok());
    }
}
