use async_trait::async_trait;
use dioxus_logger::tracing::{debug, warn};
use wasm_bindgen_futures::JsFuture;

use crate::notice::{Notice, Notifier};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Clipboard is not available")]
    Unavailable,
    #[error("Clipboard write rejected: {0}")]
    Rejected(String),
}

#[async_trait(?Send)]
pub trait Clipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

pub struct ShareController<C, N> {
    clipboard: C,
    notifier: N,
}

impl<C: Clipboard, N: Notifier> ShareController<C, N> {
    pub fn new(clipboard: C, notifier: N) -> Self {
        Self {
            clipboard,
            notifier,
        }
    }

    /// Copy `address` to the clipboard. Returns whether a write happened.
    pub async fn share(&self, address: &str) -> bool {
        let address = address.trim();
        if address.is_empty() {
            self.notifier
                .notify(Notice::validation("Save the snippet first to get a link"));
            return false;
        }

        match self.clipboard.write_text(address).await {
            Ok(()) => {
                debug!("Copied {} to clipboard", address);
                self.notifier.notify(Notice::info("Link copied to clipboard"));
                true
            }
            Err(e) => {
                warn!("Failed to copy link: {}", e);
                false
            }
        }
    }
}

// ============================================================================
// Browser adapter
// ============================================================================

pub struct BrowserClipboard;

#[async_trait(?Send)]
impl Clipboard for BrowserClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let window = web_sys::window().ok_or(ClipboardError::Unavailable)?;
        let promise = window.navigator().clipboard().write_text(text);
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| ClipboardError::Rejected(e.as_string().unwrap_or_else(|| format!("{e:?}"))))
    }
}
