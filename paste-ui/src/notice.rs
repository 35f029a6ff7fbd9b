use std::cell::Cell;
use std::rc::Rc;

use dioxus_logger::tracing::{debug, info, warn};
use gloo_timers::future::TimeoutFuture;
use web_sys::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Validation,
    Error,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Info => "info",
            NoticeKind::Validation => "validation",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Validation,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// User-visible messages.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for Rc<N> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}

/// Writes notices into a banner element and clears them after a timeout.
/// Without a banner element it falls back to `window.alert`.
pub struct BannerNotifier {
    banner: Option<Element>,
    timeout_ms: u32,
    // Bumped per notice so only the latest one clears the banner
    generation: Rc<Cell<u64>>,
}

impl BannerNotifier {
    pub fn new(banner: Option<Element>, timeout_ms: u32) -> Self {
        Self {
            banner,
            timeout_ms,
            generation: Rc::new(Cell::new(0)),
        }
    }
}

impl Notifier for BannerNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Error => warn!("{}", notice.message),
            _ => info!("{}", notice.message),
        }

        let Some(banner) = self.banner.clone() else {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.alert_with_message(&notice.message) {
                    debug!("Failed to show alert: {:?}", e);
                }
            }
            return;
        };

        banner.set_text_content(Some(&notice.message));
        let shown = banner
            .set_attribute("data-kind", notice.kind.as_str())
            .and_then(|_| banner.remove_attribute("hidden"));
        if let Err(e) = shown {
            debug!("Failed to show notice banner: {:?}", e);
        }

        if self.timeout_ms == 0 {
            return;
        }

        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        let current = self.generation.clone();
        let timeout_ms = self.timeout_ms;
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(timeout_ms).await;
            if current.get() == generation {
                banner.set_text_content(None);
                if let Err(e) = banner.set_attribute("hidden", "") {
                    debug!("Failed to hide notice banner: {:?}", e);
                }
            }
        });
    }
}
