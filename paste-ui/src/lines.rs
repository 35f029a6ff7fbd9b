use std::cell::Cell;

use dioxus_logger::tracing::debug;
use shared_types::count_lines;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::dom::DomError;

/// Labels for `text`: `1..=N`, one per `'\n'`-separated segment.
pub fn line_labels(text: &str) -> impl Iterator<Item = u32> {
    1..=count_lines(text)
}

/// Container of per-line number labels next to the text area.
pub trait LineGutter {
    fn clear(&self);
    fn push_label(&self, number: u32);
    fn set_scroll_top(&self, scroll_top: i32);
}

pub struct LineNumberRenderer<G> {
    gutter: G,
    line_count: Cell<u32>,
}

impl<G: LineGutter> LineNumberRenderer<G> {
    pub fn new(gutter: G) -> Self {
        Self {
            gutter,
            line_count: Cell::new(0),
        }
    }

    /// Replace every label with a fresh `1..=N` sequence for `text`.
    pub fn render(&self, text: &str) {
        self.gutter.clear();
        let mut count = 0;
        for number in line_labels(text) {
            self.gutter.push_label(number);
            count = number;
        }
        self.line_count.set(count);
    }

    pub fn sync_scroll(&self, source_scroll_top: i32) {
        self.gutter.set_scroll_top(source_scroll_top);
    }

    /// Label count from the last `render`.
    pub fn line_count(&self) -> u32 {
        self.line_count.get()
    }
}

// ============================================================================
// Browser adapter
// ============================================================================

/// Gutter built from a container element and a label template that is
/// cloned once per line.
pub struct DomLineGutter {
    container: Element,
    template: Element,
}

impl DomLineGutter {
    pub fn new(container: Element, template: &Element) -> Result<Self, DomError> {
        // Detached copy; the original may live inside the container and be
        // wiped by the first clear.
        let template = template
            .clone_node_with_deep(true)?
            .dyn_into::<Element>()
            .map_err(|_| DomError::Js("line number template is not an element".to_string()))?;
        Ok(Self {
            container,
            template,
        })
    }
}

impl LineGutter for DomLineGutter {
    fn clear(&self) {
        self.container.set_inner_html("");
    }

    fn push_label(&self, number: u32) {
        let appended = self.template.clone_node_with_deep(true).and_then(|label| {
            label.set_text_content(Some(&number.to_string()));
            self.container.append_child(&label)
        });
        if let Err(e) = appended {
            debug!("Failed to append line label {}: {:?}", number, e);
        }
    }

    fn set_scroll_top(&self, scroll_top: i32) {
        self.container.set_scroll_top(scroll_top);
    }
}
