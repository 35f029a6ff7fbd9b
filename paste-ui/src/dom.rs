//! Small web-sys helpers shared by the browser adapters.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget};

#[derive(Debug, thiserror::Error, Clone)]
pub enum DomError {
    #[error("No global window or document")]
    NoDocument,
    #[error("Element {selector} is not a {expected}")]
    WrongElement {
        selector: String,
        expected: &'static str,
    },
    #[error("DOM call failed: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

pub fn document() -> Result<Document, DomError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or(DomError::NoDocument)
}

/// First element matching `selector`, or `None` when absent.
pub fn query(document: &Document, selector: &str) -> Result<Option<Element>, DomError> {
    Ok(document.query_selector(selector)?)
}

/// First element matching `selector`, cast to a concrete element type.
pub fn query_as<T: JsCast>(
    document: &Document,
    selector: &str,
    expected: &'static str,
) -> Result<Option<T>, DomError> {
    match query(document, selector)? {
        Some(element) => element
            .dyn_into::<T>()
            .map(Some)
            .map_err(|_| DomError::WrongElement {
                selector: selector.to_string(),
                expected,
            }),
        None => Ok(None),
    }
}

/// Attach `handler` for `event` on `target` for the rest of the page's life.
pub fn listen<E, F>(target: &EventTarget, event: &str, handler: F) -> Result<(), DomError>
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Listeners live until the page unloads
    closure.forget();
    Ok(())
}

/// Escape text for inclusion in generated markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
