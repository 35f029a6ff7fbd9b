use std::rc::Rc;

use dioxus_logger::tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlSelectElement, HtmlTextAreaElement, KeyboardEvent,
};

use crate::api::HttpSnippetApi;
use crate::config::PageConfig;
use crate::dom::{self, DomError};
use crate::lines::{DomLineGutter, LineNumberRenderer};
use crate::notice::BannerNotifier;
use crate::save::{EditorPage, SaveController};
use crate::share::{BrowserClipboard, ShareController};
use crate::theme::{DocumentThemeSurface, LocalStorageThemeStore, ThemeController};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// New-snippet page with an editable text area
    Editor,
    /// Read-only page for a stored snippet
    View,
}

impl PageKind {
    pub fn detect(has_input: bool) -> Self {
        if has_input {
            PageKind::Editor
        } else {
            PageKind::View
        }
    }
}

/// Ctrl+S, or Cmd+S on macOS.
pub fn is_save_shortcut(key: &str, ctrl: bool, meta: bool) -> bool {
    (ctrl || meta) && key.eq_ignore_ascii_case("s")
}

/// Wire every controller that applies to the current page. Runs once.
pub fn start(config: &PageConfig) -> Result<PageKind, DomError> {
    let document = dom::document()?;
    let selectors = &config.selectors;

    let notifier = Rc::new(BannerNotifier::new(
        dom::query(&document, &selectors.notice)?,
        config.notice_timeout_ms,
    ));

    wire_theme(&document, config)?;
    wire_share(&document, config, notifier.clone())?;

    let input = dom::query_as::<HtmlTextAreaElement>(&document, &selectors.input, "textarea")?;
    let kind = PageKind::detect(input.is_some());
    info!("Bootstrapping {:?} page", kind);

    if let Some(input) = input {
        wire_line_numbers(&document, config, &input)?;
        wire_save(&document, config, input, notifier)?;
    }

    Ok(kind)
}

fn wire_theme(document: &Document, config: &PageConfig) -> Result<(), DomError> {
    let toggle = dom::query(document, &config.selectors.theme_toggle)?;
    let theme = Rc::new(ThemeController::new(
        LocalStorageThemeStore::new(&config.theme_storage_key),
        DocumentThemeSurface::new(
            document.document_element(),
            toggle.clone(),
            &config.light_class,
        ),
    ));
    theme.apply_theme(theme.is_light_theme());

    if let Some(toggle) = toggle {
        dom::listen(&toggle, "click", move |_: Event| {
            let light = theme.toggle_theme();
            debug!("Theme toggled, light={}", light);
        })?;
    }
    Ok(())
}

fn wire_share(
    document: &Document,
    config: &PageConfig,
    notifier: Rc<BannerNotifier>,
) -> Result<(), DomError> {
    let Some(button) = dom::query(document, &config.selectors.share)? else {
        return Ok(());
    };
    let address = dom::query(document, &config.selectors.address)?;
    let share = Rc::new(ShareController::new(BrowserClipboard, notifier));

    dom::listen(&button, "click", move |_: Event| {
        let text = address.as_ref().map(read_address).unwrap_or_default();
        let share = share.clone();
        wasm_bindgen_futures::spawn_local(async move {
            share.share(&text).await;
        });
    })
}

/// Address shown on the view page, from an input's value or the element text.
fn read_address(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
        return input.value();
    }
    element.text_content().unwrap_or_default()
}

fn wire_line_numbers(
    document: &Document,
    config: &PageConfig,
    input: &HtmlTextAreaElement,
) -> Result<(), DomError> {
    let selectors = &config.selectors;
    let (Some(container), Some(template)) = (
        dom::query(document, &selectors.line_numbers)?,
        dom::query(document, &selectors.line_number)?,
    ) else {
        warn!("Line number gutter not found, skipping");
        return Ok(());
    };

    let renderer = Rc::new(LineNumberRenderer::new(DomLineGutter::new(
        container, &template,
    )?));
    renderer.render(&input.value());

    let on_input = {
        let renderer = renderer.clone();
        let input = input.clone();
        move |_: Event| renderer.render(&input.value())
    };
    dom::listen(input, "input", on_input)?;

    let on_scroll = {
        let input = input.clone();
        move |_: Event| renderer.sync_scroll(input.scroll_top())
    };
    dom::listen(input, "scroll", on_scroll)
}

fn wire_save(
    document: &Document,
    config: &PageConfig,
    input: HtmlTextAreaElement,
    notifier: Rc<BannerNotifier>,
) -> Result<(), DomError> {
    let selectors = &config.selectors;
    let language = dom::query_as::<HtmlSelectElement>(document, &selectors.language, "select")?;
    let Some(button) = dom::query_as::<HtmlElement>(document, &selectors.save, "element")? else {
        warn!("Save control not found, saving disabled");
        return Ok(());
    };

    let save = Rc::new(SaveController::new(
        HttpSnippetApi::new(config.endpoint_url()),
        EditorPage::new(document.clone(), input, language, Some(button.clone())),
        notifier,
    ));

    dom::listen(&button, "click", move |_: Event| {
        let save = save.clone();
        wasm_bindgen_futures::spawn_local(async move {
            save.save().await;
        });
    })?;

    dom::listen(document, "keydown", move |event: KeyboardEvent| {
        if is_save_shortcut(&event.key(), event.ctrl_key(), event.meta_key()) {
            event.prevent_default();
            button.click();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_kind_follows_text_area() {
        assert_eq!(PageKind::detect(true), PageKind::Editor);
        assert_eq!(PageKind::detect(false), PageKind::View);
    }

    #[test]
    fn test_save_shortcut() {
        assert!(is_save_shortcut("s", true, false));
        assert!(is_save_shortcut("S", true, false));
        assert!(is_save_shortcut("s", false, true));
        assert!(!is_save_shortcut("s", false, false));
        assert!(!is_save_shortcut("d", true, false));
        assert!(!is_save_shortcut("Shift", true, false));
    }
}
