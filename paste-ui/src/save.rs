//! Save/submit flow for the editor page.
//!
//! `Idle -> Submitting -> {Succeeded, Failed}`. The controller stays armed
//! after every outcome; only `Submitting` blocks a new attempt, so a rapid
//! double click or click + Ctrl+S issues a single request.

use std::cell::Cell;

use dioxus_logger::tracing::{debug, error, info, warn};
use shared_types::{SnippetSubmission, SubmissionError};
use web_sys::{Document, DomParser, HtmlElement, HtmlSelectElement, HtmlTextAreaElement, SupportedType};

use crate::api::{ApiError, SnippetApi};
use crate::dom::DomError;
use crate::notice::{Notice, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, thiserror::Error, Clone)]
pub enum SaveError {
    #[error(transparent)]
    Validation(#[from] SubmissionError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Editor elements the save flow reads and drives.
pub trait SavePage {
    fn text(&self) -> String;
    fn language(&self) -> String;
    /// Disable the save control while a request is in flight.
    fn set_busy(&self, busy: bool);
    /// Full navigation to `address`, replacing the current history entry.
    fn navigate(&self, address: &str) -> Result<(), DomError>;
    /// Replace the whole document with `markup`. Irreversible.
    fn render_fatal(&self, markup: &str) -> Result<(), DomError>;
}

pub struct SaveController<A, P, N> {
    api: A,
    page: P,
    notifier: N,
    state: Cell<SaveState>,
}

impl<A: SnippetApi, P: SavePage, N: Notifier> SaveController<A, P, N> {
    pub fn new(api: A, page: P, notifier: N) -> Self {
        Self {
            api,
            page,
            notifier,
            state: Cell::new(SaveState::Idle),
        }
    }

    pub fn state(&self) -> SaveState {
        self.state.get()
    }

    /// Run one save attempt and return the state it ends in.
    pub async fn save(&self) -> SaveState {
        if self.state.get() == SaveState::Submitting {
            debug!("Save already in flight, ignoring trigger");
            return SaveState::Submitting;
        }

        let submission = match self.prepare() {
            Ok(submission) => submission,
            Err(e) => {
                let next = self.finish_failure(e);
                self.state.set(next);
                return next;
            }
        };

        self.state.set(SaveState::Submitting);
        self.page.set_busy(true);
        info!(
            "Saving snippet: {} lines, lang={}",
            submission.line_count, submission.lang
        );

        let next = match self.submit(&submission).await {
            Ok(address) => self.finish_success(&address),
            Err(e) => self.finish_failure(e),
        };

        if next != SaveState::Succeeded {
            self.page.set_busy(false);
        }
        self.state.set(next);
        next
    }

    /// Build the submission from the editor; the single validation point.
    fn prepare(&self) -> Result<SnippetSubmission, SaveError> {
        Ok(SnippetSubmission::new(self.page.text(), &self.page.language())?)
    }

    async fn submit(&self, submission: &SnippetSubmission) -> Result<String, SaveError> {
        let created = self.api.create_snippet(submission).await?;
        Ok(created.address)
    }

    fn finish_success(&self, address: &str) -> SaveState {
        info!("Snippet saved at {}", address);
        match self.page.navigate(address) {
            Ok(()) => SaveState::Succeeded,
            Err(e) => {
                error!("Failed to navigate to {}: {}", address, e);
                self.notifier
                    .notify(Notice::error(format!("Saved, but could not open {address}")));
                SaveState::Idle
            }
        }
    }

    fn finish_failure(&self, err: SaveError) -> SaveState {
        match err {
            SaveError::Validation(e) => {
                debug!("Save blocked: {}", e);
                self.notifier.notify(Notice::validation(validation_message(&e)));
                SaveState::Idle
            }
            SaveError::Api(ApiError::Server { status, markup }) => {
                warn!("Server rejected snippet with HTTP {}", status);
                if let Err(e) = self.page.render_fatal(&markup) {
                    error!("Failed to render server error page: {}", e);
                    self.notifier
                        .notify(Notice::error(format!("Server error (HTTP {status})")));
                }
                SaveState::Failed
            }
            SaveError::Api(e @ ApiError::ContractViolation(_)) => {
                error!("{}", e);
                self.notifier.notify(Notice::error(
                    "The server answered without a snippet address; nothing was opened",
                ));
                SaveState::Idle
            }
            SaveError::Api(e) => {
                warn!("{}", e);
                self.notifier
                    .notify(Notice::error("Could not reach the server, try again"));
                SaveState::Idle
            }
        }
    }
}

fn validation_message(err: &SubmissionError) -> &'static str {
    match err {
        SubmissionError::BlankText => "Nothing to save: the snippet is empty",
        SubmissionError::MissingLanguage => "Pick a language before saving",
        SubmissionError::NoLines(_) => "Nothing to save: the snippet has no lines",
    }
}

// ============================================================================
// Browser adapter
// ============================================================================

pub struct EditorPage {
    document: Document,
    input: HtmlTextAreaElement,
    language: Option<HtmlSelectElement>,
    save_button: Option<HtmlElement>,
}

impl EditorPage {
    pub fn new(
        document: Document,
        input: HtmlTextAreaElement,
        language: Option<HtmlSelectElement>,
        save_button: Option<HtmlElement>,
    ) -> Self {
        Self {
            document,
            input,
            language,
            save_button,
        }
    }
}

impl SavePage for EditorPage {
    fn text(&self) -> String {
        self.input.value()
    }

    fn language(&self) -> String {
        self.language
            .as_ref()
            .map(|select| select.value())
            .unwrap_or_default()
    }

    fn set_busy(&self, busy: bool) {
        if let Some(button) = &self.save_button {
            let result = if busy {
                button
                    .set_attribute("disabled", "")
                    .and_then(|_| button.set_attribute("aria-busy", "true"))
            } else {
                button
                    .remove_attribute("disabled")
                    .and_then(|_| button.remove_attribute("aria-busy"))
            };
            if let Err(e) = result {
                debug!("Failed to update save control (busy={}): {:?}", busy, e);
            }
        }
    }

    fn navigate(&self, address: &str) -> Result<(), DomError> {
        let window = web_sys::window().ok_or(DomError::NoDocument)?;
        window.location().replace(address)?;
        Ok(())
    }

    fn render_fatal(&self, markup: &str) -> Result<(), DomError> {
        let parsed = DomParser::new()?.parse_from_string(markup, SupportedType::TextHtml)?;
        let new_root = parsed
            .document_element()
            .ok_or_else(|| DomError::Js("error markup has no root element".to_string()))?;
        let old_root = self
            .document
            .document_element()
            .ok_or(DomError::NoDocument)?;
        let adopted = self.document.adopt_node(&new_root)?;
        self.document.replace_child(&adopted, &old_root)?;
        Ok(())
    }
}
