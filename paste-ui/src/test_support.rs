//! In-memory doubles for the controller ports.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use shared_types::{CreatedSnippet, SnippetSubmission};

use crate::api::{ApiError, SnippetApi};
use crate::dom::DomError;
use crate::notice::{Notice, NoticeKind, Notifier};
use crate::save::SavePage;

#[derive(Clone, Default)]
pub(crate) struct RecordingNotifier {
    notices: Rc<RefCell<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub(crate) fn kinds(&self) -> Vec<NoticeKind> {
        self.notices.borrow().iter().map(|n| n.kind).collect()
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.notices.borrow().iter().map(|n| n.message.clone()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

/// Returns `Pending` on the first poll, then `Ready`.
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

#[derive(Clone)]
pub(crate) struct FakeApi {
    answer: Rc<RefCell<Result<String, ApiError>>>,
    requests: Rc<RefCell<Vec<SnippetSubmission>>>,
    suspend: bool,
}

impl FakeApi {
    pub(crate) fn answering(answer: Result<&str, ApiError>) -> Self {
        Self {
            answer: Rc::new(RefCell::new(answer.map(str::to_string))),
            requests: Rc::default(),
            suspend: false,
        }
    }

    /// Suspend once inside each call, like a real network round trip.
    pub(crate) fn pending_once(mut self) -> Self {
        self.suspend = true;
        self
    }

    pub(crate) fn set_answer(&self, answer: Result<&str, ApiError>) {
        *self.answer.borrow_mut() = answer.map(str::to_string);
    }

    pub(crate) fn requests(&self) -> Vec<SnippetSubmission> {
        self.requests.borrow().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[async_trait(?Send)]
impl SnippetApi for FakeApi {
    async fn create_snippet(&self, submission: &SnippetSubmission) -> Result<CreatedSnippet, ApiError> {
        self.requests.borrow_mut().push(submission.clone());
        if self.suspend {
            YieldOnce(false).await;
        }
        let answer = self.answer.borrow().clone();
        answer.map(|address| CreatedSnippet { address })
    }
}

#[derive(Clone)]
pub(crate) struct FakePage {
    text: String,
    language: String,
    busy: Rc<RefCell<Vec<bool>>>,
    navigations: Rc<RefCell<Vec<String>>>,
    fatal_renders: Rc<RefCell<Vec<String>>>,
    fail_navigation: Rc<Cell<bool>>,
}

impl FakePage {
    pub(crate) fn new(text: &str, language: &str) -> Self {
        Self {
            text: text.to_string(),
            language: language.to_string(),
            busy: Rc::default(),
            navigations: Rc::default(),
            fatal_renders: Rc::default(),
            fail_navigation: Rc::default(),
        }
    }

    pub(crate) fn failing_navigation(self) -> Self {
        self.fail_navigation.set(true);
        self
    }

    pub(crate) fn busy_history(&self) -> Vec<bool> {
        self.busy.borrow().clone()
    }

    pub(crate) fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    pub(crate) fn fatal_renders(&self) -> Vec<String> {
        self.fatal_renders.borrow().clone()
    }
}

impl SavePage for FakePage {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn language(&self) -> String {
        self.language.clone()
    }

    fn set_busy(&self, busy: bool) {
        self.busy.borrow_mut().push(busy);
    }

    fn navigate(&self, address: &str) -> Result<(), DomError> {
        if self.fail_navigation.get() {
            return Err(DomError::Js("SecurityError".to_string()));
        }
        self.navigations.borrow_mut().push(address.to_string());
        Ok(())
    }

    fn render_fatal(&self, markup: &str) -> Result<(), DomError> {
        self.fatal_renders.borrow_mut().push(markup.to_string());
        Ok(())
    }
}
