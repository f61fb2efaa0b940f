//! Chat session controller
//!
//! Owns the transcript, the draft and the busy flag. At most one submission
//! is outstanding at a time; a second submit while busy is silently ignored.
//! Submitting is split in two so front ends can keep handling input while a
//! reply is pending:
//!
//! 1. [`ChatSession::begin_submit`] appends the user entry, clears the draft
//!    and sets busy, all synchronously.
//! 2. [`PendingSubmission::settle`] performs the request and appends the
//!    reply (or the failure notice).
//!
//! Busy is cleared by a drop guard owned by the pending submission, so it is
//! reset on every exit path, including the submission being dropped.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use super::input::{Key, KeyPress, Suggestion};
use crate::domain::entities::{MessageEntry, Transcript};
use crate::domain::traits::{Assistant, SessionObserver};

/// Bot entry appended when the assistant cannot be reached
pub const FAILURE_REPLY: &str = "⚠️ Failed to connect to the server. Please try again later.";

/// Why a submit was a no-op
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Text was empty after trimming
    Empty,
    /// Another submission is still outstanding
    Busy,
}

/// How a submission settled. Informational only; no outcome is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ignored(IgnoreReason),
    Replied,
    Failed,
}

/// Result of dispatching a key press
#[derive(Debug)]
pub enum KeyOutcome {
    /// Plain Enter started a submission; the caller drives it with `settle`
    Submitted(PendingSubmission),
    /// Plain Enter, but the submit precondition failed
    Rejected(IgnoreReason),
    /// Default text input behaviour was applied to the draft
    Edited,
    /// Nothing happened
    Ignored,
}

#[derive(Debug, Default)]
struct SessionState {
    transcript: Transcript,
    draft: String,
    busy: bool,
}

struct Inner {
    state: Mutex<SessionState>,
    assistant: Arc<dyn Assistant>,
    observers: RwLock<Vec<Arc<dyn SessionObserver>>>,
}

/// Handle to a chat session. Clones share the same session.
#[derive(Clone)]
pub struct ChatSession {
    inner: Arc<Inner>,
}

impl ChatSession {
    pub fn new(assistant: Arc<dyn Assistant>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(SessionState::default()),
                assistant,
                observers: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Register an observer for state changes
    pub fn subscribe(&self, observer: Arc<dyn SessionObserver>) {
        self.inner
            .observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observer);
    }

    /// Snapshot of the transcript
    pub fn transcript(&self) -> Transcript {
        self.state().transcript.clone()
    }

    pub fn draft(&self) -> String {
        self.state().draft.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state().busy
    }

    /// Replace the draft. No validation, no length limit.
    pub fn update_draft(&self, text: impl Into<String>) {
        let draft = text.into();
        self.state().draft = draft.clone();
        self.notify(|o| o.draft_changed(&draft));
    }

    /// Quick-fill the draft with a preset prompt. Never submits.
    pub fn apply_suggestion(&self, suggestion: Suggestion) {
        tracing::debug!("Applying suggestion: {:?}", suggestion);
        self.update_draft(suggestion.text());
    }

    /// Submit `text` and wait for the reply to be appended.
    pub async fn submit(&self, text: impl Into<String>) -> SubmitOutcome {
        match self.begin_submit(text) {
            Ok(pending) => pending.settle().await,
            Err(reason) => SubmitOutcome::Ignored(reason),
        }
    }

    /// Submit whatever the draft currently holds
    pub async fn submit_draft(&self) -> SubmitOutcome {
        match self.begin_submit_draft() {
            Ok(pending) => pending.settle().await,
            Err(reason) => SubmitOutcome::Ignored(reason),
        }
    }

    /// Start a submission: append the user entry, clear the draft, set busy.
    ///
    /// Fails without touching any state when `text` is blank or a submission
    /// is already outstanding.
    pub fn begin_submit(&self, text: impl Into<String>) -> Result<PendingSubmission, IgnoreReason> {
        let text = text.into();
        self.start_submission(move |_| text)
    }

    /// Start a submission from the current draft
    pub fn begin_submit_draft(&self) -> Result<PendingSubmission, IgnoreReason> {
        self.start_submission(|state| state.draft.clone())
    }

    /// Pick the text, check the preconditions and commit steps 1-3 under one lock
    fn start_submission(
        &self,
        pick: impl FnOnce(&SessionState) -> String,
    ) -> Result<PendingSubmission, IgnoreReason> {
        let (text, entry, version) = {
            let mut state = self.state();
            let text = pick(&state);
            if text.trim().is_empty() {
                return Err(IgnoreReason::Empty);
            }
            if state.busy {
                tracing::debug!("Submission ignored, request already in flight");
                return Err(IgnoreReason::Busy);
            }
            let entry = MessageEntry::user(text.clone());
            let version = state.transcript.push(entry.clone());
            state.draft.clear();
            state.busy = true;
            (text, entry, version)
        };
        let busy = BusyGuard {
            session: self.clone(),
        };

        self.notify(|o| o.transcript_changed(&entry, version));
        self.notify(|o| o.draft_changed(""));
        self.notify(|o| o.busy_changed(true));

        Ok(PendingSubmission {
            session: self.clone(),
            text,
            _busy: busy,
        })
    }

    /// Keypress dispatch.
    ///
    /// Enter without Shift submits the draft instead of inserting a newline.
    /// Every other key gets default text input behaviour: characters append,
    /// Shift+Enter appends a newline, Backspace drops the last character.
    pub fn handle_key(&self, press: KeyPress) -> KeyOutcome {
        if press.is_submit() {
            return match self.begin_submit_draft() {
                Ok(pending) => KeyOutcome::Submitted(pending),
                Err(reason) => KeyOutcome::Rejected(reason),
            };
        }

        match press.key {
            Key::Enter => self.edit_draft(|d| {
                d.push('\n');
                true
            }),
            Key::Char(c) => self.edit_draft(|d| {
                d.push(c);
                true
            }),
            Key::Backspace => self.edit_draft(|d| d.pop().is_some()),
            Key::Other => KeyOutcome::Ignored,
        }
    }

    /// Dispatch a key press, settling any submission it starts
    pub async fn dispatch_key(&self, press: KeyPress) -> Option<SubmitOutcome> {
        match self.handle_key(press) {
            KeyOutcome::Submitted(pending) => Some(pending.settle().await),
            KeyOutcome::Rejected(reason) => Some(SubmitOutcome::Ignored(reason)),
            KeyOutcome::Edited | KeyOutcome::Ignored => None,
        }
    }

    fn edit_draft(&self, edit: impl FnOnce(&mut String) -> bool) -> KeyOutcome {
        let draft = {
            let mut state = self.state();
            if !edit(&mut state.draft) {
                return KeyOutcome::Ignored;
            }
            state.draft.clone()
        };
        self.notify(|o| o.draft_changed(&draft));
        KeyOutcome::Edited
    }

    fn append(&self, entry: MessageEntry) {
        let version = self.state().transcript.push(entry.clone());
        self.notify(|o| o.transcript_changed(&entry, version));
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, event: impl Fn(&dyn SessionObserver)) {
        let observers = self
            .inner
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for observer in &observers {
            event(observer.as_ref());
        }
    }
}

impl fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("ChatSession")
            .field("assistant", &self.inner.assistant.name())
            .field("entries", &state.transcript.len())
            .field("busy", &state.busy)
            .finish()
    }
}

/// A submission whose user entry is already in the transcript.
///
/// Dropping it without settling clears busy and sends nothing.
#[must_use = "a pending submission does nothing until settled"]
pub struct PendingSubmission {
    session: ChatSession,
    text: String,
    _busy: BusyGuard,
}

impl PendingSubmission {
    /// The submitted text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Send the request and append the reply, or the failure notice.
    pub async fn settle(self) -> SubmitOutcome {
        let assistant = self.session.inner.assistant.clone();
        tracing::info!("Sending message to {} ({} chars)", assistant.name(), self.text.len());

        match assistant.reply(&self.text).await {
            Ok(reply) => {
                tracing::debug!("Received reply ({} chars)", reply.len());
                self.session.append(MessageEntry::bot(reply));
                SubmitOutcome::Replied
            }
            Err(e) => {
                tracing::error!("API Error: {}", e);
                self.session.append(MessageEntry::bot(FAILURE_REPLY));
                SubmitOutcome::Failed
            }
        }
    }
}

impl fmt::Debug for PendingSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingSubmission")
            .field("text", &self.text)
            .finish()
    }
}

struct BusyGuard {
    session: ChatSession,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.session.state().busy = false;
        self.session.notify(|o| o.busy_changed(false));
    }
}
