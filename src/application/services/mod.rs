//! Application services

pub mod chat_session;
pub mod input;

pub use chat_session::{
    ChatSession, IgnoreReason, KeyOutcome, PendingSubmission, SubmitOutcome, FAILURE_REPLY,
};
pub use input::{Key, KeyPress, Suggestion};
