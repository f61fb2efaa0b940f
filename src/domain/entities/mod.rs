//! Domain entities - Core chat objects with no external dependencies

pub mod message;
pub mod transcript;

pub use message::{MessageEntry, Role};
pub use transcript::Transcript;
