//! CityGym chat client
//!
//! A chat session controller that exchanges messages with a remote
//! assistant backend over HTTP, plus a console front end.

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use application::services::{ChatSession, SubmitOutcome, FAILURE_REPLY};
pub use infrastructure::assistant::HttpAssistant;
pub use infrastructure::config::Config;
