//! Application layer errors

use thiserror::Error;

/// Failures talking to the remote assistant.
///
/// All variants collapse into the same user-visible warning; the detail
/// only goes to the log.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP error! status: {status}, body: {body}")]
    Status { status: u16, body: String },

    #[error("Payload error: {0}")]
    Payload(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Top-level errors for the chat front end
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Assistant error: {0}")]
    Assistant(#[from] AssistantError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
