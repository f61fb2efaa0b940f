//! Remote assistant integration

pub mod http;

pub use http::HttpAssistant;

#[cfg(test)]
mod tests;
