//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Assistant: HTTP client for the remote chat backend
//! - Adapters: Front ends (console)

pub mod config;
pub mod assistant;
pub mod adapters;
