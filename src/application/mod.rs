//! Application layer - Chat session use cases
//! 
//! This layer contains:
//! - Services: The chat session controller and key dispatch
//! - Errors: Assistant, config and front-end errors

pub mod errors;
pub mod services;
