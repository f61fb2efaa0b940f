//! Domain layer - Core chat model with no infrastructure dependencies
//! 
//! This layer contains:
//! - Entities: Transcript and its message entries
//! - Traits: Abstractions for the remote assistant and the view (Assistant, SessionObserver)

pub mod entities;
pub mod traits;
