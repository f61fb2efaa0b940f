//! Domain traits - Abstractions implemented by infrastructure

pub mod assistant;
pub mod observer;

pub use assistant::Assistant;
pub use observer::SessionObserver;
