//! Core types for the meal planner.

pub mod generation;
pub mod message;
pub mod plan;
pub mod usage;

pub use generation::*;
pub use message::*;
pub use plan::*;
pub use usage::*;
