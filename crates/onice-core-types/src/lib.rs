//! Core types shared across onice crates
//!
//! - **Correlation types**: RunId, RunContext
//! - **Schema constants**: Log field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RunContext, RunId};
