//! Input adapters for the explorer.
//!
//! Adapters translate presentation-library events into the engine's input
//! vocabulary.

#[cfg(feature = "gui")]
pub mod gui;
