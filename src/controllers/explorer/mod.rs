//! Interactive explorer engine.
//!
//! This module owns the application layer for interactive navigation:
//! view-state commands, the single background computation worker with its
//! generation-counter cancellation protocol, and the render bridge the
//! presentation layer polls each frame.
//!
//! # Architecture
//!
//! - **Input**: [`InputEvent`] values translated by a presentation adapter
//! - **Output**: the [`PixelSink`] port fed by [`RenderBridge`]
//! - **Core**: actions from `core/` do the actual computation
//!
//! [`PixelSink`]: crate::core::actions::project_field::ports::pixel_sink::PixelSink

pub mod data;
mod engine;
pub mod events;
mod render_bridge;

pub use data::run_phase::RunPhase;
pub use engine::{
    EngineError, ExplorerEngine, BASELINE_MAX_ITERATIONS, ITERATION_BUDGET_STEP,
    MAX_ITERATIONS_CAP, ZOOM_FACTOR,
};
pub use events::input::{InputEvent, KeyPress, LoopSignal};
pub use render_bridge::RenderBridge;
