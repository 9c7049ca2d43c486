//! GUI input adapter for interactive exploration.
//!
//! A windowed interface using winit for window management and pixels for
//! framebuffer rendering.

mod app;

pub use app::run_gui;
