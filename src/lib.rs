mod controllers;
mod core;
mod input;
mod presenters;

pub use controllers::explorer::{
    EngineError, ExplorerEngine, InputEvent, KeyPress, LoopSignal, RenderBridge, RunPhase,
    BASELINE_MAX_ITERATIONS, ITERATION_BUDGET_STEP, MAX_ITERATIONS_CAP, ZOOM_FACTOR,
};
pub use controllers::headless::{survey_home_view, FieldSurvey, SurveyError};

pub use crate::core::actions::cancellation::{
    CancelToken, Cancelled, NeverCancel, CANCEL_CHECK_INTERVAL_CELLS,
};
pub use crate::core::actions::fill_field::{fill_field, FillFieldError};
pub use crate::core::actions::project_field::ports::colour_map::ColourMap;
pub use crate::core::actions::project_field::ports::pixel_sink::PixelSink;
pub use crate::core::actions::project_field::project_field::{project_field, ProjectFieldError};
pub use crate::core::data::colour::{Colour, COLOUR_BLACK, COLOUR_WHITE};
pub use crate::core::data::complex::Complex;
pub use crate::core::data::field::{Field, FieldError};
pub use crate::core::data::point::Point;
pub use crate::core::data::view_state::{ViewState, ViewStateError};
pub use crate::core::fractals::mandelbrot::escape_time::{evaluate, EscapeResult};
pub use crate::core::fractals::mandelbrot::greyscale_map::GreyscaleEscapeMap;
pub use crate::core::util::plane_mapping::{
    centered_view, home_view, pixel_to_point, recenter_zoom, HOME_CENTER,
};
pub use presenters::pixels::frame_sink::PixelsFrameSink;

#[cfg(feature = "gui")]
pub use input::gui::run_gui;
