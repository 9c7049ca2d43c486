use crate::core::actions::cancellation::NeverCancel;
use crate::core::actions::fill_field::{fill_field, FillFieldError};
use crate::core::data::field::{Field, FieldError};
use crate::core::data::point::Point;
use crate::core::data::view_state::ViewStateError;
use crate::core::util::plane_mapping::home_view;
use std::error::Error;
use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub enum SurveyError {
    Field(FieldError),
    View(ViewStateError),
    Fill(FillFieldError),
}

impl fmt::Display for SurveyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(e) => write!(f, "field error: {}", e),
            Self::View(e) => write!(f, "view error: {}", e),
            Self::Fill(e) => write!(f, "fill error: {}", e),
        }
    }
}

impl Error for SurveyError {}

/// Summary of one synchronous home-view computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSurvey {
    pub width: u32,
    pub height: u32,
    pub max_iterations: u32,
    pub saturated_cells: u64,
    pub escaped_cells: u64,
    pub duration: Duration,
}

/// Computes the home view once, uninterruptibly, and reports field
/// statistics. The smoke path for the default binary: exercises the
/// mapper, the evaluator, and the row-progressive fill without a window.
pub fn survey_home_view(
    width: u32,
    height: u32,
    init_scale: f64,
    max_iterations: u32,
) -> Result<FieldSurvey, SurveyError> {
    let view =
        home_view(width, height, init_scale, max_iterations).map_err(SurveyError::View)?;
    let field = Mutex::new(Field::new(width, height).map_err(SurveyError::Field)?);

    println!("Computing home view...");
    println!("Field size: {}x{}", width, height);
    println!("Max iterations: {}", max_iterations);

    let start = Instant::now();
    fill_field(&view, &field, &NeverCancel, || {}).map_err(SurveyError::Fill)?;
    let duration = start.elapsed();

    let field = field.lock().unwrap();
    let mut saturated_cells = 0u64;
    let mut escaped_cells = 0u64;

    for y in 0..height {
        for x in 0..width {
            let count = field
                .get(Point {
                    x: x as i32,
                    y: y as i32,
                })
                .map_err(SurveyError::Field)?;
            if count >= max_iterations {
                saturated_cells += 1;
            } else {
                escaped_cells += 1;
            }
        }
    }

    Ok(FieldSurvey {
        width,
        height,
        max_iterations,
        saturated_cells,
        escaped_cells,
        duration,
    })
}
