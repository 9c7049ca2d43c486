use crate::core::actions::project_field::ports::colour_map::ColourMap;
use crate::core::actions::project_field::ports::pixel_sink::PixelSink;
use crate::core::data::field::{Field, FieldError};
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ProjectFieldError {
    Field(FieldError),
    ColourMap(Box<dyn Error>),
}

impl fmt::Display for ProjectFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(e) => write!(f, "field error: {}", e),
            Self::ColourMap(e) => write!(f, "colour map error: {}", e),
        }
    }
}

impl Error for ProjectFieldError {}

/// Projects every cell of the field through the colour map into the sink.
///
/// Row-major, same traversal order as the fill, so partially computed
/// fields paint top-down.
pub fn project_field<M, S>(
    field: &Field,
    colour_map: &M,
    sink: &mut S,
) -> Result<(), ProjectFieldError>
where
    M: ColourMap<u32>,
    S: PixelSink,
{
    for y in 0..field.height() {
        for x in 0..field.width() {
            let cell = Point {
                x: x as i32,
                y: y as i32,
            };
            let count = field.get(cell).map_err(ProjectFieldError::Field)?;
            let colour = colour_map.map(count).map_err(ProjectFieldError::ColourMap)?;
            sink.set_pixel(cell, colour);
        }
    }

    Ok(())
}
