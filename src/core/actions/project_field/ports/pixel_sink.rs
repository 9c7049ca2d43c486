use crate::core::data::colour::Colour;
use crate::core::data::point::Point;

/// Port the presentation layer implements to receive projected pixels.
///
/// Implementations are plain raster writers; coordinates are always within
/// the field bounds when called from `project_field`.
pub trait PixelSink {
    fn set_pixel(&mut self, pixel: Point, colour: Colour);
}
