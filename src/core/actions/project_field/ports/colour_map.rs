use crate::core::data::colour::Colour;
use std::error::Error;

/// Port mapping one computed value to a display colour.
pub trait ColourMap<T> {
    fn map(&self, value: T) -> Result<Colour, Box<dyn Error>>;
    fn display_name(&self) -> &str;
}
