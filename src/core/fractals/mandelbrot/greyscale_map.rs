use crate::core::actions::project_field::ports::colour_map::ColourMap;
use crate::core::data::colour::{Colour, COLOUR_BLACK};
use std::error::Error;
use std::fmt;

/// Greyscale ramp: budget-saturated cells are black, escaped
/// cells fade from near-black to white as they escape faster.
#[derive(Debug)]
pub struct GreyscaleEscapeMap {
    max_iterations: u32,
}

#[derive(Debug)]
pub enum GreyscaleMapError {
    IterationsExceedBudget {
        iterations: u32,
        max_iterations: u32,
    },
}

impl fmt::Display for GreyscaleMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IterationsExceedBudget {
                iterations,
                max_iterations,
            } => {
                write!(
                    f,
                    "iterations {} exceeds budget {}",
                    iterations, max_iterations
                )
            }
        }
    }
}

impl Error for GreyscaleMapError {}

impl ColourMap<u32> for GreyscaleEscapeMap {
    fn map(&self, iterations: u32) -> Result<Colour, Box<dyn Error>> {
        if iterations > self.max_iterations {
            return Err(Box::new(GreyscaleMapError::IterationsExceedBudget {
                iterations,
                max_iterations: self.max_iterations,
            }));
        }

        if iterations == self.max_iterations {
            return Ok(COLOUR_BLACK);
        }

        // Counts at 255 and above would underflow the ramp; clamp them to
        // black instead of leaving the band unspecified.
        let shade = (255 - iterations.min(255)) as u8;
        Ok(Colour {
            r: shade,
            g: shade,
            b: shade,
        })
    }

    fn display_name(&self) -> &str {
        "Greyscale escape ramp"
    }
}

impl GreyscaleEscapeMap {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturated_count_is_black() {
        let map = GreyscaleEscapeMap::new(100);

        assert_eq!(map.map(100).unwrap(), COLOUR_BLACK);
    }

    #[test]
    fn test_low_counts_follow_greyscale_ramp() {
        let map = GreyscaleEscapeMap::new(100);

        assert_eq!(
            map.map(0).unwrap(),
            Colour {
                r: 255,
                g: 255,
                b: 255
            }
        );
        assert_eq!(
            map.map(1).unwrap(),
            Colour {
                r: 254,
                g: 254,
                b: 254
            }
        );
        assert_eq!(
            map.map(99).unwrap(),
            Colour {
                r: 156,
                g: 156,
                b: 156
            }
        );
    }

    #[test]
    fn test_deep_band_clamps_to_black() {
        // Only reachable when the budget exceeds 255.
        let map = GreyscaleEscapeMap::new(400);

        assert_eq!(map.map(255).unwrap(), COLOUR_BLACK);
        assert_eq!(map.map(300).unwrap(), COLOUR_BLACK);
        assert_eq!(
            map.map(254).unwrap(),
            Colour { r: 1, g: 1, b: 1 }
        );
    }

    #[test]
    fn test_count_over_budget_is_an_error() {
        let map = GreyscaleEscapeMap::new(100);

        let result = map.map(101);

        assert!(result.is_err());
    }
}
