use crate::core::data::complex::Complex;

/// Outcome of iterating one point: whether `z = z² + c` left the radius-2
/// disk within the budget, and after how many iterations.
///
/// A non-escaping point reports `iterations == max_iterations`, so
/// saturation is recoverable from the count alone.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EscapeResult {
    pub escaped: bool,
    pub iterations: u32,
}

/// Escape-time test for one complex point.
///
/// Attempts up to `max_iterations - 1` iterations of `z = z*z + c` from
/// `z = 0`, comparing `|z|² > 4` to avoid the square root.
#[must_use]
pub fn evaluate(c: Complex, max_iterations: u32) -> EscapeResult {
    let mut z = Complex {
        real: 0.0,
        imag: 0.0,
    };

    for i in 1..max_iterations {
        z = z * z + c;
        if z.magnitude_squared() > 4.0 {
            return EscapeResult {
                escaped: true,
                iterations: i,
            };
        }
    }

    EscapeResult {
        escaped: false,
        iterations: max_iterations,
    }
}
