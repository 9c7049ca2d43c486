use crate::core::data::complex::Complex;
use crate::core::data::point::Point;
use crate::core::data::view_state::{ViewState, ViewStateError};

/// Where `go_home` centers the view. The interesting part of the set sits
/// left of the origin.
pub const HOME_CENTER: Complex = Complex {
    real: -0.5,
    imag: 0.0,
};

/// Maps a pixel coordinate to its point in the complex plane.
///
/// Screen y grows downward while the imaginary axis grows upward, hence the
/// sign flip on the imaginary component. Total over all of `i32`; callers
/// clamp to the visible raster where that matters.
#[must_use]
pub fn pixel_to_point(pixel: Point, view: &ViewState) -> Complex {
    Complex {
        real: view.top_left().real + view.scale() * f64::from(pixel.x),
        imag: view.top_left().imag - view.scale() * f64::from(pixel.y),
    }
}

/// View of `width` x `height` pixels centered on `center` at `scale` plane
/// units per pixel.
pub fn centered_view(
    center: Complex,
    scale: f64,
    width: u32,
    height: u32,
    max_iterations: u32,
) -> Result<ViewState, ViewStateError> {
    let top_left = center
        + Complex {
            real: -scale * f64::from(width) / 2.0,
            imag: scale * f64::from(height) / 2.0,
        };

    ViewState::new(top_left, scale, max_iterations)
}

/// The initial view: centered on [`HOME_CENTER`] at the given scale.
pub fn home_view(
    width: u32,
    height: u32,
    init_scale: f64,
    max_iterations: u32,
) -> Result<ViewState, ViewStateError> {
    centered_view(HOME_CENTER, init_scale, width, height, max_iterations)
}

/// Recenters on a clicked plane point and zooms in by `zoom_factor`.
///
/// A degenerate `old_scale / zoom_factor` (non-finite or non-positive) is
/// rejected by [`ViewState`] validation rather than propagated into the
/// arithmetic.
pub fn recenter_zoom(
    click: Complex,
    old_scale: f64,
    zoom_factor: f64,
    width: u32,
    height: u32,
    max_iterations: u32,
) -> Result<ViewState, ViewStateError> {
    let new_scale = old_scale / zoom_factor;
    centered_view(click, new_scale, width, height, max_iterations)
}
