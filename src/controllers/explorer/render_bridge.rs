use crate::controllers::explorer::engine::EngineShared;
use crate::core::actions::project_field::ports::colour_map::ColourMap;
use crate::core::actions::project_field::ports::pixel_sink::PixelSink;
use crate::core::actions::project_field::project_field::{project_field, ProjectFieldError};
use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::greyscale_map::GreyscaleEscapeMap;
use std::error::Error;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Read side of the engine: the presentation layer polls the coalesced
/// redraw flag and repaints the whole field when it was raised.
///
/// Field reads are deliberately unsynchronised with run boundaries: a
/// frame may mix cells from a superseded run with cells from the current
/// one during the handoff window. The in-flight recompute overwrites the
/// mix within a few rows, so it is at worst a one-frame artifact.
pub struct RenderBridge {
    shared: Arc<EngineShared>,
}

/// During the handoff after `go_home`, a stale cell can carry a count from
/// a larger, since-reset budget. Clamping to the current budget projects
/// those cells as saturated instead of failing the frame.
struct StaleTolerantMap {
    inner: GreyscaleEscapeMap,
    max_iterations: u32,
}

impl ColourMap<u32> for StaleTolerantMap {
    fn map(&self, iterations: u32) -> Result<Colour, Box<dyn Error>> {
        self.inner.map(iterations.min(self.max_iterations))
    }

    fn display_name(&self) -> &str {
        self.inner.display_name()
    }
}

impl RenderBridge {
    pub(crate) fn new(shared: Arc<EngineShared>) -> Self {
        Self { shared }
    }

    /// Peeks at the redraw flag without clearing it.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.shared.redraw.load(Ordering::Acquire)
    }

    /// Clears the flag and repaints every cell through the sink if it was
    /// set; otherwise does nothing. Returns whether anything was drawn.
    pub fn consume_and_redraw<S: PixelSink>(
        &self,
        sink: &mut S,
    ) -> Result<bool, ProjectFieldError> {
        if !self.shared.redraw.swap(false, Ordering::AcqRel) {
            return Ok(false);
        }

        let max_iterations = self.shared.view.lock().unwrap().max_iterations();
        let colour_map = StaleTolerantMap {
            inner: GreyscaleEscapeMap::new(max_iterations),
            max_iterations,
        };

        let field = self.shared.field.lock().unwrap();
        project_field(&field, &colour_map, sink)?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::explorer::engine::ExplorerEngine;
    use crate::core::data::colour::{COLOUR_BLACK, COLOUR_WHITE};
    use crate::core::data::point::Point;
    use std::thread;
    use std::time::{Duration, Instant};

    struct GridSink {
        width: u32,
        pixels: Vec<Colour>,
    }

    impl GridSink {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                pixels: vec![COLOUR_WHITE; (width * height) as usize],
            }
        }

        fn at(&self, x: u32, y: u32) -> Colour {
            self.pixels[(y * self.width + x) as usize]
        }
    }

    impl PixelSink for GridSink {
        fn set_pixel(&mut self, pixel: Point, colour: Colour) {
            let index = pixel.y as u32 * self.width + pixel.x as u32;
            self.pixels[index as usize] = colour;
        }
    }

    fn wait_for_completion(engine: &ExplorerEngine, timeout: Duration) {
        let generation = engine.latest_generation();
        let start = Instant::now();
        while engine.last_completed_generation() < generation {
            assert!(
                start.elapsed() < timeout,
                "run did not complete within {timeout:?}"
            );
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_flag_starts_clear_and_rises_with_rows() {
        let engine = ExplorerEngine::new(120, 90, 2.0 / 90.0).unwrap();
        let bridge = engine.render_bridge();

        assert!(!bridge.is_dirty());

        engine.go_home().unwrap();
        wait_for_completion(&engine, Duration::from_secs(5));

        assert!(bridge.is_dirty());
        // Peeking does not clear.
        assert!(bridge.is_dirty());
    }

    #[test]
    fn test_consume_clears_flag_and_coalesces() {
        let engine = ExplorerEngine::new(120, 90, 2.0 / 90.0).unwrap();
        let bridge = engine.render_bridge();
        let mut sink = GridSink::new(120, 90);

        engine.go_home().unwrap();
        wait_for_completion(&engine, Duration::from_secs(5));

        // Many row completions coalesced into a single consume.
        assert!(bridge.consume_and_redraw(&mut sink).unwrap());
        assert!(!bridge.is_dirty());
        assert!(!bridge.consume_and_redraw(&mut sink).unwrap());
    }

    #[test]
    fn test_home_view_paints_cardioid_black_at_center() {
        // Same plane coverage as the full 1200x900 screen at init scale
        // 2/900, at a tenth the raster.
        let engine = ExplorerEngine::new(120, 90, 2.0 / 90.0).unwrap();
        let bridge = engine.render_bridge();
        let mut sink = GridSink::new(120, 90);

        engine.go_home().unwrap();
        wait_for_completion(&engine, Duration::from_secs(5));
        assert!(bridge.consume_and_redraw(&mut sink).unwrap());

        // Center pixel maps to (-0.5, 0), inside the main cardioid.
        assert_eq!(sink.at(60, 45), COLOUR_BLACK);
        // The far corner escapes almost immediately and paints near-white.
        let corner = sink.at(0, 0);
        assert!(corner.r > 240);
        assert_eq!(corner.r, corner.g);
        assert_eq!(corner.g, corner.b);
    }

    #[test]
    fn test_stale_counts_above_budget_render_saturated() {
        let engine = ExplorerEngine::new(16, 12, 0.2).unwrap();
        let bridge = engine.render_bridge();
        let mut sink = GridSink::new(16, 12);

        // Simulate leftovers from a larger budget surviving into a view
        // with a smaller one.
        {
            let mut field = bridge.shared.field.lock().unwrap();
            field.set(Point { x: 3, y: 3 }, 150).unwrap();
        }
        bridge.shared.redraw.store(true, Ordering::Release);

        assert!(bridge.consume_and_redraw(&mut sink).unwrap());
        assert_eq!(sink.at(3, 3), COLOUR_BLACK);
    }
}
