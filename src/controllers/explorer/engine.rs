use crate::controllers::explorer::data::field_request::{FieldRequest, FieldReset};
use crate::controllers::explorer::data::run_phase::RunPhase;
use crate::controllers::explorer::events::input::{InputEvent, KeyPress, LoopSignal};
use crate::controllers::explorer::render_bridge::RenderBridge;
use crate::core::actions::fill_field::{fill_field, FillFieldError};
use crate::core::actions::project_field::ports::pixel_sink::PixelSink;
use crate::core::actions::project_field::project_field::ProjectFieldError;
use crate::core::data::complex::Complex;
use crate::core::data::field::{Field, FieldError};
use crate::core::data::point::Point;
use crate::core::data::view_state::{ViewState, ViewStateError};
use crate::core::util::plane_mapping::{home_view, pixel_to_point, recenter_zoom};
use log::{debug, error};
use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Budget every fresh session (and `go_home`) starts from.
pub const BASELINE_MAX_ITERATIONS: u32 = 100;
/// Ceiling `extend_budget` refuses to cross.
pub const MAX_ITERATIONS_CAP: u32 = 200;
/// How much one `extend_budget` call adds.
pub const ITERATION_BUDGET_STEP: u32 = 50;
/// Every click zooms in by this fixed factor.
pub const ZOOM_FACTOR: f64 = 5.0;

pub(crate) struct EngineShared {
    generation: AtomicU64,
    last_completed_generation: AtomicU64,
    latest_request: Mutex<Option<(u64, FieldRequest)>>,
    wake: Condvar,
    shutdown: AtomicBool,
    phase: AtomicU8,
    pub(crate) field: Mutex<Field>,
    pub(crate) view: Mutex<ViewState>,
    pub(crate) redraw: AtomicBool,
}

impl EngineShared {
    fn set_phase(&self, phase: RunPhase) {
        self.phase.store(phase.as_u8(), Ordering::Release);
    }

    pub(crate) fn phase(&self) -> RunPhase {
        RunPhase::from_u8(self.phase.load(Ordering::Acquire))
    }
}

#[derive(Debug)]
pub enum EngineError {
    Field(FieldError),
    View(ViewStateError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(e) => write!(f, "field error: {}", e),
            Self::View(e) => write!(f, "view error: {}", e),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(e) => Some(e),
            Self::View(e) => Some(e),
        }
    }
}

/// Owns the view state, the iteration-count field, and the single
/// background worker that fills it.
///
/// Every navigation command supersedes the in-flight run by bumping the
/// generation counter (the run's cancel token compares against it), then
/// drops the new request into a latest-only mailbox. The worker abandons
/// the superseded run at its next poll; because all runs execute on the one
/// worker thread, a previous writer has always returned before the next
/// run touches the field.
pub struct ExplorerEngine {
    shared: Arc<EngineShared>,
    worker: Option<JoinHandle<()>>,
    width: u32,
    height: u32,
    init_scale: f64,
}

impl ExplorerEngine {
    /// Allocates the field (the only point resource exhaustion can
    /// surface) and spawns the worker. No computation starts until the
    /// first command; callers normally issue `go_home()` immediately.
    pub fn new(width: u32, height: u32, init_scale: f64) -> Result<Self, EngineError> {
        let field = Field::new(width, height).map_err(EngineError::Field)?;
        let view =
            home_view(width, height, init_scale, BASELINE_MAX_ITERATIONS).map_err(EngineError::View)?;

        let shared = Arc::new(EngineShared {
            generation: AtomicU64::new(0),
            last_completed_generation: AtomicU64::new(0),
            latest_request: Mutex::new(None),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
            phase: AtomicU8::new(RunPhase::Idle.as_u8()),
            field: Mutex::new(field),
            view: Mutex::new(view),
            redraw: AtomicBool::new(false),
        });

        let worker_shared = Arc::clone(&shared);

        let worker = thread::spawn(move || {
            Self::worker_loop(&worker_shared);
        });

        Ok(Self {
            shared,
            worker: Some(worker),
            width,
            height,
            init_scale,
        })
    }

    /// Back to the initial view; iteration budget returns to the baseline
    /// and the field is zeroed before the recompute.
    pub fn go_home(&self) -> Result<(), EngineError> {
        let view = home_view(
            self.width,
            self.height,
            self.init_scale,
            BASELINE_MAX_ITERATIONS,
        )
        .map_err(EngineError::View)?;

        self.submit(view, FieldReset::Full);
        Ok(())
    }

    /// Recenters on the clicked pixel and zooms in by [`ZOOM_FACTOR`].
    /// The click is mapped through the view current at call time; the
    /// budget carries over unchanged.
    pub fn click_recenter(&self, pixel: Point) -> Result<(), EngineError> {
        let current = *self.shared.view.lock().unwrap();

        debug_assert!(
            pixel.x >= 0
                && pixel.y >= 0
                && (pixel.x as u32) < self.width
                && (pixel.y as u32) < self.height,
            "click at {},{} outside the {}x{} raster",
            pixel.x,
            pixel.y,
            self.width,
            self.height
        );
        let clamped = Point {
            x: pixel.x.clamp(0, self.width as i32 - 1),
            y: pixel.y.clamp(0, self.height as i32 - 1),
        };

        let click = pixel_to_point(clamped, &current);
        let view = recenter_zoom(
            click,
            current.scale(),
            ZOOM_FACTOR,
            self.width,
            self.height,
            current.max_iterations(),
        )
        .map_err(EngineError::View)?;

        debug!("recenter on {} at scale {}", click, view.scale());
        self.submit(view, FieldReset::Full);
        Ok(())
    }

    /// Raises the iteration budget by [`ITERATION_BUDGET_STEP`] up to
    /// [`MAX_ITERATIONS_CAP`] and recomputes every cell in place. At the
    /// cap the budget stays put but the recompute still runs. Not bound to
    /// any input by default; exposed as an engine capability.
    pub fn extend_budget(&self) -> Result<(), EngineError> {
        let current = *self.shared.view.lock().unwrap();

        let budget = if current.max_iterations() < MAX_ITERATIONS_CAP {
            (current.max_iterations() + ITERATION_BUDGET_STEP).min(MAX_ITERATIONS_CAP)
        } else {
            current.max_iterations()
        };

        let view = current
            .with_max_iterations(budget)
            .map_err(EngineError::View)?;

        self.submit(view, FieldReset::Reuse);
        Ok(())
    }

    /// Dispatches one presentation-layer event.
    pub fn on_event(&self, event: InputEvent) -> LoopSignal {
        match event {
            InputEvent::Quit | InputEvent::Key(KeyPress::Escape) => LoopSignal::Quit,
            InputEvent::Key(KeyPress::Home) => {
                if let Err(e) = self.go_home() {
                    error!("go home failed: {}", e);
                }
                LoopSignal::Continue
            }
            InputEvent::Key(KeyPress::Other) => LoopSignal::Continue,
            InputEvent::Click(pixel) => {
                if let Err(e) = self.click_recenter(pixel) {
                    error!("click recenter failed: {}", e);
                }
                LoopSignal::Continue
            }
        }
    }

    /// Once-per-frame hook: repaints through the sink if any row landed
    /// since the last consume. Returns whether anything was drawn.
    pub fn on_tick<S: PixelSink>(&self, sink: &mut S) -> Result<bool, ProjectFieldError> {
        self.render_bridge().consume_and_redraw(sink)
    }

    /// Handle for the presentation layer to poll and consume the redraw
    /// flag independently of the engine borrow.
    #[must_use]
    pub fn render_bridge(&self) -> RenderBridge {
        RenderBridge::new(Arc::clone(&self.shared))
    }

    /// Window-title diagnostic: view bounds, zoom relative to home, budget.
    #[must_use]
    pub fn caption(&self) -> String {
        let view = self.view();
        let bottom_right = view.top_left()
            + Complex {
                real: view.scale() * f64::from(self.width),
                imag: -view.scale() * f64::from(self.height),
            };

        format!(
            "Field: {} .. {}  Zoom: {:.2}x  Iter: {}",
            view.top_left(),
            bottom_right,
            self.init_scale / view.scale(),
            view.max_iterations()
        )
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        *self.shared.view.lock().unwrap()
    }

    #[must_use]
    pub fn run_phase(&self) -> RunPhase {
        self.shared.phase()
    }

    #[must_use]
    pub fn latest_generation(&self) -> u64 {
        self.shared.generation.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.shared
            .last_completed_generation
            .load(Ordering::Acquire)
    }

    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        self.shared.wake.notify_one();

        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }

    fn submit(&self, view: ViewState, reset: FieldReset) -> u64 {
        // The bump is the cancellation signal: the in-flight run's token
        // compares its own generation against this counter.
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;

        *self.shared.view.lock().unwrap() = view;

        {
            let mut guard = self.shared.latest_request.lock().unwrap();
            *guard = Some((generation, FieldRequest { view, reset }));
        }

        self.shared.wake.notify_one();
        debug!("navigation generation {} submitted", generation);

        generation
    }

    fn worker_loop(shared: &Arc<EngineShared>) {
        loop {
            let (job_generation, request) = {
                let mut guard = shared.latest_request.lock().unwrap();
                loop {
                    if shared.shutdown.load(Ordering::Acquire) {
                        return;
                    }

                    if let Some(req) = guard.take() {
                        break req;
                    }

                    guard = shared.wake.wait(guard).unwrap();
                }
            };

            shared.set_phase(RunPhase::Running);
            debug!("computation run {} started", job_generation);

            let cancel = || {
                shared.shutdown.load(Ordering::Relaxed)
                    || job_generation != shared.generation.load(Ordering::Relaxed)
            };

            if request.reset == FieldReset::Full {
                shared.field.lock().unwrap().clear();
                shared.redraw.store(true, Ordering::Release);
            }

            let start = Instant::now();
            let result = fill_field(&request.view, &shared.field, &cancel, || {
                shared.redraw.store(true, Ordering::Release);
            });

            match result {
                Ok(()) => {
                    // Phase first: anyone observing the completed
                    // generation must also see the Completed phase.
                    shared.set_phase(RunPhase::Completed);
                    shared
                        .last_completed_generation
                        .store(job_generation, Ordering::Release);
                    debug!(
                        "computation run {} completed in {:?}",
                        job_generation,
                        start.elapsed()
                    );
                }
                Err(FillFieldError::Cancelled(_)) => {
                    shared.set_phase(RunPhase::Cancelled);
                    debug!("computation run {} superseded", job_generation);
                }
                Err(FillFieldError::Field(e)) => {
                    // Unreachable with fixed field dimensions; surfaced
                    // rather than swallowed in case that ever changes.
                    shared.set_phase(RunPhase::Cancelled);
                    error!("computation run {} aborted: {}", job_generation, e);
                }
            }
        }
    }
}

impl Drop for ExplorerEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
