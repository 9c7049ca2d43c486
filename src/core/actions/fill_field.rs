use crate::core::actions::cancellation::{CancelToken, Cancelled, CANCEL_CHECK_INTERVAL_CELLS};
use crate::core::data::field::{Field, FieldError};
use crate::core::data::point::Point;
use crate::core::data::view_state::ViewState;
use crate::core::fractals::mandelbrot::escape_time::evaluate;
use crate::core::util::plane_mapping::pixel_to_point;
use std::sync::Mutex;

/// Error type for the cancellable field fill.
///
/// Cancellation is expected control flow, not a failure to display; the
/// split lets callers route the two cases differently.
#[derive(Debug)]
pub enum FillFieldError {
    /// The run observed its cancel token and stopped.
    Cancelled(Cancelled),
    /// The field rejected a write (dimension mismatch).
    Field(FieldError),
}

impl std::fmt::Display for FillFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FillFieldError::Cancelled(c) => write!(f, "{}", c),
            FillFieldError::Field(e) => write!(f, "field error: {}", e),
        }
    }
}

impl std::error::Error for FillFieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FillFieldError::Cancelled(c) => Some(c),
            FillFieldError::Field(e) => Some(e),
        }
    }
}

/// Fills every cell of the field with the escape-time count for `view`.
///
/// Rows are computed into a scratch buffer without holding the lock, then
/// copied in under a short critical section so a concurrent reader is never
/// blocked for more than a row copy. `row_completed` fires after each row
/// lands; the engine raises its redraw flag there.
///
/// The cancel token is polled at the start of each row and every
/// [`CANCEL_CHECK_INTERVAL_CELLS`] cells within one. On cancellation the
/// field is left partially stale; the next run overwrites it.
pub fn fill_field<C, F>(
    view: &ViewState,
    field: &Mutex<Field>,
    cancel: &C,
    mut row_completed: F,
) -> Result<(), FillFieldError>
where
    C: CancelToken,
    F: FnMut(),
{
    let (width, height) = {
        let field = field.lock().unwrap();
        (field.width(), field.height())
    };

    let mut row = Vec::with_capacity(width as usize);

    for y in 0..height {
        row.clear();

        for (i, x) in (0..width).enumerate() {
            if i % CANCEL_CHECK_INTERVAL_CELLS == 0 && cancel.is_cancelled() {
                return Err(FillFieldError::Cancelled(Cancelled));
            }

            let c = pixel_to_point(
                Point {
                    x: x as i32,
                    y: y as i32,
                },
                view,
            );
            row.push(evaluate(c, view.max_iterations()).iterations);
        }

        field
            .lock()
            .unwrap()
            .copy_row(y, &row)
            .map_err(FillFieldError::Field)?;

        row_completed();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::NeverCancel;
    use crate::core::util::plane_mapping::home_view;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    fn small_view(max_iterations: u32) -> ViewState {
        home_view(8, 6, 2.0 / 6.0, max_iterations).unwrap()
    }

    #[test]
    fn test_fill_completes_and_signals_every_row() {
        let view = small_view(50);
        let field = Mutex::new(Field::new(8, 6).unwrap());
        let rows_completed = AtomicU32::new(0);

        fill_field(&view, &field, &NeverCancel, || {
            rows_completed.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();

        assert_eq!(rows_completed.load(Ordering::Relaxed), 6);
    }

    #[test]
    fn test_fill_stores_saturation_as_budget_count() {
        let view = small_view(50);
        let field = Mutex::new(Field::new(8, 6).unwrap());

        fill_field(&view, &field, &NeverCancel, || {}).unwrap();

        let field = field.lock().unwrap();
        // The home center lands mid-field, inside the cardioid.
        let center = field.get(Point { x: 4, y: 3 }).unwrap();
        assert_eq!(center, 50);

        // Every cell carries a count in 1..=budget.
        for y in 0..6 {
            for x in 0..8 {
                let count = field.get(Point { x, y }).unwrap();
                assert!(count >= 1 && count <= 50);
            }
        }
    }

    #[test]
    fn test_corner_cells_escape_quickly() {
        let view = small_view(50);
        let field = Mutex::new(Field::new(8, 6).unwrap());

        fill_field(&view, &field, &NeverCancel, || {}).unwrap();

        // Top-left of the home view sits far outside the set.
        let corner = field.lock().unwrap().get(Point { x: 0, y: 0 }).unwrap();
        assert!(corner < 50);
    }

    #[test]
    fn test_pre_cancelled_run_stops_before_writing() {
        let view = small_view(50);
        let field = Mutex::new(Field::new(8, 6).unwrap());
        let row_seen = AtomicBool::new(false);

        let cancel = || true;
        let result = fill_field(&view, &field, &cancel, || {
            row_seen.store(true, Ordering::Relaxed);
        });

        assert!(matches!(result, Err(FillFieldError::Cancelled(_))));
        assert!(!row_seen.load(Ordering::Relaxed));

        let field = field.lock().unwrap();
        assert_eq!(field.get(Point { x: 0, y: 0 }).unwrap(), 0);
    }

    #[test]
    fn test_mid_run_cancellation_leaves_partial_rows_intact() {
        let view = small_view(50);
        let field = Mutex::new(Field::new(8, 6).unwrap());
        let rows_completed = AtomicU32::new(0);

        // Allow two rows, then cancel at the third row's first poll.
        let cancel = || rows_completed.load(Ordering::Relaxed) >= 2;
        let result = fill_field(&view, &field, &cancel, || {
            rows_completed.fetch_add(1, Ordering::Relaxed);
        });

        assert!(matches!(result, Err(FillFieldError::Cancelled(_))));
        assert_eq!(rows_completed.load(Ordering::Relaxed), 2);

        let field = field.lock().unwrap();
        assert!(field.get(Point { x: 0, y: 0 }).unwrap() > 0);
        assert!(field.get(Point { x: 0, y: 1 }).unwrap() > 0);
        assert_eq!(field.get(Point { x: 0, y: 2 }).unwrap(), 0);
    }
}
