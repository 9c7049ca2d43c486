/// How often a computation run polls its cancel token inside a row, in
/// cells. Bounds worst-case cancellation latency without paying an atomic
/// load per cell.
pub const CANCEL_CHECK_INTERVAL_CELLS: usize = 1024;

/// Marker for a run that stopped because its token was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "computation run cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Cooperative cancellation signal polled by the field computation.
///
/// The engine passes a closure comparing its run generation against the
/// current one; anything `Fn() -> bool + Send + Sync` works.
pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

/// Token for synchronous, uninterruptible runs (the headless survey).
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

    #[test]
    fn never_cancel_always_returns_false() {
        let token = NeverCancel;
        assert!(!token.is_cancelled());
        assert!(!token.is_cancelled());
    }

    #[test]
    fn closure_token_reflects_atomic_state() {
        let flag = AtomicBool::new(false);
        let token = || flag.load(Ordering::Relaxed);

        assert!(!token.is_cancelled());

        flag.store(true, Ordering::Relaxed);
        assert!(token.is_cancelled());
    }

    #[test]
    fn generation_mismatch_reads_as_cancelled() {
        // The shape the engine actually uses: a run bound to generation 1
        // is superseded as soon as the counter moves on.
        let current_generation = AtomicU64::new(1);
        let job_generation = 1;
        let token = || job_generation != current_generation.load(Ordering::Relaxed);

        assert!(!token.is_cancelled());

        current_generation.fetch_add(1, Ordering::Relaxed);
        assert!(token.is_cancelled());
    }
}
