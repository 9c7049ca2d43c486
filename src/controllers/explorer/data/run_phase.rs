/// Lifecycle of the computation worker's current run.
///
/// `Idle -> Running -> {Completed | Cancelled}`; a new navigation command
/// moves a finished worker back to `Running`. Stored as an atomic in the
/// engine's shared state, so the value is a snapshot that may already be
/// stale when read.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl RunPhase {
    pub(crate) fn as_u8(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Running => 1,
            Self::Completed => 2,
            Self::Cancelled => 3,
        }
    }

    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Running,
            2 => Self::Completed,
            3 => Self::Cancelled,
            _ => Self::Idle,
        }
    }
}
