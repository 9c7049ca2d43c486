use crate::core::data::view_state::ViewState;

/// Whether a run starts from a zeroed field or recomputes in place.
///
/// `Reuse` exists for iteration-budget extension: the view is unchanged, so
/// discarding already-computed cells would only add flicker.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldReset {
    Full,
    Reuse,
}

/// One unit of work for the computation worker: an immutable view snapshot
/// plus the reset mode. Stale requests are overwritten in the mailbox, never
/// queued.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FieldRequest {
    pub view: ViewState,
    pub reset: FieldReset,
}
