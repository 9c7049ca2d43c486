use crate::core::data::point::Point;

/// Keys the engine reacts to. Presentation adapters translate their own
/// key codes into this set and fold everything else into `Other`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyPress {
    Escape,
    Home,
    Other,
}

/// Discrete input events the presentation layer feeds into the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Key(KeyPress),
    Click(Point),
}

/// Whether the presentation loop should keep running after an event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopSignal {
    Continue,
    Quit,
}
