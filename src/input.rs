//! Input model: pointer event kinds and the gesture state machine.
//!
//! A gesture runs from pointer-down to pointer-up or pointer-leave. Only one
//! can be in progress; [`GestureState`] is the guard that keeps runs in the
//! history from interleaving.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

/// Pointer events the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Button pressed over the surface.
    Down,
    /// Pointer moved over the surface.
    Move,
    /// Button released.
    Up,
    /// Pointer left the surface; ends the gesture like a release.
    Leave,
}

/// Gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A gesture is being drawn and recorded.
    Dragging,
}

impl GestureState {
    #[must_use]
    pub fn is_dragging(self) -> bool {
        matches!(self, Self::Dragging)
    }
}
