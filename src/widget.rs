//! Widget Module - Dispatch seam for event forwarding
//!
//! The controller itself never walks the widget tree; when asked to forward
//! the current event it goes through this seam. The hosting toolkit's
//! widgets implement [`Widget`], test doubles implement it in tests.

use crate::event::Event;

/// The dispatch phase an event travels through on its way to a widget.
///
/// Forwarding always tries phases in [`PropagationPhase::FORWARD_ORDER`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropagationPhase {
    /// Top-down, ancestors first.
    Capture,
    /// The widget itself.
    Target,
    /// Bottom-up, ancestors last.
    Bubble,
}

impl PropagationPhase {
    /// The fixed order forwarding tries phases in.
    pub const FORWARD_ORDER: [PropagationPhase; 3] = [
        PropagationPhase::Capture,
        PropagationPhase::Target,
        PropagationPhase::Bubble,
    ];
}

/// A widget handle the controller can re-dispatch events into.
pub trait Widget {
    /// Whether the widget is materialized and ready to receive events.
    fn is_realized(&self) -> bool;

    /// Materialize the widget. Only called when `is_realized` is false.
    fn realize(&self);

    /// Run the widget's event controllers for one dispatch phase.
    ///
    /// Returns true when any controller in that phase handled the event.
    fn run_controllers(&self, event: &Event, phase: PropagationPhase) -> bool;
}

// =============================================================================
// TESTS
// =============================================================================
