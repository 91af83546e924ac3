//! # key-controller
//!
//! Key event controller: translates raw keyboard input routed to a widget
//! into higher-level notifications (key-pressed, key-released, modifier
//! changes, input-method updates, focus in/out).
//!
//! The controller tracks which keys are currently held down, defers to an
//! attached input-method context for composed text entry, and can forward
//! the event being processed into another widget's capture/target/bubble
//! dispatch phases.
//!
//! It is reactive and single-threaded: the hosting toolkit calls
//! [`KeyController::handle_event`] once per incoming event and gets back
//! whether the event was consumed. The widget tree, the dispatch loop and
//! the input-method protocol stay on the host's side of the
//! [`Widget`]/[`InputMethodContext`] seams.
//!
//! ## Modules
//!
//! - [`event`] - event values, modifier bitmask, keyval constants
//! - [`controller`] - the controller itself
//! - [`signal`] - per-notification listener registries
//! - [`im`] / [`widget`] - host seams
//! - [`backend`] - crossterm event conversion for terminal hosts

pub mod backend;
pub mod controller;
pub mod event;
pub mod im;
pub mod signal;
pub mod widget;

// Re-export commonly used items
pub use controller::{
    KeyController, KeyPressedHandler, KeyReleasedHandler, ModifiersHandler, VoidHandler,
};
pub use event::{keyval, Event, KeyEvent, KeyEventKind, ModifierState};
pub use im::InputMethodContext;
pub use signal::{HandlerId, Listeners};
pub use widget::{PropagationPhase, Widget};
