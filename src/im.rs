//! Input Method Module - Composition context seam
//!
//! The controller defers to an attached input-method context before doing
//! any key classification of its own, so composed text entry (dead keys,
//! CJK input, ...) sees raw key events first.

use crate::event::KeyEvent;

/// An input-method context the controller can defer key events to.
///
/// Implementations take `&self`; contexts are shared via
/// `Rc<dyn InputMethodContext>` and use interior mutability for their
/// composition state.
pub trait InputMethodContext {
    /// Offer a key event to the context.
    ///
    /// Returns true when the context consumed the event as part of an
    /// ongoing composition, in which case the controller emits `im-update`
    /// and does no further processing of the event.
    fn filter_keypress(&self, event: &KeyEvent) -> bool;

    /// Cancel any in-progress composition.
    ///
    /// Called when the context is detached from a controller, before the
    /// replacement (if any) is adopted.
    fn reset(&self);
}
