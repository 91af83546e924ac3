//! Controller Module - Key event controller
//!
//! Translates raw key input routed to a widget into higher-level
//! notifications, tracks which keys are currently held down, cooperates
//! with an input-method context for composed text entry, and can forward
//! the event being processed into another widget's dispatch phases.
//!
//! # Notifications
//!
//! - `key-pressed(keyval, keycode, state) -> handled`
//! - `key-released(keyval, keycode, state)`
//! - `modifiers(state) -> handled`
//! - `im-update()`
//! - `focus-in()` / `focus-out()`
//!
//! Boolean-returning notifications stop at the first handler reporting
//! handled.
//!
//! # Example
//!
//! ```
//! use key_controller::{Event, KeyController, KeyEvent, keyval};
//!
//! let controller = KeyController::new();
//! controller.connect_key_pressed(|keyval, _keycode, _state| {
//!     keyval == key_controller::keyval::RETURN
//! });
//!
//! let handled = controller.handle_event(&Event::Key(KeyEvent::press(keyval::RETURN, 36)));
//! assert!(handled);
//! ```
//!
//! The controller is single-threaded and driven synchronously by the
//! hosting toolkit's dispatch loop; it is not re-entrant within one
//! `handle_event` call beyond what the notification handlers are
//! documented to do (forward, group queries).

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::event::{Event, KeyEventKind, ModifierState};
use crate::im::InputMethodContext;
use crate::signal::{HandlerId, Listeners};
use crate::widget::{PropagationPhase, Widget};

/// Handler for `key-pressed`. Return true to mark the press handled.
pub type KeyPressedHandler = Box<dyn Fn(u32, u16, ModifierState) -> bool>;

/// Handler for `key-released`. The release's handled state comes from the
/// pressed-key set, not from handlers.
pub type KeyReleasedHandler = Box<dyn Fn(u32, u16, ModifierState)>;

/// Handler for `modifiers`. Return true to mark the modifier press handled.
pub type ModifiersHandler = Box<dyn Fn(ModifierState) -> bool>;

/// Handler for the argument-less notifications (`im-update`, `focus-in`,
/// `focus-out`).
pub type VoidHandler = Box<dyn Fn()>;

// =============================================================================
// CONTROLLER
// =============================================================================

/// Event controller for key events.
///
/// One controller serves one widget attachment. All state is interior so
/// notification handlers can call back into the controller (to [`forward`]
/// the event or query the [`group`]) while a dispatch is on the stack.
///
/// [`forward`]: KeyController::forward
/// [`group`]: KeyController::group
pub struct KeyController {
    im_context: RefCell<Option<Rc<dyn InputMethodContext>>>,
    pressed_keys: RefCell<HashSet<u32>>,
    // Some only while handle_event is on the stack.
    current_event: RefCell<Option<Event>>,

    key_pressed: RefCell<Listeners<KeyPressedHandler>>,
    key_released: RefCell<Listeners<KeyReleasedHandler>>,
    modifiers: RefCell<Listeners<ModifiersHandler>>,
    im_update: RefCell<Listeners<VoidHandler>>,
    focus_in: RefCell<Listeners<VoidHandler>>,
    focus_out: RefCell<Listeners<VoidHandler>>,
}

/// Clears the transient current-event slot on every exit path.
struct CurrentEventGuard<'a> {
    slot: &'a RefCell<Option<Event>>,
}

impl<'a> CurrentEventGuard<'a> {
    fn set(slot: &'a RefCell<Option<Event>>, event: Event) -> Self {
        *slot.borrow_mut() = Some(event);
        Self { slot }
    }
}

impl Drop for CurrentEventGuard<'_> {
    fn drop(&mut self) {
        *self.slot.borrow_mut() = None;
    }
}

impl KeyController {
    pub fn new() -> Self {
        Self {
            im_context: RefCell::new(None),
            pressed_keys: RefCell::new(HashSet::new()),
            current_event: RefCell::new(None),
            key_pressed: RefCell::new(Listeners::new()),
            key_released: RefCell::new(Listeners::new()),
            modifiers: RefCell::new(Listeners::new()),
            im_update: RefCell::new(Listeners::new()),
            focus_in: RefCell::new(Listeners::new()),
            focus_out: RefCell::new(Listeners::new()),
        }
    }

    // =========================================================================
    // EVENT DISPATCH
    // =========================================================================

    /// Process one incoming event.
    ///
    /// Returns whether the event was handled. Focus changes emit
    /// `focus-in`/`focus-out` but never consume the event; non-key events
    /// pass through unhandled.
    pub fn handle_event(&self, event: &Event) -> bool {
        let key = match event {
            Event::FocusChange { focus_in } => {
                if *focus_in {
                    self.emit_void(&self.focus_in);
                } else {
                    self.emit_void(&self.focus_out);
                }
                return false;
            }
            Event::Key(key) => key,
            Event::Other => return false,
        };

        // The IM context gets first refusal, before any classification.
        let im_context = self.im_context.borrow().clone();
        if let Some(im_context) = im_context {
            if im_context.filter_keypress(key) {
                self.emit_void(&self.im_update);
                return true;
            }
        }

        let Some(state) = key.state else {
            return false;
        };

        let _guard = CurrentEventGuard::set(&self.current_event, event.clone());

        if key.is_modifier {
            let handled = match key.kind {
                KeyEventKind::Press => self.emit_modifiers(state),
                // Pure modifier releases are swallowed without a
                // separate notification.
                KeyEventKind::Release => true,
            };
            if handled {
                return true;
            }
        }

        match key.kind {
            KeyEventKind::Press => {
                let handled = self.emit_key_pressed(key.keyval, key.keycode, state);
                // Modifier keys never enter the pressed set; their releases
                // never reach the removal path below.
                if handled && !key.is_modifier {
                    self.pressed_keys.borrow_mut().insert(key.keyval);
                }
                handled
            }
            KeyEventKind::Release => {
                self.emit_key_released(key.keyval, key.keycode, state);
                // Handled iff the matching press was handled; removal is
                // unconditional so a second release reports unhandled.
                self.pressed_keys.borrow_mut().remove(&key.keyval)
            }
        }
    }

    fn emit_void(&self, listeners: &RefCell<Listeners<VoidHandler>>) {
        for handler in listeners.borrow().iter() {
            handler();
        }
    }

    fn emit_modifiers(&self, state: ModifierState) -> bool {
        for handler in self.modifiers.borrow().iter() {
            if handler(state) {
                return true;
            }
        }
        false
    }

    fn emit_key_pressed(&self, keyval: u32, keycode: u16, state: ModifierState) -> bool {
        for handler in self.key_pressed.borrow().iter() {
            if handler(keyval, keycode, state) {
                return true;
            }
        }
        false
    }

    fn emit_key_released(&self, keyval: u32, keycode: u16, state: ModifierState) {
        for handler in self.key_released.borrow().iter() {
            handler(keyval, keycode, state);
        }
    }

    // =========================================================================
    // INPUT METHOD CONTEXT
    // =========================================================================

    /// Attach an input-method context, or detach with `None`.
    ///
    /// A previously attached context is reset (its in-progress composition
    /// cancelled) before the replacement is adopted.
    pub fn set_im_context(&self, im_context: Option<Rc<dyn InputMethodContext>>) {
        let previous = self.im_context.borrow_mut().take();
        if let Some(previous) = previous {
            previous.reset();
        }
        *self.im_context.borrow_mut() = im_context;
    }

    /// The currently attached input-method context.
    pub fn im_context(&self) -> Option<Rc<dyn InputMethodContext>> {
        self.im_context.borrow().clone()
    }

    // =========================================================================
    // CURRENT EVENT QUERIES
    // =========================================================================

    /// Forward the event currently being processed to another widget.
    ///
    /// Realizes the widget if needed, then runs its controllers for the
    /// capture, target and bubble phases in order, stopping at the first
    /// phase that handles the event.
    ///
    /// Only valid from within a dispatch (a `handle_event` notification
    /// handler); called outside one it reports the contract violation and
    /// returns false without touching the widget.
    pub fn forward(&self, widget: &dyn Widget) -> bool {
        let current = self.current_event.borrow();
        let Some(event) = current.as_ref() else {
            tracing::warn!("forward() called outside of event dispatch");
            return false;
        };

        if !widget.is_realized() {
            widget.realize();
        }

        for phase in PropagationPhase::FORWARD_ORDER {
            if widget.run_controllers(event, phase) {
                return true;
            }
        }

        false
    }

    /// Keyboard group (layout) of the event currently being processed.
    ///
    /// Only valid from within a dispatch; called outside one it reports
    /// the contract violation and returns 0.
    pub fn group(&self) -> u32 {
        let current = self.current_event.borrow();
        match current.as_ref().and_then(Event::key) {
            Some(key) => key.group,
            None => {
                tracing::warn!("group() called outside of event dispatch");
                0
            }
        }
    }

    // =========================================================================
    // NOTIFICATION WIRING
    // =========================================================================

    /// Connect a `key-pressed` handler. Return true to mark the press
    /// handled; later handlers are then skipped.
    pub fn connect_key_pressed<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(u32, u16, ModifierState) -> bool + 'static,
    {
        self.key_pressed.borrow_mut().add(Box::new(handler))
    }

    pub fn disconnect_key_pressed(&self, id: HandlerId) -> bool {
        self.key_pressed.borrow_mut().remove(id)
    }

    /// Connect a `key-released` handler.
    pub fn connect_key_released<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(u32, u16, ModifierState) + 'static,
    {
        self.key_released.borrow_mut().add(Box::new(handler))
    }

    pub fn disconnect_key_released(&self, id: HandlerId) -> bool {
        self.key_released.borrow_mut().remove(id)
    }

    /// Connect a `modifiers` handler, fired when a modifier key press
    /// changes the modifier state. Return true to mark it handled.
    pub fn connect_modifiers<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(ModifierState) -> bool + 'static,
    {
        self.modifiers.borrow_mut().add(Box::new(handler))
    }

    pub fn disconnect_modifiers(&self, id: HandlerId) -> bool {
        self.modifiers.borrow_mut().remove(id)
    }

    /// Connect an `im-update` handler, fired when the input-method context
    /// consumes a key event.
    pub fn connect_im_update<F>(&self, handler: F) -> HandlerId
    where
        F: Fn() + 'static,
    {
        self.im_update.borrow_mut().add(Box::new(handler))
    }

    pub fn disconnect_im_update(&self, id: HandlerId) -> bool {
        self.im_update.borrow_mut().remove(id)
    }

    /// Connect a `focus-in` handler.
    pub fn connect_focus_in<F>(&self, handler: F) -> HandlerId
    where
        F: Fn() + 'static,
    {
        self.focus_in.borrow_mut().add(Box::new(handler))
    }

    pub fn disconnect_focus_in(&self, id: HandlerId) -> bool {
        self.focus_in.borrow_mut().remove(id)
    }

    /// Connect a `focus-out` handler.
    pub fn connect_focus_out<F>(&self, handler: F) -> HandlerId
    where
        F: Fn() + 'static,
    {
        self.focus_out.borrow_mut().add(Box::new(handler))
    }

    pub fn disconnect_focus_out(&self, id: HandlerId) -> bool {
        self.focus_out.borrow_mut().remove(id)
    }

    /// Whether a key value is currently observed as held down.
    pub fn is_pressed(&self, keyval: u32) -> bool {
        self.pressed_keys.borrow().contains(&keyval)
    }
}

impl Default for KeyController {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
