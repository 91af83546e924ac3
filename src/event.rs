//! Event Module - Key event types and read-only queries
//!
//! Defines the event values the controller consumes. Events are produced by
//! a backend (see [`crate::backend`] for the crossterm adapter) or built
//! directly, and are inspected through cheap read-only queries.
//!
//! # API
//!
//! - [`Event`] - focus-change / key / other classification
//! - [`KeyEvent`] - press/release with keyval, keycode, modifier state, group
//! - [`ModifierState`] - modifier bitmask at the time of the event
//! - [`keyval`] - keysym constants and helpers
//!
//! # Example
//!
//! ```
//! use key_controller::event::{Event, KeyEvent, ModifierState, keyval};
//!
//! let event = Event::Key(
//!     KeyEvent::press(keyval::from_char('a'), 38).with_state(ModifierState::CONTROL),
//! );
//! assert!(event.key().is_some());
//! ```

// =============================================================================
// MODIFIER STATE
// =============================================================================

bitflags::bitflags! {
    /// State of the modifier keys at the time of an event.
    ///
    /// Combine with bitwise OR: `ModifierState::CONTROL | ModifierState::SHIFT`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierState: u32 {
        const SHIFT = 1 << 0;
        const LOCK = 1 << 1;
        const CONTROL = 1 << 2;
        const ALT = 1 << 3;
        const SUPER = 1 << 26;
        const HYPER = 1 << 27;
        const META = 1 << 28;
    }
}

// =============================================================================
// KEY EVENTS
// =============================================================================

/// Whether a key event is a press or a release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEventKind {
    Press,
    Release,
}

/// A single key press or release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Press or release.
    pub kind: KeyEventKind,
    /// Resolved key value (keysym-valued, layout-dependent).
    pub keyval: u32,
    /// Raw hardware key code (layout-independent; 0 when the backend
    /// carries no scancode).
    pub keycode: u16,
    /// Modifier state, or `None` when the source could not determine it.
    pub state: Option<ModifierState>,
    /// True when the key itself is a modifier (shift/ctrl/alt/...),
    /// as opposed to a character-producing key.
    pub is_modifier: bool,
    /// Keyboard group (layout) index the event was resolved against.
    pub group: u32,
}

impl KeyEvent {
    fn new(kind: KeyEventKind, keyval: u32, keycode: u16) -> Self {
        Self {
            kind,
            keyval,
            keycode,
            state: Some(ModifierState::empty()),
            is_modifier: keyval::is_modifier_key(keyval),
            group: 0,
        }
    }

    /// Create a press event. `is_modifier` is derived from the keyval.
    pub fn press(keyval: u32, keycode: u16) -> Self {
        Self::new(KeyEventKind::Press, keyval, keycode)
    }

    /// Create a release event. `is_modifier` is derived from the keyval.
    pub fn release(keyval: u32, keycode: u16) -> Self {
        Self::new(KeyEventKind::Release, keyval, keycode)
    }

    /// Set the modifier state.
    pub fn with_state(mut self, state: ModifierState) -> Self {
        self.state = Some(state);
        self
    }

    /// Mark the modifier state as undeterminable.
    pub fn without_state(mut self) -> Self {
        self.state = None;
        self
    }

    /// Set the keyboard group the event was resolved against.
    pub fn in_group(mut self, group: u32) -> Self {
        self.group = group;
        self
    }

    /// Check if this is a press event.
    pub fn is_press(&self) -> bool {
        self.kind == KeyEventKind::Press
    }
}

// =============================================================================
// EVENTS
// =============================================================================

/// An input event as delivered to the controller.
///
/// The controller only acts on focus changes and key events; everything else
/// is `Other` and passes through unhandled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Keyboard focus moved onto (`focus_in: true`) or off of the widget.
    FocusChange { focus_in: bool },
    /// A key was pressed or released.
    Key(KeyEvent),
    /// Any other event kind (pointer, touch, ...).
    Other,
}

impl Event {
    /// The contained key event, if this is one.
    pub fn key(&self) -> Option<&KeyEvent> {
        match self {
            Event::Key(key) => Some(key),
            _ => None,
        }
    }

    /// Check if this is a key press or release.
    pub fn is_key(&self) -> bool {
        matches!(self, Event::Key(_))
    }

    /// The focus-gained flag, if this is a focus change.
    pub fn focus_change(&self) -> Option<bool> {
        match self {
            Event::FocusChange { focus_in } => Some(*focus_in),
            _ => None,
        }
    }
}

// =============================================================================
// KEYVALS
// =============================================================================

/// Keysym constants for named keys, plus helpers.
///
/// Values follow the X11 keysym encoding: printable ASCII maps to itself,
/// other Unicode scalars to `0x0100_0000 + codepoint`, named keys to the
/// `0xff__` function-key range.
pub mod keyval {
    pub const VOID: u32 = 0xffffff;

    pub const BACKSPACE: u32 = 0xff08;
    pub const TAB: u32 = 0xff09;
    pub const RETURN: u32 = 0xff0d;
    pub const ESCAPE: u32 = 0xff1b;
    pub const DELETE: u32 = 0xffff;

    pub const HOME: u32 = 0xff50;
    pub const LEFT: u32 = 0xff51;
    pub const UP: u32 = 0xff52;
    pub const RIGHT: u32 = 0xff53;
    pub const DOWN: u32 = 0xff54;
    pub const PAGE_UP: u32 = 0xff55;
    pub const PAGE_DOWN: u32 = 0xff56;
    pub const END: u32 = 0xff57;
    pub const INSERT: u32 = 0xff63;
    pub const MENU: u32 = 0xff67;

    pub const F1: u32 = 0xffbe;
    pub const F2: u32 = 0xffbf;
    pub const F3: u32 = 0xffc0;
    pub const F4: u32 = 0xffc1;
    pub const F5: u32 = 0xffc2;
    pub const F6: u32 = 0xffc3;
    pub const F7: u32 = 0xffc4;
    pub const F8: u32 = 0xffc5;
    pub const F9: u32 = 0xffc6;
    pub const F10: u32 = 0xffc7;
    pub const F11: u32 = 0xffc8;
    pub const F12: u32 = 0xffc9;

    pub const SHIFT_L: u32 = 0xffe1;
    pub const SHIFT_R: u32 = 0xffe2;
    pub const CONTROL_L: u32 = 0xffe3;
    pub const CONTROL_R: u32 = 0xffe4;
    pub const CAPS_LOCK: u32 = 0xffe5;
    pub const SHIFT_LOCK: u32 = 0xffe6;
    pub const META_L: u32 = 0xffe7;
    pub const META_R: u32 = 0xffe8;
    pub const ALT_L: u32 = 0xffe9;
    pub const ALT_R: u32 = 0xffea;
    pub const SUPER_L: u32 = 0xffeb;
    pub const SUPER_R: u32 = 0xffec;
    pub const HYPER_L: u32 = 0xffed;
    pub const HYPER_R: u32 = 0xffee;

    pub const ISO_LEVEL3_SHIFT: u32 = 0xfe03;
    pub const ISO_LEVEL5_SHIFT: u32 = 0xfe11;
    pub const MODE_SWITCH: u32 = 0xff7e;

    /// Keyval for a Unicode character.
    pub fn from_char(c: char) -> u32 {
        let cp = c as u32;
        if (0x20..0x7f).contains(&cp) {
            cp
        } else {
            0x0100_0000 + cp
        }
    }

    /// Whether the keyval names a modifier key rather than a
    /// character-producing key.
    pub fn is_modifier_key(keyval: u32) -> bool {
        matches!(keyval, SHIFT_L..=HYPER_R)
            || matches!(keyval, ISO_LEVEL3_SHIFT | ISO_LEVEL5_SHIFT | MODE_SWITCH)
    }
}

// =============================================================================
// TESTS
// =============================================================================
