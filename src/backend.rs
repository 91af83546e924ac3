//! Backend Module - Crossterm event conversion
//!
//! Bridges crossterm's event types to the controller's [`Event`] model so a
//! terminal host can feed its raw input straight into a [`KeyController`].
//!
//! Terminal input carries no hardware scancode, so converted events always
//! have `keycode == 0`. Repeat events are delivered as presses; the
//! controller's pressed-key tracking absorbs the duplicates.
//!
//! [`KeyController`]: crate::controller::KeyController
//!
//! # Example
//!
//! ```ignore
//! use key_controller::backend::convert_event;
//!
//! let event = crossterm::event::read()?;
//! let handled = controller.handle_event(&convert_event(event));
//! ```

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind as CrosstermKind,
    KeyModifiers, ModifierKeyCode,
};

use crate::event::{keyval, Event, KeyEvent, KeyEventKind, ModifierState};

/// Convert a crossterm event into a controller event.
///
/// Anything that is neither a key event nor a focus change converts to
/// [`Event::Other`], which the controller passes through unhandled.
pub fn convert_event(event: CrosstermEvent) -> Event {
    match event {
        CrosstermEvent::Key(key) => Event::Key(convert_key_event(key)),
        CrosstermEvent::FocusGained => Event::FocusChange { focus_in: true },
        CrosstermEvent::FocusLost => Event::FocusChange { focus_in: false },
        _ => Event::Other,
    }
}

/// Convert a crossterm key event.
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyEvent {
    let kind = match event.kind {
        CrosstermKind::Press | CrosstermKind::Repeat => KeyEventKind::Press,
        CrosstermKind::Release => KeyEventKind::Release,
    };

    KeyEvent {
        kind,
        keyval: keyval_for_code(event.code),
        keycode: 0,
        state: Some(convert_modifiers(event.modifiers)),
        is_modifier: matches!(event.code, KeyCode::Modifier(_) | KeyCode::CapsLock),
        group: 0,
    }
}

/// Keyval for a crossterm key code.
fn keyval_for_code(code: KeyCode) -> u32 {
    match code {
        KeyCode::Char(c) => keyval::from_char(c),
        KeyCode::Enter => keyval::RETURN,
        KeyCode::Tab => keyval::TAB,
        KeyCode::BackTab => keyval::TAB,
        KeyCode::Backspace => keyval::BACKSPACE,
        KeyCode::Delete => keyval::DELETE,
        KeyCode::Esc => keyval::ESCAPE,
        KeyCode::Up => keyval::UP,
        KeyCode::Down => keyval::DOWN,
        KeyCode::Left => keyval::LEFT,
        KeyCode::Right => keyval::RIGHT,
        KeyCode::Home => keyval::HOME,
        KeyCode::End => keyval::END,
        KeyCode::PageUp => keyval::PAGE_UP,
        KeyCode::PageDown => keyval::PAGE_DOWN,
        KeyCode::Insert => keyval::INSERT,
        KeyCode::Menu => keyval::MENU,
        KeyCode::CapsLock => keyval::CAPS_LOCK,
        KeyCode::F(n) if (1..=12).contains(&n) => keyval::F1 + (n as u32 - 1),
        KeyCode::Modifier(m) => keyval_for_modifier(m),
        _ => keyval::VOID,
    }
}

fn keyval_for_modifier(code: ModifierKeyCode) -> u32 {
    match code {
        ModifierKeyCode::LeftShift => keyval::SHIFT_L,
        ModifierKeyCode::RightShift => keyval::SHIFT_R,
        ModifierKeyCode::LeftControl => keyval::CONTROL_L,
        ModifierKeyCode::RightControl => keyval::CONTROL_R,
        ModifierKeyCode::LeftAlt => keyval::ALT_L,
        ModifierKeyCode::RightAlt => keyval::ALT_R,
        ModifierKeyCode::LeftSuper => keyval::SUPER_L,
        ModifierKeyCode::RightSuper => keyval::SUPER_R,
        ModifierKeyCode::LeftHyper => keyval::HYPER_L,
        ModifierKeyCode::RightHyper => keyval::HYPER_R,
        ModifierKeyCode::LeftMeta => keyval::META_L,
        ModifierKeyCode::RightMeta => keyval::META_R,
        ModifierKeyCode::IsoLevel3Shift => keyval::ISO_LEVEL3_SHIFT,
        ModifierKeyCode::IsoLevel5Shift => keyval::ISO_LEVEL5_SHIFT,
    }
}

/// Convert crossterm modifier flags to a [`ModifierState`].
pub fn convert_modifiers(mods: KeyModifiers) -> ModifierState {
    let mut state = ModifierState::empty();
    if mods.contains(KeyModifiers::SHIFT) {
        state |= ModifierState::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        state |= ModifierState::CONTROL;
    }
    if mods.contains(KeyModifiers::ALT) {
        state |= ModifierState::ALT;
    }
    if mods.contains(KeyModifiers::SUPER) {
        state |= ModifierState::SUPER;
    }
    if mods.contains(KeyModifiers::HYPER) {
        state |= ModifierState::HYPER;
    }
    if mods.contains(KeyModifiers::META) {
        state |= ModifierState::META;
    }
    state
}

// =============================================================================
// TESTS
// =============================================================================
