//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit events into engine InputEvents.
//
// Architecture:
//   winit WindowEvent / DeviceEvent → InputProcessor → InputEvent → frame queue
//
// Modifier state is cached from ModifiersChanged and attached to every
// later key/button event. Keys outside the engine's KeyCode set are
// filtered (None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== InputProcessor ======================================================

/// Stateful winit → engine event converter.
pub(crate) struct InputProcessor {
    current_modifiers: Modifiers,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self { current_modifiers: Modifiers::NONE }
    }

    pub(crate) fn update_modifiers(&mut self, state: ModifiersState) {
        self.current_modifiers = Modifiers {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        };
    }

    /// Key press/release, or `None` for unmapped keys and auto-repeat.
    pub(crate) fn process_key_event(&self, event: &KeyEvent) -> Option<InputEvent> {
        if event.repeat {
            return None;
        }

        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };

        let key = map_key(code);
        if key == KeyCode::Unidentified {
            return None;
        }

        Some(match event.state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers: self.current_modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers: self.current_modifiers },
        })
    }

    pub(crate) fn process_mouse_button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        };

        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers: self.current_modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers: self.current_modifiers },
        }
    }
}

//=========================================================================
// Key Mapping
//=========================================================================

fn map_key(code: WinitKeyCode) -> KeyCode {
    use WinitKeyCode as W;
    match code {
        W::Digit0 => KeyCode::Digit0,
        W::Digit1 => KeyCode::Digit1,
        W::Digit2 => KeyCode::Digit2,
        W::Digit3 => KeyCode::Digit3,
        W::Digit4 => KeyCode::Digit4,
        W::Digit5 => KeyCode::Digit5,
        W::Digit6 => KeyCode::Digit6,
        W::Digit7 => KeyCode::Digit7,
        W::Digit8 => KeyCode::Digit8,
        W::Digit9 => KeyCode::Digit9,

        W::KeyA => KeyCode::KeyA,
        W::KeyB => KeyCode::KeyB,
        W::KeyC => KeyCode::KeyC,
        W::KeyD => KeyCode::KeyD,
        W::KeyE => KeyCode::KeyE,
        W::KeyF => KeyCode::KeyF,
        W::KeyG => KeyCode::KeyG,
        W::KeyH => KeyCode::KeyH,
        W::KeyI => KeyCode::KeyI,
        W::KeyJ => KeyCode::KeyJ,
        W::KeyK => KeyCode::KeyK,
        W::KeyL => KeyCode::KeyL,
        W::KeyM => KeyCode::KeyM,
        W::KeyN => KeyCode::KeyN,
        W::KeyO => KeyCode::KeyO,
        W::KeyP => KeyCode::KeyP,
        W::KeyQ => KeyCode::KeyQ,
        W::KeyR => KeyCode::KeyR,
        W::KeyS => KeyCode::KeyS,
        W::KeyT => KeyCode::KeyT,
        W::KeyU => KeyCode::KeyU,
        W::KeyV => KeyCode::KeyV,
        W::KeyW => KeyCode::KeyW,
        W::KeyX => KeyCode::KeyX,
        W::KeyY => KeyCode::KeyY,
        W::KeyZ => KeyCode::KeyZ,

        W::F1 => KeyCode::F1,
        W::F2 => KeyCode::F2,
        W::F3 => KeyCode::F3,
        W::F4 => KeyCode::F4,
        W::F5 => KeyCode::F5,
        W::F6 => KeyCode::F6,
        W::F7 => KeyCode::F7,
        W::F8 => KeyCode::F8,
        W::F9 => KeyCode::F9,
        W::F10 => KeyCode::F10,
        W::F11 => KeyCode::F11,
        W::F12 => KeyCode::F12,

        W::ArrowUp => KeyCode::ArrowUp,
        W::ArrowDown => KeyCode::ArrowDown,
        W::ArrowLeft => KeyCode::ArrowLeft,
        W::ArrowRight => KeyCode::ArrowRight,

        W::ShiftLeft => KeyCode::ShiftLeft,
        W::ShiftRight => KeyCode::ShiftRight,
        W::ControlLeft => KeyCode::ControlLeft,
        W::ControlRight => KeyCode::ControlRight,

        W::Space => KeyCode::Space,
        W::Enter => KeyCode::Enter,
        W::Escape => KeyCode::Escape,
        W::Tab => KeyCode::Tab,
        W::Backspace => KeyCode::Backspace,
        W::Delete => KeyCode::Delete,

        _ => KeyCode::Unidentified,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_function_keys_map() {
        assert_eq!(map_key(WinitKeyCode::KeyQ), KeyCode::KeyQ);
        assert_eq!(map_key(WinitKeyCode::F1), KeyCode::F1);
        assert_eq!(map_key(WinitKeyCode::ShiftLeft), KeyCode::ShiftLeft);
    }

    #[test]
    fn exotic_keys_are_unidentified() {
        assert_eq!(map_key(WinitKeyCode::F24), KeyCode::Unidentified);
        assert_eq!(map_key(WinitKeyCode::NumpadAdd), KeyCode::Unidentified);
    }

    #[test]
    fn mouse_buttons_carry_cached_modifiers() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(ModifiersState::CONTROL);

        let event = processor.process_mouse_button(WinitMouseButton::Back, ElementState::Pressed);
        assert_eq!(
            event,
            InputEvent::MouseButtonDown {
                button: MouseButton::Other,
                modifiers: Modifiers { ctrl: true, ..Modifiers::NONE },
            }
        );
    }
}
