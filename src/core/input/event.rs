//=========================================================================
// Input Event Types
//
// Portable representation of keyboard and mouse input. The platform layer
// converts native events into these; the StateTracker folds them into
// per-frame state that displays and the editor query.
//
// Event Flow:
// ```text
// WindowBackend (winit / headless)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (held keys, edges, mouse delta)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,

    /// Side, thumb and macro buttons.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier (location, not produced character).
///
/// Covers the keys the engine binds by default; anything else reported by
/// the platform becomes `Unidentified` and is dropped before it reaches
/// the state tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Function Keys ----------------------------------------------------
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Arrow Keys -------------------------------------------------------
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Modifier Keys ----------------------------------------------------
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state attached to discrete events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };
}

//=== InputEvent ==========================================================

/// Low-level input event from a window backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown { key: KeyCode, modifiers: Modifiers },
    KeyUp { key: KeyCode, modifiers: Modifiers },
    MouseButtonDown { button: MouseButton, modifiers: Modifiers },
    MouseButtonUp { button: MouseButton, modifiers: Modifiers },

    /// Cursor position in window pixels, top-left origin.
    CursorMoved { x: f32, y: f32 },

    /// Raw device motion, reported even while the cursor is grabbed.
    MouseMotion { dx: f32, dy: f32 },
}
