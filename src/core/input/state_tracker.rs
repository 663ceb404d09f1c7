//=========================================================================
// State Tracker
//=========================================================================
//
// Folds a frame's InputEvents into held state and per-frame edges.
//
// Frame lifecycle: begin_frame() → process_events() → finalize_frame() → query
//
// Mouse delta prefers raw device motion when any was reported this frame
// (the cursor does not move while grabbed) and falls back to the cursor
// position difference otherwise.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== StateTracker ========================================================

/// Keyboard and mouse state for the current frame.
#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Persistent State -------------------------------------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,

    //--- Frame Edges ------------------------------------------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,

    //--- Motion -----------------------------------------------------------
    last_mouse_position: (f32, f32),
    raw_motion: Option<(f32, f32)>,
    mouse_delta: (f32, f32),
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears last frame's edges and motion.
    pub(crate) fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.last_mouse_position = self.mouse_position;
        self.raw_motion = None;
    }

    pub(crate) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Computes the frame's mouse delta.
    pub(crate) fn finalize_frame(&mut self) {
        self.mouse_delta = self.raw_motion.unwrap_or((
            self.mouse_position.0 - self.last_mouse_position.0,
            self.mouse_position.1 - self.last_mouse_position.1,
        ));
    }

    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = modifiers;
                if self.keys_down.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = modifiers;
                if self.keys_down.remove(&key) {
                    self.keys_released.insert(key);
                }
            }
            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = modifiers;
                if self.buttons_down.insert(button) {
                    self.buttons_pressed.insert(button);
                }
            }
            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = modifiers;
                if self.buttons_down.remove(&button) {
                    self.buttons_released.insert(button);
                }
            }
            InputEvent::CursorMoved { x, y } => {
                self.mouse_position = (x, y);
            }
            InputEvent::MouseMotion { dx, dy } => {
                let (ax, ay) = self.raw_motion.unwrap_or((0.0, 0.0));
                self.raw_motion = Some((ax + dx, ay + dy));
            }
        }
    }

    //--- Keyboard Queries -------------------------------------------------

    /// `true` only on the frame the key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    //--- Mouse Queries ----------------------------------------------------

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    /// Cursor position in window pixels, top-left origin.
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Mouse movement over the last frame.
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key, modifiers: Modifiers::NONE }
    }

    fn frame(tracker: &mut StateTracker, events: &[InputEvent]) {
        tracker.begin_frame();
        tracker.process_events(events);
        tracker.finalize_frame();
    }

    #[test]
    fn key_pressed_only_on_transition_frame() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[key_down(KeyCode::KeyW)]);
        assert!(tracker.is_key_pressed(KeyCode::KeyW));
        assert!(tracker.is_key_down(KeyCode::KeyW));

        frame(&mut tracker, &[]);
        assert!(!tracker.is_key_pressed(KeyCode::KeyW));
        assert!(tracker.is_key_down(KeyCode::KeyW));

        frame(&mut tracker, &[key_up(KeyCode::KeyW)]);
        assert!(tracker.is_key_released(KeyCode::KeyW));
        assert!(!tracker.is_key_down(KeyCode::KeyW));
    }

    #[test]
    fn repeated_key_down_is_not_a_new_press() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[key_down(KeyCode::Space)]);
        frame(&mut tracker, &[key_down(KeyCode::Space)]);
        assert!(!tracker.is_key_pressed(KeyCode::Space));
    }

    #[test]
    fn mouse_delta_follows_cursor_position() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[InputEvent::CursorMoved { x: 10.0, y: 10.0 }]);
        frame(&mut tracker, &[InputEvent::CursorMoved { x: 14.0, y: 7.0 }]);
        assert_eq!(tracker.mouse_position(), (14.0, 7.0));
        assert_eq!(tracker.mouse_delta(), (4.0, -3.0));

        frame(&mut tracker, &[]);
        assert_eq!(tracker.mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn raw_motion_wins_over_cursor_position() {
        let mut tracker = StateTracker::new();
        frame(
            &mut tracker,
            &[
                InputEvent::MouseMotion { dx: 2.0, dy: 1.0 },
                InputEvent::MouseMotion { dx: 3.0, dy: -1.0 },
            ],
        );
        assert_eq!(tracker.mouse_delta(), (5.0, 0.0));
    }

    #[test]
    fn button_edges_are_tracked() {
        let mut tracker = StateTracker::new();
        frame(
            &mut tracker,
            &[InputEvent::MouseButtonDown {
                button: MouseButton::Right,
                modifiers: Modifiers { shift: true, ..Modifiers::NONE },
            }],
        );
        assert!(tracker.is_button_pressed(MouseButton::Right));
        assert!(tracker.modifiers().shift);

        frame(
            &mut tracker,
            &[InputEvent::MouseButtonUp { button: MouseButton::Right, modifiers: Modifiers::NONE }],
        );
        assert!(tracker.is_button_released(MouseButton::Right));
        assert!(!tracker.is_button_down(MouseButton::Right));
    }
}
