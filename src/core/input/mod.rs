//=========================================================================
// Input
//=========================================================================
//
// Portable input events and the per-frame state tracker owned by
// WindowState. Backends produce events; displays and the editor query the
// tracker through `WindowState::input()`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use state_tracker::StateTracker;
