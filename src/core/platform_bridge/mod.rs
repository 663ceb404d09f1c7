//=========================================================================
// Platform Bridge
//=========================================================================
//
// Separates the window's engine-facing state from the code that talks to
// the OS, so the winit backend and the headless backend are
// interchangeable behind `Window`.
//
// Components:
// - `interface`: WindowBackend trait, FrameControl, PlatformError
// - `headless`: OS-free backend for tests and offscreen runs
//
//=========================================================================

//=== Module Declarations =================================================

mod headless;
mod interface;

//=== Public API ==========================================================

pub use headless::{HeadlessBackend, ScriptedFrame};
pub use interface::{FrameControl, PlatformError, WindowBackend};
