//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Contract between the window and whatever drives the OS side of it.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::window::WindowState;

//=== FrameControl ========================================================

/// Result of polling the platform at the start of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Exit,
}

//=== WindowBackend =======================================================

/// OS-facing half of a window.
///
/// `begin_frame` polls native events into `state` (input, resize, close)
/// and records the frame delta. `end_frame` presents and applies the
/// requests displays queued on `state` during the frame.
pub trait WindowBackend {
    fn begin_frame(&mut self, state: &mut WindowState) -> FrameControl;

    fn end_frame(&mut self, state: &mut WindowState);
}

//=== PlatformError =======================================================

/// Native windowing failures. All of them are fatal at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue or second initialization).
    EventLoopCreation(String),

    /// The native window could not be created.
    WindowCreation(String),

    /// The event loop exited during initialization with this code.
    EventLoopExit(i32),
}

impl PlatformError {
    /// Process exit code used when this error terminates the program.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::EventLoopCreation(_) => 1,
            Self::WindowCreation(_) => 2,
            Self::EventLoopExit(code) => *code,
        }
    }
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
            Self::EventLoopExit(code) => write!(f, "Event loop exited with code {}", code),
        }
    }
}

impl std::error::Error for PlatformError {}

//=========================================================================
// Unit Tests
//=========================================================================
