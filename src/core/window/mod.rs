//=========================================================================
// Window
//=========================================================================
//
// Engine-facing window: WindowState plus a boxed WindowBackend.
//
// Frame protocol:
//   begin_frame()  input edges cleared → backend polls OS → mouse delta
//   ...            displays / editor read and queue changes on state
//   end_frame()    backend presents and applies queued requests
//
// A failed native initialization is fatal: `Window::init` logs the error
// and exits the process with the backend's error code.
//
//=========================================================================

//=== Module Declarations =================================================

mod config;
mod state;

//=== External Dependencies ===============================================

use log::{error, info};

//=== Public API ==========================================================

pub use config::WindowConfig;
pub use state::{Rect, WindowRequest, WindowState};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{FrameControl, HeadlessBackend, PlatformError, WindowBackend};
use crate::platform::WinitBackend;

//=== Window ==============================================================

/// A window and its backend.
pub struct Window {
    state: WindowState,
    backend: Box<dyn WindowBackend>,
}

impl Window {
    //--- Construction -----------------------------------------------------

    /// Opens the native window, terminating the process on failure.
    ///
    /// Must be called on the main thread, at most once per process.
    pub fn init(config: &WindowConfig) -> Self {
        match Self::try_init(config) {
            Ok(window) => window,
            Err(e) => {
                error!(target: "platform", "{}", e);
                std::process::exit(e.exit_code());
            }
        }
    }

    /// Opens the native window, returning the failure instead of exiting.
    pub fn try_init(config: &WindowConfig) -> Result<Self, PlatformError> {
        let mut state = WindowState::new(config);
        let backend = WinitBackend::new(config, &mut state)?;
        info!(target: "platform", "Window '{}' initialized ({}x{})", config.title, state.width(), state.height());
        Ok(Self { state, backend: Box::new(backend) })
    }

    /// Window driven by [`HeadlessBackend`] defaults.
    pub fn headless(config: &WindowConfig) -> Self {
        Self::with_backend(config, HeadlessBackend::new())
    }

    pub fn with_backend(config: &WindowConfig, backend: impl WindowBackend + 'static) -> Self {
        Self { state: WindowState::new(config), backend: Box::new(backend) }
    }

    //--- Frame ------------------------------------------------------------

    /// Polls input and window events for a new frame.
    pub fn begin_frame(&mut self) -> FrameControl {
        self.state.input_mut().begin_frame();
        let control = self.backend.begin_frame(&mut self.state);
        self.state.input_mut().finalize_frame();
        control
    }

    /// Presents the frame and applies queued window requests.
    pub fn end_frame(&mut self) {
        self.backend.end_frame(&mut self.state);
    }

    //--- Accessors --------------------------------------------------------

    pub fn state(&self) -> &WindowState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut WindowState {
        &mut self.state
    }

    pub fn is_close_requested(&self) -> bool {
        self.state.is_close_requested()
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window").field("state", &self.state).finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
