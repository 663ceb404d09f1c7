//=========================================================================
// Platform Subsystem
//
// Winit backend for `Window`.
//
// Architecture:
// ```text
//  Window::begin_frame()
//    └─ WinitBackend::begin_frame()
//         └─ pump_app_events(timeout = 0)
//              └─ PlatformHandler (ApplicationHandler)
//                   ├─ KeyboardInput / MouseInput / CursorMoved ─┐
//                   ├─ DeviceEvent::MouseMotion ─────────────────┤→ frame events
//                   ├─ Resized ─────────────→ pending resize     │
//                   └─ CloseRequested ──────→ close flag         │
//    ← events folded into WindowState::input ←───────────────────┘
//
//  Window::end_frame()
//    └─ WinitBackend::end_frame()
//         ├─ apply WindowRequests (maximize, restore, grab, close)
//         └─ request_redraw()
// ```
//
// Key Design Decisions:
// - **Pumped loop**: `pump_app_events` with a zero timeout keeps the
//   engine in charge of the frame loop; polling never blocks.
// - **Main thread requirement**: winit creates the event loop on the
//   calling thread, which must be the main thread on macOS.
// - **One window per process**: winit refuses a second event loop, which
//   surfaces as `PlatformError::EventLoopCreation`.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== External Crates =====================================================

use std::time::{Duration, Instant};

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{CursorGrabMode, Window as NativeWindow, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::input::InputEvent;
use crate::core::platform_bridge::{FrameControl, PlatformError, WindowBackend};
use crate::core::window::{WindowConfig, WindowRequest, WindowState};
use input_processor::InputProcessor;

/// Pumps allowed during startup for the OS to deliver `resumed`.
const STARTUP_PUMPS: usize = 16;

//=== WinitBackend ========================================================

/// Native window backed by winit.
pub(crate) struct WinitBackend {
    event_loop: EventLoop<()>,
    handler: PlatformHandler,
    last_frame: Instant,
}

impl WinitBackend {
    //--- Construction -----------------------------------------------------

    /// Creates the event loop and pumps it until the window exists.
    pub(crate) fn new(config: &WindowConfig, state: &mut WindowState) -> Result<Self, PlatformError> {
        debug!(target: "platform", "Creating winit event loop");

        let event_loop = EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        let attributes = WindowAttributes::default()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(config.resizable);

        let mut backend = Self {
            event_loop,
            handler: PlatformHandler::new(attributes),
            last_frame: Instant::now(),
        };

        for _ in 0..STARTUP_PUMPS {
            if let PumpStatus::Exit(code) =
                backend.event_loop.pump_app_events(Some(Duration::ZERO), &mut backend.handler)
            {
                return Err(PlatformError::EventLoopExit(code));
            }

            if let Some(e) = backend.handler.creation_error.take() {
                return Err(PlatformError::WindowCreation(e));
            }

            if let Some(window) = &backend.handler.window {
                let size = window.inner_size();
                state.handle_resize(size.width, size.height);
                backend.handler.resized = None;
                return Ok(backend);
            }
        }

        Err(PlatformError::WindowCreation("window was not created during startup".to_owned()))
    }

    //--- Request Handling -------------------------------------------------

    fn apply_request(&self, window: &NativeWindow, request: WindowRequest, state: &mut WindowState) {
        match request {
            WindowRequest::Maximize => {
                window.set_maximized(true);
                state.set_maximized(true);
            }
            WindowRequest::Restore => {
                window.set_maximized(false);
                state.set_maximized(false);
            }
            WindowRequest::GrabMouse(true) => {
                let grabbed = window
                    .set_cursor_grab(CursorGrabMode::Locked)
                    .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
                if let Err(e) = grabbed {
                    warn!(target: "platform", "Cursor grab unavailable: {}", e);
                }
                window.set_cursor_visible(false);
            }
            WindowRequest::GrabMouse(false) => {
                if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                    warn!(target: "platform", "Cursor release failed: {}", e);
                }
                window.set_cursor_visible(true);
            }
            WindowRequest::Close => state.mark_close_requested(),
        }
    }
}

impl WindowBackend for WinitBackend {
    fn begin_frame(&mut self, state: &mut WindowState) -> FrameControl {
        let status = self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.handler);

        let now = Instant::now();
        state.set_frame_delta(now - self.last_frame);
        self.last_frame = now;

        trace!(target: "platform::input", "Processing {} input events", self.handler.events.len());
        state.input_mut().process_events(&self.handler.events);
        self.handler.events.clear();

        if let Some((width, height)) = self.handler.resized.take() {
            state.handle_resize(width, height);
        }

        if let PumpStatus::Exit(code) = status {
            info!(target: "platform", "Event loop exited with code {}", code);
            state.mark_close_requested();
            return FrameControl::Exit;
        }

        if self.handler.close_requested || state.is_close_requested() {
            state.mark_close_requested();
            return FrameControl::Exit;
        }

        FrameControl::Continue
    }

    fn end_frame(&mut self, state: &mut WindowState) {
        let requests = state.take_requests();
        let Some(window) = &self.handler.window else {
            return;
        };

        for request in requests {
            debug!(target: "platform", "Applying {:?}", request);
            self.apply_request(window, request, state);
        }

        window.request_redraw();
    }
}

//=== PlatformHandler =====================================================

/// Receives winit callbacks during a pump and buffers them for the frame.
struct PlatformHandler {
    attributes: Option<WindowAttributes>,
    window: Option<NativeWindow>,
    creation_error: Option<String>,
    input_processor: InputProcessor,
    events: Vec<InputEvent>,
    resized: Option<(u32, u32)>,
    close_requested: bool,
}

impl PlatformHandler {
    fn new(attributes: WindowAttributes) -> Self {
        Self {
            attributes: Some(attributes),
            window: None,
            creation_error: None,
            input_processor: InputProcessor::new(),
            events: Vec::with_capacity(64),
            resized: None,
            close_requested: false,
        }
    }
}

impl ApplicationHandler for PlatformHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (resume)");
            return;
        }
        let Some(attributes) = self.attributes.take() else {
            return;
        };

        match event_loop.create_window(attributes) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.creation_error = Some(e.to_string());
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.close_requested = true;
            }

            WindowEvent::Resized(size) => {
                self.resized = Some((size.width, size.height));
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.input_processor.update_modifiers(modifiers.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.events.push(InputEvent::CursorMoved { x: position.x as f32, y: position.y as f32 });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(&event) {
                    self.events.push(event);
                } else {
                    trace!(target: "platform::input", "Unmapped key ignored");
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.events.push(self.input_processor.process_mouse_button(button, state));
            }

            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.events.push(InputEvent::MouseMotion { dx: dx as f32, dy: dy as f32 });
        }
    }
}
