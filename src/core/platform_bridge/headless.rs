//=========================================================================
// Headless Backend
//=========================================================================
//
// Window backend without an OS window. Frames advance by a fixed delta,
// input and resizes come from a script, and the run can be capped at a
// frame count. Used by tests and offscreen runs.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::interface::{FrameControl, WindowBackend};
use crate::core::input::InputEvent;
use crate::core::window::{WindowRequest, WindowState};

//=== ScriptedFrame =======================================================

/// Platform activity replayed on one frame.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFrame {
    pub events: Vec<InputEvent>,
    pub resize: Option<(u32, u32)>,
    pub close: bool,
}

impl ScriptedFrame {
    pub fn input(events: Vec<InputEvent>) -> Self {
        Self { events, ..Self::default() }
    }

    pub fn resize(width: u32, height: u32) -> Self {
        Self { resize: Some((width, height)), ..Self::default() }
    }

    pub fn close() -> Self {
        Self { close: true, ..Self::default() }
    }
}

//=== HeadlessBackend =====================================================

/// Deterministic backend; see module notes.
#[derive(Debug)]
pub struct HeadlessBackend {
    fixed_delta: Duration,
    frame_limit: Option<u64>,
    frames: u64,
    script: VecDeque<ScriptedFrame>,
    screen_size: (u32, u32),
    restore_size: Option<(u32, u32)>,
}

impl HeadlessBackend {
    /// 60 Hz fixed step, no frame limit, 1920x1080 "screen".
    pub fn new() -> Self {
        Self {
            fixed_delta: Duration::from_secs_f64(1.0 / 60.0),
            frame_limit: None,
            frames: 0,
            script: VecDeque::new(),
            screen_size: (1920, 1080),
            restore_size: None,
        }
    }

    pub fn with_fixed_delta(mut self, delta: Duration) -> Self {
        self.fixed_delta = delta;
        self
    }

    /// Exit after `frames` frames have been run.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Size the window takes when maximized.
    pub fn with_screen_size(mut self, width: u32, height: u32) -> Self {
        self.screen_size = (width, height);
        self
    }

    /// Appends a frame to the replay script.
    pub fn with_frame(mut self, frame: ScriptedFrame) -> Self {
        self.script.push_back(frame);
        self
    }

    pub fn frames_run(&self) -> u64 {
        self.frames
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowBackend for HeadlessBackend {
    fn begin_frame(&mut self, state: &mut WindowState) -> FrameControl {
        if state.is_close_requested() {
            return FrameControl::Exit;
        }
        if self.frame_limit.is_some_and(|limit| self.frames >= limit) {
            info!(target: "platform", "Headless frame limit reached after {} frames", self.frames);
            return FrameControl::Exit;
        }

        self.frames += 1;
        state.set_frame_delta(self.fixed_delta);

        if let Some(frame) = self.script.pop_front() {
            state.input_mut().process_events(&frame.events);
            if let Some((width, height)) = frame.resize {
                state.handle_resize(width, height);
            }
            if frame.close {
                state.mark_close_requested();
                return FrameControl::Exit;
            }
        }

        FrameControl::Continue
    }

    fn end_frame(&mut self, state: &mut WindowState) {
        for request in state.take_requests() {
            debug!(target: "platform", "Applying {:?}", request);
            match request {
                WindowRequest::Maximize => {
                    if !state.is_maximized() {
                        self.restore_size = Some((state.width(), state.height()));
                        state.handle_resize(self.screen_size.0, self.screen_size.1);
                        state.set_maximized(true);
                    }
                }
                WindowRequest::Restore => {
                    if let Some((width, height)) = self.restore_size.take() {
                        state.handle_resize(width, height);
                    }
                    state.set_maximized(false);
                }
                WindowRequest::GrabMouse(_) => {}
                WindowRequest::Close => state.mark_close_requested(),
            }
        }
    }
}
