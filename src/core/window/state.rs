//=========================================================================
// Window State
//=========================================================================
//
// Backend-independent half of the window: sizes, render rectangle,
// projection matrices, input state, frame timing and queued requests.
//
// Resizing:
//   listen_to_resize = true   OS resize → render rect = full window,
//                             ortho + projection recomputed
//   listen_to_resize = false  OS resize only updates width/height; the
//                             render rect and matrices stay where the
//                             editor put them
//
// Requests (maximize, restore, mouse grab, close) are queued here and
// applied by the backend at end_frame, so displays never need the native
// handle.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::{Mat4, Vec2, Vec3, Vec4};
use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::WindowConfig;
use crate::core::input::StateTracker;

//=== Rect ================================================================

/// Pixel rectangle, origin at the bottom-left like a GL viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }
}

//=== WindowRequest =======================================================

/// Changes to the native window applied at the end of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRequest {
    Maximize,
    Restore,
    GrabMouse(bool),
    Close,
}

//=== WindowState =========================================================

/// Everything a display or the editor may read or change about the window.
#[derive(Debug)]
pub struct WindowState {
    title: String,
    width: u32,
    height: u32,

    listen_to_resize: bool,
    render_rect: Rect,
    ortho: Mat4,
    projection: Mat4,
    fov: f32,
    near: f32,
    far: f32,

    input: StateTracker,
    mouse_grabbed: bool,
    maximized: bool,
    frame_delta: Duration,
    close_requested: bool,
    requests: Vec<WindowRequest>,
}

impl WindowState {
    pub(crate) fn new(config: &WindowConfig) -> Self {
        let mut state = Self {
            title: config.title.clone(),
            width: config.width,
            height: config.height,
            listen_to_resize: true,
            render_rect: Rect::full(config.width, config.height),
            ortho: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            fov: config.fov,
            near: config.near,
            far: config.far,
            input: StateTracker::new(),
            mouse_grabbed: false,
            maximized: false,
            frame_delta: Duration::ZERO,
            close_requested: false,
            requests: Vec::new(),
        };
        state.force_window_update();
        state
    }

    //--- Size -------------------------------------------------------------

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn maximize(&mut self) {
        self.requests.push(WindowRequest::Maximize);
    }

    pub fn restore(&mut self) {
        self.requests.push(WindowRequest::Restore);
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    //--- Viewport ---------------------------------------------------------

    /// Freezes (false) or resumes (true) viewport updates on OS resize.
    pub fn set_listen_to_resize(&mut self, listen: bool) {
        debug!(target: "platform", "Listen to resize: {}", listen);
        self.listen_to_resize = listen;
    }

    pub fn is_listening_to_resize(&self) -> bool {
        self.listen_to_resize
    }

    /// Overrides the sub-rectangle the game renders into.
    pub fn set_render_rect(&mut self, rect: Rect) {
        trace!(target: "platform", "Render rect set to {:?}", rect);
        self.render_rect = rect;
    }

    pub fn render_rect(&self) -> Rect {
        self.render_rect
    }

    /// Recomputes the rect and both matrices from the real window size.
    pub fn force_window_update(&mut self) {
        self.render_rect = Rect::full(self.width, self.height);
        self.update_only_ortho(self.width, self.height);
        self.update_only_projection(self.width, self.height);
    }

    pub fn update_only_ortho(&mut self, width: u32, height: u32) {
        self.update_only_ortho_rect(Rect::full(width, height));
    }

    /// Orthographic matrix covering `rect` in pixels.
    pub fn update_only_ortho_rect(&mut self, rect: Rect) {
        let (left, bottom) = (rect.x as f32, rect.y as f32);
        self.ortho = Mat4::orthographic_rh(
            left,
            left + rect.width as f32,
            bottom,
            bottom + rect.height as f32,
            -1.0,
            1.0,
        );
    }

    pub fn update_only_projection(&mut self, width: u32, height: u32) {
        self.update_only_projection_rect(Rect::full(width, height));
    }

    /// Perspective matrix whose aspect ratio matches `rect`.
    pub fn update_only_projection_rect(&mut self, rect: Rect) {
        let aspect = if rect.height == 0 { 1.0 } else { rect.width as f32 / rect.height as f32 };
        self.projection = Mat4::perspective_rh(self.fov.to_radians(), aspect, self.near, self.far);
    }

    pub fn ortho(&self) -> Mat4 {
        self.ortho
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Projects a world position to window pixels (top-left origin).
    pub fn world_to_screen(&self, position: Vec3, view: Mat4) -> Vec2 {
        let clip = self.projection * view * Vec4::new(position.x, position.y, position.z, 1.0);
        let ndc = clip.truncate() / clip.w;
        let (w, h) = (self.width as f32, self.height as f32);
        Vec2::new((ndc.x + 1.0) / 2.0 * w, h - (ndc.y + 1.0) / 2.0 * h)
    }

    //--- Mouse & Input ----------------------------------------------------

    pub fn input(&self) -> &StateTracker {
        &self.input
    }

    pub fn mouse_position(&self) -> (f32, f32) {
        self.input.mouse_position()
    }

    pub fn mouse_delta(&self) -> (f32, f32) {
        self.input.mouse_delta()
    }

    pub fn set_mouse_grabbed(&mut self, grabbed: bool) {
        if self.mouse_grabbed != grabbed {
            self.mouse_grabbed = grabbed;
            self.requests.push(WindowRequest::GrabMouse(grabbed));
        }
    }

    pub fn is_mouse_grabbed(&self) -> bool {
        self.mouse_grabbed
    }

    //--- Frame ------------------------------------------------------------

    pub fn frame_delta(&self) -> Duration {
        self.frame_delta
    }

    pub fn delta_seconds(&self) -> f32 {
        self.frame_delta.as_secs_f32()
    }

    pub fn request_close(&mut self) {
        self.requests.push(WindowRequest::Close);
    }

    pub fn is_close_requested(&self) -> bool {
        self.close_requested
    }

    //--- Backend Hooks ----------------------------------------------------

    pub(crate) fn input_mut(&mut self) -> &mut StateTracker {
        &mut self.input
    }

    /// Applies an OS resize; see the module notes for listen-to-resize.
    pub(crate) fn handle_resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }

        debug!(target: "platform", "Window resized to {}x{}", width, height);
        self.width = width;
        self.height = height;

        if self.listen_to_resize {
            self.force_window_update();
        }
    }

    pub(crate) fn set_frame_delta(&mut self, delta: Duration) {
        self.frame_delta = delta;
    }

    pub(crate) fn set_maximized(&mut self, maximized: bool) {
        self.maximized = maximized;
    }

    pub(crate) fn mark_close_requested(&mut self) {
        self.close_requested = true;
    }

    pub(crate) fn take_requests(&mut self) -> Vec<WindowRequest> {
        std::mem::take(&mut self.requests)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> WindowState {
        WindowState::new(&WindowConfig::default().with_size(800, 600))
    }

    #[test]
    fn starts_with_full_render_rect() {
        let state = state();
        assert_eq!(state.render_rect(), Rect::full(800, 600));
        assert!(state.is_listening_to_resize());
    }

    #[test]
    fn resize_updates_viewport_when_listening() {
        let mut state = state();
        state.handle_resize(1024, 768);
        assert_eq!(state.render_rect(), Rect::full(1024, 768));
    }

    #[test]
    fn frozen_viewport_survives_resize() {
        let mut state = state();
        state.set_listen_to_resize(false);
        state.set_render_rect(Rect::new(255, 320, 270, 258));
        let projection = state.projection();

        state.handle_resize(1024, 768);

        assert_eq!((state.width(), state.height()), (1024, 768));
        assert_eq!(state.render_rect(), Rect::new(255, 320, 270, 258));
        assert_eq!(state.projection(), projection);
    }

    #[test]
    fn force_update_resets_overrides() {
        let mut state = state();
        state.set_listen_to_resize(false);
        state.set_render_rect(Rect::new(10, 10, 10, 10));
        state.force_window_update();
        assert_eq!(state.render_rect(), Rect::full(800, 600));
    }

    #[test]
    fn ortho_maps_rect_corners_to_clip_edges() {
        let mut state = state();
        state.update_only_ortho(800, 600);
        let corner = state.ortho().project_point3(Vec3::new(800.0, 600.0, 0.0));
        assert!(corner.truncate().abs_diff_eq(Vec2::ONE, 1e-5));
    }

    #[test]
    fn world_to_screen_centers_point_ahead() {
        let state = state();
        let view = Mat4::look_to_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        let screen = state.world_to_screen(Vec3::new(0.0, 0.0, -5.0), view);
        assert!(screen.abs_diff_eq(Vec2::new(400.0, 300.0), 1e-3));
    }

    #[test]
    fn grab_requests_are_queued_once() {
        let mut state = state();
        state.set_mouse_grabbed(true);
        state.set_mouse_grabbed(true);
        assert_eq!(state.take_requests(), vec![WindowRequest::GrabMouse(true)]);
        assert!(state.take_requests().is_empty());
    }
}
