//=========================================================================
// Debug Menu
//=========================================================================
//
// Toggleable statistics window. The "General" tab shows frame timing and
// the active camera position; games add their own tabs by name.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{BTreeMap, VecDeque};

use glam::Vec3;
use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::camera::Cameras;

/// Frames averaged for the timing readout.
const FRAME_WINDOW: usize = 120;

pub const GENERAL_TAB: &str = "General";

//=== DebugTab ============================================================

/// A custom tab: text rows the game refreshes as it likes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugTab {
    lines: Vec<String>,
}

impl DebugTab {
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

//=== GeneralStats ========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneralStats {
    pub average_frame_ms: f32,
    pub fps: f32,
    pub camera_position: Option<Vec3>,
}

//=== DebugMenu ===========================================================

#[derive(Debug, Default)]
pub struct DebugMenu {
    visible: bool,
    frame_times: VecDeque<f32>,
    tabs: BTreeMap<String, DebugTab>,
    selected: Option<String>,
}

impl DebugMenu {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Visibility -------------------------------------------------------

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    //--- Timing -----------------------------------------------------------

    /// Adds one frame's delta (seconds) to the rolling window.
    pub fn record_frame(&mut self, dt: f32) {
        if self.frame_times.len() == FRAME_WINDOW {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(dt);
    }

    pub fn average_frame_time(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }

    pub fn fps(&self) -> f32 {
        match self.average_frame_time() {
            t if t > 0.0 => 1.0 / t,
            _ => 0.0,
        }
    }

    pub fn general(&self, cameras: &Cameras) -> GeneralStats {
        GeneralStats {
            average_frame_ms: self.average_frame_time() * 1000.0,
            fps: self.fps(),
            camera_position: cameras.active().map(|camera| camera.position),
        }
    }

    //--- Tabs -------------------------------------------------------------

    /// The tab called `name`, created empty if missing.
    pub fn tab_mut(&mut self, name: &str) -> &mut DebugTab {
        if !self.tabs.contains_key(name) {
            debug!(target: "editor", "Debug tab '{}' added", name);
        }
        self.tabs.entry(name.to_owned()).or_default()
    }

    pub fn tab(&self, name: &str) -> Option<&DebugTab> {
        self.tabs.get(name)
    }

    pub fn remove_tab(&mut self, name: &str) -> bool {
        if self.selected.as_deref() == Some(name) {
            self.selected = None;
        }
        self.tabs.remove(name).is_some()
    }

    pub fn clear_tabs(&mut self) {
        self.tabs.clear();
        self.selected = None;
    }

    /// "General" first, then custom tabs by name.
    pub fn tab_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(GENERAL_TAB).chain(self.tabs.keys().map(String::as_str))
    }

    pub fn select_tab(&mut self, name: &str) -> bool {
        if name == GENERAL_TAB {
            self.selected = None;
            return true;
        }
        if !self.tabs.contains_key(name) {
            return false;
        }
        self.selected = Some(name.to_owned());
        true
    }

    pub fn selected_tab(&self) -> &str {
        self.selected.as_deref().unwrap_or(GENERAL_TAB)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::Camera;

    #[test]
    fn averages_recent_frames() {
        let mut menu = DebugMenu::new();
        assert_eq!(menu.fps(), 0.0);

        for _ in 0..FRAME_WINDOW {
            menu.record_frame(1.0);
        }
        for _ in 0..FRAME_WINDOW {
            menu.record_frame(0.5);
        }
        assert_eq!(menu.average_frame_time(), 0.5);
        assert_eq!(menu.fps(), 2.0);
    }

    #[test]
    fn general_reports_active_camera() {
        let mut cameras = Cameras::new();
        let menu = DebugMenu::new();
        assert_eq!(menu.general(&cameras).camera_position, None);

        let id = cameras.add(Camera::new(Vec3::new(1.0, 2.0, 3.0)));
        cameras.set_active(Some(id));
        assert_eq!(menu.general(&cameras).camera_position, Some(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn custom_tabs_follow_general() {
        let mut menu = DebugMenu::new();
        menu.tab_mut("Physics").push_line("bodies: 3");
        menu.tab_mut("Audio");

        assert_eq!(menu.tab_names().collect::<Vec<_>>(), vec!["General", "Audio", "Physics"]);
        assert!(menu.select_tab("Physics"));
        assert!(!menu.select_tab("Missing"));

        assert!(menu.remove_tab("Physics"));
        assert_eq!(menu.selected_tab(), GENERAL_TAB);
    }
}
