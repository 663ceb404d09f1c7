//=========================================================================
// Editor Layout
//=========================================================================
//
// Panel placement around the game viewport, in window pixels with a
// bottom-left origin (the same convention as `Rect`).
//
//   ┌──────────────── menu bar ────────────────┐
//   │ hierarchy │     game viewport   │ inspector │
//   │           ├─────────────────────┤           │
//   │           │       console       │           │
//   └───────────┴─────────────────────┴───────────┘
//
//=========================================================================

use serde::{Deserialize, Serialize};

use crate::core::window::Rect;

//=== EditorLayout ========================================================

/// Fixed panel sizes in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorLayout {
    pub hierarchy_width: u32,
    pub inspector_width: u32,
    pub console_height: u32,
    pub menu_height: u32,
}

impl Default for EditorLayout {
    fn default() -> Self {
        Self { hierarchy_width: 255, inspector_width: 275, console_height: 320, menu_height: 22 }
    }
}

impl EditorLayout {
    /// Area left to the game once every panel is placed.
    pub fn viewport(&self, width: u32, height: u32) -> Rect {
        Rect::new(
            self.hierarchy_width as i32,
            self.console_height as i32,
            width.saturating_sub(self.hierarchy_width.saturating_add(self.inspector_width)),
            height.saturating_sub(self.console_height.saturating_add(self.menu_height)),
        )
    }

    pub fn menu_bar(&self, width: u32, height: u32) -> Rect {
        Rect::new(0, height.saturating_sub(self.menu_height) as i32, width, self.menu_height.min(height))
    }

    /// Full height below the menu bar, left edge.
    pub fn hierarchy(&self, _width: u32, height: u32) -> Rect {
        Rect::new(0, 0, self.hierarchy_width, height.saturating_sub(self.menu_height))
    }

    /// Full height below the menu bar, right edge.
    pub fn inspector(&self, width: u32, height: u32) -> Rect {
        Rect::new(
            width.saturating_sub(self.inspector_width) as i32,
            0,
            self.inspector_width,
            height.saturating_sub(self.menu_height),
        )
    }

    /// Between the side panels, under the viewport.
    pub fn console(&self, width: u32, _height: u32) -> Rect {
        Rect::new(
            self.hierarchy_width as i32,
            0,
            width.saturating_sub(self.hierarchy_width.saturating_add(self.inspector_width)),
            self.console_height,
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_is_what_panels_leave() {
        let layout = EditorLayout::default();
        assert_eq!(layout.viewport(800, 600), Rect::new(255, 320, 270, 258));
    }

    #[test]
    fn console_sits_under_viewport() {
        let layout = EditorLayout::default();
        let viewport = layout.viewport(1280, 720);
        let console = layout.console(1280, 720);

        assert_eq!(console.x, viewport.x);
        assert_eq!(console.width, viewport.width);
        assert_eq!(console.y + console.height as i32, viewport.y);
    }

    #[test]
    fn tiny_window_collapses_viewport() {
        let layout = EditorLayout::default();
        let viewport = layout.viewport(300, 200);
        assert_eq!((viewport.width, viewport.height), (0, 0));
    }

    #[test]
    fn menu_bar_spans_the_top() {
        let layout = EditorLayout::default();
        assert_eq!(layout.menu_bar(1280, 720), Rect::new(0, 698, 1280, 22));
    }

    #[test]
    fn oversized_panels_collapse_without_overflow() {
        let layout = EditorLayout {
            hierarchy_width: u32::MAX,
            inspector_width: 10,
            console_height: u32::MAX,
            menu_height: 10,
        };
        assert_eq!(layout.viewport(800, 600).width, 0);
        assert_eq!(layout.viewport(800, 600).height, 0);
        assert_eq!(layout.console(800, 600).width, 0);
    }
}
