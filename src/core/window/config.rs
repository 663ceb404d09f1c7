//=========================================================================
// Window Configuration
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== WindowConfig ========================================================

/// Settings applied when the window is created.
///
/// # Default Values
///
/// - **Title**: "Proscenium"
/// - **Size**: 1280x720
/// - **FOV**: 90° vertical
/// - **Clip planes**: 0.1 .. 1000.0
/// - **Resizable**: true
///
/// # Examples
///
/// ```rust
/// use proscenium_engine::core::window::WindowConfig;
///
/// let config = WindowConfig::new("Sandbox")
///     .with_size(1920, 1080)
///     .with_fov(70.0);
/// assert_eq!(config.width, 1920);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Proscenium".to_owned(),
            width: 1280,
            height: 720,
            fov: 90.0,
            near: 0.1,
            far: 1000.0,
            resizable: true,
        }
    }
}

impl WindowConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    /// Sets the initial inner size in physical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the vertical field of view in degrees.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < fov < 180`.
    pub fn with_fov(mut self, fov: f32) -> Self {
        assert!(fov > 0.0 && fov < 180.0, "FOV must be in (0, 180), got {}", fov);
        self.fov = fov;
        self
    }

    /// Sets the near and far clip planes.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < near < far`.
    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        assert!(near > 0.0 && near < far, "Clip planes must satisfy 0 < near < far, got {}..{}", near, far);
        self.near = near;
        self.far = far;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = WindowConfig::new("Game").with_size(800, 600).with_clip_planes(0.5, 50.0);
        assert_eq!(config.title, "Game");
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!((config.near, config.far), (0.5, 50.0));
        assert_eq!(config.fov, 90.0);
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn zero_size_panics() {
        WindowConfig::default().with_size(0, 600);
    }

    #[test]
    #[should_panic(expected = "FOV must be in (0, 180)")]
    fn flat_fov_panics() {
        WindowConfig::default().with_fov(180.0);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: WindowConfig = serde_json::from_str(r#"{ "title": "From File" }"#).unwrap();
        assert_eq!(config.title, "From File");
        assert_eq!(config.width, 1280);
    }
}
