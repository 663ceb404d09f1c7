//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use proscenium_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Displays
pub use crate::core::display::{
    AssetLoadListener, DefaultLoadingScreenDisplay, Display, DisplayContext, DisplayError, DisplayFactory,
    DisplayManager, LoadingProgress, SceneDisplay,
};

// Save data
pub use crate::core::tag::{CompoundTag, Tag};

// Window and input
pub use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use crate::core::window::{Rect, Window, WindowConfig, WindowState};

// Cameras and world
pub use crate::core::camera::{Camera, CameraId, Cameras};
pub use crate::core::world::{Component, ComponentRegistry, EntityId, TransformComponent, World};

// Editor overlay
#[cfg(feature = "editor")]
pub use crate::editor::{Editor, EditorConfig, EditorError, Gizmo, GizmoMode, GizmoOperation};
