//=========================================================================
// Core Systems
//
// Engine-side building blocks shared by displays, the editor and the
// platform layer.
//
// Layout:
//   tag              CompoundTag trees for display save/load
//   input            key/mouse events and per-frame state
//   window           WindowConfig, WindowState and the Window facade
//   platform_bridge  WindowBackend seam (winit or headless)
//   camera           fly cameras and the active-camera slot
//   world            entities, components and transforms
//   display          Display trait, DisplayManager and built-in displays
//
//=========================================================================

pub mod camera;
pub mod display;
pub mod input;
pub mod platform_bridge;
pub mod tag;
pub mod window;
pub mod world;
