//=========================================================================
// Display System
//=========================================================================
//
// Named, switchable screens with save/load and lifecycle hooks.
//
// Architecture:
//   DisplayManager
//     ├─ displays: BTreeMap<String, Box<dyn Display>>
//     ├─ active: Option<String>          (None until init)
//     ├─ window: Option<Window>          (owned from init to close)
//     ├─ cameras: Cameras                (single active slot)
//     └─ switches: SwitchQueue           (requests made inside hooks)
//
// Lifecycle of one display:
//   register → on_load(tag) → [on_switch → (update → render)* → on_leave]*
//            → on_save → dropped (remove / close)
//
// Tick:
//   update() → active.update() → active.render() → process_switches()
//
//=========================================================================

//=== Module Declarations =================================================

mod display_manager;
mod error;
mod factory;
mod loading_screen;
mod scene_display;
mod switch_queue;

//=== Public API ==========================================================

pub use display_manager::{ActiveParts, DisplayManager, DEFAULT_LOADING_SCREEN};
pub use error::DisplayError;
pub use factory::{DisplayConstructor, DisplayFactory};
pub use loading_screen::{AssetLoadListener, DefaultLoadingScreenDisplay, LoadingProgress, ProgressSnapshot};
pub use scene_display::SceneDisplay;
pub use switch_queue::SwitchQueue;

//=== Internal Dependencies ===============================================

use crate::core::camera::Cameras;
use crate::core::tag::CompoundTag;
use crate::core::window::WindowState;
use crate::core::world::World;

//=== DisplayContext ======================================================

/// Engine state a display may touch while one of its hooks runs.
pub struct DisplayContext<'a> {
    pub window: &'a mut WindowState,
    pub cameras: &'a mut Cameras,
    /// Switches requested here run after the current tick's render.
    pub switches: &'a mut SwitchQueue,
}

//=== Display Trait =======================================================

/// A named screen driven by [`DisplayManager`].
///
/// Only `name`, `on_save`, `update` and `allocate` are required; the other
/// hooks default to doing nothing.
///
/// ```rust
/// # use proscenium_engine::prelude::*;
/// struct Menu {
///     name: String,
/// }
///
/// impl Display for Menu {
///     fn name(&self) -> &str {
///         &self.name
///     }
///
///     fn on_save(&self) -> CompoundTag {
///         CompoundTag::new()
///     }
///
///     fn update(&mut self, ctx: &mut DisplayContext<'_>) {
///         if ctx.window.input().is_key_pressed(KeyCode::Enter) {
///             ctx.switches.request("game");
///         }
///     }
///
///     fn allocate(&self, name: &str) -> Box<dyn Display> {
///         Box::new(Menu { name: name.to_owned() })
///     }
/// }
/// ```
pub trait Display {
    /// Registry key. Must not change after registration.
    fn name(&self) -> &str;

    /// Persistent state, delivered unmodified to a later `on_load`.
    fn on_save(&self) -> CompoundTag;

    /// Called once right after registration, before the display can become
    /// active. `tag` is empty when nothing was saved under this name.
    fn on_load(&mut self, _tag: &CompoundTag, _cameras: &mut Cameras) {}

    /// Inactive → active. Claim the active camera and other exclusive
    /// resources here.
    fn on_switch(&mut self, _ctx: &mut DisplayContext<'_>) {}

    /// Active → inactive, before the next display's `on_switch`.
    fn on_leave(&mut self, _ctx: &mut DisplayContext<'_>) {}

    /// Called when the display is dropped from the registry, before its
    /// final `on_save`. Release what `on_load` added to `cameras` here.
    fn on_remove(&mut self, _cameras: &mut Cameras) {}

    fn update(&mut self, ctx: &mut DisplayContext<'_>);

    fn render(&mut self, _ctx: &mut DisplayContext<'_>) {}

    /// The owned world, or `None` for displays without one.
    fn world(&self) -> Option<&World> {
        None
    }

    fn world_mut(&mut self) -> Option<&mut World> {
        None
    }

    /// Fresh instance of the same concrete type under another name.
    fn allocate(&self, name: &str) -> Box<dyn Display>;
}
