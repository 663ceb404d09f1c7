//=========================================================================
// Editor Overlay
//=========================================================================
//
// In-engine editor drawn over the active display.
//
// Architecture:
//   Editor
//     ├─ layout      panel sizes → game viewport rect
//     ├─ hierarchy   entities of the active display's World, selection
//     ├─ inspector   components/fields of the selection, add component
//     ├─ gizmo       translate / rotate / scale on the selected Transform
//     ├─ console     log records from every thread
//     ├─ menu        open / save / create displays
//     └─ debug menu  timing, camera, custom tabs
//
// Open/close:
//   open   save active camera → activate editor camera
//          stop listening to resize → viewport = layout.viewport()
//   close  remove editor camera → restore saved camera
//          listen to resize → force_window_update()
//
// The editor never owns the world. Every operation borrows it from the
// DisplayManager for the duration of the call.
//
//=========================================================================

//=== Module Declarations =================================================

mod console;
mod debug_menu;
mod gizmo;
mod layout;

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::fmt;

use glam::Vec3;
use log::{debug, info, trace, warn, LevelFilter};
use serde::{Deserialize, Serialize};

//=== Public API ==========================================================

pub use console::{Console, ConsoleLine, ConsoleLogger};
pub use debug_menu::{DebugMenu, DebugTab, GeneralStats, GENERAL_TAB};
pub use gizmo::{Gizmo, GizmoMode, GizmoOperation, Snap};
pub use layout::EditorLayout;

//=== Internal Dependencies ===============================================

use crate::core::camera::{Camera, CameraId, Cameras};
use crate::core::display::{DisplayError, DisplayManager};
use crate::core::input::{KeyCode, MouseButton};
use crate::core::tag::CompoundTag;
use crate::core::window::WindowState;
use crate::core::world::{ComponentField, ComponentRegistry, EntityId, FieldValue, TransformComponent, World, WorldError};

//=== EditorConfig ========================================================

/// Editor settings.
///
/// # Default Values
///
/// - **Layout**: hierarchy 255, inspector 275, console 320, menu bar 22
/// - **Toggle key**: F1 (editor), F3 (debug menu)
/// - **Camera**: speed 10 units/s, sensitivity 0.1 degrees/pixel
/// - **Console capacity**: 1000 lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub layout: EditorLayout,
    pub toggle_key: KeyCode,
    pub debug_menu_key: KeyCode,
    pub camera_speed: f32,
    pub camera_sensitivity: f32,
    pub console_capacity: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            layout: EditorLayout::default(),
            toggle_key: KeyCode::F1,
            debug_menu_key: KeyCode::F3,
            camera_speed: 10.0,
            camera_sensitivity: 0.1,
            console_capacity: 1000,
        }
    }
}

impl EditorConfig {
    pub fn with_layout(mut self, layout: EditorLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_toggle_key(mut self, key: KeyCode) -> Self {
        self.toggle_key = key;
        self
    }

    /// # Panics
    ///
    /// Panics if `speed <= 0.0` or `sensitivity <= 0.0`.
    pub fn with_camera(mut self, speed: f32, sensitivity: f32) -> Self {
        assert!(speed > 0.0, "Camera speed must be positive, got {}", speed);
        assert!(sensitivity > 0.0, "Camera sensitivity must be positive, got {}", sensitivity);
        self.camera_speed = speed;
        self.camera_sensitivity = sensitivity;
        self
    }

    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_console_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Console capacity must be positive");
        self.console_capacity = capacity;
        self
    }
}

//=== EditorError =========================================================

/// Reportable editor failures; nothing is changed when one is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorError {
    World(WorldError),
    Display(DisplayError),
    /// The active display has no world.
    NoWorld,
    NoSelection,
    UnknownEntityName(String),
    NoAllocatorSelected,
    MissingComponent(String),
    InvalidField { component: String, label: String },
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::World(e) => write!(f, "{}", e),
            Self::Display(e) => write!(f, "{}", e),
            Self::NoWorld => write!(f, "The active display has no world"),
            Self::NoSelection => write!(f, "No entity selected"),
            Self::UnknownEntityName(name) => write!(f, "No entity named '{}'", name),
            Self::NoAllocatorSelected => write!(f, "No component type selected"),
            Self::MissingComponent(name) => write!(f, "Component '{}' not available", name),
            Self::InvalidField { component, label } => {
                write!(f, "Field '{}' of '{}' cannot take that value", label, component)
            }
        }
    }
}

impl std::error::Error for EditorError {}

impl From<WorldError> for EditorError {
    fn from(e: WorldError) -> Self {
        Self::World(e)
    }
}

impl From<DisplayError> for EditorError {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

/// Logs a failure before handing it back.
fn reported<T, E: Into<EditorError>>(result: Result<T, E>) -> Result<T, EditorError> {
    result.map_err(|e| {
        let e = e.into();
        warn!(target: "editor", "{}", e);
        e
    })
}

//=== ComponentView =======================================================

/// One inspector section.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentView {
    pub type_name: &'static str,
    pub fields: Vec<ComponentField>,
}

//=== Selection ===========================================================

/// Entity ids are only unique within one world, so the selection remembers
/// which display it was made in.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    display: String,
    entity: EntityId,
}

//=== Editor ==============================================================

pub struct Editor {
    config: EditorConfig,
    open: bool,
    open_requested: bool,

    camera: Camera,
    camera_id: Option<CameraId>,
    saved_camera: Option<CameraId>,
    last_window_size: Option<(u32, u32)>,

    selected: Option<Selection>,
    components: ComponentRegistry,
    component_filter: String,
    selected_allocator: Option<&'static str>,

    gizmo: Gizmo,
    console: Console,
    debug_menu: DebugMenu,
}

impl Editor {
    //--- Construction -----------------------------------------------------

    pub fn new(config: EditorConfig) -> Self {
        let console = Console::new(config.console_capacity);
        Self {
            config,
            open: false,
            open_requested: false,
            camera: Camera::new(Vec3::new(0.0, 2.0, 10.0)),
            camera_id: None,
            saved_camera: None,
            last_window_size: None,
            selected: None,
            components: ComponentRegistry::with_builtins(),
            component_filter: String::new(),
            selected_allocator: None,
            gizmo: Gizmo::new(),
            console,
            debug_menu: DebugMenu::new(),
        }
    }

    /// Component types offered by the inspector's "add component" list.
    pub fn with_components(mut self, components: ComponentRegistry) -> Self {
        self.components = components;
        self
    }

    /// Logger that prints into this editor's console.
    pub fn console_logger(&self, level: LevelFilter) -> ConsoleLogger {
        self.console.logger(level)
    }

    //--- Open / Close -----------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opens on the next [`render`](Self::render).
    pub fn set_to_open(&mut self) {
        self.open_requested = true;
    }

    pub fn open(&mut self, manager: &mut DisplayManager) -> Result<(), EditorError> {
        if self.open {
            return Ok(());
        }
        let Some(parts) = manager.active_parts() else {
            return reported(Err(DisplayError::NotInitialized));
        };

        self.saved_camera = parts.cameras.active_id();
        let id = parts.cameras.add(self.camera);
        parts.cameras.set_active(Some(id));
        self.camera_id = Some(id);

        parts.window.set_listen_to_resize(false);
        self.last_window_size = None;
        self.update_viewport(parts.window);

        self.open = true;
        info!(target: "editor", "Editor opened over '{}'", parts.name);
        Ok(())
    }

    pub fn close(&mut self, manager: &mut DisplayManager) {
        if !self.open {
            return;
        }
        self.open = false;

        let saved = self.saved_camera.take();
        let editor_camera = self.camera_id.take();

        let Some(parts) = manager.active_parts() else {
            debug!(target: "editor", "Editor closed without an active display");
            return;
        };

        if let Some(camera) = editor_camera.and_then(|id| parts.cameras.remove(id)) {
            self.camera = camera;
        }
        if !parts.cameras.set_active(saved) {
            parts.cameras.set_active(None);
        }

        parts.window.set_mouse_grabbed(false);
        parts.window.set_listen_to_resize(true);
        parts.window.force_window_update();
        info!(target: "editor", "Editor closed");
    }

    pub fn toggle(&mut self, manager: &mut DisplayManager) -> Result<(), EditorError> {
        if self.open {
            self.close(manager);
            Ok(())
        } else {
            self.open(manager)
        }
    }

    //--- Frame ------------------------------------------------------------

    /// Per-frame editor work, run after the display manager's update.
    pub fn render(&mut self, manager: &mut DisplayManager) {
        self.console.drain();
        self.drop_stale_selection(manager);

        let Some(parts) = manager.active_parts() else {
            return;
        };
        self.debug_menu.record_frame(parts.window.delta_seconds());
        if parts.window.input().is_key_pressed(self.config.debug_menu_key) {
            self.debug_menu.toggle();
        }
        let toggle = parts.window.input().is_key_pressed(self.config.toggle_key);

        let open_requested = std::mem::take(&mut self.open_requested);
        let opened = if toggle {
            self.toggle(manager)
        } else if open_requested {
            self.open(manager)
        } else {
            Ok(())
        };
        if let Err(e) = opened {
            trace!(target: "editor", "Editor stays closed this frame: {}", e);
        }

        if self.open {
            self.update_open(manager);
        }
    }

    fn update_open(&mut self, manager: &mut DisplayManager) {
        let Some(parts) = manager.active_parts() else {
            return;
        };

        // A display switched in while open claims the camera; keep it for
        // close and take the editor camera back.
        if parts.cameras.active_id() != self.camera_id {
            self.saved_camera = parts.cameras.active_id();
            if self.camera_id.map_or(true, |id| parts.cameras.get(id).is_none()) {
                self.camera_id = Some(parts.cameras.add(self.camera));
            }
            parts.cameras.set_active(self.camera_id);
        }

        self.update_viewport(parts.window);

        let look = parts.window.input().is_button_down(MouseButton::Right);
        parts.window.set_mouse_grabbed(look);

        let dt = parts.window.delta_seconds();
        if let Some(camera) = self.camera_id.and_then(|id| parts.cameras.get_mut(id)) {
            camera.fly(
                parts.window.input(),
                dt,
                self.config.camera_speed,
                self.config.camera_sensitivity,
                look,
            );
            self.camera = *camera;
        }
    }

    /// Re-fits the game viewport when the window size changed.
    fn update_viewport(&mut self, window: &mut WindowState) {
        let size = (window.width(), window.height());
        if self.last_window_size == Some(size) {
            return;
        }
        self.last_window_size = Some(size);

        let viewport = self.config.layout.viewport(size.0, size.1);
        trace!(target: "editor", "Viewport {:?} for window {}x{}", viewport, size.0, size.1);
        window.update_only_ortho(size.0, size.1);
        window.set_render_rect(viewport);
        window.update_only_projection_rect(viewport);
    }

    //--- Hierarchy --------------------------------------------------------

    /// Entities of the active display's world, in spawn order.
    pub fn hierarchy(&self, manager: &DisplayManager) -> Vec<(EntityId, String)> {
        manager
            .active_world()
            .map(|world| world.entities().map(|e| (e.id(), e.name().to_owned())).collect())
            .unwrap_or_default()
    }

    /// The selected entity, if it belongs to the active display.
    pub fn selected(&self, manager: &DisplayManager) -> Option<EntityId> {
        let selection = self.selected.as_ref()?;
        (manager.active_name() == Some(selection.display.as_str())).then_some(selection.entity)
    }

    /// Selects `entity` in the active display's world. Without an active
    /// display the selection is cleared.
    pub fn select(&mut self, manager: &DisplayManager, entity: Option<EntityId>) {
        debug!(target: "editor", "Selected {:?}", entity);
        self.selected = entity
            .zip(manager.active_name())
            .map(|(entity, display)| Selection { display: display.to_owned(), entity });
    }

    fn drop_stale_selection(&mut self, manager: &DisplayManager) {
        if self.selected.is_some() && self.selected(manager).is_none() {
            debug!(target: "editor", "Selection cleared after display switch");
            self.selected = None;
        }
    }

    fn selection(&self, manager: &DisplayManager) -> Result<EntityId, EditorError> {
        reported(self.selected(manager).ok_or(EditorError::NoSelection))
    }

    pub fn select_by_name(&mut self, manager: &DisplayManager, name: &str) -> Result<EntityId, EditorError> {
        let world = reported(manager.active_world().ok_or(EditorError::NoWorld))?;
        let id = reported(
            world.entity_by_name(name).map(|e| e.id()).ok_or_else(|| EditorError::UnknownEntityName(name.to_owned())),
        )?;
        self.select(manager, Some(id));
        Ok(id)
    }

    /// Spawns a named entity in the active world and selects it.
    pub fn add_entity(&mut self, manager: &mut DisplayManager, name: &str) -> Result<EntityId, EditorError> {
        let world = reported(active_world_mut(manager))?;
        let id = reported(world.spawn_entity(name))?;
        info!(target: "editor", "Added entity '{}'", name.trim());
        self.select(manager, Some(id));
        Ok(id)
    }

    //--- Inspector --------------------------------------------------------

    /// Components of the selected entity, or `None` without a valid
    /// selection.
    pub fn inspect(&self, manager: &DisplayManager) -> Option<Vec<ComponentView>> {
        let entity = manager.active_world()?.entity(self.selected(manager)?)?;
        Some(
            entity
                .components()
                .map(|component| ComponentView { type_name: component.type_name(), fields: component.fields() })
                .collect(),
        )
    }

    pub fn edit_field(
        &mut self,
        manager: &mut DisplayManager,
        component: &str,
        label: &str,
        value: FieldValue,
    ) -> Result<(), EditorError> {
        let id = self.selection(manager)?;
        let world = reported(active_world_mut(manager))?;
        let entity = reported(world.entity_mut(id).ok_or(WorldError::UnknownEntity(id)))?;
        let target =
            reported(entity.component_dyn_mut(component).ok_or_else(|| EditorError::MissingComponent(component.to_owned())))?;

        if !target.set_field(label, value) {
            return reported(Err(EditorError::InvalidField {
                component: component.to_owned(),
                label: label.to_owned(),
            }));
        }
        Ok(())
    }

    pub fn set_component_filter(&mut self, filter: &str) {
        self.component_filter = filter.to_owned();
    }

    /// Registered component types matching the filter (case-insensitive
    /// substring).
    pub fn filtered_allocators(&self) -> Vec<&'static str> {
        let filter = self.component_filter.to_lowercase();
        self.components.type_names().filter(|name| name.to_lowercase().contains(&filter)).collect()
    }

    pub fn select_allocator(&mut self, type_name: &str) -> bool {
        match self.components.type_names().find(|name| *name == type_name) {
            Some(name) => {
                self.selected_allocator = Some(name);
                true
            }
            None => false,
        }
    }

    pub fn selected_allocator(&self) -> Option<&'static str> {
        self.selected_allocator
    }

    /// Adds the selected allocator's default component to the selection.
    pub fn add_selected_component(&mut self, manager: &mut DisplayManager) -> Result<(), EditorError> {
        let type_name = reported(self.selected_allocator.ok_or(EditorError::NoAllocatorSelected))?;
        let id = self.selection(manager)?;
        let component = reported(
            self.components.allocate_default(type_name).ok_or_else(|| EditorError::MissingComponent(type_name.to_owned())),
        )?;

        let world = reported(active_world_mut(manager))?;
        reported(world.add_component(id, component))?;
        info!(target: "editor", "Added {} to {}", type_name, id);
        Ok(())
    }

    //--- Gizmo ------------------------------------------------------------

    pub fn gizmo(&self) -> &Gizmo {
        &self.gizmo
    }

    pub fn gizmo_mut(&mut self) -> &mut Gizmo {
        &mut self.gizmo
    }

    /// Applies a gizmo drag to the selected entity's transform.
    pub fn manipulate(&mut self, manager: &mut DisplayManager, delta: Vec3) -> Result<(), EditorError> {
        let id = self.selection(manager)?;
        let world = reported(active_world_mut(manager))?;
        let transform = reported(
            world
                .component_mut::<TransformComponent>(id)
                .ok_or_else(|| EditorError::MissingComponent(TransformComponent::TYPE_NAME.to_owned())),
        )?;

        self.gizmo.apply(transform, delta);
        Ok(())
    }

    //--- Menu Bar ---------------------------------------------------------

    /// Displays the "open" menu offers: everything but the active one.
    pub fn openable_displays(&self, manager: &DisplayManager) -> Vec<String> {
        manager.display_names().filter(|name| Some(*name) != manager.active_name()).map(str::to_owned).collect()
    }

    pub fn open_display(&mut self, manager: &mut DisplayManager, name: &str) -> Result<(), EditorError> {
        manager.change_display(name)?;
        self.drop_stale_selection(manager);
        Ok(())
    }

    pub fn save_all(&self, manager: &DisplayManager) -> BTreeMap<String, CompoundTag> {
        info!(target: "editor", "Saving all displays");
        manager.save_all()
    }

    pub fn display_types<'a>(&self, manager: &'a DisplayManager) -> Vec<&'a str> {
        manager.factory().type_names().collect()
    }

    pub fn create_display(
        &mut self,
        manager: &mut DisplayManager,
        type_name: &str,
        name: &str,
    ) -> Result<(), EditorError> {
        manager.create(type_name, name)?;
        Ok(())
    }

    //--- Panels -----------------------------------------------------------

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    pub fn debug_menu(&self) -> &DebugMenu {
        &self.debug_menu
    }

    pub fn debug_menu_mut(&mut self) -> &mut DebugMenu {
        &mut self.debug_menu
    }

    /// "General" tab contents for the current frame.
    pub fn general_stats(&self, cameras: &Cameras) -> GeneralStats {
        self.debug_menu.general(cameras)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("open", &self.open)
            .field("selected", &self.selected)
            .field("gizmo", &self.gizmo)
            .finish_non_exhaustive()
    }
}

fn active_world_mut(manager: &mut DisplayManager) -> Result<&mut World, EditorError> {
    if !manager.is_initialized() {
        return Err(DisplayError::NotInitialized.into());
    }
    manager.active_world_mut().ok_or(EditorError::NoWorld)
}

//=========================================================================
// Unit Tests
//=========================================================================
