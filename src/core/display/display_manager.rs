//=========================================================================
// Display Manager
//=========================================================================
//
// Registry of named displays and driver of the switch protocol.
//
// State machine:
//   Uninitialized ──init()──→ Idle(active = loading screen)
//   Idle(A) ──change_display(B)──→ A.on_leave → active = B → B.on_switch
//   Idle(A) ──close()──→ Uninitialized  (A.on_leave, on_save for all)
//
// `window.is_some()` and `active.is_some()` always agree: both are set by
// init and cleared by close.
//
// Registration may happen in either state. Every display receives exactly
// one `on_load` right after it is registered, with the tag saved under its
// name (see `restore_saved`) or an empty tag.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::{
    DefaultLoadingScreenDisplay, Display, DisplayContext, DisplayError, DisplayFactory, LoadingProgress,
    SwitchQueue,
};
use crate::core::camera::{CameraId, Cameras};
use crate::core::tag::CompoundTag;
use crate::core::window::{Window, WindowConfig, WindowState};
use crate::core::world::World;

/// Registry key of the loading screen created when none is configured.
pub const DEFAULT_LOADING_SCREEN: &str = "loading_screen";

//=== ActiveParts =========================================================

/// Simultaneous mutable access to the active display and the state it
/// shares with overlays.
pub struct ActiveParts<'a> {
    pub name: &'a str,
    pub display: &'a mut dyn Display,
    pub window: &'a mut WindowState,
    pub cameras: &'a mut Cameras,
}

//=== DisplayManager ======================================================

/// Owns every display, the window and the camera registry.
pub struct DisplayManager {
    displays: BTreeMap<String, Box<dyn Display>>,
    active: Option<String>,
    loading_screen: Option<String>,
    window: Option<Window>,
    cameras: Cameras,
    switches: SwitchQueue,
    factory: DisplayFactory,
    saved: BTreeMap<String, CompoundTag>,
    loading_progress: Arc<LoadingProgress>,
}

impl DisplayManager {
    //--- Construction -----------------------------------------------------

    /// Uninitialized manager with the built-in display types.
    pub fn new() -> Self {
        Self::with_factory(DisplayFactory::with_builtins())
    }

    pub fn with_factory(factory: DisplayFactory) -> Self {
        Self {
            displays: BTreeMap::new(),
            active: None,
            loading_screen: None,
            window: None,
            cameras: Cameras::new(),
            switches: SwitchQueue::new(),
            factory,
            saved: BTreeMap::new(),
            loading_progress: Arc::new(LoadingProgress::new()),
        }
    }

    //--- Registry ---------------------------------------------------------

    /// Adds a display and delivers its `on_load`.
    pub fn register(&mut self, mut display: Box<dyn Display>) -> Result<(), DisplayError> {
        let name = display.name().to_owned();
        if self.displays.contains_key(&name) {
            warn!(target: "display", "Display '{}' is already registered", name);
            return Err(DisplayError::DuplicateDisplay(name));
        }

        let tag = self.saved.remove(&name).unwrap_or_default();
        display.on_load(&tag, &mut self.cameras);

        debug!(target: "display", "Registered display '{}'", name);
        self.displays.insert(name, display);
        Ok(())
    }

    /// Builds a display through the factory and registers it.
    pub fn create(&mut self, type_name: &str, name: &str) -> Result<(), DisplayError> {
        let Some(display) = self.factory.create(type_name, name) else {
            warn!(target: "display", "Cannot create '{}': unknown display type '{}'", name, type_name);
            return Err(DisplayError::UnknownDisplayType(type_name.to_owned()));
        };
        self.register(display)
    }

    /// Registers a new display of the same type as `prototype`.
    pub fn allocate_from(&mut self, prototype: &str, name: &str) -> Result<(), DisplayError> {
        let Some(display) = self.displays.get(prototype).map(|p| p.allocate(name)) else {
            warn!(target: "display", "Cannot allocate '{}': no prototype named '{}'", name, prototype);
            return Err(DisplayError::UnknownDisplay(prototype.to_owned()));
        };
        self.register(display)
    }

    /// Drops an inactive display and returns its saved state.
    pub fn remove(&mut self, name: &str) -> Result<CompoundTag, DisplayError> {
        if self.active.as_deref() == Some(name) {
            warn!(target: "display", "Cannot remove active display '{}'", name);
            return Err(DisplayError::ActiveDisplay(name.to_owned()));
        }

        let Some(mut display) = self.displays.remove(name) else {
            warn!(target: "display", "Cannot remove unknown display '{}'", name);
            return Err(DisplayError::UnknownDisplay(name.to_owned()));
        };

        if self.loading_screen.as_deref() == Some(name) {
            debug!(target: "display", "Removed display '{}' was the configured loading screen", name);
            self.loading_screen = None;
        }

        display.on_remove(&mut self.cameras);
        debug!(target: "display", "Removed display '{}'", name);
        Ok(display.on_save())
    }

    /// Calls `on_save` on every display.
    pub fn save_all(&self) -> BTreeMap<String, CompoundTag> {
        debug!(target: "display", "Saving {} displays", self.displays.len());
        self.displays.iter().map(|(name, display)| (name.clone(), display.on_save())).collect()
    }

    /// Tags handed to `on_load` when a display of the same name is next
    /// registered.
    pub fn restore_saved(&mut self, tags: BTreeMap<String, CompoundTag>) {
        for name in tags.keys().filter(|name| self.displays.contains_key(*name)) {
            warn!(target: "display", "Display '{}' is already loaded; its saved tag waits for re-registration", name);
        }
        debug!(target: "display", "{} saved display tags pending", tags.len());
        self.saved.extend(tags);
    }

    //--- Lifecycle --------------------------------------------------------

    /// Chooses which registered display init activates first.
    pub fn change_loading_screen_display(&mut self, name: &str) -> Result<(), DisplayError> {
        if self.is_initialized() {
            warn!(target: "display", "Loading screen must be chosen before init (got '{}')", name);
            return Err(DisplayError::AlreadyInitialized);
        }

        debug!(target: "display", "Loading screen set to '{}'", name);
        self.loading_screen = Some(name.to_owned());
        Ok(())
    }

    /// Opens the native window and activates the loading screen.
    ///
    /// A window failure terminates the process (see [`Window::init`]).
    pub fn init(&mut self, config: &WindowConfig) -> Result<(), DisplayError> {
        if self.is_initialized() {
            warn!(target: "display", "Display manager initialized twice");
            return Err(DisplayError::AlreadyInitialized);
        }
        self.check_loading_screen()?;

        self.init_with_window(Window::init(config))
    }

    /// Like [`init`](Self::init) with an already created window.
    pub fn init_with_window(&mut self, window: Window) -> Result<(), DisplayError> {
        if self.is_initialized() {
            warn!(target: "display", "Display manager initialized twice");
            return Err(DisplayError::AlreadyInitialized);
        }

        let loading = self.resolve_loading_screen()?;

        self.window = Some(window);
        self.active = Some(loading.clone());
        info!(target: "display", "Display manager initialized, showing '{}'", loading);

        self.dispatch(&loading, |display, ctx| display.on_switch(ctx));
        Ok(())
    }

    /// Leaves the active display and activates `name`.
    ///
    /// Switching to the active display is a no-op.
    pub fn change_display(&mut self, name: &str) -> Result<(), DisplayError> {
        let Some(current) = self.active.clone() else {
            warn!(target: "display", "Cannot switch to '{}' before init", name);
            return Err(DisplayError::NotInitialized);
        };

        if !self.displays.contains_key(name) {
            warn!(target: "display", "Cannot switch to unknown display '{}'", name);
            return Err(DisplayError::UnknownDisplay(name.to_owned()));
        }

        if current == name {
            debug!(target: "display", "Display '{}' is already active", name);
            return Ok(());
        }

        info!(target: "display", "Switching display '{}' -> '{}'", current, name);
        self.dispatch(&current, |display, ctx| display.on_leave(ctx));
        self.active = Some(name.to_owned());
        self.dispatch(name, |display, ctx| display.on_switch(ctx));
        Ok(())
    }

    /// Runs the active display's update and render, then queued switches.
    pub fn update(&mut self) -> Result<(), DisplayError> {
        let Some(active) = self.active.clone() else {
            debug!(target: "display", "update() called before init");
            return Err(DisplayError::NotInitialized);
        };

        trace!(target: "display", "Updating '{}'", active);
        self.dispatch(&active, |display, ctx| display.update(ctx));
        self.dispatch(&active, |display, ctx| display.render(ctx));

        self.process_switches();
        Ok(())
    }

    /// Leaves the active display, saves every display and releases the
    /// registry and window. Returns the saved tags by display name.
    pub fn close(&mut self) -> Result<BTreeMap<String, CompoundTag>, DisplayError> {
        let Some(active) = self.active.clone() else {
            warn!(target: "display", "close() called before init");
            return Err(DisplayError::NotInitialized);
        };

        self.dispatch(&active, |display, ctx| display.on_leave(ctx));
        let tags = self.save_all();

        self.active = None;
        self.displays.clear();
        self.switches.clear();
        self.cameras = Cameras::new();
        self.window = None;

        info!(target: "display", "Display manager closed ({} displays saved)", tags.len());
        Ok(tags)
    }

    /// Rebinds the active camera outside the switch protocol.
    pub fn change_active_camera(&mut self, camera: Option<CameraId>) -> bool {
        debug!(target: "display", "Active camera -> {:?}", camera);
        self.cameras.set_active(camera)
    }

    //--- Accessors --------------------------------------------------------

    pub fn is_initialized(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_display(&self) -> Option<&dyn Display> {
        self.display(self.active.as_deref()?)
    }

    pub fn active_display_mut(&mut self) -> Option<&mut dyn Display> {
        let name = self.active.as_deref()?;
        let display: &mut dyn Display = self.displays.get_mut(name)?.as_mut();
        Some(display)
    }

    pub fn active_world(&self) -> Option<&World> {
        self.active_display()?.world()
    }

    pub fn active_world_mut(&mut self) -> Option<&mut World> {
        self.active_display_mut()?.world_mut()
    }

    /// The active display with the window state and cameras, borrowed at
    /// once. `None` before init.
    pub fn active_parts(&mut self) -> Option<ActiveParts<'_>> {
        let name = self.active.as_deref()?;
        let display = self.displays.get_mut(name)?;
        let window = self.window.as_mut()?;
        Some(ActiveParts { name, display: display.as_mut(), window: window.state_mut(), cameras: &mut self.cameras })
    }

    pub fn display(&self, name: &str) -> Option<&dyn Display> {
        self.displays.get(name).map(|display| display.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.displays.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn display_names(&self) -> impl Iterator<Item = &str> {
        self.displays.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.displays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.displays.is_empty()
    }

    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    pub fn window_mut(&mut self) -> Option<&mut Window> {
        self.window.as_mut()
    }

    pub fn cameras(&self) -> &Cameras {
        &self.cameras
    }

    pub fn cameras_mut(&mut self) -> &mut Cameras {
        &mut self.cameras
    }

    pub fn factory(&self) -> &DisplayFactory {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut DisplayFactory {
        &mut self.factory
    }

    /// Counters read by the default loading screen.
    pub fn loading_progress(&self) -> Arc<LoadingProgress> {
        Arc::clone(&self.loading_progress)
    }

    //--- Internal Helpers -------------------------------------------------

    fn check_loading_screen(&self) -> Result<(), DisplayError> {
        match &self.loading_screen {
            Some(name) if !self.displays.contains_key(name) => {
                warn!(target: "display", "Configured loading screen '{}' is not registered", name);
                Err(DisplayError::UnknownDisplay(name.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Name of the display init activates, registering the default
    /// loading screen when none was configured.
    fn resolve_loading_screen(&mut self) -> Result<String, DisplayError> {
        self.check_loading_screen()?;
        if let Some(name) = &self.loading_screen {
            return Ok(name.clone());
        }

        if !self.displays.contains_key(DEFAULT_LOADING_SCREEN) {
            let screen = DefaultLoadingScreenDisplay::with_progress(DEFAULT_LOADING_SCREEN, self.loading_progress());
            self.register(Box::new(screen))?;
        }
        Ok(DEFAULT_LOADING_SCREEN.to_owned())
    }

    fn dispatch<F>(&mut self, name: &str, hook: F)
    where
        F: FnOnce(&mut dyn Display, &mut DisplayContext<'_>),
    {
        let (Some(display), Some(window)) = (self.displays.get_mut(name), self.window.as_mut()) else {
            return;
        };

        let mut ctx = DisplayContext {
            window: window.state_mut(),
            cameras: &mut self.cameras,
            switches: &mut self.switches,
        };
        let display: &mut dyn Display = display.as_mut();
        hook(display, &mut ctx);
    }

    fn process_switches(&mut self) {
        for name in self.switches.take() {
            if let Err(e) = self.change_display(&name) {
                debug!(target: "display", "Queued switch to '{}' dropped: {}", name, e);
            }
        }
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DisplayManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayManager")
            .field("displays", &self.displays.keys().collect::<Vec<_>>())
            .field("active", &self.active)
            .field("loading_screen", &self.loading_screen)
            .field("initialized", &self.window.is_some())
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::Camera;
    use std::cell::RefCell;
    use std::rc::Rc;

    type HookLog = Rc<RefCell<Vec<String>>>;

    /// Records every hook as "<name>.<hook>".
    struct Recording {
        name: String,
        log: HookLog,
        switch_on_update: Option<String>,
    }

    impl Recording {
        fn boxed(name: &str, log: &HookLog) -> Box<dyn Display> {
            Box::new(Self { name: name.to_owned(), log: Rc::clone(log), switch_on_update: None })
        }

        fn record(&self, hook: &str) {
            self.log.borrow_mut().push(format!("{}.{}", self.name, hook));
        }
    }

    impl Display for Recording {
        fn name(&self) -> &str {
            &self.name
        }

        fn on_save(&self) -> CompoundTag {
            self.record("on_save");
            CompoundTag::new().with("name", self.name.as_str())
        }

        fn on_load(&mut self, tag: &CompoundTag, _cameras: &mut Cameras) {
            let source = tag.get_str("name").unwrap_or("empty");
            self.record(&format!("on_load({})", source));
        }

        fn on_switch(&mut self, _ctx: &mut DisplayContext<'_>) {
            self.record("on_switch");
        }

        fn on_leave(&mut self, _ctx: &mut DisplayContext<'_>) {
            self.record("on_leave");
        }

        fn update(&mut self, ctx: &mut DisplayContext<'_>) {
            self.record("update");
            if let Some(target) = self.switch_on_update.take() {
                ctx.switches.request(target);
            }
        }

        fn render(&mut self, _ctx: &mut DisplayContext<'_>) {
            self.record("render");
        }

        fn allocate(&self, name: &str) -> Box<dyn Display> {
            Recording::boxed(name, &self.log)
        }
    }

    fn headless_window() -> Window {
        Window::headless(&WindowConfig::new("Test").with_size(640, 480))
    }

    /// Manager showing "Menu" with "Game" registered and the log cleared.
    fn menu_and_game() -> (DisplayManager, HookLog) {
        let log = HookLog::default();
        let mut manager = DisplayManager::new();
        manager.register(Recording::boxed("Menu", &log)).expect("menu");
        manager.register(Recording::boxed("Game", &log)).expect("game");
        manager.change_loading_screen_display("Menu").expect("loading screen");
        manager.init_with_window(headless_window()).expect("init");
        log.borrow_mut().clear();
        (manager, log)
    }

    fn take(log: &HookLog) -> Vec<String> {
        std::mem::take(&mut *log.borrow_mut())
    }

    //--- Switch Protocol --------------------------------------------------

    #[test]
    fn menu_game_nope_scenario() {
        let (mut manager, log) = menu_and_game();
        assert_eq!(manager.active_name(), Some("Menu"));

        manager.change_display("Game").expect("switch");
        assert_eq!(take(&log), vec!["Menu.on_leave", "Game.on_switch"]);
        assert_eq!(manager.active_name(), Some("Game"));

        manager.change_display("Game").expect("no-op");
        assert!(take(&log).is_empty());
        assert_eq!(manager.active_name(), Some("Game"));

        assert_eq!(manager.change_display("Nope"), Err(DisplayError::UnknownDisplay("Nope".to_owned())));
        assert!(take(&log).is_empty());
        assert_eq!(manager.active_name(), Some("Game"));
    }

    #[test]
    fn every_transition_fires_leave_then_switch_once() {
        let (mut manager, log) = menu_and_game();
        manager.register(Recording::boxed("Pause", &log)).expect("pause");
        take(&log);

        for target in ["Game", "Pause", "Pause", "Menu", "Game"] {
            let before = manager.active_name().map(str::to_owned);
            manager.change_display(target).expect("switch");
            let hooks = take(&log);

            if before.as_deref() == Some(target) {
                assert!(hooks.is_empty());
            } else {
                let before = before.expect("active");
                assert_eq!(hooks, vec![format!("{}.on_leave", before), format!("{}.on_switch", target)]);
            }
        }
    }

    #[test]
    fn init_activates_loading_screen_once() {
        let log = HookLog::default();
        let mut manager = DisplayManager::new();
        manager.register(Recording::boxed("Boot", &log)).expect("boot");
        manager.change_loading_screen_display("Boot").expect("loading screen");
        manager.init_with_window(headless_window()).expect("init");

        assert_eq!(take(&log), vec!["Boot.on_load(empty)", "Boot.on_switch"]);
        assert_eq!(manager.init_with_window(headless_window()), Err(DisplayError::AlreadyInitialized));
        assert_eq!(manager.change_loading_screen_display("Other"), Err(DisplayError::AlreadyInitialized));
    }

    #[test]
    fn default_loading_screen_is_registered() {
        let mut manager = DisplayManager::new();
        manager.init_with_window(headless_window()).expect("init");

        assert_eq!(manager.active_name(), Some(DEFAULT_LOADING_SCREEN));
        assert!(manager.active_world().is_none());
    }

    #[test]
    fn unregistered_loading_screen_blocks_init() {
        let mut manager = DisplayManager::new();
        manager.change_loading_screen_display("Missing").expect("configure");

        assert_eq!(
            manager.init_with_window(headless_window()),
            Err(DisplayError::UnknownDisplay("Missing".to_owned()))
        );
        assert!(!manager.is_initialized());
        assert!(manager.window().is_none());
    }

    //--- Tick -------------------------------------------------------------

    #[test]
    fn update_before_init_is_reported() {
        let mut manager = DisplayManager::new();
        assert_eq!(manager.update(), Err(DisplayError::NotInitialized));
        assert_eq!(manager.change_display("Menu"), Err(DisplayError::NotInitialized));
        assert_eq!(manager.close(), Err(DisplayError::NotInitialized));
    }

    #[test]
    fn update_then_render_only_on_active() {
        let (mut manager, log) = menu_and_game();
        manager.update().expect("tick");
        assert_eq!(take(&log), vec!["Menu.update", "Menu.render"]);
    }

    #[test]
    fn switch_requested_in_update_runs_after_render() {
        let log = HookLog::default();
        let mut manager = DisplayManager::new();
        manager
            .register(Box::new(Recording {
                name: "Menu".to_owned(),
                log: Rc::clone(&log),
                switch_on_update: Some("Game".to_owned()),
            }))
            .expect("menu");
        manager.register(Recording::boxed("Game", &log)).expect("game");
        manager.change_loading_screen_display("Menu").expect("loading screen");
        manager.init_with_window(headless_window()).expect("init");
        take(&log);

        manager.update().expect("tick");
        assert_eq!(take(&log), vec!["Menu.update", "Menu.render", "Menu.on_leave", "Game.on_switch"]);
        assert_eq!(manager.active_name(), Some("Game"));
    }

    //--- Registry ---------------------------------------------------------

    #[test]
    fn duplicate_registration_is_refused() {
        let log = HookLog::default();
        let mut manager = DisplayManager::new();
        manager.register(Recording::boxed("Menu", &log)).expect("menu");
        assert_eq!(
            manager.register(Recording::boxed("Menu", &log)),
            Err(DisplayError::DuplicateDisplay("Menu".to_owned()))
        );
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn remove_refuses_active_and_returns_saved_tag() {
        let (mut manager, log) = menu_and_game();
        assert_eq!(manager.remove("Menu"), Err(DisplayError::ActiveDisplay("Menu".to_owned())));

        let tag = manager.remove("Game").expect("remove");
        assert_eq!(tag.get_str("name"), Ok("Game"));
        assert_eq!(take(&log), vec!["Game.on_save"]);
        assert!(!manager.contains("Game"));
    }

    #[test]
    fn removed_scenes_release_their_cameras() {
        let mut manager = DisplayManager::new();
        manager.create("scene", "Level").expect("level");
        let baseline = manager.cameras().len();

        for i in 0..5 {
            let name = format!("tmp{}", i);
            manager.create("scene", &name).expect("create");
            manager.remove(&name).expect("remove");
        }
        assert_eq!(manager.cameras().len(), baseline);

        manager.allocate_from("Level", "Copy").expect("allocate");
        assert_eq!(manager.cameras().len(), baseline + 1);
        manager.remove("Copy").expect("remove");
        assert_eq!(manager.cameras().len(), baseline);
    }

    #[test]
    fn saved_tags_reach_on_load_on_registration() {
        let log = HookLog::default();
        let mut manager = DisplayManager::new();
        let mut tags = BTreeMap::new();
        tags.insert("Game".to_owned(), CompoundTag::new().with("name", "from disk"));
        manager.restore_saved(tags);

        manager.register(Recording::boxed("Game", &log)).expect("game");
        manager.register(Recording::boxed("Menu", &log)).expect("menu");
        assert_eq!(take(&log), vec!["Game.on_load(from disk)", "Menu.on_load(empty)"]);
    }

    #[test]
    fn allocate_from_uses_prototype_type() {
        let (mut manager, log) = menu_and_game();
        manager.allocate_from("Game", "Game2").expect("allocate");
        assert_eq!(take(&log), vec!["Game2.on_load(empty)"]);

        assert_eq!(manager.allocate_from("Nope", "X"), Err(DisplayError::UnknownDisplay("Nope".to_owned())));
    }

    #[test]
    fn create_uses_factory_types() {
        let mut manager = DisplayManager::new();
        manager.create("scene", "Level").expect("scene");
        assert!(manager.display("Level").and_then(|d| d.world()).is_some());

        assert_eq!(
            manager.create("particle_editor", "Fx"),
            Err(DisplayError::UnknownDisplayType("particle_editor".to_owned()))
        );
    }

    //--- Close ------------------------------------------------------------

    #[test]
    fn close_leaves_saves_and_releases() {
        let (mut manager, log) = menu_and_game();
        let tags = manager.close().expect("close");

        let hooks = take(&log);
        assert_eq!(hooks[0], "Menu.on_leave");
        assert_eq!(hooks.iter().filter(|h| h.ends_with("on_save")).count(), 2);
        assert_eq!(tags.keys().collect::<Vec<_>>(), vec!["Game", "Menu"]);

        assert!(!manager.is_initialized());
        assert!(manager.is_empty());
        assert!(manager.window().is_none());
        assert_eq!(manager.update(), Err(DisplayError::NotInitialized));
    }

    //--- Cameras ----------------------------------------------------------

    #[test]
    fn scene_displays_hand_over_the_active_camera() {
        let mut manager = DisplayManager::new();
        manager.create("scene", "A").expect("a");
        manager.create("scene", "B").expect("b");
        manager.change_loading_screen_display("A").expect("loading screen");
        manager.init_with_window(headless_window()).expect("init");

        let a_camera = manager.cameras().active_id().expect("A claims camera");
        manager.change_display("B").expect("switch");
        let b_camera = manager.cameras().active_id().expect("B claims camera");
        assert_ne!(a_camera, b_camera);
    }

    #[test]
    fn change_active_camera_bypasses_displays() {
        let (mut manager, log) = menu_and_game();
        let id = manager.cameras_mut().add(Camera::default());

        assert!(manager.change_active_camera(Some(id)));
        assert_eq!(manager.cameras().active_id(), Some(id));
        assert!(take(&log).is_empty());
    }
}
