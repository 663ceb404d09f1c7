//=========================================================================
// Proscenium Engine
//
// Main entry point and frame loop.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init(f)──>  Engine  ──run()──>  saved tags
//         │                          │
//         ├─ with_window()           └─ owns DisplayManager (+ Editor)
//         ├─ with_loading_screen()
//         ├─ with_editor()
//         └─ with_console_logging()
//
//  Frame:
//     window.begin_frame() → manager.update() → editor.render() → window.end_frame()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

use log::{debug, info, LevelFilter};

//=== Internal Dependencies ===============================================

use crate::core::display::{DisplayError, DisplayManager};
use crate::core::platform_bridge::FrameControl;
use crate::core::tag::CompoundTag;
use crate::core::window::{Window, WindowConfig};
#[cfg(feature = "editor")]
use crate::editor::{Editor, EditorConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Window**: [`WindowConfig::default`]
/// - **Loading screen**: the built-in `"loading_screen"` display
/// - **Editor**: [`EditorConfig::default`] (with the `editor` feature)
/// - **Console logging**: `Info` and above
///
/// # Examples
///
/// ```no_run
/// use proscenium_engine::prelude::*;
///
/// let tags = EngineBuilder::new()
///     .with_title("Sandbox")
///     .build()
///     .init(|displays| {
///         displays.create("scene", "level_1").expect("scene type is built in");
///     })
///     .run();
/// ```
pub struct EngineBuilder {
    window: WindowConfig,
    loading_screen: Option<String>,
    #[cfg(feature = "editor")]
    editor: EditorConfig,
    console_level: Option<LevelFilter>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            window: WindowConfig::default(),
            loading_screen: None,
            #[cfg(feature = "editor")]
            editor: EditorConfig::default(),
            console_level: Some(LevelFilter::Info),
        }
    }

    pub fn with_window(mut self, config: WindowConfig) -> Self {
        self.window = config;
        self
    }

    /// # Panics
    ///
    /// Panics if `title` is empty or whitespace.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        assert!(!title.trim().is_empty(), "Window title must not be empty");
        self.window.title = title;
        self
    }

    /// Registered display shown first instead of the built-in loading
    /// screen.
    pub fn with_loading_screen(mut self, name: impl Into<String>) -> Self {
        self.loading_screen = Some(name.into());
        self
    }

    #[cfg(feature = "editor")]
    pub fn with_editor(mut self, config: EditorConfig) -> Self {
        self.editor = config;
        self
    }

    /// Forwards log records at or above `level` to the editor console;
    /// `None` leaves the process logger alone.
    pub fn with_console_logging(mut self, level: Option<LevelFilter>) -> Self {
        self.console_level = level;
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!("Building engine (window '{}', {}x{})", self.window.title, self.window.width, self.window.height);

        Engine {
            manager: DisplayManager::new(),
            window: self.window,
            loading_screen: self.loading_screen,
            #[cfg(feature = "editor")]
            editor: Editor::new(self.editor),
            console_level: self.console_level,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Engine runtime: the display manager, the editor and the frame loop.
pub struct Engine {
    manager: DisplayManager,
    window: WindowConfig,
    loading_screen: Option<String>,
    #[cfg(feature = "editor")]
    editor: Editor,
    console_level: Option<LevelFilter>,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Registers displays before the window opens.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut DisplayManager),
    {
        info!("Initializing engine displays");
        init_fn(&mut self.manager);
        info!("Engine initialization complete ({} displays)", self.manager.len());
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn manager(&self) -> &DisplayManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut DisplayManager {
        &mut self.manager
    }

    #[cfg(feature = "editor")]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    #[cfg(feature = "editor")]
    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    //--- Execution --------------------------------------------------------

    /// Opens the native window and runs until it closes. Returns every
    /// display's saved tag.
    ///
    /// Must be called on the main thread. A window that cannot be created
    /// terminates the process.
    pub fn run(mut self) -> Result<BTreeMap<String, CompoundTag>, DisplayError> {
        self.prepare()?;
        let config = self.window.clone();
        self.manager.init(&config)?;
        self.run_loop()
    }

    /// Like [`run`](Self::run) with an existing window, e.g.
    /// [`Window::headless`].
    pub fn run_with_window(mut self, window: Window) -> Result<BTreeMap<String, CompoundTag>, DisplayError> {
        self.prepare()?;
        self.manager.init_with_window(window)?;
        self.run_loop()
    }

    fn prepare(&mut self) -> Result<(), DisplayError> {
        if let Some(name) = &self.loading_screen {
            self.manager.change_loading_screen_display(name)?;
        }
        self.install_console_logger();
        Ok(())
    }

    #[cfg(feature = "editor")]
    fn install_console_logger(&self) {
        let Some(level) = self.console_level else {
            return;
        };
        match self.editor.console_logger(level).install() {
            Ok(()) => debug!("Editor console receives records at {} and above", level),
            Err(_) => debug!("Another logger is installed; editor console stays empty"),
        }
    }

    #[cfg(not(feature = "editor"))]
    fn install_console_logger(&self) {
        if self.console_level.is_some() {
            debug!("Console logging needs the `editor` feature");
        }
    }

    fn run_loop(mut self) -> Result<BTreeMap<String, CompoundTag>, DisplayError> {
        info!("Starting engine runtime");
        let mut frames: u64 = 0;

        loop {
            let Some(window) = self.manager.window_mut() else {
                break;
            };
            if window.begin_frame() == FrameControl::Exit {
                info!("Window closed after {} frames", frames);
                break;
            }

            self.manager.update()?;

            #[cfg(feature = "editor")]
            self.editor.render(&mut self.manager);

            if let Some(window) = self.manager.window_mut() {
                window.end_frame();
            }
            frames += 1;
        }

        #[cfg(feature = "editor")]
        self.editor.close(&mut self.manager);

        let tags = self.manager.close()?;
        info!("Engine shutdown complete");
        Ok(tags)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").field("manager", &self.manager).field("window", &self.window).finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::display::{Display, DisplayContext};
    use crate::core::platform_bridge::{HeadlessBackend, ScriptedFrame};
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counter {
        name: String,
        updates: Rc<Cell<u32>>,
    }

    impl Display for Counter {
        fn name(&self) -> &str {
            &self.name
        }

        fn on_save(&self) -> CompoundTag {
            CompoundTag::new().with("updates", self.updates.get() as i64)
        }

        fn update(&mut self, _ctx: &mut DisplayContext<'_>) {
            self.updates.set(self.updates.get() + 1);
        }

        fn allocate(&self, name: &str) -> Box<dyn Display> {
            Box::new(Counter { name: name.to_owned(), updates: Rc::new(Cell::new(0)) })
        }
    }

    fn quiet() -> EngineBuilder {
        EngineBuilder::new().with_console_logging(None)
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.window, WindowConfig::default());
        assert_eq!(builder.loading_screen, None);
        assert_eq!(builder.console_level, Some(LevelFilter::Info));
    }

    #[test]
    fn builder_with_title() {
        let builder = EngineBuilder::new().with_title("Sandbox");
        assert_eq!(builder.window.title, "Sandbox");
    }

    #[test]
    #[should_panic(expected = "Window title must not be empty")]
    fn builder_with_title_panics_on_blank() {
        EngineBuilder::new().with_title("  ");
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_window(WindowConfig::new("Game").with_size(640, 480))
            .with_loading_screen("intro")
            .with_console_logging(None)
            .build();

        assert_eq!(engine.window.width, 640);
        assert_eq!(engine.loading_screen.as_deref(), Some("intro"));
        assert!(!engine.manager().is_initialized());
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn headless_run_ticks_until_frame_limit() {
        let updates = Rc::new(Cell::new(0));
        let counter = Counter { name: "game".to_owned(), updates: Rc::clone(&updates) };

        let engine = quiet()
            .with_loading_screen("game")
            .build()
            .init(|displays| displays.register(Box::new(counter)).expect("register"));

        let window = Window::with_backend(&WindowConfig::default(), HeadlessBackend::new().with_frame_limit(3));
        let tags = engine.run_with_window(window).expect("run");

        assert_eq!(updates.get(), 3);
        assert_eq!(tags["game"].get_i64("updates"), Ok(3));
    }

    #[test]
    fn scripted_close_ends_the_run() {
        let backend = HeadlessBackend::new().with_frame(ScriptedFrame::default()).with_frame(ScriptedFrame::close());
        let window = Window::with_backend(&WindowConfig::default(), backend);

        let tags = quiet().build().run_with_window(window).expect("run");
        assert!(tags.contains_key("loading_screen"));
    }

    #[test]
    fn unknown_loading_screen_fails_before_running() {
        let window = Window::headless(&WindowConfig::default());
        let result = quiet().with_loading_screen("missing").build().run_with_window(window);
        assert_eq!(result, Err(DisplayError::UnknownDisplay("missing".to_owned())));
    }
}
