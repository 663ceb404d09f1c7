//=========================================================================
// Display Factory
//=========================================================================
//
// Named constructors for display types.
//
// `Display::allocate` needs a live instance to clone from; the factory
// builds a display from a type name alone. The editor's "new display"
// menu lists `type_names()`.
//
// Built-ins:
//   "loading_screen" → DefaultLoadingScreenDisplay
//   "scene"          → SceneDisplay with the built-in components
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{DefaultLoadingScreenDisplay, Display, SceneDisplay};
use crate::core::world::ComponentRegistry;

//=== DisplayFactory ======================================================

/// Builds a display with the given name.
pub type DisplayConstructor = Box<dyn Fn(&str) -> Box<dyn Display>>;

/// Registry of display constructors keyed by type name.
pub struct DisplayFactory {
    constructors: BTreeMap<String, DisplayConstructor>,
}

impl DisplayFactory {
    /// Factory with no types.
    pub fn new() -> Self {
        Self { constructors: BTreeMap::new() }
    }

    /// Factory with the engine's built-in display types.
    pub fn with_builtins() -> Self {
        let mut factory = Self::new();
        factory.register("loading_screen", |name| Box::new(DefaultLoadingScreenDisplay::new(name)));

        let components = Arc::new(ComponentRegistry::with_builtins());
        factory.register("scene", move |name| Box::new(SceneDisplay::new(name, Arc::clone(&components))));
        factory
    }

    pub fn register<F>(&mut self, type_name: impl Into<String>, constructor: F)
    where
        F: Fn(&str) -> Box<dyn Display> + 'static,
    {
        let type_name = type_name.into();
        debug!(target: "display", "Registering display type '{}'", type_name);
        if self.constructors.insert(type_name.clone(), Box::new(constructor)).is_some() {
            warn!(target: "display", "Display type '{}' was already registered and has been replaced", type_name);
        }
    }

    /// Builds a `type_name` display called `name`, if the type is known.
    pub fn create(&self, type_name: &str, name: &str) -> Option<Box<dyn Display>> {
        self.constructors.get(type_name).map(|constructor| constructor(name))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }
}

impl Default for DisplayFactory {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for DisplayFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayFactory").field("types", &self.constructors.keys().collect::<Vec<_>>()).finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_create_named_displays() {
        let factory = DisplayFactory::with_builtins();
        assert_eq!(factory.type_names().collect::<Vec<_>>(), vec!["loading_screen", "scene"]);

        let display = factory.create("scene", "level_1").expect("scene type");
        assert_eq!(display.name(), "level_1");
        assert!(display.world().is_some());

        let loading = factory.create("loading_screen", "boot").expect("loading type");
        assert!(loading.world().is_none());
    }

    #[test]
    fn unknown_type_creates_nothing() {
        let factory = DisplayFactory::new();
        assert!(factory.create("scene", "x").is_none());
        assert!(!factory.contains("scene"));
    }
}
