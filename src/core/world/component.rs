//=========================================================================
// Components
//=========================================================================
//
// Dynamic component interface plus the named allocator registry the
// editor and world loader use to construct components by type name.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::Debug;

use glam::Vec3;
use log::warn;

//=== Internal Dependencies ===============================================

use super::transform::TransformComponent;
use crate::core::tag::{CompoundTag, TagError};

//=== FieldValue ==========================================================

/// Editable value exposed to the inspector.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Float(f32),
    Vec3(Vec3),
    Text(String),
}

/// A labelled component field as shown in the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentField {
    pub label: &'static str,
    pub value: FieldValue,
}

impl ComponentField {
    pub fn new(label: &'static str, value: FieldValue) -> Self {
        Self { label, value }
    }
}

//=== Component Trait =====================================================

/// Behaviour every component attached to an entity provides.
///
/// `type_name` identifies the component type; an entity holds at most one
/// component per type name.
pub trait Component: Any + Debug {
    fn type_name(&self) -> &'static str;

    fn save(&self) -> CompoundTag;

    fn load(&mut self, tag: &CompoundTag) -> Result<(), TagError>;

    /// Fields shown in the inspector, in display order.
    fn fields(&self) -> Vec<ComponentField> {
        Vec::new()
    }

    /// Writes an inspector edit back. Returns `false` when the label is
    /// unknown or the value has the wrong shape.
    fn set_field(&mut self, _label: &str, _value: FieldValue) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

//=== ComponentRegistry ===================================================

type Allocator = fn() -> Box<dyn Component>;

/// Maps component type names to default constructors.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    allocators: BTreeMap<&'static str, Allocator>,
}

impl ComponentRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self { allocators: BTreeMap::new() }
    }

    /// Registry with the engine's built-in components.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(TransformComponent::TYPE_NAME, || Box::new(TransformComponent::default()));
        registry
    }

    pub fn register(&mut self, type_name: &'static str, allocator: Allocator) {
        if self.allocators.insert(type_name, allocator).is_some() {
            warn!(target: "world", "Component type '{}' was already registered and has been replaced", type_name);
        }
    }

    /// Default instance of the named component type.
    pub fn allocate_default(&self, type_name: &str) -> Option<Box<dyn Component>> {
        self.allocators.get(type_name).map(|allocate| allocate())
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.allocators.contains_key(type_name)
    }

    /// Registered type names in sorted order.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.allocators.keys().copied()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_include_transform() {
        let registry = ComponentRegistry::with_builtins();
        assert!(registry.contains("Transform"));

        let component = registry.allocate_default("Transform").unwrap();
        assert_eq!(component.type_name(), "Transform");
        assert!(component.as_any().downcast_ref::<TransformComponent>().is_some());
    }

    #[test]
    fn unknown_type_allocates_nothing() {
        assert!(ComponentRegistry::new().allocate_default("Transform").is_none());
    }
}
