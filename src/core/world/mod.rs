//=========================================================================
// World
//=========================================================================
//
// Entity/component container owned by a display.
//
// Architecture:
//   World
//     └─ entities: Vec<Entity>   (spawn order preserved for the hierarchy)
//          └─ components: Vec<Box<dyn Component>>  (one per type name)
//
// Entity names are unique within a world so the editor can address an
// entity by either its name or its id.
//
//=========================================================================

//=== Module Declarations =================================================

mod component;
mod transform;

//=== External Dependencies ===============================================

use std::fmt;

use log::{debug, warn};

//=== Public API ==========================================================

pub use component::{Component, ComponentField, ComponentRegistry, FieldValue};
pub use transform::TransformComponent;

//=== Internal Dependencies ===============================================

use crate::core::tag::{CompoundTag, Tag, TagError};

//=== EntityId ============================================================

/// Stable entity identifier, never reused within a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== WorldError ==========================================================

/// Rejected world mutations. The world is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    EmptyEntityName,
    DuplicateEntityName(String),
    UnknownEntity(EntityId),
    DuplicateComponent { entity: String, component: &'static str },
    UnknownComponentType(String),
    Tag(TagError),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEntityName => write!(f, "Entity name cannot be empty"),
            Self::DuplicateEntityName(name) => write!(f, "Entity '{}' already exists", name),
            Self::UnknownEntity(id) => write!(f, "No entity with id {}", id),
            Self::DuplicateComponent { entity, component } => {
                write!(f, "Entity '{}' already has component '{}'", entity, component)
            }
            Self::UnknownComponentType(name) => write!(f, "Unknown component type '{}'", name),
            Self::Tag(e) => write!(f, "Malformed world tag: {}", e),
        }
    }
}

impl std::error::Error for WorldError {}

impl From<TagError> for WorldError {
    fn from(e: TagError) -> Self {
        Self::Tag(e)
    }
}

//=== Entity ==============================================================

/// Named entity holding at most one component per type.
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    name: String,
    components: Vec<Box<dyn Component>>,
}

impl Entity {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn components(&self) -> impl Iterator<Item = &dyn Component> {
        self.components.iter().map(|c| c.as_ref())
    }

    pub fn has_component(&self, type_name: &str) -> bool {
        self.components.iter().any(|c| c.type_name() == type_name)
    }

    pub fn component_dyn_mut(&mut self, type_name: &str) -> Option<&mut dyn Component> {
        self.components
            .iter_mut()
            .find(|c| c.type_name() == type_name)
            .map(|c| c.as_mut())
    }

    pub fn component<T: Component>(&self) -> Option<&T> {
        self.components.iter().find_map(|c| c.as_any().downcast_ref::<T>())
    }

    pub fn component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components.iter_mut().find_map(|c| c.as_any_mut().downcast_mut::<T>())
    }
}

//=== World ===============================================================

/// Scene graph of a display.
#[derive(Debug, Default)]
pub struct World {
    entities: Vec<Entity>,
    next_id: u64,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Entities ---------------------------------------------------------

    /// Spawns an empty entity. Names are trimmed; empty or taken names are refused.
    pub fn spawn_entity(&mut self, name: &str) -> Result<EntityId, WorldError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorldError::EmptyEntityName);
        }
        if self.entity_by_name(name).is_some() {
            return Err(WorldError::DuplicateEntityName(name.to_owned()));
        }

        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push(Entity { id, name: name.to_owned(), components: Vec::new() });

        debug!(target: "world", "Spawned entity '{}' ({})", name, id);
        Ok(id)
    }

    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let pos = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(pos))
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn entity_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn entity_name(&self, id: EntityId) -> Option<&str> {
        self.entity(id).map(Entity::name)
    }

    /// Entities in spawn order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    //--- Components -------------------------------------------------------

    pub fn has_component(&self, type_name: &str, id: EntityId) -> bool {
        self.entity(id).is_some_and(|e| e.has_component(type_name))
    }

    /// Attaches a component; refuses a second component of the same type.
    pub fn add_component(&mut self, id: EntityId, component: Box<dyn Component>) -> Result<(), WorldError> {
        let entity = self.entity_mut(id).ok_or(WorldError::UnknownEntity(id))?;

        let type_name = component.type_name();
        if entity.has_component(type_name) {
            return Err(WorldError::DuplicateComponent {
                entity: entity.name.clone(),
                component: type_name,
            });
        }

        entity.components.push(component);
        Ok(())
    }

    pub fn component<T: Component>(&self, id: EntityId) -> Option<&T> {
        self.entity(id)?.component::<T>()
    }

    pub fn component_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        self.entity_mut(id)?.component_mut::<T>()
    }

    //--- Persistence ------------------------------------------------------

    /// Saves every entity and its components as a list under `entities`.
    pub fn save(&self) -> CompoundTag {
        let entities = self
            .entities
            .iter()
            .map(|entity| {
                let mut components = CompoundTag::new();
                for component in &entity.components {
                    components.insert(component.type_name(), component.save());
                }
                Tag::from(
                    CompoundTag::new()
                        .with("name", entity.name.as_str())
                        .with("components", components),
                )
            })
            .collect::<Vec<_>>();

        CompoundTag::new().with("entities", entities)
    }

    /// Rebuilds a world from [`World::save`] output.
    ///
    /// Component types missing from `registry` are skipped with a warning so
    /// a save from a build with extra components still loads.
    pub fn load(tag: &CompoundTag, registry: &ComponentRegistry) -> Result<Self, WorldError> {
        let mut world = World::new();

        for entry in tag.get_list("entities")? {
            let Some(entry) = entry.as_compound() else {
                warn!(target: "world", "Skipping non-compound entity entry ({})", entry.type_name());
                continue;
            };

            let id = world.spawn_entity(entry.get_str("name")?)?;

            for (type_name, data) in entry.get_compound("components")?.iter() {
                let Some(mut component) = registry.allocate_default(type_name) else {
                    warn!(target: "world", "Skipping unregistered component type '{}'", type_name);
                    continue;
                };
                let data = data.as_compound().ok_or_else(|| TagError::TypeMismatch {
                    key: type_name.to_owned(),
                    expected: "compound",
                    found: data.type_name(),
                })?;
                component.load(data)?;
                world.add_component(id, component)?;
            }
        }

        Ok(world)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn spawn_trims_and_rejects_empty_names() {
        let mut world = World::new();
        assert_eq!(world.spawn_entity("   "), Err(WorldError::EmptyEntityName));

        let id = world.spawn_entity("  Player ").unwrap();
        assert_eq!(world.entity_name(id), Some("Player"));
    }

    #[test]
    fn duplicate_names_are_refused() {
        let mut world = World::new();
        world.spawn_entity("Crate").unwrap();
        assert_eq!(
            world.spawn_entity("Crate"),
            Err(WorldError::DuplicateEntityName("Crate".into()))
        );
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn ids_are_not_reused_after_despawn() {
        let mut world = World::new();
        let a = world.spawn_entity("A").unwrap();
        world.despawn(a);
        let b = world.spawn_entity("A").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn second_component_of_same_type_is_refused() {
        let mut world = World::new();
        let id = world.spawn_entity("Lamp").unwrap();
        world.add_component(id, Box::new(TransformComponent::default())).unwrap();

        let err = world.add_component(id, Box::new(TransformComponent::default())).unwrap_err();
        assert_eq!(
            err,
            WorldError::DuplicateComponent { entity: "Lamp".into(), component: "Transform" }
        );
        assert_eq!(world.entity(id).unwrap().components().count(), 1);
    }

    #[test]
    fn typed_component_access() {
        let mut world = World::new();
        let id = world.spawn_entity("Lamp").unwrap();
        world.add_component(id, Box::new(TransformComponent::default())).unwrap();

        world.component_mut::<TransformComponent>(id).unwrap().translation = Vec3::X;
        assert_eq!(world.component::<TransformComponent>(id).unwrap().translation, Vec3::X);
        assert!(world.has_component("Transform", id));
    }

    #[test]
    fn save_and_load_preserve_entities_and_components() {
        let mut world = World::new();
        let a = world.spawn_entity("A").unwrap();
        world.spawn_entity("B").unwrap();
        world
            .add_component(a, Box::new(TransformComponent::from_translation(Vec3::new(1.0, 2.0, 3.0))))
            .unwrap();

        let loaded = World::load(&world.save(), &ComponentRegistry::with_builtins()).unwrap();

        let names: Vec<_> = loaded.entities().map(Entity::name).collect();
        assert_eq!(names, ["A", "B"]);

        let a = loaded.entity_by_name("A").unwrap();
        let transform = a.component::<TransformComponent>().unwrap();
        assert_eq!(transform.translation, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn load_skips_unregistered_component_types() {
        let mut world = World::new();
        let a = world.spawn_entity("A").unwrap();
        world.add_component(a, Box::new(TransformComponent::default())).unwrap();

        let loaded = World::load(&world.save(), &ComponentRegistry::new()).unwrap();
        assert_eq!(loaded.entity_by_name("A").unwrap().components().count(), 0);
    }

    #[test]
    fn load_reports_missing_entity_list() {
        let err = World::load(&CompoundTag::new(), &ComponentRegistry::new()).unwrap_err();
        assert_eq!(err, WorldError::Tag(TagError::MissingKey("entities".into())));
    }
}
