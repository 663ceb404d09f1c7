//=========================================================================
// Scene Display
//=========================================================================
//
// Display owning a World and a fly camera.
//
// Tag layout:
//   { "world": <World::save>, "camera": <Camera::save> }
//
// The camera lives in `Cameras` while the display is registered; the copy
// kept here is synced every update and on leave so `on_save` (which gets
// no camera access) sees the latest pose.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::{Display, DisplayContext};
use crate::core::camera::{Camera, CameraId, Cameras};
use crate::core::tag::CompoundTag;
use crate::core::world::{ComponentRegistry, World};

//=== SceneDisplay ========================================================

#[derive(Debug)]
pub struct SceneDisplay {
    name: String,
    world: World,
    camera: Camera,
    camera_id: Option<CameraId>,
    components: Arc<ComponentRegistry>,
}

impl SceneDisplay {
    pub fn new(name: &str, components: Arc<ComponentRegistry>) -> Self {
        Self {
            name: name.to_owned(),
            world: World::new(),
            camera: Camera::default(),
            camera_id: None,
            components,
        }
    }

    /// Scene that starts from `world` instead of an empty one.
    pub fn with_world(mut self, world: World) -> Self {
        self.world = world;
        self
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_id(&self) -> Option<CameraId> {
        self.camera_id
    }

    fn sync_camera(&mut self, cameras: &Cameras) {
        if let Some(camera) = self.camera_id.and_then(|id| cameras.get(id)) {
            self.camera = *camera;
        }
    }

    fn restore(&mut self, tag: &CompoundTag) {
        match tag.get_compound("world") {
            Ok(world) => match World::load(world, &self.components) {
                Ok(world) => self.world = world,
                Err(e) => warn!(target: "display", "Scene '{}' world not restored: {}", self.name, e),
            },
            Err(e) => warn!(target: "display", "Scene '{}' has no saved world: {}", self.name, e),
        }

        match tag.get_compound("camera").and_then(Camera::load) {
            Ok(camera) => self.camera = camera,
            Err(e) => warn!(target: "display", "Scene '{}' camera not restored: {}", self.name, e),
        }
    }
}

impl Display for SceneDisplay {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_save(&self) -> CompoundTag {
        CompoundTag::new()
            .with("world", self.world.save())
            .with("camera", self.camera.save())
    }

    fn on_load(&mut self, tag: &CompoundTag, cameras: &mut Cameras) {
        if !tag.is_empty() {
            self.restore(tag);
        }

        if let Some(id) = self.camera_id.take() {
            cameras.remove(id);
        }
        self.camera_id = Some(cameras.add(self.camera));
        debug!(target: "display", "Scene '{}' loaded with {} entities", self.name, self.world.len());
    }

    fn on_switch(&mut self, ctx: &mut DisplayContext<'_>) {
        if self.camera_id.is_none() {
            self.camera_id = Some(ctx.cameras.add(self.camera));
        }
        ctx.cameras.set_active(self.camera_id);
    }

    fn on_leave(&mut self, ctx: &mut DisplayContext<'_>) {
        self.sync_camera(ctx.cameras);
        if ctx.cameras.active_id() == self.camera_id {
            ctx.cameras.set_active(None);
        }
    }

    fn on_remove(&mut self, cameras: &mut Cameras) {
        if let Some(camera) = self.camera_id.take().and_then(|id| cameras.remove(id)) {
            self.camera = camera;
        }
    }

    fn update(&mut self, ctx: &mut DisplayContext<'_>) {
        self.sync_camera(ctx.cameras);
    }

    fn render(&mut self, _ctx: &mut DisplayContext<'_>) {
        trace!(target: "display", "Rendering scene '{}' ({} entities)", self.name, self.world.len());
    }

    fn world(&self) -> Option<&World> {
        Some(&self.world)
    }

    fn world_mut(&mut self) -> Option<&mut World> {
        Some(&mut self.world)
    }

    fn allocate(&self, name: &str) -> Box<dyn Display> {
        Box::new(Self::new(name, Arc::clone(&self.components)))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::world::TransformComponent;
    use glam::Vec3;

    fn populated() -> SceneDisplay {
        let mut world = World::new();
        let player = world.spawn_entity("Player").expect("spawn");
        world
            .add_component(player, Box::new(TransformComponent::from_translation(Vec3::new(1.0, 2.0, 3.0))))
            .expect("transform");
        world.spawn_entity("Light").expect("spawn");

        SceneDisplay::new("level", Arc::new(ComponentRegistry::with_builtins())).with_world(world)
    }

    fn names(world: &World) -> Vec<String> {
        let mut names: Vec<_> = world.entities().map(|e| e.name().to_owned()).collect();
        names.sort();
        names
    }

    #[test]
    fn allocate_and_load_reproduce_the_world() {
        let mut cameras = Cameras::new();
        let original = populated();
        let tag = original.on_save();

        let mut copy = original.allocate("level_copy");
        assert!(copy.world().is_some_and(World::is_empty));
        copy.on_load(&tag, &mut cameras);

        let world = copy.world().expect("scene world");
        assert_eq!(names(world), vec!["Light".to_owned(), "Player".to_owned()]);

        let player = world.entity_by_name("Player").expect("player");
        let transform = player.component::<TransformComponent>().expect("transform");
        assert_eq!(transform.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(copy.name(), "level_copy");
    }

    #[test]
    fn empty_tag_keeps_fresh_state_and_adds_camera() {
        let mut cameras = Cameras::new();
        let mut scene = SceneDisplay::new("fresh", Arc::new(ComponentRegistry::with_builtins()));
        scene.on_load(&CompoundTag::new(), &mut cameras);

        assert!(scene.world.is_empty());
        assert_eq!(cameras.len(), 1);
        assert_eq!(cameras.get(scene.camera_id().expect("camera")), Some(&Camera::default()));
    }

    #[test]
    fn camera_pose_survives_save() {
        let mut cameras = Cameras::new();
        let mut scene = populated();
        scene.on_load(&CompoundTag::new(), &mut cameras);

        let id = scene.camera_id().expect("camera");
        cameras.get_mut(id).expect("camera").position = Vec3::new(0.0, 5.0, 0.0);
        scene.sync_camera(&cameras);

        let restored = Camera::load(scene.on_save().get_compound("camera").expect("camera tag")).expect("camera");
        assert_eq!(restored.position, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn remove_hook_frees_the_camera_and_keeps_its_pose() {
        let mut cameras = Cameras::new();
        let mut scene = populated();
        scene.on_load(&CompoundTag::new(), &mut cameras);

        let id = scene.camera_id().expect("camera");
        cameras.get_mut(id).expect("camera").position = Vec3::new(2.0, 0.0, 0.0);
        scene.on_remove(&mut cameras);

        assert!(cameras.is_empty());
        assert_eq!(scene.camera_id(), None);
        let saved = Camera::load(scene.on_save().get_compound("camera").expect("camera tag")).expect("camera");
        assert_eq!(saved.position, Vec3::new(2.0, 0.0, 0.0));
    }
}
