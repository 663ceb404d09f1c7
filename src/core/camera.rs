//=========================================================================
// Cameras
//=========================================================================
//
// Camera registry with a single active slot.
//
// Architecture:
//   Cameras
//     ├─ slots: Vec<Option<Camera>>   (CameraId = slot index)
//     └─ active: Option<CameraId>      (read by the renderer each frame)
//
// Displays claim the active slot in on_switch and release it in on_leave.
// The editor saves the active id when it opens and restores it on close.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Mat4, Vec3};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::input::{KeyCode, StateTracker};
use crate::core::tag::{CompoundTag, TagError};

//=== Camera ==============================================================

/// Free-look perspective camera (yaw/pitch in degrees, Y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Camera {
    /// Camera at `position` looking down -Z.
    pub fn new(position: Vec3) -> Self {
        Self { position, yaw: -90.0, pitch: 0.0 }
    }

    pub fn forward(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    /// Mouse-look plus WASD / Space / Shift movement.
    ///
    /// `look` is applied only while `true` so the editor can require a held
    /// button before the camera follows the mouse.
    pub fn fly(&mut self, input: &StateTracker, dt: f32, speed: f32, sensitivity: f32, look: bool) {
        if look {
            let (dx, dy) = input.mouse_delta();
            self.yaw += dx * sensitivity;
            self.pitch = (self.pitch - dy * sensitivity).clamp(-89.0, 89.0);
        }

        let forward = self.forward();
        let right = self.right();
        let mut motion = Vec3::ZERO;

        if input.is_key_down(KeyCode::KeyW) {
            motion += forward;
        }
        if input.is_key_down(KeyCode::KeyS) {
            motion -= forward;
        }
        if input.is_key_down(KeyCode::KeyD) {
            motion += right;
        }
        if input.is_key_down(KeyCode::KeyA) {
            motion -= right;
        }
        if input.is_key_down(KeyCode::Space) {
            motion += Vec3::Y;
        }
        if input.is_key_down(KeyCode::ShiftLeft) {
            motion -= Vec3::Y;
        }

        if motion != Vec3::ZERO {
            self.position += motion.normalize() * speed * dt;
        }
    }

    //--- Persistence ------------------------------------------------------

    pub fn save(&self) -> CompoundTag {
        CompoundTag::new()
            .with("position", self.position)
            .with("yaw", self.yaw)
            .with("pitch", self.pitch)
    }

    pub fn load(tag: &CompoundTag) -> Result<Self, TagError> {
        Ok(Self {
            position: tag.get_vec3("position")?,
            yaw: tag.get_f32("yaw")?,
            pitch: tag.get_f32("pitch")?,
        })
    }
}

//=== CameraId ============================================================

/// Handle to a camera stored in [`Cameras`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraId(usize);

//=== Cameras =============================================================

/// Owns every camera and tracks which one is active.
#[derive(Debug, Default)]
pub struct Cameras {
    slots: Vec<Option<Camera>>,
    active: Option<CameraId>,
}

impl Cameras {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a camera, reusing a freed slot when available.
    pub fn add(&mut self, camera: Camera) -> CameraId {
        if let Some(index) = self.slots.iter().position(Option::is_none) {
            self.slots[index] = Some(camera);
            return CameraId(index);
        }

        self.slots.push(Some(camera));
        CameraId(self.slots.len() - 1)
    }

    /// Removes a camera; clears the active slot if it pointed there.
    pub fn remove(&mut self, id: CameraId) -> Option<Camera> {
        let camera = self.slots.get_mut(id.0)?.take();
        if self.active == Some(id) {
            debug!(target: "display", "Active camera {:?} removed", id);
            self.active = None;
        }
        camera
    }

    pub fn get(&self, id: CameraId) -> Option<&Camera> {
        self.slots.get(id.0)?.as_ref()
    }

    pub fn get_mut(&mut self, id: CameraId) -> Option<&mut Camera> {
        self.slots.get_mut(id.0)?.as_mut()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    //--- Active Slot ------------------------------------------------------

    pub fn active_id(&self) -> Option<CameraId> {
        self.active
    }

    pub fn active(&self) -> Option<&Camera> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut Camera> {
        let id = self.active?;
        self.get_mut(id)
    }

    /// Rebinds the active camera. Unknown ids are refused.
    pub fn set_active(&mut self, id: Option<CameraId>) -> bool {
        if let Some(id) = id {
            if self.get(id).is_none() {
                warn!(target: "display", "Cannot activate unknown camera {:?}", id);
                return false;
            }
        }
        self.active = id;
        true
    }

    /// View matrix of the active camera, identity when none is active.
    pub fn active_view(&self) -> Mat4 {
        self.active().map(Camera::view_matrix).unwrap_or(Mat4::IDENTITY)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
