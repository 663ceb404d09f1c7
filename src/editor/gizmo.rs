//=========================================================================
// Transform Gizmo
//=========================================================================
//
// Applies a manipulation delta to a `TransformComponent`.
//
// Operations:
//   Translate  delta = offset in units      (local: along the entity axes)
//   Rotate     delta = XYZ Euler in degrees (local: about the entity axes)
//   Scale      delta = added to scale       (always local)
//
// With snapping on, the delta is rounded to the nearest multiple of the
// snap for the current operation before it is applied.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{EulerRot, Quat, Vec3};
use log::trace;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::world::TransformComponent;

//=== Modes ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GizmoOperation {
    #[default]
    Translate,
    Rotate,
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GizmoMode {
    Local,
    #[default]
    World,
}

//=== Snap ================================================================

/// Snap increments per operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snap {
    pub translate: Vec3,
    pub angle: f32,
    pub scale: f32,
}

impl Default for Snap {
    fn default() -> Self {
        Self { translate: Vec3::splat(5.0), angle: 5.0, scale: 5.0 }
    }
}

//=== Gizmo ===============================================================

#[derive(Debug, Clone, Default)]
pub struct Gizmo {
    pub operation: GizmoOperation,
    pub mode: GizmoMode,
    pub use_snap: bool,
    pub snap: Snap,
}

impl Gizmo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mode actually used for the current operation.
    pub fn effective_mode(&self) -> GizmoMode {
        match self.operation {
            GizmoOperation::Scale => GizmoMode::Local,
            _ => self.mode,
        }
    }

    /// Writes `delta` into `transform` according to the current settings.
    pub fn apply(&self, transform: &mut TransformComponent, delta: Vec3) {
        let delta = self.snapped(delta);
        trace!(target: "editor", "Gizmo {:?} ({:?}) by {}", self.operation, self.effective_mode(), delta);

        match (self.operation, self.effective_mode()) {
            (GizmoOperation::Translate, GizmoMode::World) => transform.translation += delta,
            (GizmoOperation::Translate, GizmoMode::Local) => {
                transform.translation += transform.rotation_quat() * delta;
            }
            (GizmoOperation::Rotate, mode) => {
                let step = Quat::from_euler(
                    EulerRot::XYZ,
                    delta.x.to_radians(),
                    delta.y.to_radians(),
                    delta.z.to_radians(),
                );
                let current = transform.rotation_quat();
                let rotated = match mode {
                    GizmoMode::World => step * current,
                    GizmoMode::Local => current * step,
                };
                transform.set_rotation_quat(rotated.normalize());
            }
            (GizmoOperation::Scale, _) => transform.scale += delta,
        }
    }

    fn snapped(&self, delta: Vec3) -> Vec3 {
        if !self.use_snap {
            return delta;
        }

        let step = match self.operation {
            GizmoOperation::Translate => self.snap.translate,
            GizmoOperation::Rotate => Vec3::splat(self.snap.angle),
            GizmoOperation::Scale => Vec3::splat(self.snap.scale),
        };
        Vec3::select(step.cmpgt(Vec3::ZERO), (delta / step).round() * step, delta)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
