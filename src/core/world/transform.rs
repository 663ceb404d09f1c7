//=========================================================================
// Transform Component
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

use glam::{EulerRot, Mat4, Quat, Vec3};

//=== Internal Dependencies ===============================================

use super::component::{Component, ComponentField, FieldValue};
use crate::core::tag::{CompoundTag, TagError};

//=== TransformComponent ==================================================

/// Translation, rotation (XYZ Euler angles in degrees) and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformComponent {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self { translation: Vec3::ZERO, rotation: Vec3::ZERO, scale: Vec3::ONE }
    }
}

impl TransformComponent {
    pub const TYPE_NAME: &'static str = "Transform";

    pub fn from_translation(translation: Vec3) -> Self {
        Self { translation, ..Self::default() }
    }

    pub fn rotation_quat(&self) -> Quat {
        let r = self.rotation;
        Quat::from_euler(EulerRot::XYZ, r.x.to_radians(), r.y.to_radians(), r.z.to_radians())
    }

    pub fn set_rotation_quat(&mut self, rotation: Quat) {
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees());
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.translation)
    }

    /// Decomposes `matrix` back into translation, rotation and scale.
    pub fn set_from_matrix(&mut self, matrix: Mat4) {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        self.translation = translation;
        self.scale = scale;
        self.set_rotation_quat(rotation);
    }
}

impl Component for TransformComponent {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn save(&self) -> CompoundTag {
        CompoundTag::new()
            .with("translation", self.translation)
            .with("rotation", self.rotation)
            .with("scale", self.scale)
    }

    fn load(&mut self, tag: &CompoundTag) -> Result<(), TagError> {
        self.translation = tag.get_vec3("translation")?;
        self.rotation = tag.get_vec3("rotation")?;
        self.scale = tag.get_vec3("scale")?;
        Ok(())
    }

    fn fields(&self) -> Vec<ComponentField> {
        vec![
            ComponentField::new("Translation", FieldValue::Vec3(self.translation)),
            ComponentField::new("Rotation", FieldValue::Vec3(self.rotation)),
            ComponentField::new("Scale", FieldValue::Vec3(self.scale)),
        ]
    }

    fn set_field(&mut self, label: &str, value: FieldValue) -> bool {
        let FieldValue::Vec3(v) = value else {
            return false;
        };

        match label {
            "Translation" => self.translation = v,
            "Rotation" => self.rotation = v,
            "Scale" => self.scale = v,
            _ => return false,
        }
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_decomposition_recovers_components() {
        let original = TransformComponent {
            translation: Vec3::new(1.0, -2.0, 3.0),
            rotation: Vec3::new(10.0, 20.0, 30.0),
            scale: Vec3::new(2.0, 2.0, 2.0),
        };

        let mut decoded = TransformComponent::default();
        decoded.set_from_matrix(original.matrix());

        assert!(decoded.translation.abs_diff_eq(original.translation, 1e-4));
        assert!(decoded.rotation.abs_diff_eq(original.rotation, 1e-2));
        assert!(decoded.scale.abs_diff_eq(original.scale, 1e-4));
    }

    #[test]
    fn set_field_rejects_wrong_shape() {
        let mut transform = TransformComponent::default();
        assert!(!transform.set_field("Scale", FieldValue::Float(2.0)));
        assert!(!transform.set_field("Skew", FieldValue::Vec3(Vec3::ONE)));
        assert!(transform.set_field("Scale", FieldValue::Vec3(Vec3::splat(3.0))));
        assert_eq!(transform.scale, Vec3::splat(3.0));
    }

    #[test]
    fn tag_round_trip() {
        let transform = TransformComponent::from_translation(Vec3::new(4.0, 5.0, 6.0));
        let mut loaded = TransformComponent::default();
        loaded.load(&transform.save()).unwrap();
        assert_eq!(loaded, transform);
    }
}
