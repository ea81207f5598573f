//! GPU-facing data layouts

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{Mat4, Point3, Vec3};

/// Per-object uniform data (column-major matrices)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectUniforms {
    /// Model matrix
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of view × model
    pub normal: [[f32; 4]; 4],
}

impl ObjectUniforms {
    /// Pack a model matrix and its normal matrix
    pub fn new(model: Mat4, normal: Mat4) -> Self {
        Self {
            model: model.into(),
            normal: normal.into(),
        }
    }
}

/// Point light uniform data
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightUniforms {
    /// World-space position, w = 1
    pub position: [f32; 4],
    /// RGB in 0..1, intensity in w
    pub color: [f32; 4],
}

impl LightUniforms {
    /// Pack a light from its position, unit color and intensity
    pub fn new(position: Point3, color: Vec3, intensity: f32) -> Self {
        Self {
            position: [position.x, position.y, position.z, 1.0],
            color: [color.x, color.y, color.z, intensity],
        }
    }
}

/// Star vertex: position followed by color
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct StarVertex {
    /// Position
    pub position: [f32; 3],
    /// RGB in 0..1
    pub color: [f32; 3],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes_match_shader_layout() {
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 128);
        assert_eq!(std::mem::size_of::<LightUniforms>(), 32);
        assert_eq!(std::mem::size_of::<StarVertex>(), 24);
    }

    #[test]
    fn test_object_uniforms_are_column_major() {
        let model = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));
        let uniforms = ObjectUniforms::new(model, Mat4::identity());
        assert_eq!(uniforms.model[3], [1.0, 2.0, 3.0, 1.0]);

        let bytes: &[u8] = bytemuck::bytes_of(&uniforms);
        assert_eq!(bytes.len(), 128);
    }
}
