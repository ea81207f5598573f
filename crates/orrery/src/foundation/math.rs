//! Math utilities and types
//!
//! Provides the matrix and vector types used by the scene graph together with
//! glm-style composition helpers. All helpers post-multiply: `rotate(m, ..)`
//! yields `m × R`, so a chain of calls reads in the order the operations are
//! applied to a vertex, last call first.

pub use nalgebra::{Matrix4, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Unit Y axis, the rotation axis of every orbit in the system
pub fn y_axis() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// Compose a rotation of `angle` radians around `axis` onto `m`.
///
/// A zero-length axis leaves `m` unchanged.
pub fn rotate(m: &Mat4, angle: f32, axis: Vec3) -> Mat4 {
    match Unit::try_new(axis, f32::EPSILON) {
        Some(axis) => m * Mat4::from_axis_angle(&axis, angle),
        None => *m,
    }
}

/// Compose a translation by `offset` onto `m`
pub fn translate(m: &Mat4, offset: Vec3) -> Mat4 {
    m * Mat4::new_translation(&offset)
}

/// Compose a per-axis scale onto `m`
pub fn scale(m: &Mat4, factors: Vec3) -> Mat4 {
    m * Mat4::new_nonuniform_scaling(&factors)
}

/// Position of the local origin of `m` in the space `m` maps into
pub fn origin_of(m: &Mat4) -> Point3 {
    let h = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
    Point3::new(h.x, h.y, h.z)
}

/// Normal matrix for lighting under non-uniform scale.
///
/// Inverse-transpose of `view × model`. Returns `None` when the product is
/// singular (for instance a body of size zero).
pub fn normal_matrix(view: &Mat4, model: &Mat4) -> Option<Mat4> {
    (view * model).try_inverse().map(|inv| inv.transpose())
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a perspective projection matrix (OpenGL clip space, depth in [-1, 1])
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compose_order_matches_post_multiplication() {
        let m = translate(&Mat4::identity(), Vec3::new(0.0, 0.0, 5.0));
        let m = scale(&m, Vec3::new(2.0, 2.0, 2.0));

        // Scale applies first, then the translation
        let p = m.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(2.0, 0.0, 5.0), epsilon = 1e-5);
    }

    #[test]
    fn test_rotate_quarter_turn_about_y() {
        let m = rotate(&Mat4::identity(), constants::PI / 2.0, y_axis());
        let p = m.transform_point(&Point3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(p, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(m, Mat4::rotation_y(constants::PI / 2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rotate_with_zero_axis_is_identity() {
        let m = translate(&Mat4::identity(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(rotate(&m, 1.0, Vec3::zeros()), m);
    }

    #[test]
    fn test_origin_of_reads_translation_column() {
        let m = translate(&Mat4::identity(), Vec3::new(3.0, -1.0, 7.5));
        assert_relative_eq!(origin_of(&m), Point3::new(3.0, -1.0, 7.5));
    }

    #[test]
    fn test_normal_matrix_of_singular_model_is_none() {
        let model = scale(&Mat4::identity(), Vec3::zeros());
        assert!(normal_matrix(&Mat4::identity(), &model).is_none());
    }

    #[test]
    fn test_normal_matrix_under_uniform_scale_preserves_direction() {
        let model = scale(&Mat4::identity(), Vec3::new(4.0, 4.0, 4.0));
        let normal = normal_matrix(&Mat4::identity(), &model).unwrap();
        let n = normal.transform_vector(&Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(n.normalize(), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_normal_matrix_keeps_normals_perpendicular_under_non_uniform_scale() {
        let view = translate(&Mat4::identity(), Vec3::new(0.0, 0.0, -10.0));
        let model = rotate(&Mat4::identity(), 0.7, y_axis());
        let model = scale(&model, Vec3::new(1.0, 4.0, 1.0));
        let normal = normal_matrix(&view, &model).unwrap();

        let tangent = Vec3::new(1.0, 1.0, 0.0);
        let surface_normal = Vec3::new(1.0, -1.0, 0.0);
        let view_model = view * model;
        let t = view_model.transform_vector(&tangent);

        // Shaders take the upper 3x3 of the normal matrix
        let n = normal.fixed_view::<3, 3>(0, 0) * surface_normal;
        assert_relative_eq!(n.dot(&t), 0.0, epsilon = 1e-5);

        // The model matrix alone skews the normal off the surface
        let skewed = view_model.transform_vector(&surface_normal);
        assert!(skewed.dot(&t).abs() > 1.0);
    }
}
