use glam::{Mat3, Mat4, Vec3};

use super::Viewport;
use crate::options::Options;

/// Per-frame matrices fed to the Phong shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transforms {
    /// Object → world.
    pub model: Mat4,
    /// World → view.
    pub view: Mat4,
    /// View → clip, wgpu [0, 1] depth range.
    pub projection: Mat4,
    /// Inverse-transpose of the model's upper 3x3, for normals.
    pub normal_matrix: Mat3,
    /// World-space eye position.
    pub eye: Vec3,
}

impl Transforms {
    /// Build the matrices for the current options and viewport size.
    #[must_use]
    pub fn from_options(options: &Options, viewport: &Viewport) -> Self {
        let model = Mat4::from_translation(Vec3::from(
            options.model.translation,
        )) * Mat4::from_scale(Vec3::splat(options.model.scale));

        let cam = &options.camera;
        let eye = Vec3::from(cam.eye);
        let view = Mat4::look_to_rh(eye, Vec3::NEG_Z, Vec3::Y);
        let projection = Mat4::perspective_rh(
            cam.fovy.to_radians(),
            viewport.aspect(),
            cam.znear,
            cam.zfar,
        );

        Self {
            model,
            view,
            projection,
            normal_matrix: normal_matrix(model),
            eye,
        }
    }

    /// Combined projection * view * model.
    #[must_use]
    pub fn model_view_projection(&self) -> Mat4 {
        self.projection * self.view * self.model
    }
}

/// Inverse-transpose of the upper 3x3 of `model`.
#[must_use]
pub fn normal_matrix(model: Mat4) -> Mat3 {
    Mat3::from_mat4(model).inverse().transpose()
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    #[test]
    fn default_view_is_identity() {
        let t = Transforms::from_options(
            &Options::default(),
            &Viewport::new(800, 800),
        );
        assert!(t.view.abs_diff_eq(Mat4::IDENTITY, 1e-6));
        assert_eq!(t.eye, Vec3::ZERO);
    }

    #[test]
    fn uniform_scale_normal_matrix_is_inverse_scale() {
        let t = Transforms::from_options(
            &Options::default(),
            &Viewport::new(800, 800),
        );
        let expected = Mat3::from_diagonal(Vec3::splat(0.5));
        assert!(t.normal_matrix.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn sphere_center_projects_to_screen_center() {
        let t = Transforms::from_options(
            &Options::default(),
            &Viewport::new(1280, 720),
        );
        let clip = t.model_view_projection() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0, "depth {} outside [0, 1]", ndc.z);
    }

    #[test]
    fn aspect_follows_viewport() {
        let opts = Options::default();
        let square = Transforms::from_options(&opts, &Viewport::new(800, 800));
        let wide = Transforms::from_options(&opts, &Viewport::new(1600, 800));
        // x scale halves when the viewport is twice as wide
        let ratio = wide.projection.x_axis.x / square.projection.x_axis.x;
        assert!((ratio - 0.5).abs() < 1e-6);
        assert_eq!(wide.projection.y_axis.y, square.projection.y_axis.y);
    }
}
