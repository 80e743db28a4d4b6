//! Camera and the world → screen transform pipeline.
//!
//! Screen positions are produced in two stages: world → NDC through
//! `view * projection`, then NDC → screen through the viewport matrix. Each
//! stage performs its own conditional perspective divide.

use serde::{Deserialize, Serialize};

use crate::{
    error::GeomError,
    math::{Mat4, Vec3},
};

/// Left-handed perspective projection, depth mapped to `[0, 1]`.
pub fn perspective_fov(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Mat4 {
    let cot = 1.0 / (fov_y / 2.0).tan();
    let mut m = Mat4::ZERO;
    m.m[0][0] = cot / aspect_ratio;
    m.m[1][1] = cot;
    m.m[2][2] = far / (far - near);
    m.m[2][3] = 1.0;
    m.m[3][2] = -near * far / (far - near);
    m
}

pub fn orthographic(left: f32, top: f32, right: f32, bottom: f32, near: f32, far: f32) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    m.m[0][0] = 2.0 / (right - left);
    m.m[1][1] = 2.0 / (top - bottom);
    m.m[2][2] = 1.0 / (far - near);
    m.m[3][0] = (left + right) / (left - right);
    m.m[3][1] = (top + bottom) / (bottom - top);
    m.m[3][2] = near / (near - far);
    m
}

/// Screen rectangle and depth range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 1280.0,
            height: 720.0,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

impl Viewport {
    pub fn matrix(&self) -> Mat4 {
        let mut m = Mat4::ZERO;
        m.m[0][0] = self.width / 2.0;
        m.m[1][1] = -self.height / 2.0;
        m.m[2][2] = self.max_depth - self.min_depth;
        m.m[3][0] = self.left + self.width / 2.0;
        m.m[3][1] = self.top + self.height / 2.0;
        m.m[3][2] = self.min_depth;
        m.m[3][3] = 1.0;
        m
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

/// Per-tick camera input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    pub translate: Vec3,
    pub rotate: Vec3,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            translate: Vec3::new(0.0, 1.9, -6.49),
            rotate: Vec3::new(0.26, 0.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub scale: Vec3,
    #[serde(flatten)]
    pub params: CameraParams,
    /// Vertical field of view, radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub viewport: Viewport,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            params: CameraParams::default(),
            fov_y: 0.45,
            near: 0.1,
            far: 100.0,
            viewport: Viewport::default(),
        }
    }
}

impl Camera {
    pub fn update(&mut self, params: &CameraParams) {
        self.params = *params;
    }

    pub fn world_matrix(&self) -> Mat4 {
        Mat4::affine(self.scale, self.params.rotate, self.params.translate)
    }

    pub fn view_matrix(&self) -> Result<Mat4, GeomError> {
        self.world_matrix().inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        perspective_fov(self.fov_y, self.viewport.aspect_ratio(), self.near, self.far)
    }

    /// Freezes the current matrices for one frame of drawing.
    pub fn pipeline(&self) -> Result<Pipeline, GeomError> {
        Ok(Pipeline {
            view_projection: self.view_matrix()? * self.projection_matrix(),
            viewport: self.viewport.matrix(),
        })
    }
}

/// Matrices for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipeline {
    pub view_projection: Mat4,
    pub viewport: Mat4,
}

impl Pipeline {
    pub fn to_ndc(&self, world: Vec3) -> Vec3 {
        self.view_projection.transform_point(world)
    }

    pub fn to_screen(&self, world: Vec3) -> Vec3 {
        self.viewport.transform_point(self.to_ndc(world))
    }

    /// Screen position truncated to integer pixels.
    pub fn to_pixel(&self, world: Vec3) -> (i32, i32) {
        let s = self.to_screen(world);
        (s.x as i32, s.y as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_maps_ndc_corners() {
        let vp = Viewport::default().matrix();
        assert_eq!(vp.transform_point(Vec3::new(-1.0, 1.0, 0.0)), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(vp.transform_point(Vec3::new(1.0, -1.0, 1.0)), Vec3::new(1280.0, 720.0, 1.0));
        assert_eq!(vp.transform_point(Vec3::ZERO), Vec3::new(640.0, 360.0, 0.0));
    }

    #[test]
    fn perspective_maps_near_and_far_planes() {
        let p = perspective_fov(0.45, 16.0 / 9.0, 0.1, 100.0);
        let near = p.transform_point(Vec3::new(0.0, 0.0, 0.1));
        let far = p.transform_point(Vec3::new(0.0, 0.0, 100.0));
        assert!(near.z.abs() < 1e-5);
        assert!((far.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn point_in_front_of_camera_lands_on_screen_center() {
        let cam = Camera {
            params: CameraParams {
                translate: Vec3::ZERO,
                rotate: Vec3::ZERO,
            },
            ..Camera::default()
        };
        let pipeline = cam.pipeline().unwrap();
        let s = pipeline.to_screen(Vec3::new(0.0, 0.0, 5.0));
        assert!((s.x - 640.0).abs() < 1e-3);
        assert!((s.y - 360.0).abs() < 1e-3);
        assert!(s.z > 0.0 && s.z < 1.0);
    }

    #[test]
    fn viewport_stage_divides_by_its_own_w() {
        let mut pipeline = Camera::default().pipeline().unwrap();
        pipeline.viewport.m[3][3] = 2.0;

        let world = Vec3::new(0.3, 0.2, 0.5);
        let ndc = pipeline.to_ndc(world);
        let undivided = pipeline.viewport.mul_vec4(ndc.extend(1.0));
        assert_eq!(undivided.w, 2.0);

        let screen = pipeline.to_screen(world);
        assert_eq!(screen, pipeline.viewport.transform_point(ndc));
        assert_eq!(screen, Vec3::new(undivided.x, undivided.y, undivided.z) / 2.0);
        assert_ne!(screen, Vec3::new(undivided.x, undivided.y, undivided.z));
    }

    #[test]
    fn higher_world_points_are_higher_on_screen() {
        let pipeline = Camera::default().pipeline().unwrap();
        let low = pipeline.to_screen(Vec3::new(0.0, 0.0, 0.0));
        let high = pipeline.to_screen(Vec3::new(0.0, 1.0, 0.0));
        assert!(high.y < low.y);
    }

    #[test]
    fn view_is_inverse_of_world() {
        let cam = Camera::default();
        let prod = cam.world_matrix() * cam.view_matrix().unwrap();
        assert!(prod.max_abs_diff(&Mat4::IDENTITY) < 1e-4);
    }

    #[test]
    fn degenerate_scale_has_no_view() {
        let cam = Camera {
            scale: Vec3::ZERO,
            ..Camera::default()
        };
        assert!(matches!(cam.pipeline(), Err(GeomError::SingularMatrix { .. })));
    }

    #[test]
    fn orthographic_maps_box_to_unit_cube() {
        let o = orthographic(-10.0, 5.0, 10.0, -5.0, 0.0, 100.0);
        let p = o.transform_point(Vec3::new(10.0, 5.0, 100.0));
        assert!((p - Vec3::new(1.0, 1.0, 1.0)).length() < 1e-5);
    }
}
