//! Perspective camera, its GPU uniform and the optional orbit controls.

use std::f32::consts::FRAC_PI_2;

use cgmath::{InnerSpace, Matrix4, Point3, Rad, Vector3, perspective};

use crate::config::CameraConfig;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// A look-at camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    /// Vertical field of view.
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.target, Vector3::unit_y())
    }

    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, aspect, self.znear, self.zfar)
    }
}

impl From<&CameraConfig> for Camera {
    fn from(config: &CameraConfig) -> Self {
        Self {
            position: config.position.into(),
            target: config.target.into(),
            fovy: cgmath::Deg(config.fov).into(),
            znear: config.near,
            zfar: config.far,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from(&CameraConfig::default())
    }
}

/// Surface aspect ratio, kept in sync with window resizes.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    aspect: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.position.to_homogeneous().into();
        self.view_proj = (camera.projection_matrix(projection.aspect()) * camera.view_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct CameraResources {
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

/// Orbit around a target point: azimuth and elevation in radians plus a
/// distance.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitControls {
    pub target: Point3<f32>,
    pub distance: f32,
    pub azimuth: f32,
    pub elevation: f32,
    /// Radians per pixel of mouse movement.
    pub rotate_sensitivity: f32,
    /// Distance units per scroll line.
    pub zoom_sensitivity: f32,
}

impl OrbitControls {
    const MIN_DISTANCE: f32 = 0.5;
    const MAX_DISTANCE: f32 = 500.0;
    const MAX_ELEVATION: f32 = FRAC_PI_2 - 0.05;

    /// Controls that reproduce the current camera placement.
    pub fn from_camera(camera: &Camera) -> Self {
        let mut controls = Self {
            target: camera.target,
            distance: 1.0,
            azimuth: 0.0,
            elevation: 0.0,
            rotate_sensitivity: 0.005,
            zoom_sensitivity: 0.5,
        };
        controls.sync(camera);
        controls
    }

    /// Re-derive distance and angles from a camera that was moved by
    /// something other than these controls. The target is kept.
    pub fn sync(&mut self, camera: &Camera) {
        let offset = camera.position - self.target;
        self.distance = offset.magnitude().max(Self::MIN_DISTANCE);
        self.azimuth = offset.x.atan2(offset.z);
        self.elevation = (offset.y / self.distance)
            .clamp(-1.0, 1.0)
            .asin()
            .clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.azimuth -= dx * self.rotate_sensitivity;
        self.elevation = (self.elevation + dy * self.rotate_sensitivity)
            .clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);
    }

    pub fn zoom(&mut self, lines: f32) {
        self.distance = (self.distance - lines * self.zoom_sensitivity)
            .clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
    }

    pub fn position(&self) -> Point3<f32> {
        let x = self.distance * self.elevation.cos() * self.azimuth.sin();
        let y = self.distance * self.elevation.sin();
        let z = self.distance * self.elevation.cos() * self.azimuth.cos();
        self.target + Vector3::new(x, y, z)
    }

    pub fn apply(&self, camera: &mut Camera) {
        camera.position = self.position();
        camera.target = self.target;
    }
}
