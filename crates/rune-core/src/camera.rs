//! Camera/viewport providers consumed by the template projector and the
//! target selector.
//!
//! The 3D scene lives outside this crate; all the core needs is a way to map
//! a world point to normalized device coordinates, the viewport size in
//! pixels and where the camera sits and looks.

use glam::{Mat4, Vec2, Vec3};

pub trait CameraProvider {
    /// World point to normalized device coordinates (perspective divide
    /// applied). Points behind the camera come back with a depth outside
    /// `[-1, 1]` or non-finite components.
    fn project_ndc(&self, world: Vec3) -> Vec3;
    /// Viewport size in pixels.
    fn viewport(&self) -> Vec2;
    fn eye(&self) -> Vec3;
    /// Unit vector the camera looks along.
    fn forward(&self) -> Vec3;

    fn viewport_center(&self) -> Vec2 {
        self.viewport() * 0.5
    }
}

impl<C: CameraProvider + ?Sized> CameraProvider for &C {
    fn project_ndc(&self, world: Vec3) -> Vec3 {
        (**self).project_ndc(world)
    }
    fn viewport(&self) -> Vec2 {
        (**self).viewport()
    }
    fn eye(&self) -> Vec3 {
        (**self).eye()
    }
    fn forward(&self) -> Vec3 {
        (**self).forward()
    }
}

#[inline]
fn divide(view_proj: &Mat4, world: Vec3) -> Vec3 {
    let clip = *view_proj * world.extend(1.0);
    if clip.w <= f32::EPSILON {
        // behind (or on) the eye plane: force a depth the projector rejects
        return Vec3::new(f32::NAN, f32::NAN, 2.0);
    }
    clip.truncate() / clip.w
}

/// NDC to pixel coordinates, origin top-left, y down.
#[inline]
pub fn ndc_to_pixels(ndc: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        (ndc.x + 1.0) * viewport.x * 0.5,
        (1.0 - ndc.y) * viewport.y * 0.5,
    )
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    pub viewport: Vec2,
}

impl Camera {
    pub fn looking_at(eye: Vec3, target: Vec3, viewport: Vec2) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            fovy_radians: std::f32::consts::FRAC_PI_4,
            znear: 0.1,
            zfar: 1000.0,
            viewport,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y.max(1.0)
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect(), self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl CameraProvider for Camera {
    fn project_ndc(&self, world: Vec3) -> Vec3 {
        divide(&self.view_projection(), world)
    }
    fn viewport(&self) -> Vec2 {
        self.viewport
    }
    fn eye(&self) -> Vec3 {
        self.eye
    }
    fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }
}

/// Camera state handed over by a host that already owns the matrices.
#[derive(Clone, Debug)]
pub struct ViewProjCamera {
    pub view_proj: Mat4,
    pub eye: Vec3,
    pub forward: Vec3,
    pub viewport: Vec2,
}

impl ViewProjCamera {
    pub fn new(view_proj: Mat4, eye: Vec3, forward: Vec3, viewport: Vec2) -> Self {
        Self {
            view_proj,
            eye,
            forward: forward.normalize_or_zero(),
            viewport,
        }
    }
}

impl CameraProvider for ViewProjCamera {
    fn project_ndc(&self, world: Vec3) -> Vec3 {
        divide(&self.view_proj, world)
    }
    fn viewport(&self) -> Vec2 {
        self.viewport
    }
    fn eye(&self) -> Vec3 {
        self.eye
    }
    fn forward(&self) -> Vec3 {
        self.forward
    }
}
