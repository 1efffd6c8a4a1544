use nalgebra::{Matrix4, Point3, Vector3};

/// Degrees of spin about Y per horizontal drag event in whole-cube mode
const DRAG_STEP_Y: f32 = 3.0;
/// Degrees of spin about X per vertical drag event in whole-cube mode
const DRAG_STEP_X: f32 = 1.0;
/// Degrees added to both spins per frame in demo mode
const DEMO_STEP: f32 = 1.0;

/// nalgebra builds OpenGL-style clip space (z in [-1, 1]); wgpu wants z in [0, 1].
#[rustfmt::skip]
fn opengl_to_wgpu_matrix() -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    )
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Camera {
    pub(crate) eye: Point3<f32>,
    pub(crate) target: Point3<f32>,
    pub(crate) up: Vector3<f32>,
}

impl Camera {
    pub(crate) fn build_view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.eye, &self.target, &self.up)
    }
}

impl Default for Camera {
    /// Looks at the cube corner-on from (5, 5, 5).
    fn default() -> Self {
        Self {
            eye: Point3::new(5.0, 5.0, 5.0),
            target: Point3::origin(),
            up: Vector3::y(),
        }
    }
}

/// Orthographic view volume. Picking tolerances assume these bounds.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Projection {
    pub(crate) half_extent: f32,
    pub(crate) znear: f32,
    pub(crate) zfar: f32,
}

impl Projection {
    pub(crate) fn build_projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_orthographic(
            -self.half_extent,
            self.half_extent,
            -self.half_extent,
            self.half_extent,
            self.znear,
            self.zfar,
        )
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            half_extent: 5.0,
            znear: -15.0,
            zfar: 15.0,
        }
    }
}

/// Whole-cube rotation applied on top of the camera, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct ViewRotation {
    pub(crate) spin_x: f32,
    pub(crate) spin_y: f32,
}

impl ViewRotation {
    /// Rotation applied to the cube: about X first, then about Y in the cube's frame.
    pub(crate) fn matrix(&self) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::x() * self.spin_x.to_radians())
            * Matrix4::new_rotation(Vector3::y() * self.spin_y.to_radians())
    }

    /// Applies one pointer-motion event of a whole-cube drag, in screen pixels.
    ///
    /// The dominant direction wins: horizontal motion spins about Y, vertical
    /// motion about X, with upward motion (negative `delta_y`) spinning positively.
    pub(crate) fn process_drag(&mut self, delta_x: f32, delta_y: f32) {
        if delta_x.abs() > delta_y.abs() {
            let step = if delta_x > 0.0 { DRAG_STEP_Y } else { -DRAG_STEP_Y };
            self.spin_y = wrap_degrees(self.spin_y + step);
        } else {
            let step = if delta_y < 0.0 { DRAG_STEP_X } else { -DRAG_STEP_X };
            self.spin_x = wrap_degrees(self.spin_x + step);
        }
    }

    pub(crate) fn advance_demo(&mut self) {
        self.spin_x = wrap_degrees(self.spin_x + DEMO_STEP);
        self.spin_y = wrap_degrees(self.spin_y + DEMO_STEP);
    }
}

fn wrap_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

/// Combined clip-from-cube transform for the given view state, OpenGL convention.
pub(crate) fn clip_from_cube(
    camera: &Camera,
    projection: &Projection,
    rotation: &ViewRotation,
) -> Matrix4<f32> {
    projection.build_projection_matrix() * camera.build_view_matrix() * rotation.matrix()
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CameraUniform {
    pub(crate) view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub(crate) fn new() -> Self {
        Self {
            view_proj: Matrix4::identity().into(),
        }
    }

    /// The whole-cube rotation is baked into each instance, so only camera and
    /// projection go here.
    pub(crate) fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        let view_proj = projection.build_projection_matrix() * camera.build_view_matrix();
        self.view_proj = (opengl_to_wgpu_matrix() * view_proj).into();
    }
}
