//! Orbit camera: state, input controller, presets, and projection.
//!
//! The camera is parameterized by yaw, pitch and distance around a look-at
//! target instead of a free-form position. Dragging turns the orbit, the
//! wheel zooms, arrow keys pan the target along the camera's own axes, and
//! named presets snap the orientation to axis or diagonal views.
//!
//! The view matrix is built from explicit basis vectors with forward defined
//! as target-minus-eye. The projection is left-handed with depth in 0..1 to
//! match that convention, so both halves of the transform agree on signs.

use cgmath::{InnerSpace, Matrix4, SquareMatrix, Vector3};
use instant::Duration;
use winit::event::MouseScrollDelta;

/// Pitch never quite reaches straight up/down so the view basis stays
/// well-defined.
pub const PITCH_LIMIT: f32 = 0.99 * std::f32::consts::FRAC_PI_2;
pub const MIN_DISTANCE: f32 = 1.0;
pub const MAX_DISTANCE: f32 = 100.0;

/// Named orientation shortcuts: the six axis views plus six diagonals.
///
/// Applying a preset assigns yaw/pitch directly; the controller re-clamps on
/// the next update, so the straight up/down views settle just inside the
/// pitch limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPreset {
    Front,
    Back,
    Left,
    Right,
    Up,
    Down,
    FrontRight,
    TopRight,
    FrontLeft,
    BottomRight,
    BottomFront,
    BottomLeft,
}

impl ViewPreset {
    /// The (yaw, pitch) pair the preset assigns.
    pub fn angles(self) -> (f32, f32) {
        use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
        match self {
            ViewPreset::Front => (0.0, 0.0),
            ViewPreset::Back => (PI, 0.0),
            ViewPreset::Left => (-FRAC_PI_2, 0.0),
            ViewPreset::Right => (FRAC_PI_2, 0.0),
            ViewPreset::Up => (0.0, FRAC_PI_2),
            ViewPreset::Down => (0.0, -FRAC_PI_2),
            ViewPreset::FrontRight => (FRAC_PI_4, FRAC_PI_4),
            ViewPreset::TopRight => (0.0, FRAC_PI_4),
            ViewPreset::FrontLeft => (-FRAC_PI_4, FRAC_PI_4),
            ViewPreset::BottomRight => (FRAC_PI_4, -FRAC_PI_4),
            ViewPreset::BottomFront => (0.0, -FRAC_PI_4),
            ViewPreset::BottomLeft => (-FRAC_PI_4, -FRAC_PI_4),
        }
    }
}

/// Continuous orbit state: yaw/pitch/distance around a pannable target.
///
/// Only the controller mutates this; the renderer reads it to derive the
/// view matrix.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target: Vector3<f32>,
}

impl OrbitCamera {
    pub fn new<T: Into<Vector3<f32>>>(target: T, distance: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance,
            target: target.into(),
        }
    }

    /// Snap the orientation to a preset, bypassing the clamps. The next
    /// controller update re-clamps.
    pub fn apply_preset(&mut self, preset: ViewPreset) {
        let (yaw, pitch) = preset.angles();
        self.yaw = yaw;
        self.pitch = pitch;
    }

    pub(crate) fn clamp(&mut self) {
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.distance = self.distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Eye position on the orbit sphere.
    pub fn position(&self) -> Vector3<f32> {
        let offset = Vector3::new(
            self.distance * self.pitch.cos() * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            self.distance * self.pitch.cos() * self.yaw.cos(),
        );
        self.target + offset
    }

    /// Orthonormal camera basis: (right, up, forward).
    ///
    /// Forward points from the eye towards the target. Sign conventions here
    /// must stay in lockstep with [`Projection::matrix`].
    pub fn basis(&self) -> (Vector3<f32>, Vector3<f32>, Vector3<f32>) {
        let forward = (self.target - self.position()).normalize();
        let right = Vector3::unit_y().cross(forward).normalize();
        let up = forward.cross(right);
        (right, up, forward)
    }

    /// Look-at matrix assembled from the explicit basis vectors.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = self.position();
        let (right, up, forward) = self.basis();
        Matrix4::new(
            right.x, up.x, forward.x, 0.0,
            right.y, up.y, forward.y, 0.0,
            right.z, up.z, forward.z, 0.0,
            -right.dot(eye), -up.dot(eye), -forward.dot(eye), 1.0,
        )
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new([0.0, -4.0, 0.0], 20.0)
    }
}

/// Perspective projection matching the camera's target-minus-eye forward:
/// left-handed, depth mapped to 0..1.
#[derive(Debug, Clone)]
pub struct Projection {
    aspect: f32,
    fovy: f32,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, fovy: f32, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height as f32,
            fovy,
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        let f = 1.0 / (self.fovy / 2.0).tan();
        let depth = self.zfar / (self.zfar - self.znear);
        Matrix4::new(
            f / self.aspect, 0.0, 0.0, 0.0,
            0.0, f, 0.0, 0.0,
            0.0, 0.0, depth, 1.0,
            0.0, 0.0, -self.znear * depth, 0.0,
        )
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(1, 1, std::f32::consts::FRAC_PI_4, 0.1, 100.0)
    }
}

/// The two matrices the vertex shader reads every frame.
///
/// Rewritten in full each frame via a discard-style write; nothing here
/// outlives the frame it was computed for.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub rotation: [[f32; 4]; 4],
}

impl FrameUniforms {
    /// Compose projection, surface pretransform and view into the uploaded
    /// view-projection. The pretransform compensates for rotated output
    /// surfaces and is identity on regular desktops.
    pub fn new(
        camera: &OrbitCamera,
        projection: &Projection,
        surface_pretransform: Matrix4<f32>,
    ) -> Self {
        let view_proj = projection.matrix() * surface_pretransform * camera.view_matrix();
        Self {
            view_proj: view_proj.into(),
            rotation: Matrix4::identity().into(),
        }
    }
}

/// Translates pointer/wheel/key input into orbit camera updates.
///
/// Input events accumulate between frames; `update_camera` applies them once
/// per frame and enforces the pitch and distance clamps.
#[derive(Debug)]
pub struct CameraController {
    sensitivity: f32,
    zoom_speed: f32,
    pan_speed: f32,
    drag_dx: f32,
    scroll: f32,
    pan_up: bool,
    pan_down: bool,
    pan_left: bool,
    pan_right: bool,
    pending_preset: Option<ViewPreset>,
    pub dragging: bool,
}

impl CameraController {
    pub fn new(sensitivity: f32, zoom_speed: f32, pan_speed: f32) -> Self {
        Self {
            sensitivity,
            zoom_speed,
            pan_speed,
            drag_dx: 0.0,
            scroll: 0.0,
            pan_up: false,
            pan_down: false,
            pan_left: false,
            pan_right: false,
            pending_preset: None,
            dragging: false,
        }
    }

    /// Accumulate a pointer delta. Only consumed while a button is held.
    ///
    /// Deliberately ignores the vertical delta: the reference behavior maps
    /// horizontal drag to yaw and nothing to pitch.
    pub fn process_mouse(&mut self, dx: f64, _dy: f64) {
        if self.dragging {
            self.drag_dx += dx as f32;
        }
    }

    pub fn process_scroll(&mut self, delta: &MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, y) => *y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
        };
    }

    pub fn pan(&mut self, up: bool, down: bool, left: bool, right: bool) {
        self.pan_up = up;
        self.pan_down = down;
        self.pan_left = left;
        self.pan_right = right;
    }

    /// Queue a preset; it is applied on the next update.
    pub fn set_preset(&mut self, preset: ViewPreset) {
        self.pending_preset = Some(preset);
    }

    /// Apply one frame's worth of accumulated input to the camera.
    pub fn update_camera(&mut self, camera: &mut OrbitCamera, dt: Duration) {
        if let Some(preset) = self.pending_preset.take() {
            camera.apply_preset(preset);
        }

        camera.yaw += self.drag_dx * self.sensitivity;
        self.drag_dx = 0.0;

        if self.scroll.abs() > 0.0 {
            camera.distance -= self.scroll * self.zoom_speed;
            self.scroll = 0.0;
        }

        camera.clamp();

        let (right, up, _forward) = camera.basis();
        let pan = self.pan_speed * dt.as_secs_f32();
        if self.pan_up {
            camera.target += up * pan;
        }
        if self.pan_down {
            camera.target -= up * pan;
        }
        if self.pan_right {
            camera.target += right * pan;
        }
        if self.pan_left {
            camera.target -= right * pan;
        }
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(0.005, 2.0, 5.0)
    }
}
