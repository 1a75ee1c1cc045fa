//! The hand-authored instance scene and its rotation animation.
//!
//! The scene is a fixed arrangement of 22 decorative parts (beams, posts and
//! full cubes) that together form a hanging mobile. Every frame the whole
//! structure turns about the Y axis by a fixed increment, so the generator
//! re-emits all records each call with only the shared angle advanced.

use cgmath::{Matrix4, Rad};

use crate::data_structures::instance::InstanceRaw;

/// Largest selectable lattice edge length.
pub const MAX_GRID_SIZE: u32 = 32;

/// Fixed capacity of the GPU instance buffer, in records. The buffer is
/// created once for the worst case and never reallocated.
pub const MAX_INSTANCES: u32 = MAX_GRID_SIZE * MAX_GRID_SIZE * MAX_GRID_SIZE;

/// Number of distinct instance records the scene produces per frame.
pub const PART_COUNT: usize = 22;

/// Rotation advance per generated frame, in radians.
pub const ROTATION_STEP: f32 = 0.003;

struct Part {
    scale: [f32; 3],
    translation: [f32; 3],
    texture_layer: u32,
}

// Scales and translations of the 22 parts, each tagged with one of the four
// texture-array layers. Thin parts are the frame of the mobile, unit cubes
// are the ornaments hanging off it.
const PARTS: [Part; PART_COUNT] = [
    Part { scale: [5.0, 0.1, 0.01], translation: [0.0, 0.0, 0.0], texture_layer: 3 },
    Part { scale: [0.01, 0.1, 5.0], translation: [0.0, 0.0, 0.0], texture_layer: 3 },
    Part { scale: [0.1, 1.0, 0.01], translation: [-5.0, -1.0, 0.0], texture_layer: 3 },
    Part { scale: [0.1, 1.0, 0.01], translation: [5.0, -1.0, 0.0], texture_layer: 3 },
    Part { scale: [0.1, 1.0, 0.01], translation: [0.0, 1.0, 0.0], texture_layer: 3 },
    Part { scale: [0.05, 1.0, 0.01], translation: [0.0, -1.0, -5.0], texture_layer: 3 },
    Part { scale: [0.05, 1.0, 0.01], translation: [0.0, -1.0, 5.0], texture_layer: 3 },
    Part { scale: [1.0, 1.0, 1.0], translation: [-5.0, -2.0, 0.0], texture_layer: 0 },
    Part { scale: [1.0, 1.0, 1.0], translation: [5.0, -2.0, 0.0], texture_layer: 2 },
    Part { scale: [1.0, 1.0, 1.0], translation: [0.0, -2.0, -5.0], texture_layer: 1 },
    Part { scale: [1.0, 1.0, 1.0], translation: [0.0, -2.0, 5.0], texture_layer: 0 },
    Part { scale: [3.0, 0.05, 0.01], translation: [0.0, -5.0, 0.0], texture_layer: 3 },
    Part { scale: [0.01, 0.05, 3.0], translation: [0.0, -5.0, 0.0], texture_layer: 3 },
    Part { scale: [0.05, 4.0, 0.01], translation: [0.0, -1.0, 0.0], texture_layer: 3 },
    Part { scale: [0.05, 1.0, 0.01], translation: [-3.0, -6.0, 0.0], texture_layer: 3 },
    Part { scale: [0.05, 1.0, 0.01], translation: [3.0, -6.0, 0.0], texture_layer: 3 },
    Part { scale: [0.05, 1.0, 0.01], translation: [0.0, -6.0, 3.0], texture_layer: 3 },
    Part { scale: [0.05, 1.0, 0.01], translation: [0.0, -6.0, -3.0], texture_layer: 3 },
    Part { scale: [1.0, 1.0, 1.0], translation: [-3.0, -7.0, 0.0], texture_layer: 1 },
    Part { scale: [1.0, 1.0, 1.0], translation: [3.0, -7.0, 0.0], texture_layer: 0 },
    Part { scale: [1.0, 1.0, 1.0], translation: [0.0, -7.0, 3.0], texture_layer: 2 },
    Part { scale: [1.0, 1.0, 1.0], translation: [0.0, -7.0, -3.0], texture_layer: 1 },
];

/// Owner of the shared rotation angle.
///
/// The angle is explicit state with a seed value, never a process-wide
/// global: two animations seeded identically produce identical record
/// sequences, which keeps unrelated runs (and tests) independent.
#[derive(Debug, Clone)]
pub struct SceneAnimation {
    angle: f32,
}

impl SceneAnimation {
    pub fn new(initial_angle: f32) -> Self {
        Self {
            angle: initial_angle,
        }
    }

    /// Current rotation angle in radians. Monotonically increasing.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advance the rotation and emit all 22 instance records.
    ///
    /// Each transform is rotation * translation * scale, so the parts keep
    /// their relative arrangement while the whole structure spins about Y.
    /// Texture layers are fixed per part; only the rotation varies between
    /// calls.
    pub fn populate(&mut self) -> Vec<InstanceRaw> {
        self.angle += ROTATION_STEP;
        let rotation = Matrix4::from_angle_y(Rad(self.angle));
        PARTS
            .iter()
            .map(|part| {
                let model = rotation
                    * Matrix4::from_translation(part.translation.into())
                    * Matrix4::from_nonuniform_scale(
                        part.scale[0],
                        part.scale[1],
                        part.scale[2],
                    );
                InstanceRaw::new(model, part.texture_layer)
            })
            .collect()
    }
}

impl Default for SceneAnimation {
    fn default() -> Self {
        // The reference arrangement starts half a turn in.
        Self::new(std::f32::consts::PI)
    }
}
