//! Per-instance data for GPU rendering.
//!
//! Every cube in the lattice is one instance of the shared cube mesh. The
//! per-instance record carries a full 4x4 transform plus the texture-array
//! layer that decorates the piece, packed into the second vertex-input stream.

use crate::data_structures::cube::Vertex;

/// The raw per-instance record as it is stored in the GPU instance buffer.
///
/// Layout is load-bearing: four `vec4` columns of the transform at shader
/// locations 2-5, followed by the texture-layer index at location 6. The
/// layer is a float-encoded integer because vertex attributes of the
/// instance stream are fetched as floats.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub texture_layer: f32,
}

impl InstanceRaw {
    pub fn new(model: cgmath::Matrix4<f32>, texture_layer: u32) -> Self {
        Self {
            model: model.into(),
            texture_layer: texture_layer as f32,
        }
    }
}

impl Vertex for InstanceRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            // Advance once per instance, not once per vertex. The shader only
            // moves to the next record when it starts a new cube.
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                // A mat4 takes up four vertex slots, one per vec4 column.
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 16]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}
