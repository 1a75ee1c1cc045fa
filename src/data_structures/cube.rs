//! Textured cube geometry for the per-vertex input stream.
//!
//! The whole lattice is a single cube mesh drawn many times via instancing,
//! so this is the only geometry the engine ships. Vertices carry position and
//! texture coordinates; the per-instance stream (see
//! [`crate::data_structures::instance`]) supplies everything else.

use wgpu::util::DeviceExt;

/// Types that describe their own GPU vertex buffer layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// One corner of the cube: position + texture coordinates.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex for CubeVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<CubeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Number of indices of the cube mesh. Every frame issues exactly one indexed
/// draw over this many indices.
pub const INDEX_COUNT: u32 = 36;

// 24 vertices: each face gets its own four corners so texture coordinates
// don't bleed across edges. The cube spans -1..1 on all axes.
pub const VERTICES: [CubeVertex; 24] = [
    // -Z face
    CubeVertex { position: [-1.0, -1.0, -1.0], tex_coords: [0.0, 1.0] },
    CubeVertex { position: [-1.0, 1.0, -1.0], tex_coords: [0.0, 0.0] },
    CubeVertex { position: [1.0, 1.0, -1.0], tex_coords: [1.0, 0.0] },
    CubeVertex { position: [1.0, -1.0, -1.0], tex_coords: [1.0, 1.0] },
    // -Y face
    CubeVertex { position: [-1.0, -1.0, -1.0], tex_coords: [0.0, 1.0] },
    CubeVertex { position: [-1.0, -1.0, 1.0], tex_coords: [0.0, 0.0] },
    CubeVertex { position: [1.0, -1.0, 1.0], tex_coords: [1.0, 0.0] },
    CubeVertex { position: [1.0, -1.0, -1.0], tex_coords: [1.0, 1.0] },
    // +X face
    CubeVertex { position: [1.0, -1.0, -1.0], tex_coords: [0.0, 1.0] },
    CubeVertex { position: [1.0, -1.0, 1.0], tex_coords: [1.0, 1.0] },
    CubeVertex { position: [1.0, 1.0, 1.0], tex_coords: [1.0, 0.0] },
    CubeVertex { position: [1.0, 1.0, -1.0], tex_coords: [0.0, 0.0] },
    // +Y face
    CubeVertex { position: [1.0, 1.0, -1.0], tex_coords: [0.0, 1.0] },
    CubeVertex { position: [1.0, 1.0, 1.0], tex_coords: [0.0, 0.0] },
    CubeVertex { position: [-1.0, 1.0, 1.0], tex_coords: [1.0, 0.0] },
    CubeVertex { position: [-1.0, 1.0, -1.0], tex_coords: [1.0, 1.0] },
    // -X face
    CubeVertex { position: [-1.0, 1.0, -1.0], tex_coords: [1.0, 0.0] },
    CubeVertex { position: [-1.0, 1.0, 1.0], tex_coords: [0.0, 0.0] },
    CubeVertex { position: [-1.0, -1.0, 1.0], tex_coords: [0.0, 1.0] },
    CubeVertex { position: [-1.0, -1.0, -1.0], tex_coords: [1.0, 1.0] },
    // +Z face
    CubeVertex { position: [-1.0, -1.0, 1.0], tex_coords: [1.0, 1.0] },
    CubeVertex { position: [1.0, -1.0, 1.0], tex_coords: [0.0, 1.0] },
    CubeVertex { position: [1.0, 1.0, 1.0], tex_coords: [0.0, 0.0] },
    CubeVertex { position: [-1.0, 1.0, 1.0], tex_coords: [1.0, 0.0] },
];

pub const INDICES: [u32; INDEX_COUNT as usize] = [
    2, 0, 1, 2, 3, 0, // -Z
    4, 6, 5, 4, 7, 6, // -Y
    8, 10, 9, 8, 11, 10, // +X
    12, 14, 13, 12, 15, 14, // +Y
    16, 18, 17, 16, 19, 18, // -X
    20, 21, 22, 20, 22, 23, // +Z
];

pub fn create_vertex_buffer(device: &wgpu::Device) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Cube Vertex Buffer"),
        contents: bytemuck::cast_slice(&VERTICES),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

pub fn create_index_buffer(device: &wgpu::Device) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Cube Index Buffer"),
        contents: bytemuck::cast_slice(&INDICES),
        usage: wgpu::BufferUsages::INDEX,
    })
}
