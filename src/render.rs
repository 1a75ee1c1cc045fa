//! Per-frame rendering: one instanced draw over the cube lattice.
//!
//! [`GridRenderer`] owns every GPU resource the draw needs: the pipeline,
//! the cube vertex/index buffers, the fixed-capacity instance buffer, the
//! two-matrix uniform buffer and both bind groups. Each frame it refreshes
//! the instance buffer, rewrites the uniforms, and issues a single indexed
//! instanced draw.

use std::iter;

use cgmath::Matrix4;

use crate::{
    camera::{FrameUniforms, OrbitCamera, Projection},
    context::Context,
    data_structures::{cube, instance::InstanceRaw, texture::TextureArray},
    pipelines,
    scene::{MAX_GRID_SIZE, MAX_INSTANCES, SceneAnimation},
};

/// Parameters of the frame's single indexed instanced draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    pub index_count: u32,
    pub instance_count: u32,
}

/// The draw issued for a lattice of the given edge length.
///
/// The instance count is the full `grid_size^3` even though the scene only
/// authors 22 records per frame; the instance buffer's fixed capacity covers
/// the maximum, so the surplus instances fetch zero-initialized (degenerate)
/// transforms and contribute nothing visible. Grid sizes outside [1, 32] are
/// clamped, never an error.
pub fn draw_command(grid_size: u32) -> DrawCommand {
    let grid_size = grid_size.clamp(1, MAX_GRID_SIZE);
    DrawCommand {
        index_count: cube::INDEX_COUNT,
        instance_count: grid_size * grid_size * grid_size,
    }
}

/// Clear-colour conversion for surfaces without hardware sRGB conversion.
pub(crate) fn linear_to_srgb(colour: wgpu::Color) -> wgpu::Color {
    fn convert(channel: f64) -> f64 {
        if channel <= 0.0031308 {
            channel * 12.92
        } else {
            1.055 * channel.powf(1.0 / 2.4) - 0.055
        }
    }
    wgpu::Color {
        r: convert(colour.r),
        g: convert(colour.g),
        b: convert(colour.b),
        a: colour.a,
    }
}

#[derive(Debug)]
pub struct GridRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    scene: SceneAnimation,
    grid_size: u32,
    convert_output_to_gamma: bool,
}

impl GridRenderer {
    pub fn new(ctx: &Context, texture_array: &TextureArray) -> Self {
        let device = &ctx.device;

        let frame_layout = pipelines::cube::frame_uniform_layout(device);
        let texture_layout = TextureArray::bind_group_layout(device);
        let pipeline =
            pipelines::cube::mk_cube_pipeline(device, &ctx.config, &frame_layout, &texture_layout);

        let vertex_buffer = cube::create_vertex_buffer(device);
        let index_buffer = cube::create_index_buffer(device);

        // Fixed capacity for the worst-case lattice; only written, never
        // reallocated. wgpu zero-initializes it, which is what the surplus
        // instances of large grids read.
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: MAX_INSTANCES as u64 * std::mem::size_of::<InstanceRaw>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniform Buffer"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_bind_group =
            pipelines::cube::frame_uniform_bind_group(device, &frame_layout, &uniform_buffer);
        let texture_bind_group = texture_array.bind_group(device, &texture_layout);

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            uniform_buffer,
            frame_bind_group,
            texture_bind_group,
            scene: SceneAnimation::default(),
            grid_size: 1,
            convert_output_to_gamma: !ctx.config.format.is_srgb(),
        }
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Set the lattice edge length, silently clamped to [1, 32].
    pub fn set_grid_size(&mut self, grid_size: u32) {
        self.grid_size = grid_size.clamp(1, MAX_GRID_SIZE);
    }

    /// Render one frame.
    ///
    /// Order matters: the instance and uniform buffers are fully rewritten
    /// before any of them is bound for the draw, and the uniform write goes
    /// through a scoped staging view that is released at the end of its
    /// block.
    pub fn render(
        &mut self,
        ctx: &Context,
        camera: &OrbitCamera,
        projection: &Projection,
        surface_pretransform: Matrix4<f32>,
    ) -> Result<(), wgpu::SurfaceError> {
        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Refresh the instance records; full-buffer overwrite, no partial
        // updates.
        let instances = self.scene.populate();
        ctx.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));

        {
            // Scoped write of the frame constants. The staging view must be
            // dropped before the buffer is referenced by the draw below.
            let uniforms = FrameUniforms::new(camera, projection, surface_pretransform);
            let size = wgpu::BufferSize::new(std::mem::size_of::<FrameUniforms>() as u64)
                .expect("frame uniforms are never zero-sized");
            let mut staging = ctx
                .queue
                .write_buffer_with(&self.uniform_buffer, 0, size)
                .expect("uniform buffer write must fit its own size");
            staging.copy_from_slice(bytemuck::bytes_of(&uniforms));
        }

        let clear_colour = if self.convert_output_to_gamma {
            linear_to_srgb(ctx.clear_colour)
        } else {
            ctx.clear_colour
        };

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
            render_pass.set_bind_group(1, &self.texture_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

            let command = draw_command(self.grid_size);
            render_pass.draw_indexed(0..command.index_count, 0, 0..command.instance_count);
        }

        ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
