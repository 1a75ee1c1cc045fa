//! GPU textures: the depth target and the texture-array builder.
//!
//! The central type here is [`TextureArray`], which packs N independently
//! decoded, same-sized images into the layers of a single GPU texture so the
//! shader can pick a layer per instance. Batch validation happens on the CPU
//! side before any GPU resource is created, so a bad batch never leaks a
//! partially built array.

/// Validation failure for a texture-array source batch.
///
/// Every image of a batch must share the first image's descriptor (size,
/// mip count, pixel format). These are asset-inconsistency errors: fatal for
/// the build, never retried.
#[derive(Debug, thiserror::Error)]
pub enum TextureArrayError {
    #[error("a texture array needs at least one source image")]
    Empty,
    #[error(
        "source image {index} is {got_width}x{got_height}, expected {expected_width}x{expected_height}"
    )]
    DimensionMismatch {
        index: usize,
        got_width: u32,
        got_height: u32,
        expected_width: u32,
        expected_height: u32,
    },
    #[error("source image {index} has {got} mip levels, expected {expected}")]
    MipCountMismatch { index: usize, got: u32, expected: u32 },
    #[error("source image {index} has no mip data")]
    EmptyMipChain { index: usize },
    #[error("format {format:?} cannot be used as a texture-array layer")]
    UnsupportedFormat { format: wgpu::TextureFormat },
    #[error("source image {index} has format {got:?}, expected {expected:?}")]
    FormatMismatch {
        index: usize,
        got: wgpu::TextureFormat,
        expected: wgpu::TextureFormat,
    },
}

/// A decoded image with its full mip chain, not yet on the GPU.
///
/// `mips[0]` is the base level; each following level halves width and height
/// (clamped to 1). All levels are tightly packed rows of 4-byte RGBA texels.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub width: u32,
    pub height: u32,
    pub format: wgpu::TextureFormat,
    pub mips: Vec<Vec<u8>>,
}

impl SourceImage {
    pub fn mip_level_count(&self) -> u32 {
        self.mips.len() as u32
    }
}

/// Number of mip levels of a full chain down to 1x1.
pub fn mip_level_count_for(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Flat initialization-data index of one (layer, mip) subresource.
///
/// The mip level varies fastest within a slice. Consumers of the packed
/// subresource sequence index by exactly this product, so the ordering must
/// not change.
pub fn subresource_index(slice: u32, mip: u32, mip_levels: u32) -> usize {
    (slice * mip_levels + mip) as usize
}

/// Bytes per texel of a format the array builder can upload.
///
/// Only uncompressed colour formats qualify: the row pitch below is
/// `texels * size`, which doesn't hold for block-compressed or combined
/// depth-stencil formats.
fn texel_copy_size(format: wgpu::TextureFormat) -> Option<u32> {
    if format.is_compressed() {
        return None;
    }
    format.block_copy_size(None)
}

/// Check that every image in the batch matches the first image's descriptor.
///
/// Runs entirely on the CPU; callers invoke it before touching the device so
/// a mismatched batch fails fast without creating any GPU resource. Returns
/// the shared descriptor image on success.
pub fn validate_batch(images: &[SourceImage]) -> Result<&SourceImage, TextureArrayError> {
    let first = images.first().ok_or(TextureArrayError::Empty)?;
    if first.mips.is_empty() {
        return Err(TextureArrayError::EmptyMipChain { index: 0 });
    }
    if texel_copy_size(first.format).is_none() {
        return Err(TextureArrayError::UnsupportedFormat {
            format: first.format,
        });
    }
    for (index, image) in images.iter().enumerate().skip(1) {
        if image.width != first.width || image.height != first.height {
            return Err(TextureArrayError::DimensionMismatch {
                index,
                got_width: image.width,
                got_height: image.height,
                expected_width: first.width,
                expected_height: first.height,
            });
        }
        if image.mip_level_count() != first.mip_level_count() {
            return Err(TextureArrayError::MipCountMismatch {
                index,
                got: image.mip_level_count(),
                expected: first.mip_level_count(),
            });
        }
        if image.format != first.format {
            return Err(TextureArrayError::FormatMismatch {
                index,
                got: image.format,
                expected: first.format,
            });
        }
    }
    Ok(first)
}

/// One GPU texture whose array layers hold N same-sized images.
///
/// Built once at startup, immutable afterwards, dropped at teardown. The
/// shader indexes layers by the per-instance texture-layer attribute.
#[derive(Debug)]
pub struct TextureArray {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub layer_count: u32,
}

impl TextureArray {
    /// Pack `images` into the layers of a new array texture.
    ///
    /// Validation happens first; on a mismatched batch no GPU resource is
    /// created. Subresources are uploaded in `slice * mip_levels + mip`
    /// order, one copy per (layer, mip) pair.
    pub fn build(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        images: &[SourceImage],
    ) -> Result<Self, TextureArrayError> {
        let first = validate_batch(images)?;
        let layer_count = images.len() as u32;
        let mip_levels = first.mip_level_count();
        let bytes_per_texel =
            texel_copy_size(first.format).ok_or(TextureArrayError::UnsupportedFormat {
                format: first.format,
            })?;

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("texture array"),
            size: wgpu::Extent3d {
                width: first.width,
                height: first.height,
                depth_or_array_layers: layer_count,
            },
            mip_level_count: mip_levels,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: first.format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        // Assemble the packed subresource sequence, then upload each
        // (layer, mip) slice at its destination index.
        let mut subresources: Vec<&[u8]> =
            vec![&[]; subresource_index(layer_count - 1, mip_levels - 1, mip_levels) + 1];
        for (slice, image) in images.iter().enumerate() {
            for (mip, data) in image.mips.iter().enumerate() {
                subresources[subresource_index(slice as u32, mip as u32, mip_levels)] = data;
            }
        }
        for (index, data) in subresources.into_iter().enumerate() {
            let slice = index as u32 / mip_levels;
            let mip = index as u32 % mip_levels;
            let mip_width = (first.width >> mip).max(1);
            let mip_height = (first.height >> mip).max(1);
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &texture,
                    mip_level: mip,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: slice,
                    },
                },
                data,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_texel * mip_width),
                    rows_per_image: Some(mip_height),
                },
                wgpu::Extent3d {
                    width: mip_width,
                    height: mip_height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            dimension: Some(wgpu::TextureViewDimension::D2Array),
            ..Default::default()
        });
        let sampler = create_default_sampler(device);

        Ok(Self {
            texture,
            view,
            sampler,
            layer_count,
        })
    }

    /// Bind group layout for the texture-array slot: the array view plus a
    /// filtering sampler, both fragment-visible.
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2Array,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
            label: Some("texture_array_bind_group_layout"),
        })
    }

    pub fn bind_group(
        &self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&self.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
            label: Some("texture_array_bind_group"),
        })
    }
}

/// A GPU texture with a view and optional sampler.
///
/// Kept for the depth target; the color path goes through [`TextureArray`].
#[derive(Debug)]
pub struct Texture {
    #[allow(unused)]
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: Option<wgpu::Sampler>,
}

impl Texture {
    /// Standard depth buffer texture format (32-bit float).
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Create a depth texture for depth-testing during rendering.
    ///
    /// The returned texture is suitable for use as a `RENDER_ATTACHMENT` in
    /// render passes. Recreated on every resize.
    pub fn create_depth_texture(device: &wgpu::Device, size: [u32; 2], label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        };
        let desc = wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[Self::DEPTH_FORMAT],
        };
        let texture = device.create_texture(&desc);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = Some(device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            lod_min_clamp: 0.0,
            lod_max_clamp: 100.0,
            ..Default::default()
        }));

        Self {
            texture,
            view,
            sampler,
        }
    }
}

pub fn create_default_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}
