use grid_ngin::data_structures::texture::SourceImage;

/// Solid-colour RGBA8 source with a mip chain of the given depth.
///
/// The pixel contents don't matter for batch validation; only the
/// descriptor (dimensions, mip count, format) does.
pub fn solid_image(width: u32, height: u32, mip_levels: u32) -> SourceImage {
    let mips = (0..mip_levels)
        .map(|level| {
            let mip_width = (width >> level).max(1) as usize;
            let mip_height = (height >> level).max(1) as usize;
            vec![0x7f; mip_width * mip_height * 4]
        })
        .collect();
    SourceImage {
        width,
        height,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        mips,
    }
}
