//! Image-file decoding into texture-array sources.
//!
//! This is the asset-side half of the texture pipeline: decode an image file
//! to RGBA8, build the full mip chain on the CPU, and hand the result to
//! [`TextureArray::build`] as a [`SourceImage`].

use image::ImageFormat;

use crate::data_structures::texture::{
    SourceImage, TextureArray, mip_level_count_for,
};

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> reqwest::Url {
    let window = web_sys::window().unwrap();
    let location = window.location();
    let mut origin = location.origin().unwrap();
    if !origin.ends_with("assets") {
        origin = format!("{}/assets", origin);
    }
    let base = reqwest::Url::parse(&format!("{}/", origin,)).unwrap();
    base.join(file_name).unwrap()
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(file_name);
        reqwest::get(url).await?.bytes().await?.to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    // TODO: use tokio::fs once the loader becomes IO-bound
    let data = {
        let path = std::path::Path::new("./").join("assets").join(file_name);
        std::fs::read(path)?
    };

    Ok(data)
}

/// Box-filter the base image down to one mip level's dimensions.
fn downsample(base: &image::RgbaImage, level: u32) -> Vec<u8> {
    let (width, height) = base.dimensions();
    let mip_width = (width >> level).max(1);
    let mip_height = (height >> level).max(1);
    image::imageops::resize(
        base,
        mip_width,
        mip_height,
        image::imageops::FilterType::Triangle,
    )
    .into_raw()
}

/// Full mip chain for an RGBA8 image, base level first.
pub(crate) fn build_mip_chain(base: image::RgbaImage) -> Vec<Vec<u8>> {
    let (width, height) = base.dimensions();
    let levels = mip_level_count_for(width, height);
    let mut mips = Vec::with_capacity(levels as usize);
    for level in 1..levels {
        mips.push(downsample(&base, level));
    }
    let mut chain = vec![base.into_raw()];
    chain.append(&mut mips);
    chain
}

/// Decode one image file into a texture-array source.
///
/// `format` is an optional file format hint (e.g., "png"); if None the
/// format is auto-detected. Colour data is treated as sRGB.
pub async fn load_source_image(
    file_name: &str,
    format: Option<&str>,
) -> anyhow::Result<SourceImage> {
    let data = load_binary(file_name).await?;
    let img = match format {
        None => image::load_from_memory(&data)?,
        Some(fmt) => {
            let format = ImageFormat::from_extension(fmt)
                .ok_or_else(|| anyhow::anyhow!("unknown image format hint: {fmt}"))?;
            image::load_from_memory_with_format(&data, format)?
        }
    };
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(SourceImage {
        width,
        height,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        mips: build_mip_chain(rgba),
    })
}

/// Load a batch of image files and pack them into one texture array.
///
/// All files must decode to the same dimensions; a mismatched batch fails
/// before any GPU resource is created.
pub async fn load_texture_array(
    file_names: &[impl AsRef<str>],
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<TextureArray> {
    let mut images = Vec::with_capacity(file_names.len());
    for file_name in file_names {
        images.push(load_source_image(file_name.as_ref(), None).await?);
    }
    let array = TextureArray::build(device, queue, &images)?;
    log::info!(
        "loaded texture array: {} layers, {} mip levels",
        array.layer_count,
        images[0].mip_level_count()
    );
    Ok(array)
}
