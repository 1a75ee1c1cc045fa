use grid_ngin::data_structures::texture::{
    TextureArrayError, mip_level_count_for, subresource_index, validate_batch,
};

use crate::common::test_utils::solid_image;

mod common;

#[test]
fn subresource_ordering_is_mip_fastest() {
    // consumers index the packed sequence by slice * mip_levels + mip
    let mip_levels = 4;
    assert_eq!(subresource_index(0, 0, mip_levels), 0);
    assert_eq!(subresource_index(0, 3, mip_levels), 3);
    assert_eq!(subresource_index(1, 0, mip_levels), 4);
    assert_eq!(subresource_index(2, 1, mip_levels), 9);

    let mut seen = Vec::new();
    for slice in 0..3 {
        for mip in 0..mip_levels {
            seen.push(subresource_index(slice, mip, mip_levels));
        }
    }
    assert_eq!(seen, (0..12).collect::<Vec<_>>());
}

#[test]
fn full_mip_chain_reaches_one_by_one() {
    assert_eq!(mip_level_count_for(1, 1), 1);
    assert_eq!(mip_level_count_for(2, 2), 2);
    assert_eq!(mip_level_count_for(256, 256), 9);
    assert_eq!(mip_level_count_for(256, 64), 9);
    assert_eq!(mip_level_count_for(320, 200), 9);
}

#[test]
fn uniform_batch_validates() {
    let images: Vec<_> = (0..4).map(|_| solid_image(64, 64, 7)).collect();
    let first = validate_batch(&images).expect("uniform batch must validate");
    assert_eq!(first.width, 64);
    assert_eq!(first.mip_level_count(), 7);
}

#[test]
fn empty_batch_is_rejected() {
    assert!(matches!(validate_batch(&[]), Err(TextureArrayError::Empty)));
}

#[test]
fn mismatched_dimensions_fail_before_any_gpu_work() {
    let mut images: Vec<_> = (0..4).map(|_| solid_image(64, 64, 7)).collect();
    images[2] = solid_image(32, 64, 7);

    // validate_batch is pure CPU code; reaching the error proves no GPU
    // resource was created for the bad batch
    match validate_batch(&images) {
        Err(TextureArrayError::DimensionMismatch {
            index,
            got_width,
            expected_width,
            ..
        }) => {
            assert_eq!(index, 2);
            assert_eq!(got_width, 32);
            assert_eq!(expected_width, 64);
        }
        other => panic!("expected DimensionMismatch, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn mismatched_mip_counts_are_rejected() {
    let mut images: Vec<_> = (0..3).map(|_| solid_image(64, 64, 7)).collect();
    images[1] = solid_image(64, 64, 1);

    assert!(matches!(
        validate_batch(&images),
        Err(TextureArrayError::MipCountMismatch {
            index: 1,
            got: 1,
            expected: 7
        })
    ));
}

#[test]
fn empty_mip_chains_are_rejected() {
    // A zero-level batch must fail validation, not reach texture creation
    // with a zero mip count.
    let images: Vec<_> = (0..2).map(|_| solid_image(64, 64, 0)).collect();
    assert!(matches!(
        validate_batch(&images),
        Err(TextureArrayError::EmptyMipChain { index: 0 })
    ));
}

#[test]
fn compressed_formats_are_rejected() {
    let mut images: Vec<_> = (0..2).map(|_| solid_image(64, 64, 7)).collect();
    for image in &mut images {
        image.format = wgpu::TextureFormat::Bc1RgbaUnormSrgb;
    }
    assert!(matches!(
        validate_batch(&images),
        Err(TextureArrayError::UnsupportedFormat { .. })
    ));
}

#[test]
fn mismatched_formats_are_rejected() {
    let mut images: Vec<_> = (0..2).map(|_| solid_image(64, 64, 7)).collect();
    images[1].format = wgpu::TextureFormat::Rgba8Unorm;

    assert!(matches!(
        validate_batch(&images),
        Err(TextureArrayError::FormatMismatch { index: 1, .. })
    ));
}
