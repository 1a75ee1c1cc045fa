use grid_ngin::data_structures::texture::validate_batch;
use grid_ngin::render::draw_command;
use grid_ngin::scene::{MAX_GRID_SIZE, MAX_INSTANCES, PART_COUNT, SceneAnimation};

use crate::common::test_utils::solid_image;

mod common;

#[test]
fn one_draw_covers_the_whole_lattice() {
    for grid_size in 1..=MAX_GRID_SIZE {
        let command = draw_command(grid_size);
        assert_eq!(command.index_count, 36);
        assert_eq!(command.instance_count, grid_size.pow(3));
    }
}

#[test]
fn grid_size_is_clamped_not_rejected() {
    assert_eq!(draw_command(0), draw_command(1));
    assert_eq!(draw_command(100).instance_count, MAX_INSTANCES);
}

#[test]
fn four_layer_scene_end_to_end() {
    // Four equal-sized sources make a valid 4-layer batch...
    let images: Vec<_> = (0..4).map(|_| solid_image(128, 128, 8)).collect();
    let first = validate_batch(&images).expect("four equal images must validate");
    assert_eq!(first.width, 128);

    // ...every authored record selects one of those four layers...
    let mut anim = SceneAnimation::default();
    let records = anim.populate();
    assert_eq!(records.len(), PART_COUNT);
    for record in &records {
        assert!((record.texture_layer as u32) < images.len() as u32);
    }

    // ...and the smallest lattice draws exactly one instance.
    assert_eq!(draw_command(1).instance_count, 1);
}
