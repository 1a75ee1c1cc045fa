use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::time::Duration;

use cgmath::{InnerSpace, Vector3, Vector4};
use grid_ngin::camera::{
    CameraController, MAX_DISTANCE, MIN_DISTANCE, OrbitCamera, PITCH_LIMIT, Projection, ViewPreset,
};
use winit::event::MouseScrollDelta;

const EPS: f32 = 1e-5;

fn update(controller: &mut CameraController, camera: &mut OrbitCamera) {
    controller.update_camera(camera, Duration::from_millis(16));
}

#[test]
fn scroll_zooms_toward_target() {
    let mut camera = OrbitCamera::default();
    let mut controller = CameraController::default();
    camera.distance = 20.0;

    controller.process_scroll(&MouseScrollDelta::LineDelta(0.0, 5.0));
    update(&mut controller, &mut camera);

    // 20 - 5 * 2.0, well inside the clamp range
    assert!((camera.distance - 10.0).abs() < EPS);
}

#[test]
fn distance_is_clamped_to_range() {
    let mut camera = OrbitCamera::default();
    let mut controller = CameraController::default();

    controller.process_scroll(&MouseScrollDelta::LineDelta(0.0, 1000.0));
    update(&mut controller, &mut camera);
    assert_eq!(camera.distance, MIN_DISTANCE);

    controller.process_scroll(&MouseScrollDelta::LineDelta(0.0, -1000.0));
    update(&mut controller, &mut camera);
    assert_eq!(camera.distance, MAX_DISTANCE);
}

#[test]
fn pitch_is_clamped_every_update() {
    let mut camera = OrbitCamera::default();
    let mut controller = CameraController::default();

    camera.pitch = 3.0;
    update(&mut controller, &mut camera);
    assert_eq!(camera.pitch, PITCH_LIMIT);

    camera.pitch = -3.0;
    update(&mut controller, &mut camera);
    assert_eq!(camera.pitch, -PITCH_LIMIT);
}

#[test]
fn drag_turns_yaw_but_never_pitch() {
    let mut camera = OrbitCamera::default();
    let mut controller = CameraController::default();

    controller.dragging = true;
    controller.process_mouse(10.0, 25.0);
    update(&mut controller, &mut camera);

    // sensitivity 0.005; the vertical delta is deliberately ignored
    assert!((camera.yaw - 0.05).abs() < EPS);
    assert_eq!(camera.pitch, 0.0);
}

#[test]
fn drag_is_ignored_while_button_released() {
    let mut camera = OrbitCamera::default();
    let mut controller = CameraController::default();

    controller.process_mouse(100.0, 0.0);
    update(&mut controller, &mut camera);

    assert_eq!(camera.yaw, 0.0);
}

#[test]
fn front_preset_resets_orientation_exactly() {
    let mut camera = OrbitCamera::default();
    camera.yaw = 1.234;
    camera.pitch = 0.567;

    camera.apply_preset(ViewPreset::Front);

    assert_eq!(camera.yaw, 0.0);
    assert_eq!(camera.pitch, 0.0);
}

#[test]
fn presets_assign_expected_angles() {
    assert_eq!(ViewPreset::Front.angles(), (0.0, 0.0));
    assert_eq!(ViewPreset::Back.angles(), (PI, 0.0));
    assert_eq!(ViewPreset::Left.angles(), (-FRAC_PI_2, 0.0));
    assert_eq!(ViewPreset::Right.angles(), (FRAC_PI_2, 0.0));
    assert_eq!(ViewPreset::Up.angles(), (0.0, FRAC_PI_2));
    assert_eq!(ViewPreset::Down.angles(), (0.0, -FRAC_PI_2));
    assert_eq!(ViewPreset::FrontRight.angles(), (FRAC_PI_4, FRAC_PI_4));
    assert_eq!(ViewPreset::BottomLeft.angles(), (-FRAC_PI_4, -FRAC_PI_4));
}

#[test]
fn straight_down_preset_settles_inside_pitch_limit() {
    let mut camera = OrbitCamera::default();
    let mut controller = CameraController::default();

    controller.set_preset(ViewPreset::Down);
    update(&mut controller, &mut camera);

    // the preset assigns -pi/2 directly; the next update re-clamps
    assert_eq!(camera.pitch, -PITCH_LIMIT);
}

#[test]
fn view_basis_is_orthonormal() {
    let mut camera = OrbitCamera::default();
    camera.yaw = 0.7;
    camera.pitch = 0.3;

    let (right, up, forward) = camera.basis();

    assert!((right.magnitude() - 1.0).abs() < EPS);
    assert!((up.magnitude() - 1.0).abs() < EPS);
    assert!((forward.magnitude() - 1.0).abs() < EPS);
    assert!(right.dot(up).abs() < EPS);
    assert!(right.dot(forward).abs() < EPS);
    assert!(up.dot(forward).abs() < EPS);

    // forward points from the eye towards the target
    let expected = (camera.target - camera.position()).normalize();
    assert!((forward - expected).magnitude() < EPS);
}

#[test]
fn view_matrix_maps_eye_to_origin() {
    let mut camera = OrbitCamera::default();
    camera.yaw = -1.1;
    camera.pitch = 0.4;

    let eye = camera.position();
    let mapped = camera.view_matrix() * Vector4::new(eye.x, eye.y, eye.z, 1.0);

    assert!(mapped.truncate().magnitude() < 1e-3);
    assert!((mapped.w - 1.0).abs() < EPS);
}

#[test]
fn view_matrix_puts_target_ahead_on_positive_z() {
    let mut camera = OrbitCamera::default();
    camera.yaw = 0.9;
    camera.pitch = -0.2;
    camera.distance = 15.0;

    let t = camera.target;
    let mapped = camera.view_matrix() * Vector4::new(t.x, t.y, t.z, 1.0);

    // the target sits straight ahead, one orbit radius away
    assert!(mapped.x.abs() < 1e-3);
    assert!(mapped.y.abs() < 1e-3);
    assert!((mapped.z - camera.distance).abs() < 1e-3);
}

#[test]
fn pan_moves_target_along_camera_axes() {
    // yaw 0, pitch 0: the camera sits at target + (0, 0, distance), so its
    // up axis is world up and its right axis is -X.
    let mut camera = OrbitCamera::new([0.0, -4.0, 0.0], 20.0);
    let mut controller = CameraController::default();

    controller.pan(true, false, false, false);
    controller.update_camera(&mut camera, Duration::from_secs(1));
    assert!((camera.target - Vector3::new(0.0, 1.0, 0.0)).magnitude() < EPS);

    controller.pan(false, false, false, true);
    controller.update_camera(&mut camera, Duration::from_secs(1));
    assert!((camera.target - Vector3::new(-5.0, 1.0, 0.0)).magnitude() < EPS);
}

#[test]
fn projection_maps_near_and_far_to_unit_depth() {
    let projection = Projection::new(800, 600, FRAC_PI_4, 0.1, 100.0);
    let m = projection.matrix();

    let near = m * Vector4::new(0.0, 0.0, 0.1, 1.0);
    assert!((near.z / near.w).abs() < EPS);

    let far = m * Vector4::new(0.0, 0.0, 100.0, 1.0);
    assert!((far.z / far.w - 1.0).abs() < EPS);
}
