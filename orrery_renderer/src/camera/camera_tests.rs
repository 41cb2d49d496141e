use super::*;
use glam::{Mat4, Vec3, Vec4};

fn assert_mat4_close(a: Mat4, b: Mat4) {
    for (ca, cb) in a
        .to_cols_array()
        .iter()
        .zip(b.to_cols_array().iter())
    {
        assert!((ca - cb).abs() < 1e-5, "matrices differ: {:?} vs {:?}", a, b);
    }
}

#[test]
fn test_identity_camera() {
    let camera = CameraBlock::identity();
    assert_eq!(camera.view, Mat4::IDENTITY);
    assert_eq!(camera.proj, Mat4::IDENTITY);
    assert_eq!(camera.view_inv, Mat4::IDENTITY);
    assert_eq!(camera.proj_inv, Mat4::IDENTITY);
}

#[test]
fn test_inverses_computed() {
    let view = Mat4::look_at_rh(
        Vec3::new(0.0, 2.0, 5.0),
        Vec3::ZERO,
        Vec3::Y,
    );
    let proj = Mat4::perspective_rh(
        45.0_f32.to_radians(),
        16.0 / 9.0,
        0.1,
        100.0,
    );
    let camera = CameraBlock::from_view_proj(view, proj);

    assert_mat4_close(camera.view * camera.view_inv, Mat4::IDENTITY);
    assert_mat4_close(camera.proj * camera.proj_inv, Mat4::IDENTITY);
}

#[test]
fn test_view_inverse_recovers_eye() {
    let eye = Vec3::new(3.0, 1.0, -4.0);
    let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
    let camera = CameraBlock::from_view_proj(view, Mat4::IDENTITY);

    // The view inverse maps the view-space origin back to the eye position
    let origin = camera.view_inv * Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!((origin.truncate() - eye).length() < 1e-4);
}

#[test]
fn test_pod_layout() {
    // Four column-major 4x4 f32 matrices, no padding
    assert_eq!(std::mem::size_of::<CameraBlock>(), 4 * 64);

    let camera = CameraBlock::identity();
    let bytes: &[u8] = bytemuck::bytes_of(&camera);
    assert_eq!(bytes.len(), 256);
}
