//! Integration tests for the Vulkan offscreen renderer
//!
//! All tests require a GPU and are marked with #[ignore]. They also need
//! compiled SPIR-V for the two pipeline stages, supplied via the
//! ORRERY_VERT_SPV and ORRERY_FRAG_SPV environment variables.
//!
//! Run with: cargo test --test offscreen_renderer_tests -- --ignored

use orrery_renderer::glam::{Mat4, Vec3, Vec4};
use orrery_renderer::graphics::{BufferRegion, GpuBuffer};
use orrery_renderer::scene::{Material, PrimId, Primitive};
use orrery_renderer::Error;
use orrery_renderer_vulkan::{Buffer, ContextConfig, OffscreenRenderer, OffscreenRendererDesc};
use std::sync::Arc;

fn load_shader(var: &str) -> Vec<u8> {
    let path = std::env::var(var)
        .unwrap_or_else(|_| panic!("{} must point to a compiled SPIR-V file", var));
    std::fs::read(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e))
}

fn test_renderer() -> OffscreenRenderer {
    OffscreenRenderer::new(OffscreenRendererDesc {
        context: ContextConfig {
            app_name: "Orrery Test".to_string(),
            enable_validation: false,
        },
        vertex_shader: load_shader("ORRERY_VERT_SPV"),
        fragment_shader: load_shader("ORRERY_FRAG_SPV"),
    })
    .unwrap()
}

fn whole_region(buffer: &Arc<Buffer>) -> BufferRegion {
    let buffer: Arc<dyn GpuBuffer> = buffer.clone();
    BufferRegion::whole(buffer)
}

/// Single triangle: 3 positions, 3 normals, 3 indices
fn upload_triangle(renderer: &OffscreenRenderer) -> Primitive {
    let positions: [f32; 9] = [
        -0.5, -0.5, 0.0, //
        0.5, -0.5, 0.0, //
        0.0, 0.5, 0.0,
    ];
    let normals: [f32; 9] = [
        0.0, 0.0, 1.0, //
        0.0, 0.0, 1.0, //
        0.0, 0.0, 1.0,
    ];
    let indices: [u32; 3] = [0, 1, 2];

    let vertex_buffer = renderer.create_vertex_buffer(72).unwrap();
    vertex_buffer
        .write(0, bytemuck::cast_slice(&positions))
        .unwrap();
    vertex_buffer
        .write(36, bytemuck::cast_slice(&normals))
        .unwrap();

    let index_buffer = renderer.create_index_buffer(12).unwrap();
    index_buffer
        .write(0, bytemuck::cast_slice(&indices))
        .unwrap();

    let vertex_buffer: Arc<dyn GpuBuffer> = vertex_buffer;
    let index_buffer: Arc<dyn GpuBuffer> = index_buffer;
    Primitive {
        vertex_region: BufferRegion::whole(vertex_buffer),
        index_region: BufferRegion::whole(index_buffer),
        attr_offsets: [0, 36],
        index_count: 3,
    }
}

// ============================================================================
// CONTEXT TESTS
// ============================================================================

#[test]
#[ignore] // Requires GPU
fn test_renderer_init_and_teardown() {
    let renderer = test_renderer();
    assert_eq!(renderer.viewport_size(), (0, 0));
    drop(renderer);
}

#[test]
#[ignore] // Requires GPU
fn test_viewport_init() {
    let mut renderer = test_renderer();
    renderer.init_viewport(640, 480).unwrap();
    assert_eq!(renderer.viewport_size(), (640, 480));
    assert_eq!(renderer.frame_byte_size(), 640 * 480 * 4);
}

#[test]
#[ignore] // Requires GPU
fn test_viewport_rejects_zero_size() {
    let mut renderer = test_renderer();
    assert!(matches!(
        renderer.init_viewport(0, 480),
        Err(Error::InvalidResource(_))
    ));
}

// ============================================================================
// SCENE TESTS (mapped uniform memory)
// ============================================================================

#[test]
#[ignore] // Requires GPU
fn test_scene_round_trip_through_mapped_memory() {
    let mut renderer = test_renderer();

    let prim = upload_triangle(&renderer);
    let material = Material::new(Vec4::new(0.2, 0.4, 0.6, 1.0));
    let transform = Mat4::from_translation(Vec3::new(1.0, 0.0, -2.0));

    let id = renderer.register(prim, material, transform).unwrap();
    assert_eq!(id, PrimId(0));

    let scene = renderer.scene().unwrap();
    assert_eq!(scene.material(id).unwrap(), material);
    assert_eq!(scene.transform(id).unwrap(), transform);

    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y);
    let proj = Mat4::perspective_rh(1.0, 1.0, 0.1, 10.0);
    renderer.update_camera(view, proj).unwrap();

    let camera = renderer.scene().unwrap().camera();
    assert_eq!(camera.view, view);
    assert_eq!(camera.view_inv, view.inverse());
}

// ============================================================================
// FRAME TESTS
// ============================================================================

#[test]
#[ignore] // Requires GPU
fn test_empty_scene_renders_clear_color() {
    let mut renderer = test_renderer();
    renderer.init_viewport(64, 64).unwrap();

    let readback = renderer
        .create_readback_buffer(renderer.frame_byte_size())
        .unwrap();
    let region = whole_region(&readback);

    renderer.record_frame(&region).unwrap();
    renderer.render().unwrap();

    let mut pixels = vec![0u8; 64 * 64 * 4];
    readback.read(0, &mut pixels).unwrap();

    // Every pixel is the dark green clear color: tiny RGB, opaque alpha
    for pixel in pixels.chunks_exact(4) {
        assert!(
            pixel[0] < 8 && pixel[1] < 16 && pixel[2] < 8,
            "unexpected pixel {:?}",
            pixel
        );
        assert_eq!(pixel[3], 255);
    }
}

#[test]
#[ignore] // Requires GPU
fn test_triangle_changes_pixels() {
    let mut renderer = test_renderer();
    renderer.init_viewport(128, 128).unwrap();

    let prim = upload_triangle(&renderer);
    renderer
        .register(
            prim,
            Material::new(Vec4::new(1.0, 0.0, 0.0, 1.0)),
            Mat4::IDENTITY,
        )
        .unwrap();
    renderer
        .update_camera(Mat4::IDENTITY, Mat4::IDENTITY)
        .unwrap();

    let readback = renderer
        .create_readback_buffer(renderer.frame_byte_size())
        .unwrap();
    let region = whole_region(&readback);

    renderer.record_frame(&region).unwrap();
    renderer.render().unwrap();

    let mut pixels = vec![0u8; 128 * 128 * 4];
    readback.read(0, &mut pixels).unwrap();

    // At least one pixel differs from the clear color
    let touched = pixels.chunks_exact(4).any(|p| p[0] > 64);
    assert!(touched, "triangle left no trace in the readback image");
}

#[test]
#[ignore] // Requires GPU
fn test_record_frame_rejects_undersized_readback() {
    let mut renderer = test_renderer();
    renderer.init_viewport(64, 64).unwrap();

    // Half the bytes one frame needs
    let small = renderer
        .create_readback_buffer(renderer.frame_byte_size() / 2)
        .unwrap();
    let region = whole_region(&small);

    assert!(matches!(
        renderer.record_frame(&region),
        Err(Error::InvalidResource(_))
    ));
}

#[test]
#[ignore] // Requires GPU
fn test_render_without_recorded_frame_fails() {
    let mut renderer = test_renderer();
    renderer.init_viewport(64, 64).unwrap();
    assert!(renderer.render().is_err());
}

// ============================================================================
// RESIZE TESTS
// ============================================================================

#[test]
#[ignore] // Requires GPU
fn test_resize_viewport_re_records_and_renders() {
    let mut renderer = test_renderer();
    renderer.init_viewport(32, 32).unwrap();

    let prim = upload_triangle(&renderer);
    let material = Material::new(Vec4::new(0.9, 0.1, 0.1, 1.0));
    let id = renderer.register(prim, material, Mat4::IDENTITY).unwrap();

    let readback = renderer
        .create_readback_buffer(renderer.frame_byte_size())
        .unwrap();
    let region = whole_region(&readback);
    renderer.record_frame(&region).unwrap();
    renderer.render().unwrap();
    drop(region);
    drop(readback);

    // Grow the viewport; resize_viewport re-records into the new buffer
    let readback = renderer.create_readback_buffer(64 * 64 * 4).unwrap();
    let region = whole_region(&readback);
    renderer.resize_viewport(64, 64, &region).unwrap();
    assert_eq!(renderer.viewport_size(), (64, 64));

    // Resize rebuilt the targets but left the scene untouched
    let scene = renderer.scene().unwrap();
    assert_eq!(scene.prim_count(), 1);
    assert_eq!(scene.material(id).unwrap(), material);

    renderer.render().unwrap();

    let mut pixels = vec![0u8; 64 * 64 * 4];
    readback.read(0, &mut pixels).unwrap();
    assert!(pixels.chunks_exact(4).all(|p| p[3] == 255));
}

#[test]
#[ignore] // Requires GPU
fn test_release_targets_requires_reinit() {
    let mut renderer = test_renderer();
    renderer.init_viewport(64, 64).unwrap();

    let readback = renderer
        .create_readback_buffer(renderer.frame_byte_size())
        .unwrap();
    let region = whole_region(&readback);

    renderer.release_targets();
    assert!(matches!(
        renderer.record_frame(&region),
        Err(Error::InitializationFailed(_))
    ));

    renderer.init_viewport(64, 64).unwrap();
    renderer.record_frame(&region).unwrap();
    renderer.render().unwrap();
}
