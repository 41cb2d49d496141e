use super::*;
use crate::graphics::{BufferRegion, MockBuffer};
use crate::scene::HostSceneSlab;
use glam::{Vec3, Vec4};
use std::sync::Arc;

fn test_registry() -> SceneRegistry {
    SceneRegistry::new(Box::new(HostSceneSlab::new()))
}

fn test_primitive(index_count: u32) -> Primitive {
    let vertex_buffer: Arc<dyn crate::graphics::GpuBuffer> = Arc::new(MockBuffer::new(8192));
    let index_buffer: Arc<dyn crate::graphics::GpuBuffer> = Arc::new(MockBuffer::new(2048));
    Primitive {
        vertex_region: BufferRegion::new(vertex_buffer, 0, 1024),
        index_region: BufferRegion::new(index_buffer, 0, index_count as u64 * 4),
        attr_offsets: [0, 512],
        index_count,
    }
}

fn red() -> Material {
    Material::new(Vec4::new(1.0, 0.0, 0.0, 1.0))
}

#[test]
fn test_register_assigns_sequential_ids() {
    let mut registry = test_registry();
    for expected in 0..5u32 {
        let id = registry
            .register(test_primitive(3), red(), Mat4::IDENTITY)
            .unwrap();
        assert_eq!(id, PrimId(expected));
    }
    assert_eq!(registry.prim_count(), 5);
}

#[test]
fn test_register_writes_material_and_transform() {
    let mut registry = test_registry();
    let transform = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
    let id = registry
        .register(test_primitive(6), red(), transform)
        .unwrap();

    assert_eq!(registry.material(id).unwrap(), red());
    assert_eq!(registry.transform(id).unwrap(), transform);
    assert_eq!(registry.primitive(id).unwrap().index_count, 6);
}

#[test]
fn test_capacity_boundary() {
    let mut registry = test_registry();
    for _ in 0..PRIM_CAPACITY {
        registry
            .register(test_primitive(3), red(), Mat4::IDENTITY)
            .unwrap();
    }
    assert_eq!(registry.prim_count(), PRIM_CAPACITY);

    // One past capacity fails and changes nothing
    let err = registry
        .register(test_primitive(3), red(), Mat4::IDENTITY)
        .unwrap_err();
    match err {
        Error::CapacityExceeded { capacity } => assert_eq!(capacity, PRIM_CAPACITY),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(registry.prim_count(), PRIM_CAPACITY);

    // Existing entries survive the failed registration
    let last = PrimId(PRIM_CAPACITY as u32 - 1);
    assert_eq!(registry.material(last).unwrap(), red());
}

#[test]
fn test_readers_reject_unregistered_ids() {
    let registry = test_registry();
    assert!(registry.primitive(PrimId(0)).is_none());
    assert!(registry.material(PrimId(0)).is_none());
    assert!(registry.transform(PrimId(0)).is_none());
}

#[test]
fn test_update_camera_round_trip() {
    let mut registry = test_registry();
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
    let proj = Mat4::perspective_rh(1.0, 1.0, 0.1, 100.0);
    registry.update_camera(view, proj);

    let camera = registry.camera();
    assert_eq!(camera.view, view);
    assert_eq!(camera.proj, proj);
    assert_eq!(camera.view_inv, view.inverse());
    assert_eq!(camera.proj_inv, proj.inverse());
}

#[test]
fn test_updates_are_unsupported() {
    let mut registry = test_registry();
    let id = registry
        .register(test_primitive(3), red(), Mat4::IDENTITY)
        .unwrap();

    let err = registry.update_primitive(id, test_primitive(6)).unwrap_err();
    assert!(matches!(err, Error::UnsupportedOperation(_)));

    let err = registry.update_transform(id, Mat4::IDENTITY).unwrap_err();
    assert!(matches!(err, Error::UnsupportedOperation(_)));

    // The rejected updates left the scene untouched
    assert_eq!(registry.primitive(id).unwrap().index_count, 3);
    assert_eq!(registry.transform(id).unwrap(), Mat4::IDENTITY);
}

#[test]
fn test_draw_calls_in_registration_order() {
    let mut registry = test_registry();
    registry
        .register(test_primitive(3), red(), Mat4::IDENTITY)
        .unwrap();
    registry
        .register(test_primitive(6), red(), Mat4::IDENTITY)
        .unwrap();
    registry
        .register(test_primitive(9), red(), Mat4::IDENTITY)
        .unwrap();

    let calls = registry.draw_calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].index_count, 3);
    assert_eq!(calls[1].index_count, 6);
    assert_eq!(calls[2].index_count, 9);
}

#[test]
fn test_empty_scene_has_no_draw_calls() {
    let registry = test_registry();
    assert!(registry.draw_calls().is_empty());
    registry.log_materials();
}
