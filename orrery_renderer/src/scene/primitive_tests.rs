use super::*;
use crate::graphics::{BufferRegion, MockBuffer};
use std::sync::Arc;

fn test_primitive() -> Primitive {
    let vertex_buffer: Arc<dyn crate::graphics::GpuBuffer> = Arc::new(MockBuffer::new(4096));
    let index_buffer: Arc<dyn crate::graphics::GpuBuffer> = Arc::new(MockBuffer::new(1024));
    Primitive {
        vertex_region: BufferRegion::new(vertex_buffer, 512, 576),
        index_region: BufferRegion::new(index_buffer, 128, 144),
        attr_offsets: [0, 288],
        index_count: 36,
    }
}

#[test]
fn test_prim_id_index() {
    assert_eq!(PrimId(0).index(), 0);
    assert_eq!(PrimId(42).index(), 42);
}

#[test]
fn test_draw_call_folds_region_offset() {
    let prim = test_primitive();
    let call = prim.draw_call();

    // Attribute offsets are relative to the region; binding offsets are
    // relative to the buffer
    assert_eq!(call.vertex_offsets, [512, 512 + 288]);
    assert_eq!(call.index_offset, 128);
    assert_eq!(call.index_count, 36);
}

#[test]
fn test_draw_call_shares_buffers() {
    let prim = test_primitive();
    let call = prim.draw_call();
    assert_eq!(call.vertex_buffer.size(), 4096);
    assert_eq!(call.index_buffer.size(), 1024);
}
