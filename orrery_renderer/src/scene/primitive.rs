/// Primitive geometry descriptor and resolved draw call

use crate::graphics::BufferRegion;
use std::sync::Arc;

/// Handle to a registered primitive
///
/// Ids are assigned sequentially starting at 0 and are never reused; they
/// double as the primitive's index into the transform and material arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimId(pub u32);

impl PrimId {
    /// Index into the per-primitive uniform arrays
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Indexed triangle geometry stored in GPU buffer regions
///
/// Positions and normals are two tightly packed vec3 streams inside the
/// vertex region, located by `attr_offsets` relative to the region start.
/// Indices are 32-bit.
#[derive(Debug, Clone)]
pub struct Primitive {
    /// Region holding both vertex attribute streams
    pub vertex_region: BufferRegion,
    /// Region holding the u32 index stream
    pub index_region: BufferRegion,
    /// Stream start offsets (positions, normals) relative to `vertex_region`
    pub attr_offsets: [u64; 2],
    /// Number of indices to draw
    pub index_count: u32,
}

/// One draw, with buffer-relative byte offsets resolved
///
/// Binding offsets fold the vertex region's own offset into each attribute
/// stream offset, so the command recorder binds the underlying buffer
/// directly.
pub struct DrawCall {
    /// Buffer bound to both vertex binding slots
    pub vertex_buffer: Arc<dyn crate::graphics::GpuBuffer>,
    /// Byte offsets for binding 0 (positions) and binding 1 (normals)
    pub vertex_offsets: [u64; 2],
    /// Buffer holding the index stream
    pub index_buffer: Arc<dyn crate::graphics::GpuBuffer>,
    /// Byte offset of the first index
    pub index_offset: u64,
    /// Number of indices to draw
    pub index_count: u32,
}

impl Primitive {
    /// Resolve the primitive into a draw call with absolute buffer offsets
    pub fn draw_call(&self) -> DrawCall {
        DrawCall {
            vertex_buffer: self.vertex_region.buffer.clone(),
            vertex_offsets: [
                self.attr_offsets[0] + self.vertex_region.offset,
                self.attr_offsets[1] + self.vertex_region.offset,
            ],
            index_buffer: self.index_region.buffer.clone(),
            index_offset: self.index_region.offset,
            index_count: self.index_count,
        }
    }
}

#[cfg(test)]
#[path = "primitive_tests.rs"]
mod tests;
