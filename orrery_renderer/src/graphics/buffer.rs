/// GpuBuffer trait and buffer region descriptor

use std::sync::Arc;

/// Opaque GPU buffer handle
///
/// Implemented by backend-specific buffer types (e.g., the Vulkan backend's
/// `Buffer`). The backing memory is released when the last `Arc` clone is
/// dropped.
pub trait GpuBuffer: Send + Sync {
    /// Total buffer size in bytes
    fn size(&self) -> u64;
}

/// Byte range inside a GPU buffer
///
/// Vertex and index data for a primitive live as regions of larger buffers;
/// draw commands bind the buffer at `offset` rather than slicing the memory.
#[derive(Clone)]
pub struct BufferRegion {
    /// Buffer the region points into
    pub buffer: Arc<dyn GpuBuffer>,
    /// Start of the region, in bytes from the buffer base
    pub offset: u64,
    /// Region length in bytes
    pub size: u64,
}

impl BufferRegion {
    /// Create a region covering `size` bytes starting at `offset`
    pub fn new(buffer: Arc<dyn GpuBuffer>, offset: u64, size: u64) -> Self {
        Self {
            buffer,
            offset,
            size,
        }
    }

    /// Create a region covering a whole buffer
    pub fn whole(buffer: Arc<dyn GpuBuffer>) -> Self {
        let size = buffer.size();
        Self {
            buffer,
            offset: 0,
            size,
        }
    }

    /// Whether the region stays inside its buffer's bounds
    pub fn in_bounds(&self) -> bool {
        self.offset
            .checked_add(self.size)
            .map(|end| end <= self.buffer.size())
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for BufferRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferRegion")
            .field("offset", &self.offset)
            .field("size", &self.size)
            .field("buffer_size", &self.buffer.size())
            .finish()
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
