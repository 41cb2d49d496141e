/// Mock GPU buffer for device-free testing

use crate::graphics::GpuBuffer;

/// Mock buffer implementation
///
/// Carries only a size; lets registry and draw-call logic be exercised
/// without a device.
pub struct MockBuffer {
    size: u64,
}

impl MockBuffer {
    /// Create a mock buffer of `size` bytes
    pub fn new(size: u64) -> Self {
        Self { size }
    }
}

impl GpuBuffer for MockBuffer {
    fn size(&self) -> u64 {
        self.size
    }
}
