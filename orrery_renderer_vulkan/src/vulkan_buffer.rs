/// Buffer - Vulkan implementation of the GpuBuffer trait

use orrery_renderer::graphics::GpuBuffer;
use orrery_renderer::{render_err, render_error, Error, Result};
use ash::vk;
use gpu_allocator::vulkan::{Allocation, AllocationCreateDesc, AllocationScheme};
use gpu_allocator::MemoryLocation;
use std::sync::Arc;

use crate::vulkan_context::GpuContext;

const SOURCE: &str = "orrery::vulkan";

/// Vulkan buffer with its memory allocation
///
/// All buffers are created host-visible: geometry uploads and frame readback
/// both happen through the mapped pointer, with no staging pass.
pub struct Buffer {
    /// Shared GPU context (device, allocator, queue)
    ctx: Arc<GpuContext>,
    /// Vulkan buffer
    pub(crate) buffer: vk::Buffer,
    /// GPU memory allocation
    pub(crate) allocation: Option<Allocation>,
    /// Buffer size
    pub(crate) size: u64,
}

impl Buffer {
    pub(crate) fn create(
        ctx: Arc<GpuContext>,
        name: &str,
        size: u64,
        usage: vk::BufferUsageFlags,
        location: MemoryLocation,
    ) -> Result<Self> {
        unsafe {
            let buffer_create_info = vk::BufferCreateInfo::default()
                .size(size)
                .usage(usage)
                .sharing_mode(vk::SharingMode::EXCLUSIVE);

            let buffer = ctx
                .device
                .create_buffer(&buffer_create_info, None)
                .map_err(|e| {
                    render_err!(SOURCE, "Failed to create buffer of size {} bytes: {:?}", size, e)
                })?;

            let requirements = ctx.device.get_buffer_memory_requirements(buffer);

            let allocation = ctx
                .allocator
                .lock()
                .map_err(|_| render_err!(SOURCE, "GPU allocator lock poisoned"))?
                .allocate(&AllocationCreateDesc {
                    name,
                    requirements,
                    location,
                    linear: true,
                    allocation_scheme: AllocationScheme::GpuAllocatorManaged,
                })
                .map_err(|_e| {
                    let size_mb = requirements.size as f64 / (1024.0 * 1024.0);
                    render_error!(
                        SOURCE,
                        "Out of GPU memory for buffer (required: {:.2} MB)",
                        size_mb
                    );
                    ctx.device.destroy_buffer(buffer, None);
                    Error::OutOfMemory
                })?;

            ctx.device
                .bind_buffer_memory(buffer, allocation.memory(), allocation.offset())
                .map_err(|e| render_err!(SOURCE, "Failed to bind buffer memory: {:?}", e))?;

            Ok(Self {
                ctx,
                buffer,
                allocation: Some(allocation),
                size,
            })
        }
    }

    /// Host-visible uniform buffer
    pub fn uniform(ctx: Arc<GpuContext>, size: u64) -> Result<Self> {
        Self::create(
            ctx,
            "uniform",
            size,
            vk::BufferUsageFlags::UNIFORM_BUFFER,
            MemoryLocation::CpuToGpu,
        )
    }

    /// Host-visible vertex buffer
    pub fn vertex(ctx: Arc<GpuContext>, size: u64) -> Result<Self> {
        Self::create(
            ctx,
            "vertex",
            size,
            vk::BufferUsageFlags::VERTEX_BUFFER,
            MemoryLocation::CpuToGpu,
        )
    }

    /// Host-visible index buffer
    pub fn index(ctx: Arc<GpuContext>, size: u64) -> Result<Self> {
        Self::create(
            ctx,
            "index",
            size,
            vk::BufferUsageFlags::INDEX_BUFFER,
            MemoryLocation::CpuToGpu,
        )
    }

    /// Host-readable buffer receiving the color attachment copy
    pub fn readback(ctx: Arc<GpuContext>, size: u64) -> Result<Self> {
        Self::create(
            ctx,
            "readback",
            size,
            vk::BufferUsageFlags::TRANSFER_DST,
            MemoryLocation::GpuToCpu,
        )
    }

    /// Whether the allocation is mapped into host address space
    pub fn is_mapped(&self) -> bool {
        self.allocation
            .as_ref()
            .map(|a| a.mapped_ptr().is_some())
            .unwrap_or(false)
    }

    /// Write data into the buffer at `offset`
    pub fn write(&self, offset: u64, data: &[u8]) -> Result<()> {
        unsafe {
            if let Some(allocation) = &self.allocation {
                let mapped_ptr = allocation
                    .mapped_ptr()
                    .ok_or_else(|| {
                        Error::BackendError("Buffer is not CPU-accessible".to_string())
                    })?
                    .as_ptr() as *mut u8;

                std::ptr::copy_nonoverlapping(
                    data.as_ptr(),
                    mapped_ptr.offset(offset as isize),
                    data.len(),
                );

                Ok(())
            } else {
                render_error!(SOURCE, "Buffer write failed: no GPU allocation");
                Err(Error::BackendError("Buffer has no allocation".to_string()))
            }
        }
    }

    /// Read data out of the buffer at `offset`
    pub fn read(&self, offset: u64, out: &mut [u8]) -> Result<()> {
        unsafe {
            if let Some(allocation) = &self.allocation {
                let mapped_ptr = allocation
                    .mapped_ptr()
                    .ok_or_else(|| {
                        Error::BackendError("Buffer is not CPU-accessible".to_string())
                    })?
                    .as_ptr() as *const u8;

                std::ptr::copy_nonoverlapping(
                    mapped_ptr.offset(offset as isize),
                    out.as_mut_ptr(),
                    out.len(),
                );

                Ok(())
            } else {
                render_error!(SOURCE, "Buffer read failed: no GPU allocation");
                Err(Error::BackendError("Buffer has no allocation".to_string()))
            }
        }
    }
}

impl GpuBuffer for Buffer {
    fn size(&self) -> u64 {
        self.size
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe {
            // Free GPU memory
            if let Some(allocation) = self.allocation.take() {
                // Don't panic if lock fails - we still need to destroy the buffer
                if let Ok(mut allocator) = self.ctx.allocator.lock() {
                    allocator.free(allocation).ok();
                }
            }

            // Destroy buffer
            self.ctx.device.destroy_buffer(self.buffer, None);
        }
    }
}
