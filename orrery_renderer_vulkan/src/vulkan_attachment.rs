/// Attachment - offscreen render target image with its view

use orrery_renderer::{render_err, render_error, Error, Result};
use ash::vk;
use gpu_allocator::vulkan::{Allocation, AllocationCreateDesc, AllocationScheme};
use gpu_allocator::MemoryLocation;
use std::sync::Arc;

use crate::vulkan_context::GpuContext;

const SOURCE: &str = "orrery::vulkan";

/// GPU-local image used as a framebuffer attachment
///
/// Sized to the viewport; destroyed and recreated on resize.
pub struct Attachment {
    ctx: Arc<GpuContext>,
    pub(crate) image: vk::Image,
    pub(crate) view: vk::ImageView,
    allocation: Option<Allocation>,
    pub(crate) extent: vk::Extent3D,
}

impl Attachment {
    /// Color attachment: rendered into, then copied out to a host buffer
    pub fn color(ctx: Arc<GpuContext>, format: vk::Format, width: u32, height: u32) -> Result<Self> {
        Self::create(
            ctx,
            "color attachment",
            format,
            width,
            height,
            vk::ImageUsageFlags::COLOR_ATTACHMENT | vk::ImageUsageFlags::TRANSFER_SRC,
            vk::ImageAspectFlags::COLOR,
        )
    }

    /// Depth attachment, also sampleable for later depth-resolve passes
    pub fn depth(ctx: Arc<GpuContext>, format: vk::Format, width: u32, height: u32) -> Result<Self> {
        Self::create(
            ctx,
            "depth attachment",
            format,
            width,
            height,
            vk::ImageUsageFlags::DEPTH_STENCIL_ATTACHMENT | vk::ImageUsageFlags::SAMPLED,
            vk::ImageAspectFlags::DEPTH,
        )
    }

    fn create(
        ctx: Arc<GpuContext>,
        name: &str,
        format: vk::Format,
        width: u32,
        height: u32,
        usage: vk::ImageUsageFlags,
        aspect_mask: vk::ImageAspectFlags,
    ) -> Result<Self> {
        unsafe {
            let extent = vk::Extent3D {
                width,
                height,
                depth: 1,
            };

            // Create image
            let image_create_info = vk::ImageCreateInfo::default()
                .image_type(vk::ImageType::TYPE_2D)
                .format(format)
                .extent(extent)
                .mip_levels(1)
                .array_layers(1)
                .samples(vk::SampleCountFlags::TYPE_1)
                .tiling(vk::ImageTiling::OPTIMAL)
                .usage(usage)
                .sharing_mode(vk::SharingMode::EXCLUSIVE)
                .initial_layout(vk::ImageLayout::UNDEFINED);

            let image = ctx
                .device
                .create_image(&image_create_info, None)
                .map_err(|e| render_err!(SOURCE, "Failed to create {} image: {:?}", name, e))?;

            // Allocate memory
            let requirements = ctx.device.get_image_memory_requirements(image);

            let allocation = ctx
                .allocator
                .lock()
                .map_err(|_| render_err!(SOURCE, "GPU allocator lock poisoned"))?
                .allocate(&AllocationCreateDesc {
                    name,
                    requirements,
                    location: MemoryLocation::GpuOnly,
                    linear: false,
                    allocation_scheme: AllocationScheme::GpuAllocatorManaged,
                })
                .map_err(|_e| {
                    let size_mb = requirements.size as f64 / (1024.0 * 1024.0);
                    render_error!(
                        SOURCE,
                        "Out of GPU memory for {} ({}x{}, {:.2} MB)",
                        name,
                        width,
                        height,
                        size_mb
                    );
                    ctx.device.destroy_image(image, None);
                    Error::OutOfMemory
                })?;

            // Bind memory
            ctx.device
                .bind_image_memory(image, allocation.memory(), allocation.offset())
                .map_err(|e| render_err!(SOURCE, "Failed to bind {} memory: {:?}", name, e))?;

            // Create image view
            let view_create_info = vk::ImageViewCreateInfo::default()
                .image(image)
                .view_type(vk::ImageViewType::TYPE_2D)
                .format(format)
                .components(vk::ComponentMapping {
                    r: vk::ComponentSwizzle::IDENTITY,
                    g: vk::ComponentSwizzle::IDENTITY,
                    b: vk::ComponentSwizzle::IDENTITY,
                    a: vk::ComponentSwizzle::IDENTITY,
                })
                .subresource_range(vk::ImageSubresourceRange {
                    aspect_mask,
                    base_mip_level: 0,
                    level_count: 1,
                    base_array_layer: 0,
                    layer_count: 1,
                });

            let view = ctx
                .device
                .create_image_view(&view_create_info, None)
                .map_err(|e| render_err!(SOURCE, "Failed to create {} view: {:?}", name, e))?;

            Ok(Self {
                ctx,
                image,
                view,
                allocation: Some(allocation),
                extent,
            })
        }
    }
}

impl Drop for Attachment {
    fn drop(&mut self) {
        unsafe {
            self.ctx.device.destroy_image_view(self.view, None);

            if let Some(allocation) = self.allocation.take() {
                if let Ok(mut allocator) = self.ctx.allocator.lock() {
                    allocator.free(allocation).ok();
                }
            }

            self.ctx.device.destroy_image(self.image, None);
        }
    }
}
