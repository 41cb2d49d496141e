/// GpuContext - Shared GPU resources for all Vulkan objects
///
/// Contains everything a resource needs for GPU operations:
/// - Device for Vulkan API calls
/// - Allocator for memory management
/// - Queue for command submission

use ash::vk;
use gpu_allocator::vulkan::Allocator;
use std::mem::ManuallyDrop;
use std::sync::{Arc, Mutex};

/// Context creation options
#[derive(Debug, Clone)]
pub struct ContextConfig {
    /// Application name reported to the Vulkan driver
    pub app_name: String,
    /// Enable VK_LAYER_KHRONOS_validation and the debug messenger
    pub enable_validation: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            app_name: "Orrery Application".to_string(),
            enable_validation: cfg!(feature = "vulkan-validation"),
        }
    }
}

/// Shared GPU context for all Vulkan resources.
///
/// This struct is shared (via `Arc`) by all GPU resources (buffers,
/// attachments) to avoid duplicating device/allocator/queue references in
/// each resource.
///
/// Note: Device and instance destruction is handled by
/// OffscreenRenderer::drop() to keep teardown ordering in one place; every
/// buffer handed out to the caller must be dropped before the renderer.
pub struct GpuContext {
    /// Vulkan logical device
    pub device: ash::Device,

    /// GPU memory allocator (shared, requires mutex for thread safety)
    /// Wrapped in ManuallyDrop to ensure it's dropped BEFORE the device is destroyed
    pub allocator: ManuallyDrop<Arc<Mutex<Allocator>>>,

    /// Graphics queue for command submission
    pub graphics_queue: vk::Queue,

    /// Graphics queue family index
    pub graphics_queue_family: u32,
}

impl GpuContext {
    pub fn new(
        device: ash::Device,
        allocator: Arc<Mutex<Allocator>>,
        graphics_queue: vk::Queue,
        graphics_queue_family: u32,
    ) -> Self {
        Self {
            device,
            allocator: ManuallyDrop::new(allocator),
            graphics_queue,
            graphics_queue_family,
        }
    }
}

impl Drop for GpuContext {
    fn drop(&mut self) {
        // NOTE: Device and instance destruction is handled by
        // OffscreenRenderer::drop() to avoid issues with drop ordering.
        // This Drop impl intentionally does nothing.
    }
}
