/*!
# Orrery Renderer - Vulkan Backend

Vulkan implementation of the Orrery offscreen scene renderer.

This crate renders a registered scene into an offscreen color attachment and
copies the result into a caller-supplied host-visible buffer. It uses the Ash
library for Vulkan bindings and gpu-allocator for memory management. There is
no window, surface, or swapchain: every frame ends in host memory.
*/

// Vulkan implementation modules
mod vulkan_attachment;
mod vulkan_buffer;
mod vulkan_context;
mod vulkan_debug;
mod vulkan_descriptors;
mod vulkan_framebuffer;
mod vulkan_pipeline;
mod vulkan_render_pass;
mod vulkan_renderer;
mod vulkan_shader;
mod vulkan_slab;

pub use vulkan_buffer::Buffer;
pub use vulkan_context::{ContextConfig, GpuContext};
pub use vulkan_renderer::{OffscreenRenderer, OffscreenRendererDesc};
