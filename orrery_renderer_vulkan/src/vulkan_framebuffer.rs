/// Framebuffer - groups the offscreen color and depth attachments

use orrery_renderer::{render_err, Result};
use ash::vk;

use crate::vulkan_attachment::Attachment;
use crate::vulkan_render_pass::RenderPass;

/// Vulkan framebuffer wrapper
///
/// Sized to the viewport; destroyed and recreated on resize, before its
/// attachments are.
pub struct Framebuffer {
    pub(crate) framebuffer: vk::Framebuffer,
    device: ash::Device,
}

impl Framebuffer {
    pub fn new(
        device: ash::Device,
        render_pass: &RenderPass,
        color: &Attachment,
        depth: &Attachment,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        unsafe {
            let attachments = [color.view, depth.view];

            let framebuffer_info = vk::FramebufferCreateInfo::default()
                .render_pass(render_pass.render_pass)
                .attachments(&attachments)
                .width(width)
                .height(height)
                .layers(1);

            let framebuffer = device
                .create_framebuffer(&framebuffer_info, None)
                .map_err(|e| render_err!("orrery::vulkan", "Failed to create framebuffer: {:?}", e))?;

            Ok(Self {
                framebuffer,
                device,
            })
        }
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_framebuffer(self.framebuffer, None);
        }
    }
}
