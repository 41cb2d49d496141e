/// RenderPass - offscreen render pass ending in a transfer-ready color image

use orrery_renderer::{render_err, Result};
use ash::vk;

/// Format of the offscreen color attachment (and of the readback pixels)
pub const COLOR_FORMAT: vk::Format = vk::Format::R8G8B8A8_UNORM;

/// Format of the depth attachment
pub const DEPTH_FORMAT: vk::Format = vk::Format::D32_SFLOAT;

/// Vulkan render pass wrapper
///
/// The single subpass clears both attachments, draws, and leaves the color
/// image in TRANSFER_SRC_OPTIMAL so the frame can be copied to a host buffer
/// without an extra barrier. Depth is stored (not discarded) so a future
/// pass can sample it.
pub struct RenderPass {
    pub(crate) render_pass: vk::RenderPass,
    device: ash::Device,
}

impl RenderPass {
    pub fn offscreen(device: ash::Device) -> Result<Self> {
        unsafe {
            let attachments = [
                vk::AttachmentDescription::default()
                    .format(COLOR_FORMAT)
                    .samples(vk::SampleCountFlags::TYPE_1)
                    .load_op(vk::AttachmentLoadOp::CLEAR)
                    .store_op(vk::AttachmentStoreOp::STORE)
                    .stencil_load_op(vk::AttachmentLoadOp::DONT_CARE)
                    .stencil_store_op(vk::AttachmentStoreOp::DONT_CARE)
                    .initial_layout(vk::ImageLayout::UNDEFINED)
                    .final_layout(vk::ImageLayout::TRANSFER_SRC_OPTIMAL),
                vk::AttachmentDescription::default()
                    .format(DEPTH_FORMAT)
                    .samples(vk::SampleCountFlags::TYPE_1)
                    .load_op(vk::AttachmentLoadOp::CLEAR)
                    .store_op(vk::AttachmentStoreOp::STORE)
                    .stencil_load_op(vk::AttachmentLoadOp::DONT_CARE)
                    .stencil_store_op(vk::AttachmentStoreOp::STORE)
                    .initial_layout(vk::ImageLayout::UNDEFINED)
                    .final_layout(vk::ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL),
            ];

            let color_reference = vk::AttachmentReference::default()
                .attachment(0)
                .layout(vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL);

            let depth_reference = vk::AttachmentReference::default()
                .attachment(1)
                .layout(vk::ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL);

            let subpass = vk::SubpassDescription::default()
                .pipeline_bind_point(vk::PipelineBindPoint::GRAPHICS)
                .color_attachments(std::slice::from_ref(&color_reference))
                .depth_stencil_attachment(&depth_reference);

            let stage_mask = vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT
                | vk::PipelineStageFlags::EARLY_FRAGMENT_TESTS;

            let dependency = vk::SubpassDependency::default()
                .src_subpass(vk::SUBPASS_EXTERNAL)
                .dst_subpass(0)
                .src_stage_mask(stage_mask)
                .src_access_mask(vk::AccessFlags::empty())
                .dst_stage_mask(stage_mask)
                .dst_access_mask(
                    vk::AccessFlags::COLOR_ATTACHMENT_WRITE
                        | vk::AccessFlags::DEPTH_STENCIL_ATTACHMENT_WRITE,
                );

            let render_pass_info = vk::RenderPassCreateInfo::default()
                .attachments(&attachments)
                .subpasses(std::slice::from_ref(&subpass))
                .dependencies(std::slice::from_ref(&dependency));

            let render_pass = device
                .create_render_pass(&render_pass_info, None)
                .map_err(|e| render_err!("orrery::vulkan", "Failed to create render pass: {:?}", e))?;

            Ok(Self {
                render_pass,
                device,
            })
        }
    }
}

impl Drop for RenderPass {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_render_pass(self.render_pass, None);
        }
    }
}
