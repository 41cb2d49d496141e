/// OffscreenRenderer - headless Vulkan renderer for registered scenes

use orrery_renderer::glam::Mat4;
use orrery_renderer::graphics::{BufferRegion, GpuBuffer};
use orrery_renderer::scene::{Material, PrimId, Primitive, SceneRegistry};
use orrery_renderer::{render_debug, render_err, render_error, render_info, Error, Result};
use ash::vk;
use gpu_allocator::vulkan::{Allocator, AllocatorCreateDesc};
use std::ffi::CString;
use std::mem::ManuallyDrop;
use std::sync::{Arc, Mutex};

use crate::vulkan_attachment::Attachment;
use crate::vulkan_buffer::Buffer;
use crate::vulkan_context::{ContextConfig, GpuContext};
use crate::vulkan_descriptors::SceneDescriptors;
use crate::vulkan_framebuffer::Framebuffer;
use crate::vulkan_pipeline::Pipeline;
use crate::vulkan_render_pass::{RenderPass, COLOR_FORMAT, DEPTH_FORMAT};
use crate::vulkan_shader::ShaderModule;
use crate::vulkan_slab::VulkanSceneSlab;

const SOURCE: &str = "orrery::vulkan";

/// Background color every frame starts from (dark green)
const CLEAR_COLOR: [f32; 4] = [0.002, 0.023, 0.009, 1.0];

/// Depth buffer clear value (far plane)
const CLEAR_DEPTH: f32 = 1.0;

/// Bytes per pixel of the readback image (R8G8B8A8)
const READBACK_PIXEL_SIZE: u64 = 4;

/// Renderer creation options
pub struct OffscreenRendererDesc {
    /// Vulkan context options
    pub context: ContextConfig,
    /// SPIR-V for the vertex stage
    pub vertex_shader: Vec<u8>,
    /// SPIR-V for the fragment stage
    pub fragment_shader: Vec<u8>,
}

/// Viewport-sized resources, torn down together on resize
///
/// Field order is drop order: the framebuffer references the attachment
/// views, so it must go first.
struct ViewportTargets {
    framebuffer: Framebuffer,
    pipeline: Pipeline,
    color: Attachment,
    #[allow(dead_code)]
    depth: Attachment,
}

/// Headless Vulkan scene renderer
///
/// Renders the registered scene into an offscreen color attachment and
/// copies the pixels into a caller-supplied readback buffer. Rendering is
/// synchronous: `render()` submits the recorded frame and blocks on a fence
/// until the copy has landed in host memory.
///
/// Buffers created through this renderer share its device and must be
/// dropped before it.
pub struct OffscreenRenderer {
    /// Vulkan entry (keeps the loader alive)
    _entry: ash::Entry,
    /// Vulkan instance
    instance: ash::Instance,
    /// Logical device reference (also stored in GpuContext)
    device: ash::Device,
    /// GPU memory allocator reference (also stored in GpuContext)
    allocator: ManuallyDrop<Arc<Mutex<Allocator>>>,
    /// Shared GPU context handed to every resource
    gpu_context: Arc<GpuContext>,

    /// Debug utils loader (for validation layers)
    debug_utils_loader: Option<ash::ext::debug_utils::Instance>,
    /// Debug messenger handle
    debug_messenger: Option<vk::DebugUtilsMessengerEXT>,

    /// Scene registry over the mapped uniform buffers
    scene: Option<SceneRegistry>,
    /// Descriptor set + pipeline layout (size-independent)
    descriptors: Option<SceneDescriptors>,
    /// Shader modules, reused for every pipeline rebuild
    vertex_shader: Option<ShaderModule>,
    fragment_shader: Option<ShaderModule>,
    /// Offscreen render pass, created with the first viewport and reused
    /// across resizes
    render_pass: Option<RenderPass>,
    /// Viewport-sized resources (attachments, pipeline, framebuffer)
    targets: Option<ViewportTargets>,

    /// Command pool holding the single frame command buffer
    command_pool: vk::CommandPool,
    command_buffer: vk::CommandBuffer,
    /// Fence signaled when a submitted frame has fully executed
    render_fence: vk::Fence,

    /// Current viewport size
    width: u32,
    height: u32,
    /// Whether the command buffer holds a recorded frame
    frame_recorded: bool,
}

impl OffscreenRenderer {
    pub fn new(desc: OffscreenRendererDesc) -> Result<Self> {
        unsafe {
            // Create Vulkan Entry
            let entry = ash::Entry::load().map_err(|e| {
                render_error!(SOURCE, "Failed to load Vulkan library: {:?}", e);
                Error::InitializationFailed(format!("Failed to load Vulkan library: {:?}", e))
            })?;

            // Application Info
            let app_name = CString::new(desc.context.app_name.as_str()).map_err(|_| {
                Error::InitializationFailed("Application name contains a NUL byte".to_string())
            })?;
            let app_info = vk::ApplicationInfo::default()
                .application_name(&app_name)
                .application_version(vk::make_api_version(0, 1, 0, 0))
                .engine_name(c"Orrery")
                .engine_version(vk::make_api_version(0, 0, 1, 0))
                .api_version(vk::API_VERSION_1_3);

            // No surface extensions: this renderer never presents
            let mut extension_names: Vec<*const std::os::raw::c_char> = Vec::new();
            if desc.context.enable_validation {
                extension_names.push(ash::ext::debug_utils::NAME.as_ptr());
            }

            let layer_names = if desc.context.enable_validation {
                vec![c"VK_LAYER_KHRONOS_validation".as_ptr()]
            } else {
                vec![]
            };

            let create_info = vk::InstanceCreateInfo::default()
                .application_info(&app_info)
                .enabled_layer_names(&layer_names)
                .enabled_extension_names(&extension_names);

            let instance = entry.create_instance(&create_info, None).map_err(|e| {
                render_error!(SOURCE, "Failed to create Vulkan instance: {:?}", e);
                Error::InitializationFailed(format!("Failed to create instance: {:?}", e))
            })?;

            // Setup debug messenger if validation is enabled
            let (debug_utils_loader, debug_messenger) = if desc.context.enable_validation {
                let debug_utils = ash::ext::debug_utils::Instance::new(&entry, &instance);

                let debug_info = vk::DebugUtilsMessengerCreateInfoEXT::default()
                    .message_severity(
                        vk::DebugUtilsMessageSeverityFlagsEXT::ERROR
                            | vk::DebugUtilsMessageSeverityFlagsEXT::WARNING,
                    )
                    .message_type(
                        vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                            | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                            | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
                    )
                    .pfn_user_callback(Some(crate::vulkan_debug::vulkan_debug_callback));

                let messenger = debug_utils
                    .create_debug_utils_messenger(&debug_info, None)
                    .map_err(|e| {
                        render_error!(SOURCE, "Failed to create debug messenger: {:?}", e);
                        Error::InitializationFailed(format!(
                            "Failed to create debug messenger: {:?}",
                            e
                        ))
                    })?;

                (Some(debug_utils), Some(messenger))
            } else {
                (None, None)
            };

            // Pick Physical Device
            let physical_devices = instance.enumerate_physical_devices().map_err(|e| {
                render_error!(SOURCE, "Failed to enumerate physical devices: {:?}", e);
                Error::InitializationFailed(format!(
                    "Failed to enumerate physical devices: {:?}",
                    e
                ))
            })?;

            let physical_device = physical_devices.into_iter().next().ok_or_else(|| {
                render_error!(SOURCE, "No Vulkan-capable GPU found");
                Error::InitializationFailed("No Vulkan-capable GPU found".to_string())
            })?;

            // Find a graphics queue family (present support is irrelevant)
            let queue_families =
                instance.get_physical_device_queue_family_properties(physical_device);

            let graphics_family_index = queue_families
                .iter()
                .enumerate()
                .find(|(_, qf)| qf.queue_flags.contains(vk::QueueFlags::GRAPHICS))
                .map(|(i, _)| i as u32)
                .ok_or_else(|| {
                    render_error!(SOURCE, "No graphics queue family found");
                    Error::InitializationFailed("No graphics queue family found".to_string())
                })?;

            // Create Logical Device
            let queue_priorities = [1.0];
            let queue_create_infos = [vk::DeviceQueueCreateInfo::default()
                .queue_family_index(graphics_family_index)
                .queue_priorities(&queue_priorities)];

            let device_create_info =
                vk::DeviceCreateInfo::default().queue_create_infos(&queue_create_infos);

            let device = instance
                .create_device(physical_device, &device_create_info, None)
                .map_err(|e| {
                    render_error!(SOURCE, "Failed to create logical device: {:?}", e);
                    Error::InitializationFailed(format!("Failed to create device: {:?}", e))
                })?;

            let graphics_queue = device.get_device_queue(graphics_family_index, 0);

            // Create GPU allocator
            let allocator = Allocator::new(&AllocatorCreateDesc {
                instance: instance.clone(),
                device: device.clone(),
                physical_device,
                debug_settings: Default::default(),
                buffer_device_address: false,
                allocation_sizes: Default::default(),
            })
            .map_err(|e| {
                render_error!(SOURCE, "Failed to create GPU allocator: {:?}", e);
                Error::InitializationFailed(format!("Failed to create allocator: {:?}", e))
            })?;
            let allocator = Arc::new(Mutex::new(allocator));

            let gpu_context = Arc::new(GpuContext::new(
                device.clone(),
                Arc::clone(&allocator),
                graphics_queue,
                graphics_family_index,
            ));

            // Command pool + the single frame command buffer
            let pool_info = vk::CommandPoolCreateInfo::default()
                .queue_family_index(graphics_family_index);

            let command_pool = device.create_command_pool(&pool_info, None).map_err(|e| {
                render_error!(SOURCE, "Failed to create command pool: {:?}", e);
                Error::InitializationFailed(format!("Failed to create command pool: {:?}", e))
            })?;

            let alloc_info = vk::CommandBufferAllocateInfo::default()
                .command_pool(command_pool)
                .level(vk::CommandBufferLevel::PRIMARY)
                .command_buffer_count(1);

            let command_buffer = device
                .allocate_command_buffers(&alloc_info)
                .map_err(|e| {
                    render_error!(SOURCE, "Failed to allocate command buffer: {:?}", e);
                    Error::InitializationFailed(format!(
                        "Failed to allocate command buffer: {:?}",
                        e
                    ))
                })?[0];

            let fence_info = vk::FenceCreateInfo::default();
            let render_fence = device.create_fence(&fence_info, None).map_err(|e| {
                render_error!(SOURCE, "Failed to create render fence: {:?}", e);
                Error::InitializationFailed(format!("Failed to create render fence: {:?}", e))
            })?;

            // Scene memory, descriptors, and the registry over both
            let descriptors = SceneDescriptors::new(device.clone())?;
            let slab = VulkanSceneSlab::new(Arc::clone(&gpu_context))?;
            descriptors.write_static(&slab.descriptor_infos());
            let scene = SceneRegistry::new(Box::new(slab));

            // Shader modules are kept for the renderer's lifetime; the
            // pipeline is rebuilt from them on each resize
            let vertex_shader = ShaderModule::new(device.clone(), &desc.vertex_shader)?;
            let fragment_shader = ShaderModule::new(device.clone(), &desc.fragment_shader)?;

            render_info!(SOURCE, "Offscreen renderer initialized");

            Ok(Self {
                _entry: entry,
                instance,
                device,
                allocator: ManuallyDrop::new(allocator),
                gpu_context,
                debug_utils_loader,
                debug_messenger,
                scene: Some(scene),
                descriptors: Some(descriptors),
                vertex_shader: Some(vertex_shader),
                fragment_shader: Some(fragment_shader),
                render_pass: None,
                targets: None,
                command_pool,
                command_buffer,
                render_fence,
                width: 0,
                height: 0,
                frame_recorded: false,
            })
        }
    }

    // ===== VIEWPORT =====

    /// Create the render targets for a viewport of the given size
    ///
    /// Must be called once before recording frames. The render pass is
    /// created here on first use and survives later resizes.
    pub fn init_viewport(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidResource(format!(
                "Viewport size must be non-zero (got {}x{})",
                width, height
            )));
        }

        if self.render_pass.is_none() {
            self.render_pass = Some(RenderPass::offscreen(self.device.clone())?);
        }

        self.width = width;
        self.height = height;
        self.targets = Some(self.create_targets(width, height)?);
        self.frame_recorded = false;

        render_info!(SOURCE, "Viewport initialized at {}x{}", width, height);
        Ok(())
    }

    fn create_targets(&self, width: u32, height: u32) -> Result<ViewportTargets> {
        let render_pass = self
            .render_pass
            .as_ref()
            .ok_or_else(|| Error::InitializationFailed("Render pass not created".to_string()))?;
        let descriptors = self
            .descriptors
            .as_ref()
            .ok_or_else(|| Error::InitializationFailed("Descriptors not created".to_string()))?;
        let (vertex_shader, fragment_shader) =
            match (self.vertex_shader.as_ref(), self.fragment_shader.as_ref()) {
                (Some(v), Some(f)) => (v, f),
                _ => {
                    return Err(Error::InitializationFailed(
                        "Shader modules not created".to_string(),
                    ))
                }
            };

        let color = Attachment::color(Arc::clone(&self.gpu_context), COLOR_FORMAT, width, height)?;
        let depth = Attachment::depth(Arc::clone(&self.gpu_context), DEPTH_FORMAT, width, height)?;

        let pipeline = Pipeline::raster(
            self.device.clone(),
            render_pass,
            descriptors.pipeline_layout,
            vertex_shader,
            fragment_shader,
            width,
            height,
        )?;

        let framebuffer = Framebuffer::new(
            self.device.clone(),
            render_pass,
            &color,
            &depth,
            width,
            height,
        )?;

        Ok(ViewportTargets {
            framebuffer,
            pipeline,
            color,
            depth,
        })
    }

    /// Resize the viewport and re-record the frame into `readback`
    ///
    /// Waits for the device to go idle, drops the old attachments, pipeline,
    /// and framebuffer, rebuilds them at the new size, and records a fresh
    /// frame. Render pass, descriptors, and scene memory are untouched. If
    /// recreation fails midway the old targets are already gone; the
    /// renderer stays usable and a later resize can retry.
    pub fn resize_viewport(
        &mut self,
        width: u32,
        height: u32,
        readback: &BufferRegion,
    ) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidResource(format!(
                "Viewport size must be non-zero (got {}x{})",
                width, height
            )));
        }

        self.wait_idle()?;

        // Old targets must be gone before their replacements exist
        self.targets = None;
        self.frame_recorded = false;

        self.width = width;
        self.height = height;
        self.targets = Some(self.create_targets(width, height)?);

        render_debug!(SOURCE, "Viewport resized to {}x{}", width, height);

        self.record_frame(readback)
    }

    /// Drop the viewport-sized resources without dropping the renderer
    ///
    /// After this, `init_viewport` must be called before recording again.
    pub fn release_targets(&mut self) {
        if self.targets.is_some() {
            unsafe {
                self.device.device_wait_idle().ok();
            }
            self.targets = None;
            self.frame_recorded = false;
            render_debug!(SOURCE, "Viewport targets released");
        }
    }

    // ===== SCENE =====

    /// Register a primitive with its material and model transform
    pub fn register(
        &mut self,
        primitive: Primitive,
        material: Material,
        transform: Mat4,
    ) -> Result<PrimId> {
        self.scene_mut()?.register(primitive, material, transform)
    }

    /// Write a new camera into scene memory
    pub fn update_camera(&mut self, view: Mat4, proj: Mat4) -> Result<()> {
        self.scene_mut()?.update_camera(view, proj);
        Ok(())
    }

    /// Scene registry (read access)
    pub fn scene(&self) -> Result<&SceneRegistry> {
        self.scene
            .as_ref()
            .ok_or_else(|| Error::InitializationFailed("Scene not initialized".to_string()))
    }

    fn scene_mut(&mut self) -> Result<&mut SceneRegistry> {
        self.scene
            .as_mut()
            .ok_or_else(|| Error::InitializationFailed("Scene not initialized".to_string()))
    }

    // ===== BUFFERS =====

    /// Host-visible vertex buffer tied to this renderer's device
    pub fn create_vertex_buffer(&self, size: u64) -> Result<Arc<Buffer>> {
        Ok(Arc::new(Buffer::vertex(
            Arc::clone(&self.gpu_context),
            size,
        )?))
    }

    /// Host-visible index buffer tied to this renderer's device
    pub fn create_index_buffer(&self, size: u64) -> Result<Arc<Buffer>> {
        Ok(Arc::new(Buffer::index(Arc::clone(&self.gpu_context), size)?))
    }

    /// Host-readable buffer receiving the frame copy
    ///
    /// Size it with `frame_byte_size()`, or larger when the frame lands at
    /// an offset inside a bigger buffer.
    pub fn create_readback_buffer(&self, size: u64) -> Result<Arc<Buffer>> {
        Ok(Arc::new(Buffer::readback(
            Arc::clone(&self.gpu_context),
            size,
        )?))
    }

    /// Bytes one frame of the current viewport occupies (tightly packed
    /// R8G8B8A8)
    pub fn frame_byte_size(&self) -> u64 {
        self.width as u64 * self.height as u64 * READBACK_PIXEL_SIZE
    }

    // ===== FRAME =====

    /// Record the frame: clear, draw every primitive, copy the color
    /// attachment into `readback`
    ///
    /// The recorded commands are reused by every `render()` call until the
    /// scene or viewport changes and the frame is re-recorded.
    pub fn record_frame(&mut self, readback: &BufferRegion) -> Result<()> {
        let targets = self
            .targets
            .as_ref()
            .ok_or_else(|| Error::InitializationFailed("Viewport not initialized".to_string()))?;
        let descriptors = self
            .descriptors
            .as_ref()
            .ok_or_else(|| Error::InitializationFailed("Descriptors not created".to_string()))?;
        let scene = self
            .scene
            .as_ref()
            .ok_or_else(|| Error::InitializationFailed("Scene not initialized".to_string()))?;

        // The copy writes a full tightly packed frame at the region start
        let required = self.width as u64 * self.height as u64 * READBACK_PIXEL_SIZE;
        if readback.size < required || !readback.in_bounds() {
            return Err(Error::InvalidResource(format!(
                "Readback region holds {} bytes, frame needs {}",
                readback.size.min(readback.buffer.size()),
                required
            )));
        }

        // All bindings are static; the hook stays in the frame path for
        // bindings that would change between frames
        descriptors.update_dynamic();

        unsafe {
            self.device
                .reset_command_pool(self.command_pool, vk::CommandPoolResetFlags::empty())
                .map_err(|e| render_err!(SOURCE, "Failed to reset command pool: {:?}", e))?;

            let begin_info = vk::CommandBufferBeginInfo::default();
            self.device
                .begin_command_buffer(self.command_buffer, &begin_info)
                .map_err(|e| render_err!(SOURCE, "Failed to begin command buffer: {:?}", e))?;

            self.device.cmd_bind_pipeline(
                self.command_buffer,
                vk::PipelineBindPoint::GRAPHICS,
                targets.pipeline.pipeline,
            );

            self.device.cmd_bind_descriptor_sets(
                self.command_buffer,
                vk::PipelineBindPoint::GRAPHICS,
                descriptors.pipeline_layout,
                0,
                &[descriptors.set],
                &[],
            );

            let clears = [
                vk::ClearValue {
                    color: vk::ClearColorValue {
                        float32: CLEAR_COLOR,
                    },
                },
                vk::ClearValue {
                    depth_stencil: vk::ClearDepthStencilValue {
                        depth: CLEAR_DEPTH,
                        stencil: 0,
                    },
                },
            ];

            let render_pass = self.render_pass.as_ref().ok_or_else(|| {
                Error::InitializationFailed("Render pass not created".to_string())
            })?;

            let rpass_info = vk::RenderPassBeginInfo::default()
                .render_pass(render_pass.render_pass)
                .framebuffer(targets.framebuffer.framebuffer)
                .render_area(vk::Rect2D {
                    offset: vk::Offset2D { x: 0, y: 0 },
                    extent: vk::Extent2D {
                        width: self.width,
                        height: self.height,
                    },
                })
                .clear_values(&clears);

            self.device.cmd_begin_render_pass(
                self.command_buffer,
                &rpass_info,
                vk::SubpassContents::INLINE,
            );

            for call in scene.draw_calls() {
                // Downcast the opaque buffers back to Vulkan buffers
                let vertex_buffer =
                    call.vertex_buffer.as_ref() as *const dyn GpuBuffer as *const Buffer;
                let index_buffer =
                    call.index_buffer.as_ref() as *const dyn GpuBuffer as *const Buffer;

                // Both attribute streams come from the same buffer, bound at
                // their per-stream offsets
                let vert_buffers = [(*vertex_buffer).buffer, (*vertex_buffer).buffer];
                self.device.cmd_bind_vertex_buffers(
                    self.command_buffer,
                    0,
                    &vert_buffers,
                    &call.vertex_offsets,
                );

                self.device.cmd_bind_index_buffer(
                    self.command_buffer,
                    (*index_buffer).buffer,
                    call.index_offset,
                    vk::IndexType::UINT32,
                );

                self.device
                    .cmd_draw_indexed(self.command_buffer, call.index_count, 1, 0, 0, 0);
            }

            self.device.cmd_end_render_pass(self.command_buffer);

            // Copy the (now TRANSFER_SRC) color attachment into the caller's
            // buffer, tightly packed
            let readback_buffer =
                readback.buffer.as_ref() as *const dyn GpuBuffer as *const Buffer;

            let img_copy = vk::BufferImageCopy {
                buffer_offset: readback.offset,
                buffer_row_length: 0,
                buffer_image_height: 0,
                image_subresource: vk::ImageSubresourceLayers {
                    aspect_mask: vk::ImageAspectFlags::COLOR,
                    mip_level: 0,
                    base_array_layer: 0,
                    layer_count: 1,
                },
                image_offset: vk::Offset3D { x: 0, y: 0, z: 0 },
                image_extent: targets.color.extent,
            };

            self.device.cmd_copy_image_to_buffer(
                self.command_buffer,
                targets.color.image,
                vk::ImageLayout::TRANSFER_SRC_OPTIMAL,
                (*readback_buffer).buffer,
                &[img_copy],
            );

            self.device
                .end_command_buffer(self.command_buffer)
                .map_err(|e| render_err!(SOURCE, "Failed to end command buffer: {:?}", e))?;
        }

        self.frame_recorded = true;
        scene.log_materials();

        Ok(())
    }

    /// Submit the recorded frame and block until the pixels are readable
    pub fn render(&mut self) -> Result<()> {
        if !self.frame_recorded {
            return Err(Error::InvalidResource(
                "No recorded frame to submit".to_string(),
            ));
        }

        unsafe {
            let command_buffers = [self.command_buffer];
            let submit_info = vk::SubmitInfo::default().command_buffers(&command_buffers);

            self.device
                .queue_submit(
                    self.gpu_context.graphics_queue,
                    &[submit_info],
                    self.render_fence,
                )
                .map_err(|e| render_err!(SOURCE, "Failed to submit frame: {:?}", e))?;

            self.device
                .wait_for_fences(&[self.render_fence], true, u64::MAX)
                .map_err(|e| render_err!(SOURCE, "Failed to wait for render fence: {:?}", e))?;

            self.device
                .reset_fences(&[self.render_fence])
                .map_err(|e| render_err!(SOURCE, "Failed to reset render fence: {:?}", e))?;
        }

        Ok(())
    }

    /// Block until the device has finished all submitted work
    pub fn wait_idle(&self) -> Result<()> {
        unsafe {
            self.device
                .device_wait_idle()
                .map_err(|e| render_err!(SOURCE, "Failed to wait idle: {:?}", e))
        }
    }

    /// Current viewport size
    pub fn viewport_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Drop for OffscreenRenderer {
    fn drop(&mut self) {
        unsafe {
            // Wait for device to finish
            self.device.device_wait_idle().ok();

            // 1. Drop everything holding buffers or views while the device
            //    and allocator are alive
            self.scene = None;
            self.targets = None;
            self.render_pass = None;
            self.vertex_shader = None;
            self.fragment_shader = None;
            self.descriptors = None;

            // 2. Destroy renderer-owned Vulkan objects
            self.device.destroy_fence(self.render_fence, None);
            self.device.destroy_command_pool(self.command_pool, None);

            // 3. Drop allocator: free VkDeviceMemory pages BEFORE destroying
            //    the device. First this Arc, then GpuContext's ManuallyDrop
            //    Arc.
            ManuallyDrop::drop(&mut self.allocator);
            if let Some(ctx) = Arc::get_mut(&mut self.gpu_context) {
                ManuallyDrop::drop(&mut ctx.allocator);
            }

            // 4. Destroy debug messenger BEFORE device and instance
            if let (Some(debug_utils), Some(messenger)) =
                (&self.debug_utils_loader, &self.debug_messenger)
            {
                debug_utils.destroy_debug_utils_messenger(*messenger, None);
            }

            // 5. Destroy device and instance
            self.device.destroy_device(None);
            self.instance.destroy_instance(None);
        }
    }
}
