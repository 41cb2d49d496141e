/// SceneDescriptors - the renderer's single descriptor set and pipeline layout

use orrery_renderer::{render_err, Result};
use ash::vk;

const SOURCE: &str = "orrery::vulkan";

/// Descriptor set layout, pool, set, and pipeline layout for the scene
///
/// One set, three uniform-buffer bindings:
/// - 0: camera (vertex + fragment)
/// - 1: primitive transforms (vertex)
/// - 2: materials (fragment + vertex)
///
/// Everything here is size-independent and lives for the renderer's whole
/// lifetime; resize never touches it.
pub struct SceneDescriptors {
    pub(crate) set_layout: vk::DescriptorSetLayout,
    pub(crate) pool: vk::DescriptorPool,
    pub(crate) set: vk::DescriptorSet,
    pub(crate) pipeline_layout: vk::PipelineLayout,
    device: ash::Device,
}

impl SceneDescriptors {
    pub fn new(device: ash::Device) -> Result<Self> {
        unsafe {
            let bindings = [
                // camera
                vk::DescriptorSetLayoutBinding::default()
                    .binding(0)
                    .descriptor_type(vk::DescriptorType::UNIFORM_BUFFER)
                    .descriptor_count(1)
                    .stage_flags(vk::ShaderStageFlags::VERTEX | vk::ShaderStageFlags::FRAGMENT),
                // prim transforms
                vk::DescriptorSetLayoutBinding::default()
                    .binding(1)
                    .descriptor_type(vk::DescriptorType::UNIFORM_BUFFER)
                    .descriptor_count(1)
                    .stage_flags(vk::ShaderStageFlags::VERTEX),
                // materials
                vk::DescriptorSetLayoutBinding::default()
                    .binding(2)
                    .descriptor_type(vk::DescriptorType::UNIFORM_BUFFER)
                    .descriptor_count(1)
                    .stage_flags(vk::ShaderStageFlags::FRAGMENT | vk::ShaderStageFlags::VERTEX),
            ];

            let layout_info = vk::DescriptorSetLayoutCreateInfo::default().bindings(&bindings);

            let set_layout = device
                .create_descriptor_set_layout(&layout_info, None)
                .map_err(|e| {
                    render_err!(SOURCE, "Failed to create descriptor set layout: {:?}", e)
                })?;

            let pool_sizes = [vk::DescriptorPoolSize {
                ty: vk::DescriptorType::UNIFORM_BUFFER,
                descriptor_count: bindings.len() as u32,
            }];

            let pool_info = vk::DescriptorPoolCreateInfo::default()
                .max_sets(1)
                .pool_sizes(&pool_sizes);

            let pool = device
                .create_descriptor_pool(&pool_info, None)
                .map_err(|e| render_err!(SOURCE, "Failed to create descriptor pool: {:?}", e))?;

            let set_layouts = [set_layout];
            let alloc_info = vk::DescriptorSetAllocateInfo::default()
                .descriptor_pool(pool)
                .set_layouts(&set_layouts);

            let set = device
                .allocate_descriptor_sets(&alloc_info)
                .map_err(|e| render_err!(SOURCE, "Failed to allocate descriptor set: {:?}", e))?[0];

            let pipeline_layout_info =
                vk::PipelineLayoutCreateInfo::default().set_layouts(&set_layouts);

            let pipeline_layout = device
                .create_pipeline_layout(&pipeline_layout_info, None)
                .map_err(|e| render_err!(SOURCE, "Failed to create pipeline layout: {:?}", e))?;

            Ok(Self {
                set_layout,
                pool,
                set,
                pipeline_layout,
                device,
            })
        }
    }

    /// Point the three bindings at the scene buffers
    ///
    /// Called once after the scene slab is allocated; the bindings never move
    /// afterwards.
    pub fn write_static(&self, infos: &[vk::DescriptorBufferInfo; 3]) {
        unsafe {
            let writes = [
                vk::WriteDescriptorSet::default()
                    .dst_set(self.set)
                    .dst_binding(0)
                    .descriptor_type(vk::DescriptorType::UNIFORM_BUFFER)
                    .buffer_info(std::slice::from_ref(&infos[0])),
                vk::WriteDescriptorSet::default()
                    .dst_set(self.set)
                    .dst_binding(1)
                    .descriptor_type(vk::DescriptorType::UNIFORM_BUFFER)
                    .buffer_info(std::slice::from_ref(&infos[1])),
                vk::WriteDescriptorSet::default()
                    .dst_set(self.set)
                    .dst_binding(2)
                    .descriptor_type(vk::DescriptorType::UNIFORM_BUFFER)
                    .buffer_info(std::slice::from_ref(&infos[2])),
            ];

            self.device.update_descriptor_sets(&writes, &[]);
        }
    }

    /// Per-frame descriptor refresh hook
    ///
    /// Intentionally empty: every binding is static. Kept as the insertion
    /// point for bindings that would change between frames.
    pub fn update_dynamic(&self) {}
}

impl Drop for SceneDescriptors {
    fn drop(&mut self) {
        unsafe {
            self.device
                .destroy_pipeline_layout(self.pipeline_layout, None);
            // Frees the set as well
            self.device.destroy_descriptor_pool(self.pool, None);
            self.device
                .destroy_descriptor_set_layout(self.set_layout, None);
        }
    }
}
