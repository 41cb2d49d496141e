/// VulkanSceneSlab - SceneSlab over persistently mapped uniform buffers

use orrery_renderer::camera::CameraBlock;
use orrery_renderer::scene::{Material, SceneSlab, PRIM_CAPACITY};
use orrery_renderer::{render_error, Error, Result};
use ash::vk;
use std::mem::size_of;
use std::sync::Arc;

use crate::vulkan_buffer::Buffer;
use crate::vulkan_context::GpuContext;

const SOURCE: &str = "orrery::vulkan";

/// Scene memory as three mapped uniform buffers
///
/// Camera, transforms, and materials each get their own buffer; the
/// descriptor set binds all three once at startup. Writes go straight
/// through the mapped pointers, so a registered material is GPU-visible
/// without any flush or upload pass.
pub struct VulkanSceneSlab {
    camera: Buffer,
    transforms: Buffer,
    materials: Buffer,
}

impl VulkanSceneSlab {
    /// Allocate the three scene buffers
    ///
    /// Fails if any allocation lands in unmapped memory; the slab contract
    /// requires writes to be infallible afterwards.
    pub fn new(ctx: Arc<GpuContext>) -> Result<Self> {
        let camera = Buffer::uniform(ctx.clone(), size_of::<CameraBlock>() as u64)?;
        let transforms = Buffer::uniform(
            ctx.clone(),
            (PRIM_CAPACITY * size_of::<[f32; 16]>()) as u64,
        )?;
        let materials = Buffer::uniform(ctx, (PRIM_CAPACITY * size_of::<Material>()) as u64)?;

        for (name, buffer) in [
            ("camera", &camera),
            ("transforms", &transforms),
            ("materials", &materials),
        ] {
            if !buffer.is_mapped() {
                return Err(Error::InitializationFailed(format!(
                    "Scene {} buffer is not host-mapped",
                    name
                )));
            }
        }

        Ok(Self {
            camera,
            transforms,
            materials,
        })
    }

    /// Descriptor infos for the camera/transforms/materials bindings, in
    /// binding order
    pub fn descriptor_infos(&self) -> [vk::DescriptorBufferInfo; 3] {
        [
            vk::DescriptorBufferInfo {
                buffer: self.camera.buffer,
                offset: 0,
                range: self.camera.size,
            },
            vk::DescriptorBufferInfo {
                buffer: self.transforms.buffer,
                offset: 0,
                range: self.transforms.size,
            },
            vk::DescriptorBufferInfo {
                buffer: self.materials.buffer,
                offset: 0,
                range: self.materials.size,
            },
        ]
    }

    // Mapping was checked at construction, so a failed write means the
    // allocation disappeared underneath us; log it rather than panic.
    fn write_checked(buffer: &Buffer, offset: u64, data: &[u8], what: &str) {
        if buffer.write(offset, data).is_err() {
            render_error!(SOURCE, "Scene {} write hit an unmapped buffer", what);
        }
    }

    fn read_checked(buffer: &Buffer, offset: u64, out: &mut [u8], what: &str) {
        if buffer.read(offset, out).is_err() {
            render_error!(SOURCE, "Scene {} read hit an unmapped buffer", what);
        }
    }
}

impl SceneSlab for VulkanSceneSlab {
    fn write_camera(&mut self, camera: &CameraBlock) {
        Self::write_checked(&self.camera, 0, bytemuck::bytes_of(camera), "camera");
    }

    fn read_camera(&self) -> CameraBlock {
        let mut camera = CameraBlock::identity();
        Self::read_checked(
            &self.camera,
            0,
            bytemuck::bytes_of_mut(&mut camera),
            "camera",
        );
        camera
    }

    fn write_material(&mut self, index: usize, material: &Material) {
        let offset = (index * size_of::<Material>()) as u64;
        Self::write_checked(
            &self.materials,
            offset,
            bytemuck::bytes_of(material),
            "material",
        );
    }

    fn read_material(&self, index: usize) -> Material {
        let mut material = Material::default();
        let offset = (index * size_of::<Material>()) as u64;
        Self::read_checked(
            &self.materials,
            offset,
            bytemuck::bytes_of_mut(&mut material),
            "material",
        );
        material
    }

    fn write_transform(&mut self, index: usize, transform: &orrery_renderer::glam::Mat4) {
        let offset = (index * size_of::<[f32; 16]>()) as u64;
        Self::write_checked(
            &self.transforms,
            offset,
            bytemuck::bytes_of(transform),
            "transform",
        );
    }

    fn read_transform(&self, index: usize) -> orrery_renderer::glam::Mat4 {
        let mut transform = orrery_renderer::glam::Mat4::IDENTITY;
        let offset = (index * size_of::<[f32; 16]>()) as u64;
        Self::read_checked(
            &self.transforms,
            offset,
            bytemuck::bytes_of_mut(&mut transform),
            "transform",
        );
        transform
    }
}
