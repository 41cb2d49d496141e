/// Host-array SceneSlab for device-free testing

use crate::camera::CameraBlock;
use crate::scene::{Material, SceneSlab, PRIM_CAPACITY};
use glam::Mat4;

/// SceneSlab backed by plain host arrays
///
/// Mirrors the layout the Vulkan backend maps into uniform buffers, letting
/// registry logic run without a device.
pub struct HostSceneSlab {
    camera: CameraBlock,
    materials: Vec<Material>,
    transforms: Vec<Mat4>,
}

impl HostSceneSlab {
    pub fn new() -> Self {
        Self {
            camera: CameraBlock::identity(),
            materials: vec![Material::default(); PRIM_CAPACITY],
            transforms: vec![Mat4::IDENTITY; PRIM_CAPACITY],
        }
    }
}

impl Default for HostSceneSlab {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneSlab for HostSceneSlab {
    fn write_camera(&mut self, camera: &CameraBlock) {
        self.camera = *camera;
    }

    fn read_camera(&self) -> CameraBlock {
        self.camera
    }

    fn write_material(&mut self, index: usize, material: &Material) {
        self.materials[index] = *material;
    }

    fn read_material(&self, index: usize) -> Material {
        self.materials[index]
    }

    fn write_transform(&mut self, index: usize, transform: &Mat4) {
        self.transforms[index] = *transform;
    }

    fn read_transform(&self, index: usize) -> Mat4 {
        self.transforms[index]
    }
}
