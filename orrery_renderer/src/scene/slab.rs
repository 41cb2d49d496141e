/// SceneSlab trait: mapped scene memory contract

use crate::camera::CameraBlock;
use crate::scene::Material;
use glam::Mat4;

/// Mapped scene memory
///
/// Backs the registry's camera/material/transform records. The Vulkan
/// backend implements this over three persistently mapped uniform buffers;
/// tests use host arrays. Writes land in caller-visible memory immediately
/// and cannot fail; index bounds are enforced by the registry before any
/// write.
pub trait SceneSlab: Send {
    /// Write the camera record
    fn write_camera(&mut self, camera: &CameraBlock);

    /// Read the camera record back
    fn read_camera(&self) -> CameraBlock;

    /// Write the material record at `index`
    fn write_material(&mut self, index: usize, material: &Material);

    /// Read the material record at `index`
    fn read_material(&self, index: usize) -> Material;

    /// Write the model transform at `index`
    fn write_transform(&mut self, index: usize, transform: &Mat4);

    /// Read the model transform at `index`
    fn read_transform(&self, index: usize) -> Mat4;
}
