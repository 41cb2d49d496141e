/// Fixed-capacity scene registry

use crate::camera::CameraBlock;
use crate::scene::{DrawCall, Material, PrimId, Primitive, SceneSlab};
use crate::{render_debug, Error, Result};
use glam::Mat4;

/// Maximum number of primitives a scene can hold
///
/// The transform and material uniform arrays are sized to this at buffer
/// creation, so it is a hard limit rather than a growth hint.
pub const PRIM_CAPACITY: usize = 100;

const SOURCE: &str = "orrery::scene";

/// Bounded table of primitives with their shading and transform state
///
/// Primitive descriptors stay host-side; materials, transforms, and the
/// camera go straight into the slab (mapped GPU memory on a real backend).
/// Registration is append-only: ids are sequential, never reused, and there
/// is no removal short of dropping the whole scene.
pub struct SceneRegistry {
    slab: Box<dyn SceneSlab>,
    primitives: Vec<Primitive>,
}

impl SceneRegistry {
    /// Create an empty registry over the given scene memory
    pub fn new(slab: Box<dyn SceneSlab>) -> Self {
        Self {
            slab,
            primitives: Vec::with_capacity(PRIM_CAPACITY),
        }
    }

    /// Register a primitive with its material and model transform
    ///
    /// Returns the new primitive's id, which is also its index into the
    /// uniform arrays. Fails with `CapacityExceeded` when the registry is
    /// full; the failing call writes nothing, so the registry and slab are
    /// exactly as they were.
    pub fn register(
        &mut self,
        primitive: Primitive,
        material: Material,
        transform: Mat4,
    ) -> Result<PrimId> {
        if self.primitives.len() >= PRIM_CAPACITY {
            return Err(Error::CapacityExceeded {
                capacity: PRIM_CAPACITY,
            });
        }

        let id = PrimId(self.primitives.len() as u32);
        self.slab.write_material(id.index(), &material);
        self.slab.write_transform(id.index(), &transform);
        self.primitives.push(primitive);

        render_debug!(
            SOURCE,
            "Registered primitive {} ({} indices)",
            id.0,
            self.primitives[id.index()].index_count
        );

        Ok(id)
    }

    /// Number of registered primitives
    pub fn prim_count(&self) -> usize {
        self.primitives.len()
    }

    /// Write a new camera into scene memory, deriving the inverses
    pub fn update_camera(&mut self, view: Mat4, proj: Mat4) {
        let camera = CameraBlock::from_view_proj(view, proj);
        self.slab.write_camera(&camera);
    }

    /// Current camera record
    pub fn camera(&self) -> CameraBlock {
        self.slab.read_camera()
    }

    /// Geometry descriptor for a registered primitive
    pub fn primitive(&self, id: PrimId) -> Option<&Primitive> {
        self.primitives.get(id.index())
    }

    /// Material of a registered primitive
    pub fn material(&self, id: PrimId) -> Option<Material> {
        if id.index() < self.primitives.len() {
            Some(self.slab.read_material(id.index()))
        } else {
            None
        }
    }

    /// Model transform of a registered primitive
    pub fn transform(&self, id: PrimId) -> Option<Mat4> {
        if id.index() < self.primitives.len() {
            Some(self.slab.read_transform(id.index()))
        } else {
            None
        }
    }

    /// Replace the geometry of a registered primitive
    ///
    /// Not supported: registered geometry is immutable. Always returns
    /// `UnsupportedOperation`.
    pub fn update_primitive(&mut self, _id: PrimId, _primitive: Primitive) -> Result<()> {
        Err(Error::UnsupportedOperation(
            "update_primitive: registered geometry is immutable".to_string(),
        ))
    }

    /// Replace the model transform of a registered primitive
    ///
    /// Not supported: transforms are fixed at registration. Always returns
    /// `UnsupportedOperation`.
    pub fn update_transform(&mut self, _id: PrimId, _transform: Mat4) -> Result<()> {
        Err(Error::UnsupportedOperation(
            "update_transform: transforms are fixed at registration".to_string(),
        ))
    }

    /// Resolve every registered primitive into a draw call, in id order
    pub fn draw_calls(&self) -> Vec<DrawCall> {
        self.primitives.iter().map(Primitive::draw_call).collect()
    }

    /// Log the material of every registered primitive
    pub fn log_materials(&self) {
        for i in 0..self.primitives.len() {
            let material = self.slab.read_material(i);
            render_debug!(SOURCE, "Material {}: {:?}", i, material.color);
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
