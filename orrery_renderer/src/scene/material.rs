/// Material record uploaded into scene memory

use bytemuck::{Pod, Zeroable};
use glam::Vec4;

/// Per-primitive shading parameters
///
/// One record per registered primitive, stored at the primitive's index in
/// the materials uniform array.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Material {
    /// Base color (RGBA)
    pub color: Vec4,
}

impl Material {
    /// Material with the given base color
    pub fn new(color: Vec4) -> Self {
        Self { color }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}
