/// Camera uniform record

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Camera record laid out for direct upload into a uniform buffer
///
/// Shaders read the view/projection pair for rasterization and the
/// precomputed inverses for reconstructing rays and world positions, so the
/// inverses are computed once on the host instead of per-invocation on the
/// GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraBlock {
    /// World-to-view transform
    pub view: Mat4,
    /// View-to-clip transform
    pub proj: Mat4,
    /// Inverse of `view` (view-to-world)
    pub view_inv: Mat4,
    /// Inverse of `proj` (clip-to-view)
    pub proj_inv: Mat4,
}

impl CameraBlock {
    /// Build a camera record from view and projection matrices
    ///
    /// The inverses are derived here; callers supply only the two forward
    /// transforms.
    pub fn from_view_proj(view: Mat4, proj: Mat4) -> Self {
        Self {
            view,
            proj,
            view_inv: view.inverse(),
            proj_inv: proj.inverse(),
        }
    }

    /// Identity camera (all four matrices identity)
    pub fn identity() -> Self {
        Self {
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
            view_inv: Mat4::IDENTITY,
            proj_inv: Mat4::IDENTITY,
        }
    }
}

impl Default for CameraBlock {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
