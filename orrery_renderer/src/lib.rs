/*!
# Orrery Renderer

Core types for the Orrery offscreen scene renderer.

This crate provides the backend-agnostic half of the renderer: a
fixed-capacity scene registry mapped onto GPU-visible uniform memory, the
camera record with precomputed inverses, and the trait seams a backend
implements (`GpuBuffer`, `SceneSlab`). The Vulkan backend lives in the
`orrery_renderer_vulkan` crate.

## Architecture

- **SceneRegistry**: bounded table of primitives/materials/transforms/camera
- **SceneSlab**: mapped scene memory contract (uniform buffers on a GPU,
  host arrays in tests)
- **GpuBuffer**: opaque handle to backend vertex/index memory
- **CameraBlock**: view/projection matrices plus their inverses
*/

mod error;
pub mod log;
pub mod graphics;
pub mod camera;
pub mod scene;

pub use error::{Error, Result};

// Re-export math library at crate root
pub use glam;
