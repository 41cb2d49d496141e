//! Scene registry and the mapped memory it writes into
//!
//! The registry owns the CPU-side bookkeeping (primitive table, prim count)
//! and writes camera/material/transform records straight into a `SceneSlab`,
//! which a backend implements over persistently mapped uniform buffers.

mod host_slab;
mod material;
mod primitive;
mod registry;
mod slab;

pub use host_slab::HostSceneSlab;
pub use material::Material;
pub use primitive::{DrawCall, PrimId, Primitive};
pub use registry::{SceneRegistry, PRIM_CAPACITY};
pub use slab::SceneSlab;
