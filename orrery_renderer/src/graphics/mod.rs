//! Backend-facing graphics resource seams
//!
//! The registry and frame recorder never touch native GPU handles directly;
//! they hold `Arc<dyn GpuBuffer>` and byte ranges into them. The Vulkan
//! backend downcasts these back to its concrete buffer type when recording
//! commands.

mod buffer;
mod mock_buffer;

pub use buffer::{BufferRegion, GpuBuffer};
pub use mock_buffer::MockBuffer;
