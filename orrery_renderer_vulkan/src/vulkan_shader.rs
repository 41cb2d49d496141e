/// ShaderModule - SPIR-V module wrapper

use orrery_renderer::{render_err, Error, Result};
use ash::vk;

/// Vulkan shader module wrapper
///
/// Created once from caller-supplied SPIR-V and reused every time the
/// pipeline is rebuilt (each resize).
pub struct ShaderModule {
    pub(crate) module: vk::ShaderModule,
    device: ash::Device,
}

impl ShaderModule {
    pub fn new(device: ash::Device, code: &[u8]) -> Result<Self> {
        if code.is_empty() || code.len() % 4 != 0 {
            return Err(Error::InvalidResource(format!(
                "SPIR-V code must be a non-empty multiple of 4 bytes (got {} bytes)",
                code.len()
            )));
        }

        // Copy into an aligned Vec<u32>; the input slice may not be 4-byte
        // aligned
        let mut code_u32 = vec![0u32; code.len() / 4];
        for (word, chunk) in code_u32.iter_mut().zip(code.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        unsafe {
            let create_info = vk::ShaderModuleCreateInfo::default().code(&code_u32);

            let module = device
                .create_shader_module(&create_info, None)
                .map_err(|e| render_err!("orrery::vulkan", "Failed to create shader module: {:?}", e))?;

            Ok(Self { module, device })
        }
    }
}

impl Drop for ShaderModule {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_shader_module(self.module, None);
        }
    }
}
