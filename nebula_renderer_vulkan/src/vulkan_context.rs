/// GpuContext - Shared Vulkan objects for render target resources
///
/// Holds what textures and views need to create and destroy native
/// objects: the logical device and a memory allocator.

use ash::vk;
use gpu_allocator::vulkan::{Allocator, AllocatorCreateDesc};
use nebula_engine::nebula::{Error, Result};
use nebula_engine::engine_error;
use std::mem::ManuallyDrop;
use std::sync::{Arc, Mutex};

/// Shared GPU context for all Vulkan render target resources.
///
/// Shared (via `Arc`) by every texture and view so each resource can
/// release its own native objects on drop.
///
/// The instance and logical device are created and destroyed by the
/// application's device bootstrap. They must outlive every `GpuContext`
/// built from them.
pub struct GpuContext {
    /// Vulkan logical device
    pub device: ash::Device,

    /// Physical device the logical device was created from
    pub physical_device: vk::PhysicalDevice,

    /// GPU memory allocator
    /// Wrapped in ManuallyDrop so its memory blocks are freed explicitly in Drop
    pub allocator: ManuallyDrop<Arc<Mutex<Allocator>>>,

    /// Vulkan instance (kept for reference, destroyed by the bootstrap)
    #[allow(dead_code)]
    instance: ash::Instance,
}

impl GpuContext {
    /// Create a new GPU context over an existing device
    ///
    /// # Arguments
    ///
    /// * `instance` - Vulkan instance
    /// * `physical_device` - Physical device backing `device`
    /// * `device` - Vulkan logical device
    pub fn new(
        instance: &ash::Instance,
        physical_device: vk::PhysicalDevice,
        device: &ash::Device,
    ) -> Result<Self> {
        let allocator = Allocator::new(&AllocatorCreateDesc {
            instance: instance.clone(),
            device: device.clone(),
            physical_device,
            debug_settings: Default::default(),
            buffer_device_address: false,
            allocation_sizes: Default::default(),
        })
        .map_err(|e| {
            engine_error!("nebula::vulkan", "Failed to create GPU allocator: {:?}", e);
            Error::InitializationFailed(format!("Failed to create allocator: {:?}", e))
        })?;

        Ok(Self {
            device: device.clone(),
            physical_device,
            allocator: ManuallyDrop::new(Arc::new(Mutex::new(allocator))),
            instance: instance.clone(),
        })
    }

    /// True if both contexts drive the same logical device
    pub fn same_device(&self, other: &GpuContext) -> bool {
        self.device.handle() == other.device.handle()
    }
}

impl Drop for GpuContext {
    fn drop(&mut self) {
        // Free allocator memory blocks while the device is still alive
        unsafe {
            ManuallyDrop::drop(&mut self.allocator);
        }
    }
}
