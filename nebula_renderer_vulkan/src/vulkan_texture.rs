/// Vulkan texture implementation

use nebula_engine::nebula::render::{Texture as RendererTexture, TextureDesc, TextureInfo};
use nebula_engine::nebula::Result;
use nebula_engine::{engine_bail, engine_err, engine_error};
use ash::vk;
use gpu_allocator::vulkan::{Allocation, AllocationCreateDesc, AllocationScheme};
use std::any::Any;
use std::sync::Arc;

use crate::vulkan_context::GpuContext;
use crate::vulkan_format::{format_to_vk, samples_to_vk, usage_to_vk};

/// Vulkan texture
///
/// Either owns its image and memory (`create`) or wraps an image owned
/// elsewhere (`from_raw`, e.g. swapchain images).
pub struct Texture {
    /// Vulkan image
    pub(crate) image: vk::Image,
    /// GPU memory allocation, `None` for wrapped images
    pub(crate) allocation: Option<Allocation>,
    /// Context the image was created on
    pub(crate) context: Arc<GpuContext>,
    info: TextureInfo,
}

impl Texture {
    /// Create a texture with its own image and GPU memory
    pub fn create(context: Arc<GpuContext>, desc: &TextureDesc) -> Result<Self> {
        let samples = validate_desc(desc)?;

        let image_info = vk::ImageCreateInfo::default()
            .image_type(vk::ImageType::TYPE_2D)
            .extent(vk::Extent3D {
                width: desc.width,
                height: desc.height,
                depth: 1,
            })
            .mip_levels(desc.mip_levels)
            .array_layers(desc.array_layers)
            .format(format_to_vk(desc.format))
            .tiling(vk::ImageTiling::OPTIMAL)
            .initial_layout(vk::ImageLayout::UNDEFINED)
            .usage(usage_to_vk(desc.usage))
            .samples(samples)
            .sharing_mode(vk::SharingMode::EXCLUSIVE);

        let device = &context.device;

        unsafe {
            let image = device.create_image(&image_info, None)
                .map_err(|e| engine_err!("nebula::vulkan::Texture" => ResourceCreationFailure,
                    "Failed to create image: {:?}", e))?;

            let requirements = device.get_image_memory_requirements(image);

            let allocation = match context.allocator.lock() {
                Ok(mut allocator) => allocator.allocate(&AllocationCreateDesc {
                    name: "render_texture",
                    requirements,
                    location: gpu_allocator::MemoryLocation::GpuOnly,
                    linear: false,
                    allocation_scheme: AllocationScheme::GpuAllocatorManaged,
                }),
                Err(_) => {
                    device.destroy_image(image, None);
                    engine_bail!("nebula::vulkan::Texture", "GPU allocator lock poisoned");
                }
            };
            let allocation = match allocation {
                Ok(allocation) => allocation,
                Err(e) => {
                    device.destroy_image(image, None);
                    engine_error!("nebula::vulkan::Texture",
                        "Out of GPU memory for {}x{} texture: {:?}", desc.width, desc.height, e);
                    return Err(nebula_engine::nebula::Error::OutOfMemory);
                }
            };

            if let Err(e) = device.bind_image_memory(image, allocation.memory(), allocation.offset()) {
                device.destroy_image(image, None);
                if let Ok(mut allocator) = context.allocator.lock() {
                    allocator.free(allocation).ok();
                }
                engine_bail!("nebula::vulkan::Texture" => ResourceCreationFailure,
                    "Failed to bind image memory: {:?}", e);
            }

            Ok(Self {
                image,
                allocation: Some(allocation),
                context: context.clone(),
                info: TextureInfo::from(desc),
            })
        }
    }

    /// Wrap an image owned elsewhere
    ///
    /// # Safety
    ///
    /// `image` must be a valid image of `context`'s device matching `desc`,
    /// and must outlive the returned texture and every view made from it.
    pub unsafe fn from_raw(context: Arc<GpuContext>, image: vk::Image, desc: &TextureDesc) -> Self {
        Self {
            image,
            allocation: None,
            context,
            info: TextureInfo::from(desc),
        }
    }

    /// Vulkan image handle
    pub fn image(&self) -> vk::Image {
        self.image
    }

    /// True if this texture owns its image and memory
    pub fn is_owned(&self) -> bool {
        self.allocation.is_some()
    }
}

/// Check a descriptor before any Vulkan call and pick the sample count flag
///
/// Counts are stored as given in `TextureInfo`, so zero sizes, layers or
/// mips are rejected rather than rounded up.
pub(crate) fn validate_desc(desc: &TextureDesc) -> Result<vk::SampleCountFlags> {
    if desc.width == 0 || desc.height == 0 {
        engine_bail!("nebula::vulkan::Texture" => InvalidDescriptor,
            "Texture size must be non-zero (got {}x{})", desc.width, desc.height);
    }
    if desc.array_layers == 0 || desc.mip_levels == 0 {
        engine_bail!("nebula::vulkan::Texture" => InvalidDescriptor,
            "Texture needs at least one layer and one mip (got {} layers, {} mips)",
            desc.array_layers, desc.mip_levels);
    }
    let max_mips = 32 - desc.width.max(desc.height).leading_zeros();
    if desc.mip_levels > max_mips {
        engine_bail!("nebula::vulkan::Texture" => InvalidDescriptor,
            "{} mips requested, a {}x{} texture has at most {}",
            desc.mip_levels, desc.width, desc.height, max_mips);
    }
    match samples_to_vk(desc.samples) {
        Some(samples) => Ok(samples),
        None => engine_bail!("nebula::vulkan::Texture" => UnsupportedConfiguration,
            "Unsupported sample count {}", desc.samples),
    }
}

impl RendererTexture for Texture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        // Wrapped images are released by their owner
        let Some(allocation) = self.allocation.take() else {
            return;
        };
        unsafe {
            if let Ok(mut allocator) = self.context.allocator.lock() {
                allocator.free(allocation).ok();
            }
            self.context.device.destroy_image(self.image, None);
        }
    }
}

#[cfg(test)]
#[path = "vulkan_texture_tests.rs"]
mod tests;
