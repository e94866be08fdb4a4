/// Vulkan render target backend
///
/// Turns attachment descriptions into `VkImageView`s on one logical device.
/// Attribute queries use the default resolution: views answer with their
/// raw handle and the layout to bind it in.

use nebula_engine::nebula::render::{
    BackendKind, RenderTargetBackend, TextureView as RendererTextureView, TextureViewInfo,
};
use nebula_engine::nebula::target::RenderSurfaceDesc;
use nebula_engine::nebula::Result;
use nebula_engine::{engine_bail, engine_err, engine_trace};
use ash::vk;
use std::sync::Arc;

use crate::vulkan_context::GpuContext;
use crate::vulkan_format::{aspect_mask, format_to_vk, view_type};
use crate::vulkan_texture::Texture;
use crate::vulkan_texture_view::TextureView;

/// Vulkan render target backend
pub struct VulkanRenderTargetBackend {
    context: Arc<GpuContext>,
}

impl VulkanRenderTargetBackend {
    pub fn new(context: Arc<GpuContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Arc<GpuContext> {
        &self.context
    }
}

impl RenderTargetBackend for VulkanRenderTargetBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Vulkan
    }

    /// Device groups are not used; every target lives on the context's device
    fn devices_supported(&self) -> u32 {
        1
    }

    fn create_texture_view(
        &self,
        surface: &RenderSurfaceDesc,
        info: &TextureViewInfo,
        _device_index: u32,
    ) -> Result<Box<dyn RendererTextureView>> {
        let Some(texture) = surface.texture.as_any().downcast_ref::<Texture>() else {
            engine_bail!("nebula::vulkan" => InvalidDescriptor,
                "Attachment texture is not a Vulkan texture");
        };
        if !texture.context.same_device(&self.context) {
            engine_bail!("nebula::vulkan" => InvalidDescriptor,
                "Attachment texture belongs to another Vulkan device");
        }

        let create_info = vk::ImageViewCreateInfo::default()
            .image(texture.image)
            .view_type(view_type(info.num_faces))
            .format(format_to_vk(info.format))
            .components(vk::ComponentMapping {
                r: vk::ComponentSwizzle::IDENTITY,
                g: vk::ComponentSwizzle::IDENTITY,
                b: vk::ComponentSwizzle::IDENTITY,
                a: vk::ComponentSwizzle::IDENTITY,
            })
            .subresource_range(vk::ImageSubresourceRange {
                aspect_mask: aspect_mask(info.format),
                base_mip_level: info.mip_level,
                level_count: 1,
                base_array_layer: info.first_face,
                layer_count: info.num_faces,
            });

        let image_view = unsafe {
            self.context.device.create_image_view(&create_info, None)
                .map_err(|e| engine_err!("nebula::vulkan" => ResourceCreationFailure,
                    "Failed to create {:?} image view: {:?}", info.kind, e))?
        };

        engine_trace!("nebula::vulkan", "Created {:?} image view {:?} ({}x{}, mip {}, layers {}..{})",
            info.kind, image_view, info.width, info.height, info.mip_level,
            info.first_face, info.first_face + info.num_faces);

        Ok(Box::new(TextureView::new(self.context.clone(), image_view, info.clone())))
    }
}
