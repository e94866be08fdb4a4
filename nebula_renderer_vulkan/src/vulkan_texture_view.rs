/// Vulkan texture view - owns one `VkImageView`

use nebula_engine::nebula::render::{
    NativeHandle, NativeImageLayout, TextureView as RendererTextureView, TextureViewInfo,
    TextureViewKind,
};
use ash::vk;
use std::sync::Arc;

use crate::vulkan_context::GpuContext;
use crate::vulkan_format::native_handle;

/// Vulkan attachment view
///
/// Depth/stencil views serve both the read-write and the read-only
/// attribute: Vulkan expresses read-only access through the image layout,
/// not through a separate view.
pub struct TextureView {
    pub(crate) image_view: vk::ImageView,
    info: TextureViewInfo,
    context: Arc<GpuContext>,
}

impl TextureView {
    pub(crate) fn new(context: Arc<GpuContext>, image_view: vk::ImageView, info: TextureViewInfo) -> Self {
        Self { image_view, info, context }
    }

    /// Vulkan image view handle
    pub fn image_view(&self) -> vk::ImageView {
        self.image_view
    }
}

impl RendererTextureView for TextureView {
    fn info(&self) -> &TextureViewInfo {
        &self.info
    }

    fn render_target_handle(&self) -> Option<NativeHandle> {
        match self.info.kind {
            TextureViewKind::Color => Some(native_handle(self.image_view, NativeImageLayout::ColorAttachment)),
            TextureViewKind::DepthStencil => None,
        }
    }

    fn depth_stencil_handle(&self, read_only: bool) -> Option<NativeHandle> {
        match self.info.kind {
            TextureViewKind::DepthStencil => {
                let layout = if read_only {
                    NativeImageLayout::DepthStencilReadOnly
                } else {
                    NativeImageLayout::DepthStencilAttachment
                };
                Some(native_handle(self.image_view, layout))
            }
            TextureViewKind::Color => None,
        }
    }
}

impl Drop for TextureView {
    fn drop(&mut self) {
        unsafe {
            self.context.device.destroy_image_view(self.image_view, None);
        }
    }
}
