/*!
# Nebula Vulkan Renderer

Vulkan backend for Nebula render targets.

Provides GPU textures (`Texture`) and a `RenderTargetBackend` that creates
one `VkImageView` per attachment. Attribute queries hand out raw
`VkImageView` handles together with the layout to bind them in;
`native_image_view` turns them back into ash types.

Instance and device bootstrap stay with the application: build a
`GpuContext` over an existing `ash::Device`.
*/

mod vulkan_context;
mod vulkan_format;
mod vulkan_texture;
mod vulkan_texture_view;
mod vulkan_backend;

/// Main nebula namespace module
pub mod nebula {
    pub use crate::vulkan_backend::VulkanRenderTargetBackend;
    pub use crate::vulkan_context::GpuContext;
    pub use crate::vulkan_format::{layout_to_vk, native_image_view};
    pub use crate::vulkan_texture::Texture as VulkanTexture;
    pub use crate::vulkan_texture_view::TextureView as VulkanTextureView;
}
