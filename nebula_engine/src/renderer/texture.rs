/// Texture trait, texture descriptor, and texture info
///
/// Textures are owned by the rest of the engine; render targets only borrow
/// them (through `Arc`) to create views.

use std::any::Any;

/// Texture pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    // Color formats
    R8G8B8A8_SRGB,
    R8G8B8A8_UNORM,
    B8G8R8A8_SRGB,
    B8G8R8A8_UNORM,
    R16G16B16A16_SFLOAT,
    R32_SFLOAT,

    // Depth / stencil formats
    D16_UNORM,
    D32_FLOAT,
    D24_UNORM_S8_UINT,
    D32_FLOAT_S8_UINT,
}

impl TextureFormat {
    /// Returns true for formats carrying a depth component
    pub fn is_depth(&self) -> bool {
        matches!(
            self,
            TextureFormat::D16_UNORM
                | TextureFormat::D32_FLOAT
                | TextureFormat::D24_UNORM_S8_UINT
                | TextureFormat::D32_FLOAT_S8_UINT
        )
    }

    /// Returns true for formats carrying a stencil component
    pub fn has_stencil(&self) -> bool {
        matches!(self, TextureFormat::D24_UNORM_S8_UINT | TextureFormat::D32_FLOAT_S8_UINT)
    }

    /// Returns true for sRGB-encoded color formats
    pub fn is_srgb(&self) -> bool {
        matches!(self, TextureFormat::R8G8B8A8_SRGB | TextureFormat::B8G8R8A8_SRGB)
    }
}

/// Texture usage flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureUsage {
    /// Texture can be sampled in shaders
    Sampled,
    /// Texture can be used as render target
    RenderTarget,
    /// Texture can be used for both
    SampledAndRenderTarget,
    /// Texture can be used as depth/stencil attachment
    DepthStencil,
}

impl TextureUsage {
    /// Returns true if the texture can back a color attachment
    pub fn is_render_target(&self) -> bool {
        matches!(self, TextureUsage::RenderTarget | TextureUsage::SampledAndRenderTarget)
    }

    /// Returns true if the texture can back a depth/stencil attachment
    pub fn is_depth_stencil(&self) -> bool {
        matches!(self, TextureUsage::DepthStencil)
    }
}

// ===== TEXTURE DESC =====

/// Descriptor for creating a texture
#[derive(Debug, Clone)]
pub struct TextureDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Usage flags
    pub usage: TextureUsage,
    /// Number of array layers (6 for cube maps)
    pub array_layers: u32,
    /// Number of mip levels
    pub mip_levels: u32,
    /// Samples per pixel (1 = no MSAA)
    pub samples: u32,
}

impl Default for TextureDesc {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            format: TextureFormat::R8G8B8A8_UNORM,
            usage: TextureUsage::RenderTarget,
            array_layers: 1,
            mip_levels: 1,
            samples: 1,
        }
    }
}

// ===== TEXTURE INFO =====

/// Read-only properties of a created texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub usage: TextureUsage,
    pub array_layers: u32,
    pub mip_levels: u32,
    pub samples: u32,
}

impl TextureInfo {
    /// Width of the given mip level (never below 1)
    pub fn mip_width(&self, mip_level: u32) -> u32 {
        self.width.checked_shr(mip_level).unwrap_or(0).max(1)
    }

    /// Height of the given mip level (never below 1)
    pub fn mip_height(&self, mip_level: u32) -> u32 {
        self.height.checked_shr(mip_level).unwrap_or(0).max(1)
    }
}

impl From<&TextureDesc> for TextureInfo {
    fn from(desc: &TextureDesc) -> Self {
        Self {
            width: desc.width,
            height: desc.height,
            format: desc.format,
            usage: desc.usage,
            array_layers: desc.array_layers,
            mip_levels: desc.mip_levels,
            samples: desc.samples,
        }
    }
}

// ===== TEXTURE TRAIT =====

/// Texture resource trait
///
/// Implemented by backend-specific texture types. Backends recover their
/// concrete type through `as_any()` when creating views.
pub trait Texture: Send + Sync {
    /// Get the read-only properties of this texture
    fn info(&self) -> &TextureInfo;

    /// Concrete type access for backend downcasts
    fn as_any(&self) -> &dyn Any;
}
