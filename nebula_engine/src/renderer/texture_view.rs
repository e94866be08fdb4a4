/// TextureView trait and native handle types
///
/// A texture view wraps exactly one backend-native view object created for
/// a single texture subresource range. Views are owned exclusively by the
/// render target that requested them and released when it is dropped.

use crate::renderer::TextureFormat;

/// What the view is bound as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureViewKind {
    /// Color attachment (render target view)
    Color,
    /// Depth/stencil attachment
    DepthStencil,
}

/// Subresource range and derived properties of a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureViewInfo {
    pub kind: TextureViewKind,
    pub format: TextureFormat,
    /// Width of the viewed mip level
    pub width: u32,
    /// Height of the viewed mip level
    pub height: u32,
    pub samples: u32,
    pub mip_level: u32,
    /// First array layer (or cube face)
    pub first_face: u32,
    /// Number of array layers covered, always >= 1
    pub num_faces: u32,
}

/// Image layout a native handle is meant to be used in
///
/// Backends without explicit layouts ignore this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeImageLayout {
    ColorAttachment,
    DepthStencilAttachment,
    DepthStencilReadOnly,
}

/// Non-owning copy of a backend-native view handle
///
/// The owning `TextureView` stays responsible for destroying the native
/// object; holders of a `NativeHandle` must never release it and must not
/// use it after the owning render target is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeHandle {
    /// Synthetic handle issued by the headless backend
    Null {
        id: u64,
        read_only: bool,
    },
    /// `VkImageView` (raw handle) plus the layout it must be bound in
    Vulkan {
        image_view: u64,
        layout: NativeImageLayout,
    },
}

/// Texture view trait
///
/// Implemented by backend-specific view types (e.g. the Vulkan image view
/// wrapper). The native object is destroyed when the view is dropped.
pub trait TextureView: Send + Sync {
    /// Subresource range and properties of this view
    fn info(&self) -> &TextureViewInfo;

    /// Native render-target-view handle, `None` for depth/stencil views
    fn render_target_handle(&self) -> Option<NativeHandle>;

    /// Native depth-stencil-view handle, `None` for color views
    ///
    /// `read_only` selects the read-only variant (depth test without writes).
    fn depth_stencil_handle(&self, read_only: bool) -> Option<NativeHandle>;
}
