/// RenderTargetBackend trait - per-backend render target adapter
///
/// One implementation exists per graphics backend. The backend is picked
/// once, when a render target is created; the render target keeps it and
/// routes every attribute query through it.

use std::fmt;
use crate::error::Result;
use crate::renderer::{
    Attribute, AttributeBuffer, TextureView, TextureViewInfo, MAX_COLOR_TARGETS,
};
use crate::target::RenderSurfaceDesc;

/// Graphics backend identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Headless backend issuing synthetic handles
    Null,
    /// Vulkan backend
    Vulkan,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Null => write!(f, "null"),
            BackendKind::Vulkan => write!(f, "vulkan"),
        }
    }
}

/// Views owned by a render target
///
/// Color views are indexed by attachment slot; unused slots hold `None`.
#[derive(Default)]
pub struct RenderTargetViews {
    pub(crate) color: [Option<Box<dyn TextureView>>; MAX_COLOR_TARGETS],
    pub(crate) depth_stencil: Option<Box<dyn TextureView>>,
}

impl RenderTargetViews {
    /// Color view bound at `slot`
    pub fn color(&self, slot: usize) -> Option<&dyn TextureView> {
        self.color.get(slot)?.as_deref()
    }

    /// Depth/stencil view, if any
    pub fn depth_stencil(&self) -> Option<&dyn TextureView> {
        self.depth_stencil.as_deref()
    }

    /// Number of bound color views
    pub fn color_count(&self) -> usize {
        self.color.iter().filter(|view| view.is_some()).count()
    }
}

impl fmt::Debug for RenderTargetViews {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots: Vec<usize> = self.color.iter()
            .enumerate()
            .filter_map(|(slot, view)| view.as_ref().map(|_| slot))
            .collect();
        f.debug_struct("RenderTargetViews")
            .field("color_slots", &slots)
            .field("depth_stencil", &self.depth_stencil.is_some())
            .finish()
    }
}

/// Render target backend adapter trait
///
/// Implemented by each graphics backend (null, Vulkan, ...).
pub trait RenderTargetBackend: Send + Sync {
    /// Which backend this is
    fn kind(&self) -> BackendKind;

    /// Number of logical devices render targets may be created on
    ///
    /// Single-device backends return 1; any other device index is rejected.
    fn devices_supported(&self) -> u32;

    /// Whether rendered images come out vertically flipped on this backend
    fn requires_texture_flipping(&self) -> bool {
        false
    }

    /// Create the native view for one attachment
    ///
    /// `info` has already been validated against the texture; the backend
    /// only materializes it. Failures must be reported as
    /// `Error::ResourceCreationFailure` (or `InvalidDescriptor` when the
    /// texture does not belong to this backend).
    fn create_texture_view(
        &self,
        surface: &RenderSurfaceDesc,
        info: &TextureViewInfo,
        device_index: u32,
    ) -> Result<Box<dyn TextureView>>;

    /// Write the native handles for `attribute` into `out`
    ///
    /// The default implementation covers the common attribute set by asking
    /// each view for its handles. Slots without a view, and buffers of the
    /// wrong shape, are left untouched.
    fn resolve_attribute(&self, attribute: Attribute, views: &RenderTargetViews, out: &mut AttributeBuffer) {
        match (attribute, out) {
            (Attribute::ColorTargets, AttributeBuffer::ColorTargets(slots)) => {
                for (slot, view) in views.color.iter().enumerate() {
                    if let Some(handle) = view.as_ref().and_then(|v| v.render_target_handle()) {
                        slots[slot] = Some(handle);
                    }
                }
            }
            (Attribute::DepthStencilView, AttributeBuffer::DepthStencil(slot)) => {
                if let Some(handle) = views.depth_stencil().and_then(|v| v.depth_stencil_handle(false)) {
                    *slot = Some(handle);
                }
            }
            (Attribute::ReadOnlyDepthStencilView, AttributeBuffer::DepthStencil(slot)) => {
                if let Some(handle) = views.depth_stencil().and_then(|v| v.depth_stencil_handle(true)) {
                    *slot = Some(handle);
                }
            }
            _ => {}
        }
    }
}
