/// Render target descriptors
///
/// Immutable description of the attachments a render target binds: sparse
/// color slots plus an optional depth/stencil surface. Textures are shared
/// with the rest of the engine; only the views created from them belong to
/// the render target.

use std::fmt;
use std::sync::Arc;
use crate::renderer::{Texture, MAX_COLOR_TARGETS};

/// One attachment: a texture plus the subresource to render into
#[derive(Clone)]
pub struct RenderSurfaceDesc {
    /// Texture to render into
    pub texture: Arc<dyn Texture>,
    /// First array layer (or cube face)
    pub first_face: u32,
    /// Number of layers to bind, 0 = every layer from `first_face` on
    pub num_faces: u32,
    /// Mip level to render into
    pub mip_level: u32,
}

impl RenderSurfaceDesc {
    /// Whole first layer, mip 0
    pub fn new(texture: Arc<dyn Texture>) -> Self {
        Self {
            texture,
            first_face: 0,
            num_faces: 1,
            mip_level: 0,
        }
    }

    /// Select a layer range
    pub fn with_faces(mut self, first_face: u32, num_faces: u32) -> Self {
        self.first_face = first_face;
        self.num_faces = num_faces;
        self
    }

    /// Select a mip level
    pub fn with_mip_level(mut self, mip_level: u32) -> Self {
        self.mip_level = mip_level;
        self
    }
}

impl fmt::Debug for RenderSurfaceDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderSurfaceDesc")
            .field("texture", self.texture.info())
            .field("first_face", &self.first_face)
            .field("num_faces", &self.num_faces)
            .field("mip_level", &self.mip_level)
            .finish()
    }
}

/// Descriptor for creating a render target
///
/// `color_surfaces[i]` describes color slot `i`; `None` leaves the slot
/// unbound. Validation (slot count, usage, sizes) happens when the render
/// target is created.
#[derive(Debug, Clone, Default)]
pub struct RenderTargetDesc {
    pub color_surfaces: Vec<Option<RenderSurfaceDesc>>,
    pub depth_stencil_surface: Option<RenderSurfaceDesc>,
    /// First slot at or past `MAX_COLOR_TARGETS` passed to `with_color`
    pub(crate) rejected_color_slot: Option<usize>,
}

impl RenderTargetDesc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color surfaces bound to consecutive slots starting at 0
    pub fn from_color_surfaces(surfaces: Vec<RenderSurfaceDesc>) -> Self {
        Self {
            color_surfaces: surfaces.into_iter().map(Some).collect(),
            ..Self::default()
        }
    }

    /// Bind a color surface to `slot`
    ///
    /// A slot at or past `MAX_COLOR_TARGETS` is not stored; it makes render
    /// target creation fail with `InvalidDescriptor`.
    pub fn with_color(mut self, slot: usize, surface: RenderSurfaceDesc) -> Self {
        if slot >= MAX_COLOR_TARGETS {
            self.rejected_color_slot.get_or_insert(slot);
            return self;
        }
        if self.color_surfaces.len() <= slot {
            self.color_surfaces.resize(slot + 1, None);
        }
        self.color_surfaces[slot] = Some(surface);
        self
    }

    /// Bind the depth/stencil surface
    pub fn with_depth_stencil(mut self, surface: RenderSurfaceDesc) -> Self {
        self.depth_stencil_surface = Some(surface);
        self
    }

    /// Number of bound color surfaces
    pub fn color_count(&self) -> usize {
        self.color_surfaces.iter().filter(|s| s.is_some()).count()
    }

    /// Out-of-range slot given to `with_color`, if any
    pub fn rejected_color_slot(&self) -> Option<usize> {
        self.rejected_color_slot
    }
}
