/// Render target - a set of color attachments and an optional depth/stencil
/// attachment, bound to one backend.
///
/// Attachments are fixed for the lifetime of the render target. Resizing
/// means building a new one from an updated descriptor.

use std::fmt;
use std::sync::Arc;
use crate::error::Result;
use crate::renderer::{
    Attribute, AttributeBuffer, BackendKind, RenderTargetBackend, RenderTargetViews,
    TextureFormat, TextureView, TextureViewInfo, TextureViewKind, MAX_COLOR_TARGETS,
};
use crate::target::{RenderSurfaceDesc, RenderTargetDesc};

const SOURCE: &str = "nebula::RenderTarget";

/// Properties shared by every attachment of a render target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTargetProperties {
    /// Width in pixels (of the bound mip level)
    pub width: u32,
    /// Height in pixels (of the bound mip level)
    pub height: u32,
    /// Samples per pixel
    pub samples: u32,
    /// True if any color attachment is sRGB-encoded
    pub hw_gamma: bool,
    /// True if the backend renders vertically flipped
    pub requires_texture_flipping: bool,
    /// Number of bound color attachments
    pub color_attachment_count: usize,
    /// True if a depth/stencil attachment is bound
    pub has_depth_stencil: bool,
}

/// Render target
///
/// Owns the native views of its attachments. Dropping it releases every
/// view before returning.
pub struct RenderTarget {
    views: RenderTargetViews,
    desc: RenderTargetDesc,
    device_index: u32,
    properties: RenderTargetProperties,
    backend: Arc<dyn RenderTargetBackend>,
}

impl RenderTarget {
    /// Create a render target and its views on `backend`
    ///
    /// # Errors
    ///
    /// - `UnsupportedConfiguration` if `device_index` is not a device of the backend
    /// - `InvalidDescriptor` if a color slot lies beyond `MAX_COLOR_TARGETS`, no
    ///   attachment is bound, an attachment has the wrong usage or format, a mip
    ///   level / face range is out of bounds, or attachments differ in size or
    ///   sample count
    /// - `ResourceCreationFailure` if the backend cannot create a view
    ///
    /// On error no view survives: views created before the failure are released.
    pub fn new(
        desc: RenderTargetDesc,
        device_index: u32,
        backend: Arc<dyn RenderTargetBackend>,
    ) -> Result<Self> {
        let devices_supported = backend.devices_supported();
        if device_index >= devices_supported {
            crate::engine_bail!(SOURCE => UnsupportedConfiguration,
                "Device index {} not supported by the {} backend ({} device(s) available)",
                device_index, backend.kind(), devices_supported);
        }

        if let Some(slot) = desc.rejected_color_slot {
            crate::engine_bail!(SOURCE => InvalidDescriptor,
                "Color slot {} out of range (at most {} supported)", slot, MAX_COLOR_TARGETS);
        }

        if let Some((slot, _)) = desc.color_surfaces.iter()
            .enumerate()
            .skip(MAX_COLOR_TARGETS)
            .find(|(_, surface)| surface.is_some())
        {
            crate::engine_bail!(SOURCE => InvalidDescriptor,
                "Color slot {} out of range ({} color surfaces, at most {} supported)",
                slot, desc.color_count(), MAX_COLOR_TARGETS);
        }

        let mut color_infos: [Option<TextureViewInfo>; MAX_COLOR_TARGETS] = Default::default();
        for (slot, surface) in desc.color_surfaces.iter().enumerate() {
            if let Some(surface) = surface {
                color_infos[slot] = Some(validate_surface(surface, TextureViewKind::Color, slot)?);
            }
        }

        let depth_info = match &desc.depth_stencil_surface {
            Some(surface) => Some(validate_surface(surface, TextureViewKind::DepthStencil, 0)?),
            None => None,
        };

        let properties = {
            let mut infos = color_infos.iter().flatten().chain(depth_info.iter());
            let Some(first) = infos.next() else {
                crate::engine_bail!(SOURCE => InvalidDescriptor,
                    "Render target has no color or depth/stencil attachment");
            };

            for info in infos {
                if info.width != first.width || info.height != first.height {
                    crate::engine_bail!(SOURCE => InvalidDescriptor,
                        "Attachment size mismatch: {}x{} vs {}x{}",
                        info.width, info.height, first.width, first.height);
                }
                if info.samples != first.samples {
                    crate::engine_bail!(SOURCE => InvalidDescriptor,
                        "Attachment sample count mismatch: {} vs {}", info.samples, first.samples);
                }
            }

            RenderTargetProperties {
                width: first.width,
                height: first.height,
                samples: first.samples,
                hw_gamma: color_infos.iter().flatten().any(|info| info.format.is_srgb()),
                requires_texture_flipping: backend.requires_texture_flipping(),
                color_attachment_count: color_infos.iter().flatten().count(),
                has_depth_stencil: depth_info.is_some(),
            }
        };

        // Views created so far are dropped if a later one fails
        let mut views = RenderTargetViews::default();
        for (slot, info) in color_infos.iter().enumerate() {
            if let (Some(info), Some(Some(surface))) = (info, desc.color_surfaces.get(slot)) {
                views.color[slot] = Some(backend.create_texture_view(surface, info, device_index)?);
            }
        }
        if let (Some(info), Some(surface)) = (&depth_info, &desc.depth_stencil_surface) {
            views.depth_stencil = Some(backend.create_texture_view(surface, info, device_index)?);
        }

        crate::engine_debug!(SOURCE,
            "Created {}x{} render target on {} device {} ({} color, depth/stencil: {})",
            properties.width, properties.height, backend.kind(), device_index,
            properties.color_attachment_count, properties.has_depth_stencil);

        Ok(Self {
            views,
            desc,
            device_index,
            properties,
            backend,
        })
    }

    /// Descriptor this render target was built from
    pub fn desc(&self) -> &RenderTargetDesc {
        &self.desc
    }

    pub fn device_index(&self) -> u32 {
        self.device_index
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Backend this render target was created on
    pub fn backend(&self) -> &Arc<dyn RenderTargetBackend> {
        &self.backend
    }

    pub fn properties(&self) -> &RenderTargetProperties {
        &self.properties
    }

    pub fn width(&self) -> u32 {
        self.properties.width
    }

    pub fn height(&self) -> u32 {
        self.properties.height
    }

    pub fn samples(&self) -> u32 {
        self.properties.samples
    }

    pub fn color_attachment_count(&self) -> usize {
        self.properties.color_attachment_count
    }

    pub fn has_depth_stencil(&self) -> bool {
        self.properties.has_depth_stencil
    }

    /// Color view bound at `slot`
    pub fn color_view(&self, slot: usize) -> Option<&dyn TextureView> {
        self.views.color(slot)
    }

    pub fn depth_stencil_view(&self) -> Option<&dyn TextureView> {
        self.views.depth_stencil()
    }

    /// Format of the color attachment at `slot`
    pub fn color_format(&self, slot: usize) -> Option<TextureFormat> {
        self.views.color(slot).map(|view| view.info().format)
    }

    pub fn depth_stencil_format(&self) -> Option<TextureFormat> {
        self.views.depth_stencil().map(|view| view.info().format)
    }

    /// All views owned by this render target
    pub fn views(&self) -> &RenderTargetViews {
        &self.views
    }

    /// Write the native handles for `attribute` into `out`
    ///
    /// See `AttributeBuffer` for which slots get written.
    pub fn query(&self, attribute: Attribute, out: &mut AttributeBuffer) {
        self.backend.resolve_attribute(attribute, &self.views, out);
    }

    /// Write the native handles for the attribute called `name` into `out`
    ///
    /// Unknown names leave `out` untouched.
    pub fn custom_attribute(&self, name: &str, out: &mut AttributeBuffer) {
        match Attribute::from_name(name) {
            Some(attribute) => self.query(attribute, out),
            None => crate::engine_trace!(SOURCE, "Ignoring unknown attribute '{}'", name),
        }
    }
}

impl Drop for RenderTarget {
    fn drop(&mut self) {
        self.views = RenderTargetViews::default();
        crate::engine_trace!(SOURCE, "Released {}x{} render target on {} device {}",
            self.properties.width, self.properties.height, self.backend.kind(), self.device_index);
    }
}

impl fmt::Debug for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderTarget")
            .field("backend", &self.backend.kind())
            .field("device_index", &self.device_index)
            .field("properties", &self.properties)
            .field("views", &self.views)
            .finish()
    }
}

/// Check one attachment against its texture and derive the view it needs
fn validate_surface(surface: &RenderSurfaceDesc, kind: TextureViewKind, slot: usize) -> Result<TextureViewInfo> {
    let info = surface.texture.info();

    match kind {
        TextureViewKind::Color => {
            if !info.usage.is_render_target() {
                crate::engine_bail!(SOURCE => InvalidDescriptor,
                    "Color slot {}: texture usage {:?} is not a render target usage", slot, info.usage);
            }
            if info.format.is_depth() {
                crate::engine_bail!(SOURCE => InvalidDescriptor,
                    "Color slot {}: depth format {:?} cannot be a color attachment", slot, info.format);
            }
        }
        TextureViewKind::DepthStencil => {
            if !info.usage.is_depth_stencil() {
                crate::engine_bail!(SOURCE => InvalidDescriptor,
                    "Depth/stencil surface: texture usage {:?} is not DepthStencil", info.usage);
            }
            if !info.format.is_depth() {
                crate::engine_bail!(SOURCE => InvalidDescriptor,
                    "Depth/stencil surface: format {:?} has no depth component", info.format);
            }
        }
    }

    if info.width == 0 || info.height == 0 || info.samples == 0 {
        crate::engine_bail!(SOURCE => InvalidDescriptor,
            "{:?} surface: degenerate texture ({}x{}, {} samples)",
            kind, info.width, info.height, info.samples);
    }

    if surface.mip_level >= info.mip_levels {
        crate::engine_bail!(SOURCE => InvalidDescriptor,
            "{:?} surface: mip level {} out of range (mip_levels = {})",
            kind, surface.mip_level, info.mip_levels);
    }

    if surface.first_face >= info.array_layers {
        crate::engine_bail!(SOURCE => InvalidDescriptor,
            "{:?} surface: first face {} out of range (array_layers = {})",
            kind, surface.first_face, info.array_layers);
    }

    let num_faces = match surface.num_faces {
        0 => info.array_layers - surface.first_face,
        n => n,
    };
    let end_face = surface.first_face as u64 + num_faces as u64;
    if end_face > info.array_layers as u64 {
        crate::engine_bail!(SOURCE => InvalidDescriptor,
            "{:?} surface: faces {}..{} out of range (array_layers = {})",
            kind, surface.first_face, end_face, info.array_layers);
    }

    Ok(TextureViewInfo {
        kind,
        format: info.format,
        width: info.mip_width(surface.mip_level),
        height: info.mip_height(surface.mip_level),
        samples: info.samples,
        mip_level: surface.mip_level,
        first_face: surface.first_face,
        num_faces,
    })
}

#[cfg(test)]
#[path = "render_target_tests.rs"]
mod tests;
