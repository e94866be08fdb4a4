/// Null backend - headless render target adapter
///
/// Issues synthetic native handles instead of talking to a GPU. Used for
/// headless runs (servers, CI) and to exercise backend-agnostic code. It
/// can emulate several logical devices and a view budget, so device-index
/// and creation-failure paths are reachable without hardware.

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use crate::error::Result;
use crate::renderer::{
    BackendKind, NativeHandle, RenderTargetBackend, Texture, TextureDesc, TextureInfo,
    TextureView, TextureViewInfo, TextureViewKind,
};
use crate::target::RenderSurfaceDesc;

/// Null backend configuration
#[derive(Debug, Clone)]
pub struct NullBackendConfig {
    /// Number of logical devices exposed (1 = single-device backend)
    pub devices_supported: u32,
    /// Reported through render target properties
    pub requires_texture_flipping: bool,
    /// Maximum number of live views; creation beyond it fails like an
    /// out-of-memory device would. `None` = unlimited.
    pub max_views: Option<usize>,
}

impl Default for NullBackendConfig {
    fn default() -> Self {
        Self {
            devices_supported: 1,
            requires_texture_flipping: false,
            max_views: None,
        }
    }
}

// ============================================================================
// NullTexture
// ============================================================================

/// Texture without GPU storage
#[derive(Debug)]
pub struct NullTexture {
    info: TextureInfo,
}

impl NullTexture {
    pub fn new(desc: &TextureDesc) -> Self {
        Self { info: TextureInfo::from(desc) }
    }
}

impl Texture for NullTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// NullTextureView
// ============================================================================

/// View carrying a synthetic id
#[derive(Debug)]
pub struct NullTextureView {
    info: TextureViewInfo,
    id: u64,
    device_index: u32,
    live_views: Arc<AtomicUsize>,
}

impl NullTextureView {
    /// Synthetic id of this view
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Device the view was created on
    pub fn device_index(&self) -> u32 {
        self.device_index
    }
}

impl TextureView for NullTextureView {
    fn info(&self) -> &TextureViewInfo {
        &self.info
    }

    fn render_target_handle(&self) -> Option<NativeHandle> {
        match self.info.kind {
            TextureViewKind::Color => Some(NativeHandle::Null { id: self.id, read_only: false }),
            TextureViewKind::DepthStencil => None,
        }
    }

    fn depth_stencil_handle(&self, read_only: bool) -> Option<NativeHandle> {
        match self.info.kind {
            TextureViewKind::DepthStencil => Some(NativeHandle::Null { id: self.id, read_only }),
            TextureViewKind::Color => None,
        }
    }
}

impl Drop for NullTextureView {
    fn drop(&mut self) {
        self.live_views.fetch_sub(1, Ordering::SeqCst);
    }
}

// ============================================================================
// NullBackend
// ============================================================================

/// Headless render target backend
#[derive(Debug)]
pub struct NullBackend {
    config: NullBackendConfig,
    next_id: AtomicU64,
    live_views: Arc<AtomicUsize>,
}

impl NullBackend {
    pub fn new(config: NullBackendConfig) -> Self {
        Self {
            config,
            next_id: AtomicU64::new(1),
            live_views: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of views created by this backend and not yet released
    pub fn live_view_count(&self) -> usize {
        self.live_views.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &NullBackendConfig {
        &self.config
    }
}

impl Default for NullBackend {
    fn default() -> Self {
        Self::new(NullBackendConfig::default())
    }
}

impl RenderTargetBackend for NullBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Null
    }

    fn devices_supported(&self) -> u32 {
        self.config.devices_supported
    }

    fn requires_texture_flipping(&self) -> bool {
        self.config.requires_texture_flipping
    }

    fn create_texture_view(
        &self,
        _surface: &RenderSurfaceDesc,
        info: &TextureViewInfo,
        device_index: u32,
    ) -> Result<Box<dyn TextureView>> {
        if let Some(max_views) = self.config.max_views {
            let live = self.live_views.load(Ordering::SeqCst);
            if live >= max_views {
                crate::engine_bail!("nebula::null" => ResourceCreationFailure,
                    "View budget exhausted ({} of {} views live)", live, max_views);
            }
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.live_views.fetch_add(1, Ordering::SeqCst);

        crate::engine_trace!("nebula::null",
            "Created {:?} view #{} on device {}", info.kind, id, device_index);

        Ok(Box::new(NullTextureView {
            info: info.clone(),
            id,
            device_index,
            live_views: self.live_views.clone(),
        }))
    }
}

#[cfg(test)]
#[path = "null_backend_tests.rs"]
mod tests;
