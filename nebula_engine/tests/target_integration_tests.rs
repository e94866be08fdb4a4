//! Integration tests for render targets through the public API
//!
//! Exercises the engine-owned TargetManager, attribute queries from
//! backend-agnostic code, and a custom backend plugged in from outside the
//! crate. No GPU required.
//!
//! Run with: cargo test --test target_integration_tests

use nebula_engine::nebula::{Engine, Error, Result};
use nebula_engine::nebula::render::{
    Attribute, AttributeBuffer, BackendKind, NativeHandle, NativeImageLayout, NullBackend,
    NullBackendConfig, NullTexture, RenderTargetBackend, RenderTargetViews, Texture, TextureDesc,
    TextureFormat, TextureInfo, TextureUsage, TextureView, TextureViewInfo, TextureViewKind,
    MAX_COLOR_TARGETS,
};
use nebula_engine::nebula::target::{RenderSurfaceDesc, RenderTarget, RenderTargetDesc};
use serial_test::serial;
use std::any::Any;
use std::sync::{Arc, Mutex};

// ============================================================================
// HELPERS
// ============================================================================

fn surface(format: TextureFormat, usage: TextureUsage) -> RenderSurfaceDesc {
    let texture: Arc<dyn Texture> = Arc::new(NullTexture::new(&TextureDesc {
        width: 800,
        height: 600,
        format,
        usage,
        ..TextureDesc::default()
    }));
    RenderSurfaceDesc::new(texture)
}

fn gbuffer_desc() -> RenderTargetDesc {
    RenderTargetDesc::new()
        .with_color(0, surface(TextureFormat::R8G8B8A8_SRGB, TextureUsage::SampledAndRenderTarget))
        .with_color(1, surface(TextureFormat::R16G16B16A16_SFLOAT, TextureUsage::RenderTarget))
        .with_color(2, surface(TextureFormat::R32_SFLOAT, TextureUsage::RenderTarget))
        .with_depth_stencil(surface(TextureFormat::D32_FLOAT_S8_UINT, TextureUsage::DepthStencil))
}

/// Immediate-mode style consumer: binds whatever native handles it gets
fn collect_native_handles(rt: &RenderTarget) -> (Vec<NativeHandle>, Option<NativeHandle>) {
    let mut colors = Attribute::ColorTargets.empty_buffer();
    rt.custom_attribute("color-targets", &mut colors);
    let mut depth = Attribute::DepthStencilView.empty_buffer();
    rt.custom_attribute("depth-stencil-view", &mut depth);

    let colors: Vec<NativeHandle> = colors.color_targets().map(|slots| slots.iter().flatten().copied().collect()).unwrap_or_default();
    (colors, depth.depth_stencil().flatten())
}

// ============================================================================
// ENGINE-OWNED TARGET MANAGER
// ============================================================================

#[test]
#[serial]
fn test_integration_engine_target_manager() {
    Engine::initialize().unwrap();
    Engine::destroy_target_manager().unwrap();
    Engine::create_target_manager().unwrap();

    let backend = Arc::new(NullBackend::default());
    {
        let tm = Engine::target_manager().unwrap();
        let mut tm = tm.lock().unwrap();
        let rt = tm.create_render_target("gbuffer", gbuffer_desc(), 0, backend.clone()).unwrap();
        assert_eq!(rt.color_attachment_count(), 3);
        assert!(rt.has_depth_stencil());
        assert_eq!((rt.width(), rt.height()), (800, 600));
    }
    assert_eq!(backend.live_view_count(), 4);

    {
        let tm = Engine::target_manager().unwrap();
        let tm = tm.lock().unwrap();
        let rt = tm.render_target("gbuffer").unwrap();
        let (colors, depth) = collect_native_handles(rt);
        assert_eq!(colors.len(), 3);
        assert!(depth.is_some());
    }

    Engine::shutdown();
    assert_eq!(backend.live_view_count(), 0);
}

#[test]
#[serial]
fn test_integration_failed_creation_is_terminal() {
    Engine::initialize().unwrap();
    Engine::destroy_target_manager().unwrap();
    Engine::create_target_manager().unwrap();

    let tm = Engine::target_manager().unwrap();
    let mut tm = tm.lock().unwrap();
    let result = tm.create_render_target("gbuffer", gbuffer_desc(), 1, Arc::new(NullBackend::default()));
    assert!(matches!(result, Err(Error::UnsupportedConfiguration(_))));
    assert_eq!(tm.render_target_count(), 0);

    drop(tm);
    Engine::destroy_target_manager().unwrap();
}

// ============================================================================
// BACKEND-AGNOSTIC QUERIES
// ============================================================================

#[test]
fn test_integration_same_code_on_different_device_counts() {
    for devices in 1..=3 {
        let backend = Arc::new(NullBackend::new(NullBackendConfig {
            devices_supported: devices,
            ..NullBackendConfig::default()
        }));
        for device_index in 0..devices {
            let rt = RenderTarget::new(gbuffer_desc(), device_index, backend.clone()).unwrap();
            let (colors, depth) = collect_native_handles(&rt);
            assert_eq!(colors.len(), 3);
            assert!(depth.is_some());
        }
        assert!(RenderTarget::new(gbuffer_desc(), devices, backend.clone()).is_err());
        assert_eq!(backend.live_view_count(), 0);
    }
}

#[test]
fn test_integration_resize_means_recreate() {
    let backend = Arc::new(NullBackend::default());
    let rt = RenderTarget::new(gbuffer_desc(), 0, backend.clone()).unwrap();
    let (old_colors, _) = collect_native_handles(&rt);
    drop(rt);

    let resized = RenderTargetDesc::new()
        .with_color(0, {
            let texture: Arc<dyn Texture> = Arc::new(NullTexture::new(&TextureDesc {
                width: 1920,
                height: 1080,
                ..TextureDesc::default()
            }));
            RenderSurfaceDesc::new(texture)
        });
    let rt = RenderTarget::new(resized, 0, backend.clone()).unwrap();
    let (new_colors, depth) = collect_native_handles(&rt);
    assert_eq!(rt.width(), 1920);
    assert_eq!(new_colors.len(), 1);
    assert!(!old_colors.contains(&new_colors[0]));
    assert!(depth.is_none());
}

// ============================================================================
// CUSTOM BACKEND
// ============================================================================

/// Backend defined outside the crate, answering queries itself
struct RecordingBackend {
    queries: Mutex<Vec<Attribute>>,
}

struct RecordingView {
    info: TextureViewInfo,
}

impl TextureView for RecordingView {
    fn info(&self) -> &TextureViewInfo {
        &self.info
    }

    fn render_target_handle(&self) -> Option<NativeHandle> {
        Some(NativeHandle::Vulkan { image_view: 42, layout: NativeImageLayout::ColorAttachment })
    }

    fn depth_stencil_handle(&self, _read_only: bool) -> Option<NativeHandle> {
        None
    }
}

impl RenderTargetBackend for RecordingBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Vulkan
    }

    fn devices_supported(&self) -> u32 {
        1
    }

    fn create_texture_view(
        &self,
        _surface: &RenderSurfaceDesc,
        info: &TextureViewInfo,
        _device_index: u32,
    ) -> Result<Box<dyn TextureView>> {
        Ok(Box::new(RecordingView { info: info.clone() }))
    }

    fn resolve_attribute(
        &self,
        attribute: Attribute,
        views: &RenderTargetViews,
        out: &mut AttributeBuffer,
    ) {
        self.queries.lock().unwrap().push(attribute);
        if let (Attribute::ColorTargets, AttributeBuffer::ColorTargets(slots)) = (attribute, out) {
            for slot in 0..MAX_COLOR_TARGETS {
                if let Some(view) = views.color(slot) {
                    slots[slot] = view.render_target_handle();
                }
            }
        }
    }
}

#[test]
fn test_integration_custom_backend_receives_dispatch() {
    let backend = Arc::new(RecordingBackend { queries: Mutex::new(Vec::new()) });
    let desc = RenderTargetDesc::new()
        .with_color(1, surface(TextureFormat::B8G8R8A8_UNORM, TextureUsage::RenderTarget));
    let rt = RenderTarget::new(desc, 0, backend.clone()).unwrap();
    assert_eq!(rt.backend_kind(), BackendKind::Vulkan);
    assert_eq!(rt.views().color_count(), 1);

    let mut out = Attribute::ColorTargets.empty_buffer();
    rt.custom_attribute("RTV", &mut out);
    rt.custom_attribute("not-an-attribute", &mut out);

    let slots = out.color_targets().unwrap();
    assert_eq!(slots[0], None);
    assert_eq!(slots[1], Some(NativeHandle::Vulkan { image_view: 42, layout: NativeImageLayout::ColorAttachment }));

    // Unknown names never reach the backend
    assert_eq!(*backend.queries.lock().unwrap(), vec![Attribute::ColorTargets]);
}

/// Texture type foreign to the null backend still works there: the null
/// backend never downcasts.
struct ForeignTexture {
    info: TextureInfo,
}

impl Texture for ForeignTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn test_integration_foreign_texture_on_null_backend() {
    let texture: Arc<dyn Texture> = Arc::new(ForeignTexture {
        info: TextureInfo::from(&TextureDesc { width: 16, height: 16, ..TextureDesc::default() }),
    });
    let desc = RenderTargetDesc::new().with_color(0, RenderSurfaceDesc::new(texture));
    let rt = RenderTarget::new(desc, 0, Arc::new(NullBackend::default())).unwrap();
    assert_eq!(rt.color_view(0).unwrap().info().kind, TextureViewKind::Color);
}
