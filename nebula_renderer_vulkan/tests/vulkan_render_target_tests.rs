//! Render target tests on a real Vulkan device
//!
//! These tests verify that VulkanRenderTargetBackend creates working image
//! views and answers attribute queries with Vulkan handles.
//! All tests require a GPU and are marked with #[ignore].
//!
//! Run with: cargo test --test vulkan_render_target_tests -- --ignored

use ash::vk;
use nebula_engine::nebula::Error;
use nebula_engine::nebula::render::{
    Attribute, BackendKind, NullTexture, Texture, TextureDesc, TextureFormat, TextureUsage,
};
use nebula_engine::nebula::target::{RenderSurfaceDesc, RenderTarget, RenderTargetDesc};
use nebula_renderer_vulkan::nebula::{
    native_image_view, GpuContext, VulkanRenderTargetBackend, VulkanTexture,
};
use std::sync::Arc;

/// Headless Vulkan device (no window, no swapchain)
///
/// Declare it first in a test so it is dropped last.
struct HeadlessDevice {
    context: Option<Arc<GpuContext>>,
    device: ash::Device,
    instance: ash::Instance,
    _entry: ash::Entry,
}

impl HeadlessDevice {
    fn new() -> Self {
        unsafe {
            let entry = ash::Entry::load().unwrap();

            let app_info = vk::ApplicationInfo::default()
                .application_name(c"Nebula Render Target Tests")
                .engine_name(c"Nebula")
                .api_version(vk::API_VERSION_1_2);
            let instance = entry
                .create_instance(&vk::InstanceCreateInfo::default().application_info(&app_info), None)
                .unwrap();

            let physical_device = instance.enumerate_physical_devices().unwrap()
                .into_iter()
                .next()
                .expect("No Vulkan-capable GPU found");

            let graphics_family_index = instance
                .get_physical_device_queue_family_properties(physical_device)
                .iter()
                .position(|qf| qf.queue_flags.contains(vk::QueueFlags::GRAPHICS))
                .expect("No graphics queue family found") as u32;

            let queue_priorities = [1.0];
            let queue_create_infos = [vk::DeviceQueueCreateInfo::default()
                .queue_family_index(graphics_family_index)
                .queue_priorities(&queue_priorities)];
            let device = instance
                .create_device(
                    physical_device,
                    &vk::DeviceCreateInfo::default().queue_create_infos(&queue_create_infos),
                    None,
                )
                .unwrap();

            let context = GpuContext::new(&instance, physical_device, &device).unwrap();

            Self {
                context: Some(Arc::new(context)),
                device,
                instance,
                _entry: entry,
            }
        }
    }

    fn context(&self) -> Arc<GpuContext> {
        self.context.clone().unwrap()
    }

    fn backend(&self) -> Arc<VulkanRenderTargetBackend> {
        Arc::new(VulkanRenderTargetBackend::new(self.context()))
    }

    fn texture(&self, width: u32, height: u32, format: TextureFormat, usage: TextureUsage) -> Arc<dyn Texture> {
        let desc = TextureDesc { width, height, format, usage, ..TextureDesc::default() };
        Arc::new(VulkanTexture::create(self.context(), &desc).unwrap())
    }
}

impl Drop for HeadlessDevice {
    fn drop(&mut self) {
        unsafe {
            self.device.device_wait_idle().ok();
            self.context.take();
            self.device.destroy_device(None);
            self.instance.destroy_instance(None);
        }
    }
}

// ============================================================================
// CREATION TESTS
// ============================================================================

#[test]
#[ignore] // Requires GPU
fn test_vulkan_color_and_depth_target() {
    let gpu = HeadlessDevice::new();
    let desc = RenderTargetDesc::new()
        .with_color(0, RenderSurfaceDesc::new(
            gpu.texture(256, 128, TextureFormat::R8G8B8A8_UNORM, TextureUsage::SampledAndRenderTarget)))
        .with_depth_stencil(RenderSurfaceDesc::new(
            gpu.texture(256, 128, TextureFormat::D32_FLOAT, TextureUsage::DepthStencil)));

    let rt = RenderTarget::new(desc, 0, gpu.backend()).unwrap();

    assert_eq!(rt.backend_kind(), BackendKind::Vulkan);
    assert_eq!((rt.width(), rt.height()), (256, 128));
    assert_eq!(rt.color_attachment_count(), 1);
    assert!(rt.has_depth_stencil());
}

#[test]
#[ignore] // Requires GPU
fn test_vulkan_texture_array_layer_range() {
    let gpu = HeadlessDevice::new();
    let desc = TextureDesc {
        width: 64,
        height: 64,
        array_layers: 6,
        usage: TextureUsage::RenderTarget,
        ..TextureDesc::default()
    };
    let texture: Arc<dyn Texture> = Arc::new(VulkanTexture::create(gpu.context(), &desc).unwrap());

    let rt_desc = RenderTargetDesc::new()
        .with_color(0, RenderSurfaceDesc::new(texture.clone()).with_faces(2, 3))
        .with_color(1, RenderSurfaceDesc::new(texture).with_faces(5, 0));
    let rt = RenderTarget::new(rt_desc, 0, gpu.backend()).unwrap();

    assert_eq!(rt.color_view(0).unwrap().info().num_faces, 3);
    assert_eq!(rt.color_view(1).unwrap().info().num_faces, 1);
}

// ============================================================================
// ATTRIBUTE QUERY TESTS
// ============================================================================

#[test]
#[ignore] // Requires GPU
fn test_vulkan_query_handles() {
    let gpu = HeadlessDevice::new();
    let desc = RenderTargetDesc::new()
        .with_color(0, RenderSurfaceDesc::new(
            gpu.texture(32, 32, TextureFormat::B8G8R8A8_SRGB, TextureUsage::RenderTarget)))
        .with_color(2, RenderSurfaceDesc::new(
            gpu.texture(32, 32, TextureFormat::R16G16B16A16_SFLOAT, TextureUsage::RenderTarget)))
        .with_depth_stencil(RenderSurfaceDesc::new(
            gpu.texture(32, 32, TextureFormat::D24_UNORM_S8_UINT, TextureUsage::DepthStencil)));
    let rt = RenderTarget::new(desc, 0, gpu.backend()).unwrap();

    let mut colors = Attribute::ColorTargets.empty_buffer();
    rt.query(Attribute::ColorTargets, &mut colors);
    let slots = colors.color_targets().unwrap();
    let (view0, layout0) = native_image_view(&slots[0].unwrap()).unwrap();
    assert_ne!(view0, vk::ImageView::null());
    assert_eq!(layout0, vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL);
    assert!(slots[1].is_none());
    assert!(slots[2].is_some());

    let mut depth = Attribute::DepthStencilView.empty_buffer();
    rt.query(Attribute::DepthStencilView, &mut depth);
    let (rw_view, rw_layout) = native_image_view(&depth.depth_stencil().flatten().unwrap()).unwrap();
    assert_eq!(rw_layout, vk::ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL);

    let mut read_only = Attribute::ReadOnlyDepthStencilView.empty_buffer();
    rt.custom_attribute("RODSV", &mut read_only);
    let (ro_view, ro_layout) = native_image_view(&read_only.depth_stencil().flatten().unwrap()).unwrap();
    assert_eq!(ro_layout, vk::ImageLayout::DEPTH_STENCIL_READ_ONLY_OPTIMAL);
    assert_eq!(ro_view, rw_view);
}

// ============================================================================
// ERROR TESTS
// ============================================================================

#[test]
#[ignore] // Requires GPU
fn test_vulkan_rejects_second_device() {
    let gpu = HeadlessDevice::new();
    let desc = RenderTargetDesc::new().with_color(0, RenderSurfaceDesc::new(
        gpu.texture(16, 16, TextureFormat::R8G8B8A8_UNORM, TextureUsage::RenderTarget)));

    let result = RenderTarget::new(desc, 1, gpu.backend());
    assert!(matches!(result, Err(Error::UnsupportedConfiguration(_))));
}

#[test]
#[ignore] // Requires GPU
fn test_vulkan_rejects_foreign_texture() {
    let gpu = HeadlessDevice::new();
    let foreign: Arc<dyn Texture> = Arc::new(NullTexture::new(&TextureDesc {
        width: 16,
        height: 16,
        ..TextureDesc::default()
    }));
    let desc = RenderTargetDesc::new().with_color(0, RenderSurfaceDesc::new(foreign));

    let result = RenderTarget::new(desc, 0, gpu.backend());
    assert!(matches!(result, Err(Error::InvalidDescriptor(_))));
}

#[test]
#[ignore] // Requires GPU
fn test_vulkan_texture_rejects_bad_sample_count() {
    let gpu = HeadlessDevice::new();
    let desc = TextureDesc { samples: 3, ..TextureDesc::default() };

    let result = VulkanTexture::create(gpu.context(), &desc);
    assert!(matches!(result, Err(Error::UnsupportedConfiguration(_))));
}
