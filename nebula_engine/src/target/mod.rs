//! Render target module
//!
//! Render target descriptors, the backend-agnostic `RenderTarget` and the
//! named `TargetManager`.

mod render_target;
mod render_target_desc;
mod target_manager;

pub use render_target::{RenderTarget, RenderTargetProperties};
pub use render_target_desc::{RenderSurfaceDesc, RenderTargetDesc};
pub use target_manager::TargetManager;
