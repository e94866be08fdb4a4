/*!
# Nebula Engine

Backend-agnostic render target layer for the Nebula rendering engine.

A render target aggregates up to `MAX_COLOR_TARGETS` color attachments and
an optional depth/stencil attachment. Each graphics backend provides a
`RenderTargetBackend` that turns attachment descriptions into native views
and answers named attribute queries, so immediate-mode code can get at the
native handles without knowing which backend is active.

## Architecture

- **Texture**: texture resource trait (owned by the rest of the engine)
- **TextureView**: one native view per attachment, owned by its render target
- **RenderTargetBackend**: per-backend adapter (null backend here, Vulkan in
  `nebula_renderer_vulkan`)
- **RenderTarget**: validated attachment set + attribute query dispatch
- **TargetManager**: named render targets, registered on the `Engine`
*/

mod error;
mod engine;
pub mod log;
pub mod renderer;
pub mod target;

/// Main nebula namespace module
pub mod nebula {
    pub use crate::error::{Error, Result};

    pub use crate::engine::Engine;

    // Logging types (engine_* macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    /// Textures, views, attribute queries and backends
    pub mod render {
        pub use crate::renderer::*;
    }

    /// Render targets and the target manager
    pub mod target {
        pub use crate::target::*;
    }
}
