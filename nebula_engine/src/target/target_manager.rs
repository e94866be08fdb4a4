/// Central render target manager for the engine.
///
/// Owns named render targets (screen, shadow maps, G-buffers, ...). Removing
/// a render target, or dropping the manager, releases its native views.

use std::collections::hash_map::Entry;
use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::renderer::RenderTargetBackend;
use super::render_target::RenderTarget;
use super::render_target_desc::RenderTargetDesc;

/// Target manager singleton (managed by Engine)
#[derive(Debug, Default)]
pub struct TargetManager {
    render_targets: FxHashMap<String, RenderTarget>,
}

impl TargetManager {
    /// Create a new empty target manager
    pub fn new() -> Self {
        Self {
            render_targets: FxHashMap::default(),
        }
    }

    /// Create a new named render target
    ///
    /// # Errors
    ///
    /// Returns `InvalidResource` if the name is taken, or any error of
    /// `RenderTarget::new`. Nothing is registered on failure.
    pub fn create_render_target(
        &mut self,
        name: &str,
        desc: RenderTargetDesc,
        device_index: u32,
        backend: Arc<dyn RenderTargetBackend>,
    ) -> Result<&RenderTarget> {
        match self.render_targets.entry(name.to_string()) {
            Entry::Occupied(_) => {
                crate::engine_bail!("nebula::TargetManager" => InvalidResource,
                    "RenderTarget '{}' already exists", name);
            }
            Entry::Vacant(entry) => {
                let render_target = RenderTarget::new(desc, device_index, backend)?;
                Ok(entry.insert(render_target))
            }
        }
    }

    /// Rebuild a render target from its own descriptor
    ///
    /// Used after a device reset. The replacement is built first; if that
    /// fails the existing render target is kept and the error returned.
    pub fn rebuild_render_target(&mut self, name: &str) -> Result<&RenderTarget> {
        let Some(existing) = self.render_targets.get_mut(name) else {
            crate::engine_bail!("nebula::TargetManager" => InvalidResource,
                "RenderTarget '{}' not found", name);
        };

        let rebuilt = RenderTarget::new(
            existing.desc().clone(),
            existing.device_index(),
            existing.backend().clone(),
        )?;
        *existing = rebuilt;

        crate::engine_info!("nebula::TargetManager", "RenderTarget '{}' rebuilt", name);
        Ok(existing)
    }

    /// Get a render target by name
    pub fn render_target(&self, name: &str) -> Option<&RenderTarget> {
        self.render_targets.get(name)
    }

    /// Remove a render target by name
    ///
    /// Returns the removed render target, or None if not found.
    pub fn remove_render_target(&mut self, name: &str) -> Option<RenderTarget> {
        self.render_targets.remove(name)
    }

    /// Get the number of render targets
    pub fn render_target_count(&self) -> usize {
        self.render_targets.len()
    }

    /// Get all render target names
    pub fn render_target_names(&self) -> Vec<&str> {
        self.render_targets.keys().map(|k| k.as_str()).collect()
    }

    /// Remove all render targets
    pub fn clear(&mut self) {
        self.render_targets.clear();
    }
}

#[cfg(test)]
#[path = "target_manager_tests.rs"]
mod tests;
