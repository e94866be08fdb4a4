/// Engine singleton
///
/// Process-wide home of the logger and of the render target manager.

use std::sync::{Arc, Mutex, OnceLock, RwLock};
use crate::error::Result;
use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
use crate::target::TargetManager;

const SOURCE: &str = "nebula::Engine";

type ManagerSlot = RwLock<Option<Arc<Mutex<TargetManager>>>>;

/// Set by `Engine::initialize`
static TARGET_MANAGER: OnceLock<ManagerSlot> = OnceLock::new();

/// Usable before `initialize`: subsystems may log at any time
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Engine entry point
///
/// ```no_run
/// use nebula_engine::nebula::Engine;
///
/// Engine::initialize()?;
/// Engine::create_target_manager()?;
///
/// let targets = Engine::target_manager()?;
/// assert_eq!(targets.lock().unwrap().render_target_count(), 0);
///
/// Engine::shutdown();
/// # Ok::<(), nebula_engine::nebula::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Initialize the engine. Calling it again is harmless.
    pub fn initialize() -> Result<()> {
        TARGET_MANAGER.get_or_init(|| RwLock::new(None));
        Ok(())
    }

    /// Drop the target manager, and with it every registered render target
    /// and its native views
    pub fn shutdown() {
        if let Some(slot) = TARGET_MANAGER.get() {
            if let Ok(mut manager) = slot.write() {
                manager.take();
            }
        }
    }

    fn manager_slot() -> Result<&'static ManagerSlot> {
        TARGET_MANAGER.get().ok_or_else(|| crate::engine_err!(SOURCE => InitializationFailed,
            "Engine not initialized. Call Engine::initialize() first."))
    }

    // ===== TARGET MANAGER =====

    /// Create the target manager
    ///
    /// Fails if the engine is not initialized or a manager already exists.
    pub fn create_target_manager() -> Result<()> {
        let mut manager = Self::manager_slot()?.write()
            .map_err(|_| crate::engine_err!(SOURCE, "TargetManager lock poisoned"))?;

        if manager.is_some() {
            crate::engine_bail!(SOURCE => InitializationFailed,
                "TargetManager already exists. Call Engine::destroy_target_manager() first.");
        }
        *manager = Some(Arc::new(Mutex::new(TargetManager::new())));

        crate::engine_info!(SOURCE, "TargetManager created");
        Ok(())
    }

    /// Shared handle to the target manager
    pub fn target_manager() -> Result<Arc<Mutex<TargetManager>>> {
        let manager = Self::manager_slot()?.read()
            .map_err(|_| crate::engine_err!(SOURCE, "TargetManager lock poisoned"))?;

        manager.clone().ok_or_else(|| crate::engine_err!(SOURCE => InitializationFailed,
            "TargetManager not created. Call Engine::create_target_manager() first."))
    }

    /// Unregister the target manager
    ///
    /// Handles obtained earlier keep it (and its render targets) alive until
    /// they are dropped.
    pub fn destroy_target_manager() -> Result<()> {
        let previous = Self::manager_slot()?.write()
            .map_err(|_| crate::engine_err!(SOURCE, "TargetManager lock poisoned"))?
            .take();

        if previous.is_some() {
            crate::engine_info!(SOURCE, "TargetManager destroyed");
        }
        Ok(())
    }

    // ===== LOGGING =====

    fn logger() -> &'static RwLock<Box<dyn Logger>> {
        LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::default())))
    }

    fn dispatch(entry: LogEntry) {
        if let Ok(logger) = Self::logger().read() {
            logger.log(&entry);
        }
    }

    /// Install a custom logger
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut current) = Self::logger().write() {
            *current = Box::new(logger);
        }
    }

    /// Go back to the console logger
    pub fn reset_logger() {
        Self::set_logger(DefaultLogger::default());
    }

    /// Log without call site (`engine_trace!` .. `engine_warn!`)
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(LogEntry::new(severity, source, message));
    }

    /// Log with call site (`engine_error!`)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(LogEntry::new(severity, source, message).at(file, line));
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
