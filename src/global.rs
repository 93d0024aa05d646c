//! Process-wide toast entry points for page scripts.
//!
//! The shared manager is created on first use over a [`MemorySurface`] with
//! the default configuration. Hosts that render somewhere real call
//! [`install`] before the first toast.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::ToastConfig;
use crate::manager::ToastManager;
use crate::surface::MemorySurface;
use crate::types::{NotificationRequest, ToastId};

static GLOBAL: Mutex<Option<ToastManager>> = Mutex::new(None);

fn slot() -> MutexGuard<'static, Option<ToastManager>> {
    GLOBAL.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The shared manager, created on first call.
pub fn manager() -> ToastManager {
    slot()
        .get_or_insert_with(|| {
            tracing::debug!("creating process-wide toast manager");
            ToastManager::new(MemorySurface::new(), ToastConfig::default())
        })
        .clone()
}

/// Replace the shared manager, returning the previous one if any.
pub fn install(manager: ToastManager) -> Option<ToastManager> {
    slot().replace(manager)
}

/// Clear the shared manager's toasts and forget it. Used between test cases;
/// the next entry point call starts over with a fresh default manager.
pub fn reset() {
    let previous = slot().take();
    if let Some(manager) = previous {
        manager.clear();
    }
}

/// Show a toast from loosely typed input. Unknown severities show as info;
/// `None` uses the severity's default duration, `Some(0)` never expires.
pub fn notify(message: impl Into<String>, severity: &str, duration_ms: Option<u64>) -> ToastId {
    manager().notify(NotificationRequest::lenient(message, severity, duration_ms))
}

pub fn notify_success(message: impl Into<String>) -> ToastId {
    manager().success(message)
}

pub fn notify_error(message: impl Into<String>) -> ToastId {
    manager().error(message)
}

pub fn notify_warning(message: impl Into<String>) -> ToastId {
    manager().warning(message)
}

pub fn notify_info(message: impl Into<String>) -> ToastId {
    manager().info(message)
}

/// Dismiss a toast shown through the shared manager.
pub fn dismiss(id: ToastId) -> bool {
    manager().dismiss(id)
}
