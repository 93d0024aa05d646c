use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

use crate::Result;
use crate::error::Error as ToastError;
use crate::types::Severity;

mod defaults;
mod env;
mod raw;
mod serde;

use serde::HumantimeDuration;

const ANIMATION_BOUNDS: RangeInclusive<Duration> = Duration::from_millis(1)..=Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastConfig {
    pub durations: Durations,
    pub animation: Animation,
    pub placement: Placement,
    /// Capacity of the lifecycle event channel.
    pub event_capacity: usize,
}

/// Auto-dismiss delay per severity. Zero keeps the toast until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Durations {
    pub success: Duration,
    pub error: Duration,
    pub warning: Duration,
    pub info: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    pub enter: Duration,
    pub exit: Duration,
}

/// Where the container sits and how wide toasts may grow, in CSS pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub top: u32,
    pub right: u32,
    pub gap: u32,
    pub z_index: i32,
    pub min_width: u32,
    pub max_width: u32,
}

impl ToastConfig {
    /// Load configuration from an optional TOML file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be parsed, when environment
    /// overrides are malformed, or when the resulting values fail validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path).map_err(ToastError::from)?;
        raw.apply_env_overrides().map_err(ToastError::from)?;
        raw.validate_and_build()
    }
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            durations: Durations::default(),
            animation: Animation {
                enter: defaults::default_enter_animation(),
                exit: defaults::default_exit_animation(),
            },
            placement: Placement {
                top: defaults::default_top(),
                right: defaults::default_right(),
                gap: defaults::default_gap(),
                z_index: defaults::default_z_index(),
                min_width: defaults::default_min_width(),
                max_width: defaults::default_max_width(),
            },
            event_capacity: defaults::default_event_capacity(),
        }
    }
}

impl Durations {
    #[must_use]
    pub const fn for_severity(&self, severity: Severity) -> Duration {
        match severity {
            Severity::Success => self.success,
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    /// Every severity persists until dismissed.
    #[must_use]
    pub const fn sticky() -> Self {
        Self {
            success: Duration::ZERO,
            error: Duration::ZERO,
            warning: Duration::ZERO,
            info: Duration::ZERO,
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            success: Severity::Success.default_duration(),
            error: Severity::Error.default_duration(),
            warning: Severity::Warning.default_duration(),
            info: Severity::Info.default_duration(),
        }
    }
}
