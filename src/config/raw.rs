use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;

use crate::Result;
use crate::error::ConfigError;

use super::defaults::{
    default_enter_animation, default_error_duration, default_event_capacity,
    default_exit_animation, default_gap, default_info_duration, default_max_width,
    default_min_width, default_right, default_success_duration, default_top,
    default_warning_duration, default_z_index,
};
use super::env::{env_bool, env_duration, env_parse};
use super::{
    ANIMATION_BOUNDS, Animation, Durations, HumantimeDuration, Placement, ToastConfig,
};

pub(super) fn load(path: impl AsRef<Path>) -> std::result::Result<RawConfig, ConfigError> {
    let mut builder = ::config::Config::builder();
    let path = path.as_ref();
    builder = builder.add_source(::config::File::from(path).required(false));
    builder = builder.add_source(
        ::config::Environment::with_prefix("TOAST")
            .separator("__")
            .try_parsing(true),
    );

    builder
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[cfg(test)]
pub(super) fn from_toml_str(source: &str) -> std::result::Result<RawConfig, ConfigError> {
    ::config::Config::builder()
        .add_source(::config::File::from_str(source, ::config::FileFormat::Toml))
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) durations: RawDurations,
    #[serde(default)]
    pub(super) animation: RawAnimation,
    #[serde(default)]
    pub(super) placement: RawPlacement,
    #[serde(default)]
    pub(super) events: RawEvents,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawDurations {
    #[serde(default)]
    pub(super) sticky: bool,
    #[serde(default = "default_success_duration")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) success: Duration,
    #[serde(default = "default_error_duration")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) error: Duration,
    #[serde(default = "default_warning_duration")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) warning: Duration,
    #[serde(default = "default_info_duration")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) info: Duration,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawAnimation {
    #[serde(default = "default_enter_animation")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) enter: Duration,
    #[serde(default = "default_exit_animation")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) exit: Duration,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawPlacement {
    #[serde(default = "default_top")]
    pub(super) top: u32,
    #[serde(default = "default_right")]
    pub(super) right: u32,
    #[serde(default = "default_gap")]
    pub(super) gap: u32,
    #[serde(default = "default_z_index")]
    pub(super) z_index: i32,
    #[serde(default = "default_min_width")]
    pub(super) min_width: u32,
    #[serde(default = "default_max_width")]
    pub(super) max_width: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawEvents {
    #[serde(default = "default_event_capacity")]
    pub(super) capacity: usize,
}

impl RawConfig {
    pub(super) fn apply_env_overrides(&mut self) -> std::result::Result<(), ConfigError> {
        if let Some(sticky) = env_bool("TOAST_STICKY")? {
            self.durations.sticky = sticky;
        }
        if let Some(success) = env_duration("TOAST_SUCCESS_DURATION")? {
            self.durations.success = success;
        }
        if let Some(error) = env_duration("TOAST_ERROR_DURATION")? {
            self.durations.error = error;
        }
        if let Some(warning) = env_duration("TOAST_WARNING_DURATION")? {
            self.durations.warning = warning;
        }
        if let Some(info) = env_duration("TOAST_INFO_DURATION")? {
            self.durations.info = info;
        }
        if let Some(enter) = env_duration("TOAST_ENTER_ANIMATION")? {
            self.animation.enter = enter;
        }
        if let Some(exit) = env_duration("TOAST_EXIT_ANIMATION")? {
            self.animation.exit = exit;
        }
        if let Some(capacity) = env_parse::<usize>("TOAST_EVENT_CAPACITY")? {
            self.events.capacity = capacity;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<ToastConfig> {
        check_animation("animation.enter", self.animation.enter)?;
        check_animation("animation.exit", self.animation.exit)?;
        if self.placement.min_width > self.placement.max_width {
            return Err(ConfigError::InvalidField {
                field: "placement.min_width",
                message: format!(
                    "min_width {} exceeds max_width {}",
                    self.placement.min_width, self.placement.max_width
                ),
            }
            .into());
        }
        if self.events.capacity == 0 {
            return Err(ConfigError::InvalidField {
                field: "events.capacity",
                message: "event capacity must be greater than zero".to_string(),
            }
            .into());
        }

        let durations = if self.durations.sticky {
            Durations::sticky()
        } else {
            Durations {
                success: self.durations.success,
                error: self.durations.error,
                warning: self.durations.warning,
                info: self.durations.info,
            }
        };

        Ok(ToastConfig {
            durations,
            animation: Animation {
                enter: self.animation.enter,
                exit: self.animation.exit,
            },
            placement: Placement {
                top: self.placement.top,
                right: self.placement.right,
                gap: self.placement.gap,
                z_index: self.placement.z_index,
                min_width: self.placement.min_width,
                max_width: self.placement.max_width,
            },
            event_capacity: self.events.capacity,
        })
    }
}

fn check_animation(field: &'static str, value: Duration) -> Result<()> {
    if ANIMATION_BOUNDS.contains(&value) {
        return Ok(());
    }
    Err(ConfigError::InvalidField {
        field,
        message: format!(
            "expected between {:?} and {:?}, got {:?}",
            ANIMATION_BOUNDS.start(),
            ANIMATION_BOUNDS.end(),
            value
        ),
    }
    .into())
}

impl Default for RawDurations {
    fn default() -> Self {
        Self {
            sticky: false,
            success: default_success_duration(),
            error: default_error_duration(),
            warning: default_warning_duration(),
            info: default_info_duration(),
        }
    }
}

impl Default for RawAnimation {
    fn default() -> Self {
        Self {
            enter: default_enter_animation(),
            exit: default_exit_animation(),
        }
    }
}

impl Default for RawPlacement {
    fn default() -> Self {
        Self {
            top: default_top(),
            right: default_right(),
            gap: default_gap(),
            z_index: default_z_index(),
            min_width: default_min_width(),
            max_width: default_max_width(),
        }
    }
}

impl Default for RawEvents {
    fn default() -> Self {
        Self {
            capacity: default_event_capacity(),
        }
    }
}
