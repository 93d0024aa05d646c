use std::time::Duration;

use crate::types::Severity;

pub(super) const fn default_success_duration() -> Duration {
    Severity::Success.default_duration()
}

pub(super) const fn default_error_duration() -> Duration {
    Severity::Error.default_duration()
}

pub(super) const fn default_warning_duration() -> Duration {
    Severity::Warning.default_duration()
}

pub(super) const fn default_info_duration() -> Duration {
    Severity::Info.default_duration()
}

pub(super) const fn default_enter_animation() -> Duration {
    Duration::from_millis(300)
}

pub(super) const fn default_exit_animation() -> Duration {
    Duration::from_millis(300)
}

pub(super) const fn default_top() -> u32 {
    80
}

pub(super) const fn default_right() -> u32 {
    20
}

pub(super) const fn default_gap() -> u32 {
    10
}

pub(super) const fn default_z_index() -> i32 {
    10_000
}

pub(super) const fn default_min_width() -> u32 {
    300
}

pub(super) const fn default_max_width() -> u32 {
    500
}

pub(super) const fn default_event_capacity() -> usize {
    64
}
