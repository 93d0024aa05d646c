//! Visual treatment of toasts: per-severity icon and colours, plus the CSS
//! the host document needs for the container, the toast box and the
//! slide animations.

use crate::config::Placement;
use crate::types::Severity;

/// Element id of the shared container.
pub const CONTAINER_ID: &str = "toast-container";
/// Element id of the injected keyframes stylesheet.
pub const STYLESHEET_ID: &str = "toast-animations";
/// Class carried by every toast element.
pub const TOAST_CLASS: &str = "toast-item";

pub const ENTER_KEYFRAMES: &str = "slideIn";
pub const EXIT_KEYFRAMES: &str = "slideOut";

pub const KEYFRAMES_CSS: &str = "\
@keyframes slideIn {
    from { transform: translateX(400px); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}
@keyframes slideOut {
    from { transform: translateX(0); opacity: 1; }
    to { transform: translateX(400px); opacity: 0; }
}
";

/// Icon and colours for one severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Treatment {
    /// Font Awesome icon class.
    pub icon: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
}

impl Treatment {
    pub const fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Success => Self {
                icon: "fa-check-circle",
                accent: "#10b981",
                background: "#d1fae5",
            },
            Severity::Error => Self {
                icon: "fa-times-circle",
                accent: "#ef4444",
                background: "#fee2e2",
            },
            Severity::Warning => Self {
                icon: "fa-exclamation-triangle",
                accent: "#f59e0b",
                background: "#fef3c7",
            },
            Severity::Info => Self {
                icon: "fa-info-circle",
                accent: "#3b82f6",
                background: "#dbeafe",
            },
        }
    }
}

pub fn container_css(placement: &Placement) -> String {
    format!(
        "position: fixed; top: {}px; right: {}px; z-index: {}; display: flex; \
         flex-direction: column; gap: {}px;",
        placement.top, placement.right, placement.z_index, placement.gap
    )
}

/// Box style of a toast. The running animation is appended separately since
/// it changes when the toast starts leaving.
pub fn toast_css(treatment: Treatment, placement: &Placement) -> String {
    format!(
        "min-width: {}px; max-width: {}px; padding: 16px 20px; background: {}; \
         border-left: 4px solid {}; border-radius: 8px; box-shadow: 0 4px 12px rgba(0,0,0,0.15); \
         display: flex; align-items: center; gap: 12px; cursor: pointer;",
        placement.min_width, placement.max_width, treatment.background, treatment.accent,
    )
}

/// CSS `animation` shorthand, e.g. `slideOut 0.3s ease-out`.
pub fn animation_value(keyframes: &str, duration: std::time::Duration) -> String {
    format!("{keyframes} {}s ease-out", trim_seconds(duration))
}

fn trim_seconds(duration: std::time::Duration) -> String {
    let formatted = format!("{:.3}", duration.as_secs_f64());
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
