use std::fmt::{self, Display};
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl Severity {
    pub const ALL: [Self; 4] = [Self::Success, Self::Error, Self::Warning, Self::Info];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Built-in display time. Errors stay on screen longer.
    pub const fn default_duration(self) -> Duration {
        match self {
            Self::Success | Self::Info => Duration::from_millis(3_000),
            Self::Error => Duration::from_millis(4_000),
            Self::Warning => Duration::from_millis(3_500),
        }
    }

    /// Page scripts hand over whatever string they have; anything unknown is
    /// shown as `info` instead of being rejected.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            tracing::debug!(severity = raw, "unknown severity, falling back to info");
            Self::Info
        })
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" | "ok" => Ok(Self::Success),
            "error" | "err" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "info" | "information" => Ok(Self::Info),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// Opaque toast identifier; v7 so ids sort by creation time.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ToastId(Uuid);

impl ToastId {
    pub(crate) fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Element id used for the toast inside the host document.
    pub fn dom_id(self) -> String {
        format!("toast-{}", self.0.simple())
    }
}

impl Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastState {
    Visible,
    Dismissing,
    Removed,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DismissCause {
    Timeout,
    Click,
    Programmatic,
}

/// A request to show one toast.
///
/// `duration` of `None` uses the severity default, `Some(Duration::ZERO)`
/// keeps the toast until it is dismissed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationRequest {
    pub message: String,
    pub severity: Severity,
    pub duration: Option<Duration>,
}

impl NotificationRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message).severity(Severity::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message).severity(Severity::Error)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message).severity(Severity::Warning)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message).severity(Severity::Info)
    }

    /// Build a request from loosely typed page input: the severity goes
    /// through [`Severity::parse_lenient`], a missing duration keeps the
    /// severity default and `Some(0)` keeps the toast until dismissed.
    pub fn lenient(message: impl Into<String>, severity: &str, duration_ms: Option<u64>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::parse_lenient(severity),
            duration: duration_ms.map(Duration::from_millis),
        }
    }

    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn sticky(self) -> Self {
        self.duration(Duration::ZERO)
    }
}

/// Lifecycle notification published by the manager.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ToastEvent {
    pub id: ToastId,
    #[serde(flatten)]
    pub kind: ToastEventKind,
    pub at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ToastEventKind {
    Shown { severity: Severity, message: String },
    Dismissing { cause: DismissCause },
    Removed,
}

#[cfg(test)]
mod tests {
    use super::{
        DismissCause, NotificationRequest, Severity, ToastEvent, ToastEventKind, ToastId,
    };
    use std::str::FromStr;
    use std::time::Duration;

    #[test]
    fn severity_from_str_accepts_variants() {
        assert_eq!(Severity::from_str("success"), Ok(Severity::Success));
        assert_eq!(Severity::from_str(" ERROR "), Ok(Severity::Error));
        assert_eq!(Severity::from_str("warn"), Ok(Severity::Warning));
        assert!(Severity::from_str("fatal").is_err());
    }

    #[test]
    fn lenient_parse_falls_back_to_info() {
        assert_eq!(Severity::parse_lenient("fatal"), Severity::Info);
        assert_eq!(Severity::parse_lenient(""), Severity::Info);
        assert_eq!(Severity::parse_lenient("warning"), Severity::Warning);
    }

    #[test]
    fn default_durations_match_severity() {
        assert_eq!(Severity::Success.default_duration(), Duration::from_millis(3_000));
        assert_eq!(Severity::Error.default_duration(), Duration::from_millis(4_000));
        assert_eq!(Severity::Warning.default_duration(), Duration::from_millis(3_500));
        assert_eq!(Severity::Info.default_duration(), Duration::from_millis(3_000));
    }

    #[test]
    fn request_defaults_to_info_without_duration() {
        let request = NotificationRequest::new("hello");
        assert_eq!(request.severity, Severity::Info);
        assert_eq!(request.duration, None);
        assert_eq!(
            NotificationRequest::error("x").sticky().duration,
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn toast_ids_are_unique() {
        assert_ne!(ToastId::new(), ToastId::new());
        assert!(ToastId::new().dom_id().starts_with("toast-"));
    }

    #[test]
    fn events_serialize_flat_with_a_tag() {
        let event = ToastEvent {
            id: ToastId::new(),
            kind: ToastEventKind::Dismissing {
                cause: DismissCause::Click,
            },
            at: chrono::Utc::now(),
        };
        let value = match serde_json::to_value(&event) {
            Ok(value) => value,
            Err(err) => panic!("event should serialize: {err}"),
        };
        assert_eq!(value["event"], "dismissing");
        assert_eq!(value["cause"], "click");
        assert_eq!(value["id"], event.id.to_string());
    }
}
