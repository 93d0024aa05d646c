#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod error;
pub mod global;
pub mod manager;
pub mod style;
pub mod surface;
pub mod telemetry;
pub mod types;
pub mod view;

pub use manager::{ToastManager, ToastSnapshot};
pub use surface::{MemorySurface, Surface};
pub use types::{NotificationRequest, Severity, ToastEvent, ToastId, ToastState};

pub type Result<T> = std::result::Result<T, error::Error>;
