//! Toast lifecycle management.
//!
//! Every toast walks `Visible -> Dismissing -> Removed`. A toast leaves
//! `Visible` when its auto-dismiss timer fires, when it is clicked, or when
//! [`ToastManager::dismiss`] is called; it is detached from the surface once
//! the exit animation has had time to play.
//!
//! All transitions go through one lock, so the active sequence and the
//! surface are always mutated from a single timeline. Timers are tokio tasks
//! whose handles live next to the toast, so an early dismissal aborts the
//! pending auto-dismiss instead of leaving it to fire into nothing.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use async_channel::{Receiver, Sender, TrySendError};
use chrono::{DateTime, Utc};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, trace, warn};

use crate::config::ToastConfig;
use crate::style::{self, CONTAINER_ID, EXIT_KEYFRAMES, KEYFRAMES_CSS, STYLESHEET_ID};
use crate::surface::Surface;
use crate::types::{
    DismissCause, NotificationRequest, Severity, ToastEvent, ToastEventKind, ToastId, ToastState,
};
use crate::view::ToastView;

/// Point-in-time copy of an active toast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastSnapshot {
    pub id: ToastId,
    pub severity: Severity,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub state: ToastState,
    /// Auto-dismiss delay; zero when the toast waits for a dismissal.
    pub duration: Duration,
}

struct ToastInstance {
    id: ToastId,
    severity: Severity,
    message: String,
    created_at: DateTime<Utc>,
    state: ToastState,
    duration: Duration,
    /// What the surface shows, kept so the element can be mounted again.
    view: ToastView,
    auto_dismiss: Option<JoinHandle<()>>,
    removal: Option<JoinHandle<()>>,
}

impl ToastInstance {
    fn snapshot(&self) -> ToastSnapshot {
        ToastSnapshot {
            id: self.id,
            severity: self.severity,
            message: self.message.clone(),
            created_at: self.created_at,
            state: self.state,
            duration: self.duration,
        }
    }
}

impl Drop for ToastInstance {
    fn drop(&mut self) {
        if let Some(timer) = self.auto_dismiss.take() {
            timer.abort();
        }
        if let Some(timer) = self.removal.take() {
            timer.abort();
        }
    }
}

struct State {
    surface: Box<dyn Surface>,
    /// Active sequence, oldest first.
    toasts: Vec<ToastInstance>,
}

impl State {
    fn position(&self, id: ToastId) -> Option<usize> {
        self.toasts.iter().position(|t| t.id == id)
    }
}

struct Shared {
    config: ToastConfig,
    state: Mutex<State>,
    events: Option<Sender<ToastEvent>>,
}

/// Shows, expires and removes toasts on a [`Surface`].
///
/// Cloning is cheap; clones drive the same active sequence.
#[derive(Clone)]
pub struct ToastManager {
    shared: Arc<Shared>,
}

impl ToastManager {
    pub fn new(surface: impl Surface, config: ToastConfig) -> Self {
        Self::build(Box::new(surface), config, None)
    }

    /// Like [`ToastManager::new`], also returning a receiver of lifecycle
    /// events. The channel holds `config.event_capacity` events; when the
    /// receiver falls behind, newer events are dropped.
    pub fn with_events(surface: impl Surface, config: ToastConfig) -> (Self, Receiver<ToastEvent>) {
        let (tx, rx) = async_channel::bounded(config.event_capacity.max(1));
        (Self::build(Box::new(surface), config, Some(tx)), rx)
    }

    fn build(
        surface: Box<dyn Surface>,
        config: ToastConfig,
        events: Option<Sender<ToastEvent>>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                state: Mutex::new(State {
                    surface,
                    toasts: Vec::new(),
                }),
                events,
            }),
        }
    }

    pub fn config(&self) -> &ToastConfig {
        &self.shared.config
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Show a toast and return its id.
    ///
    /// Never fails: an empty message is shown as-is and the container and
    /// stylesheet are (re)created when missing.
    pub fn notify(&self, request: NotificationRequest) -> ToastId {
        let NotificationRequest {
            message,
            severity,
            duration,
        } = request;
        if message.trim().is_empty() {
            debug!(%severity, "showing toast with empty message");
        }
        let duration =
            duration.unwrap_or_else(|| self.shared.config.durations.for_severity(severity));

        let id = ToastId::new();
        let view = ToastView::new(id, severity, &message, &self.shared.config);

        let mut state = self.lock();
        self.ensure_chrome(&mut state);
        state.surface.mount(&view);

        let auto_dismiss = if duration.is_zero() {
            None
        } else {
            self.spawn_after(duration, move |manager| {
                manager.begin_dismiss(id, DismissCause::Timeout);
            })
        };

        state.toasts.push(ToastInstance {
            id,
            severity,
            message: message.clone(),
            created_at: Utc::now(),
            state: ToastState::Visible,
            duration,
            view,
            auto_dismiss,
            removal: None,
        });
        drop(state);

        info!(
            toast_id = %id,
            %severity,
            duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            "toast shown"
        );
        self.emit(id, ToastEventKind::Shown { severity, message });
        id
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.notify(NotificationRequest::success(message))
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.notify(NotificationRequest::error(message))
    }

    pub fn warning(&self, message: impl Into<String>) -> ToastId {
        self.notify(NotificationRequest::warning(message))
    }

    pub fn info(&self, message: impl Into<String>) -> ToastId {
        self.notify(NotificationRequest::info(message))
    }

    /// Start the exit transition of a visible toast.
    ///
    /// Returns `false` when the toast is unknown or already leaving; calling
    /// it again never schedules a second removal.
    pub fn dismiss(&self, id: ToastId) -> bool {
        self.begin_dismiss(id, DismissCause::Programmatic)
    }

    /// Host click on a toast element.
    pub fn click(&self, id: ToastId) -> bool {
        self.begin_dismiss(id, DismissCause::Click)
    }

    fn begin_dismiss(&self, id: ToastId, cause: DismissCause) -> bool {
        let exit = self.shared.config.animation.exit;
        let mut state = self.lock();
        let Some(pos) = state.position(id) else {
            trace!(toast_id = %id, ?cause, "dismiss of unknown toast ignored");
            return false;
        };
        let toast = &mut state.toasts[pos];
        if toast.state != ToastState::Visible {
            trace!(toast_id = %id, ?cause, state = ?toast.state, "toast already leaving");
            return false;
        }
        toast.state = ToastState::Dismissing;
        if let Some(timer) = toast.auto_dismiss.take() {
            // the timeout path runs inside this very task
            if cause != DismissCause::Timeout {
                timer.abort();
            }
        }

        let animation = style::animation_value(EXIT_KEYFRAMES, exit);
        state.surface.set_animation(id, &animation);
        state.toasts[pos].view.animation = animation;

        match self.spawn_after(exit, move |manager| manager.finish_removal(id)) {
            Some(timer) => state.toasts[pos].removal = Some(timer),
            None => {
                // nothing will fire later, detach right away
                drop(state);
                debug!(toast_id = %id, ?cause, "toast dismissing");
                self.emit(id, ToastEventKind::Dismissing { cause });
                self.finish_removal(id);
                return true;
            }
        }
        drop(state);

        debug!(toast_id = %id, ?cause, "toast dismissing");
        self.emit(id, ToastEventKind::Dismissing { cause });
        true
    }

    fn finish_removal(&self, id: ToastId) {
        let mut state = self.lock();
        let Some(pos) = state.position(id) else {
            return;
        };
        let mut toast = state.toasts.remove(pos);
        // dropping the instance must not abort the task we may be running in
        toast.removal.take();
        if !state.surface.unmount(id) {
            debug!(toast_id = %id, "toast element was already detached");
        }
        drop(state);
        drop(toast);

        debug!(toast_id = %id, "toast removed");
        self.emit(id, ToastEventKind::Removed);
    }

    /// Abort every timer, detach every toast and take the container and
    /// stylesheet off the surface. The next [`ToastManager::notify`] starts
    /// from a blank document.
    pub fn clear(&self) {
        let mut state = self.lock();
        let toasts = std::mem::take(&mut state.toasts);
        for toast in &toasts {
            state.surface.unmount(toast.id);
        }
        state.surface.remove_container();
        state.surface.remove_stylesheet();
        drop(state);

        if !toasts.is_empty() {
            info!(count = toasts.len(), "toasts cleared");
        }
        for toast in toasts {
            self.emit(toast.id, ToastEventKind::Removed);
        }
    }

    /// Active toasts in stacking order, oldest first.
    pub fn active(&self) -> Vec<ToastSnapshot> {
        self.lock().toasts.iter().map(ToastInstance::snapshot).collect()
    }

    pub fn snapshot(&self, id: ToastId) -> Option<ToastSnapshot> {
        let state = self.lock();
        state.position(id).map(|pos| state.toasts[pos].snapshot())
    }

    /// Lifecycle state of a toast. Ids that are not active report `Removed`.
    pub fn state(&self, id: ToastId) -> ToastState {
        self.snapshot(id)
            .map_or(ToastState::Removed, |snapshot| snapshot.state)
    }

    pub fn len(&self) -> usize {
        self.lock().toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether some toast will still leave on its own.
    pub fn has_pending_timers(&self) -> bool {
        self.lock()
            .toasts
            .iter()
            .any(|t| t.auto_dismiss.is_some() || t.removal.is_some())
    }

    /// Create the container and stylesheet when missing. A container that
    /// vanished took its elements with it, so every active toast is mounted
    /// again in stacking order.
    fn ensure_chrome(&self, state: &mut State) {
        let State { surface, toasts } = state;
        if !surface.has_container() {
            debug!("creating toast container");
            surface.create_container(
                CONTAINER_ID,
                &style::container_css(&self.shared.config.placement),
            );
            if !toasts.is_empty() {
                warn!(count = toasts.len(), "toast container was lost, remounting toasts");
            }
            for toast in toasts.iter() {
                surface.mount(&toast.view);
            }
        }
        if !surface.has_stylesheet() {
            surface.inject_stylesheet(STYLESHEET_ID, KEYFRAMES_CSS);
        }
    }

    fn spawn_after<F>(&self, delay: Duration, action: F) -> Option<JoinHandle<()>>
    where
        F: FnOnce(Self) + Send + 'static,
    {
        let Ok(runtime) = Handle::try_current() else {
            warn!("no tokio runtime, toast timer not scheduled");
            return None;
        };
        let deadline = Instant::now() + delay;
        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        Some(runtime.spawn(async move {
            sleep_until(deadline).await;
            if let Some(shared) = shared.upgrade() {
                action(Self { shared });
            }
        }))
    }

    fn emit(&self, id: ToastId, kind: ToastEventKind) {
        let Some(tx) = self.shared.events.as_ref() else {
            return;
        };
        let event = ToastEvent {
            id,
            kind,
            at: Utc::now(),
        };
        match tx.try_send(event) {
            Ok(()) | Err(TrySendError::Closed(_)) => {}
            Err(TrySendError::Full(event)) => {
                warn!(toast_id = %event.id, "toast event channel full; dropping event");
            }
        }
    }
}

impl fmt::Debug for ToastManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastManager")
            .field("config", &self.shared.config)
            .field("active", &self.len())
            .finish_non_exhaustive()
    }
}
