#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use async_channel::Receiver;
use storefront_toast::config::ToastConfig;
use storefront_toast::surface::SurfaceOp;
use storefront_toast::types::{DismissCause, ToastEventKind};
use storefront_toast::{
    MemorySurface, NotificationRequest, Severity, ToastEvent, ToastManager, ToastState,
};
use tokio::time::sleep;

fn manager() -> (ToastManager, MemorySurface, Receiver<ToastEvent>) {
    let surface = MemorySurface::new();
    let (manager, events) = ToastManager::with_events(surface.clone(), ToastConfig::default());
    (manager, surface, events)
}

fn drain(events: &Receiver<ToastEvent>) -> Vec<ToastEvent> {
    std::iter::from_fn(|| events.try_recv().ok()).collect()
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn toast_expires_exactly_at_its_duration() {
    let (manager, surface, _events) = manager();
    let id = manager.notify(NotificationRequest::info("Copied").duration(ms(3_000)));

    sleep(ms(2_999)).await;
    assert_eq!(manager.state(id), ToastState::Visible);
    assert!(surface.element(id).is_some());

    sleep(ms(2)).await;
    assert_eq!(manager.state(id), ToastState::Dismissing);
    let element = surface.element(id).expect("element stays while dismissing");
    assert_eq!(element.animation, "slideOut 0.3s ease-out");

    sleep(ms(300)).await;
    assert_eq!(manager.state(id), ToastState::Removed);
    assert!(surface.element(id).is_none());
    assert!(manager.is_empty());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn zero_duration_persists_until_clicked() {
    let (manager, surface, _events) = manager();
    let id = manager.notify(NotificationRequest::error("Card declined").sticky());

    sleep(Duration::from_secs(3_600)).await;
    assert_eq!(manager.state(id), ToastState::Visible);
    assert!(!manager.has_pending_timers());

    assert!(manager.click(id));
    assert_eq!(manager.state(id), ToastState::Dismissing);
    sleep(ms(301)).await;
    assert!(surface.elements().is_empty());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn click_preempts_the_auto_dismiss_timer() {
    let (manager, surface, events) = manager();
    let id = manager.error("Network error");

    sleep(ms(1_000)).await;
    assert!(manager.click(id));
    assert_eq!(manager.state(id), ToastState::Dismissing);

    sleep(ms(301)).await;
    assert_eq!(manager.state(id), ToastState::Removed);

    // well past the original 4s deadline
    sleep(ms(10_000)).await;
    let dismissals: Vec<_> = drain(&events)
        .into_iter()
        .filter_map(|event| match event.kind {
            ToastEventKind::Dismissing { cause } => Some(cause),
            _ => None,
        })
        .collect();
    assert_eq!(dismissals, vec![DismissCause::Click]);
    assert_eq!(surface.count_ops(|op| *op == SurfaceOp::Unmount(id)), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn dismiss_is_idempotent() {
    let (manager, surface, events) = manager();
    let id = manager.warning("Low stock");

    assert!(manager.dismiss(id));
    assert!(!manager.dismiss(id));
    sleep(ms(400)).await;
    assert!(!manager.dismiss(id));

    assert_eq!(surface.count_ops(|op| *op == SurfaceOp::Unmount(id)), 1);
    let removed = drain(&events)
        .into_iter()
        .filter(|event| event.kind == ToastEventKind::Removed)
        .count();
    assert_eq!(removed, 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn stacking_order_is_creation_order() {
    let (manager, surface, _events) = manager();
    let a = manager.info("A");
    manager.info("B");
    manager.info("C");
    assert_eq!(surface.messages(), ["A", "B", "C"]);

    manager.dismiss(a);
    sleep(ms(301)).await;
    manager.info("D");
    assert_eq!(surface.messages(), ["B", "C", "D"]);
    let order: Vec<_> = manager.active().into_iter().map(|t| t.message).collect();
    assert_eq!(order, ["B", "C", "D"]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn saved_and_network_error_scenario() {
    let (manager, surface, _events) = manager();
    let saved = manager.notify(NotificationRequest::lenient("Saved", "success", None));
    let failed = manager.notify(NotificationRequest::lenient("Network error", "error", None));

    let saved_el = surface.element(saved).unwrap();
    assert_eq!(saved_el.severity, Severity::Success);
    assert_eq!(saved_el.accent, "#10b981");
    assert!(saved_el.html.contains(">Saved</span>"));
    assert_eq!(surface.element(failed).unwrap().accent, "#ef4444");

    sleep(ms(3_001)).await;
    assert_eq!(manager.state(saved), ToastState::Dismissing);
    assert_eq!(manager.state(failed), ToastState::Visible);

    sleep(ms(998)).await;
    assert_eq!(manager.state(saved), ToastState::Removed);
    assert_eq!(manager.state(failed), ToastState::Visible);

    sleep(ms(2)).await;
    assert_eq!(manager.state(failed), ToastState::Dismissing);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn unknown_severity_renders_as_info() {
    let (manager, surface, _events) = manager();
    let id = manager.notify(NotificationRequest::lenient("Psst", "whisper", None));
    let element = surface.element(id).unwrap();
    assert_eq!(element.severity, Severity::Info);
    assert_eq!(element.icon, "fa-info-circle");
    assert_eq!(element.accent, "#3b82f6");
    assert_eq!(manager.snapshot(id).unwrap().duration, ms(3_000));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn configured_durations_and_exit_animation_apply() {
    let mut config = ToastConfig::default();
    config.durations.success = ms(500);
    config.animation.exit = ms(100);
    let surface = MemorySurface::new();
    let manager = ToastManager::new(surface.clone(), config);

    let id = manager.success("Quick");
    sleep(ms(501)).await;
    assert_eq!(
        surface.element(id).unwrap().animation,
        "slideOut 0.1s ease-out"
    );
    sleep(ms(100)).await;
    assert!(surface.elements().is_empty());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn clear_aborts_pending_timers() {
    let (manager, surface, events) = manager();
    manager.success("one");
    manager.error("two");
    manager.clear();
    drain(&events);

    sleep(ms(10_000)).await;
    assert!(drain(&events).is_empty());
    assert!(surface.container_css().is_none());

    manager.info("fresh");
    assert_eq!(surface.messages(), ["fresh"]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn lost_container_gets_its_toasts_back() {
    let (manager, surface, _events) = manager();
    let pinned = manager.notify(NotificationRequest::info("pinned").sticky());
    let leaving = manager.info("leaving");
    manager.dismiss(leaving);
    surface.detach_container();

    let after = manager.info("after");
    assert_eq!(surface.messages(), ["pinned", "leaving", "after"]);
    assert_eq!(
        surface.element(leaving).unwrap().animation,
        "slideOut 0.3s ease-out"
    );

    sleep(Duration::from_secs(60)).await;
    for snapshot in manager.active() {
        assert!(
            surface.element(snapshot.id).is_some(),
            "{:?} toast has no element",
            snapshot.state
        );
    }
    assert_eq!(manager.state(pinned), ToastState::Visible);
    assert_eq!(manager.state(leaving), ToastState::Removed);
    assert_eq!(manager.state(after), ToastState::Removed);
    assert_eq!(surface.messages(), ["pinned"]);

    assert!(manager.click(pinned));
    sleep(ms(301)).await;
    assert!(manager.is_empty());
    assert!(surface.elements().is_empty());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn full_event_channel_never_blocks_the_manager() {
    let mut config = ToastConfig::default();
    config.event_capacity = 1;
    let surface = MemorySurface::new();
    let (manager, events) = ToastManager::with_events(surface.clone(), config);

    let id = manager.notify(NotificationRequest::warning("Low stock").sticky());
    assert!(manager.click(id));
    sleep(ms(301)).await;

    assert_eq!(manager.state(id), ToastState::Removed);
    assert!(surface.elements().is_empty());
    let received = drain(&events);
    assert_eq!(received.len(), 1);
    assert!(matches!(
        received[0].kind,
        ToastEventKind::Shown {
            severity: Severity::Warning,
            ..
        }
    ));
}
