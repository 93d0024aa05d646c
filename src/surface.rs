//! The host document the manager renders into.
//!
//! [`Surface`] is the seam between toast lifecycle logic and whatever actually
//! displays elements. [`MemorySurface`] keeps a document model in memory; it
//! backs the process-wide manager, the demo driver and the tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::types::{Severity, ToastId};
use crate::view::ToastView;

/// Element operations the manager needs from a host document.
///
/// Implementations must be idempotent where the manager relies on it:
/// unmounting an element that is already gone is a no-op.
pub trait Surface: Send + 'static {
    fn has_container(&self) -> bool;
    /// Create the shared container under element id `id`.
    fn create_container(&mut self, id: &str, css: &str);
    fn remove_container(&mut self);

    fn has_stylesheet(&self) -> bool;
    fn inject_stylesheet(&mut self, id: &str, css: &str);
    fn remove_stylesheet(&mut self);

    /// Append the toast as the last child of the container.
    fn mount(&mut self, view: &ToastView);
    /// Replace the running CSS animation of a mounted toast.
    fn set_animation(&mut self, id: ToastId, animation: &str);
    /// Detach the toast element. Returns whether an element was removed.
    fn unmount(&mut self, id: ToastId) -> bool;
}

/// A toast element as held by [`MemorySurface`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub id: ToastId,
    pub severity: Severity,
    pub message: String,
    pub accent: &'static str,
    pub icon: &'static str,
    pub animation: String,
    pub html: String,
    view: ToastView,
}

impl Element {
    fn new(view: &ToastView) -> Self {
        Self {
            id: view.id,
            severity: view.severity,
            message: view.message.clone(),
            accent: view.treatment.accent,
            icon: view.treatment.icon,
            animation: view.animation.clone(),
            html: view.to_html(),
            view: view.clone(),
        }
    }

    fn restyle(&mut self, animation: &str) {
        self.view.animation = animation.to_string();
        self.animation = self.view.animation.clone();
        self.html = self.view.to_html();
    }
}

/// Recorded document mutation, in call order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceOp {
    CreateContainer,
    RemoveContainer,
    InjectStylesheet,
    RemoveStylesheet,
    Mount(ToastId),
    SetAnimation(ToastId, String),
    Unmount(ToastId),
}

#[derive(Debug, Default)]
struct Document {
    container: Option<Container>,
    stylesheet: Option<Stylesheet>,
    ops: Vec<SurfaceOp>,
}

#[derive(Debug)]
struct Stylesheet {
    id: String,
    css: String,
}

#[derive(Debug)]
struct Container {
    id: String,
    css: String,
    children: Vec<Element>,
}

/// Cloneable handle to an in-memory document; clones share the same state.
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    doc: Arc<Mutex<Document>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn doc(&self) -> MutexGuard<'_, Document> {
        self.doc.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mounted elements in stacking order, oldest first.
    pub fn elements(&self) -> Vec<Element> {
        self.doc()
            .container
            .as_ref()
            .map(|c| c.children.clone())
            .unwrap_or_default()
    }

    pub fn element(&self, id: ToastId) -> Option<Element> {
        self.doc()
            .container
            .as_ref()
            .and_then(|c| c.children.iter().find(|e| e.id == id).cloned())
    }

    pub fn messages(&self) -> Vec<String> {
        self.elements().into_iter().map(|e| e.message).collect()
    }

    pub fn container_css(&self) -> Option<String> {
        self.doc().container.as_ref().map(|c| c.css.clone())
    }

    pub fn container_id(&self) -> Option<String> {
        self.doc().container.as_ref().map(|c| c.id.clone())
    }

    pub fn stylesheet(&self) -> Option<String> {
        self.doc().stylesheet.as_ref().map(|s| s.css.clone())
    }

    pub fn stylesheet_id(&self) -> Option<String> {
        self.doc().stylesheet.as_ref().map(|s| s.id.clone())
    }

    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.doc().ops.clone()
    }

    pub fn count_ops(&self, predicate: impl Fn(&SurfaceOp) -> bool) -> usize {
        self.doc().ops.iter().filter(|op| predicate(op)).count()
    }

    /// Drop the container behind the manager's back, the way a page script
    /// replacing `document.body` would.
    pub fn detach_container(&self) {
        self.doc().container = None;
    }
}

impl Surface for MemorySurface {
    fn has_container(&self) -> bool {
        self.doc().container.is_some()
    }

    fn create_container(&mut self, id: &str, css: &str) {
        let mut doc = self.doc();
        if doc.container.is_some() {
            return;
        }
        doc.container = Some(Container {
            id: id.to_string(),
            css: css.to_string(),
            children: Vec::new(),
        });
        doc.ops.push(SurfaceOp::CreateContainer);
    }

    fn remove_container(&mut self) {
        let mut doc = self.doc();
        if doc.container.take().is_some() {
            doc.ops.push(SurfaceOp::RemoveContainer);
        }
    }

    fn has_stylesheet(&self) -> bool {
        self.doc().stylesheet.is_some()
    }

    fn inject_stylesheet(&mut self, id: &str, css: &str) {
        let mut doc = self.doc();
        if doc.stylesheet.is_some() {
            return;
        }
        doc.stylesheet = Some(Stylesheet {
            id: id.to_string(),
            css: css.to_string(),
        });
        doc.ops.push(SurfaceOp::InjectStylesheet);
    }

    fn remove_stylesheet(&mut self) {
        let mut doc = self.doc();
        if doc.stylesheet.take().is_some() {
            doc.ops.push(SurfaceOp::RemoveStylesheet);
        }
    }

    fn mount(&mut self, view: &ToastView) {
        let mut doc = self.doc();
        let Some(container) = doc.container.as_mut() else {
            tracing::warn!(toast_id = %view.id, "mount without container, element dropped");
            return;
        };
        container.children.push(Element::new(view));
        doc.ops.push(SurfaceOp::Mount(view.id));
    }

    fn set_animation(&mut self, id: ToastId, animation: &str) {
        let mut doc = self.doc();
        let Some(element) = doc
            .container
            .as_mut()
            .and_then(|c| c.children.iter_mut().find(|e| e.id == id))
        else {
            return;
        };
        element.restyle(animation);
        doc.ops.push(SurfaceOp::SetAnimation(id, animation.to_string()));
    }

    fn unmount(&mut self, id: ToastId) -> bool {
        let mut doc = self.doc();
        let Some(container) = doc.container.as_mut() else {
            return false;
        };
        let Some(pos) = container.children.iter().position(|e| e.id == id) else {
            return false;
        };
        container.children.remove(pos);
        doc.ops.push(SurfaceOp::Unmount(id));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySurface, Surface, SurfaceOp};
    use crate::config::ToastConfig;
    use crate::types::{Severity, ToastId};
    use crate::view::ToastView;

    fn view(message: &str) -> ToastView {
        ToastView::new(ToastId::new(), Severity::Info, message, &ToastConfig::default())
    }

    #[test]
    fn container_and_stylesheet_are_created_once() {
        let mut surface = MemorySurface::new();
        surface.create_container("first", "a");
        surface.create_container("second", "b");
        surface.inject_stylesheet("sheet", "x");
        surface.inject_stylesheet("other", "y");
        assert_eq!(surface.container_id().as_deref(), Some("first"));
        assert_eq!(surface.container_css().as_deref(), Some("a"));
        assert_eq!(surface.stylesheet_id().as_deref(), Some("sheet"));
        assert_eq!(surface.stylesheet().as_deref(), Some("x"));
        assert_eq!(
            surface.ops(),
            vec![SurfaceOp::CreateContainer, SurfaceOp::InjectStylesheet]
        );
    }

    #[test]
    fn unmount_is_idempotent() {
        let mut surface = MemorySurface::new();
        surface.create_container("c", "");
        let first = view("first");
        surface.mount(&first);
        assert!(surface.unmount(first.id));
        assert!(!surface.unmount(first.id));
        assert_eq!(surface.count_ops(|op| matches!(op, SurfaceOp::Unmount(_))), 1);
    }

    #[test]
    fn clones_share_the_document() {
        let mut surface = MemorySurface::new();
        let observer = surface.clone();
        surface.create_container("c", "");
        surface.mount(&view("shared"));
        assert_eq!(observer.messages(), vec!["shared".to_string()]);
        observer.detach_container();
        assert!(!surface.has_container());
    }

    #[test]
    fn set_animation_restyles_the_markup() {
        let mut surface = MemorySurface::new();
        surface.create_container("c", "");
        let leaving = view("leaving");
        surface.mount(&leaving);
        surface.set_animation(leaving.id, "slideOut 0.3s ease-out");
        let Some(element) = surface.element(leaving.id) else {
            panic!("element should stay mounted");
        };
        assert_eq!(element.animation, "slideOut 0.3s ease-out");
        assert!(element.html.contains("animation: slideOut 0.3s ease-out;"));
        assert!(!element.html.contains("slideIn"));
    }
}
