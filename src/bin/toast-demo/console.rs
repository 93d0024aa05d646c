use storefront_toast::surface::{MemorySurface, Surface};
use storefront_toast::types::ToastId;
use storefront_toast::view::ToastView;

/// Surface that keeps the document in memory and echoes every mutation to
/// stdout.
pub struct ConsoleSurface {
    document: MemorySurface,
    markup: bool,
}

impl ConsoleSurface {
    pub fn new(markup: bool) -> Self {
        Self {
            document: MemorySurface::new(),
            markup,
        }
    }
}

impl Surface for ConsoleSurface {
    fn has_container(&self) -> bool {
        self.document.has_container()
    }

    fn create_container(&mut self, id: &str, css: &str) {
        println!("+ container #{id} [{css}]");
        self.document.create_container(id, css);
    }

    fn remove_container(&mut self) {
        println!("- container");
        self.document.remove_container();
    }

    fn has_stylesheet(&self) -> bool {
        self.document.has_stylesheet()
    }

    fn inject_stylesheet(&mut self, id: &str, css: &str) {
        println!("+ stylesheet #{id} ({} bytes)", css.len());
        self.document.inject_stylesheet(id, css);
    }

    fn remove_stylesheet(&mut self) {
        println!("- stylesheet");
        self.document.remove_stylesheet();
    }

    fn mount(&mut self, view: &ToastView) {
        println!(
            "+ {} {:<7} {} {:?}",
            view.id, view.severity, view.treatment.accent, view.message
        );
        if self.markup {
            println!("  {}", view.to_html());
        }
        self.document.mount(view);
    }

    fn set_animation(&mut self, id: ToastId, animation: &str) {
        println!("~ {id} {animation}");
        self.document.set_animation(id, animation);
    }

    fn unmount(&mut self, id: ToastId) -> bool {
        let removed = self.document.unmount(id);
        if removed {
            println!("- {id}");
        }
        removed
    }
}
