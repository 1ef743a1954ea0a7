use log::debug;

use crate::page::{Node, Page, ACTIVE_CLASS};

/// Open/closed state of the mobile menu, mirrored onto the hamburger, the
/// menu panel and the body's scroll lock.
#[derive(Debug, Default)]
pub struct MobileNav {
    open: bool,
}

impl MobileNav {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self, page: &mut impl Page) {
        self.set(page, !self.open);
    }

    pub fn close(&mut self, page: &mut impl Page) {
        self.set(page, false);
    }

    /// Clicks landing outside both the menu and its toggle close it.
    pub fn on_document_click(
        &mut self,
        page: &mut impl Page,
        inside_nav_menu: bool,
        inside_hamburger: bool,
    ) {
        if self.open && !inside_nav_menu && !inside_hamburger {
            self.close(page);
        }
    }

    pub fn on_resize(&mut self, page: &mut impl Page, breakpoint: f64) {
        if page.inner_width() > breakpoint {
            self.close(page);
        }
    }

    fn set(&mut self, page: &mut impl Page, open: bool) {
        if self.open != open {
            debug!("Mobile nav {}", if open { "opened" } else { "closed" });
        }
        self.open = open;
        page.set_class(&Node::Hamburger, ACTIVE_CLASS, open);
        page.set_class(&Node::NavMenu, ACTIVE_CLASS, open);
        page.set_style(&Node::Body, "overflow", if open { "hidden" } else { "" });
    }
}
