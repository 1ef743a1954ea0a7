//! Navbar scroll state, scroll-spy link highlighting and smooth scrolling
//! for fragment links.

use log::debug;

use crate::page::{Group, Node, Page, ACTIVE_CLASS};

pub const SCROLLED_CLASS: &str = "scrolled";

/// Strictly past the threshold; no hysteresis.
pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// The section whose `[top - offset, top - offset + height)` window holds
/// `scroll_y`. When windows overlap the later section wins.
pub fn current_section(scroll_y: f64, sections: &[SectionBounds], offset: f64) -> Option<&str> {
    let mut current = None;
    for section in sections {
        let top = section.top - offset;
        if scroll_y >= top && scroll_y < top + section.height {
            current = Some(section.id.as_str());
        }
    }
    current
}

pub fn smooth_scroll_target(offset_top: f64, header_offset: f64) -> f64 {
    offset_top - header_offset
}

pub fn update_navbar(page: &mut impl Page, threshold: f64) {
    let scrolled = is_scrolled(page.scroll_y(), threshold);
    page.set_class(&Node::Navbar, SCROLLED_CLASS, scrolled);
}

pub fn sections(page: &impl Page) -> Vec<SectionBounds> {
    (0..page.count(Group::Sections))
        .map(|i| Node::Member(Group::Sections, i))
        .map(|node| SectionBounds {
            id: page.attribute(&node, "id").unwrap_or_default(),
            top: page.offset_top(&node),
            height: page.offset_height(&node),
        })
        .collect()
}

/// Marks the nav link pointing at the current section. With no current
/// section the comparison is against a bare `#`.
pub fn highlight_active_link(page: &mut impl Page, offset: f64) {
    let sections = sections(page);
    let current = current_section(page.scroll_y(), &sections, offset).unwrap_or_default();
    let wanted = format!("#{current}");

    for i in 0..page.count(Group::NavLinks) {
        let link = Node::Member(Group::NavLinks, i);
        let active = page.attribute(&link, "href").as_deref() == Some(wanted.as_str());
        page.set_class(&link, ACTIVE_CLASS, active);
    }
}

/// Scrolls to the target of the clicked fragment link. Returns whether the
/// browser's default jump must be suppressed.
pub fn smooth_scroll(page: &mut impl Page, link_index: usize, header_offset: f64) -> bool {
    let link = Node::Member(Group::NavLinks, link_index);
    let Some(href) = page.attribute(&link, "href") else {
        return false;
    };
    let Some(target_id) = href.strip_prefix('#') else {
        return false;
    };

    let target = Node::Id(target_id.to_string());
    if page.exists(&target) {
        let top = smooth_scroll_target(page.offset_top(&target), header_offset);
        debug!("Smooth scrolling to #{target_id} at {top}");
        page.scroll_to(top);
    }
    true
}
