//! Button hover lift and the custom focus ring.

use crate::page::{Group, Node, Page};

pub const PRIMARY_BUTTON_CLASS: &str = "btn-primary";
pub const FOCUS_OUTLINE: &str = "2px solid var(--primary-color)";
pub const FOCUS_OUTLINE_OFFSET: &str = "2px";

const FOCUS_RING_TAGS: [&str; 5] = ["button", "a", "input", "textarea", "select"];

pub fn hover_lift(page: &mut impl Page, button: usize) {
    page.set_style(&Node::Member(Group::Buttons, button), "transform", "translateY(-2px)");
}

/// Primary buttons keep their lift after the pointer leaves.
pub fn hover_settle(page: &mut impl Page, button: usize) {
    let node = Node::Member(Group::Buttons, button);
    if !page.has_class(&node, PRIMARY_BUTTON_CLASS) {
        page.set_style(&node, "transform", "translateY(0)");
    }
}

pub fn wants_focus_ring(tag: &str) -> bool {
    FOCUS_RING_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

pub fn show_focus_ring(page: &mut impl Page, tag: &str) {
    if wants_focus_ring(tag) {
        page.set_style(&Node::EventTarget, "outline", FOCUS_OUTLINE);
        page.set_style(&Node::EventTarget, "outline-offset", FOCUS_OUTLINE_OFFSET);
    }
}

pub fn hide_focus_ring(page: &mut impl Page, tag: &str) {
    if wants_focus_ring(tag) {
        page.set_style(&Node::EventTarget, "outline", "");
        page.set_style(&Node::EventTarget, "outline-offset", "");
    }
}
