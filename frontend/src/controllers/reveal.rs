use crate::page::{Group, Node, Page};

pub const FADE_IN_CLASS: &str = "fade-in";
pub const VISIBLE_CLASS: &str = "visible";

/// Options handed to the browser's intersection observer.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: String,
}

/// One-shot reveal of feature cards, testimonials, pricing cards and stats.
#[derive(Debug, Default)]
pub struct RevealAnimator;

impl RevealAnimator {
    pub fn new() -> Self {
        Self
    }

    /// Tags every animated element as transition-ready.
    pub fn prepare(&mut self, page: &mut impl Page) -> usize {
        let count = page.count(Group::Animated);
        for i in 0..count {
            page.set_class(&Node::Member(Group::Animated, i), FADE_IN_CLASS, true);
        }
        count
    }

    /// The visible state is only ever added.
    pub fn on_intersect(&mut self, page: &mut impl Page, index: usize, intersecting: bool) {
        if intersecting {
            page.set_class(&Node::Member(Group::Animated, index), VISIBLE_CLASS, true);
        }
    }
}
