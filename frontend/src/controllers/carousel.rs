use log::debug;

use crate::page::{Group, Node, Page, ACTIVE_CLASS};
use crate::schedule::{ScheduledTask, Scheduler, TaskHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Testimonial slider. The index always stays inside `[0, len)`; an empty
/// slider ignores every transition.
#[derive(Debug, Default)]
pub struct Carousel {
    index: usize,
    len: usize,
    timer: Option<TaskHandle>,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len,
            timer: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    /// Shows slide `number`, counted from 1 as the indicators are labelled.
    /// Out of range numbers are ignored.
    pub fn goto(&mut self, number: usize) -> bool {
        if number == 0 || number > self.len {
            return false;
        }
        self.index = number - 1;
        true
    }

    /// Marks exactly the current testimonial and indicator active.
    pub fn render(&self, page: &mut impl Page) {
        for group in [Group::Testimonials, Group::Indicators] {
            for i in 0..page.count(group) {
                page.set_class(&Node::Member(group, i), ACTIVE_CLASS, i == self.index);
            }
        }
    }

    /// Starts auto-advance and shows the first slide. Calling it again does
    /// not add a second timer.
    pub fn start(&mut self, page: &mut impl Page, scheduler: &mut impl Scheduler, period_ms: u32) {
        if self.timer.is_none() && !self.is_empty() {
            self.timer = Some(scheduler.schedule_repeating(ScheduledTask::AdvanceCarousel, period_ms));
        }
        self.index = 0;
        self.render(page);
    }

    pub fn stop(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(handle) = self.timer.take() {
            scheduler.cancel(handle);
        }
    }

    pub fn advance(&mut self, page: &mut impl Page) {
        let index = self.next();
        debug!("Carousel advanced to slide {}", index + 1);
        self.render(page);
    }

    pub fn show(&mut self, page: &mut impl Page, number: usize) {
        if self.goto(number) {
            self.render(page);
        }
    }

    /// Arrow-key navigation from the focused indicator, wrapping over the
    /// indicators; focus follows the newly active one.
    pub fn step_from_indicator(&mut self, page: &mut impl Page, focused: usize, direction: Direction) {
        let indicators = page.count(Group::Indicators);
        if indicators == 0 {
            return;
        }
        let target = neighbour(focused, indicators, direction);
        self.show(page, target + 1);
        page.focus(&Node::Member(Group::Indicators, target));
    }
}

/// Index one step away from `from` among `count` items, wrapping at both
/// ends.
pub fn neighbour(from: usize, count: usize, direction: Direction) -> usize {
    if count == 0 {
        return 0;
    }
    match direction {
        Direction::Previous if from == 0 => count - 1,
        Direction::Previous => from - 1,
        Direction::Next if from + 1 >= count => 0,
        Direction::Next => from + 1,
    }
}
