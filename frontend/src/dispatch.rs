//! Serializes listeners, observer callbacks and timers onto one
//! [`LandingPage`]. Work that arrives while the page is busy (focus events
//! raised by `focus()` inside a handler, for instance) is queued and run
//! right after, in arrival order; its default action can no longer be
//! prevented.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use log::trace;

use crate::app::{Dispatched, LandingPage};
use crate::events::{PageEvent, Source};
use crate::page::Page;
use crate::schedule::{ScheduledTask, Scheduler, TaskHandle};
use crate::storage::PreferenceStore;

pub enum Work<E> {
    Event {
        source: Source,
        event: PageEvent,
        target: Option<E>,
    },
    Timer(TaskHandle, ScheduledTask),
    ShowSlide(usize),
}

type Shared<P, S, T> = Rc<RefCell<LandingPage<P, S, T>>>;

pub struct Dispatcher<P: Page, S, T> {
    landing: Rc<RefCell<Weak<RefCell<LandingPage<P, S, T>>>>>,
    backlog: Rc<RefCell<VecDeque<Work<P::Target>>>>,
}

impl<P: Page, S, T> Clone for Dispatcher<P, S, T> {
    fn clone(&self) -> Self {
        Self {
            landing: self.landing.clone(),
            backlog: self.backlog.clone(),
        }
    }
}

impl<P: Page, S: PreferenceStore, T: Scheduler> Dispatcher<P, S, T> {
    pub fn new() -> Self {
        Self {
            landing: Rc::new(RefCell::new(Weak::new())),
            backlog: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Points every clone at `landing`. The dispatcher only holds a weak
    /// reference, so timers and listeners never keep the page alive.
    pub fn attach(&self, landing: &Shared<P, S, T>) {
        *self.landing.borrow_mut() = Rc::downgrade(landing);
    }

    /// Runs `work` now, or queues it when the page is already running
    /// something. Returns `None` when the work was queued or the page is
    /// gone.
    pub fn submit(&self, work: Work<P::Target>) -> Option<Dispatched> {
        let landing = self.landing.borrow().upgrade()?;
        let Ok(mut landing) = landing.try_borrow_mut() else {
            self.backlog.borrow_mut().push_back(work);
            trace!("Page busy, {} queued", self.backlog.borrow().len());
            return None;
        };

        if matches!(work, Work::Event { .. }) {
            landing.scheduler_mut().prune();
        }
        let result = run(&mut *landing, work);
        loop {
            let next = self.backlog.borrow_mut().pop_front();
            match next {
                Some(work) => {
                    run(&mut *landing, work);
                }
                None => break,
            }
        }
        Some(result)
    }
}

impl<P: Page, S: PreferenceStore, T: Scheduler> Default for Dispatcher<P, S, T> {
    fn default() -> Self {
        Self::new()
    }
}

fn run<P: Page, S: PreferenceStore, T: Scheduler>(
    landing: &mut LandingPage<P, S, T>,
    work: Work<P::Target>,
) -> Dispatched {
    match work {
        Work::Event {
            source,
            event,
            target,
        } => {
            landing.page_mut().set_event_target(target);
            let result = landing.dispatch(source, &event);
            landing.page_mut().set_event_target(None);
            result
        }
        Work::Timer(handle, task) => {
            landing.on_timer(handle, task);
            Dispatched::default()
        }
        Work::ShowSlide(number) => {
            landing.show_slide(number);
            Dispatched::default()
        }
    }
}
