//! Deferred work. Timers never hold page state themselves: they fire a
//! [`ScheduledTask`] back into the page, which owns everything.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduledTask {
    AdvanceCarousel,
    CompleteContactSubmit,
    CompleteNewsletterSubmit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(pub u64);

pub trait Scheduler {
    fn schedule_once(&mut self, task: ScheduledTask, delay_ms: u32) -> TaskHandle;
    fn schedule_repeating(&mut self, task: ScheduledTask, period_ms: u32) -> TaskHandle;
    /// Returns false when the handle was unknown or already done.
    fn cancel(&mut self, handle: TaskHandle) -> bool;
    /// Called by the page once a one-shot task has run.
    fn finished(&mut self, handle: TaskHandle);
    /// Releases finished one-shots. Never called from inside a timer callback.
    fn prune(&mut self) {}
}
