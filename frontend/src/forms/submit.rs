use crate::page::{FormKind, Node, Page};
use crate::schedule::{ScheduledTask, Scheduler, TaskHandle};

/// What happened to a submit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed on this many fields.
    Rejected(usize),
    Sending(TaskHandle),
    /// A previous submission is still in flight.
    Busy,
}

/// A simulated submission waiting for its delay to elapse. Holds what is
/// needed to restore the submit control afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmit {
    pub handle: TaskHandle,
    pub original_label: String,
}

/// Disables the form's submit control behind a busy label and schedules
/// completion.
pub fn begin(
    page: &mut impl Page,
    scheduler: &mut impl Scheduler,
    form: FormKind,
    busy_label: &str,
    task: ScheduledTask,
    delay_ms: u32,
) -> PendingSubmit {
    let button = Node::SubmitButton(form);
    let original_label = page.text(&button);
    page.set_text(&button, busy_label);
    page.set_disabled(&button, true);
    PendingSubmit {
        handle: scheduler.schedule_once(task, delay_ms),
        original_label,
    }
}

pub fn restore(page: &mut impl Page, form: FormKind, pending: &PendingSubmit) {
    let button = Node::SubmitButton(form);
    page.set_text(&button, &pending.original_label);
    page.set_disabled(&button, false);
}
