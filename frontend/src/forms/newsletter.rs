use log::{debug, info};

use crate::forms::submit::{self, PendingSubmit, SubmitOutcome};
use crate::forms::validation::check_newsletter_email;
use crate::page::{FormKind, Node, Page};
use crate::schedule::{ScheduledTask, Scheduler};

pub const SUBSCRIBING_LABEL: &str = "Subscribing...";
pub const NEWSLETTER_CONFIRMATION: &str = "Thank you for subscribing to our newsletter!";

/// Single-field signup. Problems are reported with a blocking alert rather
/// than an inline slot.
#[derive(Debug, Default)]
pub struct NewsletterForm {
    pending: Option<PendingSubmit>,
}

impl NewsletterForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts the first problem, or starts the simulated subscription.
    pub fn submit(
        &mut self,
        page: &mut impl Page,
        scheduler: &mut impl Scheduler,
        delay_ms: u32,
    ) -> SubmitOutcome {
        if self.pending.is_some() {
            return SubmitOutcome::Busy;
        }
        if let Err(error) = check_newsletter_email(&page.value(&Node::NewsletterEmail)) {
            debug!("Newsletter signup rejected: {error}");
            page.alert(&error.to_string());
            return SubmitOutcome::Rejected(1);
        }

        let pending = submit::begin(
            page,
            scheduler,
            FormKind::Newsletter,
            SUBSCRIBING_LABEL,
            ScheduledTask::CompleteNewsletterSubmit,
            delay_ms,
        );
        let handle = pending.handle;
        self.pending = Some(pending);
        SubmitOutcome::Sending(handle)
    }

    pub fn complete(&mut self, page: &mut impl Page) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        page.alert(NEWSLETTER_CONFIRMATION);
        page.set_value(&Node::NewsletterEmail, "");
        submit::restore(page, FormKind::Newsletter, &pending);
        info!("Newsletter subscription submitted");
    }

    pub fn cancel(&mut self, page: &mut impl Page, scheduler: &mut impl Scheduler) {
        if let Some(pending) = self.pending.take() {
            scheduler.cancel(pending.handle);
            submit::restore(page, FormKind::Newsletter, &pending);
        }
    }
}
