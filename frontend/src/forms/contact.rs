use log::info;

use crate::forms::submit::{self, PendingSubmit, SubmitOutcome};
use crate::forms::validation::{check_on_blur, clear_error, show_error, ContactSubmission};
use crate::page::{Field, FormKind, Node, Page};
use crate::schedule::{ScheduledTask, Scheduler};

pub const SENDING_LABEL: &str = "Sending...";
pub const CONTACT_CONFIRMATION: &str = "Thank you for your message! We'll get back to you soon.";

#[derive(Debug, Default)]
pub struct ContactForm {
    pending: Option<PendingSubmit>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every error slot, fills the failing ones, and only starts the
    /// simulated send when nothing failed.
    pub fn submit(
        &mut self,
        page: &mut impl Page,
        scheduler: &mut impl Scheduler,
        delay_ms: u32,
    ) -> SubmitOutcome {
        if self.pending.is_some() {
            return SubmitOutcome::Busy;
        }

        for field in Field::ALL {
            clear_error(page, field);
        }
        let errors = ContactSubmission::read(page).validate();
        if !errors.is_empty() {
            for (field, error) in &errors {
                show_error(page, *field, error);
            }
            return SubmitOutcome::Rejected(errors.len());
        }

        let pending = submit::begin(
            page,
            scheduler,
            FormKind::Contact,
            SENDING_LABEL,
            ScheduledTask::CompleteContactSubmit,
            delay_ms,
        );
        let handle = pending.handle;
        self.pending = Some(pending);
        SubmitOutcome::Sending(handle)
    }

    pub fn on_blur(&self, page: &mut impl Page, field: Field) {
        let value = page.value(&Node::Field(field));
        match check_on_blur(field, &value) {
            Some(error) => show_error(page, field, &error),
            None => clear_error(page, field),
        }
    }

    pub fn complete(&mut self, page: &mut impl Page) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        page.alert(CONTACT_CONFIRMATION);
        page.reset_form(&Node::Form(FormKind::Contact));
        submit::restore(page, FormKind::Contact, &pending);
        info!("Contact form submitted");
    }

    /// Drops an in-flight submission without confirming it.
    pub fn cancel(&mut self, page: &mut impl Page, scheduler: &mut impl Scheduler) {
        if let Some(pending) = self.pending.take() {
            scheduler.cancel(pending.handle);
            submit::restore(page, FormKind::Contact, &pending);
        }
    }
}
