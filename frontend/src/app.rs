use log::{debug, info, trace};

use crate::config::LandingConfig;
use crate::controllers::carousel::Carousel;
use crate::controllers::effects;
use crate::controllers::keyboard::{self, FocusContext, KeyAction};
use crate::controllers::nav::MobileNav;
use crate::controllers::reveal::{ObserverOptions, RevealAnimator};
use crate::controllers::scroll;
use crate::controllers::theme::ThemeManager;
use crate::events::{GroupCounts, Handler, HandlerTable, PageEvent, Source};
use crate::forms::contact::ContactForm;
use crate::forms::newsletter::NewsletterForm;
use crate::forms::submit::SubmitOutcome;
use crate::page::{FormKind, Group, Node, Page};
use crate::schedule::{ScheduledTask, Scheduler, TaskHandle};
use crate::storage::PreferenceStore;

/// `document.readyState` while the parser is still running.
pub const LOADING_STATE: &str = "loading";

/// Whether mounting has to wait for `DOMContentLoaded`.
pub fn waits_for_dom(ready_state: &str) -> bool {
    ready_state == LOADING_STATE
}

/// What the binder must do with the native event after dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatched {
    pub prevent_default: bool,
}

/// Owns the page, its controllers and the timers for the page's lifetime.
/// Every event and timer goes through here, one at a time.
pub struct LandingPage<P, S, T> {
    config: LandingConfig,
    page: P,
    scheduler: T,
    theme: ThemeManager<S>,
    nav: MobileNav,
    carousel: Carousel,
    contact: ContactForm,
    newsletter: NewsletterForm,
    reveal: RevealAnimator,
    table: HandlerTable,
}

impl<P: Page, S: PreferenceStore, T: Scheduler> LandingPage<P, S, T> {
    pub fn new(config: LandingConfig, page: P, store: S, scheduler: T) -> Self {
        let table = HandlerTable::standard(GroupCounts {
            nav_links: page.count(Group::NavLinks),
            indicators: page.count(Group::Indicators),
            buttons: page.count(Group::Buttons),
            animated: page.count(Group::Animated),
        });
        let carousel = Carousel::new(page.count(Group::Testimonials));
        Self {
            config,
            page,
            scheduler,
            theme: ThemeManager::new(store),
            nav: MobileNav::new(),
            carousel,
            contact: ContactForm::new(),
            newsletter: NewsletterForm::new(),
            reveal: RevealAnimator::new(),
            table,
        }
    }

    /// Startup work that does not wait for an event.
    pub fn mount(&mut self) {
        self.theme.initialize(&mut self.page);
        self.carousel.start(
            &mut self.page,
            &mut self.scheduler,
            self.config.carousel_interval_ms,
        );
        let animated = self.reveal.prepare(&mut self.page);
        info!(
            "Landing page mounted: {} slides, {} animated elements, {} bindings",
            self.carousel.len(),
            animated,
            self.table.bindings().len()
        );
    }

    /// Cancels every scheduled task. Pending submissions are dropped and
    /// their submit controls re-enabled.
    pub fn unmount(&mut self) {
        self.carousel.stop(&mut self.scheduler);
        self.contact.cancel(&mut self.page, &mut self.scheduler);
        self.newsletter.cancel(&mut self.page, &mut self.scheduler);
        info!("Landing page unmounted");
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn scheduler_mut(&mut self) -> &mut T {
        &mut self.scheduler
    }

    pub fn table(&self) -> &HandlerTable {
        &self.table
    }

    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.config.reveal_threshold,
            root_margin: self.config.reveal_root_margin.clone(),
        }
    }

    /// Entry point for the global `currentSlide(k)`.
    pub fn show_slide(&mut self, number: usize) {
        self.carousel.show(&mut self.page, number);
    }

    pub fn dispatch(&mut self, source: Source, event: &PageEvent) -> Dispatched {
        let handlers: Vec<Handler> = self.table.handlers(source, event.kind()).collect();
        let mut result = Dispatched::default();
        for handler in handlers {
            trace!("{source:?} {:?} -> {handler:?}", event.kind());
            result.prevent_default |= self.run(handler, source, event);
        }
        result
    }

    pub fn on_timer(&mut self, handle: TaskHandle, task: ScheduledTask) {
        match task {
            ScheduledTask::AdvanceCarousel => self.carousel.advance(&mut self.page),
            ScheduledTask::CompleteContactSubmit => {
                self.scheduler.finished(handle);
                self.contact.complete(&mut self.page);
            }
            ScheduledTask::CompleteNewsletterSubmit => {
                self.scheduler.finished(handle);
                self.newsletter.complete(&mut self.page);
            }
        }
    }

    /// Runs one handler; returns whether the default action is suppressed.
    fn run(&mut self, handler: Handler, source: Source, event: &PageEvent) -> bool {
        let page = &mut self.page;
        match (handler, source, event) {
            (Handler::ToggleTheme, _, _) => {
                self.theme.toggle(page);
            }
            (Handler::ToggleMobileNav, _, _) => self.nav.toggle(page),
            (Handler::CloseMobileNav, _, _) => self.nav.close(page),
            (
                Handler::CloseNavOnOutsideClick,
                _,
                PageEvent::Click {
                    inside_nav_menu,
                    inside_hamburger,
                },
            ) => self
                .nav
                .on_document_click(page, *inside_nav_menu, *inside_hamburger),
            (Handler::CloseNavOnWideViewport, _, _) => {
                self.nav.on_resize(page, self.config.mobile_breakpoint)
            }
            (Handler::UpdateNavbarScroll, _, _) => {
                scroll::update_navbar(page, self.config.scroll_threshold)
            }
            (Handler::HighlightActiveLink, _, _) => {
                scroll::highlight_active_link(page, self.config.section_offset)
            }
            (Handler::SmoothScroll, Source::NavLink(i), _) => {
                return scroll::smooth_scroll(page, i, self.config.header_offset);
            }
            (Handler::ShowSlide, Source::Indicator(i), _) => self.carousel.show(page, i + 1),
            (Handler::SubmitContact, _, _) => {
                let outcome =
                    self.contact
                        .submit(page, &mut self.scheduler, self.config.contact_delay_ms);
                log_submit(FormKind::Contact, &outcome);
                return true;
            }
            (Handler::ValidateOnBlur, Source::Field(field), _) => self.contact.on_blur(page, field),
            (Handler::SubmitNewsletter, _, _) => {
                let outcome =
                    self.newsletter
                        .submit(page, &mut self.scheduler, self.config.newsletter_delay_ms);
                log_submit(FormKind::Newsletter, &outcome);
                return true;
            }
            (Handler::Reveal, Source::Animated(i), PageEvent::Intersect { intersecting }) => {
                self.reveal.on_intersect(page, i, *intersecting)
            }
            (Handler::HoverLift, Source::Button(i), _) => effects::hover_lift(page, i),
            (Handler::HoverSettle, Source::Button(i), _) => effects::hover_settle(page, i),
            (Handler::KeyboardNavigation, _, PageEvent::KeyDown { key }) => {
                return self.on_key(key);
            }
            (Handler::ShowFocusRing, _, PageEvent::FocusIn { tag }) => {
                effects::show_focus_ring(page, tag)
            }
            (Handler::HideFocusRing, _, PageEvent::FocusOut { tag }) => {
                effects::hide_focus_ring(page, tag)
            }
            (handler, source, event) => {
                debug!("No action for {handler:?} on {source:?} with {event:?}");
            }
        }
        false
    }

    fn on_key(&mut self, key: &str) -> bool {
        let focus = FocusContext {
            hamburger_focused: self.page.is_focused(&Node::Hamburger),
            nav_open: self.nav.is_open(),
            focused_indicator: (0..self.page.count(Group::Indicators))
                .find(|i| self.page.is_focused(&Node::Member(Group::Indicators, *i))),
        };
        let actions = keyboard::interpret(key, focus);
        for action in &actions {
            match *action {
                KeyAction::ToggleNav => self.nav.toggle(&mut self.page),
                KeyAction::CloseNav => self.nav.close(&mut self.page),
                KeyAction::StepCarousel { from, direction } => {
                    self.carousel
                        .step_from_indicator(&mut self.page, from, direction)
                }
            }
        }
        keyboard::prevents_default(&actions)
    }
}

fn log_submit(form: FormKind, outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Busy => info!("{form:?} form is still sending, submit ignored"),
        SubmitOutcome::Rejected(errors) => debug!("{form:?} form rejected with {errors} errors"),
        SubmitOutcome::Sending(handle) => debug!("{form:?} form sending as {handle:?}"),
    }
}
