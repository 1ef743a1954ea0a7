//! Which handler runs for which event on which element. The table is the
//! single place where the page's control flow is wired up; the browser
//! binder only attaches a listener for each distinct `(Source, EventKind)`.

use crate::page::{Field, FormKind, Group, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Window,
    Document,
    ThemeToggle,
    Hamburger,
    NavLink(usize),
    Indicator(usize),
    Form(FormKind),
    Field(Field),
    Button(usize),
    Animated(usize),
}

impl Source {
    /// The element the listener is attached to, `None` for window/document.
    pub fn node(self) -> Option<Node> {
        match self {
            Source::Window | Source::Document => None,
            Source::ThemeToggle => Some(Node::ThemeToggle),
            Source::Hamburger => Some(Node::Hamburger),
            Source::NavLink(i) => Some(Node::Member(Group::NavLinks, i)),
            Source::Indicator(i) => Some(Node::Member(Group::Indicators, i)),
            Source::Form(kind) => Some(Node::Form(kind)),
            Source::Field(field) => Some(Node::Field(field)),
            Source::Button(i) => Some(Node::Member(Group::Buttons, i)),
            Source::Animated(i) => Some(Node::Member(Group::Animated, i)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
    Blur,
    Scroll,
    Resize,
    KeyDown,
    FocusIn,
    FocusOut,
    MouseEnter,
    MouseLeave,
    /// Not a DOM event: delivered by the intersection observer.
    Intersect,
}

impl EventKind {
    pub fn dom_name(self) -> Option<&'static str> {
        Some(match self {
            EventKind::Click => "click",
            EventKind::Submit => "submit",
            EventKind::Blur => "blur",
            EventKind::Scroll => "scroll",
            EventKind::Resize => "resize",
            EventKind::KeyDown => "keydown",
            EventKind::FocusIn => "focusin",
            EventKind::FocusOut => "focusout",
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
            EventKind::Intersect => return None,
        })
    }
}

/// Event payload after the binder has extracted what the handlers need.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Click {
        inside_nav_menu: bool,
        inside_hamburger: bool,
    },
    Submit,
    Blur,
    Scroll,
    Resize,
    KeyDown {
        key: String,
    },
    /// `tag` is the lower-case tag name of the event target.
    FocusIn {
        tag: String,
    },
    FocusOut {
        tag: String,
    },
    MouseEnter,
    MouseLeave,
    Intersect {
        intersecting: bool,
    },
}

impl PageEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PageEvent::Click { .. } => EventKind::Click,
            PageEvent::Submit => EventKind::Submit,
            PageEvent::Blur => EventKind::Blur,
            PageEvent::Scroll => EventKind::Scroll,
            PageEvent::Resize => EventKind::Resize,
            PageEvent::KeyDown { .. } => EventKind::KeyDown,
            PageEvent::FocusIn { .. } => EventKind::FocusIn,
            PageEvent::FocusOut { .. } => EventKind::FocusOut,
            PageEvent::MouseEnter => EventKind::MouseEnter,
            PageEvent::MouseLeave => EventKind::MouseLeave,
            PageEvent::Intersect { .. } => EventKind::Intersect,
        }
    }

    pub fn click() -> Self {
        PageEvent::Click {
            inside_nav_menu: false,
            inside_hamburger: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    ToggleTheme,
    ToggleMobileNav,
    CloseMobileNav,
    CloseNavOnOutsideClick,
    CloseNavOnWideViewport,
    UpdateNavbarScroll,
    HighlightActiveLink,
    SmoothScroll,
    ShowSlide,
    SubmitContact,
    ValidateOnBlur,
    SubmitNewsletter,
    Reveal,
    HoverLift,
    HoverSettle,
    KeyboardNavigation,
    ShowFocusRing,
    HideFocusRing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub source: Source,
    pub kind: EventKind,
    pub handler: Handler,
}

/// Sizes of the element groups the table is built for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupCounts {
    pub nav_links: usize,
    pub indicators: usize,
    pub buttons: usize,
    pub animated: usize,
}

#[derive(Debug, Default, Clone)]
pub struct HandlerTable {
    bindings: Vec<Binding>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, source: Source, kind: EventKind, handler: Handler) -> &mut Self {
        self.bindings.push(Binding {
            source,
            kind,
            handler,
        });
        self
    }

    /// The landing page wiring, in registration order.
    pub fn standard(counts: GroupCounts) -> Self {
        let mut table = Self::new();

        for i in 0..counts.nav_links {
            table.register(Source::NavLink(i), EventKind::Click, Handler::SmoothScroll);
        }
        for i in 0..counts.indicators {
            table.register(Source::Indicator(i), EventKind::Click, Handler::ShowSlide);
        }
        for i in 0..counts.animated {
            table.register(Source::Animated(i), EventKind::Intersect, Handler::Reveal);
        }
        for i in 0..counts.buttons {
            table
                .register(Source::Button(i), EventKind::MouseEnter, Handler::HoverLift)
                .register(Source::Button(i), EventKind::MouseLeave, Handler::HoverSettle);
        }

        table
            .register(Source::Document, EventKind::KeyDown, Handler::KeyboardNavigation)
            .register(Source::ThemeToggle, EventKind::Click, Handler::ToggleTheme)
            .register(Source::Hamburger, EventKind::Click, Handler::ToggleMobileNav)
            .register(Source::Form(FormKind::Contact), EventKind::Submit, Handler::SubmitContact)
            .register(
                Source::Form(FormKind::Newsletter),
                EventKind::Submit,
                Handler::SubmitNewsletter,
            )
            .register(Source::Window, EventKind::Scroll, Handler::UpdateNavbarScroll)
            .register(Source::Window, EventKind::Scroll, Handler::HighlightActiveLink);

        for i in 0..counts.nav_links {
            table.register(Source::NavLink(i), EventKind::Click, Handler::CloseMobileNav);
        }

        table
            .register(Source::Document, EventKind::Click, Handler::CloseNavOnOutsideClick)
            .register(Source::Window, EventKind::Resize, Handler::CloseNavOnWideViewport)
            .register(Source::Document, EventKind::FocusIn, Handler::ShowFocusRing)
            .register(Source::Document, EventKind::FocusOut, Handler::HideFocusRing);

        for field in Field::ALL {
            table.register(Source::Field(field), EventKind::Blur, Handler::ValidateOnBlur);
        }

        table
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn handlers(&self, source: Source, kind: EventKind) -> impl Iterator<Item = Handler> + '_ {
        self.bindings
            .iter()
            .filter(move |b| b.source == source && b.kind == kind)
            .map(|b| b.handler)
    }

    /// Distinct `(source, kind)` pairs in first-registration order.
    pub fn listeners(&self) -> Vec<(Source, EventKind)> {
        let mut seen = Vec::new();
        for binding in &self.bindings {
            let pair = (binding.source, binding.kind);
            if !seen.contains(&pair) {
                seen.push(pair);
            }
        }
        seen
    }
}
