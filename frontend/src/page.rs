//! The markup boundary. Controllers never touch the DOM directly; they go
//! through [`Page`], which the browser binder implements over `web_sys` and
//! the tests implement in memory.

/// Class used across sibling groups to mark the selected member.
pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn id(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    pub fn error_slot_id(self) -> String {
        format!("{}-error", self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Contact,
    Newsletter,
}

/// Groups of same-class siblings collected once at mount time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    NavLinks,
    Sections,
    Testimonials,
    Indicators,
    Buttons,
    Animated,
}

impl Group {
    pub fn selector(self) -> &'static str {
        match self {
            Group::NavLinks => ".nav-link",
            Group::Sections => "section[id]",
            Group::Testimonials => ".testimonial",
            Group::Indicators => ".dot",
            Group::Buttons => ".btn",
            Group::Animated => ".feature-card, .testimonial, .pricing-card, .stat",
        }
    }
}

/// Addresses one element of the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// `document.documentElement`
    Root,
    Body,
    ThemeToggle,
    Hamburger,
    NavMenu,
    Navbar,
    Form(FormKind),
    SubmitButton(FormKind),
    NewsletterEmail,
    Field(Field),
    ErrorSlot(Field),
    /// Any element by id, e.g. the target of a fragment link.
    Id(String),
    Member(Group, usize),
    /// The element that received the event currently being dispatched.
    EventTarget,
}

impl Node {
    pub fn id(&self) -> Option<String> {
        let id = match self {
            Node::ThemeToggle => "theme-toggle",
            Node::Hamburger => "hamburger",
            Node::NavMenu => "nav-menu",
            Node::Navbar => "navbar",
            Node::Form(FormKind::Contact) => "contact-form",
            Node::Form(FormKind::Newsletter) => "newsletter-form",
            Node::Field(field) => field.id(),
            Node::ErrorSlot(field) => return Some(field.error_slot_id()),
            Node::Id(id) => return Some(id.clone()),
            _ => return None,
        };
        Some(id.to_string())
    }
}

/// Everything the controllers need from the surrounding page. Writes to a
/// node that does not exist are ignored; reads return empty values.
pub trait Page {
    /// Whatever raised the event being dispatched, reachable as
    /// [`Node::EventTarget`] while its handlers run.
    type Target;

    fn set_event_target(&mut self, target: Option<Self::Target>);

    fn exists(&self, node: &Node) -> bool;
    fn count(&self, group: Group) -> usize;

    fn attribute(&self, node: &Node, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: &Node, name: &str, value: &str);

    fn has_class(&self, node: &Node, class: &str) -> bool;
    fn set_class(&mut self, node: &Node, class: &str, on: bool);

    fn text(&self, node: &Node) -> String;
    fn set_text(&mut self, node: &Node, text: &str);

    /// An empty `value` removes the inline property.
    fn set_style(&mut self, node: &Node, property: &str, value: &str);

    fn value(&self, node: &Node) -> String;
    fn set_value(&mut self, node: &Node, value: &str);
    fn set_disabled(&mut self, node: &Node, disabled: bool);
    fn reset_form(&mut self, node: &Node);

    fn is_focused(&self, node: &Node) -> bool;
    fn focus(&mut self, node: &Node);

    fn offset_top(&self, node: &Node) -> f64;
    fn offset_height(&self, node: &Node) -> f64;

    fn scroll_y(&self) -> f64;
    fn inner_width(&self) -> f64;
    /// Smooth scroll of the window to an absolute vertical position.
    fn scroll_to(&mut self, top: f64);

    fn prefers_dark(&self) -> bool;
    fn alert(&mut self, message: &str);
}
