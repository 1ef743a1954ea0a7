//! In-memory page, store and virtual-time scheduler for the unit tests.

use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use crate::app::LandingPage;
use crate::page::{Field, FormKind, Group, Node, Page};
use crate::schedule::{ScheduledTask, Scheduler, TaskHandle};
use crate::storage::PreferenceStore;

#[derive(Debug, Default, Clone)]
pub struct FakeElement {
    pub classes: BTreeSet<String>,
    pub attributes: HashMap<String, String>,
    pub styles: HashMap<String, String>,
    pub text: String,
    pub value: String,
    pub disabled: bool,
    pub offset_top: f64,
    pub offset_height: f64,
}

#[derive(Default)]
pub struct FakePage {
    pub elements: HashMap<Node, FakeElement>,
    pub groups: HashMap<Group, usize>,
    pub focused: Option<Node>,
    pub event_target: Option<Node>,
    pub scroll_y: f64,
    pub inner_width: f64,
    pub prefers_dark: bool,
    pub alerts: Vec<String>,
    pub scrolled_to: Vec<f64>,
    pub resets: Vec<Node>,
    /// Runs after every successful `focus()`, like a browser raising focusin.
    pub on_focus: Option<Rc<dyn Fn(&Node)>>,
}

impl FakePage {
    /// The markup of the landing page: every fixed element, three sections,
    /// matching nav links, `testimonials` slides with one dot each, and two
    /// buttons of which the first is primary.
    pub fn landing(testimonials: usize) -> Self {
        let mut page = FakePage {
            inner_width: 1024.0,
            ..FakePage::default()
        };
        for node in [
            Node::Root,
            Node::Body,
            Node::ThemeToggle,
            Node::Hamburger,
            Node::NavMenu,
            Node::Navbar,
            Node::Form(FormKind::Contact),
            Node::Form(FormKind::Newsletter),
            Node::NewsletterEmail,
        ] {
            page.add(node);
        }
        page.add(Node::SubmitButton(FormKind::Contact)).text = "Send Message".to_string();
        page.add(Node::SubmitButton(FormKind::Newsletter)).text = "Subscribe".to_string();
        for field in Field::ALL {
            page.add(Node::Field(field));
            page.add(Node::ErrorSlot(field));
        }

        for (i, (id, top, height)) in [("home", 0.0, 600.0), ("features", 600.0, 800.0), ("contact", 1400.0, 500.0)]
            .into_iter()
            .enumerate()
        {
            let section = page.add_member(Group::Sections, i);
            section.attributes.insert("id".to_string(), id.to_string());
            section.offset_top = top;
            section.offset_height = height;
            page.add(Node::Id(id.to_string())).offset_top = top;

            page.add_member(Group::NavLinks, i)
                .attributes
                .insert("href".to_string(), format!("#{id}"));
        }

        for i in 0..testimonials {
            page.add_member(Group::Testimonials, i);
            page.add_member(Group::Indicators, i);
        }
        for i in 0..2 {
            page.add_member(Group::Buttons, i).classes.insert("btn".to_string());
        }
        page.element_mut(&Node::Member(Group::Buttons, 0))
            .classes
            .insert("btn-primary".to_string());
        for i in 0..4 {
            page.add_member(Group::Animated, i);
        }
        page
    }

    pub fn add(&mut self, node: Node) -> &mut FakeElement {
        self.elements.entry(node).or_default()
    }

    pub fn add_member(&mut self, group: Group, index: usize) -> &mut FakeElement {
        let count = self.groups.entry(group).or_default();
        *count = (*count).max(index + 1);
        self.add(Node::Member(group, index))
    }

    pub fn remove(&mut self, node: &Node) {
        self.elements.remove(node);
    }

    pub fn element(&self, node: &Node) -> &FakeElement {
        self.elements
            .get(&self.resolve(node))
            .unwrap_or_else(|| panic!("no element {node:?}"))
    }

    pub fn element_mut(&mut self, node: &Node) -> &mut FakeElement {
        let node = self.resolve(node);
        self.elements
            .get_mut(&node)
            .unwrap_or_else(|| panic!("no element {node:?}"))
    }

    pub fn classes_on(&self, group: Group, class: &str) -> Vec<usize> {
        (0..self.count(group))
            .filter(|i| self.has_class(&Node::Member(group, *i), class))
            .collect()
    }

    pub fn style(&self, node: &Node, property: &str) -> Option<&str> {
        self.element(node).styles.get(property).map(String::as_str)
    }

    fn resolve(&self, node: &Node) -> Node {
        match node {
            Node::EventTarget => self.event_target.clone().unwrap_or(Node::EventTarget),
            other => other.clone(),
        }
    }

    fn get(&self, node: &Node) -> Option<&FakeElement> {
        self.elements.get(&self.resolve(node))
    }

    fn get_mut(&mut self, node: &Node) -> Option<&mut FakeElement> {
        let node = self.resolve(node);
        self.elements.get_mut(&node)
    }
}

impl Page for FakePage {
    type Target = Node;

    fn set_event_target(&mut self, target: Option<Node>) {
        self.event_target = target;
    }

    fn exists(&self, node: &Node) -> bool {
        self.get(node).is_some()
    }

    fn count(&self, group: Group) -> usize {
        self.groups.get(&group).copied().unwrap_or(0)
    }

    fn attribute(&self, node: &Node, name: &str) -> Option<String> {
        self.get(node)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: &Node, name: &str, value: &str) {
        if let Some(el) = self.get_mut(node) {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn has_class(&self, node: &Node, class: &str) -> bool {
        self.get(node).is_some_and(|el| el.classes.contains(class))
    }

    fn set_class(&mut self, node: &Node, class: &str, on: bool) {
        if let Some(el) = self.get_mut(node) {
            if on {
                el.classes.insert(class.to_string());
            } else {
                el.classes.remove(class);
            }
        }
    }

    fn text(&self, node: &Node) -> String {
        self.get(node).map(|el| el.text.clone()).unwrap_or_default()
    }

    fn set_text(&mut self, node: &Node, text: &str) {
        if let Some(el) = self.get_mut(node) {
            el.text = text.to_string();
        }
    }

    fn set_style(&mut self, node: &Node, property: &str, value: &str) {
        if let Some(el) = self.get_mut(node) {
            if value.is_empty() {
                el.styles.remove(property);
            } else {
                el.styles.insert(property.to_string(), value.to_string());
            }
        }
    }

    fn value(&self, node: &Node) -> String {
        self.get(node).map(|el| el.value.clone()).unwrap_or_default()
    }

    fn set_value(&mut self, node: &Node, value: &str) {
        if let Some(el) = self.get_mut(node) {
            el.value = value.to_string();
        }
    }

    fn set_disabled(&mut self, node: &Node, disabled: bool) {
        if let Some(el) = self.get_mut(node) {
            el.disabled = disabled;
        }
    }

    fn reset_form(&mut self, node: &Node) {
        if *node == Node::Form(FormKind::Contact) {
            for field in Field::ALL {
                self.set_value(&Node::Field(field), "");
            }
        }
        self.resets.push(node.clone());
    }

    fn is_focused(&self, node: &Node) -> bool {
        self.focused.as_ref() == Some(node)
    }

    fn focus(&mut self, node: &Node) {
        if self.exists(node) {
            self.focused = Some(node.clone());
            if let Some(hook) = self.on_focus.clone() {
                hook(node);
            }
        }
    }

    fn offset_top(&self, node: &Node) -> f64 {
        self.get(node).map(|el| el.offset_top).unwrap_or(0.0)
    }

    fn offset_height(&self, node: &Node) -> f64 {
        self.get(node).map(|el| el.offset_height).unwrap_or(0.0)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn inner_width(&self) -> f64 {
        self.inner_width
    }

    fn scroll_to(&mut self, top: f64) {
        self.scrolled_to.push(top);
    }

    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.set(key, value);
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

#[derive(Debug, Clone)]
struct Pending {
    handle: TaskHandle,
    task: ScheduledTask,
    due: u64,
    period: Option<u64>,
}

/// Virtual-time scheduler. Nothing fires until the owner pops due tasks.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: u64,
    next_id: u64,
    pending: Vec<Pending>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Removes and returns the earliest task due at or before `until`,
    /// moving the clock to its due time. Repeating tasks are re-armed.
    pub fn pop_due(&mut self, until: u64) -> Option<(TaskHandle, ScheduledTask)> {
        let (pos, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.handle))?;

        let mut entry = self.pending.remove(pos);
        self.now = self.now.max(entry.due);
        let fired = (entry.handle, entry.task);
        if let Some(period) = entry.period {
            entry.due += period;
            self.pending.push(entry);
        }
        Some(fired)
    }

    pub fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }

    fn push(&mut self, task: ScheduledTask, delay_ms: u32, period: Option<u64>) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        self.pending.push(Pending {
            handle,
            task,
            due: self.now + u64::from(delay_ms),
            period,
        });
        handle
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&mut self, task: ScheduledTask, delay_ms: u32) -> TaskHandle {
        self.push(task, delay_ms, None)
    }

    fn schedule_repeating(&mut self, task: ScheduledTask, period_ms: u32) -> TaskHandle {
        // a zero period would spin forever in pop_due
        let period_ms = period_ms.max(1);
        self.push(task, period_ms, Some(u64::from(period_ms)))
    }

    fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    fn finished(&mut self, _handle: TaskHandle) {}
}

impl<P: Page, S: PreferenceStore> LandingPage<P, S, ManualScheduler> {
    /// Moves virtual time forward, running every task that falls due.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler_mut().now() + ms;
        while let Some((handle, task)) = self.scheduler_mut().pop_due(until) {
            self.on_timer(handle, task);
        }
        self.scheduler_mut().set_now(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_once_at_due_time() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule_once(ScheduledTask::CompleteContactSubmit, 2_000);

        assert_eq!(scheduler.pop_due(1_999), None);
        assert_eq!(
            scheduler.pop_due(2_000),
            Some((handle, ScheduledTask::CompleteContactSubmit))
        );
        assert_eq!(scheduler.now(), 2_000);
        assert!(!scheduler.is_scheduled(handle));
    }

    #[test]
    fn repeating_task_rearms() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule_repeating(ScheduledTask::AdvanceCarousel, 5_000);

        let mut fired = 0;
        while scheduler.pop_due(15_000).is_some() {
            fired += 1;
        }
        assert_eq!(fired, 3);
        assert!(scheduler.is_scheduled(handle));
    }

    #[test]
    fn earlier_due_fires_first() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule_repeating(ScheduledTask::AdvanceCarousel, 5_000);
        scheduler.schedule_once(ScheduledTask::CompleteContactSubmit, 2_000);

        let mut fired = Vec::new();
        while let Some((_, task)) = scheduler.pop_due(10_000) {
            fired.push(task);
        }
        assert_eq!(
            fired,
            vec![
                ScheduledTask::CompleteContactSubmit,
                ScheduledTask::AdvanceCarousel,
                ScheduledTask::AdvanceCarousel,
            ]
        );
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule_once(ScheduledTask::CompleteContactSubmit, 10);
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert_eq!(scheduler.pop_due(100), None);
    }
}
