//! Browser side: `web_sys` implementations of the page, store and scheduler
//! traits, listener wiring from the handler table, and the wasm entry point.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use log::{debug, error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlButtonElement, HtmlElement,
    HtmlFormElement, HtmlInputElement, HtmlTextAreaElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, ScrollBehavior,
    ScrollToOptions, Storage, Window,
};

use crate::app::{waits_for_dom, LandingPage};
use crate::config::{LandingConfig, CONFIG_ATTRIBUTE};
use crate::dispatch::{Dispatcher, Work};
use crate::error::LandingError;
use crate::events::{EventKind, PageEvent, Source};
use crate::page::{FormKind, Group, Node, Page};
use crate::schedule::{ScheduledTask, Scheduler, TaskHandle};
use crate::storage::PreferenceStore;

type BrowserLanding = LandingPage<BrowserPage, BrowserStore, BrowserScheduler>;
type BrowserDispatcher = Dispatcher<BrowserPage, BrowserStore, BrowserScheduler>;

const CURRENT_SLIDE_GLOBAL: &str = "currentSlide";

impl From<JsValue> for LandingError {
    fn from(value: JsValue) -> Self {
        LandingError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub struct BrowserPage {
    window: Window,
    document: Document,
    groups: HashMap<Group, Vec<Element>>,
    event_target: Option<Element>,
}

impl BrowserPage {
    /// Collects the sibling groups once, the way they exist at load time.
    pub fn new(window: Window) -> Result<Self, LandingError> {
        let document = window.document().ok_or(LandingError::NoDocument)?;
        let mut groups = HashMap::new();
        for group in [
            Group::NavLinks,
            Group::Sections,
            Group::Testimonials,
            Group::Indicators,
            Group::Buttons,
            Group::Animated,
        ] {
            groups.insert(group, query_all(&document, group.selector())?);
        }
        Ok(Self {
            window,
            document,
            groups,
            event_target: None,
        })
    }

    pub fn element(&self, node: &Node) -> Option<Element> {
        match node {
            Node::Root => self.document.document_element(),
            Node::Body => self.document.body().map(Element::from),
            Node::Member(group, i) => self.groups.get(group)?.get(*i).cloned(),
            Node::EventTarget => self.event_target.clone(),
            Node::SubmitButton(kind) => self
                .element(&Node::Form(*kind))?
                .query_selector("button[type=\"submit\"]")
                .ok()
                .flatten(),
            Node::NewsletterEmail => self
                .element(&Node::Form(FormKind::Newsletter))?
                .query_selector("input[type=\"email\"]")
                .ok()
                .flatten(),
            other => self.document.get_element_by_id(&other.id()?),
        }
    }

    pub fn members(&self, group: Group) -> &[Element] {
        self.groups.get(&group).map(Vec::as_slice).unwrap_or_default()
    }

    fn html(&self, node: &Node) -> Option<HtmlElement> {
        self.element(node)?.dyn_into::<HtmlElement>().ok()
    }
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, LandingError> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

impl Page for BrowserPage {
    type Target = Element;

    fn set_event_target(&mut self, target: Option<Element>) {
        self.event_target = target;
    }

    fn exists(&self, node: &Node) -> bool {
        self.element(node).is_some()
    }

    fn count(&self, group: Group) -> usize {
        self.members(group).len()
    }

    fn attribute(&self, node: &Node, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Node, name: &str, value: &str) {
        if let Some(el) = self.element(node) {
            let _ = el.set_attribute(name, value);
        }
    }

    fn has_class(&self, node: &Node, class: &str) -> bool {
        self.element(node)
            .map_or(false, |el| el.class_list().contains(class))
    }

    fn set_class(&mut self, node: &Node, class: &str, on: bool) {
        if let Some(el) = self.element(node) {
            let _ = el.class_list().toggle_with_force(class, on);
        }
    }

    fn text(&self, node: &Node) -> String {
        self.element(node)
            .and_then(|el| el.text_content())
            .unwrap_or_default()
    }

    fn set_text(&mut self, node: &Node, text: &str) {
        if let Some(el) = self.element(node) {
            el.set_text_content(Some(text));
        }
    }

    fn set_style(&mut self, node: &Node, property: &str, value: &str) {
        if let Some(el) = self.html(node) {
            let style = el.style();
            let _ = if value.is_empty() {
                style.remove_property(property).map(|_| ())
            } else {
                style.set_property(property, value)
            };
        }
    }

    fn value(&self, node: &Node) -> String {
        let Some(el) = self.element(node) else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn set_value(&mut self, node: &Node, value: &str) {
        let Some(el) = self.element(node) else {
            return;
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn set_disabled(&mut self, node: &Node, disabled: bool) {
        let Some(el) = self.element(node) else {
            return;
        };
        if let Some(button) = el.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            let _ = el.set_attribute("disabled", "");
        } else {
            let _ = el.remove_attribute("disabled");
        }
    }

    fn reset_form(&mut self, node: &Node) {
        if let Some(form) = self
            .element(node)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        {
            form.reset();
        }
    }

    fn is_focused(&self, node: &Node) -> bool {
        match (self.document.active_element(), self.element(node)) {
            (Some(active), Some(el)) => {
                let el: &web_sys::Node = &el;
                active.is_same_node(Some(el))
            }
            _ => false,
        }
    }

    fn focus(&mut self, node: &Node) {
        if let Some(el) = self.html(node) {
            let _ = el.focus();
        }
    }

    fn offset_top(&self, node: &Node) -> f64 {
        self.html(node).map_or(0.0, |el| f64::from(el.offset_top()))
    }

    fn offset_height(&self, node: &Node) -> f64 {
        self.html(node).map_or(0.0, |el| f64::from(el.offset_height()))
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn inner_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_to(&mut self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn prefers_dark(&self) -> bool {
        self.window
            .match_media("(prefers-color-scheme: dark)")
            .ok()
            .flatten()
            .map_or(false, |mq| mq.matches())
    }

    fn alert(&mut self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }
}

/// `localStorage`, when the browser lets us have it.
pub struct BrowserStore {
    storage: Option<Storage>,
}

impl BrowserStore {
    pub fn new(window: &Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            warn!("localStorage unavailable, theme preference will not persist");
        }
        Self { storage }
    }
}

impl PreferenceStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set_item(key, value) {
                warn!("Failed to persist {key}: {e:?}");
            }
        }
    }
}

type TimerSink = Rc<dyn Fn(TaskHandle, ScheduledTask)>;

enum Timer {
    Once(Timeout),
    Repeating(Interval),
}

/// Timers are cancelled when dropped. Finished one-shots are only dropped on
/// the next [`Scheduler::prune`], never from inside their own callback.
pub struct BrowserScheduler {
    next_id: u64,
    timers: HashMap<TaskHandle, Timer>,
    done: Vec<TaskHandle>,
    sink: TimerSink,
}

impl BrowserScheduler {
    fn new(sink: TimerSink) -> Self {
        Self {
            next_id: 0,
            timers: HashMap::new(),
            done: Vec::new(),
            sink,
        }
    }

    fn next_handle(&mut self) -> TaskHandle {
        self.next_id += 1;
        TaskHandle(self.next_id)
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule_once(&mut self, task: ScheduledTask, delay_ms: u32) -> TaskHandle {
        let handle = self.next_handle();
        let sink = self.sink.clone();
        let timeout = Timeout::new(delay_ms, move || sink(handle, task));
        self.timers.insert(handle, Timer::Once(timeout));
        handle
    }

    fn schedule_repeating(&mut self, task: ScheduledTask, period_ms: u32) -> TaskHandle {
        let handle = self.next_handle();
        let sink = self.sink.clone();
        let interval = Interval::new(period_ms, move || sink(handle, task));
        self.timers.insert(handle, Timer::Repeating(interval));
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.done.retain(|h| *h != handle);
        match self.timers.remove(&handle) {
            Some(Timer::Once(timeout)) => {
                timeout.cancel();
                true
            }
            Some(Timer::Repeating(interval)) => {
                interval.cancel();
                true
            }
            None => false,
        }
    }

    fn finished(&mut self, handle: TaskHandle) {
        self.done.push(handle);
    }

    fn prune(&mut self) {
        for handle in std::mem::take(&mut self.done) {
            self.timers.remove(&handle);
        }
    }
}

struct Listener {
    target: EventTarget,
    name: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.name, self.callback.as_ref().unchecked_ref());
    }
}

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// A wired-up page. Dropping it detaches everything; [`MountedPage::unmount`]
/// also cancels pending work first.
pub struct MountedPage {
    window: Window,
    landing: Rc<RefCell<BrowserLanding>>,
    listeners: Vec<Listener>,
    observer: Option<(IntersectionObserver, ObserverCallback)>,
    _current_slide: Closure<dyn FnMut(JsValue)>,
}

impl MountedPage {
    pub fn unmount(self) {
        if let Ok(mut landing) = self.landing.try_borrow_mut() {
            landing.unmount();
        }
        if let Some((observer, _)) = &self.observer {
            observer.disconnect();
        }
        let _ = js_sys::Reflect::delete_property(&self.window, &JsValue::from_str(CURRENT_SLIDE_GLOBAL));
        debug!("Detaching {} listeners", self.listeners.len());
    }
}

const REQUIRED: [Node; 6] = [
    Node::ThemeToggle,
    Node::Hamburger,
    Node::NavMenu,
    Node::Navbar,
    Node::Form(FormKind::Contact),
    Node::Form(FormKind::Newsletter),
];

pub fn mount(window: Window, config: LandingConfig) -> Result<MountedPage, LandingError> {
    let page = BrowserPage::new(window.clone())?;
    for node in &REQUIRED {
        if !page.exists(node) {
            return Err(LandingError::MissingElement(node.id().unwrap_or_default()));
        }
    }

    let store = BrowserStore::new(&window);
    let dispatcher = BrowserDispatcher::new();
    let timer_dispatcher = dispatcher.clone();
    let scheduler = BrowserScheduler::new(Rc::new(move |handle: TaskHandle, task: ScheduledTask| {
        timer_dispatcher.submit(Work::Timer(handle, task));
    }));

    let landing = Rc::new(RefCell::new(LandingPage::new(config, page, store, scheduler)));
    dispatcher.attach(&landing);
    landing.borrow_mut().mount();

    let (listeners, observer) = {
        let landing = landing.borrow();
        (
            attach_listeners(&window, &landing, &dispatcher)?,
            observe(&landing, &dispatcher)?,
        )
    };

    let slide_dispatcher = dispatcher.clone();
    let current_slide = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
        if let Some(number) = value.as_f64().filter(|n| *n >= 1.0) {
            slide_dispatcher.submit(Work::ShowSlide(number as usize));
        }
    });
    js_sys::Reflect::set(
        &window,
        &JsValue::from_str(CURRENT_SLIDE_GLOBAL),
        current_slide.as_ref(),
    )?;

    Ok(MountedPage {
        window,
        landing,
        listeners,
        observer,
        _current_slide: current_slide,
    })
}

fn attach_listeners(
    window: &Window,
    landing: &BrowserLanding,
    dispatcher: &BrowserDispatcher,
) -> Result<Vec<Listener>, LandingError> {
    let page = landing.page();
    let document = window.document().ok_or(LandingError::NoDocument)?;
    let nav_menu = page.element(&Node::NavMenu);
    let hamburger = page.element(&Node::Hamburger);

    let mut listeners = Vec::new();
    for (source, kind) in landing.table().listeners() {
        let Some(name) = kind.dom_name() else {
            continue;
        };
        let target: EventTarget = match source.node() {
            None if source == Source::Window => window.clone().into(),
            None => document.clone().into(),
            Some(node) => match page.element(&node) {
                Some(el) => el.into(),
                None => {
                    debug!("Skipping {name} listener, {node:?} is not on the page");
                    continue;
                }
            },
        };

        let dispatcher = dispatcher.clone();
        let nav_menu = nav_menu.clone();
        let hamburger = hamburger.clone();
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let page_event = translate(kind, &event, nav_menu.as_ref(), hamburger.as_ref());
            let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
            if let Some(result) = dispatcher.submit(Work::Event {
                source,
                event: page_event,
                target,
            }) {
                if result.prevent_default {
                    event.prevent_default();
                }
            }
        });
        target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())?;
        listeners.push(Listener {
            target,
            name,
            callback,
        });
    }
    Ok(listeners)
}

fn translate(
    kind: EventKind,
    event: &Event,
    nav_menu: Option<&Element>,
    hamburger: Option<&Element>,
) -> PageEvent {
    let target_node = event
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Node>().ok());
    let target_tag = event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .map(|el| el.tag_name().to_ascii_lowercase())
        .unwrap_or_default();

    match kind {
        EventKind::Click => PageEvent::Click {
            inside_nav_menu: contains(nav_menu, target_node.as_ref()),
            inside_hamburger: contains(hamburger, target_node.as_ref()),
        },
        EventKind::Submit => PageEvent::Submit,
        EventKind::Blur => PageEvent::Blur,
        EventKind::Scroll => PageEvent::Scroll,
        EventKind::Resize => PageEvent::Resize,
        EventKind::KeyDown => PageEvent::KeyDown {
            key: event
                .dyn_ref::<KeyboardEvent>()
                .map(|e| e.key())
                .unwrap_or_default(),
        },
        EventKind::FocusIn => PageEvent::FocusIn { tag: target_tag },
        EventKind::FocusOut => PageEvent::FocusOut { tag: target_tag },
        EventKind::MouseEnter => PageEvent::MouseEnter,
        EventKind::MouseLeave => PageEvent::MouseLeave,
        EventKind::Intersect => PageEvent::Intersect {
            intersecting: false,
        },
    }
}

fn contains(container: Option<&Element>, target: Option<&web_sys::Node>) -> bool {
    match (container, target) {
        (Some(container), Some(target)) => container.contains(Some(target)),
        _ => false,
    }
}

fn observe(
    landing: &BrowserLanding,
    dispatcher: &BrowserDispatcher,
) -> Result<Option<(IntersectionObserver, ObserverCallback)>, LandingError> {
    let members = landing.page().members(Group::Animated).to_vec();
    if members.is_empty() {
        return Ok(None);
    }
    let options = landing.observer_options();

    let observed = members.clone();
    let dispatcher = dispatcher.clone();
    let callback = ObserverCallback::new(move |entries: js_sys::Array, _: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let target = entry.target();
            let target_node: &web_sys::Node = &target;
            if let Some(index) = observed.iter().position(|el| el.is_same_node(Some(target_node))) {
                dispatcher.submit(Work::Event {
                    source: Source::Animated(index),
                    event: PageEvent::Intersect {
                        intersecting: entry.is_intersecting(),
                    },
                    target: Some(target.clone()),
                });
            }
        }
    });

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for el in &members {
        observer.observe(el);
    }
    Ok(Some((observer, callback)))
}

thread_local! {
    static MOUNTED: RefCell<Option<MountedPage>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let raw = window
        .document()
        .and_then(|doc| doc.document_element())
        .and_then(|root| root.get_attribute(CONFIG_ATTRIBUTE));
    let (config, config_error) = LandingConfig::from_attribute(raw.as_deref());
    wasm_logger::init(wasm_logger::Config::new(config.log_level()));
    if let Some(e) = config_error {
        warn!("Ignoring {CONFIG_ATTRIBUTE}: {e}");
    }

    let Some(document) = window.document() else {
        error!("{}", LandingError::NoDocument);
        return;
    };
    if waits_for_dom(&document.ready_state()) {
        let on_ready = Closure::once_into_js(move || install(window, config));
        if let Err(e) = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            error!("Failed to wait for DOMContentLoaded: {}", LandingError::from(e));
        }
    } else {
        install(window, config);
    }
}

fn install(window: Window, config: LandingConfig) {
    match mount(window, config) {
        Ok(mounted) => {
            MOUNTED.with(|slot| {
                if let Some(previous) = slot.borrow_mut().replace(mounted) {
                    previous.unmount();
                }
            });
        }
        Err(e) => error!("Failed to mount landing page: {e}"),
    }
}

/// Detaches every listener and cancels the carousel timer and any pending
/// simulated submission.
#[wasm_bindgen]
pub fn unmount() {
    if let Some(mounted) = MOUNTED.with(|slot| slot.borrow_mut().take()) {
        mounted.unmount();
    }
}
