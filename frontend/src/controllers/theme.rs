use log::debug;

use crate::page::{Node, Page};
use crate::storage::PreferenceStore;

pub const THEME_KEY: &str = "theme";
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Sun while dark mode is on, moon otherwise.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "\u{2600}\u{fe0f}",
            Theme::Light => "\u{1f319}",
        }
    }
}

/// Owns the persisted theme preference.
pub struct ThemeManager<S> {
    store: S,
}

impl<S: PreferenceStore> ThemeManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// Applies the saved theme, or dark when the browser hints at it.
    /// Without either the page keeps whatever its markup declares.
    pub fn initialize(&mut self, page: &mut impl Page) -> Option<Theme> {
        let saved = self
            .store
            .get(THEME_KEY)
            .and_then(|value| Theme::parse(&value));

        let theme = match saved {
            Some(theme) => theme,
            None if page.prefers_dark() => Theme::Dark,
            None => return None,
        };
        apply(page, theme);
        debug!("Initial theme: {}", theme.as_str());
        Some(theme)
    }

    pub fn toggle(&mut self, page: &mut impl Page) -> Theme {
        let next = current(page).toggled();
        apply(page, next);
        self.store.set(THEME_KEY, next.as_str());
        debug!("Theme switched to {}", next.as_str());
        next
    }
}

/// An absent or unknown attribute counts as light.
pub fn current(page: &impl Page) -> Theme {
    match page.attribute(&Node::Root, THEME_ATTRIBUTE).as_deref() {
        Some("dark") => Theme::Dark,
        _ => Theme::Light,
    }
}

fn apply(page: &mut impl Page, theme: Theme) {
    page.set_attribute(&Node::Root, THEME_ATTRIBUTE, theme.as_str());
    page.set_text(&Node::ThemeToggle, theme.icon());
}
