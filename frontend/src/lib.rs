//! Interactivity for the marketing landing page: theme switching, the
//! mobile menu, scroll-spy navigation, the testimonial carousel, contact and
//! newsletter forms, reveal-on-scroll and a few accessibility touches.
//!
//! The behavior is written against the [`page::Page`] trait so it runs on
//! the host in tests; [`dom`] binds it to the real document in the browser.

pub mod app;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod page;
pub mod schedule;
pub mod storage;

pub mod controllers {
    pub mod carousel;
    pub mod effects;
    pub mod keyboard;
    pub mod nav;
    pub mod reveal;
    pub mod scroll;
    pub mod theme;
}

pub mod forms {
    pub mod contact;
    pub mod newsletter;
    pub mod submit;
    pub mod validation;
}

#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(test)]
mod testing;

pub use app::{Dispatched, LandingPage};
pub use config::LandingConfig;
pub use error::LandingError;
