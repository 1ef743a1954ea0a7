use serde::Deserialize;

use crate::error::LandingError;

/// Root element attribute that may carry a JSON configuration override.
pub const CONFIG_ATTRIBUTE: &str = "data-landing-config";

/// Tunables for the landing page behavior. Every field falls back to the
/// value the page has always used, so a partial override is fine.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LandingConfig {
    /// Vertical scroll (px) past which the navbar is marked scrolled.
    pub scroll_threshold: f64,
    /// Sections count as current this many px before their top edge.
    pub section_offset: f64,
    /// Height of the fixed header subtracted from smooth-scroll targets.
    pub header_offset: f64,
    /// Viewport width above which the mobile menu is force-closed.
    pub mobile_breakpoint: f64,
    pub carousel_interval_ms: u32,
    pub contact_delay_ms: u32,
    pub newsletter_delay_ms: u32,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub log_level: String,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 50.0,
            section_offset: 100.0,
            header_offset: 70.0,
            mobile_breakpoint: 768.0,
            carousel_interval_ms: 5_000,
            contact_delay_ms: 2_000,
            newsletter_delay_ms: 1_500,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl LandingConfig {
    pub fn from_json(raw: &str) -> Result<Self, LandingError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the optional attribute value. Anything unparsable yields the
    /// defaults together with the parse error so the caller can log it once
    /// logging is up.
    pub fn from_attribute(raw: Option<&str>) -> (Self, Option<LandingError>) {
        match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
            None => (Self::default(), None),
            Some(raw) => match Self::from_json(raw) {
                Ok(config) => (config, None),
                Err(e) => (Self::default(), Some(e)),
            },
        }
    }

    pub fn log_level(&self) -> log::Level {
        match self.log_level.to_ascii_lowercase().as_str() {
            "error" => log::Level::Error,
            "warn" | "warning" => log::Level::Warn,
            "debug" => log::Level::Debug,
            "trace" => log::Level::Trace,
            _ => log::Level::Info,
        }
    }
}
