use thiserror::Error;

#[derive(Error, Debug)]
pub enum LandingError {
    #[error("Window is not available")]
    NoWindow,
    #[error("Document is not available")]
    NoDocument,
    #[error("Required element is missing: {0}")]
    MissingElement(String),
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
