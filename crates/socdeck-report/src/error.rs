use socdeck_core::{CollaboratorError, CoreError};
use thiserror::Error;

/// Failures that abort a report. Everything else is recovered in-pipeline.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid report request: {0}")]
    InvalidRequest(#[from] CoreError),

    #[error("customer lookup failed for '{id}': {source}")]
    CustomerLookup {
        id: String,
        #[source]
        source: CollaboratorError,
    },

    #[error("document serialization failed: {0}")]
    Document(#[from] DocumentError),
}

/// A slide module could not render. Caught by the composer; never fatal.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("render failed: {0}")]
    Render(String),
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("no slide has been started")]
    NoActiveSlide,

    #[error("invalid element: {0}")]
    InvalidElement(String),

    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
