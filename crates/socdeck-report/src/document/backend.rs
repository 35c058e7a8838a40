use chrono::NaiveDate;

use crate::error::DocumentError;

use super::sink::Deck;

/// Document-level metadata written alongside the slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    pub title: String,
    pub company: String,
    /// Creation date recorded in the document; derived from the report month
    /// so identical inputs serialize identically.
    pub created: NaiveDate,
    /// Brand colors (`RRGGBB`) used for the document theme.
    pub primary_color: String,
    pub secondary_color: String,
}

/// Serializes a finished [`Deck`] into a binary document format.
pub trait DocumentBackend: Send + Sync {
    fn content_type(&self) -> &'static str;

    fn extension(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns [`DocumentError`] if the document cannot be written.
    fn serialize(&self, deck: &Deck, meta: &DocumentMeta) -> Result<Vec<u8>, DocumentError>;
}
