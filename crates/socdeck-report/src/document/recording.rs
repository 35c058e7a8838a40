use crate::error::DocumentError;

use super::model::{ImageSpec, ShapeKind, ShapeSpec, TableSpec, TextBox};
use super::sink::{Deck, SlideSink};

/// One successful call made against a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Slide { title: String },
    Text(String),
    Shape(ShapeKind),
    Image { description: String },
    Table { rows: usize },
}

/// Test double that records every successful sink call in order.
///
/// Drawing semantics are those of [`Deck`], so calls that a real document
/// would reject are rejected here too.
#[derive(Debug, Default)]
pub struct RecordingSink {
    deck: Deck,
    calls: Vec<SinkCall>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> &[SinkCall] {
        &self.calls
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn slide_titles(&self) -> Vec<&str> {
        self.deck.titles()
    }

    /// Every text box string across all slides, in call order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SinkCall::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn image_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SinkCall::Image { .. }))
            .count()
    }
}

impl SlideSink for RecordingSink {
    fn add_slide(&mut self, title: &str, background: Option<&str>) {
        self.deck.add_slide(title, background);
        self.calls.push(SinkCall::Slide {
            title: title.to_string(),
        });
    }

    fn add_text(&mut self, text: TextBox) -> Result<(), DocumentError> {
        let content = text.text.clone();
        self.deck.add_text(text)?;
        self.calls.push(SinkCall::Text(content));
        Ok(())
    }

    fn add_shape(&mut self, shape: ShapeSpec) -> Result<(), DocumentError> {
        let kind = shape.kind;
        self.deck.add_shape(shape)?;
        self.calls.push(SinkCall::Shape(kind));
        Ok(())
    }

    fn add_image(&mut self, image: ImageSpec) -> Result<(), DocumentError> {
        let description = image.description.clone();
        self.deck.add_image(image)?;
        self.calls.push(SinkCall::Image { description });
        Ok(())
    }

    fn add_table(&mut self, table: TableSpec) -> Result<(), DocumentError> {
        let rows = table.rows.len();
        self.deck.add_table(table)?;
        self.calls.push(SinkCall::Table { rows });
        Ok(())
    }
}
