use crate::error::DocumentError;
use crate::layout::Rect;

use super::model::{ImageSpec, ShapeSpec, Slide, SlideElement, TableSpec, TextBox};

/// Append-only drawing surface handed to slide modules.
///
/// `add_slide` starts a new slide; every other call draws onto the most
/// recently started one.
pub trait SlideSink {
    fn add_slide(&mut self, title: &str, background: Option<&str>);

    /// # Errors
    ///
    /// Returns [`DocumentError`] if no slide is active or the element is malformed.
    fn add_text(&mut self, text: TextBox) -> Result<(), DocumentError>;

    /// # Errors
    ///
    /// Returns [`DocumentError`] if no slide is active or the element is malformed.
    fn add_shape(&mut self, shape: ShapeSpec) -> Result<(), DocumentError>;

    /// # Errors
    ///
    /// Returns [`DocumentError`] if no slide is active or the element is malformed.
    fn add_image(&mut self, image: ImageSpec) -> Result<(), DocumentError>;

    /// # Errors
    ///
    /// Returns [`DocumentError`] if no slide is active or the element is malformed.
    fn add_table(&mut self, table: TableSpec) -> Result<(), DocumentError>;
}

/// In-memory slide deck; the document handle the composer folds modules into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    slides: Vec<Slide>,
}

impl Deck {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Move every slide of `other` to the end of this deck.
    pub fn append(&mut self, other: Deck) {
        self.slides.extend(other.slides);
    }

    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.slides.iter().map(|s| s.title.as_str()).collect()
    }

    fn push(&mut self, element: SlideElement) -> Result<(), DocumentError> {
        validate_rect(&element.rect())?;
        let slide = self.slides.last_mut().ok_or(DocumentError::NoActiveSlide)?;
        slide.elements.push(element);
        Ok(())
    }
}

fn validate_rect(rect: &Rect) -> Result<(), DocumentError> {
    let finite = [rect.x, rect.y, rect.w, rect.h].iter().all(|v| v.is_finite());
    if !finite || rect.w < 0.0 || rect.h < 0.0 {
        return Err(DocumentError::InvalidElement(format!(
            "bad geometry {rect:?}"
        )));
    }
    Ok(())
}

fn validate_table(table: &TableSpec) -> Result<(), DocumentError> {
    let columns = table.column_weights.len();
    if columns == 0 {
        return Err(DocumentError::InvalidElement(
            "table has no columns".to_string(),
        ));
    }
    if table.header.len() != columns {
        return Err(DocumentError::InvalidElement(format!(
            "table header has {} cells, expected {columns}",
            table.header.len()
        )));
    }
    if let Some((i, row)) = table.rows.iter().enumerate().find(|(_, r)| r.len() != columns) {
        return Err(DocumentError::InvalidElement(format!(
            "table row {i} has {} cells, expected {columns}",
            row.len()
        )));
    }
    Ok(())
}

impl SlideSink for Deck {
    fn add_slide(&mut self, title: &str, background: Option<&str>) {
        self.slides.push(Slide {
            title: title.to_string(),
            background: background.map(str::to_string),
            elements: Vec::new(),
        });
    }

    fn add_text(&mut self, text: TextBox) -> Result<(), DocumentError> {
        self.push(SlideElement::Text(text))
    }

    fn add_shape(&mut self, shape: ShapeSpec) -> Result<(), DocumentError> {
        self.push(SlideElement::Shape(shape))
    }

    fn add_image(&mut self, image: ImageSpec) -> Result<(), DocumentError> {
        if image.asset.bytes.is_empty() {
            return Err(DocumentError::InvalidElement(format!(
                "image '{}' has no data",
                image.description
            )));
        }
        self.push(SlideElement::Image(image))
    }

    fn add_table(&mut self, table: TableSpec) -> Result<(), DocumentError> {
        validate_table(&table)?;
        self.push(SlideElement::Table(table))
    }
}
