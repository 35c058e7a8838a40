use socdeck_assets::ImageAsset;

use crate::layout::{Rect, TEXT_COLOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Top,
    Middle,
    Bottom,
}

/// A text frame. Lines in `text` are separated by `\n`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub rect: Rect,
    pub text: String,
    pub size: f64,
    pub bold: bool,
    pub color: String,
    pub align: Align,
    pub anchor: Anchor,
    pub fill: Option<String>,
}

impl TextBox {
    #[must_use]
    pub fn new(rect: Rect, text: impl Into<String>) -> Self {
        Self {
            rect,
            text: text.into(),
            size: 14.0,
            bold: false,
            color: TEXT_COLOR.to_string(),
            align: Align::Left,
            anchor: Anchor::Top,
            fill: None,
        }
    }

    #[must_use]
    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    #[must_use]
    pub fn fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rect,
    RoundRect,
    Ellipse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    pub rect: Rect,
    pub fill: String,
    pub outline: Option<String>,
}

impl ShapeSpec {
    #[must_use]
    pub fn rect(rect: Rect, fill: impl Into<String>) -> Self {
        Self {
            kind: ShapeKind::Rect,
            rect,
            fill: fill.into(),
            outline: None,
        }
    }

    #[must_use]
    pub fn rounded(rect: Rect, fill: impl Into<String>) -> Self {
        Self {
            kind: ShapeKind::RoundRect,
            ..Self::rect(rect, fill)
        }
    }

    #[must_use]
    pub fn ellipse(rect: Rect, fill: impl Into<String>) -> Self {
        Self {
            kind: ShapeKind::Ellipse,
            ..Self::rect(rect, fill)
        }
    }

    #[must_use]
    pub fn outline(mut self, color: impl Into<String>) -> Self {
        self.outline = Some(color.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageSpec {
    pub rect: Rect,
    pub asset: ImageAsset,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableCell {
    pub text: String,
    pub color: Option<String>,
    pub bold: bool,
}

impl TableCell {
    #[must_use]
    pub fn colored(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Some(color.into()),
            bold: false,
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl From<String> for TableCell {
    fn from(text: String) -> Self {
        Self {
            text,
            ..Self::default()
        }
    }
}

impl From<&str> for TableCell {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

/// A simple grid table. `column_weights` are relative widths.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub rect: Rect,
    pub column_weights: Vec<f64>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<TableCell>>,
    pub header_fill: String,
    pub header_color: String,
    pub font_size: f64,
}

impl TableSpec {
    /// Absolute column widths in points, proportional to `column_weights`.
    #[must_use]
    pub fn column_widths(&self) -> Vec<f64> {
        let total: f64 = self.column_weights.iter().filter(|w| **w > 0.0).sum();
        self.column_weights
            .iter()
            .map(|w| {
                if total > 0.0 && *w > 0.0 {
                    w / total * self.rect.w
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Row height in points, header included.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn row_height(&self) -> f64 {
        self.rect.h / (self.rows.len() + 1) as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlideElement {
    Text(TextBox),
    Shape(ShapeSpec),
    Image(ImageSpec),
    Table(TableSpec),
}

impl SlideElement {
    #[must_use]
    pub fn rect(&self) -> Rect {
        match self {
            SlideElement::Text(t) => t.rect,
            SlideElement::Shape(s) => s.rect,
            SlideElement::Image(i) => i.rect,
            SlideElement::Table(t) => t.rect,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub title: String,
    pub background: Option<String>,
    pub elements: Vec<SlideElement>,
}

impl Slide {
    /// All visible text on the slide, in drawing order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for element in &self.elements {
            match element {
                SlideElement::Text(t) => out.push(t.text.as_str()),
                SlideElement::Table(t) => {
                    out.extend(t.header.iter().map(String::as_str));
                    for row in &t.rows {
                        out.extend(row.iter().map(|c| c.text.as_str()));
                    }
                }
                SlideElement::Shape(_) | SlideElement::Image(_) => {}
            }
        }
        out
    }

    #[must_use]
    pub fn image_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, SlideElement::Image(_)))
            .count()
    }
}
