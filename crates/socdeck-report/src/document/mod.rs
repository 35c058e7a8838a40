//! Backend-neutral slide model and the sinks that modules draw into.

mod backend;
mod model;
mod pptx;
mod recording;
mod sink;

pub use backend::{DocumentBackend, DocumentMeta};
pub use model::{
    Align, Anchor, ImageSpec, ShapeKind, ShapeSpec, Slide, SlideElement, TableCell, TableSpec,
    TextBox,
};
pub use pptx::{PptxBackend, PPTX_CONTENT_TYPE};
pub use recording::{RecordingSink, SinkCall};
pub use sink::{Deck, SlideSink};
