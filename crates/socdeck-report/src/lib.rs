//! Analytics report composition engine.
//!
//! Aggregates three months of per-platform KPIs, resolves brand and post
//! imagery through a per-report asset cache, and drives a static catalog of
//! slide modules into a presentation document. Data gaps, missing images and
//! failing modules are all recovered inside the engine; only document
//! serialization can fail a report once the pipeline has started.

pub mod composer;
pub mod context;
pub mod document;
pub mod error;
pub mod kpi;
pub mod layout;
pub mod modules;
pub mod types;

pub use composer::{parse_request, resolve_platforms, Composer};
pub use context::{PageCounter, Palette, RenderContext};
pub use document::{
    Deck, DocumentBackend, DocumentMeta, PptxBackend, RecordingSink, SinkCall, Slide, SlideSink,
    PPTX_CONTENT_TYPE,
};
pub use error::{DocumentError, ModuleError, ReportError};
pub use kpi::{trend, AdsWindow, KpiAggregator, SocialData, Trend, TrendDirection};
pub use modules::{
    select_modules, ModuleCategory, PlatformTag, RenderFn, SlideModule,
    FACEBOOK_SHARES_MARKED_LIMITED, FACEBOOK_SUMMARY_INCLUDES_SAVES, NO_DATA_TEXT, REGISTRY,
};
pub use types::{ModuleOutcome, ModuleStatus, ReportDocument, ReportSettings};
