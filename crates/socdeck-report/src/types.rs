use std::time::Duration;

use serde::Serialize;
use socdeck_core::AppConfig;

/// Tunables for one report run.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    /// Bound on each Customer Directory, Metrics Store and Ads Data Source call.
    pub query_timeout: Duration,
    /// Bound on each asset retrieval, on top of the fetcher's own timeout.
    pub asset_timeout: Duration,
    /// Posts shown per top-posts slide.
    pub top_posts: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            query_timeout: Duration::from_secs(20),
            asset_timeout: Duration::from_secs(10),
            top_posts: 6,
        }
    }
}

impl From<&AppConfig> for ReportSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            query_timeout: config.query_timeout(),
            asset_timeout: config.asset_timeout(),
            top_posts: config.top_posts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ModuleStatus {
    Rendered,
    Failed(String),
    Panicked(String),
}

/// What one module contributed to the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleOutcome {
    pub module: &'static str,
    pub slides: usize,
    pub status: ModuleStatus,
}

/// A finished, serialized report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub report_id: String,
    pub filename: String,
    pub content_type: &'static str,
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub slide_count: usize,
    pub modules: Vec<ModuleOutcome>,
}

impl ReportDocument {
    /// Modules that produced no slides because they failed or panicked.
    pub fn skipped_modules(&self) -> impl Iterator<Item = &ModuleOutcome> {
        self.modules
            .iter()
            .filter(|m| !matches!(m.status, ModuleStatus::Rendered))
    }
}
