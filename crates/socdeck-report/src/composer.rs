//! Document Composer: the top-level report pipeline.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use socdeck_assets::{AssetCache, AssetFetcher};
use socdeck_core::{
    AdsDataSource, CollaboratorError, Customer, CustomerDirectory, MetricsStore, Platform,
    ReportRequest,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::context::RenderContext;
use crate::document::{Deck, DocumentBackend, DocumentMeta, PptxBackend};
use crate::error::ReportError;
use crate::kpi::KpiAggregator;
use crate::modules::{select_modules, SlideModule, REGISTRY};
use crate::types::{ModuleOutcome, ModuleStatus, ReportDocument, ReportSettings};

/// Build a [`ReportRequest`] from raw strings.
///
/// # Errors
///
/// Returns [`ReportError::InvalidRequest`] for a blank customer id, a month
/// that is not `YYYY-MM`, or an unknown platform name.
pub fn parse_request<S: AsRef<str>>(
    customer_id: &str,
    target_month: &str,
    platforms: &[S],
    notes: Option<&str>,
) -> Result<ReportRequest, ReportError> {
    Ok(ReportRequest::parse(
        customer_id,
        target_month,
        platforms,
        notes,
    )?)
}

/// Turns report requests into serialized documents.
///
/// Holds shared, read-only collaborators; every [`Composer::compose`] call
/// builds its own context and asset cache, so one composer can serve
/// concurrent requests.
#[derive(Clone)]
pub struct Composer {
    directory: Arc<dyn CustomerDirectory>,
    store: Arc<dyn MetricsStore>,
    ads: Arc<dyn AdsDataSource>,
    fetcher: Arc<dyn AssetFetcher>,
    backend: Arc<dyn DocumentBackend>,
    registry: &'static [SlideModule],
    settings: ReportSettings,
}

impl Composer {
    #[must_use]
    pub fn new(
        directory: Arc<dyn CustomerDirectory>,
        store: Arc<dyn MetricsStore>,
        ads: Arc<dyn AdsDataSource>,
        fetcher: Arc<dyn AssetFetcher>,
        settings: ReportSettings,
    ) -> Self {
        Self {
            directory,
            store,
            ads,
            fetcher,
            backend: Arc::new(PptxBackend),
            registry: REGISTRY,
            settings,
        }
    }

    #[must_use]
    pub fn with_backend(mut self, backend: Arc<dyn DocumentBackend>) -> Self {
        self.backend = backend;
        self
    }

    #[must_use]
    pub fn with_registry(mut self, registry: &'static [SlideModule]) -> Self {
        self.registry = registry;
        self
    }

    /// Generate one report.
    ///
    /// Data gaps, missing images and failing modules are recovered and
    /// recorded in [`ReportDocument::modules`].
    ///
    /// # Errors
    ///
    /// - [`ReportError::CustomerLookup`] if the directory cannot resolve the
    ///   customer within the query timeout.
    /// - [`ReportError::Document`] if the finished document cannot be
    ///   serialized. No partial document is returned.
    pub async fn compose(&self, request: &ReportRequest) -> Result<ReportDocument, ReportError> {
        let report_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!(
            "report",
            report_id = %report_id,
            customer_id = %request.customer_id,
            month = %request.target_month,
        );
        self.run(request, report_id).instrument(span).await
    }

    async fn run(
        &self,
        request: &ReportRequest,
        report_id: String,
    ) -> Result<ReportDocument, ReportError> {
        let customer = self.lookup_customer(&request.customer_id).await?;
        let platforms = resolve_platforms(&customer, &request.enabled_platforms);
        let month = request.target_month;
        tracing::info!(
            customer = %customer.slug(),
            platforms = ?platforms.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
            "report started"
        );

        let assets = AssetCache::new(Arc::clone(&self.fetcher), self.settings.asset_timeout);
        let mut ctx = RenderContext::new(customer, month, assets, self.settings.clone())
            .with_notes(request.notes.clone());

        let aggregator = KpiAggregator::new(
            self.store.as_ref(),
            self.ads.as_ref(),
            self.settings.query_timeout,
        );
        for &platform in &platforms {
            let ids = ctx.customer.account_ids(platform).to_vec();
            ctx = if platform.is_social() {
                let data = aggregator.social(platform, &ids, month).await;
                ctx.with_social(data)
            } else {
                let window = aggregator.ads(&ids, month).await;
                ctx.with_ads(window)
            };
        }

        prefetch_assets(&mut ctx).await;

        let (deck, outcomes) = render_modules(&mut ctx, self.registry);

        let meta = DocumentMeta {
            title: format!("{} social media report {}", ctx.customer.name, month.label()),
            company: ctx.customer.name.clone(),
            created: month.next().first_day(),
            primary_color: ctx.palette.primary.clone(),
            secondary_color: ctx.palette.secondary.clone(),
        };
        let bytes = self.backend.serialize(&deck, &meta).map_err(|e| {
            tracing::error!(error = %e, slides = deck.len(), "document serialization failed");
            ReportError::Document(e)
        })?;

        let slug = match ctx.customer.slug() {
            s if s.is_empty() => ctx.customer.id.clone(),
            s => s,
        };
        let filename = format!("{slug}_{month}.{}", self.backend.extension());
        let stats = ctx.assets.stats();
        let skipped = outcomes
            .iter()
            .filter(|o| o.status != ModuleStatus::Rendered)
            .count();
        tracing::info!(
            filename = %filename,
            slides = deck.len(),
            bytes = bytes.len(),
            skipped_modules = skipped,
            assets_available = stats.available,
            assets_unavailable = stats.unavailable,
            "report composed"
        );

        Ok(ReportDocument {
            report_id,
            filename,
            content_type: self.backend.content_type(),
            bytes,
            slide_count: deck.len(),
            modules: outcomes,
        })
    }

    async fn lookup_customer(&self, id: &str) -> Result<Customer, ReportError> {
        let timeout = self.settings.query_timeout;
        let result = match tokio::time::timeout(timeout, self.directory.get_customer(id)).await {
            Ok(result) => result,
            Err(_) => Err(CollaboratorError::Timeout(timeout)),
        };
        result.map_err(|source| {
            tracing::warn!(customer_id = id, error = %source, "customer lookup failed");
            ReportError::CustomerLookup {
                id: id.to_string(),
                source,
            }
        })
    }
}

/// Platforms to report on, in canonical order.
///
/// An empty request list means every platform the customer has enabled.
/// Platforms without account ids are dropped.
#[must_use]
pub fn resolve_platforms(customer: &Customer, requested: &[Platform]) -> Vec<Platform> {
    Platform::ALL
        .into_iter()
        .filter(|p| requested.is_empty() || requested.contains(p))
        .filter(|p| {
            let enabled = customer.is_enabled(*p);
            if !enabled && requested.contains(p) {
                tracing::debug!(platform = %p, "platform requested but not enabled for customer");
            }
            enabled
        })
        .filter(|p| {
            let has_accounts = !customer.account_ids(*p).is_empty();
            if !has_accounts {
                tracing::warn!(platform = %p, "platform enabled without account ids, skipping");
            }
            has_accounts
        })
        .collect()
}

/// Resolve the logo and every thumbnail a content slide may show.
async fn prefetch_assets(ctx: &mut RenderContext) {
    let mut urls: Vec<String> = Vec::new();
    if let Some(logo) = &ctx.customer.logo_url {
        urls.push(logo.clone());
    }
    for data in &ctx.social {
        urls.extend(
            data.posts
                .iter()
                .take(ctx.settings.top_posts)
                .filter_map(|p| p.thumbnail_url.clone()),
        );
    }
    for url in &urls {
        ctx.assets.fetch(url).await;
    }
    tracing::debug!(
        requested = urls.len(),
        fetched = ctx.assets.fetch_count(),
        "assets prefetched"
    );
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Run the selected modules in order. Each renders into its own staging deck
/// that is appended only on success.
fn render_modules(
    ctx: &mut RenderContext,
    registry: &[SlideModule],
) -> (Deck, Vec<ModuleOutcome>) {
    let modules = select_modules(registry, &ctx.platforms);
    let mut deck = Deck::new();
    let mut outcomes = Vec::with_capacity(modules.len());

    for module in modules {
        let mut staging = Deck::new();
        let result = catch_unwind(AssertUnwindSafe(|| (module.render)(ctx, &mut staging)));
        let status = match result {
            Ok(Ok(())) => ModuleStatus::Rendered,
            Ok(Err(e)) => {
                tracing::warn!(
                    module = module.id,
                    customer = %ctx.customer.id,
                    month = %ctx.month,
                    error = %e,
                    "slide module failed, skipping"
                );
                ModuleStatus::Failed(e.to_string())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!(
                    module = module.id,
                    customer = %ctx.customer.id,
                    month = %ctx.month,
                    panic = %message,
                    "slide module panicked, skipping"
                );
                ModuleStatus::Panicked(message)
            }
        };

        let slides = if status == ModuleStatus::Rendered {
            let n = staging.len();
            deck.append(staging);
            n
        } else {
            0
        };
        tracing::debug!(module = module.id, slides, "module finished");
        outcomes.push(ModuleOutcome {
            module: module.id,
            slides,
            status,
        });
    }
    (deck, outcomes)
}
