//! `socdeck check-assets`: resolve every logo and thumbnail the dataset references.

use std::sync::Arc;

use socdeck_assets::AssetCache;
use socdeck_core::{load_customers, Platform};

use crate::generate::{build_fetcher, load_store};

pub(crate) async fn run_check_assets(
    config: &socdeck_core::AppConfig,
    customer_filter: Option<&str>,
) -> anyhow::Result<()> {
    let customers = load_customers(&config.customers_path)?.customers;
    let store = load_store(config)?;

    let selected: Vec<_> = customers
        .iter()
        .filter(|c| customer_filter.is_none_or(|id| c.id == id))
        .collect();
    if let Some(id) = customer_filter {
        anyhow::ensure!(!selected.is_empty(), "unknown customer '{id}'");
    }

    let mut urls: Vec<&str> = selected
        .iter()
        .filter_map(|c| c.logo_url.as_deref())
        .collect();
    urls.extend(store.dataset().posts.iter().filter_map(|p| {
        let owned = selected.iter().any(|c| {
            Platform::ALL
                .into_iter()
                .any(|platform| c.account_ids(platform).contains(&p.post.account_id))
        });
        if owned {
            p.post.thumbnail_url.as_deref()
        } else {
            None
        }
    }));
    urls.sort_unstable();
    urls.dedup();

    if urls.is_empty() {
        println!("no asset URLs found to verify");
        return Ok(());
    }

    let mut cache = AssetCache::new(Arc::new(build_fetcher(config)?), config.asset_timeout());
    for url in &urls {
        if !cache.fetch(url).await {
            tracing::warn!(url = %url, "asset unavailable");
        }
    }

    let stats = cache.stats();
    println!(
        "verified assets: {} available, {} unavailable",
        stats.available, stats.unavailable
    );
    Ok(())
}
