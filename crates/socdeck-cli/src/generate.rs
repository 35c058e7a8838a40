//! `socdeck generate`: compose one report and write it to disk.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use socdeck_assets::HttpAssetFetcher;
use socdeck_core::{AppConfig, YamlCustomerDirectory};
use socdeck_report::{parse_request, Composer, ReportSettings};
use socdeck_store::MemoryStore;

pub(crate) struct GenerateArgs<'a> {
    pub customer: &'a str,
    pub month: &'a str,
    pub platforms: &'a [String],
    pub notes: Option<&'a str>,
    pub output: Option<&'a Path>,
    pub json: bool,
}

pub(crate) fn build_fetcher(config: &AppConfig) -> anyhow::Result<HttpAssetFetcher> {
    HttpAssetFetcher::new(
        config.asset_timeout(),
        &config.asset_user_agent,
        config.asset_max_bytes,
    )
    .context("failed to build asset HTTP client")
}

pub(crate) fn load_store(config: &AppConfig) -> anyhow::Result<MemoryStore> {
    MemoryStore::from_json_file(&config.dataset_path).with_context(|| {
        format!(
            "failed to load dataset from {}",
            config.dataset_path.display()
        )
    })
}

fn build_composer(config: &AppConfig) -> anyhow::Result<Composer> {
    let directory = YamlCustomerDirectory::from_file(&config.customers_path)?;
    let store = Arc::new(load_store(config)?);
    Ok(Composer::new(
        Arc::new(directory),
        store.clone(),
        store,
        Arc::new(build_fetcher(config)?),
        ReportSettings::from(config),
    ))
}

pub(crate) async fn run_generate(
    config: &AppConfig,
    args: &GenerateArgs<'_>,
) -> anyhow::Result<()> {
    let request = parse_request(args.customer, args.month, args.platforms, args.notes)?;
    let composer = build_composer(config)?;
    let report = composer.compose(&request).await?;

    let dir = args
        .output
        .map_or_else(|| config.output_dir.clone(), Path::to_path_buf);
    tokio::fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    let path = dir.join(&report.filename);
    tokio::fs::write(&path, &report.bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    for skipped in report.skipped_modules() {
        tracing::warn!(module = skipped.module, status = ?skipped.status, "module skipped");
    }
    tracing::info!(path = %path.display(), slides = report.slide_count, "report written");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "wrote {} ({} slides, {} bytes)",
            path.display(),
            report.slide_count,
            report.bytes.len()
        );
    }
    Ok(())
}
