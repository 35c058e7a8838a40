//! Fixtures for module unit tests.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use socdeck_assets::{AssetCache, AssetError, AssetFetcher};
use socdeck_core::{
    AdsMonthlySummary, BrandColors, CampaignSummary, ContactDetails, Customer, Platform,
    PlatformAccounts, PostMetrics, PostRecord, PostType, TargetMonth,
};

use crate::context::RenderContext;
use crate::kpi::{rank_posts, summarize_month, AdsWindow, SocialData};
use crate::types::ReportSettings;

pub const LOGO_URL: &str = "https://cdn.example.com/logo.png";

pub struct PngFetcher;

#[async_trait]
impl AssetFetcher for PngFetcher {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, AssetError> {
        if url.contains("broken") {
            return Err(AssetError::UnsupportedUrl(url.to_string()));
        }
        Ok(png_bytes())
    }
}

pub fn png_bytes() -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image::RgbImage::from_pixel(4, 2, image::Rgb([200, 30, 30]))
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

pub fn month() -> TargetMonth {
    TargetMonth::parse("2026-09").unwrap()
}

pub fn customer() -> Customer {
    Customer {
        id: "nordlicht-bakery".to_string(),
        name: "Nordlicht Bakery".to_string(),
        colors: BrandColors {
            primary: "#E4572E".to_string(),
            secondary: Some("#29335C".to_string()),
        },
        logo_url: None,
        accounts: PlatformAccounts {
            facebook: vec!["fb-1001".to_string()],
            instagram: vec!["ig-2001".to_string()],
            ads: vec!["act_3001".to_string()],
        },
        platforms: Platform::ALL.to_vec(),
        contact: ContactDetails {
            name: Some("Jana Berg".to_string()),
            email: Some("jana@nordlicht.example".to_string()),
            phone: None,
            website: Some("https://nordlicht.example".to_string()),
        },
    }
}

pub fn post(
    platform: Platform,
    id: &str,
    day: u32,
    reactions: u64,
    thumbnail: Option<&str>,
) -> PostRecord {
    PostRecord {
        id: id.to_string(),
        platform,
        account_id: "acc".to_string(),
        created_at: format!("2026-09-{day:02}T12:00:00Z").parse().unwrap(),
        post_type: PostType::Image,
        permalink: None,
        message: Some(format!("Post {id} about fresh bread")),
        thumbnail_url: thumbnail.map(str::to_string),
        metrics: PostMetrics {
            reactions,
            comments: 4,
            shares: 2,
            saves: 3,
            reach: reactions * 20,
            impressions: reactions * 30,
            video_views: 0,
        },
    }
}

/// Three months of data; the target month holds `posts`.
pub fn social(platform: Platform, mut posts: Vec<PostRecord>) -> SocialData {
    let [m0, m1, m2] = month().window();
    let older = [post(platform, "old", 1, 40, None)];
    let window = [
        summarize_month(platform, m0, &older, Some(900), Some(880)),
        summarize_month(platform, m1, &older, Some(950), Some(900)),
        summarize_month(platform, m2, &posts, Some(1_000), Some(950)),
    ];
    rank_posts(&mut posts);
    SocialData {
        platform,
        window,
        saves: [3, 3, posts.iter().map(|p| p.metrics.saves).sum()],
        posts,
    }
}

pub fn empty_social(platform: Platform) -> SocialData {
    let window = month().window();
    SocialData {
        platform,
        window: window.map(|m| summarize_month(platform, m, &[], None, None)),
        saves: [0; 3],
        posts: Vec::new(),
    }
}

pub fn ads_window() -> AdsWindow {
    let [m0, m1, m2] = month().window();
    let summary = |month: TargetMonth, spend: i64, clicks: u64| AdsMonthlySummary {
        spend: Decimal::new(spend, 2),
        impressions: 20_000,
        clicks,
        reach: 12_000,
        campaigns: vec![
            CampaignSummary {
                id: "c1".to_string(),
                name: "Autumn bread".to_string(),
                objective: Some("traffic".to_string()),
                status: Some("active".to_string()),
                spend: Decimal::new(spend / 2, 2),
                impressions: 10_000,
                clicks: clicks / 2,
                reach: 6_000,
                results: 12,
            },
            CampaignSummary {
                id: "c2".to_string(),
                name: "Store opening".to_string(),
                objective: None,
                status: None,
                spend: Decimal::new(spend / 2, 2),
                impressions: 10_000,
                clicks: clicks / 2,
                reach: 6_000,
                results: 3,
            },
        ],
        ..AdsMonthlySummary::empty(month, "EUR")
    };
    [Some(summary(m0, 30_000, 200)), None, Some(summary(m2, 45_050, 300))]
}

fn settings() -> ReportSettings {
    ReportSettings {
        asset_timeout: Duration::from_secs(1),
        ..ReportSettings::default()
    }
}

/// A context with data for the given platforms; `Platform::Ads` gets [`ads_window`].
pub fn context(platforms: &[Platform]) -> RenderContext {
    let cache = AssetCache::new(Arc::new(PngFetcher), Duration::from_secs(1));
    let mut ctx = RenderContext::new(customer(), month(), cache, settings());
    for &platform in platforms {
        ctx = if platform.is_social() {
            ctx.with_social(social(
                platform,
                vec![
                    post(platform, "a", 3, 120, Some("https://cdn.example.com/a.png")),
                    post(platform, "b", 9, 300, Some("https://cdn.example.com/broken.png")),
                    post(platform, "c", 14, 80, None),
                ],
            ))
        } else {
            ctx.with_ads(ads_window())
        };
    }
    ctx
}

pub async fn logo_context() -> RenderContext {
    let mut ctx = context(&[]);
    ctx.customer.logo_url = Some(LOGO_URL.to_string());
    assert!(ctx.assets.fetch(LOGO_URL).await);
    ctx
}
