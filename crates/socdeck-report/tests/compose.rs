//! End-to-end report generation over the in-memory store.

use std::io::{Cursor, Read};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use socdeck_assets::{AssetError, AssetFetcher, HttpAssetFetcher};
use socdeck_core::{
    BrandColors, ContactDetails, Customer, Platform, PlatformAccounts, PostMetrics, PostRecord,
    PostType, ReportRequest, YamlCustomerDirectory,
};
use socdeck_report::{
    Composer, Deck, DocumentBackend, DocumentError, DocumentMeta, ModuleCategory, ModuleError,
    ModuleStatus, PlatformTag, RenderContext, ReportError, ReportSettings, SlideModule, SlideSink,
    PPTX_CONTENT_TYPE, REGISTRY,
};
use socdeck_store::{FollowerSnapshot, MemoryStore};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct OfflineFetcher;

#[async_trait]
impl AssetFetcher for OfflineFetcher {
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, AssetError> {
        Err(AssetError::UnsupportedUrl(url.to_string()))
    }
}

fn customer(platforms: &[Platform], logo_url: Option<String>) -> Customer {
    Customer {
        id: "harbor-fitness".to_string(),
        name: "Harbor Fitness".to_string(),
        colors: BrandColors {
            primary: "#0B7A75".to_string(),
            secondary: None,
        },
        logo_url,
        accounts: PlatformAccounts {
            facebook: vec!["fb-1101".to_string()],
            instagram: vec!["ig-1201".to_string()],
            ads: Vec::new(),
        },
        platforms: platforms.to_vec(),
        contact: ContactDetails {
            email: Some("hello@harbor.example".to_string()),
            ..ContactDetails::default()
        },
    }
}

fn post(
    platform: Platform,
    id: &str,
    created: &str,
    reactions: u64,
    thumbnail: Option<String>,
) -> PostRecord {
    PostRecord {
        id: id.to_string(),
        platform,
        account_id: match platform {
            Platform::Instagram => "ig-1201".to_string(),
            _ => "fb-1101".to_string(),
        },
        created_at: created.parse().unwrap(),
        post_type: PostType::Image,
        permalink: None,
        message: Some(format!("{id} caption")),
        thumbnail_url: thumbnail,
        metrics: PostMetrics {
            reactions,
            comments: 3,
            shares: 1,
            saves: 2,
            reach: reactions * 10,
            impressions: reactions * 12,
            video_views: 0,
        },
    }
}

/// Three months of Facebook and Instagram data ending September 2026.
fn store(thumbnail_base: Option<&str>) -> MemoryStore {
    let thumb = |name: &str| thumbnail_base.map(|base| format!("{base}/{name}"));
    let mut store = MemoryStore::default();
    for (platform, prefix) in [(Platform::Facebook, "fb"), (Platform::Instagram, "ig")] {
        let posts = [
            ("jul", "2026-07-10T09:00:00Z", 50, None),
            ("aug", "2026-08-10T09:00:00Z", 80, None),
            ("sep-1", "2026-09-03T09:00:00Z", 120, thumb("one.png")),
            ("sep-2", "2026-09-17T09:00:00Z", 90, thumb("one.png")),
            ("sep-3", "2026-09-25T09:00:00Z", 60, thumb("missing.png")),
        ];
        for (suffix, created, reactions, thumbnail) in posts {
            let id = format!("{prefix}-{suffix}");
            store.push_post(post(platform, &id, created, reactions, thumbnail));
        }
        let account = if platform == Platform::Facebook {
            "fb-1101"
        } else {
            "ig-1201"
        };
        let snapshots = [
            ("2026-06-30", 1_000),
            ("2026-07-31", 1_040),
            ("2026-08-31", 1_100),
            ("2026-09-30", 1_180),
        ];
        for (date, followers) in snapshots {
            store.push_follower_snapshot(FollowerSnapshot {
                platform,
                account_id: account.to_string(),
                date: date.parse().unwrap(),
                followers,
            });
        }
    }
    store
}

fn composer(customer: Customer, store: MemoryStore, fetcher: Arc<dyn AssetFetcher>) -> Composer {
    let store = Arc::new(store);
    Composer::new(
        Arc::new(YamlCustomerDirectory::from_customers(vec![customer])),
        store.clone(),
        store,
        fetcher,
        ReportSettings {
            query_timeout: Duration::from_secs(5),
            asset_timeout: Duration::from_secs(5),
            top_posts: 6,
        },
    )
}

/// Facebook-only customer, no thumbnails, no network.
fn facebook_composer() -> Composer {
    composer(
        customer(&[Platform::Facebook], None),
        store(None),
        Arc::new(OfflineFetcher),
    )
}

fn request(platforms: &[&str]) -> ReportRequest {
    ReportRequest::parse("harbor-fitness", "2026-09", platforms, None).unwrap()
}

fn entry(bytes: &[u8], name: &str) -> Option<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).ok()?;
    let mut out = String::new();
    file.read_to_string(&mut out).unwrap();
    Some(out)
}

fn entry_names(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive.file_names().map(str::to_string).collect()
}

fn rendered(modules: &[socdeck_report::ModuleOutcome]) -> Vec<&'static str> {
    modules
        .iter()
        .filter(|m| m.status == ModuleStatus::Rendered)
        .map(|m| m.module)
        .collect()
}

#[tokio::test]
async fn facebook_only_customer_gets_facebook_sections() {
    let composer = facebook_composer();
    let report = composer.compose(&request(&[])).await.unwrap();

    assert_eq!(report.filename, "harbor-fitness_2026-09.pptx");
    assert_eq!(report.content_type, PPTX_CONTENT_TYPE);
    assert_eq!(
        rendered(&report.modules),
        vec![
            "cover",
            "summary",
            "facebook-divider",
            "facebook-kpi",
            "facebook-charts",
            "facebook-content",
            "contact"
        ]
    );
    assert_eq!(report.slide_count, 7);

    let kpi_slide = entry(&report.bytes, "ppt/slides/slide4.xml").unwrap();
    assert!(kpi_slide.contains("Facebook KPIs"));
    assert!(kpi_slide.contains("Shares (limited)"));
    for n in 1..=7 {
        let slide = entry(&report.bytes, &format!("ppt/slides/slide{n}.xml")).unwrap();
        assert!(!slide.contains("Instagram"), "slide {n} mentions Instagram");
    }
}

#[tokio::test]
async fn request_platforms_narrow_customer_platforms() {
    let composer = composer(
        customer(&[Platform::Facebook, Platform::Instagram], None),
        store(None),
        Arc::new(OfflineFetcher),
    );
    let report = composer.compose(&request(&["instagram", "ads"])).await.unwrap();
    let ids = rendered(&report.modules);
    assert!(ids.contains(&"instagram-kpi"));
    assert!(!ids.iter().any(|id| id.starts_with("facebook") || id.starts_with("ads")));
}

#[tokio::test]
async fn zero_posts_still_produce_a_valid_document() {
    let composer = composer(
        customer(&[Platform::Facebook, Platform::Instagram], None),
        MemoryStore::default(),
        Arc::new(OfflineFetcher),
    );
    let report = composer.compose(&request(&[])).await.unwrap();

    assert!(!report.bytes.is_empty());
    assert_eq!(report.skipped_modules().count(), 0);
    let names = entry_names(&report.bytes);
    assert!(names.contains(&"[Content_Types].xml".to_string()));
    assert!(names.contains(&"ppt/presentation.xml".to_string()));
    let slides = names.iter().filter(|n| n.starts_with("ppt/slides/slide")).count();
    assert_eq!(slides, report.slide_count);

    let kpi_slide = entry(&report.bytes, "ppt/slides/slide4.xml").unwrap();
    assert!(kpi_slide.contains("No data for this period"));
}

#[tokio::test]
async fn identical_inputs_give_identical_bytes() {
    let composer = composer(
        customer(&[Platform::Facebook, Platform::Instagram], None),
        store(None),
        Arc::new(OfflineFetcher),
    );
    let first = composer.compose(&request(&[])).await.unwrap();
    let second = composer.compose(&request(&[])).await.unwrap();
    assert_ne!(first.report_id, second.report_id);
    assert_eq!(first.bytes, second.bytes);
}

#[tokio::test]
async fn registry_declaration_order_does_not_change_output() {
    let reversed: &'static [SlideModule] =
        Box::leak(REGISTRY.iter().rev().copied().collect::<Vec<_>>().into_boxed_slice());
    let build = || {
        composer(
            customer(&[Platform::Facebook, Platform::Instagram], None),
            store(None),
            Arc::new(OfflineFetcher),
        )
    };
    let normal = build().compose(&request(&[])).await.unwrap();
    let shuffled = build().with_registry(reversed).compose(&request(&[])).await.unwrap();
    assert_eq!(normal.modules, shuffled.modules);
    assert_eq!(normal.bytes, shuffled.bytes);
}

fn title_module(ctx: &mut RenderContext, sink: &mut dyn SlideSink) -> Result<(), ModuleError> {
    ctx.pages.next_page();
    sink.add_slide("Title", None);
    Ok(())
}

fn half_done_module(ctx: &mut RenderContext, sink: &mut dyn SlideSink) -> Result<(), ModuleError> {
    ctx.pages.next_page();
    sink.add_slide("Half done", None);
    Err(ModuleError::Render("chart data malformed".to_string()))
}

fn panicking_module(_: &mut RenderContext, sink: &mut dyn SlideSink) -> Result<(), ModuleError> {
    sink.add_slide("Doomed", None);
    panic!("layout exploded");
}

fn closing_module(ctx: &mut RenderContext, sink: &mut dyn SlideSink) -> Result<(), ModuleError> {
    let page = ctx.pages.next_page();
    sink.add_slide(&format!("Closing {page}"), None);
    Ok(())
}

static FRAGILE_REGISTRY: &[SlideModule] = &[
    SlideModule {
        id: "closing",
        name: "Closing",
        platform: PlatformTag::General,
        category: ModuleCategory::Contact,
        order: 90,
        render: closing_module,
    },
    SlideModule {
        id: "panicking",
        name: "Panicking",
        platform: PlatformTag::General,
        category: ModuleCategory::Kpi,
        order: 30,
        render: panicking_module,
    },
    SlideModule {
        id: "half-done",
        name: "Half done",
        platform: PlatformTag::General,
        category: ModuleCategory::Kpi,
        order: 20,
        render: half_done_module,
    },
    SlideModule {
        id: "title",
        name: "Title",
        platform: PlatformTag::General,
        category: ModuleCategory::Cover,
        order: 0,
        render: title_module,
    },
];

#[tokio::test]
async fn failing_and_panicking_modules_are_isolated() {
    let composer = facebook_composer()
        .with_registry(FRAGILE_REGISTRY);
    let report = composer.compose(&request(&[])).await.unwrap();

    assert_eq!(report.slide_count, 2);
    assert_eq!(rendered(&report.modules), vec!["title", "closing"]);
    let statuses: Vec<&ModuleStatus> = report.modules.iter().map(|m| &m.status).collect();
    assert_eq!(
        statuses[1],
        &ModuleStatus::Failed("render failed: chart data malformed".to_string())
    );
    assert_eq!(statuses[2], &ModuleStatus::Panicked("layout exploded".to_string()));

    // the failed module still consumed page 2
    let closing = entry(&report.bytes, "ppt/slides/slide2.xml").unwrap();
    assert!(closing.contains("Closing 3"));
    assert!(entry(&report.bytes, "ppt/slides/slide3.xml").is_none());
}

#[tokio::test]
async fn unknown_customer_is_rejected_before_rendering() {
    let composer = facebook_composer();
    let request = ReportRequest {
        customer_id: "nobody".to_string(),
        ..request(&[])
    };
    let err = composer.compose(&request).await.unwrap_err();
    assert!(matches!(err, ReportError::CustomerLookup { ref id, .. } if id == "nobody"));
}

struct BrokenBackend;

impl DocumentBackend for BrokenBackend {
    fn content_type(&self) -> &'static str {
        "application/octet-stream"
    }

    fn extension(&self) -> &'static str {
        "bin"
    }

    fn serialize(&self, _: &Deck, _: &DocumentMeta) -> Result<Vec<u8>, DocumentError> {
        Err(DocumentError::Io(std::io::Error::other("disk full")))
    }
}

#[tokio::test]
async fn serialization_failure_is_fatal() {
    let composer = facebook_composer()
        .with_backend(Arc::new(BrokenBackend));
    let err = composer.compose(&request(&[])).await.unwrap_err();
    assert!(matches!(err, ReportError::Document(_)));
}

fn png_bytes() -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image::RgbImage::from_pixel(16, 9, image::Rgb([11, 122, 117]))
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

#[tokio::test]
async fn thumbnails_and_logo_fetched_once_each() {
    let server = MockServer::start().await;
    for asset in ["/logo.png", "/one.png"] {
        Mock::given(method("GET"))
            .and(path(asset))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(png_bytes())
                    .insert_header("content-type", "image/png"),
            )
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher =
        HttpAssetFetcher::new(Duration::from_secs(5), "socdeck-test/0.1", 1 << 20).unwrap();
    let composer = composer(
        customer(
            &[Platform::Facebook, Platform::Instagram],
            Some(format!("{}/logo.png", server.uri())),
        ),
        store(Some(&server.uri())),
        Arc::new(fetcher),
    );
    let report = composer.compose(&request(&[])).await.unwrap();

    // logo and thumbnail share bytes, so one media part serves every image
    let media: Vec<String> = entry_names(&report.bytes)
        .into_iter()
        .filter(|n| n.starts_with("ppt/media/"))
        .collect();
    assert_eq!(media, vec!["ppt/media/image1.png".to_string()]);

    let cover = entry(&report.bytes, "ppt/slides/slide1.xml").unwrap();
    assert!(cover.contains("r:embed"));
    let content = entry(&report.bytes, "ppt/slides/slide6.xml").unwrap();
    assert!(content.contains("Facebook top posts"));
    assert_eq!(content.matches("r:embed").count(), 2);
    assert!(content.contains("fb-sep-3 caption"));
}

#[tokio::test]
async fn month_label_and_notes_reach_the_document() {
    let composer = facebook_composer();
    let request = ReportRequest {
        notes: Some("New studio opened".to_string()),
        ..request(&[])
    };
    let report = composer.compose(&request).await.unwrap();
    let summary = entry(&report.bytes, "ppt/slides/slide2.xml").unwrap();
    assert!(summary.contains("New studio opened"));
    assert!(summary.contains("September 2026"));
}
