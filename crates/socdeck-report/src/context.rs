//! Per-report state shared by every slide module.

use socdeck_assets::AssetCache;
use socdeck_core::{Customer, Platform, TargetMonth};

use crate::kpi::{AdsWindow, SocialData};
use crate::layout::readable_text_color;
use crate::types::ReportSettings;

/// Resolved brand colors as uppercase `RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
}

impl Palette {
    #[must_use]
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            primary: customer.primary_color(),
            secondary: customer.secondary_color(),
        }
    }

    /// Text color that stays legible on the primary color.
    #[must_use]
    pub fn on_primary(&self) -> &'static str {
        readable_text_color(&self.primary)
    }

    #[must_use]
    pub fn on_secondary(&self) -> &'static str {
        readable_text_color(&self.secondary)
    }
}

/// Monotonic page numbers for one report. Starts at 1 and never rewinds.
#[derive(Debug, Default)]
pub struct PageCounter {
    last: u32,
}

impl PageCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next page number.
    pub fn next_page(&mut self) -> u32 {
        self.last += 1;
        self.last
    }

    /// The most recently claimed page number, 0 before the first slide.
    #[must_use]
    pub fn current(&self) -> u32 {
        self.last
    }
}

/// Everything a slide module may read while rendering, plus the page counter.
///
/// Built once per report by the composer after aggregation and asset
/// prefetching; dropped when the document has been serialized.
pub struct RenderContext {
    pub customer: Customer,
    pub month: TargetMonth,
    pub palette: Palette,
    /// Enabled platforms in canonical order.
    pub platforms: Vec<Platform>,
    pub social: Vec<SocialData>,
    pub ads: Option<AdsWindow>,
    pub assets: AssetCache,
    pub pages: PageCounter,
    pub notes: Option<String>,
    pub settings: ReportSettings,
}

impl RenderContext {
    #[must_use]
    pub fn new(
        customer: Customer,
        month: TargetMonth,
        assets: AssetCache,
        settings: ReportSettings,
    ) -> Self {
        Self {
            palette: Palette::from_customer(&customer),
            customer,
            month,
            platforms: Vec::new(),
            social: Vec::new(),
            ads: None,
            assets,
            pages: PageCounter::new(),
            notes: None,
            settings,
        }
    }

    /// Register aggregated data for an enabled social platform.
    #[must_use]
    pub fn with_social(mut self, data: SocialData) -> Self {
        self.enable(data.platform);
        self.social.push(data);
        self
    }

    #[must_use]
    pub fn with_ads(mut self, window: AdsWindow) -> Self {
        self.enable(Platform::Ads);
        self.ads = Some(window);
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    fn enable(&mut self, platform: Platform) {
        if !self.platforms.contains(&platform) {
            self.platforms.push(platform);
            self.platforms
                .sort_by_key(|p| Platform::ALL.iter().position(|a| a == p));
        }
    }

    #[must_use]
    pub fn is_enabled(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }

    #[must_use]
    pub fn social_data(&self, platform: Platform) -> Option<&SocialData> {
        self.social.iter().find(|s| s.platform == platform)
    }

    /// Social data in canonical platform order.
    pub fn social_in_order(&self) -> impl Iterator<Item = &SocialData> {
        self.platforms
            .iter()
            .filter_map(|p| self.social_data(*p))
    }

    #[must_use]
    pub fn month_label(&self) -> String {
        self.month.label()
    }
}
