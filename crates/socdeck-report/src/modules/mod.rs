//! The slide module catalog.
//!
//! Every module is a plain function over the shared [`RenderContext`] that
//! appends zero or more slides to a [`SlideSink`]. The registry is a static
//! table; the composer filters it by enabled platform and sorts it by
//! `order`, so the position of an entry in the table carries no meaning.

mod ads;
mod charts;
mod common;
mod contact;
mod content;
mod cover;
mod divider;
mod kpi_table;
mod summary;

use std::fmt;

use socdeck_core::Platform;

use crate::context::RenderContext;
use crate::document::SlideSink;
use crate::error::ModuleError;

pub use common::{NO_DATA_TEXT, SHARES_LIMITED_LABEL};
pub use kpi_table::FACEBOOK_SHARES_MARKED_LIMITED;
pub use summary::FACEBOOK_SUMMARY_INCLUDES_SAVES;

pub type RenderFn = fn(&mut RenderContext, &mut dyn SlideSink) -> Result<(), ModuleError>;

/// Which platform a module reports on. `General` modules always run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformTag {
    General,
    Facebook,
    Instagram,
    Ads,
}

impl PlatformTag {
    #[must_use]
    pub fn platform(self) -> Option<Platform> {
        match self {
            PlatformTag::General => None,
            PlatformTag::Facebook => Some(Platform::Facebook),
            PlatformTag::Instagram => Some(Platform::Instagram),
            PlatformTag::Ads => Some(Platform::Ads),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.platform().map_or("general", Platform::as_str)
    }

    #[must_use]
    pub fn is_enabled(self, enabled: &[Platform]) -> bool {
        self.platform().is_none_or(|p| enabled.contains(&p))
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleCategory {
    Cover,
    Divider,
    Summary,
    Kpi,
    Content,
    Ads,
    Contact,
}

impl ModuleCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleCategory::Cover => "cover",
            ModuleCategory::Divider => "divider",
            ModuleCategory::Summary => "summary",
            ModuleCategory::Kpi => "kpi",
            ModuleCategory::Content => "content",
            ModuleCategory::Ads => "ads",
            ModuleCategory::Contact => "contact",
        }
    }
}

impl fmt::Display for ModuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One catalog entry.
#[derive(Clone, Copy)]
pub struct SlideModule {
    pub id: &'static str,
    pub name: &'static str,
    pub platform: PlatformTag,
    pub category: ModuleCategory,
    pub order: u32,
    pub render: RenderFn,
}

impl fmt::Debug for SlideModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlideModule")
            .field("id", &self.id)
            .field("platform", &self.platform)
            .field("category", &self.category)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

/// Modules whose platform is enabled (or general), ascending by `order`.
///
/// The sort is stable, so equal orders keep their table position.
#[must_use]
pub fn select_modules<'a>(
    registry: &'a [SlideModule],
    enabled: &[Platform],
) -> Vec<&'a SlideModule> {
    let mut selected: Vec<&SlideModule> = registry
        .iter()
        .filter(|m| m.platform.is_enabled(enabled))
        .collect();
    selected.sort_by_key(|m| m.order);
    selected
}

pub static REGISTRY: &[SlideModule] = &[
    SlideModule {
        id: "contact",
        name: "Contact",
        platform: PlatformTag::General,
        category: ModuleCategory::Contact,
        order: 900,
        render: contact::render,
    },
    SlideModule {
        id: "ads-campaigns",
        name: "Ads campaigns",
        platform: PlatformTag::Ads,
        category: ModuleCategory::Ads,
        order: 320,
        render: ads::render_campaigns,
    },
    SlideModule {
        id: "ads-overview",
        name: "Ads overview",
        platform: PlatformTag::Ads,
        category: ModuleCategory::Ads,
        order: 310,
        render: ads::render_overview,
    },
    SlideModule {
        id: "ads-divider",
        name: "Paid advertising",
        platform: PlatformTag::Ads,
        category: ModuleCategory::Divider,
        order: 300,
        render: divider::render_ads,
    },
    SlideModule {
        id: "cover",
        name: "Cover",
        platform: PlatformTag::General,
        category: ModuleCategory::Cover,
        order: 0,
        render: cover::render,
    },
    SlideModule {
        id: "facebook-divider",
        name: "Facebook",
        platform: PlatformTag::Facebook,
        category: ModuleCategory::Divider,
        order: 100,
        render: divider::render_facebook,
    },
    SlideModule {
        id: "facebook-kpi",
        name: "Facebook KPIs",
        platform: PlatformTag::Facebook,
        category: ModuleCategory::Kpi,
        order: 110,
        render: kpi_table::render_facebook,
    },
    SlideModule {
        id: "facebook-charts",
        name: "Facebook trends",
        platform: PlatformTag::Facebook,
        category: ModuleCategory::Kpi,
        order: 120,
        render: charts::render_facebook,
    },
    SlideModule {
        id: "facebook-content",
        name: "Facebook top posts",
        platform: PlatformTag::Facebook,
        category: ModuleCategory::Content,
        order: 130,
        render: content::render_facebook,
    },
    SlideModule {
        id: "summary",
        name: "Executive summary",
        platform: PlatformTag::General,
        category: ModuleCategory::Summary,
        order: 10,
        render: summary::render,
    },
    SlideModule {
        id: "instagram-divider",
        name: "Instagram",
        platform: PlatformTag::Instagram,
        category: ModuleCategory::Divider,
        order: 200,
        render: divider::render_instagram,
    },
    SlideModule {
        id: "instagram-kpi",
        name: "Instagram KPIs",
        platform: PlatformTag::Instagram,
        category: ModuleCategory::Kpi,
        order: 210,
        render: kpi_table::render_instagram,
    },
    SlideModule {
        id: "instagram-charts",
        name: "Instagram trends",
        platform: PlatformTag::Instagram,
        category: ModuleCategory::Kpi,
        order: 220,
        render: charts::render_instagram,
    },
    SlideModule {
        id: "instagram-content",
        name: "Instagram top posts",
        platform: PlatformTag::Instagram,
        category: ModuleCategory::Content,
        order: 230,
        render: content::render_instagram,
    },
];

#[cfg(test)]
mod test_support;
