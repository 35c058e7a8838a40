use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A reportable data source. `general` is not a platform; it is a slide tag
/// owned by the report engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
    Ads,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Facebook, Platform::Instagram, Platform::Ads];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Ads => "ads",
        }
    }

    /// Human-readable name used on slides.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
            Platform::Ads => "Paid advertising",
        }
    }

    /// Organic social platforms produce posts and follower counts; ads do not.
    #[must_use]
    pub fn is_social(self) -> bool {
        !matches!(self, Platform::Ads)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "facebook" | "fb" => Ok(Platform::Facebook),
            "instagram" | "ig" => Ok(Platform::Instagram),
            "ads" | "meta_ads" | "meta-ads" => Ok(Platform::Ads),
            _ => Err(CoreError::UnknownPlatform(s.to_string())),
        }
    }
}
