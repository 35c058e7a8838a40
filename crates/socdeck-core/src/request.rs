use serde::{Deserialize, Serialize};

use crate::period::TargetMonth;
use crate::platform::Platform;
use crate::CoreError;

/// Input shape for one report: which customer, which month, which platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub customer_id: String,
    pub target_month: TargetMonth,
    #[serde(default)]
    pub enabled_platforms: Vec<Platform>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ReportRequest {
    /// Build a request from raw strings, as received from a CLI or HTTP layer.
    ///
    /// Duplicate platforms are collapsed and blank notes become `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] if the customer id is blank, the month is not
    /// `YYYY-MM`, or a platform name is unknown.
    pub fn parse<S: AsRef<str>>(
        customer_id: &str,
        target_month: &str,
        platforms: &[S],
        notes: Option<&str>,
    ) -> Result<Self, CoreError> {
        let customer_id = customer_id.trim();
        if customer_id.is_empty() {
            return Err(CoreError::EmptyCustomerId);
        }
        let target_month = TargetMonth::parse(target_month)?;

        let mut enabled_platforms: Vec<Platform> = Vec::new();
        for raw in platforms {
            let platform = raw.as_ref().parse::<Platform>()?;
            if !enabled_platforms.contains(&platform) {
                enabled_platforms.push(platform);
            }
        }

        let notes = notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(Self {
            customer_id: customer_id.to_string(),
            target_month,
            enabled_platforms,
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_collapses_duplicate_platforms() {
        let req =
            ReportRequest::parse("acme", "2026-09", &["facebook", "fb", "ads"], None).unwrap();
        assert_eq!(req.enabled_platforms, vec![Platform::Facebook, Platform::Ads]);
    }

    #[test]
    fn parse_drops_blank_notes() {
        let req = ReportRequest::parse::<&str>("acme", "2026-09", &[], Some("   ")).unwrap();
        assert!(req.notes.is_none());
    }

    #[test]
    fn parse_rejects_blank_customer() {
        let err = ReportRequest::parse::<&str>("  ", "2026-09", &[], None).unwrap_err();
        assert_eq!(err, CoreError::EmptyCustomerId);
    }

    #[test]
    fn parse_rejects_unknown_platform() {
        let err = ReportRequest::parse("acme", "2026-09", &["tiktok"], None).unwrap_err();
        assert!(matches!(err, CoreError::UnknownPlatform(_)));
    }

    #[test]
    fn deserializes_external_json_shape() {
        let json = serde_json::json!({
            "customerId": "acme",
            "targetMonth": "2026-09",
            "enabledPlatforms": ["facebook", "instagram"],
            "notes": "Campaign launch month"
        });
        let req: ReportRequest = serde_json::from_value(json).unwrap();
        assert_eq!(req.customer_id, "acme");
        assert_eq!(req.target_month.to_string(), "2026-09");
        assert_eq!(
            req.enabled_platforms,
            vec![Platform::Facebook, Platform::Instagram]
        );
        assert_eq!(req.notes.as_deref(), Some("Campaign launch month"));
    }
}
