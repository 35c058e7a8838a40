use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::collaborators::{CollaboratorError, CustomerDirectory};
use crate::platform::Platform;
use crate::ConfigError;

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([0-9A-Fa-f]{6})$").expect("valid hex color regex"));

/// Secondary color used when a customer only configures a primary color.
pub const DEFAULT_SECONDARY_COLOR: &str = "1F2933";

/// Normalize a `#RRGGBB` / `RRGGBB` color to uppercase `RRGGBB`.
#[must_use]
pub fn parse_hex_color(raw: &str) -> Option<String> {
    HEX_COLOR_RE
        .captures(raw.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_ascii_uppercase())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandColors {
    pub primary: String,
    #[serde(default)]
    pub secondary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformAccounts {
    pub facebook: Vec<String>,
    pub instagram: Vec<String>,
    pub ads: Vec<String>,
}

impl PlatformAccounts {
    #[must_use]
    pub fn for_platform(&self, platform: Platform) -> &[String] {
        match platform {
            Platform::Facebook => &self.facebook,
            Platform::Instagram => &self.instagram,
            Platform::Ads => &self.ads,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDetails {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

impl ContactDetails {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.website.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub colors: BrandColors,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub accounts: PlatformAccounts,
    /// Platforms this customer has reporting enabled for.
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub contact: ContactDetails,
}

impl Customer {
    /// Generate a URL-safe slug from the customer name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' || c == '_' || c == '.' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }

    #[must_use]
    pub fn is_enabled(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }

    #[must_use]
    pub fn account_ids(&self, platform: Platform) -> &[String] {
        self.accounts.for_platform(platform)
    }

    /// Primary brand color as uppercase `RRGGBB`.
    ///
    /// Directory validation guarantees the value parses; an unparseable value
    /// falls back to the default dark color.
    #[must_use]
    pub fn primary_color(&self) -> String {
        parse_hex_color(&self.colors.primary)
            .unwrap_or_else(|| DEFAULT_SECONDARY_COLOR.to_string())
    }

    /// Secondary brand color as uppercase `RRGGBB`, defaulting to a neutral dark tone.
    #[must_use]
    pub fn secondary_color(&self) -> String {
        self.colors
            .secondary
            .as_deref()
            .and_then(parse_hex_color)
            .unwrap_or_else(|| DEFAULT_SECONDARY_COLOR.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct CustomersFile {
    pub customers: Vec<Customer>,
}

/// Load and validate the customer directory from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_customers(path: &Path) -> Result<CustomersFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CustomersFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let customers_file: CustomersFile =
        serde_yaml::from_str(&content).map_err(ConfigError::CustomersFileParse)?;

    validate_customers(&customers_file)?;

    Ok(customers_file)
}

fn validate_customers(customers_file: &CustomersFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();

    for customer in &customers_file.customers {
        if customer.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "customer id must be non-empty".to_string(),
            ));
        }

        if customer.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "customer '{}' must have a non-empty name",
                customer.id
            )));
        }

        if !seen_ids.insert(customer.id.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate customer id: '{}'",
                customer.id
            )));
        }

        if !seen_names.insert(customer.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate customer name: '{}'",
                customer.name
            )));
        }

        let slug = customer.slug();
        if slug.is_empty() {
            return Err(ConfigError::Validation(format!(
                "customer '{}' produces an empty slug",
                customer.name
            )));
        }
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate customer slug: '{}' (from customer '{}')",
                slug, customer.name
            )));
        }

        if parse_hex_color(&customer.colors.primary).is_none() {
            return Err(ConfigError::Validation(format!(
                "customer '{}' has invalid primary color '{}'",
                customer.id, customer.colors.primary
            )));
        }
        if let Some(secondary) = &customer.colors.secondary {
            if parse_hex_color(secondary).is_none() {
                return Err(ConfigError::Validation(format!(
                    "customer '{}' has invalid secondary color '{secondary}'",
                    customer.id
                )));
            }
        }
    }

    Ok(())
}

/// Customer Directory backed by a validated YAML file, held in memory.
#[derive(Debug, Clone, Default)]
pub struct YamlCustomerDirectory {
    customers: HashMap<String, Customer>,
}

impl YamlCustomerDirectory {
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be loaded or fails validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = load_customers(path)?;
        Ok(Self::from_customers(file.customers))
    }

    #[must_use]
    pub fn from_customers(customers: Vec<Customer>) -> Self {
        Self {
            customers: customers.into_iter().map(|c| (c.id.clone(), c)).collect(),
        }
    }

    /// Customer ids in sorted order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.customers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

#[async_trait]
impl CustomerDirectory for YamlCustomerDirectory {
    async fn get_customer(&self, id: &str) -> Result<Customer, CollaboratorError> {
        self.customers
            .get(id)
            .cloned()
            .ok_or_else(|| CollaboratorError::NotFound(format!("customer '{id}'")))
    }
}

#[cfg(test)]
#[path = "customers_test.rs"]
mod tests;
