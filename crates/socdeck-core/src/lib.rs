//! Shared domain model, collaborator contracts, and configuration for socdeck.

pub mod app_config;
pub mod collaborators;
pub mod config;
pub mod customers;
pub mod metrics;
pub mod period;
pub mod platform;
pub mod request;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use collaborators::{AdsDataSource, CollaboratorError, CustomerDirectory, MetricsStore};
pub use config::{load_app_config, load_app_config_from_env};
pub use customers::{
    load_customers, parse_hex_color, BrandColors, ContactDetails, Customer, CustomersFile,
    PlatformAccounts, YamlCustomerDirectory,
};
pub use metrics::{
    AdsMonthlySummary, CampaignSummary, KpiWindow, MonthlyKpi, PostMetrics, PostRecord, PostType,
};
pub use period::{MonthRange, TargetMonth};
pub use platform::Platform;
pub use request::ReportRequest;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read customers file {path}: {source}")]
    CustomersFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse customers file: {0}")]
    CustomersFileParse(#[from] serde_yaml::Error),

    #[error("customers validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid month \"{0}\": expected YYYY-MM")]
    InvalidMonth(String),

    #[error("unknown platform \"{0}\": expected facebook, instagram or ads")]
    UnknownPlatform(String),

    #[error("customer id must be non-empty")]
    EmptyCustomerId,
}
