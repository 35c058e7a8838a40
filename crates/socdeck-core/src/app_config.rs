use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub customers_path: PathBuf,
    pub dataset_path: PathBuf,
    pub output_dir: PathBuf,
    pub query_timeout_secs: u64,
    pub asset_timeout_secs: u64,
    pub asset_user_agent: String,
    pub asset_max_bytes: usize,
    pub top_posts: usize,
}

impl AppConfig {
    /// Upper bound for a single Metrics Store or Ads Data Source call.
    #[must_use]
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    /// Upper bound for a single asset download.
    #[must_use]
    pub fn asset_timeout(&self) -> Duration {
        Duration::from_secs(self.asset_timeout_secs)
    }
}
