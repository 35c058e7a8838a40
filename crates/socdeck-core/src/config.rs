use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Largest accepted value for `SOCDECK_TOP_POSTS`; a content slide grid holds at most 12 cards.
const MAX_TOP_POSTS: usize = 12;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the process environment so they
/// can be tested with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let positive = |var: &str, value: u64| -> Result<u64, ConfigError> {
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("SOCDECK_ENV", "development"))?;
    let log_level = or_default("SOCDECK_LOG_LEVEL", "info");
    let customers_path = PathBuf::from(or_default(
        "SOCDECK_CUSTOMERS_PATH",
        "./config/customers.yaml",
    ));
    let dataset_path = PathBuf::from(or_default("SOCDECK_DATASET_PATH", "./data/metrics.json"));
    let output_dir = PathBuf::from(or_default("SOCDECK_OUTPUT_DIR", "./out"));

    let query_timeout_secs = positive(
        "SOCDECK_QUERY_TIMEOUT_SECS",
        parse_u64("SOCDECK_QUERY_TIMEOUT_SECS", "20")?,
    )?;
    let asset_timeout_secs = positive(
        "SOCDECK_ASSET_TIMEOUT_SECS",
        parse_u64("SOCDECK_ASSET_TIMEOUT_SECS", "10")?,
    )?;
    let asset_user_agent = or_default("SOCDECK_ASSET_USER_AGENT", "socdeck/0.1 (report-assets)");
    let asset_max_bytes = parse_usize("SOCDECK_ASSET_MAX_BYTES", "8388608")?;

    let top_posts = parse_usize("SOCDECK_TOP_POSTS", "6")?;
    if !(1..=MAX_TOP_POSTS).contains(&top_posts) {
        return Err(ConfigError::InvalidEnvVar {
            var: "SOCDECK_TOP_POSTS".to_string(),
            reason: format!("must be between 1 and {MAX_TOP_POSTS}, got {top_posts}"),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        customers_path,
        dataset_path,
        output_dir,
        query_timeout_secs,
        asset_timeout_secs,
        asset_user_agent,
        asset_max_bytes,
        top_posts,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SOCDECK_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
