use crate::app_config::{AppConfig, Environment};
use crate::error::ConfigError;
use crate::image_host::DEFAULT_IMAGE_HOST;

pub const DEFAULT_API_BASE_URL: &str = "https://backend.pinkstories.ae/api/";

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
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let parse_timeout = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        let secs = raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if secs == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(secs)
    };

    let env = parse_environment(&or_default("CATADMIN_ENV", "development"))?;

    let api_base_url = normalize_base_url(
        "CATADMIN_API_BASE_URL",
        &or_default("CATADMIN_API_BASE_URL", DEFAULT_API_BASE_URL),
    )?;
    let image_host = or_default("CATADMIN_IMAGE_HOST", DEFAULT_IMAGE_HOST);
    let log_level = or_default("CATADMIN_LOG_LEVEL", "info");
    let request_timeout_secs = parse_timeout("CATADMIN_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(
        "CATADMIN_USER_AGENT",
        concat!("catadmin/", env!("CARGO_PKG_VERSION")),
    );
    let token = lookup("CATADMIN_TOKEN")
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    Ok(AppConfig {
        env,
        api_base_url,
        image_host,
        log_level,
        request_timeout_secs,
        user_agent,
        token,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CATADMIN_ENV".to_string(),
            reason: format!("unknown environment {other:?}"),
        }),
    }
}

/// Require an http(s) URL and end it with exactly one `/` so relative paths
/// join beneath it.
fn normalize_base_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected an http(s) URL, got {raw:?}"),
        });
    }
    Ok(format!("{trimmed}/"))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
