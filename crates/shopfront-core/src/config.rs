use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment, LocalSettings};
use crate::ConfigError;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_DATA_DIR: &str = "./.shopfront";

/// Load application configuration from environment variables already in the process.
///
/// Does not read `.env` files; the binary loads them once at startup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// The settings commands need when they never contact the API. Never fails:
/// every value has a default.
#[must_use]
pub fn load_local_settings_from_env() -> LocalSettings {
    build_local_settings(|key| std::env::var(key))
}

fn build_local_settings<F>(lookup: F) -> LocalSettings
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    LocalSettings {
        log_level: lookup("SHOPFRONT_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
        data_dir: PathBuf::from(
            lookup("SHOPFRONT_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string()),
        ),
    }
}

/// Build application configuration using the provided env-var lookup function.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.is_empty()) };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_url = require("SHOPFRONT_API_URL")?;
    if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPFRONT_API_URL".to_string(),
            reason: format!("expected an http(s) URL, got {api_url}"),
        });
    }
    let api_url = api_url.trim_end_matches('/').to_string();

    let env = parse_environment(&or_default("SHOPFRONT_ENV", "development"))?;
    let LocalSettings {
        log_level,
        data_dir,
    } = build_local_settings(&lookup);

    let request_timeout_secs = parse_u64("SHOPFRONT_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPFRONT_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let user_agent = or_default("SHOPFRONT_USER_AGENT", "shopfront/0.1 (storefront-client)");
    let storefront_origin = or_default("SHOPFRONT_STOREFRONT_ORIGIN", "http://localhost:4200")
        .trim_end_matches('/')
        .to_string();

    Ok(AppConfig {
        api_url,
        env,
        log_level,
        data_dir,
        request_timeout_secs,
        user_agent,
        storefront_origin,
        api_token: optional("SHOPFRONT_API_TOKEN"),
        user_name: optional("SHOPFRONT_USER_NAME"),
        user_email: optional("SHOPFRONT_USER_EMAIL"),
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPFRONT_ENV".to_string(),
            reason: format!("unknown environment {other:?}"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
