//! Environment-based application configuration.

use std::net::SocketAddr;

use crate::server::error::config::ConfigError;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_RATE_LIMIT_VALIDATE_RPM: u32 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    /// Bearer token required by the admin licence endpoints.
    pub admin_api_key: String,
    pub bind_addr: SocketAddr,

    /// Discord bot is only started when a token is configured.
    pub discord_bot_token: Option<String>,

    /// Take the client IP from `X-Forwarded-For` instead of the TCP peer.
    pub trust_proxy: bool,
    pub rate_limit_validate_rpm: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let require =
            |name: &str| get(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: "BIND_ADDR".to_string(),
                value: bind_addr.clone(),
                reason: e.to_string(),
            })?;

        let trust_proxy = match get("TRUST_PROXY") {
            None => false,
            Some(value) => parse_bool("TRUST_PROXY", &value)?,
        };

        let rate_limit_validate_rpm = match get("RATE_LIMIT_VALIDATE_RPM") {
            None => DEFAULT_RATE_LIMIT_VALIDATE_RPM,
            Some(value) => parse_rpm("RATE_LIMIT_VALIDATE_RPM", &value)?,
        };

        Ok(Self {
            database_url: require("DATABASE_URL")?,
            admin_api_key: require("ADMIN_API_KEY")?,
            bind_addr,
            discord_bot_token: get("DISCORD_BOT_TOKEN"),
            trust_proxy,
            rate_limit_validate_rpm,
        })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

fn parse_rpm(name: &str, value: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
        reason,
    };

    match value.trim().parse::<u32>() {
        Ok(0) => Err(invalid("must be greater than 0".to_string())),
        Ok(rpm) => Ok(rpm),
        Err(e) => Err(invalid(e.to_string())),
    }
}
