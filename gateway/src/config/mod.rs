use std::str::FromStr;
use std::time::Duration;

use crate::constants::env;
use crate::error::{GatewayError, Result};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_MAX_PAYLOAD_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub connection_url: String,
    pub database_name: String,
    pub collection_name: String,
    pub secret_key: String,
    pub server_host: String,
    pub server_port: u16,
    pub connect_timeout: Duration,
    pub max_payload_bytes: usize,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, so callers other than
    /// the process environment (tests, embedding) can supply values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| GatewayError::Config(format!("{} is not set", key)))
        };

        let connect_timeout_ms =
            parse_or(&lookup, env::CONNECT_TIMEOUT_MS, DEFAULT_CONNECT_TIMEOUT_MS)?;

        Ok(Self {
            connection_url: required(env::MONGODB_CONNECTION_URL)?,
            database_name: required(env::DATABASE_NAME)?,
            collection_name: required(env::COLLECTION_NAME)?,
            secret_key: required(env::SECRET_KEY)?,
            server_host: lookup(env::SERVER_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            server_port: parse_or(&lookup, env::SERVER_PORT, DEFAULT_PORT)?,
            connect_timeout: Duration::from_millis(connect_timeout_ms),
            max_payload_bytes: parse_or(&lookup, env::MAX_PAYLOAD_BYTES, DEFAULT_MAX_PAYLOAD_BYTES)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| GatewayError::Config(format!("Invalid value for {}: {}", key, e))),
        None => Ok(default),
    }
}
