//! Application configuration loaded from environment variables.

use std::collections::{BTreeMap, HashMap};
use std::env;

use anyhow::Context;

use scribe_core::domain::ReadTimePolicy;
use scribe_infra::JwtConfig;
#[cfg(feature = "postgres")]
use scribe_infra::database::{DatabaseConfig, SecondaryDbConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    pub read_time: ReadTimePolicy,
    /// Category → interests, seeding the in-memory catalog.
    pub interest_catalog: BTreeMap<String, Vec<String>>,
    /// Path prefixes served without a bearer token.
    pub token_validation_ignore_urls: Vec<String>,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        #[allow(unused_mut)]
        let mut config = Self::from_lookup(|key| env::var(key).ok())?;

        #[cfg(feature = "postgres")]
        {
            config.database = env::var("DATABASE_URL").ok().map(|main_url| DatabaseConfig {
                main_url,
                main_max_connections: parse_or(env::var("DB_MAX_CONNECTIONS").ok(), 100),
                main_min_connections: parse_or(env::var("DB_MIN_CONNECTIONS").ok(), 10),
                secondary_databases: Self::parse_secondary_databases(),
            });
        }

        Ok(config)
    }

    /// Build configuration from a key lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let interest_minimums: HashMap<String, u32> = match get("CONTENT_READ_TIME_CONFIG") {
            Some(raw) => serde_json::from_str(&raw)
                .context("CONTENT_READ_TIME_CONFIG must be a JSON object of interest -> seconds")?,
            None => HashMap::new(),
        };

        let global_minimum = match get("MINIMUM_POST_READ_TIME") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("MINIMUM_POST_READ_TIME is not a number: {raw:?}"))?,
            None => 0,
        };

        let interest_catalog = match get("INTEREST_CATALOG") {
            Some(raw) => serde_json::from_str(&raw)
                .context("INTEREST_CATALOG must be a JSON object of category -> [interest]")?,
            None => BTreeMap::new(),
        };

        let token_validation_ignore_urls = get("TOKEN_VALIDATION_IGNORE_URLS")
            .unwrap_or_else(|| "/health".to_string())
            .split(',')
            .map(str::trim)
            .filter(|prefix| !prefix.is_empty())
            .map(String::from)
            .collect();

        let defaults = JwtConfig::default();
        let jwt = JwtConfig {
            secret: get("JWT_SECRET").unwrap_or(defaults.secret),
            expiration_hours: parse_or(get("JWT_EXPIRATION_HOURS"), defaults.expiration_hours),
            issuer: get("JWT_ISSUER").unwrap_or(defaults.issuer),
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(get("PORT"), 8080),
            #[cfg(feature = "postgres")]
            database: None,
            read_time: ReadTimePolicy::new(interest_minimums, global_minimum),
            interest_catalog,
            token_validation_ignore_urls,
            jwt,
        })
    }

    /// Parse secondary databases from environment.
    /// Format: SECONDARY_DB_<NAME>=<URL>,<MAX_CONNECTIONS>
    /// Example: SECONDARY_DB_CATALOG=postgres://...,20
    #[cfg(feature = "postgres")]
    fn parse_secondary_databases() -> Vec<SecondaryDbConfig> {
        let mut secondary = Vec::new();

        for (key, value) in env::vars() {
            if let Some(name) = key.strip_prefix("SECONDARY_DB_") {
                let parts: Vec<&str> = value.splitn(2, ',').collect();
                if let Some(url) = parts.first() {
                    secondary.push(SecondaryDbConfig {
                        name: name.to_lowercase(),
                        url: url.to_string(),
                        max_connections: parse_or(parts.get(1).map(|s| s.to_string()), 20),
                    });
                }
            }
        }

        secondary
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}
