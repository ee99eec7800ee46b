pub mod reference;

use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub search: SearchConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            search: SearchConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Defaults applied to every search request plus mock catalog sizing.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub default_country: String,
    pub max_results: usize,
    pub min_match_score: f64,
    pub properties_per_city: usize,
    pub web_listings_enabled: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_country: "Portugal".to_string(),
            max_results: 20,
            min_match_score: 0.5,
            properties_per_city: 30,
            web_listings_enabled: true,
        }
    }
}

impl SearchConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let default_country = env::var("SEARCH_DEFAULT_COUNTRY")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.default_country);

        let max_results = match env::var("SEARCH_MAX_RESULTS") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ConfigError::InvalidMaxResults)?,
            Err(_) => defaults.max_results,
        };

        let min_match_score = match env::var("SEARCH_MIN_MATCH_SCORE") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| (0.0..=1.0).contains(value))
                .ok_or(ConfigError::InvalidMatchScore)?,
            Err(_) => defaults.min_match_score,
        };

        let properties_per_city = match env::var("MOCK_PROPERTIES_PER_CITY") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|value| *value >= 2)
                .ok_or(ConfigError::InvalidPoolSize)?,
            Err(_) => defaults.properties_per_city,
        };

        let web_listings_enabled = env::var("ENABLE_WEB_LISTINGS")
            .map(|raw| parse_flag(&raw))
            .unwrap_or(defaults.web_listings_enabled);

        Ok(Self {
            default_country,
            max_results,
            min_match_score,
            properties_per_city,
            web_listings_enabled,
        })
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMaxResults,
    InvalidMatchScore,
    InvalidPoolSize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMaxResults => {
                write!(f, "SEARCH_MAX_RESULTS must be a positive integer")
            }
            ConfigError::InvalidMatchScore => {
                write!(f, "SEARCH_MIN_MATCH_SCORE must be a number between 0 and 1")
            }
            ConfigError::InvalidPoolSize => {
                write!(f, "MOCK_PROPERTIES_PER_CITY must be an integer of at least 2")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidMaxResults
            | ConfigError::InvalidMatchScore
            | ConfigError::InvalidPoolSize => None,
        }
    }
}
