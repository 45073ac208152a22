use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::profile::Jurisdiction;

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

/// Top-level configuration shared by the CLI and the HTTP service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub evaluation: EvaluationDefaults,
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

        let raw_jurisdiction =
            env::var("ABITUR_JURISDICTION").unwrap_or_else(|_| "nrw".to_string());
        let jurisdiction = Jurisdiction::parse(&raw_jurisdiction)
            .filter(|jurisdiction| *jurisdiction != Jurisdiction::General)
            .ok_or(ConfigError::InvalidJurisdiction {
                value: raw_jurisdiction,
            })?;

        let graduation_year = match env::var("ABITUR_GRADUATION_YEAR") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u16>()
                    .map_err(|_| ConfigError::InvalidGraduationYear { value: raw })?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            evaluation: EvaluationDefaults {
                jurisdiction,
                graduation_year,
            },
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

/// Fallbacks for subject-CSV evaluations, which carry no jurisdiction or cohort of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationDefaults {
    pub jurisdiction: Jurisdiction,
    pub graduation_year: Option<u16>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidJurisdiction { value: String },
    InvalidGraduationYear { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidJurisdiction { value } => write!(
                f,
                "ABITUR_JURISDICTION must be 'nrw' or 'bavaria', got '{}'",
                value
            ),
            ConfigError::InvalidGraduationYear { value } => write!(
                f,
                "ABITUR_GRADUATION_YEAR must be a year, got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidJurisdiction { .. }
            | ConfigError::InvalidGraduationYear { .. } => None,
        }
    }
}
