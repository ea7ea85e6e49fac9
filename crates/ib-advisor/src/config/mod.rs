use crate::notification::{EmailAddress, InvalidEmailAddress};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_SENDER_NAME: &str = "IB Math Advisor";
const DEFAULT_MAILERSEND_BASE_URL: &str = "https://api.mailersend.com";
const DEFAULT_MAIL_TIMEOUT_SECS: u64 = 30;

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
    pub mail: MailConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match env::var("APP_PORT").or_else(|_| env::var("PORT")) {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort)?,
            Err(_) => DEFAULT_PORT,
        };
        let allowed_origin = optional_var("APP_ALLOWED_ORIGIN");

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig {
                host,
                port,
                allowed_origin,
            },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            mail: MailConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Single origin allowed by CORS; any origin when unset.
    pub allowed_origin: Option<String>,
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
    /// Colored output, only wanted on a developer terminal.
    pub ansi: bool,
}

/// MailerSend credentials and sender identity.
#[derive(Clone)]
pub struct MailConfig {
    pub api_key: String,
    pub from_email: EmailAddress,
    pub from_name: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl MailConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key =
            optional_var("MAILERSEND_API_KEY").ok_or(ConfigError::Missing("MAILERSEND_API_KEY"))?;
        let from_email = optional_var("MAILERSEND_FROM_EMAIL")
            .ok_or(ConfigError::Missing("MAILERSEND_FROM_EMAIL"))?;
        let from_email = EmailAddress::parse(&from_email)
            .map_err(|source| ConfigError::InvalidSender { source })?;

        let from_name =
            optional_var("MAILERSEND_FROM_NAME").unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string());
        let base_url = optional_var("MAILERSEND_BASE_URL")
            .unwrap_or_else(|| DEFAULT_MAILERSEND_BASE_URL.to_string());
        let timeout_secs = match optional_var("MAILERSEND_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout)?,
            None => DEFAULT_MAIL_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            from_email,
            from_name,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("api_key", &"<redacted>")
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    Missing(&'static str),
    InvalidSender { source: InvalidEmailAddress },
    InvalidTimeout,
    InvalidOrigin(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::Missing(key) => write!(f, "{key} must be set"),
            ConfigError::InvalidSender { source } => {
                write!(f, "MAILERSEND_FROM_EMAIL is not a valid address: {source}")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "MAILERSEND_TIMEOUT_SECS must be a positive integer")
            }
            ConfigError::InvalidOrigin(origin) => {
                write!(f, "APP_ALLOWED_ORIGIN '{origin}' is not a valid header value")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidSender { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::Missing(_)
            | ConfigError::InvalidTimeout
            | ConfigError::InvalidOrigin(_) => None,
        }
    }
}
