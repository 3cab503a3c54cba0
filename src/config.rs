// Connector configuration and the credential context
use std::fmt;
use std::time::Duration;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_MESSAGE_VERSION: &str = "1.0";

/// Which CRS environment a message is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Target {
    #[default]
    Production,
    Test,
}

impl Target {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "Production",
            Self::Test => "Test",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectorConfig {
    pub endpoint: String,
    #[serde(default)]
    pub target: Target,
    /// Offset of the fixed protocol time zone used for message timestamps.
    #[serde(default)]
    pub utc_offset_seconds: i32,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub capture_exchanges: bool,
    #[serde(default = "default_message_version")]
    pub message_version: String,
}

fn default_message_version() -> String {
    DEFAULT_MESSAGE_VERSION.to_string()
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            target: Target::default(),
            utc_offset_seconds: 0,
            timeout_ms: None,
            capture_exchanges: false,
            message_version: default_message_version(),
        }
    }
}

impl ConnectorConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        let rest = endpoint
            .strip_prefix("https://")
            .or_else(|| endpoint.strip_prefix("http://"));
        match rest {
            Some(host) if !host.is_empty() && !host.starts_with('/') => {}
            _ => return Err(ConfigError::InvalidEndpoint(self.endpoint.clone())),
        }

        if self.message_version.trim().is_empty() {
            return Err(ConfigError::Parse("message_version is empty".to_string()));
        }

        self.time_zone().map(|_| ())
    }

    pub fn time_zone(&self) -> Result<FixedOffset, ConfigError> {
        FixedOffset::east_opt(self.utc_offset_seconds)
            .ok_or(ConfigError::InvalidTimeZone(self.utc_offset_seconds))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Point-of-sale identifiers used when a request does not supply its own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PointOfSale {
    pub requestor_id: Option<String>,
    pub id_context: Option<String>,
    pub company_code: Option<String>,
    pub booking_channel_type: Option<String>,
}

/// Identity stamped on every outbound message. Read-only once the connector owns it.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Credentials {
    pub system_id: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub pos: PointOfSale,
}

impl Credentials {
    pub fn new(
        system_id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            system_id: system_id.into(),
            username: username.into(),
            password: password.into(),
            pos: PointOfSale::default(),
        }
    }

    #[must_use]
    pub fn with_pos(mut self, pos: PointOfSale) -> Self {
        self.pos = pos;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::InvalidCredentials(
                "username is empty".to_string(),
            ));
        }
        if self.password.is_empty() {
            return Err(ConfigError::InvalidCredentials(
                "password is empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("system_id", &self.system_id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("pos", &self.pos)
            .finish()
    }
}
