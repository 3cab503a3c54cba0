use thiserror::Error;

// Raised while turning a ParameterMap into a request tree. Nothing has been
// sent when one of these comes back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("Unrecognized {kind} `{value}` in field `{field}`")]
    UnknownCode {
        field: String,
        kind: &'static str,
        value: String,
    },

    #[error("Invalid value for `{field}`: expected {expected}")]
    InvalidValue {
        field: String,
        expected: &'static str,
    },

    #[error("Incomplete {group} group: missing {}", .missing.join(", "))]
    IncompleteGroup {
        group: &'static str,
        missing: Vec<&'static str>,
    },

    #[error("Invalid parameter map: {0}")]
    InvalidParameters(String),

    #[error("Request encoding error: {0}")]
    Encoding(String),
}

impl MappingError {
    pub(crate) fn invalid(field: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidValue {
            field: field.into(),
            expected,
        }
    }

    /// The parameter key or group the error points at, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnknownCode { field, .. } | Self::InvalidValue { field, .. } => Some(field),
            Self::IncompleteGroup { group, .. } => Some(group),
            Self::InvalidParameters(_) | Self::Encoding(_) => None,
        }
    }
}

// Problems detectable before any message leaves the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Invalid time zone offset: {0} seconds")]
    InvalidTimeZone(i32),

    #[error("Configuration parse error: {0}")]
    Parse(String),

    #[error("Session could not be established: {0}")]
    Session(String),
}

/// Failures the facade surfaces to the caller instead of collapsing them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
