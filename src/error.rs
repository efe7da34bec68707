use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// The upstream capability a request was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    NativeBalance,
    TokenHoldings,
    Prices,
    Collectibles,
}

impl Capability {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NativeBalance => "native balance",
            Self::TokenHoldings => "token holdings",
            Self::Prices => "prices",
            Self::Collectibles => "collectibles",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures talking to an upstream data provider.
///
/// Any of these aborts an aggregation; nothing is cached.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("{capability} request failed: {reason}")]
    Request {
        capability: Capability,
        reason: String,
    },

    #[error("{capability} request returned HTTP {status}")]
    Status { capability: Capability, status: u16 },

    #[error("{capability} response malformed: {reason}")]
    Malformed {
        capability: Capability,
        reason: String,
    },

    #[error("upstream deadline of {}ms exceeded", .0.as_millis())]
    Timeout(Duration),
}

impl UpstreamError {
    pub fn request(capability: Capability, reason: impl fmt::Display) -> Self {
        Self::Request {
            capability,
            reason: reason.to_string(),
        }
    }

    pub fn malformed(capability: Capability, reason: impl fmt::Display) -> Self {
        Self::Malformed {
            capability,
            reason: reason.to_string(),
        }
    }

    /// The capability that failed, if the failure is attributable to one.
    #[must_use]
    pub const fn capability(&self) -> Option<Capability> {
        match self {
            Self::Request { capability, .. }
            | Self::Status { capability, .. }
            | Self::Malformed { capability, .. } => Some(*capability),
            Self::Timeout(_) => None,
        }
    }
}

/// Cache store failures. Callers in the core degrade rather than propagate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),

    #[error("cache value could not be (de)serialized: {0}")]
    Serialization(String),
}

/// History store failures.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("history store connection failed: {0}")]
    Connection(String),

    #[error("history query failed: {0}")]
    Query(String),

    #[error("history snapshot could not be (de)serialized: {0}")]
    Serialization(String),
}

/// Malformed input rejected before reaching the core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid address format: {0:?}")]
    InvalidSubject(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
