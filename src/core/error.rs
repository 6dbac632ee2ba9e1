use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewStateError {
    #[error("Malformed parameter token: {0}")]
    Decode(String),

    #[error("Index {index} out of range for {len} filter items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Duplicate query name: {0}")]
    DuplicateQueryName(String),

    #[error("Formula '{formula}' references unknown query '{reference}'")]
    UnknownQueryReference { formula: String, reference: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Async task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Channel send error")]
    ChannelSend,
}

/// Result type alias for viewstate operations
pub type Result<T> = std::result::Result<T, ViewStateError>;

impl ViewStateError {
    /// Creates a new decode error
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Self::Decode(msg.into())
    }

    /// Creates a new persistence error
    pub fn persistence<S: Into<String>>(msg: S) -> Self {
        Self::Persistence(msg.into())
    }

    /// Creates a new validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Returns true if this error is recovered locally with a safe default
    /// instead of being surfaced to the user.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Decode(_) => true,
            Self::Serialization(_) => true,
            Self::Persistence(_) => false,
            Self::Validation(_) | Self::DuplicateQueryName(_) => false,
            Self::UnknownQueryReference { .. } => false,
            Self::IndexOutOfRange { .. } => false,
            Self::Config(_) | Self::Yaml(_) | Self::Io(_) => false,
            Self::Join(_) | Self::ChannelSend => true,
        }
    }

    /// Returns the error category for metrics/logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode",
            Self::IndexOutOfRange { .. } => "composer",
            Self::Persistence(_) => "persistence",
            Self::Validation(_)
            | Self::DuplicateQueryName(_)
            | Self::UnknownQueryReference { .. } => "validation",
            Self::Config(_) | Self::Yaml(_) => "config",
            Self::Serialization(_) => "serialization",
            Self::Io(_) => "io",
            Self::Join(_) => "async",
            Self::ChannelSend => "channel",
        }
    }
}
