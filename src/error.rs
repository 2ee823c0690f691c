//! Error types for TiltView

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// TiltView error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed or written
    #[error("Configuration error: {0}")]
    Config(String),

    /// Motion sensor is missing or stopped answering
    #[error("Sensor unavailable: {0}")]
    SensorUnavailable(String),

    /// Sensor answered with something that is not a reading
    #[error("Invalid reading from {source_name}: {reason}")]
    InvalidReading {
        /// Name of the motion source
        source_name: String,
        /// What was wrong with the value
        reason: String,
    },

    /// Frame image missing from the asset directory
    #[error("Frame asset missing: {0}")]
    AssetMissing(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Feed thread terminated abnormally and took the motion source with it
    #[error("Motion source lost (feed thread panicked)")]
    SourceLost,

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Config(e.to_string())
    }
}
