use thiserror::Error;

/// Errors raised while resolving resources or building providers.
///
/// The loader contract itself only knows found / not found, so these are
/// surfaced by the `try_*` entry points and folded into `None` by
/// [`ResourceProvider::load`](crate::ResourceProvider::load).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// I/O error while reading a resource
    #[error("I/O error: {0}")]
    Io(String),

    /// No provider knows the resource
    #[error("Resource not found: {path}/{name}")]
    NotFound { path: String, name: String },

    /// Path or name cannot cross the binding boundary (interior NUL)
    #[error("Invalid resource name: {0}")]
    InvalidName(String),

    /// Malformed `data:` URI
    #[error("Data URI error: {0}")]
    DataUri(String),

    /// Resource exceeds the configured size limit
    #[error("Resource too large: {size} bytes (limit {max})")]
    TooLarge { size: u64, max: u64 },

    /// Font data could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for resource operations
pub type ResourceResult<T> = Result<T, ResourceError>;

impl ResourceError {
    /// `true` for the outcome the loader contract signals with `None`
    /// without logging.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResourceError::NotFound { .. })
    }

    /// Get error category as string
    pub fn category(&self) -> &'static str {
        match self {
            ResourceError::Io(_) => "io",
            ResourceError::NotFound { .. } => "not_found",
            ResourceError::InvalidName(_) => "invalid_name",
            ResourceError::DataUri(_) => "data_uri",
            ResourceError::TooLarge { .. } => "too_large",
            ResourceError::Parse(_) => "parse",
            ResourceError::Config(_) => "config",
        }
    }
}
