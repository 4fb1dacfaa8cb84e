use crate::error::types::ResourceError;

impl From<std::ffi::NulError> for ResourceError {
    fn from(error: std::ffi::NulError) -> Self {
        ResourceError::InvalidName(format!(
            "interior NUL byte at position {}",
            error.nul_position()
        ))
    }
}

impl From<ttf_parser::FaceParsingError> for ResourceError {
    fn from(error: ttf_parser::FaceParsingError) -> Self {
        ResourceError::Parse(format!("TTF parsing failed: {:?}", error))
    }
}

impl From<serde_json::Error> for ResourceError {
    fn from(error: serde_json::Error) -> Self {
        ResourceError::Config(format!("JSON parsing failed: {}", error))
    }
}

#[cfg(feature = "data-uri")]
impl From<data_url::DataUrlError> for ResourceError {
    fn from(error: data_url::DataUrlError) -> Self {
        ResourceError::DataUri(format!("{:?}", error))
    }
}

#[cfg(feature = "data-uri")]
impl From<data_url::forgiving_base64::InvalidBase64> for ResourceError {
    fn from(error: data_url::forgiving_base64::InvalidBase64) -> Self {
        ResourceError::DataUri(format!("invalid base64: {:?}", error))
    }
}

impl ResourceError {
    /// Create a NotFound error for a `(path, name)` pair
    pub fn not_found(path: impl Into<String>, name: impl Into<String>) -> Self {
        ResourceError::NotFound {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Create an Io error with file context
    pub fn io_error_with_path(path: &std::path::Path, message: impl Into<String>) -> Self {
        ResourceError::Io(format!("{}: {}", path.display(), message.into()))
    }

    /// Create a Config error with field context
    pub fn config_error_with_field(field: &str, message: impl Into<String>) -> Self {
        ResourceError::Config(format!(
            "Configuration error in '{}': {}",
            field,
            message.into()
        ))
    }
}
