//! Core domain: the error kinds every generator stage reports.

use crate::content::ContentLoadError;
use crate::scenario::StoreError;

/// Error type for generator failures. Any of these aborts the run before
/// an output file is written.
#[derive(Debug)]
pub enum GeneratorError {
    /// Non-positive map or block size.
    InvalidGeometry(String),
    /// Mismatched parallel lists, out-of-range settings or unknown catalog keys.
    InvalidParameters(String),
    /// A recipe or catalog file could not be read or parsed.
    Config(ContentLoadError),
    /// Read/write failure reported by the scenario store, passed through unchanged.
    StoreIo(StoreError),
}

impl GeneratorError {
    pub fn invalid_geometry(message: impl Into<String>) -> Self {
        Self::InvalidGeometry(message.into())
    }

    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters(message.into())
    }

    /// Short name of the error kind, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            GeneratorError::InvalidGeometry(_) => "InvalidGeometry",
            GeneratorError::InvalidParameters(_) => "InvalidParameters",
            GeneratorError::Config(_) => "Config",
            GeneratorError::StoreIo(_) => "StoreIoError",
        }
    }
}

impl std::fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorError::InvalidGeometry(message) => {
                write!(f, "Invalid geometry: {}", message)
            }
            GeneratorError::InvalidParameters(message) => {
                write!(f, "Invalid parameters: {}", message)
            }
            GeneratorError::Config(err) => write!(f, "{}", err),
            GeneratorError::StoreIo(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GeneratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeneratorError::StoreIo(err) => Some(err),
            GeneratorError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContentLoadError> for GeneratorError {
    fn from(err: ContentLoadError) -> Self {
        GeneratorError::Config(err)
    }
}

impl From<StoreError> for GeneratorError {
    fn from(err: StoreError) -> Self {
        GeneratorError::StoreIo(err)
    }
}
