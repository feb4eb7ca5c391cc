//! Error types for codec operations.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Codec error types.
///
/// Errors fall into four groups: format errors (the bytes are not a valid
/// container), mapping errors (a tensor name has no place in the schema),
/// shape errors (element counts disagree), and I/O. None are retried
/// internally.
#[derive(Debug, Error)]
pub enum Error {
    /// Leading magic constant does not identify a weights container.
    #[error("bad magic: expected 0x{expected:08x}, got 0x{actual:08x}")]
    BadMagic { expected: u32, actual: u32 },

    /// Structured payload could not be decoded.
    #[error("malformed container: {message}")]
    Malformed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Compressed stream could not be inflated.
    #[error("decompression failed: {0}")]
    Decompression(String),

    /// Hierarchical tensor name does not follow the naming grammar.
    #[error("unable to decode {entity} weight {name}")]
    UnknownName { entity: &'static str, name: String },

    /// Export could not place a tensor in the container.
    #[error("don't know where to store weight: {name}")]
    Unmapped {
        name: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// Field path does not resolve in the container schema.
    #[error("field not found: {0}")]
    FieldNotFound(String),

    /// Requested tensor has no stored layer.
    #[error("tensor not found in container: {0}")]
    TensorNotFound(String),

    /// Element count disagrees with the caller's expectation.
    #[error("tensor {name} has wrong length: expected {expected} elements, got {actual}")]
    ShapeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Container head format differs from the one the caller expects.
    #[error("{head} head format mismatch: expected {expected}, container has {actual}")]
    FormatMismatch {
        head: &'static str,
        expected: String,
        actual: String,
    },

    /// Configuration value is not recognised.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error from the underlying byte sink or source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a malformed container error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::Malformed {
            message: message.into(),
            source: None,
        }
    }

    /// Create a malformed container error wrapping the decoder's error.
    pub fn malformed_from(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::Malformed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a name decode error for the given grammar entity.
    pub fn unknown_name(entity: &'static str, name: impl Into<String>) -> Self {
        Error::UnknownName {
            entity,
            name: name.into(),
        }
    }

    /// Create an unmapped-weight error, keeping the mapper's reason if any.
    pub fn unmapped(name: impl Into<String>, source: Option<Error>) -> Self {
        Error::Unmapped {
            name: name.into(),
            source: source.map(Box::new),
        }
    }

    /// Create a field-not-found error.
    pub fn field_not_found(path: impl Into<String>) -> Self {
        Error::FieldNotFound(path.into())
    }

    /// Create a shape mismatch error.
    pub fn shape_mismatch(name: impl Into<String>, expected: usize, actual: usize) -> Self {
        Error::ShapeMismatch {
            name: name.into(),
            expected,
            actual,
        }
    }

    /// Check if the error means the input bytes are not a usable container.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::BadMagic { .. } | Error::Malformed { .. } | Error::Decompression(_)
        )
    }

    /// Check if tolerant import may skip the offending tensor and continue.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Error::TensorNotFound(_) | Error::ShapeMismatch { .. }
        )
    }

    /// Get error category for diagnostics.
    pub fn category(&self) -> &'static str {
        match self {
            Error::BadMagic { .. } => "bad_magic",
            Error::Malformed { .. } => "malformed",
            Error::Decompression(_) => "decompression",
            Error::UnknownName { .. } => "unknown_name",
            Error::Unmapped { .. } => "unmapped",
            Error::FieldNotFound(_) => "field_not_found",
            Error::TensorNotFound(_) => "tensor_not_found",
            Error::ShapeMismatch { .. } => "shape_mismatch",
            Error::FormatMismatch { .. } => "format_mismatch",
            Error::InvalidConfig(_) => "invalid_config",
            Error::Io(_) => "io_error",
        }
    }
}
