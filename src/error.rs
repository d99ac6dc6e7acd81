use thiserror::Error;

/// Errors raised by the rasterization library.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RasterError {
    /// Geometry that cannot be rendered, e.g. a face listing the same vertex twice.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// An index that points outside the container it addresses.
    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: i64,
        len: usize,
    },

    /// A color that could not be parsed or lies outside its channel ranges.
    #[error("invalid color format: {0}")]
    InvalidColor(String),

    /// A numeric parameter outside its accepted domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, RasterError>;

impl RasterError {
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        RasterError::InvalidParameter { name, reason: reason.into() }
    }

    pub(crate) fn out_of_range(what: &'static str, index: i64, len: usize) -> Self {
        RasterError::IndexOutOfRange { what, index, len }
    }
}
