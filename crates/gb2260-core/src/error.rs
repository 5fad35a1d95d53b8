// crates/gb2260-core/src/error.rs
use thiserror::Error;

/// Errors produced by the resolver and the dataset loader.
#[derive(Debug, Error)]
pub enum GbError {
    /// The requested code has no entry in the dataset.
    ///
    /// Raised by [`crate::Resolver::get`] and by hierarchy navigation when a
    /// derived province/prefecture code is missing. Carries the code exactly
    /// as it was requested.
    #[error("{0:?} is not valid division code")]
    InvalidCode(String),

    /// A revision source contained a line that is not `<code> <name>`.
    #[error("malformed revision line {line}: {content:?}")]
    Parse { line: usize, content: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),
}

impl GbError {
    /// The offending code, if this is an [`GbError::InvalidCode`].
    pub fn invalid_code(&self) -> Option<&str> {
        match self {
            GbError::InvalidCode(code) => Some(code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GbError>;
