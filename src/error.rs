//! Error types for the boundreach library
//!
//! Every fallible operation in the core returns [`Result`]. Errors are local
//! faults: nothing in the library retries, and a failed build never publishes
//! an index.

use thiserror::Error;

/// Errors raised by matrix operations, index construction, queries and loaders
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid window, unknown graph format or other rejected configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Node or matrix index outside `[0, dim)`
    #[error("Index {index} out of range for dimension {dim}")]
    IndexOutOfRange { index: usize, dim: usize },

    /// Two matrices with different dimensions were combined
    #[error("Dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// Malformed graph input
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Build abandoned through the execution context's cancellation token
    #[error("Index build cancelled")]
    Cancelled,
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub(crate) fn parse(line: usize, msg: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: msg.into(),
        }
    }

    /// Check `index < dim`, returning [`Error::IndexOutOfRange`] otherwise
    #[inline]
    pub(crate) fn check_index(index: usize, dim: usize) -> Result<()> {
        if index < dim {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange { index, dim })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_index() {
        assert!(Error::check_index(3, 4).is_ok());
        match Error::check_index(4, 4) {
            Err(Error::IndexOutOfRange { index, dim }) => {
                assert_eq!(index, 4);
                assert_eq!(dim, 4);
            }
            other => panic!("Expected IndexOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_display_messages() {
        let err = Error::parse(7, "bad neighbour id");
        assert_eq!(err.to_string(), "Parse error at line 7: bad neighbour id");

        let err = Error::config("d_low > d_up");
        assert_eq!(err.to_string(), "Invalid configuration: d_low > d_up");
    }
}
