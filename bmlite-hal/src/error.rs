//! HAL error taxonomy
//!
//! Deliberately coarse: every resource or configuration failure folds into
//! [`Error::Internal`], every failed bus transaction into [`Error::Io`].
//! The failing step is named in a diagnostic log line at the failure site,
//! not in the returned value.

/// Outcome of a HAL operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A resource claim, GPIO configuration, or bus release failed, or a
    /// required input was missing. Not retryable without external context.
    Internal,
    /// A bus transaction failed inside an otherwise healthy session.
    /// Retry policy belongs to the protocol layer.
    Io,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Internal => write!(f, "internal HAL error"),
            Error::Io => write!(f, "bus I/O error"),
        }
    }
}

/// Result alias for HAL operations.
pub type Result<T> = core::result::Result<T, Error>;
