//! Error types for vaultic core plumbing.

use std::fmt;

/// The main error type for vaultic core operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A caller-supplied identifier string failed to decode.
    IdParse(IdParseError),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdParse(err) => write!(f, "Identifier error: {err}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IdParse(err) => Some(err),
        }
    }
}

/// Identifier conversion errors.
///
/// The offending string is carried along so it can be surfaced through the
/// client's out-of-band error event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdParseError {
    /// The string is not the expected number of hex digits.
    InvalidLength {
        /// The string that failed to decode.
        value: String,
        /// Its actual length in characters.
        len: usize,
    },
    /// The string contains a non-hex character.
    InvalidDigit {
        /// The string that failed to decode.
        value: String,
    },
}

impl IdParseError {
    /// The string that failed to decode.
    pub fn offending_value(&self) -> &str {
        match self {
            Self::InvalidLength { value, .. } | Self::InvalidDigit { value } => value,
        }
    }
}

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { value, len } => {
                write!(f, "'{value}' has {len} characters, expected 32 hex digits")
            }
            Self::InvalidDigit { value } => {
                write!(f, "'{value}' contains a non-hexadecimal character")
            }
        }
    }
}

impl std::error::Error for IdParseError {}

impl From<IdParseError> for CoreError {
    fn from(err: IdParseError) -> Self {
        Self::IdParse(err)
    }
}

/// A specialized Result type for vaultic core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
