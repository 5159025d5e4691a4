//! Database identifiers and well-known scope sentinels.
//!
//! Groups, entries and list-model scopes are all addressed by hex-encoded
//! 16-byte identifiers chosen by the database engine. The UI layer passes
//! them around as opaque strings; [`DatabaseId`] is the checked form used
//! wherever a string has to be converted back into the engine's fixed-length
//! format.
//!
//! Two reserved scope identities are deliberately *not* valid identifiers:
//! they are too short to decode, so they can never collide with a persisted
//! group or entry id.

use std::fmt;

use crate::error::IdParseError;

/// Number of raw bytes in a database identifier.
pub const ID_LENGTH: usize = 16;

/// Scope identity of the database root group: the all-zero identifier.
///
/// The engine tags master-group events with this id; models learn it
/// lazily from the first event they receive.
pub const ROOT_MODEL_ID: &str = "00000000000000000000000000000000";

/// Reserved scope identity for throwaway dialog models.
///
/// A model that registers under this id signals to the engine that no
/// live-update bookkeeping is needed for the session.
pub const DIALOG_MODEL_ID: &str = "ffffffff";

/// Reserved scope identity for search result models.
///
/// Search results never receive incremental edit updates, so all searches
/// share this fixed scope.
pub const SEARCH_MODEL_ID: &str = "fffffffe";

/// A fixed-length database identifier (16 raw bytes, hex-encoded on the
/// wire).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatabaseId([u8; ID_LENGTH]);

impl DatabaseId {
    /// The all-zero identifier, used by the engine for the root scope.
    pub const fn nil() -> Self {
        Self([0; ID_LENGTH])
    }

    /// Wrap raw identifier bytes.
    pub const fn from_bytes(bytes: [u8; ID_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Decode a hex string into an identifier.
    ///
    /// The string must be exactly `2 * ID_LENGTH` hex digits. Anything
    /// else (including the reserved scope sentinels) is rejected with an
    /// [`IdParseError`] carrying the offending string.
    pub fn from_hex(value: &str) -> Result<Self, IdParseError> {
        if value.len() != 2 * ID_LENGTH {
            return Err(IdParseError::InvalidLength {
                value: value.to_string(),
                len: value.len(),
            });
        }
        let mut bytes = [0u8; ID_LENGTH];
        for (i, chunk) in value.as_bytes().chunks_exact(2).enumerate() {
            let digits = std::str::from_utf8(chunk).map_err(|_| IdParseError::InvalidDigit {
                value: value.to_string(),
            })?;
            bytes[i] =
                u8::from_str_radix(digits, 16).map_err(|_| IdParseError::InvalidDigit {
                    value: value.to_string(),
                })?;
        }
        Ok(Self(bytes))
    }

    /// Hex-encode this identifier (lowercase, 32 digits).
    pub fn to_hex(&self) -> String {
        const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";
        let mut out = String::with_capacity(2 * ID_LENGTH);
        for byte in self.0 {
            out.push(HEX_DIGITS[usize::from(byte >> 4)] as char);
            out.push(HEX_DIGITS[usize::from(byte & 0x0f)] as char);
        }
        out
    }

    /// The raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8; ID_LENGTH] {
        &self.0
    }

    /// Whether this is the all-zero root identifier.
    pub fn is_nil(&self) -> bool {
        self.0 == [0; ID_LENGTH]
    }
}

impl fmt::Debug for DatabaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DatabaseId({})", self.to_hex())
    }
}

impl fmt::Display for DatabaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let id = DatabaseId::from_bytes([
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
            0xee, 0xff,
        ]);
        let hex = id.to_hex();
        assert_eq!(hex, "00112233445566778899aabbccddeeff");
        assert_eq!(DatabaseId::from_hex(&hex).unwrap(), id);
    }

    #[test]
    fn test_nil_matches_root_sentinel() {
        assert_eq!(DatabaseId::nil().to_hex(), ROOT_MODEL_ID);
        assert!(DatabaseId::nil().is_nil());
    }

    #[test]
    fn test_uppercase_accepted() {
        let id = DatabaseId::from_hex("00112233445566778899AABBCCDDEEFF").unwrap();
        assert_eq!(id.to_hex(), "00112233445566778899aabbccddeeff");
    }

    #[test]
    fn test_reserved_sentinels_never_decode() {
        assert!(DatabaseId::from_hex(DIALOG_MODEL_ID).is_err());
        assert!(DatabaseId::from_hex(SEARCH_MODEL_ID).is_err());
    }

    #[test]
    fn test_invalid_length_keeps_offending_string() {
        let err = DatabaseId::from_hex("abc123").unwrap_err();
        match err {
            IdParseError::InvalidLength { value, len } => {
                assert_eq!(value, "abc123");
                assert_eq!(len, 6);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_digit() {
        let err = DatabaseId::from_hex("zz112233445566778899aabbccddeeff").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidDigit { .. }));
    }
}
