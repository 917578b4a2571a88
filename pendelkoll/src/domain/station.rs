//! Station signature types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station signature.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A short station signature such as `Lo` (Lessebo) or `Vö` (Växjö).
///
/// Signatures are case-sensitive (`Em` and `EM` are different stations)
/// and may contain non-ASCII letters or punctuation. This type only
/// guarantees the code is non-empty and free of whitespace.
///
/// # Examples
///
/// ```
/// use pendelkoll::domain::StationCode;
///
/// let lo = StationCode::parse("Lo").unwrap();
/// assert_eq!(lo.as_str(), "Lo");
///
/// // Swedish letters are fine
/// assert!(StationCode::parse("Vö").is_ok());
///
/// // Blank or padded input is rejected
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("L o").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station signature.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        if s.is_empty() {
            return Err(InvalidStationCode {
                reason: "must not be empty",
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(InvalidStationCode {
                reason: "must not contain whitespace",
            });
        }

        Ok(StationCode(s.to_string()))
    }

    /// Parse a signature after trimming surrounding whitespace.
    ///
    /// Feed payloads occasionally pad fields; this is the entry point
    /// used when converting raw records.
    pub fn parse_trimmed(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(s.trim())
    }

    /// Returns the signature as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationCode {
    type Error = InvalidStationCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StationCode> for String {
    fn from(value: StationCode) -> Self {
        value.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
