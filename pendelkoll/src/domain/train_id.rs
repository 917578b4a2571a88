//! Advertised train identifier type.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid train identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid train identifier: {reason}")]
pub struct InvalidTrainId {
    reason: &'static str,
}

/// The advertised identifier of a train, e.g. `"1043"`.
///
/// Identifiers are opaque strings. The only validation is that they are
/// non-empty and contain no whitespace.
///
/// Ordering is numeric when both identifiers are all digits (so `"205"`
/// sorts before `"1043"`) and lexical otherwise. Digit-only identifiers
/// sort before mixed ones. This is the secondary key used whenever two
/// trains tie on time.
///
/// # Examples
///
/// ```
/// use pendelkoll::domain::TrainId;
///
/// let a = TrainId::new("205").unwrap();
/// let b = TrainId::new("1043").unwrap();
/// assert!(a < b);
///
/// assert!(TrainId::new("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrainId(String);

impl TrainId {
    /// Create a train identifier.
    pub fn new(s: impl Into<String>) -> Result<Self, InvalidTrainId> {
        let s = s.into();
        if s.is_empty() {
            return Err(InvalidTrainId {
                reason: "must not be empty",
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(InvalidTrainId {
                reason: "must not contain whitespace",
            });
        }
        Ok(TrainId(s))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_numeric(&self) -> bool {
        self.0.bytes().all(|b| b.is_ascii_digit())
    }
}

impl Ord for TrainId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_numeric(), other.is_numeric()) {
            (true, true) => {
                let a = self.0.trim_start_matches('0');
                let b = other.0.trim_start_matches('0');
                a.len()
                    .cmp(&b.len())
                    .then_with(|| a.cmp(b))
                    .then_with(|| self.0.cmp(&other.0))
            }
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for TrainId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<String> for TrainId {
    type Error = InvalidTrainId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TrainId> for String {
    fn from(value: TrainId) -> Self {
        value.0
    }
}

impl fmt::Debug for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainId({})", self.0)
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> TrainId {
        TrainId::new(s).unwrap()
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(TrainId::new("").is_err());
        assert!(TrainId::new("10 43").is_err());
    }

    #[test]
    fn numeric_ordering() {
        assert!(id("205") < id("1043"));
        assert!(id("1043") < id("1045"));
        assert!(id("0205") > id("204"));
    }

    #[test]
    fn leading_zeros_tie_break_lexically() {
        assert!(id("0205") < id("205"));
        assert_ne!(id("0205"), id("205"));
    }

    #[test]
    fn numeric_before_mixed() {
        assert!(id("9999") < id("A12"));
        assert!(id("A12") < id("B1"));
    }

    #[test]
    fn display() {
        assert_eq!(id("8123").to_string(), "8123");
        assert_eq!(format!("{:?}", id("8123")), "TrainId(8123)");
    }
}
