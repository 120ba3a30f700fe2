//! Canonical identifiers.
//! Every id column is parsed once into an exact integer newtype; nothing
//! downstream compares ids as floats or text.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not a valid identifier")]
pub struct InvalidIdentifier(pub String);

/// Parse identifier text into its exact integer value.
///
/// Accepts plain integers and integral floats as written by spreadsheet
/// exports (`"7"`, `" 7 "`, `"7.0"`). Fractional, negative and non-numeric
/// text is rejected.
pub fn parse_identifier(text: &str) -> Option<u32> {
    let text = text.trim();
    if let Ok(value) = text.parse::<u32>() {
        return Some(value);
    }

    let (whole, fraction) = text.split_once('.')?;
    if whole.is_empty() || !fraction.chars().all(|c| c == '0') {
        return None;
    }
    whole.parse::<u32>().ok()
}

/// Rewrite identifier text into its canonical form (`"2.0"` becomes `"2"`).
/// Text that is not a valid identifier is returned trimmed but otherwise as-is.
pub fn canonical_identifier(text: &str) -> String {
    match parse_identifier(text) {
        Some(value) => value.to_string(),
        None => text.trim().to_string(),
    }
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = InvalidIdentifier;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_identifier(s)
                    .map(Self)
                    .ok_or_else(|| InvalidIdentifier(s.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

identifier!(
    /// Key of the team reference table.
    TeamId
);
identifier!(MatchId);
identifier!(SeasonId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifier_accepts_integral_text() {
        assert_eq!(parse_identifier("7"), Some(7));
        assert_eq!(parse_identifier(" 12 "), Some(12));
        assert_eq!(parse_identifier("2.0"), Some(2));
        assert_eq!(parse_identifier("3.000"), Some(3));
    }

    #[test]
    fn test_parse_identifier_rejects_non_integral_text() {
        assert_eq!(parse_identifier("2.5"), None);
        assert_eq!(parse_identifier("-1"), None);
        assert_eq!(parse_identifier("NULL"), None);
        assert_eq!(parse_identifier(".0"), None);
        assert_eq!(parse_identifier(""), None);
    }

    #[test]
    fn test_canonical_identifier_is_stable() {
        assert_eq!(canonical_identifier("2.0"), "2");
        assert_eq!(canonical_identifier(&canonical_identifier("2.0")), "2");
        assert_eq!(canonical_identifier(" abc "), "abc");
    }

    #[test]
    fn test_team_id_from_str() {
        assert_eq!("4".parse::<TeamId>(), Ok(TeamId::new(4)));
        assert_eq!(
            "four".parse::<TeamId>(),
            Err(InvalidIdentifier("four".to_string()))
        );
        assert_eq!(TeamId::new(9).to_string(), "9");
    }
}
