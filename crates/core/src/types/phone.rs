//! Phone number type.
//!
//! Phones are the natural dedup key for clients: at most one client per
//! (account, phone) pair, and the client upsert routes on it. Normalizing at
//! the type boundary keeps "98765 43210" and "9876543210" from creating two
//! client records.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input contains no digits at all.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains characters other than digits, spaces, dashes,
    /// parentheses, or a leading plus.
    #[error("phone number contains invalid character '{0}'")]
    InvalidCharacter(char),
    /// Too few or too many digits.
    #[error("phone number must have between {min} and {max} digits")]
    BadLength {
        /// Minimum digit count.
        min: usize,
        /// Maximum digit count.
        max: usize,
    },
}

/// A normalized phone number.
///
/// Stored as an optional leading `+` followed by digits only. Formatting
/// characters (spaces, dashes, parentheses) are stripped during parsing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Minimum number of digits.
    pub const MIN_DIGITS: usize = 5;
    /// Maximum number of digits (ITU-T E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse and normalize a phone number.
    ///
    /// # Errors
    ///
    /// Returns an error if the input has no digits, contains characters other
    /// than digits and common formatting, or falls outside the 5-15 digit
    /// range.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let mut normalized = String::with_capacity(trimmed.len());
        for (i, c) in trimmed.chars().enumerate() {
            match c {
                '0'..='9' => normalized.push(c),
                '+' if i == 0 => normalized.push(c),
                ' ' | '-' | '(' | ')' | '.' => {}
                other => return Err(PhoneError::InvalidCharacter(other)),
            }
        }

        let digits = normalized.chars().filter(char::is_ascii_digit).count();
        if digits == 0 {
            return Err(PhoneError::Empty);
        }
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits) {
            return Err(PhoneError::BadLength {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(normalized))
    }

    /// Get the normalized phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization_is_stable() {
        let a = Phone::parse("98765 43210").expect("valid");
        let b = Phone::parse("9876543210").expect("valid");
        let c = Phone::parse("(98765) 432-10").expect("valid");
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_leading_plus_kept() {
        let phone = Phone::parse("+91 98765 43210").expect("valid");
        assert_eq!(phone.as_str(), "+919876543210");
    }

    #[test]
    fn test_rejects_junk() {
        assert!(matches!(Phone::parse(""), Err(PhoneError::Empty)));
        assert!(matches!(
            Phone::parse("call-me-maybe"),
            Err(PhoneError::InvalidCharacter(_))
        ));
        assert!(matches!(
            Phone::parse("123"),
            Err(PhoneError::BadLength { .. })
        ));
        assert!(matches!(
            Phone::parse("12345678901234567890"),
            Err(PhoneError::BadLength { .. })
        ));
    }
}
