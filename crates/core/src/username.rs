use std::fmt;

use snafu::{Snafu, ensure};

pub const MIN_USERNAME_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum UsernameError {
    #[snafu(display("Username must be at least 3 characters."))]
    TooShort { length: usize },
}

/// Validated account name: trimmed, at least [`MIN_USERNAME_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    pub fn parse(raw: &str) -> Result<Self, UsernameError> {
        let trimmed = raw.trim();
        let length = trimmed.chars().count();
        ensure!(length >= MIN_USERNAME_LEN, TooShortSnafu { length });
        Ok(Self(trimmed.to_string()))
    }

    /// Accepts a value previously written by this application without revalidating length.
    pub(crate) fn from_persisted(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-cased first character, shown in the sidebar avatar.
    pub fn initial(&self) -> String {
        self.0
            .chars()
            .next()
            .map(|first| first.to_uppercase().collect())
            .unwrap_or_default()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_rejected_after_trimming() {
        for raw in ["", "  ", "ab", "  ab  ", "\tx\n"] {
            assert!(
                matches!(Username::parse(raw), Err(UsernameError::TooShort { .. })),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn names_are_stored_trimmed() {
        let name = Username::parse("  alice ").unwrap();
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(Username::parse("éé").is_err());
        assert!(Username::parse("ééé").is_ok());
    }

    #[test]
    fn initial_is_upper_cased() {
        assert_eq!(Username::parse("zoe").unwrap().initial(), "Z");
        assert_eq!(Username::parse("ßen").unwrap().initial(), "SS");
    }

    #[test]
    fn validation_message_matches_form_copy() {
        let error = Username::parse("ab").unwrap_err();
        assert_eq!(error.to_string(), "Username must be at least 3 characters.");
    }
}
