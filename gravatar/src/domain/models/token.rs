use std::fmt;

use thiserror::Error;

/// OAuth bearer token authorizing uploads on behalf of an account.
///
/// The token never shows up in `Debug` output, so requests and events can be
/// logged freely.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("bearer token must not be empty")]
    Empty,
    #[error("bearer token must not contain whitespace")]
    ContainsWhitespace,
}

impl BearerToken {
    /// The raw token, for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for BearerToken {
    type Error = TokenError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.is_empty() {
            return Err(TokenError::Empty);
        }
        if value.chars().any(char::is_whitespace) {
            return Err(TokenError::ContainsWhitespace);
        }

        Ok(Self(value.to_string()))
    }
}

impl TryFrom<String> for BearerToken {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let token = BearerToken::try_from("secret-token").unwrap();
        let debug = format!("{token:?}");
        assert!(!debug.contains("secret-token"));
        assert_eq!(token.expose(), "secret-token");
    }

    #[test]
    fn empty_token_is_rejected() {
        assert_eq!(BearerToken::try_from(" "), Err(TokenError::Empty));
    }

    #[test]
    fn token_with_inner_whitespace_is_rejected() {
        assert_eq!(
            BearerToken::try_from("Bearer abc"),
            Err(TokenError::ContainsWhitespace)
        );
    }
}
