use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TickerError;

const MAX_TICKER_LEN: usize = 16;

/// A validated, upper-cased ticker symbol such as `AAPL` or `BRK.B`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Validate and normalize a raw ticker.
    ///
    /// Surrounding whitespace is trimmed and the result upper-cased. Only
    /// ASCII alphanumerics, `.` and `-` are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`TickerError`] if the trimmed input is empty, longer than 16
    /// characters, or contains a disallowed character.
    pub fn parse(raw: &str) -> Result<Self, TickerError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TickerError::Empty);
        }
        if trimmed.chars().count() > MAX_TICKER_LEN {
            return Err(TickerError::TooLong(trimmed.to_string()));
        }
        if let Some(ch) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '.' || *c == '-'))
        {
            return Err(TickerError::InvalidCharacter {
                ticker: trimmed.to_string(),
                ch,
            });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = TickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = TickerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}
