//! Market pair codes (KRW-BTC format, quote first)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Market pair code in Upbit's QUOTE-BASE format
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Market(String);

impl Market {
    /// KRW-BTC market
    pub const KRW_BTC: &'static str = "KRW-BTC";
    /// KRW-ETH market
    pub const KRW_ETH: &'static str = "KRW-ETH";
    /// BTC-ETH market
    pub const BTC_ETH: &'static str = "BTC-ETH";

    /// Create a new market code from a string
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the market code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the quote currency (e.g. "KRW" from "KRW-BTC")
    pub fn quote(&self) -> Option<&str> {
        self.0.split('-').next()
    }

    /// Get the base currency (e.g. "BTC" from "KRW-BTC")
    pub fn base(&self) -> Option<&str> {
        self.0.split('-').nth(1)
    }
}

impl FromStr for Market {
    type Err = MarketParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.contains('-') {
            return Err(MarketParseError::MissingDash(s.to_string()));
        }

        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 2 {
            return Err(MarketParseError::InvalidFormat(s.to_string()));
        }

        if parts[0].is_empty() || parts[1].is_empty() {
            return Err(MarketParseError::EmptyPart(s.to_string()));
        }

        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Market {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Market {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Market {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Error parsing a market code
#[derive(Debug, Clone, thiserror::Error)]
pub enum MarketParseError {
    #[error("Market code must contain '-': {0}")]
    MissingDash(String),

    #[error("Invalid market code format: {0}")]
    InvalidFormat(String),

    #[error("Market code has empty quote or base: {0}")]
    EmptyPart(String),
}
