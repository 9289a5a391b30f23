//! Order and market enums shared by requests and responses

use serde::{Deserialize, Serialize};

/// Order side (bid = buy, ask = sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Bid,
    /// Sell order
    Ask,
}

impl OrderSide {
    /// Get the API string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bid => "bid",
            Self::Ask => "ask",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type (the `ord_type` wire field)
///
/// - `limit`: price and volume both required
/// - `price`: market buy, price is the KRW budget
/// - `market`: market sell, volume required
/// - `best`: executes at the best opposing quote, time-in-force required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Limit order
    Limit,
    /// Market buy (spends a quote-currency budget)
    Price,
    /// Market sell (sells a base-currency volume)
    Market,
    /// Best-price order
    Best,
}

impl OrderType {
    /// Get the API string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "limit",
            Self::Price => "price",
            Self::Market => "market",
            Self::Best => "best",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time in force for orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeInForce {
    /// Immediate or cancel
    Ioc,
    /// Fill or kill
    Fok,
    /// Maker only (limit orders only)
    PostOnly,
}

impl TimeInForce {
    /// Get the API string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ioc => "ioc",
            Self::Fok => "fok",
            Self::PostOnly => "post_only",
        }
    }
}

impl std::fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-trade-prevention mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmpType {
    /// Cancel the resting (maker) order
    CancelMaker,
    /// Cancel the incoming (taker) order
    CancelTaker,
    /// Reduce both quantities to avoid the match
    Reduce,
}

impl SmpType {
    /// Get the API string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CancelMaker => "cancel_maker",
            Self::CancelTaker => "cancel_taker",
            Self::Reduce => "reduce",
        }
    }
}

impl std::fmt::Display for SmpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price movement relative to the previous close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeDirection {
    /// Price rose
    Rise,
    /// Price unchanged
    Even,
    /// Price fell
    Fall,
}
