//! Shared types for the Upbit exchange REST API
//!
//! This crate holds the vocabulary used across the SDK: order enums,
//! the market pair-code type, and the exchange error-code catalogue.

pub mod enums;
pub mod error_codes;
pub mod market;

pub use enums::{ChangeDirection, OrderSide, OrderType, SmpType, TimeInForce};
pub use error_codes::{ErrorCategory, UpbitApiError, UpbitErrorCode};
pub use market::{Market, MarketParseError};
