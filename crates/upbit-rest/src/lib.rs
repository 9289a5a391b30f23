//! REST API client for the Upbit cryptocurrency exchange
//!
//! This crate provides a typed client for Upbit's REST API, covering public
//! quotation data and private exchange operations.
//!
//! # Features
//!
//! - **Quotation**: Ticker, orderbook, minute/second/day candles, trade ticks
//! - **Exchange**: Account balances, order placement, order cancellation
//! - **Order validation**: The discriminated `ord_type` contract is checked
//!   client-side before a request is signed or sent
//! - **Normalization**: Wire payloads that mix numbers and comma-grouped
//!   strings come back as a uniform `f64` domain model
//!
//! # Authentication
//!
//! Private endpoints sign each request with a fresh HS256 JWT carrying a
//! UUID v4 nonce; write operations additionally bind the request parameters
//! through a SHA-512 query hash.
//!
//! # Example
//!
//! ```no_run
//! use rust_decimal::Decimal;
//! use upbit_rest::{Credentials, OrderRequest, OrderSide, UpbitClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = UpbitClient::new();
//!     let tickers = client.get_ticker(&["KRW-BTC"]).await?;
//!     println!("BTC: {:?}", tickers.first());
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = UpbitClient::with_credentials(creds);
//!     let order = OrderRequest::limit(
//!         "KRW-BTC",
//!         OrderSide::Bid,
//!         Decimal::from(50_000_000),
//!         Decimal::ONE,
//!     );
//!     let placed = auth_client.place_order(&order).await?;
//!     println!("Placed: {}", placed.uuid);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod normalize;
pub mod order;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, UpbitClient};
pub use error::{RestError, RestResult};
pub use order::{NormalizedOrder, OrderRequest};
pub use upbit_auth::Credentials;

// Re-export endpoint-specific types
pub use endpoints::{CancelTarget, ExchangeEndpoints, QuotationEndpoints, TradeTickQuery};
pub use types::{Account, Candle, Order, Orderbook, OrderbookUnit, Ticker, TradeTick};

// Shared vocabulary from upbit-types
pub use upbit_types::{
    ChangeDirection, Market, OrderSide, OrderType, SmpType, TimeInForce, UpbitApiError,
    UpbitErrorCode,
};
