//! Public quotation endpoints
//!
//! These endpoints don't require authentication. Input lists are checked
//! before any request goes out, and count parameters are clamped to the
//! documented ranges rather than rejected.

use reqwest::Client;
use tracing::{debug, instrument};

use crate::endpoints::read_json;
use crate::error::{RestError, RestResult};
use crate::types::{
    Candle, Orderbook, RawCandle, RawOrderbook, RawTicker, RawTradeTick, Ticker, TradeTick,
};

const TICKER_PATH: &str = "/v1/ticker";
const ORDERBOOK_PATH: &str = "/v1/orderbook";
const MINUTE_CANDLES_PATH: &str = "/v1/candles/minutes";
const SECOND_CANDLES_PATH: &str = "/v1/candles/seconds";
const DAY_CANDLES_PATH: &str = "/v1/candles/days";
const TRADES_TICKS_PATH: &str = "/v1/trades/ticks";

/// Supported minute-candle widths
const MINUTE_UNITS: [u32; 8] = [1, 3, 5, 10, 15, 30, 60, 240];

/// Maximum orderbook depth per request
const MAX_ORDERBOOK_COUNT: u32 = 30;
/// Maximum candles per request
const MAX_CANDLE_COUNT: u32 = 200;
/// Default minute-candle count
const DEFAULT_MINUTE_CANDLE_COUNT: u32 = 60;
/// Maximum trade ticks per request
const MAX_TRADE_TICK_COUNT: u32 = 500;

/// Query for the recent-trades endpoint
#[derive(Debug, Clone, Default)]
pub struct TradeTickQuery {
    /// Market pair code (required)
    pub market: String,
    /// End time of the window within the target day (HHmmss or HH:mm:ss)
    pub to: Option<String>,
    /// Number of trades to return (1-500, default 1)
    pub count: Option<u32>,
    /// Pagination cursor: the `sequential_id` of the last seen trade
    pub cursor: Option<String>,
    /// Day offset from today, UTC (1-7)
    pub days_ago: Option<u8>,
}

impl TradeTickQuery {
    /// Query the most recent trades for a market
    pub fn new(market: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            ..Self::default()
        }
    }
}

/// Public quotation endpoints
pub struct QuotationEndpoints<'a> {
    client: &'a Client,
    base_url: &'a str,
}

impl<'a> QuotationEndpoints<'a> {
    pub fn new(client: &'a Client, base_url: &'a str) -> Self {
        Self { client, base_url }
    }

    /// Get ticker snapshots for one or more markets
    ///
    /// # Arguments
    /// * `markets` - Market pair codes (e.g. `["KRW-BTC", "KRW-ETH"]`)
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, markets: &[&str]) -> RestResult<Vec<Ticker>> {
        if markets.is_empty() {
            return Err(RestError::InvalidParameter(
                "At least one market is required.".to_string(),
            ));
        }

        let url = format!("{}{}", self.base_url, TICKER_PATH);
        debug!("Fetching ticker for {} markets", markets.len());

        let response = self
            .client
            .get(&url)
            .query(&[("markets", markets.join(","))])
            .send()
            .await?;

        let raw: Vec<RawTicker> = read_json(response).await?;
        Ok(raw.into_iter().map(Ticker::from).collect())
    }

    /// Get orderbook snapshots for one or more markets
    ///
    /// # Arguments
    /// * `markets` - Market pair codes
    /// * `level` - Optional price grouping level
    /// * `count` - Depth per side (clamped to 1-30)
    #[instrument(skip(self))]
    pub async fn get_orderbook(
        &self,
        markets: &[&str],
        level: Option<f64>,
        count: Option<u32>,
    ) -> RestResult<Vec<Orderbook>> {
        if markets.is_empty() {
            return Err(RestError::InvalidParameter(
                "At least one market is required.".to_string(),
            ));
        }

        let url = format!("{}{}", self.base_url, ORDERBOOK_PATH);
        let mut params: Vec<(&str, String)> = vec![("markets", markets.join(","))];
        if let Some(level) = level {
            params.push(("level", level.to_string()));
        }
        if let Some(count) = count {
            params.push(("count", count.clamp(1, MAX_ORDERBOOK_COUNT).to_string()));
        }

        debug!("Fetching orderbook for {} markets", markets.len());

        let response = self.client.get(&url).query(&params).send().await?;
        let raw: Vec<RawOrderbook> = read_json(response).await?;
        Ok(raw.into_iter().map(Orderbook::from).collect())
    }

    /// Get minute candles
    ///
    /// # Arguments
    /// * `market` - Market pair code
    /// * `unit` - Candle width in minutes (1, 3, 5, 10, 15, 30, 60, 240)
    /// * `to` - Last candle time, ISO 8601 (newest first from here)
    /// * `count` - Number of candles (clamped to 1-200, default 60)
    #[instrument(skip(self))]
    pub async fn get_minute_candles(
        &self,
        market: &str,
        unit: u32,
        to: Option<&str>,
        count: Option<u32>,
    ) -> RestResult<Vec<Candle>> {
        if !MINUTE_UNITS.contains(&unit) {
            return Err(RestError::InvalidParameter(format!(
                "Unsupported minute candle unit: {unit}"
            )));
        }

        let url = format!("{}{}/{}", self.base_url, MINUTE_CANDLES_PATH, unit);
        let count = count
            .unwrap_or(DEFAULT_MINUTE_CANDLE_COUNT)
            .clamp(1, MAX_CANDLE_COUNT);

        let mut params: Vec<(&str, String)> = vec![
            ("market", market.to_string()),
            ("count", count.to_string()),
        ];
        if let Some(to) = to {
            params.push(("to", to.to_string()));
        }

        debug!("Fetching {unit}m candles for {market}");

        let response = self.client.get(&url).query(&params).send().await?;
        let raw: Vec<RawCandle> = read_json(response).await?;
        Ok(raw.into_iter().map(Candle::from).collect())
    }

    /// Get second candles
    ///
    /// # Arguments
    /// * `market` - Market pair code
    /// * `to` - Last candle time, ISO 8601
    /// * `count` - Number of candles (clamped to 1-200)
    #[instrument(skip(self))]
    pub async fn get_second_candles(
        &self,
        market: &str,
        to: Option<&str>,
        count: Option<u32>,
    ) -> RestResult<Vec<Candle>> {
        let url = format!("{}{}", self.base_url, SECOND_CANDLES_PATH);
        let mut params: Vec<(&str, String)> = vec![("market", market.to_string())];
        if let Some(to) = to {
            params.push(("to", to.to_string()));
        }
        if let Some(count) = count {
            params.push(("count", count.clamp(1, MAX_CANDLE_COUNT).to_string()));
        }

        debug!("Fetching second candles for {market}");

        let response = self.client.get(&url).query(&params).send().await?;
        let raw: Vec<RawCandle> = read_json(response).await?;
        Ok(raw.into_iter().map(Candle::from).collect())
    }

    /// Get day candles
    ///
    /// # Arguments
    /// * `market` - Market pair code
    /// * `to` - Last candle time, ISO 8601
    /// * `count` - Number of candles (clamped to 1-200)
    /// * `converting_price_unit` - Convert closing prices into this currency
    #[instrument(skip(self))]
    pub async fn get_day_candles(
        &self,
        market: &str,
        to: Option<&str>,
        count: Option<u32>,
        converting_price_unit: Option<&str>,
    ) -> RestResult<Vec<Candle>> {
        let url = format!("{}{}", self.base_url, DAY_CANDLES_PATH);
        let mut params: Vec<(&str, String)> = vec![("market", market.to_string())];
        if let Some(to) = to {
            params.push(("to", to.to_string()));
        }
        if let Some(count) = count {
            params.push(("count", count.clamp(1, MAX_CANDLE_COUNT).to_string()));
        }
        if let Some(unit) = converting_price_unit {
            params.push(("converting_price_unit", unit.to_string()));
        }

        debug!("Fetching day candles for {market}");

        let response = self.client.get(&url).query(&params).send().await?;
        let raw: Vec<RawCandle> = read_json(response).await?;
        Ok(raw.into_iter().map(Candle::from).collect())
    }

    /// Get recent executed trades
    #[instrument(skip(self, query), fields(market = %query.market))]
    pub async fn get_trade_ticks(&self, query: &TradeTickQuery) -> RestResult<Vec<TradeTick>> {
        if query.market.trim().is_empty() {
            return Err(RestError::InvalidParameter(
                "Market is required for trade ticks.".to_string(),
            ));
        }
        if let Some(days_ago) = query.days_ago {
            if !(1..=7).contains(&days_ago) {
                return Err(RestError::InvalidParameter(format!(
                    "days_ago must be between 1 and 7, got {days_ago}"
                )));
            }
        }

        let url = format!("{}{}", self.base_url, TRADES_TICKS_PATH);
        let mut params: Vec<(&str, String)> = vec![("market", query.market.clone())];
        if let Some(to) = &query.to {
            params.push(("to", to.clone()));
        }
        if let Some(count) = query.count {
            params.push(("count", count.clamp(1, MAX_TRADE_TICK_COUNT).to_string()));
        }
        if let Some(cursor) = &query.cursor {
            params.push(("cursor", cursor.clone()));
        }
        if let Some(days_ago) = query.days_ago {
            params.push(("days_ago", days_ago.to_string()));
        }

        debug!("Fetching trade ticks for {}", query.market);

        let response = self.client.get(&url).query(&params).send().await?;
        let raw: Vec<RawTradeTick> = read_json(response).await?;
        Ok(raw.into_iter().map(TradeTick::from).collect())
    }
}
