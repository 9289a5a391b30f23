//! Wire and domain types for Upbit REST responses
//!
//! Each endpoint deserializes into a `Raw*` struct that mirrors the wire
//! payload (decimals may arrive as numbers or comma-grouped strings), then
//! converts into the normalized domain model where every numeric field is a
//! plain `f64` and enum-like strings are typed. Unknown enum strings degrade
//! leniently instead of failing the whole response.

use serde::Deserialize;
use upbit_types::{ChangeDirection, Market, OrderSide, OrderType, SmpType, TimeInForce};

use crate::normalize::{to_nullable_number, to_number, WireNumber};

fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

/// Lenient `ord_type` parse; anything unrecognized is treated as `best`
fn lenient_ord_type(value: &str) -> OrderType {
    match value {
        "limit" => OrderType::Limit,
        "price" => OrderType::Price,
        "market" => OrderType::Market,
        _ => OrderType::Best,
    }
}

/// Lenient `time_in_force` parse; unknown values are dropped
fn lenient_tif(value: Option<&str>) -> Option<TimeInForce> {
    match value {
        Some("ioc") => Some(TimeInForce::Ioc),
        Some("fok") => Some(TimeInForce::Fok),
        Some("post_only") => Some(TimeInForce::PostOnly),
        _ => None,
    }
}

/// Lenient `smp_type` parse; unknown values are dropped
fn lenient_smp(value: Option<&str>) -> Option<SmpType> {
    match value {
        Some("cancel_maker") => Some(SmpType::CancelMaker),
        Some("cancel_taker") => Some(SmpType::CancelTaker),
        Some("reduce") => Some(SmpType::Reduce),
        _ => None,
    }
}

// ============================================================================
// Ticker
// ============================================================================

/// Ticker payload as it arrives on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct RawTicker {
    pub market: String,
    #[serde(default)]
    pub trade_date: String,
    #[serde(default)]
    pub trade_time: String,
    #[serde(default)]
    pub trade_date_kst: String,
    #[serde(default)]
    pub trade_time_kst: String,
    pub trade_price: WireNumber,
    pub opening_price: WireNumber,
    pub high_price: WireNumber,
    pub low_price: WireNumber,
    pub prev_closing_price: WireNumber,
    pub change: ChangeDirection,
    pub change_price: WireNumber,
    pub change_rate: WireNumber,
    pub signed_change_price: WireNumber,
    pub signed_change_rate: WireNumber,
    pub trade_volume: WireNumber,
    pub acc_trade_price: WireNumber,
    pub acc_trade_price_24h: WireNumber,
    pub acc_trade_volume: WireNumber,
    pub acc_trade_volume_24h: WireNumber,
    pub trade_timestamp: Option<WireNumber>,
    pub timestamp: Option<WireNumber>,
    pub highest_52_week_price: WireNumber,
    #[serde(default)]
    pub highest_52_week_date: String,
    pub lowest_52_week_price: WireNumber,
    #[serde(default)]
    pub lowest_52_week_date: String,
}

/// Current price snapshot for one market
#[derive(Debug, Clone)]
pub struct Ticker {
    /// Market pair code ("KRW-BTC")
    pub market: Market,
    /// Last trade date, UTC (yyyyMMdd)
    pub trade_date: String,
    /// Last trade time, UTC (HHmmss)
    pub trade_time: String,
    /// Last trade date, KST
    pub trade_date_kst: String,
    /// Last trade time, KST
    pub trade_time_kst: String,
    /// Last traded price (the current price)
    pub trade_price: f64,
    /// Opening price
    pub opening_price: f64,
    /// High of the day
    pub high_price: f64,
    /// Low of the day
    pub low_price: f64,
    /// Previous close (UTC midnight)
    pub prev_closing_price: f64,
    /// Direction relative to the previous close
    pub change: ChangeDirection,
    /// Absolute change from the previous close
    pub change_price: f64,
    /// Absolute change rate
    pub change_rate: f64,
    /// Signed change from the previous close
    pub signed_change_price: f64,
    /// Signed change rate
    pub signed_change_rate: f64,
    /// Volume of the last trade
    pub trade_volume: f64,
    /// Accumulated trade value since UTC midnight
    pub acc_trade_price: f64,
    /// Accumulated trade value over 24 hours
    pub acc_trade_price_24h: f64,
    /// Accumulated volume since UTC midnight
    pub acc_trade_volume: f64,
    /// Accumulated volume over 24 hours
    pub acc_trade_volume_24h: f64,
    /// Millisecond timestamp of the last trade
    pub trade_timestamp: f64,
    /// Millisecond timestamp of this snapshot
    pub timestamp: f64,
    /// 52-week high
    pub highest_52_week_price: f64,
    /// Date of the 52-week high (yyyy-MM-dd)
    pub highest_52_week_date: String,
    /// 52-week low
    pub lowest_52_week_price: f64,
    /// Date of the 52-week low (yyyy-MM-dd)
    pub lowest_52_week_date: String,
}

impl From<RawTicker> for Ticker {
    fn from(raw: RawTicker) -> Self {
        // Either timestamp field may be absent; fall back to the other,
        // then to the local clock.
        let trade_ts = raw.trade_timestamp.as_ref().or(raw.timestamp.as_ref());
        let snapshot_ts = raw.timestamp.as_ref().or(raw.trade_timestamp.as_ref());

        Self {
            market: Market::new(raw.market),
            trade_date: raw.trade_date,
            trade_time: raw.trade_time,
            trade_date_kst: raw.trade_date_kst,
            trade_time_kst: raw.trade_time_kst,
            trade_price: to_number(&raw.trade_price),
            opening_price: to_number(&raw.opening_price),
            high_price: to_number(&raw.high_price),
            low_price: to_number(&raw.low_price),
            prev_closing_price: to_number(&raw.prev_closing_price),
            change: raw.change,
            change_price: to_number(&raw.change_price),
            change_rate: to_number(&raw.change_rate),
            signed_change_price: to_number(&raw.signed_change_price),
            signed_change_rate: to_number(&raw.signed_change_rate),
            trade_volume: to_number(&raw.trade_volume),
            acc_trade_price: to_number(&raw.acc_trade_price),
            acc_trade_price_24h: to_number(&raw.acc_trade_price_24h),
            acc_trade_volume: to_number(&raw.acc_trade_volume),
            acc_trade_volume_24h: to_number(&raw.acc_trade_volume_24h),
            trade_timestamp: to_nullable_number(trade_ts).unwrap_or_else(now_ms),
            timestamp: to_nullable_number(snapshot_ts).unwrap_or_else(now_ms),
            highest_52_week_price: to_number(&raw.highest_52_week_price),
            highest_52_week_date: raw.highest_52_week_date,
            lowest_52_week_price: to_number(&raw.lowest_52_week_price),
            lowest_52_week_date: raw.lowest_52_week_date,
        }
    }
}

// ============================================================================
// Candles
// ============================================================================

/// Candle payload as it arrives on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct RawCandle {
    pub market: String,
    #[serde(default)]
    pub candle_date_time_kst: String,
    #[serde(default)]
    pub timestamp: i64,
    pub opening_price: WireNumber,
    pub high_price: WireNumber,
    pub low_price: WireNumber,
    pub trade_price: WireNumber,
    pub candle_acc_trade_price: WireNumber,
    pub candle_acc_trade_volume: WireNumber,
    pub unit: Option<u32>,
}

/// One OHLC candle
#[derive(Debug, Clone)]
pub struct Candle {
    /// Market pair code
    pub market: Market,
    /// Millisecond timestamp of the last tick in the candle
    pub timestamp: i64,
    /// Candle open time, KST (ISO 8601)
    pub time_kst: String,
    /// Open
    pub opening_price: f64,
    /// High
    pub high_price: f64,
    /// Low
    pub low_price: f64,
    /// Close
    pub trade_price: f64,
    /// Accumulated trade value within the candle
    pub acc_trade_price: f64,
    /// Accumulated volume within the candle
    pub acc_trade_volume: f64,
    /// Candle width in minutes (1 for second/day candles)
    pub unit: u32,
}

impl From<RawCandle> for Candle {
    fn from(raw: RawCandle) -> Self {
        Self {
            market: Market::new(raw.market),
            timestamp: raw.timestamp,
            time_kst: raw.candle_date_time_kst,
            opening_price: to_number(&raw.opening_price),
            high_price: to_number(&raw.high_price),
            low_price: to_number(&raw.low_price),
            trade_price: to_number(&raw.trade_price),
            acc_trade_price: to_number(&raw.candle_acc_trade_price),
            acc_trade_volume: to_number(&raw.candle_acc_trade_volume),
            unit: raw.unit.unwrap_or(1),
        }
    }
}

// ============================================================================
// Orderbook
// ============================================================================

/// Orderbook level as it arrives on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct RawOrderbookUnit {
    pub ask_price: WireNumber,
    pub bid_price: WireNumber,
    pub ask_size: WireNumber,
    pub bid_size: WireNumber,
    pub level: Option<WireNumber>,
}

/// Orderbook payload as it arrives on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct RawOrderbook {
    pub market: String,
    pub timestamp: Option<WireNumber>,
    pub total_ask_size: WireNumber,
    pub total_bid_size: WireNumber,
    #[serde(default)]
    pub orderbook_units: Vec<RawOrderbookUnit>,
    pub level: Option<WireNumber>,
}

/// One price level of an orderbook snapshot
#[derive(Debug, Clone)]
pub struct OrderbookUnit {
    /// Ask price at this level
    pub ask_price: f64,
    /// Bid price at this level
    pub bid_price: f64,
    /// Ask quantity at this level
    pub ask_size: f64,
    /// Bid quantity at this level
    pub bid_size: f64,
    /// Price grouping level, when the snapshot was requested grouped
    pub level: Option<f64>,
}

/// Orderbook snapshot for one market
#[derive(Debug, Clone)]
pub struct Orderbook {
    /// Market pair code
    pub market: Market,
    /// Millisecond timestamp of the snapshot
    pub timestamp: f64,
    /// Total ask quantity across all levels
    pub total_ask_size: f64,
    /// Total bid quantity across all levels
    pub total_bid_size: f64,
    /// Price levels, best quote first
    pub units: Vec<OrderbookUnit>,
    /// Price grouping level, when requested grouped
    pub level: Option<f64>,
}

impl Orderbook {
    /// Get the best ask price
    pub fn best_ask(&self) -> Option<f64> {
        self.units.first().map(|u| u.ask_price)
    }

    /// Get the best bid price
    pub fn best_bid(&self) -> Option<f64> {
        self.units.first().map(|u| u.bid_price)
    }

    /// Get the spread between best ask and best bid
    pub fn spread(&self) -> Option<f64> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

impl From<RawOrderbookUnit> for OrderbookUnit {
    fn from(raw: RawOrderbookUnit) -> Self {
        Self {
            ask_price: to_number(&raw.ask_price),
            bid_price: to_number(&raw.bid_price),
            ask_size: to_number(&raw.ask_size),
            bid_size: to_number(&raw.bid_size),
            level: to_nullable_number(raw.level.as_ref()),
        }
    }
}

impl From<RawOrderbook> for Orderbook {
    fn from(raw: RawOrderbook) -> Self {
        Self {
            market: Market::new(raw.market),
            timestamp: to_nullable_number(raw.timestamp.as_ref()).unwrap_or_else(now_ms),
            total_ask_size: to_number(&raw.total_ask_size),
            total_bid_size: to_number(&raw.total_bid_size),
            units: raw.orderbook_units.into_iter().map(Into::into).collect(),
            level: to_nullable_number(raw.level.as_ref()),
        }
    }
}

// ============================================================================
// Trade ticks
// ============================================================================

/// Trade tick payload as it arrives on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct RawTradeTick {
    pub market: String,
    #[serde(default)]
    pub trade_date_utc: String,
    #[serde(default)]
    pub trade_time_utc: String,
    pub timestamp: Option<WireNumber>,
    pub trade_price: WireNumber,
    pub trade_volume: WireNumber,
    pub prev_closing_price: WireNumber,
    pub change_price: WireNumber,
    pub ask_bid: String,
    #[serde(default)]
    pub sequential_id: i64,
}

/// One executed trade from the public trade feed
#[derive(Debug, Clone)]
pub struct TradeTick {
    /// Market pair code
    pub market: Market,
    /// Trade date, UTC (yyyy-MM-dd)
    pub trade_date_utc: String,
    /// Trade time, UTC (HH:mm:ss)
    pub trade_time_utc: String,
    /// Millisecond timestamp of the trade
    pub timestamp: f64,
    /// Execution price
    pub trade_price: f64,
    /// Executed quantity
    pub trade_volume: f64,
    /// Previous close (UTC midnight)
    pub prev_closing_price: f64,
    /// Change from the previous close
    pub change_price: f64,
    /// Taker side of the trade
    pub side: OrderSide,
    /// Unique trade identifier; does not guarantee ordering
    pub sequential_id: i64,
}

impl From<RawTradeTick> for TradeTick {
    fn from(raw: RawTradeTick) -> Self {
        let side = if raw.ask_bid.eq_ignore_ascii_case("ask") {
            OrderSide::Ask
        } else {
            OrderSide::Bid
        };

        Self {
            market: Market::new(raw.market),
            trade_date_utc: raw.trade_date_utc,
            trade_time_utc: raw.trade_time_utc,
            timestamp: to_nullable_number(raw.timestamp.as_ref()).unwrap_or(0.0),
            trade_price: to_number(&raw.trade_price),
            trade_volume: to_number(&raw.trade_volume),
            prev_closing_price: to_number(&raw.prev_closing_price),
            change_price: to_number(&raw.change_price),
            side,
            sequential_id: raw.sequential_id,
        }
    }
}

// ============================================================================
// Accounts
// ============================================================================

/// Account balance payload as it arrives on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct RawAccount {
    pub currency: String,
    pub balance: WireNumber,
    pub locked: WireNumber,
    pub avg_buy_price: WireNumber,
    #[serde(default)]
    pub avg_buy_price_modified: bool,
    pub unit_currency: Option<String>,
}

/// Balance of one currency in the account
#[derive(Debug, Clone)]
pub struct Account {
    /// Currency code ("KRW", "BTC")
    pub currency: String,
    /// Available balance
    pub balance: f64,
    /// Amount locked in open orders
    pub locked: f64,
    /// Average buy price
    pub avg_buy_price: f64,
    /// Whether the average buy price was manually modified
    pub avg_buy_price_modified: bool,
    /// Currency the average buy price is quoted in
    pub unit_currency: String,
}

impl From<RawAccount> for Account {
    fn from(raw: RawAccount) -> Self {
        Self {
            currency: raw.currency,
            balance: to_number(&raw.balance),
            locked: to_number(&raw.locked),
            avg_buy_price: to_number(&raw.avg_buy_price),
            avg_buy_price_modified: raw.avg_buy_price_modified,
            unit_currency: raw.unit_currency.unwrap_or_else(|| "KRW".to_string()),
        }
    }
}

// ============================================================================
// Orders
// ============================================================================

/// Order payload as it arrives on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct RawOrder {
    pub uuid: String,
    pub side: OrderSide,
    pub ord_type: String,
    pub price: Option<WireNumber>,
    pub state: String,
    pub market: String,
    #[serde(default)]
    pub created_at: String,
    pub volume: Option<WireNumber>,
    pub remaining_volume: Option<WireNumber>,
    pub reserved_fee: Option<WireNumber>,
    pub remaining_fee: Option<WireNumber>,
    pub paid_fee: Option<WireNumber>,
    pub locked: Option<WireNumber>,
    pub executed_volume: Option<WireNumber>,
    #[serde(default)]
    pub trade_count: u64,
    pub time_in_force: Option<String>,
    pub identifier: Option<String>,
    pub smp_type: Option<String>,
    pub prevented_volume: Option<WireNumber>,
    pub prevented_locked: Option<WireNumber>,
}

/// An order as acknowledged by the exchange
///
/// Nullable numerics stay `None` when the exchange omits them, e.g.
/// `remaining_volume` after a full fill.
#[derive(Debug, Clone)]
pub struct Order {
    /// Exchange-assigned order id
    pub uuid: String,
    /// Order side
    pub side: OrderSide,
    /// Order type
    pub ord_type: OrderType,
    /// Limit price, or KRW budget for market buys
    pub price: Option<f64>,
    /// Order state ("wait", "done", "cancel", ...)
    pub state: String,
    /// Market pair code
    pub market: Market,
    /// Creation time (ISO 8601)
    pub created_at: String,
    /// Requested quantity
    pub volume: Option<f64>,
    /// Unfilled quantity
    pub remaining_volume: Option<f64>,
    /// Fee reserved at placement
    pub reserved_fee: Option<f64>,
    /// Fee not yet charged
    pub remaining_fee: Option<f64>,
    /// Fee charged so far
    pub paid_fee: Option<f64>,
    /// Funds locked by this order
    pub locked: Option<f64>,
    /// Filled quantity
    pub executed_volume: Option<f64>,
    /// Number of fills
    pub trade_count: u64,
    /// Time in force, when the order carried one
    pub time_in_force: Option<TimeInForce>,
    /// Client-supplied idempotency key
    pub identifier: Option<String>,
    /// Self-trade-prevention mode, when set
    pub smp_type: Option<SmpType>,
    /// Quantity cancelled by self-trade prevention
    pub prevented_volume: f64,
    /// Funds unlocked by self-trade prevention
    pub prevented_locked: f64,
}

impl From<RawOrder> for Order {
    fn from(raw: RawOrder) -> Self {
        Self {
            uuid: raw.uuid,
            side: raw.side,
            ord_type: lenient_ord_type(&raw.ord_type),
            price: to_nullable_number(raw.price.as_ref()),
            state: raw.state,
            market: Market::new(raw.market),
            created_at: raw.created_at,
            volume: to_nullable_number(raw.volume.as_ref()),
            remaining_volume: to_nullable_number(raw.remaining_volume.as_ref()),
            reserved_fee: to_nullable_number(raw.reserved_fee.as_ref()),
            remaining_fee: to_nullable_number(raw.remaining_fee.as_ref()),
            paid_fee: to_nullable_number(raw.paid_fee.as_ref()),
            locked: to_nullable_number(raw.locked.as_ref()),
            executed_volume: to_nullable_number(raw.executed_volume.as_ref()),
            trade_count: raw.trade_count,
            time_in_force: lenient_tif(raw.time_in_force.as_deref()),
            identifier: raw.identifier,
            smp_type: lenient_smp(raw.smp_type.as_deref()),
            prevented_volume: to_nullable_number(raw.prevented_volume.as_ref()).unwrap_or(0.0),
            prevented_locked: to_nullable_number(raw.prevented_locked.as_ref()).unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ticker_comma_price_normalizes() {
        let raw: RawTicker = serde_json::from_value(json!({
            "market": "KRW-BTC",
            "trade_date": "20250101",
            "trade_time": "120000",
            "trade_date_kst": "20250101",
            "trade_time_kst": "210000",
            "trade_price": "50,000,000",
            "opening_price": 49000000.0,
            "high_price": 51000000.0,
            "low_price": 48500000.0,
            "prev_closing_price": "49,500,000",
            "change": "RISE",
            "change_price": 500000.0,
            "change_rate": 0.0101,
            "signed_change_price": 500000.0,
            "signed_change_rate": 0.0101,
            "trade_volume": "0.015",
            "acc_trade_price": 1.0,
            "acc_trade_price_24h": 2.0,
            "acc_trade_volume": 3.0,
            "acc_trade_volume_24h": 4.0,
            "trade_timestamp": 1735732800000i64,
            "timestamp": 1735732800123i64,
            "highest_52_week_price": 60000000.0,
            "highest_52_week_date": "2024-03-14",
            "lowest_52_week_price": 30000000.0,
            "lowest_52_week_date": "2024-09-06"
        }))
        .unwrap();

        let ticker = Ticker::from(raw);
        assert_eq!(ticker.trade_price, 50_000_000.0);
        assert_eq!(ticker.prev_closing_price, 49_500_000.0);
        assert_eq!(ticker.change, ChangeDirection::Rise);
        assert_eq!(ticker.market.as_str(), "KRW-BTC");
    }

    #[test]
    fn test_order_full_fill_keeps_nulls() {
        let raw: RawOrder = serde_json::from_value(json!({
            "uuid": "abc-123",
            "side": "bid",
            "ord_type": "limit",
            "price": "50000000",
            "state": "done",
            "market": "KRW-BTC",
            "created_at": "2025-01-01T12:00:00+09:00",
            "volume": "1",
            "remaining_volume": null,
            "reserved_fee": "25000",
            "remaining_fee": null,
            "paid_fee": "25000",
            "locked": null,
            "executed_volume": "1",
            "trade_count": 3
        }))
        .unwrap();

        let order = Order::from(raw);
        assert_eq!(order.price, Some(50_000_000.0));
        assert_eq!(order.remaining_volume, None);
        assert_eq!(order.executed_volume, Some(1.0));
        assert_eq!(order.prevented_volume, 0.0);
        assert_eq!(order.ord_type, OrderType::Limit);
    }

    #[test]
    fn test_unknown_ord_type_degrades_to_best() {
        assert_eq!(lenient_ord_type("best_fok"), OrderType::Best);
        assert_eq!(lenient_ord_type("price"), OrderType::Price);
        assert_eq!(lenient_tif(Some("gtc")), None);
        assert_eq!(lenient_smp(Some("reduce")), Some(SmpType::Reduce));
    }

    #[test]
    fn test_orderbook_helpers() {
        let raw: RawOrderbook = serde_json::from_value(json!({
            "market": "KRW-BTC",
            "timestamp": 1735732800000i64,
            "total_ask_size": "2.5",
            "total_bid_size": "3.1",
            "orderbook_units": [
                {"ask_price": 50100000.0, "bid_price": 50000000.0, "ask_size": 0.5, "bid_size": 0.7},
                {"ask_price": 50200000.0, "bid_price": 49900000.0, "ask_size": 2.0, "bid_size": 2.4}
            ]
        }))
        .unwrap();

        let book = Orderbook::from(raw);
        assert_eq!(book.best_ask(), Some(50_100_000.0));
        assert_eq!(book.best_bid(), Some(50_000_000.0));
        assert_eq!(book.spread(), Some(100_000.0));
        assert_eq!(book.units.len(), 2);
    }

    #[test]
    fn test_trade_tick_side() {
        let raw: RawTradeTick = serde_json::from_value(json!({
            "market": "KRW-BTC",
            "trade_date_utc": "2025-01-01",
            "trade_time_utc": "03:00:00",
            "timestamp": 1735700400000i64,
            "trade_price": 50000000.0,
            "trade_volume": "0.01",
            "prev_closing_price": 49500000.0,
            "change_price": 500000.0,
            "ask_bid": "ASK",
            "sequential_id": 17357004000001i64
        }))
        .unwrap();

        let tick = TradeTick::from(raw);
        assert_eq!(tick.side, OrderSide::Ask);
        assert_eq!(tick.trade_volume, 0.01);
    }

    #[test]
    fn test_account_defaults_unit_currency() {
        let raw: RawAccount = serde_json::from_value(json!({
            "currency": "BTC",
            "balance": "0.5",
            "locked": "0.0",
            "avg_buy_price": "48,000,000"
        }))
        .unwrap();

        let account = Account::from(raw);
        assert_eq!(account.unit_currency, "KRW");
        assert_eq!(account.avg_buy_price, 48_000_000.0);
    }
}
