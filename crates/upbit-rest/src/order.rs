//! Order validation and wire shaping
//!
//! Upbit's order endpoint is a discriminated contract: which fields are
//! required, optional, or forbidden depends on the `ord_type`/`side`
//! combination. [`OrderRequest`] is the loose caller-facing shape;
//! [`OrderRequest::validate`] checks it against the contract and produces a
//! [`NormalizedOrder`] whose variants carry exactly their legal fields.
//! Validation is pure and fails on the first violation, naming the field.
//!
//! The normalized order also owns the wire shape: parameters are emitted in
//! one fixed order so the signed query hash and the POST body are built from
//! the same byte string.

use rust_decimal::Decimal;
use sha2::{Digest, Sha512};
use upbit_types::{OrderSide, OrderType, SmpType, TimeInForce};

use crate::error::{RestError, RestResult};

/// Request to place an order
///
/// `ord_type` defaults to `limit` when unset. The named constructors always
/// set it explicitly; the default only matters for hand-assembled requests.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    /// Market pair code ("KRW-BTC")
    pub market: String,
    /// Order side
    pub side: OrderSide,
    /// Order type (defaults to limit)
    pub ord_type: Option<OrderType>,
    /// Quantity in the base currency
    pub volume: Option<Decimal>,
    /// Limit price, or quote-currency budget for market buys
    pub price: Option<Decimal>,
    /// Client-supplied idempotency key
    pub identifier: Option<String>,
    /// Time in force
    pub time_in_force: Option<TimeInForce>,
    /// Self-trade-prevention mode
    pub smp_type: Option<SmpType>,
}

impl OrderRequest {
    /// Create a limit order
    pub fn limit(market: impl Into<String>, side: OrderSide, price: Decimal, volume: Decimal) -> Self {
        Self {
            market: market.into(),
            side,
            ord_type: Some(OrderType::Limit),
            volume: Some(volume),
            price: Some(price),
            identifier: None,
            time_in_force: None,
            smp_type: None,
        }
    }

    /// Create a market buy spending `price` units of the quote currency
    pub fn market_buy(market: impl Into<String>, price: Decimal) -> Self {
        Self {
            market: market.into(),
            side: OrderSide::Bid,
            ord_type: Some(OrderType::Price),
            volume: None,
            price: Some(price),
            identifier: None,
            time_in_force: None,
            smp_type: None,
        }
    }

    /// Create a market sell of `volume` units of the base currency
    pub fn market_sell(market: impl Into<String>, volume: Decimal) -> Self {
        Self {
            market: market.into(),
            side: OrderSide::Ask,
            ord_type: Some(OrderType::Market),
            volume: Some(volume),
            price: None,
            identifier: None,
            time_in_force: None,
            smp_type: None,
        }
    }

    /// Create a best-price buy spending `price` units of the quote currency
    pub fn best_buy(market: impl Into<String>, price: Decimal, time_in_force: TimeInForce) -> Self {
        Self {
            market: market.into(),
            side: OrderSide::Bid,
            ord_type: Some(OrderType::Best),
            volume: None,
            price: Some(price),
            identifier: None,
            time_in_force: Some(time_in_force),
            smp_type: None,
        }
    }

    /// Create a best-price sell of `volume` units of the base currency
    pub fn best_sell(market: impl Into<String>, volume: Decimal, time_in_force: TimeInForce) -> Self {
        Self {
            market: market.into(),
            side: OrderSide::Ask,
            ord_type: Some(OrderType::Best),
            volume: Some(volume),
            price: None,
            identifier: None,
            time_in_force: Some(time_in_force),
            smp_type: None,
        }
    }

    /// Set the client-side idempotency key
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Set the time in force
    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    /// Set the self-trade-prevention mode
    pub fn with_smp_type(mut self, smp: SmpType) -> Self {
        self.smp_type = Some(smp);
        self
    }

    /// Validate against the order-type contract
    ///
    /// Checks stop at the first violation; the error names the offending
    /// field. Market code and identifier are trimmed, and an identifier that
    /// is empty after trimming is treated as absent.
    pub fn validate(&self) -> RestResult<NormalizedOrder> {
        let market = self.market.trim().to_string();
        if market.is_empty() {
            return Err(RestError::invalid_order("market", "Market is required."));
        }

        let identifier = self
            .identifier
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let ord_type = self.ord_type.unwrap_or(OrderType::Limit);

        match ord_type {
            OrderType::Limit => {
                let price = require_positive(self.price, "price", "Limit orders require both price and volume.")?;
                let volume = require_positive(self.volume, "volume", "Limit orders require both price and volume.")?;
                if self.time_in_force == Some(TimeInForce::PostOnly) && self.smp_type.is_some() {
                    return Err(RestError::invalid_order(
                        "smp_type",
                        "post_only cannot be combined with smp_type.",
                    ));
                }

                Ok(NormalizedOrder::Limit {
                    market,
                    side: self.side,
                    price,
                    volume,
                    time_in_force: self.time_in_force,
                    identifier,
                    smp_type: self.smp_type,
                })
            }
            OrderType::Price => {
                if self.side != OrderSide::Bid {
                    return Err(RestError::invalid_order(
                        "side",
                        "Market buy must use side=bid and ord_type=price.",
                    ));
                }
                if self.time_in_force.is_some() {
                    return Err(RestError::invalid_order(
                        "time_in_force",
                        "Market buy must not set time_in_force.",
                    ));
                }
                let price = require_positive(self.price, "price", "Market buy requires price (KRW total).")?;
                if self.volume.is_some() {
                    return Err(RestError::invalid_order("volume", "Market buy must omit volume."));
                }

                Ok(NormalizedOrder::MarketBuy {
                    market,
                    price,
                    identifier,
                    smp_type: self.smp_type,
                })
            }
            OrderType::Market => {
                if self.side != OrderSide::Ask {
                    return Err(RestError::invalid_order(
                        "side",
                        "Market sell must use side=ask and ord_type=market.",
                    ));
                }
                if self.time_in_force.is_some() {
                    return Err(RestError::invalid_order(
                        "time_in_force",
                        "Market sell must not set time_in_force.",
                    ));
                }
                let volume = require_positive(self.volume, "volume", "Market sell requires volume.")?;
                if self.price.is_some() {
                    return Err(RestError::invalid_order("price", "Market sell must omit price."));
                }

                Ok(NormalizedOrder::MarketSell {
                    market,
                    volume,
                    identifier,
                    smp_type: self.smp_type,
                })
            }
            OrderType::Best => {
                let time_in_force = match self.time_in_force {
                    Some(tif @ (TimeInForce::Ioc | TimeInForce::Fok)) => tif,
                    _ => {
                        return Err(RestError::invalid_order(
                            "time_in_force",
                            "Best orders require time_in_force of ioc or fok.",
                        ));
                    }
                };

                match self.side {
                    OrderSide::Bid => {
                        let price =
                            require_positive(self.price, "price", "Best bid requires price (total).")?;
                        if self.volume.is_some() {
                            return Err(RestError::invalid_order("volume", "Best bid must omit volume."));
                        }

                        Ok(NormalizedOrder::BestBuy {
                            market,
                            price,
                            time_in_force,
                            identifier,
                            smp_type: self.smp_type,
                        })
                    }
                    OrderSide::Ask => {
                        let volume = require_positive(self.volume, "volume", "Best ask requires volume.")?;
                        if self.price.is_some() {
                            return Err(RestError::invalid_order("price", "Best ask must omit price."));
                        }

                        Ok(NormalizedOrder::BestSell {
                            market,
                            volume,
                            time_in_force,
                            identifier,
                            smp_type: self.smp_type,
                        })
                    }
                }
            }
        }
    }
}

fn require_positive(
    value: Option<Decimal>,
    field: &'static str,
    message: &'static str,
) -> RestResult<Decimal> {
    match value {
        Some(v) if v > Decimal::ZERO => Ok(v),
        _ => Err(RestError::invalid_order(field, message)),
    }
}

/// A validated order, one variant per `ord_type`/`side` combination
///
/// Every variant carries exactly the fields the exchange accepts for that
/// combination, so a normalized order cannot express an illegal shape.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedOrder {
    /// Limit order (`ord_type=limit`)
    Limit {
        market: String,
        side: OrderSide,
        price: Decimal,
        volume: Decimal,
        time_in_force: Option<TimeInForce>,
        identifier: Option<String>,
        smp_type: Option<SmpType>,
    },
    /// Market buy (`ord_type=price`, bid only; price is the KRW budget)
    MarketBuy {
        market: String,
        price: Decimal,
        identifier: Option<String>,
        smp_type: Option<SmpType>,
    },
    /// Market sell (`ord_type=market`, ask only)
    MarketSell {
        market: String,
        volume: Decimal,
        identifier: Option<String>,
        smp_type: Option<SmpType>,
    },
    /// Best-price buy (`ord_type=best`, bid; ioc or fok required)
    BestBuy {
        market: String,
        price: Decimal,
        time_in_force: TimeInForce,
        identifier: Option<String>,
        smp_type: Option<SmpType>,
    },
    /// Best-price sell (`ord_type=best`, ask; ioc or fok required)
    BestSell {
        market: String,
        volume: Decimal,
        time_in_force: TimeInForce,
        identifier: Option<String>,
        smp_type: Option<SmpType>,
    },
}

impl NormalizedOrder {
    /// The `ord_type` wire value of this variant
    pub fn ord_type(&self) -> OrderType {
        match self {
            Self::Limit { .. } => OrderType::Limit,
            Self::MarketBuy { .. } => OrderType::Price,
            Self::MarketSell { .. } => OrderType::Market,
            Self::BestBuy { .. } | Self::BestSell { .. } => OrderType::Best,
        }
    }

    /// The order side of this variant
    pub fn side(&self) -> OrderSide {
        match self {
            Self::Limit { side, .. } => *side,
            Self::MarketBuy { .. } | Self::BestBuy { .. } => OrderSide::Bid,
            Self::MarketSell { .. } | Self::BestSell { .. } => OrderSide::Ask,
        }
    }

    /// The market this order targets
    pub fn market(&self) -> &str {
        match self {
            Self::Limit { market, .. }
            | Self::MarketBuy { market, .. }
            | Self::MarketSell { market, .. }
            | Self::BestBuy { market, .. }
            | Self::BestSell { market, .. } => market,
        }
    }

    /// Wire parameters in canonical order
    ///
    /// The order is fixed: `ord_type`, `market`, `side`, then the variant's
    /// numerics (`price` before `volume`), `time_in_force`, and finally
    /// `identifier` and `smp_type`. The query hash and the POST body are
    /// both derived from this sequence.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = vec![
            ("ord_type", self.ord_type().as_str().to_string()),
            ("market", self.market().to_string()),
            ("side", self.side().as_str().to_string()),
        ];

        let (identifier, smp_type) = match self {
            Self::Limit {
                price,
                volume,
                time_in_force,
                identifier,
                smp_type,
                ..
            } => {
                pairs.push(("price", price.to_string()));
                pairs.push(("volume", volume.to_string()));
                if let Some(tif) = time_in_force {
                    pairs.push(("time_in_force", tif.as_str().to_string()));
                }
                (identifier, smp_type)
            }
            Self::MarketBuy {
                price,
                identifier,
                smp_type,
                ..
            } => {
                pairs.push(("price", price.to_string()));
                (identifier, smp_type)
            }
            Self::MarketSell {
                volume,
                identifier,
                smp_type,
                ..
            } => {
                pairs.push(("volume", volume.to_string()));
                (identifier, smp_type)
            }
            Self::BestBuy {
                price,
                time_in_force,
                identifier,
                smp_type,
                ..
            } => {
                pairs.push(("price", price.to_string()));
                pairs.push(("time_in_force", time_in_force.as_str().to_string()));
                (identifier, smp_type)
            }
            Self::BestSell {
                volume,
                time_in_force,
                identifier,
                smp_type,
                ..
            } => {
                pairs.push(("volume", volume.to_string()));
                pairs.push(("time_in_force", time_in_force.as_str().to_string()));
                (identifier, smp_type)
            }
        };

        if let Some(id) = identifier {
            pairs.push(("identifier", id.clone()));
        }
        if let Some(smp) = smp_type {
            pairs.push(("smp_type", smp.as_str().to_string()));
        }

        pairs
    }

    /// URL-encoded query string over the canonical parameters
    pub fn query_string(&self) -> RestResult<String> {
        serde_urlencoded::to_string(self.params()).map_err(|e| RestError::Parse(e.to_string()))
    }

    /// Lowercase hex SHA-512 digest of the canonical query string
    pub fn query_hash(&self) -> RestResult<String> {
        let query = self.query_string()?;
        let digest = Sha512::digest(query.as_bytes());
        Ok(hex::encode(digest))
    }

    /// Rebuild the loose request shape for this order
    pub fn to_request(&self) -> OrderRequest {
        let (volume, price, time_in_force, identifier, smp_type) = match self {
            Self::Limit {
                price,
                volume,
                time_in_force,
                identifier,
                smp_type,
                ..
            } => (Some(*volume), Some(*price), *time_in_force, identifier, smp_type),
            Self::MarketBuy {
                price,
                identifier,
                smp_type,
                ..
            } => (None, Some(*price), None, identifier, smp_type),
            Self::MarketSell {
                volume,
                identifier,
                smp_type,
                ..
            } => (Some(*volume), None, None, identifier, smp_type),
            Self::BestBuy {
                price,
                time_in_force,
                identifier,
                smp_type,
                ..
            } => (None, Some(*price), Some(*time_in_force), identifier, smp_type),
            Self::BestSell {
                volume,
                time_in_force,
                identifier,
                smp_type,
                ..
            } => (Some(*volume), None, Some(*time_in_force), identifier, smp_type),
        };

        OrderRequest {
            market: self.market().to_string(),
            side: self.side(),
            ord_type: Some(self.ord_type()),
            volume,
            price,
            identifier: identifier.clone(),
            time_in_force,
            smp_type: smp_type.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn field_of(err: RestError) -> &'static str {
        match err {
            RestError::InvalidOrder { field, .. } => field,
            other => panic!("expected InvalidOrder, got {other:?}"),
        }
    }

    #[test]
    fn test_limit_order_passes_through() {
        let order = OrderRequest::limit("KRW-BTC", OrderSide::Bid, dec!(50000000), dec!(1))
            .validate()
            .unwrap();

        assert_eq!(order.ord_type(), OrderType::Limit);
        match &order {
            NormalizedOrder::Limit { price, volume, .. } => {
                assert_eq!(*price, dec!(50000000));
                assert_eq!(*volume, dec!(1));
            }
            other => panic!("expected limit, got {other:?}"),
        }
    }

    #[test]
    fn test_market_buy_rejects_volume() {
        let mut request = OrderRequest::market_buy("KRW-BTC", dec!(10000));
        request.volume = Some(dec!(1));
        assert_eq!(field_of(request.validate().unwrap_err()), "volume");
    }

    #[test]
    fn test_market_buy_rejects_ask_side() {
        let mut request = OrderRequest::market_buy("KRW-BTC", dec!(10000));
        request.side = OrderSide::Ask;
        assert_eq!(field_of(request.validate().unwrap_err()), "side");
    }

    #[test]
    fn test_market_sell_rejects_price() {
        let mut request = OrderRequest::market_sell("KRW-BTC", dec!(0.5));
        request.price = Some(dec!(100));
        assert_eq!(field_of(request.validate().unwrap_err()), "price");
    }

    #[test]
    fn test_best_ask_requires_volume() {
        let mut request = OrderRequest::best_sell("KRW-BTC", dec!(1), TimeInForce::Ioc);
        request.volume = None;
        assert_eq!(field_of(request.validate().unwrap_err()), "volume");
    }

    #[test]
    fn test_best_ask_rejects_price() {
        let mut request = OrderRequest::best_sell("KRW-BTC", dec!(1), TimeInForce::Ioc);
        request.price = Some(dec!(100));
        assert_eq!(field_of(request.validate().unwrap_err()), "price");
    }

    #[test]
    fn test_best_requires_ioc_or_fok() {
        let request = OrderRequest::best_buy("KRW-BTC", dec!(10000), TimeInForce::PostOnly);
        assert_eq!(field_of(request.validate().unwrap_err()), "time_in_force");

        let mut request = OrderRequest::best_buy("KRW-BTC", dec!(10000), TimeInForce::Fok);
        request.time_in_force = None;
        assert_eq!(field_of(request.validate().unwrap_err()), "time_in_force");
    }

    #[test]
    fn test_post_only_conflicts_with_smp() {
        let request = OrderRequest::limit("KRW-BTC", OrderSide::Bid, dec!(100), dec!(1))
            .with_time_in_force(TimeInForce::PostOnly)
            .with_smp_type(SmpType::CancelMaker);
        assert_eq!(field_of(request.validate().unwrap_err()), "smp_type");
    }

    #[test]
    fn test_nonpositive_numerics_rejected() {
        let request = OrderRequest::limit("KRW-BTC", OrderSide::Bid, dec!(0), dec!(1));
        assert_eq!(field_of(request.validate().unwrap_err()), "price");

        let request = OrderRequest::limit("KRW-BTC", OrderSide::Bid, dec!(100), dec!(-1));
        assert_eq!(field_of(request.validate().unwrap_err()), "volume");
    }

    #[test]
    fn test_empty_market_rejected() {
        let request = OrderRequest::limit("   ", OrderSide::Bid, dec!(100), dec!(1));
        assert_eq!(field_of(request.validate().unwrap_err()), "market");
    }

    #[test]
    fn test_identifier_trimmed_and_emptied() {
        let order = OrderRequest::limit("KRW-BTC", OrderSide::Bid, dec!(100), dec!(1))
            .with_identifier("  my-id  ")
            .validate()
            .unwrap();
        match &order {
            NormalizedOrder::Limit { identifier, .. } => {
                assert_eq!(identifier.as_deref(), Some("my-id"));
            }
            other => panic!("expected limit, got {other:?}"),
        }

        let order = OrderRequest::limit("KRW-BTC", OrderSide::Bid, dec!(100), dec!(1))
            .with_identifier("   ")
            .validate()
            .unwrap();
        match &order {
            NormalizedOrder::Limit { identifier, .. } => assert!(identifier.is_none()),
            other => panic!("expected limit, got {other:?}"),
        }
    }

    #[test]
    fn test_default_ord_type_is_limit() {
        let request = OrderRequest {
            market: "KRW-BTC".to_string(),
            side: OrderSide::Bid,
            ord_type: None,
            volume: Some(dec!(1)),
            price: Some(dec!(50000000)),
            identifier: None,
            time_in_force: None,
            smp_type: None,
        };

        assert_eq!(request.validate().unwrap().ord_type(), OrderType::Limit);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let order = OrderRequest::best_buy("KRW-BTC", dec!(10000), TimeInForce::Ioc)
            .with_identifier("key-1")
            .with_smp_type(SmpType::Reduce)
            .validate()
            .unwrap();

        let again = order.to_request().validate().unwrap();
        assert_eq!(order, again);
    }

    #[test]
    fn test_canonical_query_string() {
        let order = OrderRequest::limit("KRW-BTC", OrderSide::Bid, dec!(50000000), dec!(1))
            .validate()
            .unwrap();

        assert_eq!(
            order.query_string().unwrap(),
            "ord_type=limit&market=KRW-BTC&side=bid&price=50000000&volume=1"
        );
    }

    #[test]
    fn test_market_buy_wire_shape() {
        let order = OrderRequest::market_buy("KRW-BTC", dec!(10000)).validate().unwrap();
        assert_eq!(
            order.query_string().unwrap(),
            "ord_type=price&market=KRW-BTC&side=bid&price=10000"
        );
    }

    #[test]
    fn test_best_sell_wire_shape_with_extras() {
        let order = OrderRequest::best_sell("KRW-ETH", dec!(2.5), TimeInForce::Fok)
            .with_identifier("client-7")
            .with_smp_type(SmpType::CancelTaker)
            .validate()
            .unwrap();

        assert_eq!(
            order.query_string().unwrap(),
            "ord_type=best&market=KRW-ETH&side=ask&volume=2.5&time_in_force=fok\
             &identifier=client-7&smp_type=cancel_taker"
        );
    }

    #[test]
    fn test_query_hash_reference_digest() {
        let order = OrderRequest::limit("KRW-BTC", OrderSide::Bid, dec!(50000000), dec!(1))
            .validate()
            .unwrap();

        assert_eq!(
            order.query_hash().unwrap(),
            "9b3333d810c7d7ae836485ee436fadac1e64b3d6982aa45ee5cdf5fd7d18efa8\
             2e61da677d314a4fc8e3a48719aabe2cea9f120aa8e8ff4ace107ea4cd0c61ed"
        );
    }
}
