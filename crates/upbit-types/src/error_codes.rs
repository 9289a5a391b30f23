//! Upbit API error code mapping
//!
//! Upbit reports failures as an HTTP error status with a nested JSON
//! envelope: `{"error": {"name": "insufficient_funds_bid", "message": "..."}}`.
//! This module maps the known `name` values to a structured code so callers
//! can branch on business conditions instead of string matching.

/// Upbit API error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Authentication and signing issues
    Auth,
    /// Order placement and cancellation errors
    Order,
    /// Market availability errors
    Market,
    /// Malformed or rejected request parameters
    Request,
    /// Rate limiting and service availability
    Service,
    /// Unknown error category
    Unknown,
}

/// Parsed Upbit API error with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpbitApiError {
    /// The original error name from the response envelope
    pub raw: String,
    /// Parsed error code (if recognized)
    pub code: Option<UpbitErrorCode>,
    /// Human-readable message from the response envelope
    pub message: String,
}

impl UpbitApiError {
    /// Parse an error name and message into a structured error
    pub fn parse(name: &str, message: impl Into<String>) -> Self {
        Self {
            raw: name.to_string(),
            code: UpbitErrorCode::from_name(name),
            message: message.into(),
        }
    }

    /// Error category, `Unknown` when the code was not recognized
    pub fn category(&self) -> ErrorCategory {
        self.code.map_or(ErrorCategory::Unknown, |c| c.category())
    }

    /// Check if this error indicates bad or rejected credentials
    pub fn is_auth_error(&self) -> bool {
        self.code.is_some_and(|c| c.is_auth_error())
    }

    /// Check if this error is a funds or order-size rejection
    pub fn is_trading_error(&self) -> bool {
        self.code.is_some_and(|c| c.is_trading_error())
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limit(&self) -> bool {
        self.code == Some(UpbitErrorCode::TooManyRequests)
    }
}

impl std::fmt::Display for UpbitApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.raw)
    }
}

/// Known Upbit API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpbitErrorCode {
    // === Authentication ===
    /// invalid_access_key
    InvalidAccessKey,
    /// expired_access_key
    ExpiredAccessKey,
    /// jwt_verification
    JwtVerification,
    /// nonce_used
    NonceUsed,
    /// no_authorization_ip
    NoAuthorizationIp,
    /// out_of_scope
    OutOfScope,

    // === Orders ===
    /// invalid_parameter
    InvalidParameter,
    /// invalid_time_in_force
    InvalidTimeInForce,
    /// invalid_price_bid
    InvalidPriceBid,
    /// invalid_price_ask
    InvalidPriceAsk,
    /// over_krw_funds_bid
    OverKrwFundsBid,
    /// over_krw_funds_ask
    OverKrwFundsAsk,
    /// insufficient_funds_bid
    InsufficientFundsBid,
    /// insufficient_funds_ask
    InsufficientFundsAsk,
    /// under_min_total_bid
    UnderMinTotalBid,
    /// under_min_total_ask
    UnderMinTotalAsk,
    /// create_bid_error
    CreateBidError,
    /// create_ask_error
    CreateAskError,
    /// order_not_found
    OrderNotFound,

    // === Markets ===
    /// notfoundmarket
    MarketNotFound,
    /// market_offline
    MarketOffline,

    // === Request / service ===
    /// validation_error
    ValidationError,
    /// too_many_requests
    TooManyRequests,
    /// server_error
    ServerError,
}

impl UpbitErrorCode {
    /// Parse an error code from the envelope's `name` field
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase();

        Some(match normalized.as_str() {
            "invalid_access_key" => Self::InvalidAccessKey,
            "expired_access_key" => Self::ExpiredAccessKey,
            "jwt_verification" => Self::JwtVerification,
            "nonce_used" => Self::NonceUsed,
            "no_authorization_ip" | "no_authorization_i_p" => Self::NoAuthorizationIp,
            "out_of_scope" => Self::OutOfScope,

            "invalid_parameter" => Self::InvalidParameter,
            "invalid_time_in_force" => Self::InvalidTimeInForce,
            "invalid_price_bid" => Self::InvalidPriceBid,
            "invalid_price_ask" => Self::InvalidPriceAsk,
            "over_krw_funds_bid" => Self::OverKrwFundsBid,
            "over_krw_funds_ask" => Self::OverKrwFundsAsk,
            "insufficient_funds_bid" => Self::InsufficientFundsBid,
            "insufficient_funds_ask" => Self::InsufficientFundsAsk,
            "under_min_total_bid" => Self::UnderMinTotalBid,
            "under_min_total_ask" => Self::UnderMinTotalAsk,
            "create_bid_error" => Self::CreateBidError,
            "create_ask_error" => Self::CreateAskError,
            "order_not_found" => Self::OrderNotFound,

            "notfoundmarket" | "not_found_market" => Self::MarketNotFound,
            "market_offline" => Self::MarketOffline,

            "validation_error" => Self::ValidationError,
            "too_many_requests" => Self::TooManyRequests,
            "server_error" => Self::ServerError,

            _ => {
                // Variants seen in the wild keep the prefix but vary the tail
                if normalized.contains("insufficient_funds") {
                    Self::InsufficientFundsBid
                } else if normalized.contains("jwt") {
                    Self::JwtVerification
                } else if normalized.contains("nonce") {
                    Self::NonceUsed
                } else if normalized.contains("too_many") {
                    Self::TooManyRequests
                } else {
                    return None;
                }
            }
        })
    }

    /// Error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidAccessKey
            | Self::ExpiredAccessKey
            | Self::JwtVerification
            | Self::NonceUsed
            | Self::NoAuthorizationIp
            | Self::OutOfScope => ErrorCategory::Auth,

            Self::InvalidParameter
            | Self::InvalidTimeInForce
            | Self::InvalidPriceBid
            | Self::InvalidPriceAsk
            | Self::OverKrwFundsBid
            | Self::OverKrwFundsAsk
            | Self::InsufficientFundsBid
            | Self::InsufficientFundsAsk
            | Self::UnderMinTotalBid
            | Self::UnderMinTotalAsk
            | Self::CreateBidError
            | Self::CreateAskError
            | Self::OrderNotFound => ErrorCategory::Order,

            Self::MarketNotFound | Self::MarketOffline => ErrorCategory::Market,

            Self::ValidationError => ErrorCategory::Request,
            Self::TooManyRequests | Self::ServerError => ErrorCategory::Service,
        }
    }

    /// Check if this is an authentication-related error
    pub fn is_auth_error(&self) -> bool {
        self.category() == ErrorCategory::Auth
    }

    /// Check if this is a funds or order-size rejection
    pub fn is_trading_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPriceBid
                | Self::InvalidPriceAsk
                | Self::OverKrwFundsBid
                | Self::OverKrwFundsAsk
                | Self::InsufficientFundsBid
                | Self::InsufficientFundsAsk
                | Self::UnderMinTotalBid
                | Self::UnderMinTotalAsk
        )
    }

    /// Get a human-readable description of this error
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidAccessKey => "Invalid access key",
            Self::ExpiredAccessKey => "Access key has expired",
            Self::JwtVerification => "JWT signature verification failed",
            Self::NonceUsed => "Nonce was already used",
            Self::NoAuthorizationIp => "Request IP is not authorized",
            Self::OutOfScope => "API key lacks the required scope",
            Self::InvalidParameter => "Invalid order parameter",
            Self::InvalidTimeInForce => "Invalid time-in-force for this order type",
            Self::InvalidPriceBid => "Invalid bid price",
            Self::InvalidPriceAsk => "Invalid ask price",
            Self::OverKrwFundsBid => "Bid exceeds the KRW order cap",
            Self::OverKrwFundsAsk => "Ask exceeds the KRW order cap",
            Self::InsufficientFundsBid => "Insufficient funds for bid",
            Self::InsufficientFundsAsk => "Insufficient funds for ask",
            Self::UnderMinTotalBid => "Bid total below the market minimum",
            Self::UnderMinTotalAsk => "Ask total below the market minimum",
            Self::CreateBidError => "Failed to create bid order",
            Self::CreateAskError => "Failed to create ask order",
            Self::OrderNotFound => "Order not found",
            Self::MarketNotFound => "Market not found",
            Self::MarketOffline => "Market is offline",
            Self::ValidationError => "Request failed validation",
            Self::TooManyRequests => "Too many requests",
            Self::ServerError => "Exchange internal error",
        }
    }
}
