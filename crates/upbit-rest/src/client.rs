//! Main REST client implementation

use reqwest::Client;
use std::time::Duration;
use tracing::info;
use upbit_auth::Credentials;

use crate::endpoints::{CancelTarget, ExchangeEndpoints, QuotationEndpoints, TradeTickQuery};
use crate::error::{RestError, RestResult};
use crate::order::OrderRequest;
use crate::types::{Account, Candle, Order, Orderbook, Ticker, TradeTick};

/// Default API host
const DEFAULT_BASE_URL: &str = "https://api.upbit.com";
/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upbit REST API client
///
/// Provides access to both public quotation and private exchange endpoints.
///
/// # Example
///
/// ```no_run
/// use upbit_rest::{UpbitClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = UpbitClient::new();
///     let tickers = client.get_ticker(&["KRW-BTC"]).await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = UpbitClient::with_credentials(creds);
///     let accounts = auth_client.get_accounts().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct UpbitClient {
    http_client: Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl UpbitClient {
    /// Create a new client without authentication
    ///
    /// Only public quotation endpoints will be available.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or("upbit-rest/0.1.0"))
            .build()
            .expect("Failed to create HTTP client");

        info!("Created Upbit REST client");

        Self {
            http_client,
            base_url: config.base_url,
            credentials: config.credentials,
        }
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Replace the client's credentials
    ///
    /// Calls already in flight keep signing with the old key pair.
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    // ========================================================================
    // Public Quotation Endpoints
    // ========================================================================

    /// Get quotation endpoints
    pub fn quotation(&self) -> QuotationEndpoints<'_> {
        QuotationEndpoints::new(&self.http_client, &self.base_url)
    }

    /// Get ticker snapshots for one or more markets
    pub async fn get_ticker(&self, markets: &[&str]) -> RestResult<Vec<Ticker>> {
        self.quotation().get_ticker(markets).await
    }

    /// Get orderbook snapshots for one or more markets
    pub async fn get_orderbook(
        &self,
        markets: &[&str],
        level: Option<f64>,
        count: Option<u32>,
    ) -> RestResult<Vec<Orderbook>> {
        self.quotation().get_orderbook(markets, level, count).await
    }

    /// Get minute candles
    pub async fn get_minute_candles(
        &self,
        market: &str,
        unit: u32,
        to: Option<&str>,
        count: Option<u32>,
    ) -> RestResult<Vec<Candle>> {
        self.quotation().get_minute_candles(market, unit, to, count).await
    }

    /// Get second candles
    pub async fn get_second_candles(
        &self,
        market: &str,
        to: Option<&str>,
        count: Option<u32>,
    ) -> RestResult<Vec<Candle>> {
        self.quotation().get_second_candles(market, to, count).await
    }

    /// Get day candles
    pub async fn get_day_candles(
        &self,
        market: &str,
        to: Option<&str>,
        count: Option<u32>,
        converting_price_unit: Option<&str>,
    ) -> RestResult<Vec<Candle>> {
        self.quotation()
            .get_day_candles(market, to, count, converting_price_unit)
            .await
    }

    /// Get recent executed trades
    pub async fn get_trade_ticks(&self, query: &TradeTickQuery) -> RestResult<Vec<TradeTick>> {
        self.quotation().get_trade_ticks(query).await
    }

    // ========================================================================
    // Private Exchange Endpoints
    // ========================================================================

    /// Get exchange endpoints (requires credentials)
    pub fn exchange(&self) -> RestResult<ExchangeEndpoints<'_>> {
        let creds = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(ExchangeEndpoints::new(&self.http_client, &self.base_url, creds))
    }

    /// Get balances for every currency in the account
    pub async fn get_accounts(&self) -> RestResult<Vec<Account>> {
        self.exchange()?.get_accounts().await
    }

    /// Validate and place an order
    pub async fn place_order(&self, request: &OrderRequest) -> RestResult<Order> {
        self.exchange()?.place_order(request).await
    }

    /// Cancel an open order
    pub async fn cancel_order(&self, target: &CancelTarget) -> RestResult<Order> {
        self.exchange()?.cancel_order(target).await
    }
}

impl Default for UpbitClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UpbitClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpbitClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API host (override to point at a test double)
    pub base_url: String,
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
