//! Private exchange endpoints
//!
//! These endpoints require authentication. Every call signs a fresh JWT;
//! write operations additionally bind their canonical query string through
//! the token's SHA-512 query hash, and the POST body is that exact string,
//! so body and hash can never disagree.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use sha2::{Digest, Sha512};
use tracing::{debug, instrument};
use upbit_auth::{AuthPayload, Credentials};

use crate::endpoints::read_json;
use crate::error::{RestError, RestResult};
use crate::order::OrderRequest;
use crate::types::{Account, Order, RawAccount, RawOrder};

const ACCOUNTS_PATH: &str = "/v1/accounts";
const ORDERS_PATH: &str = "/v1/orders";
const ORDER_PATH: &str = "/v1/order";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Which order a cancel request targets
///
/// Orders can be cancelled by the exchange-assigned uuid or by the
/// client-supplied identifier, never both in one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelTarget {
    /// Cancel by exchange-assigned order id
    Uuid(String),
    /// Cancel by client-supplied idempotency key
    Identifier(String),
}

impl CancelTarget {
    /// Target an order by its exchange uuid
    pub fn uuid(uuid: impl Into<String>) -> Self {
        Self::Uuid(uuid.into())
    }

    /// Target an order by its client identifier
    pub fn identifier(identifier: impl Into<String>) -> Self {
        Self::Identifier(identifier.into())
    }

    fn params(&self) -> [(&'static str, &str); 1] {
        match self {
            Self::Uuid(uuid) => [("uuid", uuid.as_str())],
            Self::Identifier(id) => [("identifier", id.as_str())],
        }
    }
}

/// Private exchange endpoints
pub struct ExchangeEndpoints<'a> {
    client: &'a Client,
    base_url: &'a str,
    credentials: &'a Credentials,
}

impl<'a> ExchangeEndpoints<'a> {
    pub fn new(client: &'a Client, base_url: &'a str, credentials: &'a Credentials) -> Self {
        Self {
            client,
            base_url,
            credentials,
        }
    }

    /// Get balances for every currency in the account
    #[instrument(skip(self))]
    pub async fn get_accounts(&self) -> RestResult<Vec<Account>> {
        let url = format!("{}{}", self.base_url, ACCOUNTS_PATH);
        let authorization = AuthPayload::new(self.credentials).authorization(self.credentials)?;

        debug!("Fetching account balances");

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        let raw: Vec<RawAccount> = read_json(response).await?;
        Ok(raw.into_iter().map(Account::from).collect())
    }

    /// Validate and place an order
    ///
    /// The request is checked against the order-type contract before
    /// anything is signed or sent; a contract violation surfaces as
    /// `RestError::InvalidOrder` without touching the network.
    #[instrument(skip(self, request), fields(market = %request.market, side = %request.side))]
    pub async fn place_order(&self, request: &OrderRequest) -> RestResult<Order> {
        let order = request.validate()?;
        let body = order.query_string()?;
        let query_hash = order.query_hash()?;

        let authorization = AuthPayload::with_query_hash(self.credentials, query_hash)
            .authorization(self.credentials)?;

        let url = format!("{}{}", self.base_url, ORDERS_PATH);
        debug!("Placing {} order on {}", order.ord_type(), order.market());

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let raw: RawOrder = read_json(response).await?;
        Ok(Order::from(raw))
    }

    /// Cancel an open order
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, target: &CancelTarget) -> RestResult<Order> {
        let query = serde_urlencoded::to_string(target.params())
            .map_err(|e| RestError::Parse(e.to_string()))?;
        let query_hash = hex::encode(Sha512::digest(query.as_bytes()));

        let authorization = AuthPayload::with_query_hash(self.credentials, query_hash)
            .authorization(self.credentials)?;

        let url = format!("{}{}?{}", self.base_url, ORDER_PATH, query);
        debug!("Cancelling order");

        let response = self
            .client
            .delete(&url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        let raw: RawOrder = read_json(response).await?;
        Ok(Order::from(raw))
    }
}
