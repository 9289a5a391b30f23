//! API endpoint implementations

pub mod exchange;
pub mod quotation;

pub use exchange::{CancelTarget, ExchangeEndpoints};
pub use quotation::{QuotationEndpoints, TradeTickQuery};

use serde::de::DeserializeOwned;

use crate::error::{RestError, RestResult};

/// Read a response body, turning non-2xx statuses into `RestError::Api`
///
/// Upbit returns its error envelope as a JSON body on failed requests; an
/// unreadable failure body falls back to the status line.
pub(crate) async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> RestResult<T> {
    let status = response.status();

    if status.is_success() {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| RestError::Parse(e.to_string()))
    } else {
        let body = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null);
        Err(RestError::from_response(status.as_u16(), &body))
    }
}
