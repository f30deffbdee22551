//! HTTP client for a remote pricing server.
//!
//! The remote server is the authority for billing, but quoting must keep
//! working offline: `quote_or_preview` falls back to the local calculator
//! whenever the remote call fails.

use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, warn};

use super::calculators::calc_quote;
use super::models::RatePolicy;
use super::requests::{QuoteRequest, QuoteRequestBody};
use super::responses::{PricingErrorResponse, QuoteResponse};
use super::services::PricingError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors talking to the remote pricing server
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid base URL '{0}'")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote pricing returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Where a quote came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteSource {
    Remote,
    Local,
}

/// A quote tagged with its origin
#[derive(Debug, Clone)]
pub struct QuotePreview {
    pub source: QuoteSource,
    pub quote: QuoteResponse,
}

/// Client for the pricing endpoints of a remote server
#[derive(Debug, Clone)]
pub struct PricingClient {
    http: Client,
    base_url: Url,
}

impl PricingClient {
    /// `base_url` may carry a path prefix (`http://gw/pricing`); endpoints
    /// are resolved beneath it. A trailing slash is added when missing.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let mut base_url =
            Url::parse(base_url).map_err(|_| ClientError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    /// `path` is relative ("api/pricing/quote") so the base path is kept
    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|_| ClientError::InvalidUrl(format!("{}{}", self.base_url, path)))
    }

    /// Ask the remote server to price a request
    pub async fn remote_quote(&self, body: &QuoteRequestBody) -> Result<QuoteResponse, ClientError> {
        let response = self
            .http
            .post(self.endpoint("api/pricing/quote")?)
            .json(body)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json::<QuoteResponse>().await?)
    }

    /// Push a rate table to the remote server.
    ///
    /// Local quoting never depends on this succeeding.
    pub async fn push_rules(&self, policy: &RatePolicy) -> Result<(), ClientError> {
        let response = self
            .http
            .put(self.endpoint("api/pricing/rules")?)
            .json(policy)
            .send()
            .await?;

        check_status(response).await?;
        debug!(base_url = %self.base_url, "Pricing rules pushed");
        Ok(())
    }

    /// Price remotely, or compute a local preview when the server is unavailable.
    ///
    /// Requests that fail local validation are rejected before any network call.
    pub async fn quote_or_preview(
        &self,
        body: &QuoteRequestBody,
        policy: &RatePolicy,
    ) -> Result<QuotePreview, ClientError> {
        let request = QuoteRequest::try_from(body)?;

        match self.remote_quote(body).await {
            Ok(quote) => Ok(QuotePreview {
                source: QuoteSource::Remote,
                quote,
            }),
            Err(e) => {
                warn!("Remote quote failed, using local preview: {}", e);
                Ok(QuotePreview {
                    source: QuoteSource::Local,
                    quote: calc_quote(&request, policy).into(),
                })
            }
        }
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<PricingErrorResponse>(&text)
        .map(|e| e.message)
        .unwrap_or_else(|_| describe(status, &text));

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

fn describe(status: StatusCode, text: &str) -> String {
    if text.trim().is_empty() {
        status.canonical_reason().unwrap_or("unknown status").to_string()
    } else {
        text.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            PricingClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_endpoint_joins_path() {
        let client = PricingClient::new("http://pricing.internal:8080").unwrap();
        assert_eq!(
            client.endpoint("api/pricing/quote").unwrap().as_str(),
            "http://pricing.internal:8080/api/pricing/quote"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        for base in ["http://gw/pricing", "http://gw/pricing/"] {
            let client = PricingClient::new(base).unwrap();
            assert_eq!(
                client.endpoint("api/pricing/quote").unwrap().as_str(),
                "http://gw/pricing/api/pricing/quote"
            );
            assert_eq!(
                client.endpoint("api/pricing/rules").unwrap().as_str(),
                "http://gw/pricing/api/pricing/rules"
            );
        }
    }

    #[test]
    fn test_describe_falls_back_to_reason() {
        assert_eq!(describe(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
        assert_eq!(describe(StatusCode::BAD_GATEWAY, " upstream down \n"), "upstream down");
    }
}
