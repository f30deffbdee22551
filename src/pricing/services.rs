//! Pricing service holding the active rate policy.
//!
//! Quotes are computed against a snapshot of the policy, so a rules push
//! that lands mid-request never mixes old and new rates.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::calculators::{calc_quote, Quote};
use super::models::RatePolicy;
use super::requests::{QuoteRequest, QuoteRequestBody};

/// Pricing calculation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid value for '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String, errors: Vec<String> },
}

impl PricingError {
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        PricingError::InvalidField {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Rate policy currently in force, with the time it was installed
#[derive(Debug, Clone)]
pub struct ActivePolicy {
    pub policy: RatePolicy,
    pub updated_at: DateTime<Utc>,
}

/// Shared handle to the pricing rules and the calculator
#[derive(Clone)]
pub struct PricingService {
    active: Arc<RwLock<ActivePolicy>>,
}

impl PricingService {
    /// Create a service with an initial policy, rejecting invalid tables
    pub fn new(policy: RatePolicy) -> Result<Self, PricingError> {
        policy.validate()?;

        Ok(Self {
            active: Arc::new(RwLock::new(ActivePolicy {
                policy,
                updated_at: Utc::now(),
            })),
        })
    }

    /// Snapshot of the active policy
    pub async fn active_policy(&self) -> ActivePolicy {
        self.active.read().await.clone()
    }

    /// Validate a wire request and price it against the active policy
    pub async fn quote(&self, body: &QuoteRequestBody) -> Result<Quote, PricingError> {
        let request = QuoteRequest::try_from(body)?;
        let policy = self.active.read().await.policy.clone();

        let quote = calc_quote(&request, &policy);
        debug!(
            service = ?request.service_type(),
            total = %quote.total,
            "quote computed"
        );
        Ok(quote)
    }

    /// Install a new rate policy after validating it
    pub async fn replace_policy(&self, policy: RatePolicy) -> Result<ActivePolicy, PricingError> {
        policy.validate()?;

        let mut active = self.active.write().await;
        *active = ActivePolicy {
            policy,
            updated_at: Utc::now(),
        };
        info!(currency = %active.policy.currency, "Rate policy replaced");

        Ok(active.clone())
    }
}

impl Default for PricingService {
    fn default() -> Self {
        Self {
            active: Arc::new(RwLock::new(ActivePolicy {
                policy: RatePolicy::default(),
                updated_at: Utc::now(),
            })),
        }
    }
}
