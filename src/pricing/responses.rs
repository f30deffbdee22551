//! Response DTOs for pricing API endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculators::{round_money, Quote, QuoteLine};
use super::models::{RatePolicy, ServiceType};
use super::services::ActivePolicy;

/// Normalize an amount for display: two fractional digits, always
pub fn money(amount: Decimal) -> Decimal {
    let mut rounded = round_money(amount, 2);
    rounded.rescale(2);
    rounded
}

/// A priced line in the quote response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLineResponse {
    pub label: String,
    pub qty: u32,
    pub unit: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

impl From<QuoteLine> for QuoteLineResponse {
    fn from(line: QuoteLine) -> Self {
        Self {
            label: line.label,
            qty: line.qty,
            unit: line.unit,
            unit_price: money(line.unit_price),
            amount: money(line.amount),
        }
    }
}

/// Side-channel data attached to a quote
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteMetaResponse {
    #[serde(rename = "packageCreditsUsed", default, skip_serializing_if = "Option::is_none")]
    pub package_credits_used: Option<u32>,
    #[serde(rename = "packageShortfall", default, skip_serializing_if = "Option::is_none")]
    pub package_shortfall: Option<u32>,
}

/// Response for quote calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub currency: String,
    pub lines: Vec<QuoteLineResponse>,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    #[serde(default)]
    pub meta: QuoteMetaResponse,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            service_type: quote.service_type,
            currency: quote.currency,
            lines: quote.lines.into_iter().map(QuoteLineResponse::from).collect(),
            subtotal: money(quote.subtotal),
            discount_total: money(quote.discount_total),
            total: money(quote.total),
            meta: QuoteMetaResponse {
                package_credits_used: quote.meta.package_credits_used,
                package_shortfall: quote.meta.package_shortfall,
            },
        }
    }
}

/// Response for the active rate policy
#[derive(Debug, Clone, Serialize)]
pub struct RatePolicyResponse {
    #[serde(flatten)]
    pub policy: RatePolicy,
    pub updated_at: DateTime<Utc>,
}

impl From<ActivePolicy> for RatePolicyResponse {
    fn from(active: ActivePolicy) -> Self {
        Self {
            policy: active.policy,
            updated_at: active.updated_at,
        }
    }
}

/// Generic pricing error response
#[derive(Debug, Serialize, Deserialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Liveness probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
