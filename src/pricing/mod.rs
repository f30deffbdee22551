//! Pricing engine module for resort reservations.
//!
//! Computes boarding and daycare quotes from a rate policy table and serves
//! them over HTTP. A client for a remote pricing server is included for
//! callers that want the authoritative price with an offline fallback.

pub mod calculators;
pub mod client;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{calc_quote, round_money, Quote, QuoteLine, QuoteMeta};
pub use client::{ClientError, PricingClient, QuotePreview, QuoteSource};
pub use models::{Lodging, PackageCredits, RatePolicy, ServiceType};
pub use requests::{BoardingRequest, DaycareRequest, FeeFlags, QuoteRequest, QuoteRequestBody};
pub use routes::router;
pub use services::{ActivePolicy, PricingError, PricingService};
