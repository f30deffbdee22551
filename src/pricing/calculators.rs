//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no I/O, no clock, no shared state.
//! The rate table is always passed in by the caller.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use tracing::debug;

use super::models::{Lodging, PackageCredits, RatePolicy, ServiceType};
use super::requests::{BoardingRequest, DaycareRequest, QuoteRequest};

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use pet_resort_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// A single priced line of a quote
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteLine {
    pub label: String,
    pub qty: u32,
    pub unit: String,
    pub unit_price: Decimal,
    pub amount: Decimal,
}

impl QuoteLine {
    pub fn new(label: impl Into<String>, qty: u32, unit: &str, unit_price: Decimal) -> Self {
        Self {
            label: label.into(),
            qty,
            unit: unit.to_string(),
            unit_price,
            amount: unit_price * Decimal::from(qty),
        }
    }
}

/// Side-channel facts about how a quote was priced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteMeta {
    /// Package credits consumed to offset the daycare charge
    pub package_credits_used: Option<u32>,
    /// Credits missing when the package was requested but the balance was short
    pub package_shortfall: Option<u32>,
}

/// Result of a quote calculation
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub service_type: ServiceType,
    pub currency: String,
    pub lines: Vec<QuoteLine>,
    pub subtotal: Decimal,
    pub discount_total: Decimal,
    pub total: Decimal,
    pub meta: QuoteMeta,
}

impl Quote {
    fn from_lines(
        service_type: ServiceType,
        policy: &RatePolicy,
        lines: Vec<QuoteLine>,
        discount_total: Decimal,
        meta: QuoteMeta,
    ) -> Self {
        let subtotal: Decimal = lines.iter().map(|line| line.amount).sum();

        // Discount can never push the total below zero
        let discount_total = discount_total.clamp(Decimal::ZERO, subtotal);
        let total = (subtotal - discount_total).max(Decimal::ZERO);

        Self {
            service_type,
            currency: policy.currency.clone(),
            lines,
            subtotal,
            discount_total,
            total,
            meta,
        }
    }
}

/// Calculate a priced quote for a reservation request.
///
/// Deterministic: the same request and policy always produce the same quote.
pub fn calc_quote(request: &QuoteRequest, policy: &RatePolicy) -> Quote {
    match request {
        QuoteRequest::Boarding(boarding) => calc_boarding(boarding, policy),
        QuoteRequest::Daycare(daycare) => calc_daycare(daycare, policy),
    }
}

fn calc_boarding(request: &BoardingRequest, policy: &RatePolicy) -> Quote {
    let nights = request.nights;
    let mut lines = vec![QuoteLine::new(
        boarding_label(request.lodging),
        nights,
        "night",
        policy.nightly_rate(request.lodging),
    )];

    if request.dogs > 1 {
        let extra_dogs = u32::from(request.dogs - 1);
        lines.push(QuoteLine::new(
            format!("Additional dogs ({})", extra_dogs),
            nights,
            "night",
            policy.extra_dog_nightly_rate * Decimal::from(extra_dogs),
        ));
    }

    if request.daycare_with_boarding {
        lines.push(QuoteLine::new(
            "Daycare add-on",
            nights,
            "night",
            policy.daycare_addon_nightly_rate,
        ));
    }

    let fees = [
        (request.fees.early, "Early drop-off", policy.early_dropoff_fee),
        (request.fees.late, "Late pick-up", policy.late_pickup_fee),
        (request.fees.flea, "Flea treatment", policy.flea_treatment_fee),
    ];
    for (_, label, amount) in fees.into_iter().filter(|(enabled, _, _)| *enabled) {
        lines.push(QuoteLine::new(label, 1, "each", amount));
    }

    let subtotal: Decimal = lines.iter().map(|line| line.amount).sum();
    let discount = if nights > policy.long_stay_threshold_nights {
        round_money(subtotal * policy.long_stay_discount_rate, 2)
    } else {
        Decimal::ZERO
    };

    debug!(
        nights,
        lodging = %request.lodging,
        dogs = request.dogs,
        %subtotal,
        %discount,
        "boarding quote calculated"
    );

    Quote::from_lines(ServiceType::Boarding, policy, lines, discount, QuoteMeta::default())
}

fn calc_daycare(request: &DaycareRequest, policy: &RatePolicy) -> Quote {
    let lines = vec![QuoteLine::new("Daycare", request.days, "day", policy.daycare_day_rate)];
    let subtotal: Decimal = lines.iter().map(|line| line.amount).sum();

    let mut meta = QuoteMeta::default();
    let mut discount = Decimal::ZERO;

    if request.use_daycare_package {
        let needed = policy.credits_for_days(request.days);
        if request.credits.covers(needed) {
            discount = subtotal;
            meta.package_credits_used = Some(needed);
        } else if let PackageCredits::Available(balance) = request.credits {
            meta.package_shortfall = Some(needed - balance);
        }
    }

    debug!(
        days = request.days,
        credits_used = meta.package_credits_used.unwrap_or(0),
        %subtotal,
        "daycare quote calculated"
    );

    Quote::from_lines(ServiceType::Daycare, policy, lines, discount, meta)
}

fn boarding_label(lodging: Lodging) -> String {
    format!("Boarding ({})", lodging)
}
