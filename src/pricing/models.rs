//! Pricing domain models.
//!
//! The rate policy is a plain value passed into every calculation, so tests
//! and the rules endpoint can swap rates without touching shared state.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::services::PricingError;

/// Largest rate or fee a policy may carry; keeps quote arithmetic in range
/// for any night or day count a request can hold.
pub const MAX_RATE_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Kind of reservation being quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Boarding,
    Daycare,
}

impl ServiceType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "boarding" => Some(Self::Boarding),
            "daycare" => Some(Self::Daycare),
            _ => None,
        }
    }
}

/// Boarding accommodation class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lodging {
    #[default]
    Room,
    Suite,
}

impl Lodging {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "room" => Some(Self::Room),
            "suite" => Some(Self::Suite),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Lodging::Room => "room",
            Lodging::Suite => "suite",
        }
    }
}

impl fmt::Display for Lodging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Package credit balance visible to the quote.
///
/// The real balance is held by the billing system. `Unlimited` means the
/// caller did not supply one and the preview assumes credits are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageCredits {
    #[default]
    Unlimited,
    Available(u32),
}

impl PackageCredits {
    pub fn covers(&self, needed: u32) -> bool {
        match self {
            PackageCredits::Unlimited => true,
            PackageCredits::Available(balance) => *balance >= needed,
        }
    }
}

/// Rate table used by the quote calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatePolicy {
    pub currency: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub room_nightly_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub suite_nightly_rate: Decimal,
    /// Charged per extra dog (beyond the first) per night
    #[serde(with = "rust_decimal::serde::str")]
    pub extra_dog_nightly_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub daycare_addon_nightly_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub daycare_day_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub early_dropoff_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub late_pickup_fee: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub flea_treatment_fee: Decimal,
    /// Fraction of the subtotal taken off long stays (0.10 = 10%)
    #[serde(with = "rust_decimal::serde::str")]
    pub long_stay_discount_rate: Decimal,
    /// Discount applies when nights is strictly greater than this
    pub long_stay_threshold_nights: u32,
    pub days_per_package_credit: u32,
}

impl Default for RatePolicy {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            room_nightly_rate: dec!(37.00),
            suite_nightly_rate: dec!(44.00),
            extra_dog_nightly_rate: dec!(22.00),
            daycare_addon_nightly_rate: dec!(15.00),
            daycare_day_rate: dec!(30.00),
            early_dropoff_fee: dec!(10.00),
            late_pickup_fee: dec!(20.00),
            flea_treatment_fee: dec!(15.00),
            long_stay_discount_rate: dec!(0.10),
            long_stay_threshold_nights: 6,
            days_per_package_credit: 1,
        }
    }
}

impl RatePolicy {
    /// Nightly base rate for a lodging tier
    pub fn nightly_rate(&self, lodging: Lodging) -> Decimal {
        match lodging {
            Lodging::Room => self.room_nightly_rate,
            Lodging::Suite => self.suite_nightly_rate,
        }
    }

    /// Package credits needed to cover `days` of daycare
    pub fn credits_for_days(&self, days: u32) -> u32 {
        days.div_ceil(self.days_per_package_credit.max(1))
    }

    /// Check the table for values the calculator cannot price with.
    ///
    /// Every problem is reported, not just the first.
    pub fn validate(&self) -> Result<(), PricingError> {
        let mut errors = Vec::new();

        if self.currency.trim().is_empty() {
            errors.push("currency must not be empty".to_string());
        }

        let amounts = [
            ("room_nightly_rate", self.room_nightly_rate),
            ("suite_nightly_rate", self.suite_nightly_rate),
            ("extra_dog_nightly_rate", self.extra_dog_nightly_rate),
            ("daycare_addon_nightly_rate", self.daycare_addon_nightly_rate),
            ("daycare_day_rate", self.daycare_day_rate),
            ("early_dropoff_fee", self.early_dropoff_fee),
            ("late_pickup_fee", self.late_pickup_fee),
            ("flea_treatment_fee", self.flea_treatment_fee),
        ];
        for (name, amount) in amounts {
            if amount < Decimal::ZERO {
                errors.push(format!("{} must not be negative", name));
            } else if amount > MAX_RATE_AMOUNT {
                errors.push(format!("{} must not exceed {}", name, MAX_RATE_AMOUNT));
            }
        }

        if self.long_stay_discount_rate < Decimal::ZERO || self.long_stay_discount_rate > Decimal::ONE
        {
            errors.push("long_stay_discount_rate must be between 0 and 1".to_string());
        }

        if self.days_per_package_credit == 0 {
            errors.push("days_per_package_credit must be at least 1".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PricingError::Configuration {
                message: format!("Rate policy has {} invalid value(s)", errors.len()),
                errors,
            })
        }
    }
}
