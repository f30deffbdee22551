//! Request DTOs for pricing API endpoints.
//!
//! `QuoteRequestBody` is the loose wire shape sent by the booking forms.
//! It becomes a typed `QuoteRequest` only after validation.

use serde::{Deserialize, Serialize};

use super::models::{Lodging, PackageCredits, ServiceType};
use super::services::PricingError;

/// Maximum number of dogs that can share one boarding reservation
pub const MAX_DOGS: u8 = 3;

/// One-time fee flags for a boarding stay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeFlags {
    #[serde(default)]
    pub early: bool,
    #[serde(default)]
    pub late: bool,
    #[serde(default)]
    pub flea: bool,
}

/// Request to calculate a quote, as received over the wire.
///
/// Absent fields take their defaults during validation. Present fields with
/// invalid values are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteRequestBody {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nights: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lodging: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dogs: Option<i64>,
    #[serde(default, alias = "daycareWithBoarding", skip_serializing_if = "Option::is_none")]
    pub daycare_with_boarding: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<FeeFlags>,
    #[serde(default, alias = "useDaycarePackage", skip_serializing_if = "Option::is_none")]
    pub use_daycare_package: Option<bool>,
    #[serde(default, alias = "availableCredits", skip_serializing_if = "Option::is_none")]
    pub available_credits: Option<u32>,
}

/// Validated boarding request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardingRequest {
    pub nights: u32,
    pub lodging: Lodging,
    pub dogs: u8,
    pub daycare_with_boarding: bool,
    pub fees: FeeFlags,
}

impl Default for BoardingRequest {
    fn default() -> Self {
        Self {
            nights: 1,
            lodging: Lodging::Room,
            dogs: 1,
            daycare_with_boarding: false,
            fees: FeeFlags::default(),
        }
    }
}

/// Validated daycare request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaycareRequest {
    pub days: u32,
    pub use_daycare_package: bool,
    pub credits: PackageCredits,
}

impl Default for DaycareRequest {
    fn default() -> Self {
        Self {
            days: 1,
            use_daycare_package: false,
            credits: PackageCredits::Unlimited,
        }
    }
}

/// Validated quote request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteRequest {
    Boarding(BoardingRequest),
    Daycare(DaycareRequest),
}

impl QuoteRequest {
    pub fn service_type(&self) -> ServiceType {
        match self {
            QuoteRequest::Boarding(_) => ServiceType::Boarding,
            QuoteRequest::Daycare(_) => ServiceType::Daycare,
        }
    }
}

impl TryFrom<&QuoteRequestBody> for QuoteRequest {
    type Error = PricingError;

    fn try_from(body: &QuoteRequestBody) -> Result<Self, Self::Error> {
        let service_type = match body.service_type.as_deref() {
            None => ServiceType::Boarding,
            Some(raw) => ServiceType::parse(raw)
                .ok_or_else(|| PricingError::invalid_field("type", format!("unknown service type '{}'", raw)))?,
        };

        match service_type {
            ServiceType::Boarding => {
                let lodging = match body.lodging.as_deref() {
                    None => Lodging::default(),
                    Some(raw) => Lodging::parse(raw).ok_or_else(|| {
                        PricingError::invalid_field("lodging", format!("unknown lodging tier '{}'", raw))
                    })?,
                };

                Ok(QuoteRequest::Boarding(BoardingRequest {
                    nights: positive_count("nights", body.nights)?,
                    lodging,
                    dogs: dog_count(body.dogs)?,
                    daycare_with_boarding: body.daycare_with_boarding.unwrap_or(false),
                    fees: body.fees.unwrap_or_default(),
                }))
            }
            ServiceType::Daycare => Ok(QuoteRequest::Daycare(DaycareRequest {
                days: positive_count("days", body.days)?,
                use_daycare_package: body.use_daycare_package.unwrap_or(false),
                credits: body
                    .available_credits
                    .map(PackageCredits::Available)
                    .unwrap_or_default(),
            })),
        }
    }
}

impl TryFrom<QuoteRequestBody> for QuoteRequest {
    type Error = PricingError;

    fn try_from(body: QuoteRequestBody) -> Result<Self, Self::Error> {
        QuoteRequest::try_from(&body)
    }
}

/// Absent or zero counts become 1; negative counts are rejected
fn positive_count(field: &'static str, value: Option<i64>) -> Result<u32, PricingError> {
    match value {
        None | Some(0) => Ok(1),
        Some(n) if n < 0 => Err(PricingError::invalid_field(
            field,
            format!("{} must not be negative (got {})", field, n),
        )),
        Some(n) => u32::try_from(n)
            .map_err(|_| PricingError::invalid_field(field, format!("{} is too large (got {})", field, n))),
    }
}

fn dog_count(value: Option<i64>) -> Result<u8, PricingError> {
    match value {
        None => Ok(1),
        Some(n) if (1..=i64::from(MAX_DOGS)).contains(&n) => Ok(n as u8),
        Some(n) => Err(PricingError::invalid_field(
            "dogs",
            format!("dogs must be between 1 and {} (got {})", MAX_DOGS, n),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<QuoteRequest, PricingError> {
        let body: QuoteRequestBody = serde_json::from_value(value).unwrap();
        QuoteRequest::try_from(body)
    }

    fn field_of(err: PricingError) -> String {
        match err {
            PricingError::InvalidField { field, .. } => field,
            other => panic!("expected invalid field, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_body_defaults_to_one_night_room() {
        let request = parse(json!({})).unwrap();
        assert_eq!(request, QuoteRequest::Boarding(BoardingRequest::default()));
    }

    #[test]
    fn test_boarding_fields_are_read() {
        let request = parse(json!({
            "type": "boarding",
            "nights": 4,
            "lodging": "suite",
            "dogs": 2,
            "daycareWithBoarding": true,
            "fees": { "late": true }
        }))
        .unwrap();

        assert_eq!(
            request,
            QuoteRequest::Boarding(BoardingRequest {
                nights: 4,
                lodging: Lodging::Suite,
                dogs: 2,
                daycare_with_boarding: true,
                fees: FeeFlags {
                    early: false,
                    late: true,
                    flea: false,
                },
            })
        );
    }

    #[test]
    fn test_daycare_credits_default_to_unlimited() {
        let request = parse(json!({ "type": "daycare", "days": 3, "use_daycare_package": true })).unwrap();
        assert_eq!(
            request,
            QuoteRequest::Daycare(DaycareRequest {
                days: 3,
                use_daycare_package: true,
                credits: PackageCredits::Unlimited,
            })
        );
    }

    #[test]
    fn test_daycare_with_explicit_balance() {
        let request = parse(json!({ "type": "daycare", "useDaycarePackage": true, "availableCredits": 0 })).unwrap();
        match request {
            QuoteRequest::Daycare(daycare) => assert_eq!(daycare.credits, PackageCredits::Available(0)),
            other => panic!("expected daycare, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_counts_are_clamped() {
        match parse(json!({ "nights": 0 })).unwrap() {
            QuoteRequest::Boarding(b) => assert_eq!(b.nights, 1),
            other => panic!("expected boarding, got {:?}", other),
        }
        match parse(json!({ "type": "daycare", "days": 0 })).unwrap() {
            QuoteRequest::Daycare(d) => assert_eq!(d.days, 1),
            other => panic!("expected daycare, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_counts_are_rejected() {
        assert_eq!(field_of(parse(json!({ "nights": -2 })).unwrap_err()), "nights");
        assert_eq!(field_of(parse(json!({ "type": "daycare", "days": -1 })).unwrap_err()), "days");
    }

    #[test]
    fn test_invalid_enums_name_the_field() {
        assert_eq!(field_of(parse(json!({ "type": "grooming" })).unwrap_err()), "type");
        assert_eq!(field_of(parse(json!({ "lodging": "villa" })).unwrap_err()), "lodging");
        assert_eq!(field_of(parse(json!({ "dogs": 4 })).unwrap_err()), "dogs");
        assert_eq!(field_of(parse(json!({ "dogs": 0 })).unwrap_err()), "dogs");
    }

    #[test]
    fn test_other_service_fields_are_ignored() {
        let request = parse(json!({ "type": "daycare", "lodging": "villa", "dogs": 9 })).unwrap();
        assert_eq!(request.service_type(), ServiceType::Daycare);
    }

    #[test]
    fn test_body_serializes_without_absent_fields() {
        let body = QuoteRequestBody {
            service_type: Some("daycare".to_string()),
            days: Some(2),
            ..QuoteRequestBody::default()
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({ "type": "daycare", "days": 2 }));
    }
}
