//! Request types and validation for HTTP endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ecoship_lib::QuoteRequest;

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Body of `POST /api/v1/quotes`.
///
/// `ship_date` stays a string here so a malformed date becomes a 400 problem
/// instead of a body rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequestBody {
    pub origin_city: String,
    pub destination_city: String,
    pub weight_kg: f64,
    /// ISO `YYYY-MM-DD`; today when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_date: Option<String>,
}

impl QuoteRequestBody {
    /// Parse the optional ship date.
    pub fn parsed_ship_date(&self) -> Result<Option<NaiveDate>, String> {
        match self.ship_date.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| format!("The 'ship_date' field must be YYYY-MM-DD, got '{}'", raw)),
        }
    }

    /// Convert to the library request. Call [`Validate::validate`] first.
    pub fn to_lib_request(&self) -> QuoteRequest {
        let request = QuoteRequest::new(
            self.origin_city.trim(),
            self.destination_city.trim(),
            self.weight_kg,
        );
        match self.parsed_ship_date() {
            Ok(Some(date)) => request.with_ship_date(date),
            _ => request,
        }
    }
}

impl Validate for QuoteRequestBody {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.origin_city.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'origin_city' field is required and cannot be empty",
                request_id,
            )));
        }

        if self.destination_city.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'destination_city' field is required and cannot be empty",
                request_id,
            )));
        }

        self.parsed_ship_date()
            .map_err(|detail| Box::new(ProblemDetails::bad_request(detail, request_id)))?;

        // Weight bounds and identical endpoints are checked by the library.
        self.to_lib_request()
            .validate()
            .map_err(|err| Box::new(crate::from_lib_error(&err, request_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(from: &str, to: &str, weight: f64) -> QuoteRequestBody {
        QuoteRequestBody {
            origin_city: from.to_string(),
            destination_city: to.to_string(),
            weight_kg: weight,
            ship_date: None,
        }
    }

    #[test]
    fn test_quote_request_valid() {
        assert!(body("New York", "Los Angeles", 5.0).validate("test").is_ok());
    }

    #[test]
    fn test_quote_request_empty_origin() {
        let err = body("", "Los Angeles", 5.0).validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'origin_city'"));
    }

    #[test]
    fn test_quote_request_empty_destination() {
        let err = body("New York", "   ", 5.0).validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'destination_city'"));
    }

    #[test]
    fn test_quote_request_weight_out_of_range() {
        for weight in [0.0, -1.0, 70.5] {
            let err = body("New York", "Los Angeles", weight)
                .validate("test")
                .unwrap_err();
            assert_eq!(err.status, 400, "weight {weight}");
            assert_eq!(err.instance.as_deref(), Some("test"));
        }
    }

    #[test]
    fn test_quote_request_same_city() {
        let err = body("Denver", "denver", 5.0).validate("test").unwrap_err();
        assert_eq!(err.status, 400);
    }

    #[test]
    fn test_quote_request_bad_ship_date() {
        let mut req = body("New York", "Los Angeles", 5.0);
        req.ship_date = Some("03/02/2024".to_string());
        let err = req.validate("test").unwrap_err();
        assert!(err.detail.as_deref().unwrap().contains("'ship_date'"));
    }

    #[test]
    fn test_quote_request_converts_to_lib_request() {
        let json = r#"{"origin_city":" New York ","destination_city":"Los Angeles","weight_kg":5.0,"ship_date":"2024-03-04"}"#;
        let req: QuoteRequestBody = serde_json::from_str(json).unwrap();
        assert!(req.validate("test").is_ok());

        let lib = req.to_lib_request();
        assert_eq!(lib.origin_city, "New York");
        assert_eq!(lib.ship_date, NaiveDate::from_ymd_opt(2024, 3, 4));
    }

    #[test]
    fn test_quote_request_deserialization_defaults() {
        let json = r#"{"origin_city":"Denver","destination_city":"Atlanta","weight_kg":2.5}"#;
        let req: QuoteRequestBody = serde_json::from_str(json).unwrap();
        assert!(req.ship_date.is_none());
        assert_eq!(req.to_lib_request().ship_date, None);
    }
}
