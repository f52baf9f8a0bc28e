//! Business-day delivery date estimation.
//!
//! Business days are Monday through Friday. Holidays are not modelled.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::catalog::Tier;

/// True for Monday through Friday.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Move a weekend date forward to the following Monday. Weekdays are unchanged.
pub fn ensure_business_day(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + Duration::days(2),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

/// Advance `days` business days from `start`, skipping weekends.
///
/// `start` itself is never counted.
pub fn add_business_days(start: NaiveDate, days: u32) -> NaiveDate {
    let mut current = start;
    let mut added = 0;
    while added < days {
        current += Duration::days(1);
        if is_business_day(current) {
            added += 1;
        }
    }
    current
}

/// Render a date as "Tuesday, March 5, 2024".
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use ecoship_lib::delivery::format_delivery_date;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert_eq!(format_delivery_date(date), "Tuesday, March 5, 2024");
/// ```
pub fn format_delivery_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Estimated delivery for one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryEstimate {
    pub ship_date: NaiveDate,
    /// Ship date moved off a weekend.
    pub effective_ship_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub formatted: String,
    pub business_days: u32,
}

/// Estimate delivery for a tier shipped on `ship_date`.
pub fn estimate_delivery(tier: &Tier, ship_date: NaiveDate) -> DeliveryEstimate {
    let effective_ship_date = ensure_business_day(ship_date);
    let delivery_date = add_business_days(effective_ship_date, tier.business_days);

    DeliveryEstimate {
        ship_date,
        effective_ship_date,
        delivery_date,
        formatted: format_delivery_date(delivery_date),
        business_days: tier.business_days,
    }
}

/// Replace the leading part of a commitment with the concrete delivery date,
/// keeping any "by <time>" suffix.
///
/// "Next Business Day by 10:30 AM" becomes "Tuesday, March 5, 2024 by 10:30 AM".
pub fn commitment_with_date(tier: &Tier, ship_date: NaiveDate) -> String {
    let estimate = estimate_delivery(tier, ship_date);
    let lower = tier.commitment.to_ascii_lowercase();
    match lower.find(" by ") {
        Some(idx) => format!("{}{}", estimate.formatted, &tier.commitment[idx..]),
        None => estimate.formatted,
    }
}

/// Why a requested delivery date cannot be honoured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DateRejection {
    /// Earlier than the tier can deliver.
    TooEarly { earliest: NaiveDate },
    /// Falls on a weekend.
    NotBusinessDay,
}

impl std::fmt::Display for DateRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateRejection::TooEarly { earliest } => write!(
                f,
                "requested delivery date is too early; earliest is {}",
                format_delivery_date(*earliest)
            ),
            DateRejection::NotBusinessDay => {
                f.write_str("requested delivery date must be a business day")
            }
        }
    }
}

/// Check a customer-requested delivery date against a tier.
pub fn validate_requested_date(
    tier: &Tier,
    requested: NaiveDate,
    ship_date: NaiveDate,
) -> std::result::Result<(), DateRejection> {
    let earliest = estimate_delivery(tier, ship_date).delivery_date;
    if requested < earliest {
        return Err(DateRejection::TooEarly { earliest });
    }
    if !is_business_day(requested) {
        return Err(DateRejection::NotBusinessDay);
    }
    Ok(())
}

/// One delivery date option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOption {
    pub date: NaiveDate,
    pub formatted: String,
}

/// The standard delivery date followed by `count - 1` later business days.
pub fn alternative_dates(tier: &Tier, ship_date: NaiveDate, count: usize) -> Vec<DeliveryOption> {
    let mut current = estimate_delivery(tier, ship_date).delivery_date;
    let mut options = Vec::with_capacity(count);
    for i in 0..count {
        if i > 0 {
            current = add_business_days(current, 1);
        }
        options.push(DeliveryOption {
            date: current,
            formatted: format_delivery_date(current),
        });
    }
    options
}

/// Short human summary of an ETA, e.g. "By 10:30 AM Tomorrow".
pub fn formatted_commitment(eta_hours: u32, commitment: &str) -> String {
    if eta_hours <= 24 {
        if commitment.contains("8:00 AM") {
            "By 8:30 AM Tomorrow".to_string()
        } else if commitment.contains("10:30 AM") {
            "By 10:30 AM Tomorrow".to_string()
        } else {
            "Next Business Day".to_string()
        }
    } else if eta_hours <= 48 {
        "Within 2 Business Days".to_string()
    } else {
        format!("Within {} Business Days", eta_hours / 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogProvider, ReferenceCatalog, TierId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekend_ship_date_moves_to_monday() {
        // 2024-03-02 is a Saturday.
        assert_eq!(ensure_business_day(date(2024, 3, 2)), date(2024, 3, 4));
        assert_eq!(ensure_business_day(date(2024, 3, 3)), date(2024, 3, 4));
        assert_eq!(ensure_business_day(date(2024, 3, 5)), date(2024, 3, 5));
    }

    #[test]
    fn adding_business_days_skips_weekends() {
        // Friday + 1 = Monday
        assert_eq!(add_business_days(date(2024, 3, 1), 1), date(2024, 3, 4));
        // Thursday + 3 = Tuesday
        assert_eq!(add_business_days(date(2024, 2, 29), 3), date(2024, 3, 5));
        assert_eq!(add_business_days(date(2024, 3, 4), 0), date(2024, 3, 4));
    }

    #[test]
    fn saturday_shipment_for_next_day_tier() {
        let catalog = ReferenceCatalog::builtin();
        let tier = catalog.tier(TierId::NextDayAir).unwrap();
        let estimate = estimate_delivery(tier, date(2024, 3, 2));

        assert_eq!(estimate.effective_ship_date, date(2024, 3, 4));
        assert_eq!(estimate.delivery_date, date(2024, 3, 5));
        assert_eq!(estimate.formatted, "Tuesday, March 5, 2024");
        assert_eq!(estimate.business_days, 1);
    }

    #[test]
    fn delivery_always_lands_on_weekday() {
        let catalog = ReferenceCatalog::builtin();
        let start = date(2024, 1, 1);
        for offset in 0..21 {
            let ship = start + Duration::days(offset);
            for tier in catalog.tiers() {
                let estimate = estimate_delivery(tier, ship);
                assert!(is_business_day(estimate.delivery_date), "{ship} {}", tier.id);
                assert!(estimate.delivery_date > estimate.effective_ship_date);
            }
        }
    }

    #[test]
    fn commitment_keeps_time_suffix() {
        let catalog = ReferenceCatalog::builtin();
        let nda = catalog.tier(TierId::NextDayAir).unwrap();
        assert_eq!(
            commitment_with_date(nda, date(2024, 3, 4)),
            "Tuesday, March 5, 2024 by 10:30 AM"
        );

        let ground = catalog.tier(TierId::Ground).unwrap();
        assert_eq!(
            commitment_with_date(ground, date(2024, 3, 4)),
            "Thursday, March 7, 2024"
        );
    }

    #[test]
    fn requested_date_checks() {
        let catalog = ReferenceCatalog::builtin();
        let tier = catalog.tier(TierId::SecondDayAir).unwrap();
        let ship = date(2024, 3, 4);

        assert_eq!(
            validate_requested_date(tier, date(2024, 3, 5), ship),
            Err(DateRejection::TooEarly {
                earliest: date(2024, 3, 6)
            })
        );
        assert_eq!(
            validate_requested_date(tier, date(2024, 3, 9), ship),
            Err(DateRejection::NotBusinessDay)
        );
        assert_eq!(validate_requested_date(tier, date(2024, 3, 6), ship), Ok(()));
    }

    #[test]
    fn alternatives_are_consecutive_business_days() {
        let catalog = ReferenceCatalog::builtin();
        let tier = catalog.tier(TierId::ThreeDaySelect).unwrap();
        // Wednesday + 3 = Monday
        let options = alternative_dates(tier, date(2024, 3, 6), 3);
        let dates: Vec<NaiveDate> = options.iter().map(|o| o.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 3, 11), date(2024, 3, 12), date(2024, 3, 13)]
        );
        assert!(alternative_dates(tier, date(2024, 3, 6), 0).is_empty());
    }

    #[test]
    fn commitment_summaries() {
        assert_eq!(
            formatted_commitment(14, "Next Business Day by 8:00 AM"),
            "By 8:30 AM Tomorrow"
        );
        assert_eq!(
            formatted_commitment(16, "Next Business Day by 10:30 AM"),
            "By 10:30 AM Tomorrow"
        );
        assert_eq!(
            formatted_commitment(20, "Next Business Day by 3:00 PM"),
            "Next Business Day"
        );
        assert_eq!(formatted_commitment(40, ""), "Within 2 Business Days");
        assert_eq!(formatted_commitment(72, ""), "Within 3 Business Days");
        assert_eq!(formatted_commitment(120, ""), "Within 5 Business Days");
    }
}
