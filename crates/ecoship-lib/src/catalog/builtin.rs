//! Reference data shipped with the library.

use super::lane::{lane_key, Complexity, Lane, Location};
use super::tier::{ServiceClass, Tier, TierBadge, TierId, TransportMix};
use super::weight::WeightBand;

#[allow(clippy::too_many_arguments)]
fn tier(
    id: TierId,
    name: &str,
    code: &str,
    commitment: &str,
    eta_hours: u32,
    (air_pct, ground_pct): (f64, f64),
    base_cost_multiplier: f64,
    premium_multiplier: f64,
    minimum_charge_usd: f64,
    business_days: u32,
    priority: u8,
    service_class: ServiceClass,
    badge: TierBadge,
    description: &str,
) -> Tier {
    Tier {
        id,
        name: name.to_string(),
        code: code.to_string(),
        commitment: commitment.to_string(),
        eta_hours,
        mix: TransportMix::new(air_pct, ground_pct),
        base_cost_multiplier,
        premium_multiplier,
        minimum_charge_usd,
        business_days,
        priority,
        service_class,
        badge,
        description: description.to_string(),
        tracking_included: true,
        insurance_included: false,
        signature_required: id == TierId::NextDayAirEarly,
    }
}

pub(crate) fn tiers() -> Vec<Tier> {
    vec![
        tier(
            TierId::NextDayAirEarly,
            "UPS Next Day Air Early",
            "14",
            "Next Business Day by 8:00 AM",
            14,
            (95.0, 5.0),
            4.5,
            1.15,
            95.0,
            1,
            1,
            ServiceClass::Express,
            TierBadge::Standard,
            "Fastest delivery option with early morning commitment",
        ),
        tier(
            TierId::NextDayAir,
            "UPS Next Day Air",
            "01",
            "Next Business Day by 10:30 AM",
            16,
            (90.0, 10.0),
            3.8,
            1.05,
            75.0,
            1,
            2,
            ServiceClass::Express,
            TierBadge::Standard,
            "Premium next-day delivery service",
        ),
        tier(
            TierId::NextDayAirSaver,
            "UPS Next Day Air Saver",
            "13",
            "Next Business Day by 3:00 PM",
            20,
            (85.0, 15.0),
            3.2,
            1.0,
            65.0,
            1,
            3,
            ServiceClass::Express,
            TierBadge::Standard,
            "Cost-effective next-day delivery option",
        ),
        tier(
            TierId::SecondDayAir,
            "UPS 2nd Day Air",
            "02",
            "2 Business Days by 10:30 AM",
            40,
            (75.0, 25.0),
            2.1,
            0.95,
            35.0,
            2,
            4,
            ServiceClass::Standard,
            TierBadge::EcoFriendly,
            "Reliable 2-day delivery with air transport",
        ),
        tier(
            TierId::ThreeDaySelect,
            "UPS 3-Day Select",
            "12",
            "3 Business Days by End of Day",
            72,
            (40.0, 60.0),
            1.6,
            0.90,
            25.0,
            3,
            5,
            ServiceClass::Standard,
            TierBadge::EcoFriendly,
            "Economical 3-day delivery with mixed transport",
        ),
        tier(
            TierId::Ground,
            "UPS Ground",
            "03",
            "1-5 Business Days",
            120,
            (5.0, 95.0),
            1.0,
            0.85,
            15.0,
            3,
            6,
            ServiceClass::Ground,
            TierBadge::CarbonNeutral,
            "Most environmentally friendly ground delivery option",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn lane(
    origin: (&str, &str, &str),
    destination: (&str, &str, &str),
    air_distance_km: f64,
    ground_distance_km: f64,
    base_cost_per_kg: f64,
    complexity: Complexity,
    estimated_ground_days: u32,
    hubs: &[&str],
    description: &str,
) -> Lane {
    Lane {
        key: lane_key(origin.0, destination.0),
        origin: Location::new(origin.0, origin.1, origin.2),
        destination: Location::new(destination.0, destination.1, destination.2),
        air_distance_km,
        ground_distance_km,
        base_cost_per_kg,
        complexity,
        estimated_ground_days,
        hubs: hubs.iter().map(|h| h.to_string()).collect(),
        description: description.to_string(),
        is_fallback: false,
    }
}

pub(crate) fn lanes() -> Vec<Lane> {
    use Complexity::{Complex, Moderate, Simple};

    let mut lanes = vec![
        lane(
            ("New York", "NY", "10001"),
            ("Los Angeles", "CA", "90210"),
            3944.0,
            4501.0,
            8.50,
            Complex,
            5,
            &["Chicago", "Denver"],
            "Cross-country route from East Coast to West Coast",
        ),
        lane(
            ("San Francisco", "CA", "94102"),
            ("Chicago", "IL", "60601"),
            2960.0,
            3420.0,
            7.25,
            Moderate,
            4,
            &["Denver", "Kansas City"],
            "West Coast to Midwest major business corridor",
        ),
        lane(
            ("Miami", "FL", "33101"),
            ("Seattle", "WA", "98101"),
            4308.0,
            5145.0,
            9.75,
            Complex,
            5,
            &["Atlanta", "Chicago", "Denver"],
            "Southeast to Pacific Northwest diagonal route",
        ),
        lane(
            ("Boston", "MA", "02101"),
            ("Dallas", "TX", "75201"),
            2563.0,
            3089.0,
            6.80,
            Moderate,
            3,
            &["New York", "Atlanta"],
            "Northeast to South-Central business route",
        ),
        lane(
            ("Denver", "CO", "80202"),
            ("Atlanta", "GA", "30303"),
            1770.0,
            2092.0,
            5.90,
            Simple,
            3,
            &["Kansas City"],
            "Mountain West to Southeast hub-to-hub route",
        ),
        lane(
            ("Phoenix", "AZ", "85001"),
            ("Detroit", "MI", "48201"),
            2570.0,
            2890.0,
            7.10,
            Moderate,
            4,
            &["Denver", "Chicago"],
            "Southwest to Great Lakes industrial corridor",
        ),
        lane(
            ("Portland", "OR", "97201"),
            ("Houston", "TX", "77001"),
            2890.0,
            3420.0,
            7.80,
            Moderate,
            4,
            &["San Francisco", "Los Angeles", "Phoenix"],
            "Pacific Northwest to Gulf Coast energy corridor",
        ),
        lane(
            ("Orlando", "FL", "32801"),
            ("Minneapolis", "MN", "55401"),
            1890.0,
            2245.0,
            6.20,
            Simple,
            3,
            &["Atlanta", "Chicago"],
            "Southeast tourism hub to Upper Midwest",
        ),
        lane(
            ("Salt Lake City", "UT", "84101"),
            ("Philadelphia", "PA", "19101"),
            2890.0,
            3380.0,
            7.60,
            Moderate,
            4,
            &["Denver", "Chicago"],
            "Mountain West to Northeast corridor",
        ),
        lane(
            ("Nashville", "TN", "37201"),
            ("San Diego", "CA", "92101"),
            2780.0,
            3290.0,
            7.40,
            Moderate,
            4,
            &["Dallas", "Phoenix"],
            "Music City to Southern California coast",
        ),
        lane(
            ("Charlotte", "NC", "28201"),
            ("Kansas City", "MO", "64101"),
            1120.0,
            1340.0,
            4.80,
            Simple,
            2,
            &["Atlanta"],
            "Southeast financial hub to Midwest logistics center",
        ),
        lane(
            ("Sacramento", "CA", "95814"),
            ("Memphis", "TN", "38101"),
            2650.0,
            3120.0,
            7.20,
            Moderate,
            4,
            &["Denver", "Dallas"],
            "California capital to Mid-South distribution hub",
        ),
        lane(
            ("Buffalo", "NY", "14201"),
            ("Albuquerque", "NM", "87101"),
            2420.0,
            2890.0,
            6.90,
            Moderate,
            4,
            &["Chicago", "Denver"],
            "Great Lakes region to Southwest high desert",
        ),
        lane(
            ("Richmond", "VA", "23219"),
            ("Milwaukee", "WI", "53201"),
            1180.0,
            1420.0,
            5.10,
            Simple,
            2,
            &["Washington DC", "Chicago"],
            "Mid-Atlantic to Great Lakes manufacturing region",
        ),
        lane(
            ("Tucson", "AZ", "85701"),
            ("Columbus", "OH", "43215"),
            2340.0,
            2780.0,
            6.70,
            Moderate,
            3,
            &["Phoenix", "Denver", "Chicago"],
            "Desert Southwest to Ohio Valley business center",
        ),
    ];

    // Historical short keys for the two original coast-to-coast lanes.
    lanes[0].key = "NYC_LA".to_string();
    lanes[1].key = "SF_CHICAGO".to_string();
    lanes
}

pub(crate) fn weight_bands() -> Vec<WeightBand> {
    vec![
        WeightBand::new("envelope", 0.5, 0.8, "Documents, letters, small flat items"),
        WeightBand::new("small", 2.0, 0.9, "Small electronics, books, accessories"),
        WeightBand::new("medium", 10.0, 1.0, "Clothing, shoes, medium electronics"),
        WeightBand::new("large", 70.0, 1.2, "Large appliances, furniture, bulk items"),
    ]
}
