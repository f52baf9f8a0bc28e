use std::io::Cursor;

use ecoship_lib::{
    generate_quotes, load_lanes_from_path, load_lanes_from_reader, Complexity, Error,
    LaneMatch, QuoteRequest, ReferenceCatalog,
};

mod common;

#[test]
fn fixture_lane_table_loads() {
    let lanes = load_lanes_from_path(&common::fixtures_dir().join("lanes.csv"))
        .expect("fixture lanes.csv loads");
    assert_eq!(lanes.len(), 3);

    let nyc = &lanes[0];
    assert_eq!(nyc.key, "NYC_LA");
    assert_eq!(nyc.complexity, Complexity::Complex);
    assert_eq!(nyc.hubs, vec!["Chicago", "Denver"]);
    assert_eq!(nyc.origin.zip_code, "10001");

    let austin = &lanes[2];
    assert_eq!(austin.key, "AUSTIN_OKLAHOMA_CITY");
    assert_eq!(austin.estimated_ground_days, 2);
    assert!(austin.hubs.is_empty());
}

#[test]
fn custom_lanes_drive_quotes() {
    let lanes = load_lanes_from_path(&common::fixtures_dir().join("lanes.csv")).unwrap();
    let catalog = ReferenceCatalog::builtin()
        .with_lanes(lanes)
        .expect("lanes validate");

    let request = QuoteRequest::new("Oklahoma City", "Austin", 1.0);
    let set = generate_quotes(&catalog, &request).expect("quote set");
    assert_eq!(set.route_info.matched, LaneMatch::Reversed);
    assert_eq!(set.route_info.lane_key, "AUSTIN_OKLAHOMA_CITY");
    // Austin to Oklahoma City is short haul.
    assert!(set.quotes.iter().all(|q| q.cost.distance_multiplier == 0.8));
}

#[test]
fn missing_required_columns_are_reported() {
    let csv = "origin_city,destination_city,air_distance_km\nReno,Boise,560\n";
    let err = load_lanes_from_reader(Cursor::new(csv)).expect_err("missing columns");
    let message = err.to_string();
    assert!(matches!(err, Error::CatalogValidation { .. }));
    assert!(message.contains("ground_distance_km"), "{message}");
    assert!(message.contains("base_cost_per_kg"), "{message}");
}

#[test]
fn duplicate_lanes_in_either_direction_are_rejected() {
    let csv = "origin_city,destination_city,air_distance_km,ground_distance_km,base_cost_per_kg\n\
               Reno,Boise,560,690,4.10\n\
               boise,RENO,560,690,4.10\n";
    let err = load_lanes_from_reader(Cursor::new(csv)).expect_err("duplicate lane");
    assert!(matches!(err, Error::DuplicateLane { .. }), "{err}");
}

#[test]
fn non_positive_distances_are_rejected() {
    let csv = "origin_city,destination_city,air_distance_km,ground_distance_km,base_cost_per_kg\n\
               Reno,Boise,0,690,4.10\n";
    let err = load_lanes_from_reader(Cursor::new(csv)).expect_err("zero distance");
    assert!(matches!(err, Error::LaneData { .. }), "{err}");
}

#[test]
fn unparsable_number_names_the_row() {
    let csv = "origin_city,destination_city,air_distance_km,ground_distance_km,base_cost_per_kg\n\
               Reno,Boise,far,690,4.10\n";
    let err = load_lanes_from_reader(Cursor::new(csv)).expect_err("bad number");
    assert!(err.to_string().contains("row 2"), "{err}");
}
