use std::io::Write;

use ecoship_lib::{CatalogProvider, Error, ReferenceCatalog, TierId};
use tempfile::NamedTempFile;

fn builtin_json() -> serde_json::Value {
    serde_json::to_value(ReferenceCatalog::builtin()).expect("catalog serializes")
}

fn write_json(value: &serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{value}").expect("write catalog");
    file
}

#[test]
fn json_catalog_round_trips_through_a_file() {
    let file = write_json(&builtin_json());
    let catalog = ReferenceCatalog::from_json_path(file.path()).expect("catalog loads");

    assert_eq!(catalog.tiers().len(), 6);
    assert_eq!(catalog.lanes().len(), 15);
    assert_eq!(catalog.source_path(), Some(file.path()));
    assert_eq!(
        catalog.tier(TierId::SecondDayAir).unwrap().premium_multiplier,
        0.95
    );
}

#[test]
fn transport_mix_must_sum_to_one_hundred() {
    let mut value = builtin_json();
    value["tiers"][0]["mix"]["ground_pct"] = serde_json::json!(4.0);
    let file = write_json(&value);

    let err = ReferenceCatalog::from_json_path(file.path()).expect_err("bad mix");
    assert!(matches!(err, Error::CatalogValidation { .. }), "{err}");
    assert!(err.to_string().contains("sum to 100"), "{err}");
}

#[test]
fn mix_within_tolerance_is_accepted() {
    let mut value = builtin_json();
    value["tiers"][0]["mix"]["ground_pct"] = serde_json::json!(5.005);
    let file = write_json(&value);
    assert!(ReferenceCatalog::from_json_path(file.path()).is_ok());
}

#[test]
fn empty_tier_list_is_rejected() {
    let mut value = builtin_json();
    value["tiers"] = serde_json::json!([]);
    let file = write_json(&value);

    let err = ReferenceCatalog::from_json_path(file.path()).expect_err("no tiers");
    assert!(matches!(err, Error::EmptyTierCatalog));
}

#[test]
fn malformed_json_surfaces_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{ \"tiers\": [").unwrap();
    let err = ReferenceCatalog::from_json_path(file.path()).expect_err("truncated");
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn missing_file_surfaces_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ReferenceCatalog::from_json_path(&dir.path().join("absent.json"))
        .expect_err("missing file");
    assert!(matches!(err, Error::Io(_)));
}
