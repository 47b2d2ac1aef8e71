use std::io::Write;

use haplomap::annotations::types::Lineage;
use haplomap::annotations::{filter, loader};
use haplomap::cluster::kmeans::{cluster_coordinates, dedup_points};

const BP_HEADER: &str = "Date mean in BP in years before 1950 CE [OxCal mu for a direct radiocarbon date, and average of range for a contextual date]";

fn write_fixture(rows: &[[&str; 6]]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("fixture file");
    writeln!(
        file,
        "Genetic ID\t{}\tPolitical Entity\tLat.\tLong.\tY haplogroup (manual curation in ISOGG format)\tmtDNA haplogroup if >2x or published",
        BP_HEADER
    )
    .expect("header");
    for (i, row) in rows.iter().enumerate() {
        writeln!(
            file,
            "I{:04}\t{}",
            i,
            row.join("\t")
        )
        .expect("row");
    }
    file.flush().expect("flush");
    file
}

// Ten samples: three modern (BP 0) rows are dropped outright, the seven
// ancient ones span 500-2500 BP. The Y-valid rows share only four distinct
// coordinates, so a requested k of 5 must be rejected, deterministically.
fn scenario_rows() -> Vec<[&'static str; 6]> {
    vec![
        ["0", "France", "48.85", "2.35", "R1b1", "H1"],
        ["0", "Spain", "40.41", "-3.70", "I2a", "U5a"],
        ["0", "Italy", "41.89", "12.48", "G2a", "K1a"],
        ["500", "France", "48.85", "2.35", "R1b1", "H1"],
        ["800", "France", "48.85", "2.35", "R1b2", "H2"],
        ["1200", "Spain", "40.41", "-3.70", "I2a", "U5a"],
        ["1500", "Spain", "40.41", "-3.70", "G2a", "K1a"],
        ["2000", "Gernamy", "52.52", "13.40", "R1a", "J1c"],
        ["2200", "Italy", "41.89", "12.48", "E1b", "T2b"],
        ["2500", "Italy", "45.46", "9.18", "n/a", "H3"],
    ]
}

#[test]
fn modern_rows_are_excluded_and_eras_derived() {
    let file = write_fixture(&scenario_rows());
    let records = loader::load_annotations(file.path()).expect("load");

    assert_eq!(records.len(), 7);
    assert!(records.iter().all(|record| record.mean_bp != 0.0));

    assert_eq!(records[0].era, "1450 AD");
    assert_eq!(records[6].era, "551 BC");
}

#[test]
fn country_typos_are_fixed() {
    let file = write_fixture(&scenario_rows());
    let records = loader::load_annotations(file.path()).expect("load");

    assert!(records.iter().any(|record| record.country == "Germany"));
    assert!(records.iter().all(|record| record.country != "Gernamy"));
}

#[test]
fn oversized_k_is_rejected_for_the_sparser_lineage() {
    let file = write_fixture(&scenario_rows());
    let records = loader::load_annotations(file.path()).expect("load");

    let paternal = filter::derive_dataset(&records, Lineage::Paternal);
    assert_eq!(paternal.records.len(), 6);

    let points = dedup_points(&paternal.records);
    assert_eq!(points.len(), 4);

    let first = cluster_coordinates(&points, 5).expect_err("k above distinct count");
    let second = cluster_coordinates(&points, 5).expect_err("k above distinct count");
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn sibling_lineage_still_clusters() {
    let file = write_fixture(&scenario_rows());
    let records = loader::load_annotations(file.path()).expect("load");

    let maternal = filter::derive_dataset(&records, Lineage::Maternal);
    assert_eq!(maternal.records.len(), 7);

    let points = dedup_points(&maternal.records);
    assert_eq!(points.len(), 5);

    let clustering = cluster_coordinates(&points, 5).expect("clustering");
    assert_eq!(clustering.centroids.len(), 5);
    assert_eq!(clustering.labels.len(), 5);
}

#[test]
fn missing_required_column_is_fatal() {
    let mut file = tempfile::NamedTempFile::new().expect("fixture file");
    writeln!(
        file,
        "Genetic ID\t{}\tPolitical Entity\tLong.\tY haplogroup (manual curation in ISOGG format)\tmtDNA haplogroup if >2x or published",
        BP_HEADER
    )
    .expect("header");
    writeln!(file, "I0001\t500\tFrance\t2.35\tR1b1\tH1").expect("row");
    file.flush().expect("flush");

    let err = loader::load_annotations(file.path()).expect_err("schema drift must abort");
    assert!(format!("{:#}", err).contains("Lat."), "unexpected error: {:#}", err);
}

#[test]
fn placeholder_coordinates_skip_the_record_per_lineage() {
    let rows = vec![
        ["500", "France", "..", "..", "R1b1", "H1"],
        ["800", "France", "48.85", "2.35", "R1b2", "H2"],
    ];
    let file = write_fixture(&rows);
    let records = loader::load_annotations(file.path()).expect("load");
    assert_eq!(records.len(), 2);
    assert!(records[0].coords.is_none());

    let paternal = filter::derive_dataset(&records, Lineage::Paternal);
    assert_eq!(paternal.records.len(), 1);
    assert_eq!(paternal.records[0].code, "R1b2");
}
