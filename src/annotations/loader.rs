//! Annotation spreadsheet ingestion and normalization.

use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use crate::annotations::types::{GeoPoint, SampleRecord};

const COL_MEAN_BP: &str = "Date mean in BP in years before 1950 CE [OxCal mu for a direct radiocarbon date, and average of range for a contextual date]";
const COL_COUNTRY: &str = "Political Entity";
const COL_LAT: &str = "Lat.";
const COL_LONG: &str = "Long.";
const COL_Y_CODE: &str = "Y haplogroup (manual curation in ISOGG format)";
const COL_MT_CODE: &str = "mtDNA haplogroup if >2x or published";

/// Known misspelled or overlong country names, fixed by exact match.
const COUNTRY_FIXES: [(&str, &str); 4] = [
    ("China ", "China"),
    ("Gernamy", "Germany"),
    ("Turkey ", "Turkey"),
    ("Federated States of Micronesia", "Micronesia"),
];

/// Placeholder the source uses for a missing coordinate.
const MISSING_COORD: &str = "..";

struct SchemaIndex {
    mean_bp: usize,
    country: usize,
    lat: usize,
    long: usize,
    y_code: usize,
    mt_code: usize,
}

impl SchemaIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        Ok(SchemaIndex {
            mean_bp: find_column(headers, COL_MEAN_BP)?,
            country: find_column(headers, COL_COUNTRY)?,
            lat: find_column(headers, COL_LAT)?,
            long: find_column(headers, COL_LONG)?,
            y_code: find_column(headers, COL_Y_CODE)?,
            mt_code: find_column(headers, COL_MT_CODE)?,
        })
    }
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == name)
        .with_context(|| format!("input schema error: required column {:?} is missing", name))
}

/// Loads the tab-separated annotation export and normalizes every row.
///
/// Rows whose mean BP is exactly zero are modern samples and are dropped.
/// Rows without a parseable mean BP are skipped and tallied. A missing
/// required column is fatal before any row is processed.
pub fn load_annotations(path: &Path) -> Result<Vec<SampleRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("failed to read the header row of {}", path.display()))?
        .clone();
    let schema = SchemaIndex::resolve(&headers)?;

    let mut records = Vec::new();
    let mut modern = 0usize;
    let mut unparsable = 0usize;

    for row in reader.records() {
        let row = row.context("failed to read an annotation row")?;

        let mean_bp = match row.get(schema.mean_bp).map(str::trim) {
            Some(cell) if !cell.is_empty() => match cell.parse::<f64>() {
                Ok(value) => value,
                Err(_) => {
                    unparsable += 1;
                    continue;
                }
            },
            _ => {
                unparsable += 1;
                continue;
            }
        };
        if mean_bp == 0.0 {
            modern += 1;
            continue;
        }

        records.push(SampleRecord {
            era: era_label(mean_bp),
            country: normalize_country(row.get(schema.country).unwrap_or("")),
            coords: parse_coords(row.get(schema.lat), row.get(schema.long)),
            y_code: non_empty(row.get(schema.y_code)),
            mt_code: non_empty(row.get(schema.mt_code)),
            mean_bp,
        });
    }

    info!(
        "loaded {} ancient samples ({} modern rows excluded, {} rows without a usable mean BP skipped)",
        records.len(),
        modern,
        unparsable
    );
    Ok(records)
}

/// Translates a BP age into its calendar-era display label, with 1950 CE as
/// the present.
pub fn era_label(mean_bp: f64) -> String {
    let bp = mean_bp.round() as i64;
    if mean_bp >= 1950.0 {
        format!("{} BC", bp - 1949)
    } else {
        format!("{} AD", 1950 - bp)
    }
}

fn normalize_country(raw: &str) -> String {
    for (wrong, fixed) in COUNTRY_FIXES {
        if raw == wrong {
            return fixed.to_string();
        }
    }
    raw.to_string()
}

fn parse_coords(lat: Option<&str>, long: Option<&str>) -> Option<GeoPoint> {
    let lat = parse_coord(lat)?;
    let long = parse_coord(long)?;
    Some(GeoPoint::from_degrees(lat, long))
}

fn parse_coord(cell: Option<&str>) -> Option<f64> {
    let cell = cell?.trim();
    if cell.is_empty() || cell == MISSING_COORD {
        return None;
    }
    cell.parse().ok()
}

fn non_empty(cell: Option<&str>) -> Option<String> {
    let cell = cell?;
    if cell.trim().is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}
