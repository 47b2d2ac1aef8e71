//! Hierarchical haplogroup frequency payloads for the cluster popups.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::annotations::types::LineageRecord;

/// Sector color for top-level letters without an entry in the fixed table.
pub const FALLBACK_COLOR: &str = "#808080";

/// Fixed letter colors so a haplogroup keeps its color across every chart.
const LETTER_COLORS: [(&str, &str); 21] = [
    ("A", "#4863A0"),
    ("B", "orange"),
    ("C", "#FBBBB9"),
    ("D", "#CC7A8B"),
    ("E", "#FBE7A1"),
    ("G", "#BDF516"),
    ("H", "#348781"),
    ("I", "#654321"),
    ("J", "#C83F49"),
    ("K", "#9F000F"),
    ("L", "#004225"),
    ("M", "#FEF250"),
    ("N", "#46C7C7"),
    ("O", "#550A35"),
    ("P", "indigo"),
    ("Q", "#C2E5D3"),
    ("R", "#3B3131"),
    ("T", "#667C26"),
    ("U", "#9E7BFF"),
    ("W", "#736F6E"),
    ("X", "#C83F49"),
];

/// The color assigned to a top-level category letter.
pub fn color_for(letter: &str) -> &'static str {
    LETTER_COLORS
        .iter()
        .find(|(key, _)| *key == letter)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

/// Parallel sector arrays in the form the chart library consumes
/// (`branchvalues: "total"`): each node's value is the number of records
/// whose code path passes through it, and every sector of a branch carries
/// the branch's top-letter color.
#[derive(Debug, Default, Serialize)]
pub struct SunburstData {
    pub ids: Vec<String>,
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    pub values: Vec<usize>,
    pub colors: Vec<String>,
}

/// Builds the four-level frequency tree over a cluster's records.
///
/// Node ids are the level values joined with `/`, which cannot occur inside
/// a cleaned code, so ids are unique across depths even when a short code
/// repeats the same value at every level.
pub fn build_sunburst(records: &[&LineageRecord]) -> SunburstData {
    // (depth, id) -> (label, parent id, count); ordered for stable output.
    let mut nodes: BTreeMap<(usize, String), (String, String, usize)> = BTreeMap::new();

    for record in records {
        let levels = &record.levels;
        let path = [&levels.l1, &levels.l2, &levels.l3, &levels.l5];

        let mut id = String::new();
        let mut parent = String::new();
        for (depth, part) in path.iter().enumerate() {
            id = if depth == 0 {
                (*part).clone()
            } else {
                format!("{}/{}", id, part)
            };
            let node = nodes
                .entry((depth, id.clone()))
                .or_insert_with(|| ((*part).clone(), parent.clone(), 0));
            node.2 += 1;
            parent = id.clone();
        }
    }

    let mut data = SunburstData::default();
    for ((_, id), (label, parent, value)) in nodes {
        let top_letter = id.split('/').next().unwrap_or("");
        data.colors.push(color_for(top_letter).to_string());
        data.ids.push(id);
        data.labels.push(label);
        data.parents.push(parent);
        data.values.push(value);
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::decompose::code_levels;
    use crate::annotations::types::{GeoPoint, LineageRecord};

    fn record(code: &str) -> LineageRecord {
        LineageRecord {
            coords: GeoPoint::from_degrees(0.0, 0.0),
            country: "Testland".to_string(),
            mean_bp: 2000.0,
            code: code.to_string(),
            era_bin: None,
            levels: code_levels(code),
        }
    }

    #[test]
    fn test_branch_totals_equal_child_sums() {
        let records = vec![record("R1b1a"), record("R1b2a"), record("R1b1a")];
        let refs: Vec<&LineageRecord> = records.iter().collect();
        let data = build_sunburst(&refs);

        let value_of = |id: &str| -> usize {
            let at = data.ids.iter().position(|i| i == id).expect(id);
            data.values[at]
        };

        assert_eq!(value_of("R"), 3);
        assert_eq!(value_of("R/R1"), 3);
        assert_eq!(value_of("R/R1/R1b"), 3);
        assert_eq!(value_of("R/R1/R1b/R1b1a"), 2);
        assert_eq!(value_of("R/R1/R1b/R1b2a"), 1);
    }

    #[test]
    fn test_ids_are_unique_for_short_codes() {
        let records = vec![record("H"), record("H1")];
        let refs: Vec<&LineageRecord> = records.iter().collect();
        let data = build_sunburst(&refs);

        let mut ids = data.ids.clone();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), data.ids.len(), "duplicate node ids: {:?}", data.ids);

        // A code shorter than a level repeats its value, never errors.
        assert!(data.ids.contains(&"H/H/H/H".to_string()));
    }

    #[test]
    fn test_every_sector_carries_its_top_letter_color() {
        let records = vec![record("R1b"), record("H1")];
        let refs: Vec<&LineageRecord> = records.iter().collect();
        let data = build_sunburst(&refs);

        for (id, color) in data.ids.iter().zip(&data.colors) {
            let top = id.split('/').next().unwrap();
            assert_eq!(*color, color_for(top));
        }
    }

    #[test]
    fn test_unknown_letter_gets_fallback_color() {
        assert_eq!(color_for("Z"), FALLBACK_COLOR);
        assert_eq!(color_for(""), FALLBACK_COLOR);
        assert_eq!(color_for("R"), "#3B3131");
    }
}
