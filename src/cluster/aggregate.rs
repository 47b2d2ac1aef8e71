//! Per-cluster record aggregation for the rendered markers.

use std::collections::HashMap;

use crate::annotations::binning::{EraBin, ERA_BINS};
use crate::annotations::types::{GeoPoint, LineageRecord};
use crate::cluster::kmeans::Clustering;

/// Everything a marker needs to describe one cluster.
#[derive(Debug)]
pub struct ClusterSummary<'a> {
    pub id: usize,
    pub centroid: (f64, f64),
    pub records: Vec<&'a LineageRecord>,
    /// Distinct countries in first-seen order.
    pub countries: Vec<String>,
    /// Merged min-max era range, absent when no member carries an era bin.
    pub era_range: Option<String>,
    /// Era-bin labels present in this cluster, sorted by lower bound.
    pub tags: Vec<&'static str>,
}

impl ClusterSummary<'_> {
    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    /// A single country is printed bare; two or more are newline-joined in
    /// first-seen order (the popup renders `<br>` as the line break).
    pub fn country_display(&self) -> String {
        if self.countries.len() < 2 {
            self.countries.first().cloned().unwrap_or_default()
        } else {
            self.countries.join("<br>")
        }
    }
}

/// Groups the lineage records into the clusters their coordinates belong to
/// and derives each cluster's summary. Clusters are returned in id order;
/// an empty cluster yields a zero summary rather than a panic.
pub fn summarize_clusters<'a>(
    records: &'a [LineageRecord],
    points: &[GeoPoint],
    clustering: &Clustering,
) -> Vec<ClusterSummary<'a>> {
    let point_label: HashMap<GeoPoint, usize> = points
        .iter()
        .copied()
        .zip(clustering.labels.iter().copied())
        .collect();

    let mut members: Vec<Vec<&LineageRecord>> = vec![Vec::new(); clustering.centroids.len()];
    for record in records {
        if let Some(&label) = point_label.get(&record.coords) {
            members[label].push(record);
        }
    }

    members
        .into_iter()
        .enumerate()
        .map(|(id, records)| {
            let bins = distinct_bins(&records);
            ClusterSummary {
                id,
                centroid: clustering.centroids[id],
                countries: unique_countries(&records),
                era_range: merged_era_range(&bins),
                tags: bins.iter().map(|bin| bin.label).collect(),
                records,
            }
        })
        .collect()
}

fn unique_countries(records: &[&LineageRecord]) -> Vec<String> {
    let mut countries: Vec<String> = Vec::new();
    for record in records {
        if !countries.iter().any(|seen| *seen == record.country) {
            countries.push(record.country.clone());
        }
    }
    countries
}

/// The distinct era bins present, in bin-table order (ascending lower bound).
fn distinct_bins(records: &[&LineageRecord]) -> Vec<&'static EraBin> {
    ERA_BINS
        .iter()
        .filter(|bin| records.iter().any(|record| record.era_bin == Some(*bin)))
        .collect()
}

/// Renders the merged era range of a sorted bin set: `"{bin} BP"` when the
/// first lower bound equals the last upper bound, `"{lower}-{upper} BP"`
/// otherwise. `None` for an empty set.
pub fn merged_era_range(bins: &[&'static EraBin]) -> Option<String> {
    let first = bins.first()?;
    let last = bins.last()?;
    if first.lower == last.upper {
        Some(format!("{} BP", first.label))
    } else {
        Some(format!("{}-{} BP", first.lower, last.upper))
    }
}
