//! The map-generation pipeline: ingest, filter, cluster, aggregate, render.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::fs;
use std::path::Path;

use crate::annotations::binning::ERA_BINS;
use crate::annotations::types::{Lineage, LineageDataset};
use crate::annotations::{filter, loader};
use crate::cli::Args;
use crate::cluster::{aggregate, kmeans};
use crate::config::Config;
use crate::map::render::{self, MarkerData};
use crate::utils::browser;

pub fn run(args: &Args) -> Result<()> {
    let config = Config::load();

    let records = loader::load_annotations(Path::new(&args.input_file))?;

    // The two lineage pipelines are fully independent: a record can appear
    // in one, both, or neither dataset.
    let paternal = filter::derive_dataset(&records, Lineage::Paternal);
    let maternal = filter::derive_dataset(&records, Lineage::Maternal);

    let mut markers = Vec::new();
    for (dataset, k) in [(&paternal, args.cluster_y), (&maternal, args.cluster_mt)] {
        markers.extend(cluster_lineage(dataset, k)?);
    }

    let era_tags = present_era_tags(&[&paternal, &maternal]);

    let html = render::render_map(&markers, &era_tags, &config)?;
    let output = Path::new(&config.output_file);
    fs::write(output, html).with_context(|| format!("failed to write {}", output.display()))?;
    info!("wrote {} ({} markers)", output.display(), markers.len());

    if config.open_viewer {
        if let Err(e) = browser::open_in_viewer(output) {
            warn!("could not open {} in a viewer: {:#}", output.display(), e);
        }
    }

    Ok(())
}

fn cluster_lineage(dataset: &LineageDataset, k: usize) -> Result<Vec<MarkerData>> {
    let points = kmeans::dedup_points(&dataset.records);
    info!(
        "{}: clustering {} distinct locations into {} groups",
        dataset.lineage.label(),
        points.len(),
        k
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(format!(
        "Clustering {} sample locations...",
        dataset.lineage.label()
    ));

    let clustering = kmeans::cluster_coordinates(&points, k)
        .with_context(|| format!("clustering the {} dataset failed", dataset.lineage.label()))?;
    spinner.finish_and_clear();

    let summaries = aggregate::summarize_clusters(&dataset.records, &points, &clustering);
    Ok(summaries
        .iter()
        .filter_map(|cluster| render::marker_data(dataset.lineage, cluster))
        .collect())
}

/// The era-bin labels present anywhere in the given datasets, in ascending
/// bin order. These drive the map's tag-filter buttons.
fn present_era_tags(datasets: &[&LineageDataset]) -> Vec<&'static str> {
    ERA_BINS
        .iter()
        .filter(|bin| {
            datasets.iter().any(|dataset| {
                dataset
                    .records
                    .iter()
                    .any(|record| record.era_bin == Some(*bin))
            })
        })
        .map(|bin| bin.label)
        .collect()
}
