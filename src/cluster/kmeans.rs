//! Deterministic k-means over deduplicated sample coordinates.

use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;

use crate::annotations::types::{GeoPoint, LineageRecord};

const SEED: u64 = 42;
const N_INIT: usize = 10;
const MAX_ITER: usize = 300;

/// A spatial partition of the deduplicated coordinate set.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    pub centroids: Vec<(f64, f64)>,
    /// Cluster label per input point, parallel to the input slice.
    pub labels: Vec<usize>,
}

/// Collects the distinct coordinates of a lineage dataset in first-seen
/// order. This is the clusterer's input.
pub fn dedup_points(records: &[LineageRecord]) -> Vec<GeoPoint> {
    let mut seen = std::collections::HashSet::new();
    let mut points = Vec::new();
    for record in records {
        if seen.insert(record.coords) {
            points.push(record.coords);
        }
    }
    points
}

/// Partitions `points` into exactly `k` clusters.
///
/// k-means++ seeding, Lloyd iterations to convergence (or 300 rounds), ten
/// restarts keeping the lowest within-cluster sum of squares, all driven by
/// a fixed-seed RNG: the same input always yields the same assignment.
///
/// A `k` above the distinct coordinate count is rejected here, before any
/// work is done, so every returned cluster has at least one member.
pub fn cluster_coordinates(points: &[GeoPoint], k: usize) -> Result<Clustering> {
    if k == 0 {
        bail!("cluster count must be positive");
    }
    if k > points.len() {
        bail!(
            "requested cluster count {} exceeds the {} distinct sample coordinates",
            k,
            points.len()
        );
    }

    let coords: Vec<[f64; 2]> = points.iter().map(|p| [p.lat(), p.lon()]).collect();
    let mut rng = StdRng::seed_from_u64(SEED);

    let mut best_inertia = f64::INFINITY;
    let mut best_centers = Vec::new();
    let mut best_labels = Vec::new();

    for _ in 0..N_INIT {
        let run = lloyd(&coords, k, &mut rng);
        if run.inertia < best_inertia {
            best_inertia = run.inertia;
            best_centers = run.centers;
            best_labels = run.labels;
        }
    }

    Ok(Clustering {
        centroids: best_centers.iter().map(|c| (c[0], c[1])).collect(),
        labels: best_labels,
    })
}

struct KmeansRun {
    centers: Vec<[f64; 2]>,
    labels: Vec<usize>,
    inertia: f64,
}

fn lloyd(coords: &[[f64; 2]], k: usize, rng: &mut StdRng) -> KmeansRun {
    let mut centers = seed_centers(coords, k, rng);
    let mut labels = vec![0usize; coords.len()];

    for _ in 0..MAX_ITER {
        let mut changed = false;
        for (i, point) in coords.iter().enumerate() {
            let nearest = nearest_center(point, &centers);
            if labels[i] != nearest {
                labels[i] = nearest;
                changed = true;
            }
        }

        let mut sums = vec![[0.0f64; 2]; k];
        let mut counts = vec![0usize; k];
        for (point, &label) in coords.iter().zip(&labels) {
            sums[label][0] += point[0];
            sums[label][1] += point[1];
            counts[label] += 1;
        }
        for j in 0..k {
            if counts[j] > 0 {
                centers[j] = [
                    sums[j][0] / counts[j] as f64,
                    sums[j][1] / counts[j] as f64,
                ];
            } else {
                // A cluster emptied mid-iteration: restart it on the point
                // currently worst-served by its own center.
                centers[j] = farthest_point(coords, &centers, &labels);
            }
        }

        if !changed {
            break;
        }
    }

    // Final assignment against the settled centers, so every point carries
    // the label of its nearest centroid even when the iteration cap hit.
    for (i, point) in coords.iter().enumerate() {
        labels[i] = nearest_center(point, &centers);
    }

    let inertia = coords
        .iter()
        .zip(&labels)
        .map(|(point, &label)| sq_dist(point, &centers[label]))
        .sum();

    KmeansRun {
        centers,
        labels,
        inertia,
    }
}

/// k-means++ seeding: the first center is uniform, each further center is
/// drawn weighted by squared distance to the nearest chosen center.
fn seed_centers(coords: &[[f64; 2]], k: usize, rng: &mut StdRng) -> Vec<[f64; 2]> {
    let mut centers = Vec::with_capacity(k);
    centers.push(coords[rng.gen_range(0..coords.len())]);

    let mut dists: Vec<f64> = coords.iter().map(|p| sq_dist(p, &centers[0])).collect();

    while centers.len() < k {
        let total: f64 = dists.iter().sum();
        let pick = if total > 0.0 {
            let mut target = rng.gen_range(0.0..total);
            let mut pick = coords.len() - 1;
            for (i, dist) in dists.iter().enumerate() {
                if target < *dist {
                    pick = i;
                    break;
                }
                target -= dist;
            }
            pick
        } else {
            rng.gen_range(0..coords.len())
        };
        centers.push(coords[pick]);

        for (i, point) in coords.iter().enumerate() {
            let dist = sq_dist(point, &centers[centers.len() - 1]);
            if dist < dists[i] {
                dists[i] = dist;
            }
        }
    }

    centers
}

fn nearest_center(point: &[f64; 2], centers: &[[f64; 2]]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (j, center) in centers.iter().enumerate() {
        let dist = sq_dist(point, center);
        if dist < best_dist {
            best_dist = dist;
            best = j;
        }
    }
    best
}

fn farthest_point(coords: &[[f64; 2]], centers: &[[f64; 2]], labels: &[usize]) -> [f64; 2] {
    coords
        .iter()
        .zip(labels)
        .max_by(|(a, &la), (b, &lb)| {
            let da = sq_dist(a, &centers[la]);
            let db = sq_dist(b, &centers[lb]);
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        })
        .map(|(point, _)| *point)
        .unwrap_or([0.0, 0.0])
}

fn sq_dist(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)
}
