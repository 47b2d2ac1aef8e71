//! Spatial clustering of sample locations and per-cluster aggregation.

pub mod aggregate;
pub mod kmeans;
