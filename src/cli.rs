use anyhow::{bail, Result};
use clap::Parser;
use std::path::Path;

/// The annotation export this tool is versioned against.
pub const EXPECTED_INPUT_NAME: &str = "AADR Annotations 2025.tsv";

pub const MIN_CLUSTERS: usize = 5;
pub const MAX_CLUSTERS: usize = 500;

/// Program name plus the positional file and the two optional flag/value pairs.
const MAX_CLI_TOKENS: usize = 6;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the annotation export ("AADR Annotations 2025.tsv")
    pub input_file: String,

    /// Cluster count for Y-chromosome markers (default: 150)
    #[arg(long = "cluster_Y", value_name = "N", default_value_t = 150)]
    pub cluster_y: usize,

    /// Cluster count for mtDNA markers (default: 350)
    #[arg(long = "cluster_mt", value_name = "N", default_value_t = 350)]
    pub cluster_mt: usize,
}

/// Rejects oversized invocations outright, before any flag parsing.
pub fn check_token_count(argc: usize) -> Result<()> {
    if argc > MAX_CLI_TOKENS {
        bail!("too many arguments: pass the annotation export and at most the --cluster_Y/--cluster_mt flags");
    }
    Ok(())
}

impl Args {
    /// Validates the file name and cluster ranges. Runs before any data is
    /// loaded; a failure here terminates the run with a single diagnostic.
    pub fn validate(&self) -> Result<()> {
        let file_name = Path::new(&self.input_file)
            .file_name()
            .and_then(|name| name.to_str());
        if file_name != Some(EXPECTED_INPUT_NAME) {
            bail!("expected the annotation export named \"{}\"", EXPECTED_INPUT_NAME);
        }

        for (flag, value) in [("Y", self.cluster_y), ("mt", self.cluster_mt)] {
            if !(MIN_CLUSTERS..=MAX_CLUSTERS).contains(&value) {
                bail!(
                    "cluster number for {} must be between {} and {}",
                    flag,
                    MIN_CLUSTERS,
                    MAX_CLUSTERS
                );
            }
        }

        Ok(())
    }
}
