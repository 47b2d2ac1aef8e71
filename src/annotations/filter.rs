//! Per-lineage record filtering and haplogroup code cleanup.

use log::{debug, info};
use regex::Regex;
use std::sync::OnceLock;

use crate::annotations::binning::{self, ERA_BINS};
use crate::annotations::decompose::code_levels;
use crate::annotations::types::{Lineage, LineageDataset, LineageRecord, SampleRecord};

/// Sentinel the source uses for a code that could not be resolved.
const UNRESOLVED_CODE: &str = "..";

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("n/a|na|NaN|not|Likely").expect("placeholder pattern"))
}

fn truncation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Literal port of the source cleanup rule. The character class spells
    // out `-or`, so a lone `o` or `r` also cuts; downstream consumers expect
    // the truncated output exactly as this produces it.
    RE.get_or_init(|| Regex::new(r"[+/()'~@\-or\s].*").expect("truncation pattern"))
}

/// Truncates a raw code at the first suffix-annotation character, leaving
/// only the root code prefix. Idempotent.
pub fn clean_code(raw: &str) -> String {
    truncation_re().replace(raw, "").into_owned()
}

/// Derives one lineage's dataset from the normalized records.
///
/// Records without coordinates, without a code for this lineage, or with a
/// placeholder code are excluded. Surviving codes are truncated to their
/// root form; records whose code then equals ".." are removed and tallied.
/// The sibling lineage never influences the outcome.
pub fn derive_dataset(records: &[SampleRecord], lineage: Lineage) -> LineageDataset {
    let mut kept = Vec::new();
    let mut unresolved = 0usize;

    for record in records {
        let Some(coords) = record.coords else {
            continue;
        };
        let Some(raw_code) = record.code_for(lineage) else {
            continue;
        };
        if placeholder_re().is_match(raw_code) {
            continue;
        }

        let code = clean_code(raw_code);
        if code == UNRESOLVED_CODE {
            unresolved += 1;
            continue;
        }

        kept.push(LineageRecord {
            coords,
            country: record.country.clone(),
            mean_bp: record.mean_bp,
            era_bin: binning::bin_for(record.mean_bp),
            levels: code_levels(&code),
            code,
        });
    }

    let dataset = LineageDataset {
        lineage,
        records: kept,
        unresolved_count: unresolved,
    };
    report(&dataset);
    dataset
}

fn report(dataset: &LineageDataset) {
    let label = dataset.lineage.label();

    if dataset.unresolved_count > 0 {
        info!(
            "{}: removed {} records with unresolved (..) codes",
            label, dataset.unresolved_count
        );
    }

    let ages = dataset.records.iter().map(|record| record.mean_bp);
    let youngest = ages.clone().fold(f64::INFINITY, f64::min);
    let oldest = ages.fold(f64::NEG_INFINITY, f64::max);
    if youngest.is_finite() {
        info!(
            "{}: {} records spanning {:.0}-{:.0} BP",
            label,
            dataset.records.len(),
            youngest,
            oldest
        );
    } else {
        info!("{}: no usable records", label);
    }

    for bin in &ERA_BINS {
        let count = dataset
            .records
            .iter()
            .filter(|record| record.era_bin == Some(bin))
            .count();
        if count > 0 {
            debug!("{}: {} individuals in {} BP", label, count, bin.label);
        }
    }
}
