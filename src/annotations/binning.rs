//! The fixed era-range bins over the BP axis.

/// One named, right-closed BP range.
#[derive(Debug, PartialEq, Eq)]
pub struct EraBin {
    pub lower: u32,
    pub upper: u32,
    pub label: &'static str,
}

/// The global bin table. Boundaries are fixed; binning never depends on the
/// data. The first bin is closed on both ends so every age in [1, 44500]
/// belongs to exactly one bin.
pub static ERA_BINS: [EraBin; 10] = [
    EraBin { lower: 1, upper: 1000, label: "1-1000" },
    EraBin { lower: 1001, upper: 2000, label: "1001-2000" },
    EraBin { lower: 2001, upper: 3000, label: "2001-3000" },
    EraBin { lower: 3001, upper: 4000, label: "3001-4000" },
    EraBin { lower: 4001, upper: 5000, label: "4001-5000" },
    EraBin { lower: 5001, upper: 6000, label: "5001-6000" },
    EraBin { lower: 6001, upper: 7000, label: "6001-7000" },
    EraBin { lower: 7001, upper: 8000, label: "7001-8000" },
    EraBin { lower: 8001, upper: 11000, label: "8001-11000" },
    EraBin { lower: 11001, upper: 44500, label: "11001-44500" },
];

/// Assigns a mean BP age to its era bin. Ages outside [1, 44500] have none.
pub fn bin_for(mean_bp: f64) -> Option<&'static EraBin> {
    if !(1.0..=44500.0).contains(&mean_bp) {
        return None;
    }
    ERA_BINS.iter().find(|bin| mean_bp <= f64::from(bin.upper))
}
