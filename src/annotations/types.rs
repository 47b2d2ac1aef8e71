use crate::annotations::binning::EraBin;

/// Which chromosome lineage a dataset was derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lineage {
    /// Mitochondrial DNA, inherited maternally.
    Maternal,
    /// Y chromosome, inherited paternally.
    Paternal,
}

impl Lineage {
    /// Display name, also used as the map layer key.
    pub fn label(&self) -> &'static str {
        match self {
            Lineage::Maternal => "mtDNA",
            Lineage::Paternal => "Y",
        }
    }
}

/// An exact sample location. Latitude and longitude are stored in
/// centi-degrees so locations that round to the same two decimals compare
/// and hash identically; cluster membership lookups depend on that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeoPoint {
    lat_c: i32,
    lon_c: i32,
}

impl GeoPoint {
    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        Self {
            lat_c: (lat * 100.0).round() as i32,
            lon_c: (lon * 100.0).round() as i32,
        }
    }

    pub fn lat(&self) -> f64 {
        f64::from(self.lat_c) / 100.0
    }

    pub fn lon(&self) -> f64 {
        f64::from(self.lon_c) / 100.0
    }
}

/// One normalized spreadsheet row. Optional fields hold whatever survived
/// normalization; the lineage filter decides what is usable per lineage.
#[derive(Debug, Clone)]
pub struct SampleRecord {
    /// Mean age in years before 1950 CE. Never exactly zero; zero marks a
    /// modern sample and those rows are dropped during loading.
    pub mean_bp: f64,
    /// Calendar-era display label derived from `mean_bp` ("551 BC", "850 AD").
    pub era: String,
    pub country: String,
    /// Rounded coordinate, absent when the source cell was empty or the
    /// ".." placeholder.
    pub coords: Option<GeoPoint>,
    /// Raw Y-haplogroup cell text, absent when empty or whitespace-only.
    pub y_code: Option<String>,
    /// Raw mtDNA-haplogroup cell text, absent when empty or whitespace-only.
    pub mt_code: Option<String>,
}

impl SampleRecord {
    pub fn code_for(&self, lineage: Lineage) -> Option<&str> {
        match lineage {
            Lineage::Paternal => self.y_code.as_deref(),
            Lineage::Maternal => self.mt_code.as_deref(),
        }
    }
}

/// The four nested prefix levels of a cleaned code (lengths 1/2/3/5).
/// Shorter codes keep their full length at deeper levels; no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLevels {
    pub l1: String,
    pub l2: String,
    pub l3: String,
    pub l5: String,
}

/// A record admitted to one lineage's dataset: coordinates present, code
/// cleaned down to its root form, era bin and prefix levels precomputed.
#[derive(Debug, Clone)]
pub struct LineageRecord {
    pub coords: GeoPoint,
    pub country: String,
    pub mean_bp: f64,
    pub code: String,
    pub era_bin: Option<&'static EraBin>,
    pub levels: CodeLevels,
}

/// The filtered, decomposed record set for one lineage. Immutable once
/// derived; independent from the sibling lineage's dataset.
#[derive(Debug)]
pub struct LineageDataset {
    pub lineage: Lineage,
    pub records: Vec<LineageRecord>,
    /// Records removed for carrying the unresolved ".." code.
    pub unresolved_count: usize,
}
