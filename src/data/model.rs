use std::collections::HashSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Source column names
// ---------------------------------------------------------------------------

/// Column literals of the scraped export.  The loader depends on these exactly.
pub mod columns {
    pub const DATE: &str = "Tanggal";
    pub const COMPANY: &str = "Perusahaan";
    pub const LOCATION: &str = "Lokasi";
    pub const MIN_EXPERIENCE: &str = "Pengalaman Minimal";
    pub const CAREER_LEVEL: &str = "Jenjang Karir";
    pub const SALARY_MIN: &str = "Gaji Minimum";
    pub const SALARY_MAX: &str = "Gaji Maksimum";
    pub const DESCRIPTION: &str = "Deskripsi Pekerjaan";

    /// Every column the loader requires, in the order it checks them.
    pub const REQUIRED: [&str; 8] = [
        DATE,
        COMPANY,
        LOCATION,
        MIN_EXPERIENCE,
        CAREER_LEVEL,
        SALARY_MIN,
        SALARY_MAX,
        DESCRIPTION,
    ];
}

// ---------------------------------------------------------------------------
// YearMonth – the posting date truncated to month granularity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ---------------------------------------------------------------------------
// Listing – one row of the export
// ---------------------------------------------------------------------------

/// A single job posting.  Immutable once the dataset is built.
///
/// Optional fields are `None` when the source cell was empty or unparseable;
/// a missing salary is never coerced to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub posted_date: NaiveDate,
    pub month: YearMonth,
    pub company: Option<String>,
    pub location: Option<String>,
    pub min_experience: Option<String>,
    pub career_level: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    /// Mean of the two bounds; `None` whenever either bound is missing.
    pub salary_avg: Option<f64>,
    pub description: Option<String>,
}

impl Listing {
    /// Build a listing, deriving `month` and `salary_avg`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        posted_date: NaiveDate,
        company: Option<String>,
        location: Option<String>,
        min_experience: Option<String>,
        career_level: Option<String>,
        salary_min: Option<f64>,
        salary_max: Option<f64>,
        description: Option<String>,
    ) -> Self {
        let salary_avg = match (salary_min, salary_max) {
            (Some(lo), Some(hi)) => Some((lo + hi) / 2.0),
            _ => None,
        };
        Listing {
            posted_date,
            month: YearMonth::from(posted_date),
            company,
            location,
            min_experience,
            career_level,
            salary_min,
            salary_max,
            salary_avg,
            description,
        }
    }
}

// ---------------------------------------------------------------------------
// JobDataset – the complete loaded snapshot
// ---------------------------------------------------------------------------

/// Distinct non-missing category values, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryOptions {
    pub locations: Vec<String>,
    pub experience_levels: Vec<String>,
    pub career_levels: Vec<String>,
}

/// The full parsed dataset with pre-computed filter options.
#[derive(Debug, Clone)]
pub struct JobDataset {
    pub listings: Vec<Listing>,
    pub options: CategoryOptions,
}

impl JobDataset {
    /// Build the category index from the loaded listings.
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        let options = CategoryOptions {
            locations: distinct(listings.iter().map(|l| l.location.as_deref())),
            experience_levels: distinct(listings.iter().map(|l| l.min_experience.as_deref())),
            career_levels: distinct(listings.iter().map(|l| l.career_level.as_deref())),
        };
        JobDataset { listings, options }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .flatten()
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
