/// Data layer: core types, loading, caching, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → JobDataset (bad dates dropped)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  path → Arc<JobDataset>, manual invalidation
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSpec → FilteredView
///   └──────────┘
/// ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use super::model::{JobDataset, Listing};

    pub fn listing(
        date: &str,
        location: Option<&str>,
        experience: Option<&str>,
        career: Option<&str>,
        salary_min: Option<f64>,
        salary_max: Option<f64>,
    ) -> Listing {
        Listing::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            None,
            location.map(String::from),
            experience.map(String::from),
            career.map(String::from),
            salary_min,
            salary_max,
            None,
        )
    }

    /// The three-row dataset used throughout the filter and aggregate tests.
    pub fn scenario_dataset() -> JobDataset {
        JobDataset::from_listings(vec![
            listing("2024-01-01", Some("Jakarta"), Some("0"), Some("Staff"), Some(1_000_000.0), Some(2_000_000.0)),
            listing("2024-01-01", Some("Bandung"), Some("1"), Some("Staff"), None, Some(3_000_000.0)),
            listing("2024-01-02", Some("Jakarta"), Some("0"), Some("Manager"), Some(2_000_000.0), Some(4_000_000.0)),
        ])
    }
}
