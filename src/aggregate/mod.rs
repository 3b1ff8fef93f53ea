//! Aggregators: pure functions turning a [`FilteredView`] into the data
//! behind one chart each, plus [`DashboardView`], which runs the whole
//! filter → aggregate pass for one filter selection.
//!
//! ```text
//!  JobDataset ──► filter::apply(spec) ──► FilteredView
//!                                            │
//!        ┌──────────┬──────────┬─────────────┼──────────┐
//!        ▼          ▼          ▼             ▼          ▼
//!     volume     ranking     salary      keywords    career
//!                  ▲
//!                  └── falls back to the full dataset when the view is empty
//! ```

pub mod career;
pub mod keywords;
pub mod ranking;
pub mod salary;
pub mod volume;

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{HISTOGRAM_BINS, MAX_KEYWORDS, TOP_N};
use crate::data::filter::{apply, FilterSpec, FilteredView};
use crate::data::model::{JobDataset, YearMonth};

use career::{career_proportions, CareerShare};
use keywords::{keyword_cloud, KeywordCloud};
use ranking::{top_n, RankedField, TopN};
use salary::{salary_distribution, SalaryBound, SalaryDistribution};
use volume::{daily_volume, monthly_volume, PeriodCount};

// ---------------------------------------------------------------------------
// Aggregate – explicit "no data" signal
// ---------------------------------------------------------------------------

/// Result of an aggregator with an explicit empty-input policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Aggregate<T> {
    NoData,
    Ready(T),
}

impl<T> Aggregate<T> {
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Aggregate::Ready(v) => Some(v),
            Aggregate::NoData => None,
        }
    }

    #[cfg(test)]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Aggregate::NoData)
    }
}

// ---------------------------------------------------------------------------
// Shared counting helper
// ---------------------------------------------------------------------------

/// Occurrences of one category value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Count values, most frequent first.  Ties keep first-encountered order.
pub(crate) fn ranked_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<CategoryCount> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();
    for v in values {
        match position.get(v) {
            Some(&i) => counts[i].count += 1,
            None => {
                position.insert(v, counts.len());
                counts.push(CategoryCount {
                    value: v.to_string(),
                    count: 1,
                });
            }
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

// ---------------------------------------------------------------------------
// DashboardView – everything the presentation layer renders
// ---------------------------------------------------------------------------

/// The view model for one filter selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub total_listings: usize,
    pub filtered_listings: usize,
    pub daily_volume: Aggregate<Vec<PeriodCount<NaiveDate>>>,
    pub monthly_volume: Aggregate<Vec<PeriodCount<YearMonth>>>,
    pub top_companies: TopN,
    pub top_locations: TopN,
    pub salary_min: SalaryDistribution,
    pub salary_max: SalaryDistribution,
    pub keywords: Aggregate<KeywordCloud>,
    pub career_levels: Aggregate<Vec<CareerShare>>,
}

impl DashboardView {
    /// Filter `dataset` with `spec` and run every aggregator on the result.
    pub fn compute(dataset: &JobDataset, spec: &FilterSpec) -> Self {
        let view = apply(dataset, spec);
        Self::from_view(dataset, &view)
    }

    fn from_view(dataset: &JobDataset, view: &FilteredView<'_>) -> Self {
        let full = FilteredView::all(dataset);
        DashboardView {
            total_listings: dataset.len(),
            filtered_listings: view.len(),
            daily_volume: daily_volume(view),
            monthly_volume: monthly_volume(view),
            top_companies: top_n(view, &full, RankedField::Company, TOP_N),
            top_locations: top_n(view, &full, RankedField::Location, TOP_N),
            salary_min: salary_distribution(view, SalaryBound::Min, HISTOGRAM_BINS),
            salary_max: salary_distribution(view, SalaryBound::Max, HISTOGRAM_BINS),
            keywords: keyword_cloud(view, MAX_KEYWORDS),
            career_levels: career_proportions(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::scenario_dataset;

    #[test]
    fn test_ranked_counts_ties_keep_first_seen_order() {
        let counts = ranked_counts(["b", "a", "a", "c", "b", "d"].into_iter());
        let values: Vec<_> = counts.iter().map(|c| (c.value.as_str(), c.count)).collect();
        assert_eq!(values, vec![("b", 2), ("a", 2), ("c", 1), ("d", 1)]);
    }

    #[test]
    fn test_dashboard_with_everything_filtered_out() {
        let ds = scenario_dataset();
        let mut spec = FilterSpec::all_of(&ds);
        spec.locations = ["Medan".to_string()].into();

        let dash = DashboardView::compute(&ds, &spec);
        assert_eq!(dash.filtered_listings, 0);
        assert!(dash.daily_volume.is_no_data());
        assert!(dash.career_levels.is_no_data());
        assert!(dash.keywords.is_no_data());
        assert!(dash.top_locations.from_fallback);
        assert_eq!(dash.top_locations.entries[0].value, "Jakarta");
        assert_eq!(dash.top_locations.entries[0].count, 2);
        assert_eq!(dash.salary_min.mean, None);
    }

    #[test]
    fn test_dashboard_serializes_no_data_explicitly() {
        let ds = scenario_dataset();
        let mut spec = FilterSpec::all_of(&ds);
        spec.career_levels.clear();

        let dash = DashboardView::compute(&ds, &spec);
        let json = serde_json::to_value(&dash).unwrap();
        assert_eq!(json["daily_volume"]["status"], "no_data");
        assert!(json["salary_max"]["mean"].is_null());
        assert_eq!(json["total_listings"], 3);
    }
}
