use std::collections::BTreeSet;

use super::model::{JobDataset, Listing};
use crate::config::SALARY_SLIDER_MAX;

// ---------------------------------------------------------------------------
// Filter predicate: salary bounds plus allowed values per category
// ---------------------------------------------------------------------------

/// The user's current filter selection.  Rebuilt from widget state on every
/// interaction; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub min_salary: f64,
    pub max_salary: f64,
    pub locations: BTreeSet<String>,
    pub experience_levels: BTreeSet<String>,
    pub career_levels: BTreeSet<String>,
}

impl FilterSpec {
    /// Initialise a [`FilterSpec`] with the full salary range and every
    /// observed category value selected.
    pub fn all_of(dataset: &JobDataset) -> Self {
        FilterSpec {
            min_salary: 0.0,
            max_salary: SALARY_SLIDER_MAX,
            locations: dataset.options.locations.iter().cloned().collect(),
            experience_levels: dataset.options.experience_levels.iter().cloned().collect(),
            career_levels: dataset.options.career_levels.iter().cloned().collect(),
        }
    }

    /// Whether a listing passes every predicate.
    ///
    /// A listing passes when:
    /// * its average salary is known and lies within `[min_salary, max_salary]`
    /// * its location, experience and career level are all known and selected
    ///
    /// An empty category set therefore rejects everything.
    pub fn matches(&self, listing: &Listing) -> bool {
        let salary_ok = listing
            .salary_avg
            .is_some_and(|avg| avg >= self.min_salary && avg <= self.max_salary);

        salary_ok
            && selected(&self.locations, listing.location.as_deref())
            && selected(&self.experience_levels, listing.min_experience.as_deref())
            && selected(&self.career_levels, listing.career_level.as_deref())
    }
}

fn selected(allowed: &BTreeSet<String>, value: Option<&str>) -> bool {
    value.is_some_and(|v| allowed.contains(v))
}

// ---------------------------------------------------------------------------
// FilteredView – listings passing the current filters
// ---------------------------------------------------------------------------

/// Borrowed subset of a dataset, in dataset order.
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    pub listings: Vec<&'a Listing>,
}

impl<'a> FilteredView<'a> {
    /// Every listing of the dataset, unfiltered.
    pub fn all(dataset: &'a JobDataset) -> Self {
        FilteredView {
            listings: dataset.listings.iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Listing> + '_ {
        self.listings.iter().copied()
    }
}

/// Return the listings that pass all predicates of `spec`.  Never fails;
/// no match yields an empty view.
pub fn apply<'a>(dataset: &'a JobDataset, spec: &FilterSpec) -> FilteredView<'a> {
    FilteredView {
        listings: dataset.listings.iter().filter(|l| spec.matches(l)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::{listing, scenario_dataset};

    fn scenario_spec() -> FilterSpec {
        FilterSpec {
            min_salary: 0.0,
            max_salary: 25_000_000.0,
            locations: ["Jakarta".to_string()].into(),
            experience_levels: ["0".to_string()].into(),
            career_levels: ["Staff".to_string(), "Manager".to_string()].into(),
        }
    }

    #[test]
    fn test_scenario_keeps_rows_one_and_three() {
        let ds = scenario_dataset();
        let view = apply(&ds, &scenario_spec());
        assert_eq!(view.len(), 2);
        assert!(std::ptr::eq(view.listings[0], &ds.listings[0]));
        assert!(std::ptr::eq(view.listings[1], &ds.listings[2]));
    }

    #[test]
    fn test_every_member_satisfies_all_predicates() {
        let ds = scenario_dataset();
        let spec = FilterSpec::all_of(&ds);
        let view = apply(&ds, &spec);
        for l in view.iter() {
            assert!(spec.matches(l));
            assert!(ds.listings.iter().any(|d| std::ptr::eq(d, l)));
        }
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let ds = scenario_dataset();
        let spec = scenario_spec();
        let first: Vec<Listing> = apply(&ds, &spec).iter().cloned().collect();
        let refiltered = JobDataset::from_listings(first.clone());
        let second: Vec<Listing> = apply(&refiltered, &spec).iter().cloned().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_category_set_yields_empty_view() {
        let ds = scenario_dataset();
        for clear in 0..3 {
            let mut spec = FilterSpec::all_of(&ds);
            match clear {
                0 => spec.locations.clear(),
                1 => spec.experience_levels.clear(),
                _ => spec.career_levels.clear(),
            }
            assert!(apply(&ds, &spec).is_empty());
        }
    }

    #[test]
    fn test_missing_salary_never_passes_any_bounds() {
        let ds = scenario_dataset();
        let mut spec = FilterSpec::all_of(&ds);
        for (lo, hi) in [(0.0, 25_000_000.0), (f64::MIN, f64::MAX), (0.0, 0.0)] {
            spec.min_salary = lo;
            spec.max_salary = hi;
            assert!(apply(&ds, &spec)
                .iter()
                .all(|l| l.salary_min.is_some() && l.salary_max.is_some()));
        }
    }

    #[test]
    fn test_salary_bounds_are_inclusive() {
        let ds = JobDataset::from_listings(vec![listing(
            "2024-01-01",
            Some("Jakarta"),
            Some("0"),
            Some("Staff"),
            Some(1_000_000.0),
            Some(3_000_000.0),
        )]);
        let mut spec = FilterSpec::all_of(&ds);
        spec.min_salary = 2_000_000.0;
        spec.max_salary = 2_000_000.0;
        assert_eq!(apply(&ds, &spec).len(), 1);
        spec.min_salary = 2_000_000.5;
        assert!(apply(&ds, &spec).is_empty());
    }

    #[test]
    fn test_inverted_bounds_yield_empty_view() {
        let ds = scenario_dataset();
        let mut spec = FilterSpec::all_of(&ds);
        spec.min_salary = 10_000_000.0;
        spec.max_salary = 1_000_000.0;
        assert!(apply(&ds, &spec).is_empty());
    }

    #[test]
    fn test_missing_category_value_is_excluded() {
        let ds = JobDataset::from_listings(vec![listing(
            "2024-01-01",
            None,
            Some("0"),
            Some("Staff"),
            Some(1.0),
            Some(1.0),
        )]);
        let spec = FilterSpec::all_of(&ds);
        assert!(apply(&ds, &spec).is_empty());
    }

    #[test]
    fn test_default_spec_selects_all_observed_values() {
        let ds = scenario_dataset();
        let spec = FilterSpec::all_of(&ds);
        assert_eq!(spec.locations.len(), 2);
        assert_eq!(spec.career_levels.len(), 2);
        assert_eq!(spec.max_salary, 25_000_000.0);
        // Row 2 has no salary_min, so only rows 1 and 3 survive.
        assert_eq!(apply(&ds, &spec).len(), 2);
    }
}
