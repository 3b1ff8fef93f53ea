use serde::Serialize;

use super::{ranked_counts, CategoryCount};
use crate::data::filter::FilteredView;
use crate::data::model::Listing;

/// Category field a top-N ranking is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankedField {
    Company,
    Location,
}

impl RankedField {
    pub fn value<'a>(&self, listing: &'a Listing) -> Option<&'a str> {
        match self {
            RankedField::Company => listing.company.as_deref(),
            RankedField::Location => listing.location.as_deref(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RankedField::Company => "Company",
            RankedField::Location => "Location",
        }
    }
}

/// The most frequent values of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopN {
    pub field: RankedField,
    /// Non-increasing by count.
    pub entries: Vec<CategoryCount>,
    /// True when the filtered view was empty and the ranking was taken
    /// from the unfiltered dataset instead.
    pub from_fallback: bool,
}

/// Rank `field` over `view`, keeping the top `n`.
///
/// An empty `view` ranks the unfiltered `full` dataset instead of showing
/// nothing.  Only these rankings fall back; the other aggregators report
/// "no data".
// TODO: product decision pending on whether the fallback should stay or
// become an explicit "no data" like the other views.
pub fn top_n(view: &FilteredView<'_>, full: &FilteredView<'_>, field: RankedField, n: usize) -> TopN {
    let (source, from_fallback) = if view.is_empty() {
        (full, true)
    } else {
        (view, false)
    };

    let mut entries = ranked_counts(source.iter().filter_map(|l| field.value(l)));
    entries.truncate(n);

    TopN {
        field,
        entries,
        from_fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, FilterSpec};
    use crate::data::model::JobDataset;
    use crate::data::test_support::{listing, scenario_dataset};

    fn with_company(company: Option<&str>, location: &str) -> Listing {
        let mut l = listing("2024-01-01", Some(location), Some("0"), Some("Staff"), Some(1.0), Some(1.0));
        l.company = company.map(String::from);
        l
    }

    #[test]
    fn test_top_n_truncates_and_orders() {
        let mut rows = Vec::new();
        for i in 0..12 {
            for _ in 0..=i {
                rows.push(with_company(Some(&format!("PT {i}")), "Jakarta"));
            }
        }
        let ds = JobDataset::from_listings(rows);
        let view = FilteredView::all(&ds);
        let top = top_n(&view, &view, RankedField::Company, 10);

        assert_eq!(top.entries.len(), 10);
        assert_eq!(top.entries[0].value, "PT 11");
        assert_eq!(top.entries[0].count, 12);
        assert!(top.entries.windows(2).all(|w| w[0].count >= w[1].count));
        assert!(top.entries.iter().map(|e| e.count).sum::<usize>() <= view.len());
        assert!(!top.from_fallback);
    }

    #[test]
    fn test_missing_values_are_not_counted() {
        let ds = JobDataset::from_listings(vec![
            with_company(None, "Jakarta"),
            with_company(Some("PT A"), "Jakarta"),
            with_company(None, "Bandung"),
        ]);
        let view = FilteredView::all(&ds);
        let top = top_n(&view, &view, RankedField::Company, 10);
        assert_eq!(top.entries.len(), 1);
        assert_eq!(top.entries[0].count, 1);
    }

    #[test]
    fn test_ties_keep_first_encountered_order() {
        let ds = JobDataset::from_listings(vec![
            with_company(Some("PT B"), "Surabaya"),
            with_company(Some("PT A"), "Bandung"),
            with_company(Some("PT A"), "Surabaya"),
            with_company(Some("PT B"), "Bandung"),
        ]);
        let view = FilteredView::all(&ds);
        let locations = top_n(&view, &view, RankedField::Location, 10);
        assert_eq!(locations.entries[0].value, "Surabaya");
        assert_eq!(locations.entries[1].value, "Bandung");
    }

    #[test]
    fn test_empty_view_falls_back_to_full_dataset() {
        let ds = scenario_dataset();
        let mut spec = FilterSpec::all_of(&ds);
        spec.locations = ["Medan".to_string()].into();
        let view = apply(&ds, &spec);
        assert!(view.is_empty());

        let full = FilteredView::all(&ds);
        let top = top_n(&view, &full, RankedField::Location, 10);
        assert!(top.from_fallback);
        assert_eq!(
            top.entries,
            vec![
                CategoryCount { value: "Jakarta".into(), count: 2 },
                CategoryCount { value: "Bandung".into(), count: 1 },
            ]
        );
    }
}
