use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::Aggregate;
use crate::data::filter::FilteredView;
use crate::data::model::{Listing, YearMonth};

/// Number of listings posted in one period (a day or a month).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodCount<K> {
    pub period: K,
    pub count: usize,
}

/// Listings per exact posting date, oldest first.
pub fn daily_volume(view: &FilteredView<'_>) -> Aggregate<Vec<PeriodCount<NaiveDate>>> {
    count_by(view, |l| l.posted_date)
}

/// Listings per posting month, oldest first.
pub fn monthly_volume(view: &FilteredView<'_>) -> Aggregate<Vec<PeriodCount<YearMonth>>> {
    count_by(view, |l| l.month)
}

fn count_by<K: Ord>(
    view: &FilteredView<'_>,
    key: impl Fn(&Listing) -> K,
) -> Aggregate<Vec<PeriodCount<K>>> {
    if view.is_empty() {
        return Aggregate::NoData;
    }
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for l in view.iter() {
        *counts.entry(key(l)).or_default() += 1;
    }
    Aggregate::Ready(
        counts
            .into_iter()
            .map(|(period, count)| PeriodCount { period, count })
            .collect(),
    )
}
