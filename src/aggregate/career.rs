use serde::Serialize;

use super::{ranked_counts, Aggregate};
use crate::data::filter::FilteredView;

/// Share of one career level among listings with a known level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerShare {
    pub level: String,
    pub count: usize,
    pub proportion: f64,
}

/// Career-level composition of `view`, most common first.
pub fn career_proportions(view: &FilteredView<'_>) -> Aggregate<Vec<CareerShare>> {
    let counts = ranked_counts(view.iter().filter_map(|l| l.career_level.as_deref()));
    let total: usize = counts.iter().map(|c| c.count).sum();
    if total == 0 {
        return Aggregate::NoData;
    }
    Aggregate::Ready(
        counts
            .into_iter()
            .map(|c| CareerShare {
                proportion: c.count as f64 / total as f64,
                level: c.value,
                count: c.count,
            })
            .collect(),
    )
}
