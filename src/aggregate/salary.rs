use serde::Serialize;

use crate::data::filter::FilteredView;
use crate::data::model::Listing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryBound {
    Min,
    Max,
}

impl SalaryBound {
    pub fn value(&self, listing: &Listing) -> Option<f64> {
        match self {
            SalaryBound::Min => listing.salary_min,
            SalaryBound::Max => listing.salary_max,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SalaryBound::Min => "Minimum Salary",
            SalaryBound::Max => "Maximum Salary",
        }
    }
}

/// One histogram bin covering `[start, end)`; the last bin also includes `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Histogram and mean of one salary bound over the listings where it is
/// known and strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryDistribution {
    pub bound: SalaryBound,
    pub bins: Vec<HistogramBin>,
    /// `None` when no listing qualified.  Never a computed zero.
    pub mean: Option<f64>,
    pub count: usize,
}

pub fn salary_distribution(view: &FilteredView<'_>, bound: SalaryBound, bins: usize) -> SalaryDistribution {
    let values: Vec<f64> = view
        .iter()
        .filter_map(|l| bound.value(l))
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect();

    let mean = (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64);

    SalaryDistribution {
        bound,
        bins: histogram(&values, bins),
        mean,
        count: values.len(),
    }
}

/// Equal-width bins spanning the data range.  A single distinct value gets a
/// unit-wide range centred on it.
fn histogram(values: &[f64], n_bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || n_bins == 0 {
        return Vec::new();
    }

    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / n_bins as f64;

    let mut bins: Vec<HistogramBin> = (0..n_bins)
        .map(|i| HistogramBin {
            start: lo + i as f64 * width,
            end: if i + 1 == n_bins { hi } else { lo + (i + 1) as f64 * width },
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - lo) / width) as usize).min(n_bins - 1);
        bins[idx].count += 1;
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::JobDataset;
    use crate::data::test_support::listing;

    fn dataset(salaries: &[(Option<f64>, Option<f64>)]) -> JobDataset {
        JobDataset::from_listings(
            salaries
                .iter()
                .map(|&(lo, hi)| listing("2024-01-01", None, None, None, lo, hi))
                .collect(),
        )
    }

    #[test]
    fn test_excludes_missing_and_zero() {
        let ds = dataset(&[
            (Some(0.0), Some(5_000_000.0)),
            (None, Some(7_000_000.0)),
            (Some(4_000_000.0), None),
            (Some(6_000_000.0), Some(9_000_000.0)),
        ]);
        let view = FilteredView::all(&ds);

        let min = salary_distribution(&view, SalaryBound::Min, 50);
        assert_eq!(min.count, 2);
        assert_eq!(min.mean, Some(5_000_000.0));

        let max = salary_distribution(&view, SalaryBound::Max, 50);
        assert_eq!(max.count, 3);
        assert_eq!(max.mean, Some(7_000_000.0));
    }

    #[test]
    fn test_bins_cover_range_and_counts_sum() {
        let ds = dataset(&[
            (Some(1_000_000.0), None),
            (Some(2_000_000.0), None),
            (Some(3_500_000.0), None),
            (Some(11_000_000.0), None),
        ]);
        let dist = salary_distribution(&FilteredView::all(&ds), SalaryBound::Min, 50);

        assert_eq!(dist.bins.len(), 50);
        assert_eq!(dist.bins[0].start, 1_000_000.0);
        assert_eq!(dist.bins[49].end, 11_000_000.0);
        assert_eq!(dist.bins.iter().map(|b| b.count).sum::<usize>(), 4);
        // The maximum lands in the closed last bin.
        assert_eq!(dist.bins[49].count, 1);
        assert_eq!(dist.bins[0].count, 1);
    }

    #[test]
    fn test_single_value_gets_unit_range() {
        let ds = dataset(&[(Some(5_000_000.0), None), (Some(5_000_000.0), None)]);
        let dist = salary_distribution(&FilteredView::all(&ds), SalaryBound::Min, 50);
        assert_eq!(dist.bins[0].start, 4_999_999.5);
        assert_eq!(dist.bins[49].end, 5_000_000.5);
        assert_eq!(dist.bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn test_empty_input_has_undefined_mean() {
        let ds = dataset(&[(Some(0.0), None), (None, None)]);
        let dist = salary_distribution(&FilteredView::all(&ds), SalaryBound::Min, 50);
        assert_eq!(dist.mean, None);
        assert!(dist.bins.is_empty());
        assert_eq!(dist.count, 0);
    }
}
