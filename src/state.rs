use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::aggregate::DashboardView;
use crate::color::ColorMap;
use crate::data::cache::DatasetCache;
use crate::data::filter::FilterSpec;
use crate::data::model::JobDataset;

// ---------------------------------------------------------------------------
// UI selections
// ---------------------------------------------------------------------------

/// Dashboard tabs, one per group of views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    TimeTrends,
    CompanyLocation,
    Salary,
    Keywords,
    CareerLevel,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::TimeTrends,
        Tab::CompanyLocation,
        Tab::Salary,
        Tab::Keywords,
        Tab::CareerLevel,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::TimeTrends => "Time Trends",
            Tab::CompanyLocation => "Company & Location",
            Tab::Salary => "Salary",
            Tab::Keywords => "Keywords",
            Tab::CareerLevel => "Career Level",
        }
    }
}

/// Granularity of the posting-volume chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VolumePeriod {
    #[default]
    Daily,
    Monthly,
}

/// The three multi-select category filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCategory {
    Location,
    Experience,
    CareerLevel,
}

impl FilterCategory {
    pub const ALL: [FilterCategory; 3] = [
        FilterCategory::Location,
        FilterCategory::Experience,
        FilterCategory::CareerLevel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterCategory::Location => "Location",
            FilterCategory::Experience => "Minimum Experience",
            FilterCategory::CareerLevel => "Career Level",
        }
    }

    /// All values observed in the dataset, in first-seen order.
    pub fn options<'a>(&self, dataset: &'a JobDataset) -> &'a [String] {
        match self {
            FilterCategory::Location => &dataset.options.locations,
            FilterCategory::Experience => &dataset.options.experience_levels,
            FilterCategory::CareerLevel => &dataset.options.career_levels,
        }
    }

    pub fn selected<'a>(&self, spec: &'a FilterSpec) -> &'a BTreeSet<String> {
        match self {
            FilterCategory::Location => &spec.locations,
            FilterCategory::Experience => &spec.experience_levels,
            FilterCategory::CareerLevel => &spec.career_levels,
        }
    }

    fn selected_mut<'a>(&self, spec: &'a mut FilterSpec) -> &'a mut BTreeSet<String> {
        match self {
            FilterCategory::Location => &mut spec.locations,
            FilterCategory::Experience => &mut spec.experience_levels,
            FilterCategory::CareerLevel => &mut spec.career_levels,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Parsed datasets by file; reused until explicitly reloaded.
    pub cache: DatasetCache,

    /// File the current dataset came from.
    pub source: Option<PathBuf>,

    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Arc<JobDataset>>,

    /// Current filter selection.
    pub filters: Option<FilterSpec>,

    /// Aggregates for the current filters (recomputed on every change).
    pub view: Option<DashboardView>,

    /// Stable colours for career levels across the pie and legends.
    pub career_colors: Option<ColorMap>,

    pub tab: Tab,
    pub volume_period: VolumePeriod,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load `path` through the cache and make it the current dataset.
    /// On failure the previous dataset stays in place.
    ///
    /// Opening a different file empties the cache first; only the file on
    /// screen is kept parsed.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        if self.source.as_deref().is_some_and(|current| current != path) {
            self.cache.clear();
        }
        let dataset = self
            .cache
            .get_or_load(path)
            .with_context(|| format!("loading {}", path.display()))?;
        log::debug!("{} dataset(s) cached", self.cache.len());
        self.source = Some(path.to_path_buf());
        self.set_dataset(dataset);
        Ok(())
    }

    /// Drop the cached copy of the current file and read it again.
    pub fn reload(&mut self) -> Result<()> {
        let Some(path) = self.source.clone() else {
            return Ok(());
        };
        self.cache.invalidate(&path);
        log::info!("Reloading {}", path.display());
        self.open(&path)
    }

    /// Ingest a newly loaded dataset, initialise filters and colours.
    pub fn set_dataset(&mut self, dataset: Arc<JobDataset>) {
        if dataset.is_empty() {
            log::warn!("Dataset contains no listings with a valid date");
        }
        self.filters = Some(FilterSpec::all_of(&dataset));
        self.career_colors = Some(ColorMap::new(&dataset.options.career_levels));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the dashboard view after a filter change.
    pub fn refilter(&mut self) {
        if let (Some(ds), Some(spec)) = (&self.dataset, &self.filters) {
            self.view = Some(DashboardView::compute(ds, spec));
        }
    }

    pub fn set_salary_bounds(&mut self, min_salary: f64, max_salary: f64) {
        if let Some(spec) = &mut self.filters {
            spec.min_salary = min_salary;
            spec.max_salary = max_salary;
        }
        self.refilter();
    }

    /// Toggle a single value in a category filter.
    pub fn toggle_filter_value(&mut self, category: FilterCategory, value: &str) {
        if let Some(spec) = &mut self.filters {
            let selected = category.selected_mut(spec);
            if !selected.remove(value) {
                selected.insert(value.to_string());
            }
        }
        self.refilter();
    }

    /// Select all observed values of a category.
    pub fn select_all(&mut self, category: FilterCategory) {
        if let (Some(ds), Some(spec)) = (&self.dataset, &mut self.filters) {
            *category.selected_mut(spec) = category.options(ds).iter().cloned().collect();
        }
        self.refilter();
    }

    /// Deselect all values of a category.
    pub fn select_none(&mut self, category: FilterCategory) {
        if let Some(spec) = &mut self.filters {
            category.selected_mut(spec).clear();
        }
        self.refilter();
    }

    /// Write the current view model as pretty JSON.
    pub fn export_summary(&self, path: &Path) -> Result<()> {
        let view = self.view.as_ref().context("no dataset loaded")?;
        let json = serde_json::to_string_pretty(view).context("serializing summary")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported summary to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn listings_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(
            file,
            "Tanggal,Perusahaan,Lokasi,Pengalaman Minimal,Jenjang Karir,Gaji Minimum,Gaji Maksimum,Deskripsi Pekerjaan\n\
             2024-01-01,PT A,Jakarta,0,Staff,1000000,2000000,Rust engineer\n\
             2024-01-01,PT B,Bandung,1,Staff,,3000000,Go engineer\n\
             2024-01-02,PT A,Jakarta,0,Manager,2000000,4000000,Engineering manager\n"
        )
        .unwrap();
        file.flush().unwrap();
        file
    }

    fn opened() -> (AppState, tempfile::NamedTempFile) {
        let file = listings_file();
        let mut state = AppState::default();
        state.open(file.path()).unwrap();
        (state, file)
    }

    #[test]
    fn test_open_selects_everything() {
        let (state, _file) = opened();
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.total_listings, 3);
        // Row 2 lacks a minimum salary.
        assert_eq!(view.filtered_listings, 2);
        assert_eq!(state.filters.as_ref().unwrap().locations.len(), 2);
    }

    #[test]
    fn test_toggle_and_select_none_refilter() {
        let (mut state, _file) = opened();

        state.toggle_filter_value(FilterCategory::CareerLevel, "Manager");
        assert_eq!(state.view.as_ref().unwrap().filtered_listings, 1);

        state.toggle_filter_value(FilterCategory::CareerLevel, "Manager");
        assert_eq!(state.view.as_ref().unwrap().filtered_listings, 2);

        state.select_none(FilterCategory::Location);
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.filtered_listings, 0);
        assert!(view.top_companies.from_fallback);

        state.select_all(FilterCategory::Location);
        assert_eq!(state.view.as_ref().unwrap().filtered_listings, 2);
    }

    #[test]
    fn test_salary_bounds_refilter() {
        let (mut state, _file) = opened();
        state.set_salary_bounds(2_000_000.0, 25_000_000.0);
        assert_eq!(state.view.as_ref().unwrap().filtered_listings, 1);
    }

    #[test]
    fn test_failed_open_keeps_previous_dataset() {
        let (mut state, _file) = opened();
        assert!(state.open(Path::new("/missing/listings.csv")).is_err());
        assert_eq!(state.dataset.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn test_reload_rereads_file() {
        let (mut state, file) = opened();
        writeln!(file.as_file(), "2024-01-03,PT C,Medan,2,Staff,5000000,6000000,Sales").unwrap();
        state.reload().unwrap();
        assert_eq!(state.dataset.as_ref().unwrap().len(), 4);
        assert_eq!(state.filters.as_ref().unwrap().locations.len(), 3);
    }

    #[test]
    fn test_export_summary_writes_json() {
        let (state, _file) = opened();
        let out = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        state.export_summary(out.path()).unwrap();

        let text = std::fs::read_to_string(out.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["filtered_listings"], 2);
        assert_eq!(json["top_companies"]["entries"][0]["value"], "PT A");
    }

    #[test]
    fn test_opening_another_file_keeps_only_that_file_cached() {
        let (mut state, first) = opened();
        let second = listings_file();
        state.open(second.path()).unwrap();
        assert_eq!(state.cache.len(), 1);

        // Reopening the current file is served from the cache.
        let shown = state.dataset.clone().unwrap();
        state.open(second.path()).unwrap();
        assert!(Arc::ptr_eq(&shown, state.dataset.as_ref().unwrap()));

        state.open(first.path()).unwrap();
        assert_eq!(state.cache.len(), 1);
        assert_eq!(state.source.as_deref(), Some(first.path()));
    }
}
